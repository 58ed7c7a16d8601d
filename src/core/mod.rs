//! Dispatch engine
//!
//! Identifier source -> chunk scheduler -> (per chunk) concurrent retry
//! controllers over the item processor -> chunk statistics -> run aggregator.

pub mod aggregator;
mod dispatcher;
pub mod processor;
pub mod retry;
pub mod scheduler;
pub mod types;

pub use aggregator::{LatencyStats, RetryStats, RunAggregator, RunSummary};
pub use dispatcher::Dispatcher;
pub use processor::{HttpItemProcessor, ItemProcessor, ResponseClassifier};
pub use retry::{BackoffPolicy, RecordingSleeper, RetryController, Sleeper, TokioSleeper};
pub use scheduler::{ChunkScheduler, WorkerPool, partition};
pub use types::{Chunk, ChunkStats, Outcome};
