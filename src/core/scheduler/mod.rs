//! Chunk scheduler
//!
//! Splits the identifier sequence into ordered chunks and runs each chunk's
//! identifiers through the retry controller under a worker cap. Chunks run
//! strictly one after another; concurrency exists only inside a chunk.

mod chunk;
mod partition;
mod pool;

pub use chunk::ChunkScheduler;
pub use partition::partition;
pub use pool::WorkerPool;
