//! Item processor: exactly one remote call per identifier
//!
//! The processor never sleeps and never retries; it classifies the response
//! into an [`Outcome`] and leaves retry bookkeeping to the caller.

mod classify;
mod http;

pub use classify::{ResponseClassifier, truncate_preview};
pub use http::{HttpItemProcessor, SubmitRequest};

use crate::core::types::Outcome;
use async_trait::async_trait;

/// Executes one attempt for one identifier
#[async_trait]
pub trait ItemProcessor: Send + Sync {
    /// Issue one request and classify it; `retries_used` is always 0
    async fn process(&self, identifier: &str) -> Outcome;
}
