//! Core data model shared by the dispatch components

use crate::utils::error::ItemError;
use std::time::Duration;

/// Final result for one identifier.
///
/// Produced by the item processor with `retries_used == 0` and re-annotated
/// once by the retry controller; never mutated after that.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub identifier: String,
    pub success: bool,
    pub status_code: Option<u16>,
    pub latency: Duration,
    pub retries_used: u32,
    /// Response body preview on success, body preview or error text on failure
    pub detail: String,
    pub error: Option<ItemError>,
}

impl Outcome {
    /// Successful outcome for a 2xx response
    pub fn succeeded(
        identifier: impl Into<String>,
        status_code: u16,
        latency: Duration,
        body: impl Into<String>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            success: true,
            status_code: Some(status_code),
            latency,
            retries_used: 0,
            detail: body.into(),
            error: None,
        }
    }

    /// Failed outcome carrying the classified error
    pub fn failed(identifier: impl Into<String>, error: ItemError, latency: Duration) -> Self {
        Self {
            identifier: identifier.into(),
            success: false,
            status_code: error.status(),
            latency,
            retries_used: 0,
            detail: error.detail().to_string(),
            error: Some(error),
        }
    }

    pub fn with_retries(mut self, retries_used: u32) -> Self {
        self.retries_used = retries_used;
        self
    }

    pub fn is_pool_exhaustion(&self) -> bool {
        self.error
            .as_ref()
            .is_some_and(ItemError::is_pool_exhaustion)
    }
}

/// Contiguous slice of the identifier sequence processed as one batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// 1-based position of the chunk in the run
    pub index: usize,
    pub identifiers: Vec<String>,
}

impl Chunk {
    pub fn len(&self) -> usize {
        self.identifiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.identifiers.is_empty()
    }
}

/// Statistics for one completed chunk, in completion order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChunkStats {
    pub index: usize,
    pub processed: usize,
    pub successful: usize,
    pub failed: usize,
    pub latencies: Vec<Duration>,
    pub retries: Vec<u32>,
}

impl ChunkStats {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            ..Self::default()
        }
    }

    /// Account for one outcome
    pub fn record(&mut self, outcome: &Outcome) {
        self.processed += 1;
        if outcome.success {
            self.successful += 1;
        } else {
            self.failed += 1;
        }
        self.latencies.push(outcome.latency);
        self.retries.push(outcome.retries_used);
    }

    /// Success percentage of the outcomes recorded so far
    pub fn success_rate(&self) -> f64 {
        percentage(self.successful, self.processed)
    }
}

pub(crate) fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}
