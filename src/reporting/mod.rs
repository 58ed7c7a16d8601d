//! Result reporting
//!
//! The scheduler pushes every outcome, progress tick and the final summary
//! through an injected [`RunReporter`]. `CsvReporter` writes the tabular
//! results file; `MemoryReporter` keeps everything in memory.

mod csv;
mod log;
mod memory;

pub use csv::{CSV_COLUMNS, CsvReporter};
pub use log::{log_header, log_summary};
pub use memory::MemoryReporter;

use crate::core::{Outcome, RunSummary};
use crate::core::types::percentage;
use crate::utils::error::Result;
use std::time::Duration;

/// Run configuration echoed at the top of the results
#[derive(Debug, Clone, PartialEq)]
pub struct RunHeader {
    pub source_description: String,
    /// Identifiers the source supplied, before the cap
    pub available: usize,
    /// Identifiers the run will process
    pub to_process: usize,
    pub workers: usize,
    pub chunks: usize,
    pub max_retries: u32,
    pub request_timeout: Duration,
    pub chunk_pause: Duration,
}

/// One row of the results table
#[derive(Debug, Clone, PartialEq)]
pub struct ResultRecord {
    pub identifier: String,
    pub success: bool,
    pub status_code: Option<u16>,
    pub latency: Duration,
    pub retries_used: u32,
    /// Time since the run started
    pub elapsed: Duration,
    /// Identifiers processed in the whole run so far
    pub processed_total: usize,
    /// Successful identifiers in the whole run so far
    pub successful_total: usize,
    pub chunk_index: usize,
}

impl ResultRecord {
    pub fn from_outcome(
        outcome: &Outcome,
        chunk_index: usize,
        elapsed: Duration,
        processed_total: usize,
        successful_total: usize,
    ) -> Self {
        Self {
            identifier: outcome.identifier.clone(),
            success: outcome.success,
            status_code: outcome.status_code,
            latency: outcome.latency,
            retries_used: outcome.retries_used,
            elapsed,
            processed_total,
            successful_total,
            chunk_index,
        }
    }
}

/// Progress of one chunk at a notification point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkProgress {
    pub chunk_index: usize,
    pub completed: usize,
    pub chunk_len: usize,
    pub successful: usize,
}

impl ChunkProgress {
    pub fn percent(&self) -> f64 {
        percentage(self.completed, self.chunk_len)
    }

    pub fn success_rate(&self) -> f64 {
        percentage(self.successful, self.completed)
    }

    pub fn is_final(&self) -> bool {
        self.completed == self.chunk_len
    }
}

/// Sink for run results; called only from the scheduler's single consumer
pub trait RunReporter: Send + Sync {
    /// Called once before the first chunk
    fn begin(&self, header: &RunHeader) -> Result<()>;

    /// Called once per outcome, in completion order
    fn record(&self, record: &ResultRecord) -> Result<()>;

    /// Called at chunk progress notification points
    fn progress(&self, _progress: &ChunkProgress) -> Result<()> {
        Ok(())
    }

    /// Called once after the last chunk
    fn finish(&self, header: &RunHeader, summary: &RunSummary) -> Result<()>;
}
