//! Run aggregator
//!
//! Accumulates chunk statistics across the run and derives the final
//! [`RunSummary`] from the full sample lists.

mod stats;

pub use stats::{LatencyStats, RetryStats, RunSummary};

use crate::core::types::{ChunkStats, percentage};
use std::time::{Duration, Instant};

/// Cross-chunk counters and samples; owned by the scheduler's single consumer
#[derive(Debug)]
pub struct RunAggregator {
    planned: usize,
    started: Instant,
    processed: usize,
    successful: usize,
    failed: usize,
    latencies: Vec<Duration>,
    retries: Vec<u32>,
}

impl RunAggregator {
    /// Start the run clock for `planned` identifiers
    pub fn new(planned: usize) -> Self {
        Self {
            planned,
            started: Instant::now(),
            processed: 0,
            successful: 0,
            failed: 0,
            latencies: Vec::with_capacity(planned),
            retries: Vec::with_capacity(planned),
        }
    }

    /// Fold a completed chunk into the totals
    pub fn merge(&mut self, stats: ChunkStats) {
        self.processed += stats.processed;
        self.successful += stats.successful;
        self.failed += stats.failed;
        self.latencies.extend(stats.latencies);
        self.retries.extend(stats.retries);
    }

    pub fn planned(&self) -> usize {
        self.planned
    }

    pub fn processed(&self) -> usize {
        self.processed
    }

    pub fn successful(&self) -> usize {
        self.successful
    }

    pub fn failed(&self) -> usize {
        self.failed
    }

    /// Wall-clock time since the aggregator was created
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    pub fn progress_pct(&self) -> f64 {
        percentage(self.processed, self.planned)
    }

    pub fn success_rate(&self) -> f64 {
        percentage(self.successful, self.processed)
    }

    /// Stop the clock and compute the summary
    pub fn finish(self) -> RunSummary {
        let elapsed = self.elapsed();
        self.summarize(elapsed)
    }

    /// Compute the summary for a given elapsed time
    pub fn summarize(&self, elapsed: Duration) -> RunSummary {
        let secs = elapsed.as_secs_f64();
        let throughput = if secs > 0.0 {
            self.processed as f64 / secs
        } else {
            0.0
        };

        RunSummary {
            planned: self.planned,
            processed: self.processed,
            successful: self.successful,
            failed: self.failed,
            latency: LatencyStats::from_samples(&self.latencies),
            retries: RetryStats::from_samples(&self.retries),
            elapsed,
            throughput,
        }
    }
}
