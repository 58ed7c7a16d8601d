//! Derived run statistics

use crate::core::types::percentage;
use std::time::Duration;

/// Latency distribution in seconds
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LatencyStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
    /// Sample standard deviation; 0 with fewer than two samples
    pub std_dev: f64,
}

impl LatencyStats {
    pub fn from_samples(samples: &[Duration]) -> Self {
        if samples.is_empty() {
            return Self::default();
        }

        let mut secs: Vec<f64> = samples.iter().map(Duration::as_secs_f64).collect();
        secs.sort_by(f64::total_cmp);

        let n = secs.len();
        let mean = secs.iter().sum::<f64>() / n as f64;
        let median = if n % 2 == 1 {
            secs[n / 2]
        } else {
            (secs[n / 2 - 1] + secs[n / 2]) / 2.0
        };
        let std_dev = if n > 1 {
            let variance = secs.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
            variance.sqrt()
        } else {
            0.0
        };

        Self {
            min: secs[0],
            max: secs[n - 1],
            mean,
            median,
            std_dev,
        }
    }
}

/// Retry distribution
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RetryStats {
    pub total: u64,
    pub mean: f64,
    pub max: u32,
    /// `histogram[n]` is the number of identifiers that used `n` retries
    pub histogram: Vec<usize>,
}

impl RetryStats {
    pub fn from_samples(samples: &[u32]) -> Self {
        let Some(&max) = samples.iter().max() else {
            return Self::default();
        };

        let total: u64 = samples.iter().map(|&r| u64::from(r)).sum();
        let mut histogram = vec![0; max as usize + 1];
        for &retries in samples {
            histogram[retries as usize] += 1;
        }

        Self {
            total,
            mean: total as f64 / samples.len() as f64,
            max,
            histogram,
        }
    }
}

/// Final statistics of a run, computed once after the last chunk
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    /// Identifiers the run set out to process
    pub planned: usize,
    pub processed: usize,
    pub successful: usize,
    pub failed: usize,
    pub latency: LatencyStats,
    pub retries: RetryStats,
    pub elapsed: Duration,
    /// Processed identifiers per second of wall-clock time
    pub throughput: f64,
}

impl RunSummary {
    pub fn success_rate(&self) -> f64 {
        percentage(self.successful, self.processed)
    }

    pub fn failure_rate(&self) -> f64 {
        percentage(self.failed, self.processed)
    }

    /// Projected minutes to process `count` identifiers at this run's pace
    pub fn estimated_minutes_for(&self, count: usize) -> Option<f64> {
        (self.processed > 0)
            .then(|| self.elapsed.as_secs_f64() / self.processed as f64 * count as f64 / 60.0)
    }
}
