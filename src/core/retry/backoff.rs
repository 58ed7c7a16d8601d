//! Backoff schedule between attempts

use crate::utils::error::ItemError;
use std::time::Duration;

/// Wait schedule keyed on the failure kind of the previous attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackoffPolicy {
    /// First pool-exhaustion wait; doubles per retry
    pub pool_base: Duration,
    /// Upper bound for pool-exhaustion waits
    pub pool_cap: Duration,
    /// Linear step for every other failure
    pub linear_step: Duration,
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self {
            pool_base: Duration::from_secs(5),
            pool_cap: Duration::from_secs(30),
            linear_step: Duration::from_secs(3),
        }
    }
}

impl BackoffPolicy {
    /// Delay before the retry following failed attempt `retry_index` (0-based)
    pub fn delay_for(&self, error: &ItemError, retry_index: u32) -> Duration {
        if error.is_pool_exhaustion() {
            self.pool_delay(retry_index)
        } else {
            self.linear_delay(retry_index)
        }
    }

    /// `min(cap, base * 2^n)`
    pub fn pool_delay(&self, retry_index: u32) -> Duration {
        let factor = 2u32.checked_pow(retry_index).unwrap_or(u32::MAX);
        self.pool_base
            .checked_mul(factor)
            .map_or(self.pool_cap, |delay| delay.min(self.pool_cap))
    }

    /// `step * (n + 1)`
    pub fn linear_delay(&self, retry_index: u32) -> Duration {
        self.linear_step
            .saturating_mul(retry_index.saturating_add(1))
    }
}
