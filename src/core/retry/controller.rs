//! Bounded per-identifier retry loop

use super::backoff::BackoffPolicy;
use super::sleeper::Sleeper;
use crate::core::processor::ItemProcessor;
use crate::core::types::Outcome;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Runs up to `max_attempts` attempts for one identifier, in place.
///
/// The controller owns the identifier's whole attempt history; failures are
/// turned into the returned [`Outcome`] and never propagate.
pub struct RetryController {
    processor: Arc<dyn ItemProcessor>,
    sleeper: Arc<dyn Sleeper>,
    backoff: BackoffPolicy,
    max_attempts: u32,
}

impl RetryController {
    pub fn new(
        processor: Arc<dyn ItemProcessor>,
        sleeper: Arc<dyn Sleeper>,
        max_attempts: u32,
    ) -> Self {
        Self {
            processor,
            sleeper,
            backoff: BackoffPolicy::default(),
            max_attempts: max_attempts.max(1),
        }
    }

    pub fn with_backoff(mut self, backoff: BackoffPolicy) -> Self {
        self.backoff = backoff;
        self
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Process `identifier` until it succeeds or the attempts run out
    pub async fn run(&self, identifier: &str) -> Outcome {
        let mut retry = 0;

        loop {
            let outcome = self.processor.process(identifier).await;

            if outcome.success {
                if retry > 0 {
                    debug!(gtin = identifier, retry, "Retry succeeded");
                }
                return outcome.with_retries(retry);
            }

            if retry + 1 >= self.max_attempts {
                warn!(
                    gtin = identifier,
                    attempts = self.max_attempts,
                    kind = outcome.error.as_ref().map_or("unknown", |e| e.kind()),
                    "Giving up: {}",
                    outcome.detail
                );
                return outcome.with_retries(retry);
            }

            let delay = match &outcome.error {
                Some(error) => self.backoff.delay_for(error, retry),
                None => self.backoff.linear_delay(retry),
            };

            if outcome.is_pool_exhaustion() {
                info!(
                    gtin = identifier,
                    "Connection pool exhausted, waiting {}s before retrying",
                    delay.as_secs()
                );
            }
            info!(
                gtin = identifier,
                "Retrying in {}s (attempt {}/{})",
                delay.as_secs(),
                retry + 1,
                self.max_attempts
            );

            self.sleeper.sleep(delay).await;
            retry += 1;
        }
    }
}
