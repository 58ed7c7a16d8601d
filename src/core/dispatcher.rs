//! Run orchestration

use crate::auth::Authenticator;
use crate::config::Config;
use crate::core::aggregator::RunSummary;
use crate::core::processor::{HttpItemProcessor, ItemProcessor};
use crate::core::retry::{RetryController, Sleeper, TokioSleeper};
use crate::core::scheduler::ChunkScheduler;
use crate::reporting::{RunHeader, RunReporter, log_header, log_summary};
use crate::sources::{IdentifierSource, resolve_identifiers};
use crate::utils::error::{DispatchError, Result};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Wires the collaborators together and drives one run
pub struct Dispatcher {
    config: Arc<Config>,
    sleeper: Arc<dyn Sleeper>,
}

impl Dispatcher {
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
            sleeper: Arc::new(TokioSleeper),
        }
    }

    /// Replace the sleeper used for backoff and chunk pauses
    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Authenticate, then process every identifier over HTTP.
    ///
    /// Authentication failure aborts before any identifier is loaded.
    pub async fn run(
        &self,
        authenticator: &dyn Authenticator,
        source: &dyn IdentifierSource,
        reporter: &dyn RunReporter,
    ) -> Result<RunSummary> {
        let headers = authenticator.authenticate().await.map_err(|e| {
            error!("Could not obtain an authentication token: {}", e);
            match e {
                DispatchError::Auth(_) => e,
                other => DispatchError::auth(other.to_string()),
            }
        })?;

        let processor =
            HttpItemProcessor::new(&self.config.endpoint, &self.config.dispatch, &headers)?;
        self.run_with_processor(Arc::new(processor), source, reporter)
            .await
    }

    /// Process every identifier with an already built processor
    pub async fn run_with_processor(
        &self,
        processor: Arc<dyn ItemProcessor>,
        source: &dyn IdentifierSource,
        reporter: &dyn RunReporter,
    ) -> Result<RunSummary> {
        let dispatch = &self.config.dispatch;

        let loaded = resolve_identifiers(source, &self.config.source.backup).await?;
        if loaded.is_empty() {
            error!("No identifiers to process");
            return Err(DispatchError::EmptyIdentifiers);
        }

        let available = loaded.len();
        let mut identifiers = loaded.identifiers;
        if available > dispatch.total_cap {
            warn!(
                "Limiting run to the first {} of {} identifiers",
                dispatch.total_cap, available
            );
            identifiers.truncate(dispatch.total_cap);
        }

        let controller = Arc::new(RetryController::new(
            processor,
            Arc::clone(&self.sleeper),
            dispatch.max_retries,
        ));
        let scheduler = ChunkScheduler::from_config(controller, Arc::clone(&self.sleeper), dispatch);

        let header = RunHeader {
            source_description: loaded.description,
            available,
            to_process: identifiers.len(),
            workers: scheduler.workers(),
            chunks: scheduler.chunk_count(identifiers.len()),
            max_retries: dispatch.max_retries,
            request_timeout: dispatch.request_timeout_duration(),
            chunk_pause: dispatch.chunk_pause_duration(),
        };
        log_header(&header);
        reporter.begin(&header)?;

        let summary = scheduler.run(&identifiers, reporter).await?;

        reporter.finish(&header, &summary)?;
        log_summary(&header, &summary);
        info!("Run finished");

        Ok(summary)
    }
}
