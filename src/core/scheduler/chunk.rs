use super::partition::partition;
use super::pool::WorkerPool;
use crate::config::DispatchConfig;
use crate::core::aggregator::{RunAggregator, RunSummary};
use crate::core::retry::{RetryController, Sleeper};
use crate::core::types::{Chunk, ChunkStats};
use crate::reporting::{ChunkProgress, ResultRecord, RunReporter};
use crate::utils::error::{DispatchError, Result};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use tracing::info;

/// Runs chunks sequentially and the identifiers of a chunk concurrently.
///
/// Outcomes are consumed by a single loop in completion order, so counters
/// and the reporter are only ever touched from one place.
pub struct ChunkScheduler {
    controller: Arc<RetryController>,
    sleeper: Arc<dyn Sleeper>,
    pool: WorkerPool,
    num_chunks: usize,
    chunk_pause: Duration,
    progress_every: usize,
}

impl ChunkScheduler {
    pub fn new(
        controller: Arc<RetryController>,
        sleeper: Arc<dyn Sleeper>,
        num_chunks: usize,
        workers: usize,
        chunk_pause: Duration,
    ) -> Self {
        Self {
            controller,
            sleeper,
            pool: WorkerPool::new("chunk-workers", workers),
            num_chunks: num_chunks.max(1),
            chunk_pause,
            progress_every: 5,
        }
    }

    pub fn from_config(
        controller: Arc<RetryController>,
        sleeper: Arc<dyn Sleeper>,
        config: &DispatchConfig,
    ) -> Self {
        Self::new(
            controller,
            sleeper,
            config.num_chunks,
            config.workers,
            config.chunk_pause_duration(),
        )
        .with_progress_every(config.progress_every)
    }

    /// Emit chunk progress every `every` completions (minimum 1)
    pub fn with_progress_every(mut self, every: usize) -> Self {
        self.progress_every = every.max(1);
        self
    }

    pub fn workers(&self) -> usize {
        self.pool.max_concurrent()
    }

    /// Number of chunks `len` identifiers will actually be split into
    pub fn chunk_count(&self, len: usize) -> usize {
        self.num_chunks.min(len)
    }

    /// Process every identifier and return the run summary.
    ///
    /// Only a failed worker task or a reporter error aborts the run;
    /// per-identifier failures end up as failed outcomes.
    pub async fn run(
        &self,
        identifiers: &[String],
        reporter: &dyn RunReporter,
    ) -> Result<RunSummary> {
        let chunks = partition(identifiers, self.num_chunks);
        let total_chunks = chunks.len();
        let mut aggregator = RunAggregator::new(identifiers.len());

        for chunk in &chunks {
            info!(
                "Processing chunk {}/{} ({} identifiers)",
                chunk.index,
                total_chunks,
                chunk.len()
            );

            let stats = self.run_chunk(chunk, &aggregator, reporter).await?;
            info!(
                "Chunk {} completed: {}/{} successful ({:.1}%)",
                stats.index,
                stats.successful,
                stats.processed,
                stats.success_rate()
            );

            aggregator.merge(stats);
            info!(
                "Global progress: {}/{} ({:.1}%), successful {} ({:.1}%), elapsed {:.2}s",
                aggregator.processed(),
                aggregator.planned(),
                aggregator.progress_pct(),
                aggregator.successful(),
                aggregator.success_rate(),
                aggregator.elapsed().as_secs_f64()
            );

            if chunk.index < total_chunks && !self.chunk_pause.is_zero() {
                info!(
                    "Pausing {}s before chunk {}",
                    self.chunk_pause.as_secs(),
                    chunk.index + 1
                );
                self.sleeper.sleep(self.chunk_pause).await;
            }
        }

        Ok(aggregator.finish())
    }

    async fn run_chunk(
        &self,
        chunk: &Chunk,
        aggregator: &RunAggregator,
        reporter: &dyn RunReporter,
    ) -> Result<ChunkStats> {
        let mut stats = ChunkStats::new(chunk.index);
        let mut tasks = JoinSet::new();

        for identifier in &chunk.identifiers {
            let controller = Arc::clone(&self.controller);
            let identifier = identifier.clone();
            self.pool
                .spawn(&mut tasks, async move { controller.run(&identifier).await });
        }

        while let Some(joined) = tasks.join_next().await {
            let outcome = joined
                .map_err(|e| DispatchError::internal(format!("Worker task failed: {}", e)))??;

            stats.record(&outcome);
            reporter.record(&ResultRecord::from_outcome(
                &outcome,
                chunk.index,
                aggregator.elapsed(),
                aggregator.processed() + stats.processed,
                aggregator.successful() + stats.successful,
            ))?;

            if stats.processed % self.progress_every == 0 || stats.processed == chunk.len() {
                let progress = ChunkProgress {
                    chunk_index: chunk.index,
                    completed: stats.processed,
                    chunk_len: chunk.len(),
                    successful: stats.successful,
                };
                info!(
                    "Chunk {} progress: {}/{} ({:.1}%), success rate {:.1}%",
                    progress.chunk_index,
                    progress.completed,
                    progress.chunk_len,
                    progress.percent(),
                    progress.success_rate()
                );
                reporter.progress(&progress)?;
            }
        }

        Ok(stats)
    }
}
