use crate::utils::error::{DispatchError, Result};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::debug;

/// Semaphore-gated task pool bounding in-flight work
#[derive(Debug, Clone)]
pub struct WorkerPool {
    semaphore: Arc<Semaphore>,
    name: String,
    max_concurrent: usize,
}

impl WorkerPool {
    /// Create a pool; a zero limit is raised to one
    pub fn new(name: impl Into<String>, max_concurrent: usize) -> Self {
        let max_concurrent = max_concurrent.max(1);
        Self {
            semaphore: Arc::new(Semaphore::new(max_concurrent)),
            name: name.into(),
            max_concurrent,
        }
    }

    /// Spawn `task` into `tasks`; it starts running only once a permit is free
    pub fn spawn<F>(&self, tasks: &mut JoinSet<Result<F::Output>>, task: F)
    where
        F: Future + Send + 'static,
        F::Output: Send + 'static,
    {
        let semaphore = Arc::clone(&self.semaphore);
        let name = self.name.clone();
        tasks.spawn(async move {
            let _permit = semaphore.acquire_owned().await.map_err(|e| {
                DispatchError::internal(format!("Worker pool '{}' closed: {}", name, e))
            })?;
            debug!("Worker pool '{}' acquired permit", name);
            Ok(task.await)
        });
    }

    pub fn available_permits(&self) -> usize {
        self.semaphore.available_permits()
    }

    pub fn max_concurrent(&self) -> usize {
        self.max_concurrent
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}
