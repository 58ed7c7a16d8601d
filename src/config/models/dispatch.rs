//! Dispatch engine configuration

use super::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Chunking, concurrency and retry settings for a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DispatchConfig {
    /// Only the first `total_cap` identifiers are processed
    #[serde(default = "default_total_cap")]
    pub total_cap: usize,
    /// Concurrent identifiers in flight within one chunk
    #[serde(default = "default_workers")]
    pub workers: usize,
    /// Attempts per identifier, including the first one
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,
    /// Number of sequential chunks
    #[serde(default = "default_num_chunks")]
    pub num_chunks: usize,
    /// Pause between chunks in seconds
    #[serde(default = "default_chunk_pause")]
    pub chunk_pause: u64,
    /// Characters of a failed response body kept for diagnostics
    #[serde(default = "default_preview_chars")]
    pub preview_chars: usize,
    /// Response body fragment that marks remote connection-pool exhaustion
    #[serde(default = "default_pool_signature")]
    pub pool_exhaustion_signature: String,
    /// Emit chunk progress every N completions
    #[serde(default = "default_progress_every")]
    pub progress_every: usize,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            total_cap: default_total_cap(),
            workers: default_workers(),
            max_retries: default_max_retries(),
            request_timeout: default_request_timeout(),
            num_chunks: default_num_chunks(),
            chunk_pause: default_chunk_pause(),
            preview_chars: default_preview_chars(),
            pool_exhaustion_signature: default_pool_signature(),
            progress_every: default_progress_every(),
        }
    }
}

impl DispatchConfig {
    pub fn request_timeout_duration(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }

    pub fn chunk_pause_duration(&self) -> Duration {
        Duration::from_secs(self.chunk_pause)
    }
}
