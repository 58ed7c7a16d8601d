//! Configuration data models
//!
//! This module defines all configuration structures used by the loader.

#![allow(missing_docs)]

pub mod auth;
pub mod dispatch;
pub mod endpoint;
pub mod output;
pub mod source;

// Re-export all configuration types
pub use auth::*;
pub use dispatch::*;
pub use endpoint::*;
pub use output::*;
pub use source::*;

/// Default cap on identifiers processed per run
pub fn default_total_cap() -> usize {
    100
}

/// Default concurrent workers per chunk
pub fn default_workers() -> usize {
    4
}

/// Default maximum attempts per identifier
pub fn default_max_retries() -> u32 {
    4
}

/// Default request timeout in seconds
pub fn default_request_timeout() -> u64 {
    600 // 10 minutes
}

pub fn default_num_chunks() -> usize {
    3
}

/// Default pause between chunks in seconds
pub fn default_chunk_pause() -> u64 {
    5
}

pub fn default_preview_chars() -> usize {
    200
}

pub fn default_pool_signature() -> String {
    "QueuePool limit".to_string()
}

pub fn default_progress_every() -> usize {
    5
}

pub fn default_api_url() -> String {
    "http://127.0.0.1:8000/api/v1/product/description/generate".to_string()
}

/// Default GLN sent with every identifier
pub fn default_secondary_key() -> String {
    "0000000000000".to_string()
}

pub fn default_user_agent() -> String {
    format!("gtin-loader/{}", env!("CARGO_PKG_VERSION"))
}

pub fn default_grant_type() -> String {
    "password".to_string()
}

pub fn default_scope() -> String {
    "openid profile email".to_string()
}

pub fn default_results_dir() -> std::path::PathBuf {
    std::path::PathBuf::from("batch_comparison_results")
}

pub fn default_batch_file() -> std::path::PathBuf {
    std::path::PathBuf::from("gtins_extracted.yaml")
}

/// Built-in identifiers used when the configured source cannot be read
pub fn default_backup_identifiers() -> Vec<String> {
    [
        "07502209290686",
        "07501943474307",
        "07506052540714",
        "00613008738884",
        "07501010789211",
        "07502214983573",
        "07502214983726",
        "07502214983726",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

pub fn default_true() -> bool {
    true
}
