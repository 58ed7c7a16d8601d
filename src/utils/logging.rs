//! Logging setup
//!
//! Console output (plain or JSON) filtered by `RUST_LOG`, plus an optional
//! plain-text copy of the run log in the results directory.

use crate::utils::error::{DispatchError, Result};
use chrono::Local;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

/// Subscriber settings chosen by the binary
#[derive(Debug, Clone)]
pub struct LoggingOptions {
    /// Filter used when `RUST_LOG` is not set
    pub default_filter: String,
    pub json: bool,
    pub log_file: Option<PathBuf>,
}

impl Default for LoggingOptions {
    fn default() -> Self {
        Self {
            default_filter: "info".to_string(),
            json: false,
            log_file: None,
        }
    }
}

/// Local timestamp shared by the files of one run
pub fn run_timestamp() -> String {
    Local::now().format("%Y%m%d_%H%M%S").to_string()
}

/// `<dir>/batch_processing_log_<timestamp>.txt`
pub fn log_file_path(dir: &Path, timestamp: &str) -> PathBuf {
    dir.join(format!("batch_processing_log_{}.txt", timestamp))
}

/// Install the global subscriber; fails if one is already set
pub fn init_logging(options: &LoggingOptions) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&options.default_filter))
        .map_err(|e| DispatchError::config(format!("Invalid log filter: {}", e)))?;

    let console = if options.json {
        fmt::layer().json().with_target(false).boxed()
    } else {
        fmt::layer().with_target(false).boxed()
    };

    let file_layer = match &options.log_file {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            let file = File::create(path)?;
            Some(
                fmt::layer()
                    .with_ansi(false)
                    .with_target(false)
                    .with_writer(Mutex::new(file)),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file_layer)
        .try_init()
        .map_err(|e| DispatchError::internal(format!("Failed to initialise logging: {}", e)))
}
