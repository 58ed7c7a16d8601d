//! Output configuration

use super::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where results and run logs are written
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory for the results CSV and the run log
    #[serde(default = "default_results_dir")]
    pub results_dir: PathBuf,
    /// Mirror log output into a text file next to the CSV
    #[serde(default = "default_true")]
    pub write_log_file: bool,
    /// Console logs as JSON lines
    #[serde(default)]
    pub json_logs: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            results_dir: default_results_dir(),
            write_log_file: true,
            json_logs: false,
        }
    }
}
