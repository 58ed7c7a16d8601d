//! Command-line interface
//!
//! Settings are layered: configuration file, then `GTIN_*` environment
//! variables, then the flags given here.

use crate::config::{Config, SourceKind};
use crate::utils::error::Result;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

/// Configuration file read when `--config` is not given, if it exists
pub const DEFAULT_CONFIG_PATH: &str = "config/gtin-loader.yaml";

#[derive(Debug, Parser)]
#[command(name = "gtin-loader", version, about = "Bulk GTIN submission with retries and run statistics")]
pub struct Cli {
    /// YAML configuration file
    #[arg(short, long, env = "GTIN_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Emit console logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Submit identifiers to the remote endpoint
    Run(RunArgs),
    /// Build a batch file from a text or CSV export
    Extract(ExtractArgs),
    /// Print the effective configuration with secrets masked
    ShowConfig,
}

#[derive(Debug, Clone, Default, Args)]
pub struct RunArgs {
    /// Batch file (.yaml) or plain identifier list
    #[arg(long, value_name = "PATH")]
    pub source_file: Option<PathBuf>,

    /// Batch to process from the batch file; repeatable
    #[arg(long = "batch", value_name = "NAME")]
    pub batches: Vec<String>,

    /// Comma-separated identifiers to process instead of a file
    #[arg(long, value_delimiter = ',', conflicts_with = "source_file")]
    pub identifiers: Vec<String>,

    /// Process the built-in backup list
    #[arg(long, conflicts_with_all = ["source_file", "identifiers"])]
    pub use_backup: bool,

    /// Maximum number of identifiers to process
    #[arg(long)]
    pub limit: Option<usize>,

    #[arg(long)]
    pub workers: Option<usize>,

    /// Attempts per identifier
    #[arg(long)]
    pub max_retries: Option<u32>,

    #[arg(long)]
    pub chunks: Option<usize>,

    /// Seconds to pause between chunks
    #[arg(long)]
    pub chunk_pause: Option<u64>,

    /// Per-request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    #[arg(long)]
    pub api_url: Option<String>,

    #[arg(long, value_name = "DIR")]
    pub results_dir: Option<PathBuf>,
}

impl RunArgs {
    /// Overlay the given flags onto `config`
    pub fn apply(&self, config: &mut Config) {
        let dispatch = &mut config.dispatch;
        if let Some(v) = self.limit {
            dispatch.total_cap = v;
        }
        if let Some(v) = self.workers {
            dispatch.workers = v;
        }
        if let Some(v) = self.max_retries {
            dispatch.max_retries = v;
        }
        if let Some(v) = self.chunks {
            dispatch.num_chunks = v;
        }
        if let Some(v) = self.chunk_pause {
            dispatch.chunk_pause = v;
        }
        if let Some(v) = self.timeout {
            dispatch.request_timeout = v;
        }
        if let Some(v) = &self.api_url {
            config.endpoint.api_url = v.clone();
        }
        if let Some(v) = &self.results_dir {
            config.output.results_dir = v.clone();
        }

        if self.use_backup {
            config.source.kind = SourceKind::Backup;
        } else if !self.identifiers.is_empty() {
            config.source.kind = SourceKind::Inline {
                identifiers: self.identifiers.clone(),
                label: None,
            };
        } else if let Some(path) = &self.source_file {
            config.source.kind = SourceKind::File {
                path: path.clone(),
                batches: self.batches.clone(),
            };
        } else if !self.batches.is_empty() {
            if let SourceKind::File { batches, .. } = &mut config.source.kind {
                *batches = self.batches.clone();
            }
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct ExtractArgs {
    /// Workbook (.xlsx, .ods, ...) or CSV file; identifiers are read from
    /// the first column
    pub input: PathBuf,

    /// Batch file to write
    #[arg(short, long, default_value = "gtins_extracted.yaml")]
    pub output: PathBuf,

    #[arg(long, default_value_t = 1000)]
    pub batch_size: usize,
}

impl Cli {
    /// Load the file configuration (if any) and apply environment overrides.
    ///
    /// The result is not validated; callers validate once all overrides,
    /// including [`RunArgs::apply`], are in place.
    pub async fn load_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::read_file(path).await?,
            None if Path::new(DEFAULT_CONFIG_PATH).exists() => {
                Config::read_file(DEFAULT_CONFIG_PATH).await?
            }
            None => Config::default(),
        };
        config.apply_env()?;
        Ok(config)
    }
}
