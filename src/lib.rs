//! # gtin-loader
//!
//! Bulk submission of GTIN identifiers to an authenticated HTTP endpoint.
//!
//! The identifier list is split into sequential chunks. Inside a chunk every
//! identifier runs concurrently, capped by the worker count, through a retry
//! controller that backs off exponentially on remote connection-pool
//! exhaustion and linearly on any other failure. Every outcome is written to
//! a results sink as it completes and the run ends with latency, retry and
//! throughput statistics.
//!
//! ```rust,no_run
//! use gtin_loader::{Config, Dispatcher};
//! use gtin_loader::auth::authenticator_from_config;
//! use gtin_loader::reporting::CsvReporter;
//! use gtin_loader::sources::source_from_config;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("config/gtin-loader.yaml").await?;
//!     let auth = authenticator_from_config(&config.auth)?;
//!     let source = source_from_config(&config.source);
//!     let reporter = CsvReporter::in_dir(&config.output.results_dir, "manual")?;
//!
//!     let summary = Dispatcher::new(config)
//!         .run(auth.as_ref(), source.as_ref(), &reporter)
//!         .await?;
//!     println!("{}/{} successful", summary.successful, summary.processed);
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]

pub mod auth;
pub mod cli;
pub mod config;
pub mod core;
pub mod reporting;
pub mod sources;
pub mod utils;

pub use config::Config;
pub use core::{Dispatcher, Outcome, RunSummary};
pub use utils::error::{DispatchError, ItemError, Result};

/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
