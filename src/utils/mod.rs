//! Utility modules for the loader
//!
//! - **error**: crate and per-identifier error types
//! - **logging**: tracing subscriber setup and run log files

pub mod error;
pub mod logging;
