//! Integration tests for gtin-loader
//!
//! These tests run real components against a local mock server.

pub mod auth_tests;
pub mod config_tests;
pub mod dispatch_tests;
pub mod http_processor_tests;
pub mod reporting_tests;
