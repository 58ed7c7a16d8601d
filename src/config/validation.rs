//! Configuration validation
//!
//! This module provides validation logic for all configuration structures.

use super::models::*;
use tracing::debug;
use url::Url;

/// Validation trait for configuration structures
pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}

fn validate_http_url(url_str: &str, context: &str) -> Result<(), String> {
    let url =
        Url::parse(url_str).map_err(|e| format!("{} has invalid URL format: {}", context, e))?;

    match url.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(format!(
            "{} must use http:// or https:// scheme, got: {}",
            context, scheme
        )),
    }
}

impl Validate for DispatchConfig {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating dispatch configuration");

        if self.total_cap == 0 {
            return Err("total_cap must be greater than 0".to_string());
        }
        if self.workers == 0 {
            return Err("workers must be greater than 0".to_string());
        }
        if self.max_retries == 0 {
            return Err("max_retries must allow at least one attempt".to_string());
        }
        if self.request_timeout == 0 {
            return Err("request_timeout must be greater than 0".to_string());
        }
        if self.num_chunks == 0 {
            return Err("num_chunks must be greater than 0".to_string());
        }
        if self.preview_chars == 0 {
            return Err("preview_chars must be greater than 0".to_string());
        }
        if self.progress_every == 0 {
            return Err("progress_every must be greater than 0".to_string());
        }
        if self.pool_exhaustion_signature.trim().is_empty() {
            return Err("pool_exhaustion_signature cannot be empty".to_string());
        }

        Ok(())
    }
}

impl Validate for EndpointConfig {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating endpoint configuration");

        validate_http_url(&self.api_url, "api_url")?;
        if self.secondary_key.is_empty() {
            return Err("secondary_key cannot be empty".to_string());
        }

        Ok(())
    }
}

impl Validate for AuthConfig {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating auth configuration");

        if let Some(token_url) = &self.token_url {
            validate_http_url(token_url, "token_url")?;
        }
        if let Some(token) = &self.static_token {
            if token.trim().is_empty() {
                return Err("static_token cannot be blank".to_string());
            }
        }

        Ok(())
    }
}

impl Validate for SourceConfig {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating source configuration");

        match &self.kind {
            SourceKind::File { path, .. } if path.as_os_str().is_empty() => {
                Err("source file path cannot be empty".to_string())
            }
            SourceKind::Backup if self.backup.is_empty() => {
                Err("backup source selected but the backup list is empty".to_string())
            }
            _ => Ok(()),
        }
    }
}

impl Validate for OutputConfig {
    fn validate(&self) -> Result<(), String> {
        if self.results_dir.as_os_str().is_empty() {
            return Err("results_dir cannot be empty".to_string());
        }
        Ok(())
    }
}
