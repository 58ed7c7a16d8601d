//! Configuration management for the loader
//!
//! Configuration is built once at startup (file, then environment, then
//! command-line overrides) and passed by reference to every component.

pub mod models;
pub mod validation;

pub use models::*;
pub use validation::Validate;

use crate::utils::error::{DispatchError, Result};
use std::fmt::Display;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};

/// Main configuration struct for the loader
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Config {
    #[serde(default)]
    pub dispatch: DispatchConfig,
    #[serde(default)]
    pub endpoint: EndpointConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load and validate configuration from a YAML file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = Self::read_file(path).await?;

        config.validate()?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Load configuration from a YAML file without validating it.
    ///
    /// For callers that layer overrides on top and validate the result.
    pub async fn read_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| DispatchError::Config(format!("Failed to read config file: {}", e)))?;

        Self::from_yaml_str(&content)
    }

    /// Parse configuration from YAML text without validating it
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        serde_yaml::from_str(content)
            .map_err(|e| DispatchError::Config(format!("Failed to parse config: {}", e)))
    }

    /// Apply `GTIN_*` environment variable overrides
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_env_with(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup
    pub fn apply_env_with<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        debug!("Applying environment overrides");

        // Dispatch configuration
        if let Some(v) = lookup("GTIN_TOTAL_CAP") {
            self.dispatch.total_cap = parse_env("GTIN_TOTAL_CAP", &v)?;
        }
        if let Some(v) = lookup("GTIN_WORKERS") {
            self.dispatch.workers = parse_env("GTIN_WORKERS", &v)?;
        }
        if let Some(v) = lookup("GTIN_MAX_RETRIES") {
            self.dispatch.max_retries = parse_env("GTIN_MAX_RETRIES", &v)?;
        }
        if let Some(v) = lookup("GTIN_TIMEOUT") {
            self.dispatch.request_timeout = parse_env("GTIN_TIMEOUT", &v)?;
        }
        if let Some(v) = lookup("GTIN_CHUNKS") {
            self.dispatch.num_chunks = parse_env("GTIN_CHUNKS", &v)?;
        }
        if let Some(v) = lookup("GTIN_CHUNK_PAUSE") {
            self.dispatch.chunk_pause = parse_env("GTIN_CHUNK_PAUSE", &v)?;
        }

        // Endpoint configuration
        if let Some(v) = lookup("GTIN_API_URL") {
            self.endpoint.api_url = v;
        }
        if let Some(v) = lookup("GTIN_SECONDARY_KEY") {
            self.endpoint.secondary_key = v;
        }
        if let Some(v) = lookup("GTIN_REPROCESS") {
            self.endpoint.reprocess = parse_env("GTIN_REPROCESS", &v)?;
        }

        // Auth configuration
        if let Some(v) = lookup("GTIN_AUTH_TOKEN_URL") {
            self.auth.token_url = Some(v);
        }
        if let Some(v) = lookup("GTIN_AUTH_USERNAME") {
            self.auth.username = Some(v);
        }
        if let Some(v) = lookup("GTIN_AUTH_PASSWORD") {
            self.auth.password = Some(v);
        }
        if let Some(v) = lookup("GTIN_AUTH_AUDIENCE") {
            self.auth.audience = Some(v);
        }
        if let Some(v) = lookup("GTIN_AUTH_CLIENT_ID") {
            self.auth.client_id = Some(v);
        }
        if let Some(v) = lookup("GTIN_AUTH_CLIENT_SECRET") {
            self.auth.client_secret = Some(v);
        }
        if let Some(v) = lookup("GTIN_AUTH_TOKEN") {
            self.auth.static_token = Some(v);
        }

        // Output configuration
        if let Some(v) = lookup("GTIN_RESULTS_DIR") {
            self.output.results_dir = v.into();
        }

        Ok(())
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        self.dispatch
            .validate()
            .map_err(|e| DispatchError::Config(format!("Dispatch config error: {}", e)))?;
        self.endpoint
            .validate()
            .map_err(|e| DispatchError::Config(format!("Endpoint config error: {}", e)))?;
        self.auth
            .validate()
            .map_err(|e| DispatchError::Config(format!("Auth config error: {}", e)))?;
        self.source
            .validate()
            .map_err(|e| DispatchError::Config(format!("Source config error: {}", e)))?;
        self.output
            .validate()
            .map_err(|e| DispatchError::Config(format!("Output config error: {}", e)))?;

        debug!("Configuration validation completed");
        Ok(())
    }

    /// Convert to YAML string with secrets masked
    pub fn to_yaml(&self) -> Result<String> {
        let display = Self {
            auth: self.auth.redacted(),
            ..self.clone()
        };
        serde_yaml::to_string(&display)
            .map_err(|e| DispatchError::Config(format!("Failed to serialize config to YAML: {}", e)))
    }
}

fn parse_env<T>(key: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| DispatchError::Config(format!("Invalid {}: {}", key, e)))
}
