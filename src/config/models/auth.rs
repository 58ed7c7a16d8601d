//! Authentication configuration

use super::*;
use serde::{Deserialize, Serialize};

const REDACTED: &str = "***";

/// Token exchange settings.
///
/// A `static_token` skips the exchange entirely; otherwise an OAuth password
/// grant is performed against `token_url`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthConfig {
    /// OAuth token endpoint
    #[serde(default)]
    pub token_url: Option<String>,
    #[serde(default = "default_grant_type")]
    pub grant_type: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub audience: Option<String>,
    #[serde(default = "default_scope")]
    pub scope: String,
    #[serde(default)]
    pub client_id: Option<String>,
    #[serde(default)]
    pub client_secret: Option<String>,
    /// Pre-issued bearer token
    #[serde(default)]
    pub static_token: Option<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_url: None,
            grant_type: default_grant_type(),
            username: None,
            password: None,
            audience: None,
            scope: default_scope(),
            client_id: None,
            client_secret: None,
            static_token: None,
        }
    }
}

impl AuthConfig {
    /// Copy with secrets masked, for display
    pub fn redacted(&self) -> Self {
        let mask = |value: &Option<String>| value.as_ref().map(|_| REDACTED.to_string());
        Self {
            password: mask(&self.password),
            client_secret: mask(&self.client_secret),
            static_token: mask(&self.static_token),
            ..self.clone()
        }
    }
}
