//! OAuth password grant against a token endpoint

use super::{AuthHeaders, Authenticator};
use crate::config::AuthConfig;
use crate::utils::error::{DispatchError, Result};
use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::HeaderName;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{error, info};

const ID_TOKEN_HEADER: &str = "id_token";

/// JSON body sent to the token endpoint
#[derive(Debug, Clone, Serialize)]
pub struct TokenRequest {
    pub grant_type: String,
    pub username: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audience: Option<String>,
    pub scope: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_secret: Option<String>,
}

/// Fields read from the token response
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub id_token: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
}

/// Password-grant token exchange
pub struct OAuthPasswordAuthenticator {
    client: Client,
    token_url: String,
    request: TokenRequest,
}

impl OAuthPasswordAuthenticator {
    pub fn new(token_url: impl Into<String>, request: TokenRequest) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| DispatchError::auth(format!("Failed to build token client: {}", e)))?;

        Ok(Self {
            client,
            token_url: token_url.into(),
            request,
        })
    }

    /// Requires `token_url`, `username` and `password`
    pub fn from_config(config: &AuthConfig) -> Result<Self> {
        let required = |value: &Option<String>, name: &str| {
            value
                .clone()
                .ok_or_else(|| DispatchError::auth(format!("auth.{} is required", name)))
        };

        let token_url = required(&config.token_url, "token_url")?;
        let request = TokenRequest {
            grant_type: config.grant_type.clone(),
            username: required(&config.username, "username")?,
            password: required(&config.password, "password")?,
            audience: config.audience.clone(),
            scope: config.scope.clone(),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
        };

        Self::new(token_url, request)
    }

    pub fn token_url(&self) -> &str {
        &self.token_url
    }
}

#[async_trait]
impl Authenticator for OAuthPasswordAuthenticator {
    async fn authenticate(&self) -> Result<AuthHeaders> {
        info!("Requesting authentication token");

        let response = self
            .client
            .post(&self.token_url)
            .json(&self.request)
            .send()
            .await
            .map_err(|e| DispatchError::auth(format!("Token request failed: {}", e)))?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            error!(status = status.as_u16(), "Token endpoint rejected credentials");
            return Err(DispatchError::auth(format!(
                "Token endpoint returned {}: {}",
                status.as_u16(),
                body
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| DispatchError::auth(format!("Invalid token response: {}", e)))?;

        let access_token = token
            .access_token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| DispatchError::auth("Token response has no access_token"))?;

        let mut headers = AuthHeaders::bearer(&access_token)?;
        if let Some(id_token) = token.id_token.as_deref() {
            headers.insert(HeaderName::from_static(ID_TOKEN_HEADER), id_token)?;
        }

        info!("Authentication token obtained");
        Ok(headers)
    }
}
