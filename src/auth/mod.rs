//! Authentication collaborators
//!
//! An [`Authenticator`] turns configured credentials into the header set
//! attached to every submission. A failed exchange is fatal for the run.

mod headers;
mod oauth;
mod static_token;

pub use headers::AuthHeaders;
pub use oauth::{OAuthPasswordAuthenticator, TokenRequest, TokenResponse};
pub use static_token::StaticTokenAuthenticator;

use crate::config::AuthConfig;
use crate::utils::error::{DispatchError, Result};
use async_trait::async_trait;
use tracing::debug;

/// Exchanges credentials for request headers
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn authenticate(&self) -> Result<AuthHeaders>;
}

/// Pick the authenticator the configuration describes.
///
/// A static token wins over a token URL.
pub fn authenticator_from_config(config: &AuthConfig) -> Result<Box<dyn Authenticator>> {
    if let Some(token) = &config.static_token {
        debug!("Using static bearer token");
        return Ok(Box::new(StaticTokenAuthenticator::new(token.clone())));
    }

    if config.token_url.is_some() {
        debug!("Using OAuth password grant");
        return Ok(Box::new(OAuthPasswordAuthenticator::from_config(config)?));
    }

    Err(DispatchError::auth(
        "No authentication configured: set auth.static_token or auth.token_url",
    ))
}
