use super::{AuthHeaders, Authenticator};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Uses a pre-issued bearer token
#[derive(Debug, Clone)]
pub struct StaticTokenAuthenticator {
    token: String,
}

impl StaticTokenAuthenticator {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

#[async_trait]
impl Authenticator for StaticTokenAuthenticator {
    async fn authenticate(&self) -> Result<AuthHeaders> {
        AuthHeaders::bearer(&self.token)
    }
}
