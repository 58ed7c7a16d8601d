use crate::utils::error::{DispatchError, Result};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};

/// Headers attached to every submission; read-only once built
#[derive(Debug, Clone, Default)]
pub struct AuthHeaders(HeaderMap);

impl AuthHeaders {
    /// `Authorization: Bearer <token>` plus a JSON content type
    pub fn bearer(token: &str) -> Result<Self> {
        let mut headers = Self::default();
        headers.insert(AUTHORIZATION, &format!("Bearer {}", token))?;
        headers.insert(CONTENT_TYPE, "application/json")?;
        Ok(headers)
    }

    pub fn insert(&mut self, name: HeaderName, value: &str) -> Result<()> {
        let value = HeaderValue::from_str(value)
            .map_err(|e| DispatchError::auth(format!("Invalid value for header {}: {}", name, e)))?;
        self.0.insert(name, value);
        Ok(())
    }

    /// Header value as text, if present and printable
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn header_map(&self) -> &HeaderMap {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
