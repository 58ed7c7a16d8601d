//! Response classification

use crate::config::DispatchConfig;
use crate::utils::error::ItemError;

/// Turns a status code and body into success or a tagged [`ItemError`]
#[derive(Debug, Clone)]
pub struct ResponseClassifier {
    preview_chars: usize,
    pool_signature: String,
}

impl ResponseClassifier {
    pub fn new(preview_chars: usize, pool_signature: impl Into<String>) -> Self {
        Self {
            preview_chars,
            pool_signature: pool_signature.into(),
        }
    }

    pub fn from_config(config: &DispatchConfig) -> Self {
        Self::new(config.preview_chars, config.pool_exhaustion_signature.clone())
    }

    /// Classify a received response.
    ///
    /// Returns the body preview on success. The pool-exhaustion signature is
    /// searched in the full body, before truncation, for any status outside
    /// [200, 300). Detection is not limited to HTTP 500 or to the first 200
    /// characters of the body: a 502/503 carrying the signature, or a long
    /// error body with the signature near the end, also counts as pool
    /// exhaustion and gets the exponential backoff.
    pub fn classify(&self, status: u16, body: &str) -> Result<String, ItemError> {
        let preview = truncate_preview(body, self.preview_chars);

        if (200..300).contains(&status) {
            return Ok(preview);
        }

        if body.contains(&self.pool_signature) {
            Err(ItemError::PoolExhausted {
                status,
                body: preview,
            })
        } else {
            Err(ItemError::Http {
                status,
                body: preview,
            })
        }
    }
}

/// First `max_chars` characters of `body`, never splitting a character
pub fn truncate_preview(body: &str, max_chars: usize) -> String {
    match body.char_indices().nth(max_chars) {
        Some((idx, _)) => body[..idx].to_string(),
        None => body.to_string(),
    }
}
