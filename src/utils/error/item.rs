//! Per-identifier failure kinds

use thiserror::Error;

/// Failure of a single remote call for one identifier.
///
/// These never propagate past the retry controller; the final one is kept on
/// the failed [`Outcome`](crate::core::Outcome).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ItemError {
    /// Connection error, timeout or unreadable response
    #[error("Transport error: {message}")]
    Transport { message: String },

    /// Status outside [200, 300)
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// Remote connection pool exhausted; backs off exponentially
    #[error("Connection pool exhausted (HTTP {status}): {body}")]
    PoolExhausted { status: u16, body: String },
}

impl ItemError {
    pub fn transport<S: Into<String>>(message: S) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// HTTP status of the failed response, if one was received
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transport { .. } => None,
            Self::Http { status, .. } | Self::PoolExhausted { status, .. } => Some(*status),
        }
    }

    /// Body preview or error description kept for diagnostics
    pub fn detail(&self) -> &str {
        match self {
            Self::Transport { message } => message,
            Self::Http { body, .. } | Self::PoolExhausted { body, .. } => body,
        }
    }

    pub fn is_pool_exhaustion(&self) -> bool {
        matches!(self, Self::PoolExhausted { .. })
    }

    /// Short label used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Transport { .. } => "transport",
            Self::Http { .. } => "http",
            Self::PoolExhausted { .. } => "pool_exhausted",
        }
    }
}
