//! Helper functions for creating and classifying errors

use super::types::DispatchError;

impl DispatchError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn auth<S: Into<String>>(message: S) -> Self {
        Self::Auth(message.into())
    }

    pub fn source_unavailable<S: Into<String>>(message: S) -> Self {
        Self::SourceUnavailable(message.into())
    }

    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation(message.into())
    }

    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }

    /// Errors that stop the run before or during processing
    pub fn is_fatal(&self) -> bool {
        !self.is_recoverable()
    }

    /// Errors the run recovers from by degrading (backup identifier list)
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::SourceUnavailable(_))
    }
}
