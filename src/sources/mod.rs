//! Identifier sources
//!
//! A source yields the ordered identifier list for a run together with a
//! human-readable description of where it came from. Sources fail with
//! `SourceUnavailable`, which the run answers by switching to the backup list.

mod backup;
mod extract;
mod file;
mod inline;
mod validation;

pub use backup::BackupSource;
pub use extract::{BatchExtractor, ExtractionStats};
pub use file::{BatchFile, FileSource, NamedBatch, select_batches};
pub use inline::InlineSource;
pub use validation::{MAX_IDENTIFIER_LEN, MIN_IDENTIFIER_LEN, clean_identifiers, is_valid_identifier};

use crate::config::{SourceConfig, SourceKind};
use crate::utils::error::Result;
use async_trait::async_trait;
use tracing::warn;

/// Identifiers loaded for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedIdentifiers {
    pub identifiers: Vec<String>,
    pub description: String,
}

impl LoadedIdentifiers {
    pub fn new(identifiers: Vec<String>, description: impl Into<String>) -> Self {
        Self {
            identifiers,
            description: description.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.identifiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.identifiers.is_empty()
    }
}

/// Supplies the ordered identifiers for a run
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentifierSource: Send + Sync {
    async fn load(&self) -> Result<LoadedIdentifiers>;
}

/// Load from `source`, falling back to `backup` when it is unavailable
pub async fn resolve_identifiers(
    source: &dyn IdentifierSource,
    backup: &[String],
) -> Result<LoadedIdentifiers> {
    match source.load().await {
        Ok(loaded) => Ok(loaded),
        Err(e) if e.is_recoverable() => {
            warn!("{}; falling back to backup identifiers", e);
            BackupSource::new(backup.to_vec()).load().await
        }
        Err(e) => Err(e),
    }
}

/// Build the source the configuration names
pub fn source_from_config(config: &SourceConfig) -> Box<dyn IdentifierSource> {
    match &config.kind {
        SourceKind::File { path, batches } => {
            Box::new(FileSource::new(path.clone(), batches.clone()))
        }
        SourceKind::Inline { identifiers, label } => {
            Box::new(InlineSource::new(identifiers.clone(), label.clone()))
        }
        SourceKind::Backup => Box::new(BackupSource::new(config.backup.clone())),
    }
}
