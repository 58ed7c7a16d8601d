use super::{IdentifierSource, LoadedIdentifiers, clean_identifiers};
use crate::utils::error::Result;
use async_trait::async_trait;
use tracing::info;

/// The built-in fallback list; never unavailable
#[derive(Debug, Clone)]
pub struct BackupSource {
    identifiers: Vec<String>,
}

impl BackupSource {
    pub fn new(identifiers: Vec<String>) -> Self {
        Self { identifiers }
    }
}

#[async_trait]
impl IdentifierSource for BackupSource {
    async fn load(&self) -> Result<LoadedIdentifiers> {
        let identifiers = clean_identifiers(&self.identifiers, "backup list");
        info!("Using {} backup identifiers", identifiers.len());
        Ok(LoadedIdentifiers::new(
            identifiers,
            "Backup identifiers (built-in)",
        ))
    }
}
