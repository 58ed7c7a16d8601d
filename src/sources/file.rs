//! Batch-file and plain-list sources

use super::{IdentifierSource, LoadedIdentifiers, clean_identifiers};
use crate::utils::error::{DispatchError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// One named batch in a batch file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedBatch {
    pub name: String,
    pub identifiers: Vec<String>,
}

/// YAML batch file written by `extract`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchFile {
    #[serde(default)]
    pub batches: Vec<NamedBatch>,
    /// Every identifier; the concatenation of all batches when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub all: Option<Vec<String>>,
}

impl BatchFile {
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn get(&self, name: &str) -> Option<&NamedBatch> {
        self.batches.iter().find(|b| b.name == name)
    }

    pub fn all_identifiers(&self) -> Vec<String> {
        match &self.all {
            Some(all) => all.clone(),
            None => self
                .batches
                .iter()
                .flat_map(|b| b.identifiers.iter().cloned())
                .collect(),
        }
    }
}

/// Pick identifiers from `file`.
///
/// Named batches are concatenated in the requested order and unknown names
/// are skipped with a warning. Without any usable name every identifier is
/// returned.
pub fn select_batches(file: &BatchFile, names: &[String]) -> (Vec<String>, String) {
    if !names.is_empty() {
        let mut selected = Vec::new();
        let mut used = Vec::new();

        for name in names {
            match file.get(name) {
                Some(batch) => {
                    info!("Adding batch {} ({} identifiers)", name, batch.identifiers.len());
                    selected.extend(batch.identifiers.iter().cloned());
                    used.push(format!("{}({})", name, batch.identifiers.len()));
                }
                None => warn!("Batch not found: {}", name),
            }
        }

        if !selected.is_empty() {
            return (selected, format!("Selected batches: {}", used.join(", ")));
        }
        warn!("No requested batch was found, using every identifier");
    }

    let all = file.all_identifiers();
    let description = format!("All identifiers from batch file ({})", all.len());
    (all, description)
}

/// Reads a YAML batch file (`.yaml`/`.yml`) or a plain list with one
/// identifier per line and `#` comments.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    batches: Vec<String>,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>, batches: Vec<String>) -> Self {
        Self {
            path: path.into(),
            batches,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn is_batch_file(&self) -> bool {
        matches!(
            self.path.extension().and_then(|e| e.to_str()),
            Some("yaml" | "yml")
        )
    }

    fn unavailable(&self, reason: impl std::fmt::Display) -> DispatchError {
        DispatchError::source_unavailable(format!("{}: {}", self.path.display(), reason))
    }
}

#[async_trait]
impl IdentifierSource for FileSource {
    async fn load(&self) -> Result<LoadedIdentifiers> {
        info!("Loading identifiers from {}", self.path.display());
        let text = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| self.unavailable(e))?;

        let (raw, description) = if self.is_batch_file() {
            let file = BatchFile::from_yaml_str(&text).map_err(|e| self.unavailable(e))?;
            for batch in &file.batches {
                info!("   {}: {} identifiers", batch.name, batch.identifiers.len());
            }
            info!("Batch file loaded: {} batches", file.batches.len());
            select_batches(&file, &self.batches)
        } else {
            let lines: Vec<String> = text
                .lines()
                .map(str::trim)
                .filter(|l| !l.starts_with('#'))
                .map(str::to_string)
                .collect();
            let description = format!("Identifier list {}", self.path.display());
            (lines, description)
        };

        let origin = self.path.display().to_string();
        let identifiers = clean_identifiers(raw, &origin);
        if identifiers.is_empty() {
            return Err(self.unavailable("no valid identifiers"));
        }

        Ok(LoadedIdentifiers::new(identifiers, description))
    }
}
