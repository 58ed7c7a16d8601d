//! Identifier source configuration

use super::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Which identifier source a run reads from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SourceKind {
    /// Batch file produced by `extract`, or a plain list with one identifier per line
    File {
        path: PathBuf,
        /// Named batches to use; empty means every batch
        #[serde(default)]
        batches: Vec<String>,
    },
    /// Identifiers listed directly in configuration or on the command line
    Inline {
        identifiers: Vec<String>,
        #[serde(default)]
        label: Option<String>,
    },
    /// The built-in backup list
    Backup,
}

impl Default for SourceKind {
    fn default() -> Self {
        Self::File {
            path: default_batch_file(),
            batches: Vec::new(),
        }
    }
}

/// Identifier source plus the fallback list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceConfig {
    #[serde(default)]
    pub kind: SourceKind,
    /// Used when `kind` cannot be read
    #[serde(default = "default_backup_identifiers")]
    pub backup: Vec<String>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            kind: SourceKind::default(),
            backup: default_backup_identifiers(),
        }
    }
}
