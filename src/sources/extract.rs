//! Batch file extraction from spreadsheet and CSV exports

use super::file::{BatchFile, NamedBatch};
use super::validation::is_valid_identifier;
use crate::utils::error::{DispatchError, Result};
use calamine::{Data, Reader, open_workbook_auto};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Extensions read as workbooks; everything else is read as delimited text
const WORKBOOK_EXTENSIONS: [&str; 5] = ["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// Figures reported after an extraction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionStats {
    pub total: usize,
    pub total_batches: usize,
    pub batch_size: usize,
    pub last_batch_size: usize,
    /// Identifier length -> count
    pub length_distribution: BTreeMap<usize, usize>,
}

/// Reads identifiers from the first column of a workbook or CSV export and
/// splits them into fixed-size named batches.
#[derive(Debug, Clone)]
pub struct BatchExtractor {
    batch_size: usize,
}

impl Default for BatchExtractor {
    fn default() -> Self {
        Self::new(Self::DEFAULT_BATCH_SIZE)
    }
}

impl BatchExtractor {
    pub const DEFAULT_BATCH_SIZE: usize = 1000;

    pub fn new(batch_size: usize) -> Self {
        Self {
            batch_size: batch_size.max(1),
        }
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// First-column values of delimited text that are valid identifiers, in
    /// order.
    ///
    /// The delimiter (`,` `;` or tab) is picked from the first line and
    /// quoted fields are honored. An invalid first row is taken as a header
    /// and skipped quietly.
    pub fn read_identifiers(&self, text: &str) -> Vec<String> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .delimiter(detect_delimiter(text))
            .from_reader(text.as_bytes());

        let mut values = Vec::new();
        for record in reader.records() {
            match record {
                Ok(record) => values.push(record.get(0).unwrap_or_default().to_string()),
                Err(e) => warn!("Skipping unreadable row: {}", e),
            }
        }

        self.collect(values)
    }

    /// First-column values of the first worksheet that are valid identifiers.
    ///
    /// Text cells are taken as-is so leading zeros survive; whole-number
    /// numeric cells are written without a fractional part.
    pub fn read_workbook<P: AsRef<Path>>(&self, path: P) -> Result<Vec<String>> {
        let path = path.as_ref();
        let mut workbook = open_workbook_auto(path)?;
        let range = workbook.worksheet_range_at(0).ok_or_else(|| {
            DispatchError::validation(format!("{} has no worksheets", path.display()))
        })??;

        let values = range
            .rows()
            .map(|row| row.first().map(cell_text).unwrap_or_default())
            .collect::<Vec<_>>();

        Ok(self.collect(values))
    }

    /// Read a workbook or delimited text file, chosen by extension
    pub async fn read_file<P: AsRef<Path>>(&self, path: P) -> Result<Vec<String>> {
        let path = path.as_ref();
        info!("Reading {}", path.display());

        if is_workbook(path) {
            let extractor = self.clone();
            let path: PathBuf = path.to_path_buf();
            return tokio::task::spawn_blocking(move || extractor.read_workbook(path))
                .await
                .map_err(|e| DispatchError::internal(format!("Workbook reader failed: {}", e)))?;
        }

        let text = tokio::fs::read_to_string(path).await?;
        Ok(self.read_identifiers(&text))
    }

    fn collect(&self, values: Vec<String>) -> Vec<String> {
        let mut identifiers = Vec::new();

        for (row, value) in values.iter().enumerate() {
            let value = value.trim().trim_matches('"').trim();
            if value.is_empty() {
                continue;
            }
            if is_valid_identifier(value) {
                identifiers.push(value.to_string());
            } else if row == 0 {
                debug!("Skipping header '{}'", value);
            } else {
                warn!("Ignoring invalid identifier '{}' on row {}", value, row + 1);
            }
        }

        info!("Extracted {} identifiers", identifiers.len());
        identifiers
    }

    /// Split into `batch_1`, `batch_2`, ... and keep the full list as `all`
    pub fn build(&self, identifiers: &[String]) -> BatchFile {
        let total_batches = identifiers.len().div_ceil(self.batch_size);
        let batches = identifiers
            .chunks(self.batch_size)
            .enumerate()
            .map(|(i, chunk)| {
                info!("Batch {}/{}: {} identifiers", i + 1, total_batches, chunk.len());
                NamedBatch {
                    name: format!("batch_{}", i + 1),
                    identifiers: chunk.to_vec(),
                }
            })
            .collect();

        BatchFile {
            batches,
            all: Some(identifiers.to_vec()),
        }
    }

    pub fn stats(&self, identifiers: &[String]) -> ExtractionStats {
        let total = identifiers.len();
        let last_batch_size = match total % self.batch_size {
            0 if total > 0 => self.batch_size,
            rest => rest,
        };

        let mut length_distribution = BTreeMap::new();
        for identifier in identifiers {
            *length_distribution.entry(identifier.len()).or_insert(0) += 1;
        }

        ExtractionStats {
            total,
            total_batches: total.div_ceil(self.batch_size),
            batch_size: self.batch_size,
            last_batch_size,
            length_distribution,
        }
    }

    /// Write `file` as YAML, creating parent directories
    pub async fn write<P: AsRef<Path>>(&self, file: &BatchFile, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(path, file.to_yaml()?).await?;
        info!("Batch file written to {}", path.display());
        Ok(())
    }
}

fn is_workbook(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            WORKBOOK_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

fn detect_delimiter(text: &str) -> u8 {
    let first_line = text.lines().next().unwrap_or_default();
    [b',', b';', b'\t']
        .into_iter()
        .max_by_key(|d| first_line.bytes().filter(|b| b == d).count())
        .filter(|d| first_line.as_bytes().contains(d))
        .unwrap_or(b',')
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::String(text) => text.clone(),
        Data::Int(value) => value.to_string(),
        Data::Float(value) if value.fract() == 0.0 && value.abs() < 1e15 => {
            format!("{}", *value as i64)
        }
        Data::Float(value) => value.to_string(),
        _ => String::new(),
    }
}
