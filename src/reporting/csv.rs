use super::{ResultRecord, RunHeader, RunReporter};
use crate::core::RunSummary;
use crate::utils::error::Result;
use parking_lot::Mutex;
use std::borrow::Cow;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Column order of the results table; downstream tooling depends on it
pub const CSV_COLUMNS: [&str; 9] = [
    "GTIN",
    "Success",
    "Status Code",
    "Latency (s)",
    "Retries",
    "Cumulative Elapsed (s)",
    "Processed",
    "Successful",
    "Chunk",
];

/// Append-only CSV results file, flushed after every row
pub struct CsvReporter {
    path: PathBuf,
    writer: Mutex<BufWriter<File>>,
}

impl CsvReporter {
    /// Create (or truncate) the results file at `path`
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let file = File::create(&path)?;
        debug!("Writing results to {:?}", path);

        Ok(Self {
            path,
            writer: Mutex::new(BufWriter::new(file)),
        })
    }

    /// Create `batch_processing_<timestamp>.csv` inside `dir`
    pub fn in_dir<P: AsRef<Path>>(dir: P, timestamp: &str) -> Result<Self> {
        Self::create(
            dir.as_ref()
                .join(format!("batch_processing_{}.csv", timestamp)),
        )
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_rows<I, R>(&self, rows: I) -> Result<()>
    where
        I: IntoIterator<Item = R>,
        R: AsRef<[String]>,
    {
        let mut writer = self.writer.lock();
        for row in rows {
            let line: Vec<Cow<'_, str>> = row.as_ref().iter().map(|f| escape_field(f)).collect();
            writeln!(writer, "{}", line.join(","))?;
        }
        writer.flush()?;
        Ok(())
    }
}

impl RunReporter for CsvReporter {
    fn begin(&self, header: &RunHeader) -> Result<()> {
        let columns: Vec<String> = CSV_COLUMNS.iter().map(|c| c.to_string()).collect();
        self.write_rows([
            columns,
            Vec::new(),
            vec![format!("Identifier source: {}", header.source_description)],
            vec![format!("Identifiers available: {}", header.available)],
            vec![format!("Identifiers to process: {}", header.to_process)],
            vec![format!("Workers: {}", header.workers)],
            vec![format!("Chunks: {}", header.chunks)],
            vec![format!("Max retries: {}", header.max_retries)],
            vec![format!("Timeout: {}s", header.request_timeout.as_secs())],
            vec![format!("Chunk pause: {}s", header.chunk_pause.as_secs())],
            Vec::new(),
        ])
    }

    fn record(&self, record: &ResultRecord) -> Result<()> {
        self.write_rows([vec![
            record.identifier.clone(),
            if record.success { "Yes" } else { "No" }.to_string(),
            record
                .status_code
                .map(|s| s.to_string())
                .unwrap_or_default(),
            format!("{:.2}", record.latency.as_secs_f64()),
            record.retries_used.to_string(),
            format!("{:.2}", record.elapsed.as_secs_f64()),
            record.processed_total.to_string(),
            record.successful_total.to_string(),
            format!("Chunk {}", record.chunk_index),
        ]])
    }

    fn finish(&self, header: &RunHeader, summary: &RunSummary) -> Result<()> {
        let elapsed = summary.elapsed.as_secs_f64();
        let pair = |label: &str, value: String| vec![label.to_string(), value];

        let mut rows = vec![
            Vec::new(),
            vec!["===== FINAL PROCESSING SUMMARY =====".to_string()],
            pair("Source", header.source_description.clone()),
            pair(
                "Total processed",
                format!("{}/{}", summary.processed, summary.planned),
            ),
            pair(
                "Successful",
                format!("{} ({:.1}%)", summary.successful, summary.success_rate()),
            ),
            pair(
                "Failed",
                format!("{} ({:.1}%)", summary.failed, summary.failure_rate()),
            ),
            pair(
                "Total execution time",
                format!("{:.2} seconds ({:.2} minutes)", elapsed, elapsed / 60.0),
            ),
            pair(
                "Average throughput",
                format!("{:.2} identifiers per second", summary.throughput),
            ),
            pair(
                "Average time per identifier",
                format!("{:.2} seconds", summary.latency.mean),
            ),
        ];
        if let Some(minutes) = summary.estimated_minutes_for(1000) {
            rows.push(pair(
                "Estimated time for 1000 identifiers",
                format!("{:.2} minutes", minutes),
            ));
        }
        rows.extend([
            pair("Latency min (s)", format!("{:.2}", summary.latency.min)),
            pair("Latency max (s)", format!("{:.2}", summary.latency.max)),
            pair("Latency median (s)", format!("{:.2}", summary.latency.median)),
            pair("Latency std dev (s)", format!("{:.2}", summary.latency.std_dev)),
            pair("Total retries", summary.retries.total.to_string()),
            pair("Average retries", format!("{:.2}", summary.retries.mean)),
            pair("Max retries", summary.retries.max.to_string()),
        ]);

        self.write_rows(rows)
    }
}

/// Quote a field when it contains a delimiter, quote or line break
fn escape_field(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}
