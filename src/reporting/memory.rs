use super::{ChunkProgress, ResultRecord, RunHeader, RunReporter};
use crate::core::RunSummary;
use crate::utils::error::Result;
use parking_lot::Mutex;

#[derive(Debug, Default)]
struct MemoryState {
    header: Option<RunHeader>,
    records: Vec<ResultRecord>,
    progress: Vec<ChunkProgress>,
    summary: Option<RunSummary>,
}

/// Keeps every reported item in memory
#[derive(Debug, Default)]
pub struct MemoryReporter {
    state: Mutex<MemoryState>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn header(&self) -> Option<RunHeader> {
        self.state.lock().header.clone()
    }

    /// Records in the order they were reported
    pub fn records(&self) -> Vec<ResultRecord> {
        self.state.lock().records.clone()
    }

    pub fn progress_updates(&self) -> Vec<ChunkProgress> {
        self.state.lock().progress.clone()
    }

    pub fn summary(&self) -> Option<RunSummary> {
        self.state.lock().summary.clone()
    }
}

impl RunReporter for MemoryReporter {
    fn begin(&self, header: &RunHeader) -> Result<()> {
        self.state.lock().header = Some(header.clone());
        Ok(())
    }

    fn record(&self, record: &ResultRecord) -> Result<()> {
        self.state.lock().records.push(record.clone());
        Ok(())
    }

    fn progress(&self, progress: &ChunkProgress) -> Result<()> {
        self.state.lock().progress.push(*progress);
        Ok(())
    }

    fn finish(&self, _header: &RunHeader, summary: &RunSummary) -> Result<()> {
        self.state.lock().summary = Some(summary.clone());
        Ok(())
    }
}
