//! Human-readable run header and summary in the log

use super::RunHeader;
use crate::core::RunSummary;
use tracing::info;

pub fn log_header(header: &RunHeader) {
    info!("Identifier source: {}", header.source_description);
    info!("Run configuration:");
    info!("   Identifiers to process: {}", header.to_process);
    info!("   Workers: {}", header.workers);
    info!("   Chunks: {}", header.chunks);
    info!("   Max retries: {}", header.max_retries);
    info!("   Timeout: {}s", header.request_timeout.as_secs());
    info!("   Chunk pause: {}s", header.chunk_pause.as_secs());
}

pub fn log_summary(header: &RunHeader, summary: &RunSummary) {
    let elapsed = summary.elapsed.as_secs_f64();

    info!("===== FINAL PROCESSING SUMMARY =====");
    info!("Source: {}", header.source_description);
    info!(
        "Total processed: {}/{}",
        summary.processed, summary.planned
    );
    info!(
        "Successful: {} ({:.1}%)",
        summary.successful,
        summary.success_rate()
    );
    info!("Failed: {} ({:.1}%)", summary.failed, summary.failure_rate());
    info!(
        "Total execution time: {:.2} seconds ({:.2} minutes)",
        elapsed,
        elapsed / 60.0
    );
    info!(
        "Average throughput: {:.2} identifiers per second",
        summary.throughput
    );
    info!("Average time per identifier: {:.2} seconds", summary.latency.mean);
    if let Some(minutes) = summary.estimated_minutes_for(1000) {
        info!("Estimated time for 1000 identifiers: {:.2} minutes", minutes);
    }

    info!("Latency statistics (seconds):");
    info!("   Min: {:.2}", summary.latency.min);
    info!("   Max: {:.2}", summary.latency.max);
    info!("   Mean: {:.2}", summary.latency.mean);
    info!("   Median: {:.2}", summary.latency.median);
    info!("   Std dev: {:.2}", summary.latency.std_dev);

    info!("Retry statistics:");
    info!("   Total retries: {}", summary.retries.total);
    info!("   Average retries per identifier: {:.2}", summary.retries.mean);
    info!("   Max retries for one identifier: {}", summary.retries.max);
    for (retries, count) in summary.retries.histogram.iter().enumerate() {
        info!("   {} retries: {} identifiers", retries, count);
    }
}
