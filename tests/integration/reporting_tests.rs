//! CSV results file layout tests

#[cfg(test)]
mod tests {
    use gtin_loader::core::{LatencyStats, RetryStats};
    use gtin_loader::reporting::{CSV_COLUMNS, CsvReporter, ResultRecord, RunHeader, RunReporter};
    use gtin_loader::RunSummary;
    use std::time::Duration;
    use tempfile::TempDir;

    fn header() -> RunHeader {
        RunHeader {
            source_description: "Selected batches: batch_1(2), batch_2(1)".to_string(),
            available: 3,
            to_process: 3,
            workers: 4,
            chunks: 3,
            max_retries: 4,
            request_timeout: Duration::from_secs(600),
            chunk_pause: Duration::from_secs(5),
        }
    }

    fn record(identifier: &str, success: bool, processed: usize, successful: usize) -> ResultRecord {
        ResultRecord {
            identifier: identifier.to_string(),
            success,
            status_code: if success { Some(200) } else { None },
            latency: Duration::from_millis(1234),
            retries_used: if success { 0 } else { 3 },
            elapsed: Duration::from_millis(5678),
            processed_total: processed,
            successful_total: successful,
            chunk_index: 2,
        }
    }

    fn summary() -> RunSummary {
        RunSummary {
            planned: 3,
            processed: 3,
            successful: 2,
            failed: 1,
            latency: LatencyStats::from_samples(&[Duration::from_secs(1), Duration::from_secs(3)]),
            retries: RetryStats::from_samples(&[0, 0, 3]),
            elapsed: Duration::from_secs(60),
            throughput: 0.05,
        }
    }

    fn write_run() -> (TempDir, Vec<String>) {
        let dir = TempDir::new().unwrap();
        let reporter = CsvReporter::in_dir(dir.path().join("results"), "20250101_120000").unwrap();

        reporter.begin(&header()).unwrap();
        reporter.record(&record("07502209290686", true, 1, 1)).unwrap();
        reporter.record(&record("07501943474307", false, 2, 1)).unwrap();
        reporter.finish(&header(), &summary()).unwrap();

        let text = std::fs::read_to_string(reporter.path()).unwrap();
        let lines = text.lines().map(str::to_string).collect();
        (dir, lines)
    }

    #[test]
    fn test_file_name_uses_timestamp() {
        let dir = TempDir::new().unwrap();
        let reporter = CsvReporter::in_dir(dir.path(), "20250101_120000").unwrap();
        assert!(reporter.path().ends_with("batch_processing_20250101_120000.csv"));
    }

    #[test]
    fn test_column_header_is_first_row() {
        let (_dir, lines) = write_run();
        assert_eq!(lines[0], CSV_COLUMNS.join(","));
        assert_eq!(
            lines[0],
            "GTIN,Success,Status Code,Latency (s),Retries,Cumulative Elapsed (s),Processed,Successful,Chunk"
        );
        assert_eq!(lines[1], "");
    }

    #[test]
    fn test_configuration_block_follows_header() {
        let (_dir, lines) = write_run();
        // The description contains a comma and is quoted
        assert_eq!(
            lines[2],
            "\"Identifier source: Selected batches: batch_1(2), batch_2(1)\""
        );
        assert_eq!(lines[3], "Identifiers available: 3");
        assert_eq!(lines[5], "Workers: 4");
        assert_eq!(lines[8], "Timeout: 600s");
        assert_eq!(lines[9], "Chunk pause: 5s");
        assert_eq!(lines[10], "");
    }

    #[test]
    fn test_result_rows() {
        let (_dir, lines) = write_run();
        assert_eq!(lines[11], "07502209290686,Yes,200,1.23,0,5.68,1,1,Chunk 2");
        assert_eq!(lines[12], "07501943474307,No,,1.23,3,5.68,2,1,Chunk 2");
    }

    #[test]
    fn test_summary_block() {
        let (_dir, lines) = write_run();
        assert_eq!(lines[13], "");
        assert_eq!(lines[14], "===== FINAL PROCESSING SUMMARY =====");
        assert!(lines.contains(&"Total processed,3/3".to_string()));
        assert!(lines.contains(&"Successful,2 (66.7%)".to_string()));
        assert!(lines.contains(&"Failed,1 (33.3%)".to_string()));
        assert!(lines.contains(&"Total execution time,60.00 seconds (1.00 minutes)".to_string()));
        assert!(lines.contains(&"Estimated time for 1000 identifiers,333.33 minutes".to_string()));
        assert!(lines.contains(&"Max retries,3".to_string()));
    }
}
