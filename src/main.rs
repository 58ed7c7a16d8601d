//! gtin-loader - bulk GTIN submission with retries and run statistics

use anyhow::{Context, bail};
use clap::Parser;
use gtin_loader::cli::{Cli, Command, ExtractArgs};
use gtin_loader::reporting::CsvReporter;
use gtin_loader::sources::{BatchExtractor, source_from_config};
use gtin_loader::utils::logging::{LoggingOptions, init_logging, log_file_path, run_timestamp};
use gtin_loader::{Config, Dispatcher, auth::authenticator_from_config};
use std::process::ExitCode;
use tracing::info;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match execute(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn execute(cli: Cli) -> anyhow::Result<()> {
    let mut config = cli.load_config().await?;

    match &cli.command {
        Command::Run(args) => {
            args.apply(&mut config);
            config.validate()?;
            run(config, cli.json_logs).await
        }
        Command::Extract(args) => extract(args, cli.json_logs).await,
        Command::ShowConfig => {
            config.validate()?;
            print!("{}", config.to_yaml()?);
            Ok(())
        }
    }
}

async fn run(config: Config, json_logs: bool) -> anyhow::Result<()> {
    let timestamp = run_timestamp();
    let results_dir = config.output.results_dir.clone();

    init_logging(&LoggingOptions {
        json: json_logs || config.output.json_logs,
        log_file: config
            .output
            .write_log_file
            .then(|| log_file_path(&results_dir, &timestamp)),
        ..LoggingOptions::default()
    })?;

    info!("Starting gtin-loader {}", gtin_loader::VERSION);

    let authenticator = authenticator_from_config(&config.auth)?;
    let source = source_from_config(&config.source);
    let reporter = CsvReporter::in_dir(&results_dir, &timestamp)
        .with_context(|| format!("cannot create results file in {}", results_dir.display()))?;

    let dispatcher = Dispatcher::new(config);
    dispatcher
        .run(authenticator.as_ref(), source.as_ref(), &reporter)
        .await?;

    info!("Results written to {}", reporter.path().display());
    Ok(())
}

async fn extract(args: &ExtractArgs, json_logs: bool) -> anyhow::Result<()> {
    init_logging(&LoggingOptions {
        json: json_logs,
        ..LoggingOptions::default()
    })?;

    let extractor = BatchExtractor::new(args.batch_size);
    let identifiers = extractor
        .read_file(&args.input)
        .await
        .with_context(|| format!("cannot read {}", args.input.display()))?;
    if identifiers.is_empty() {
        bail!("no valid identifiers found in {}", args.input.display());
    }

    let file = extractor.build(&identifiers);
    extractor.write(&file, &args.output).await?;

    let stats = extractor.stats(&identifiers);
    info!("Extraction statistics:");
    info!("   Total identifiers: {}", stats.total);
    info!("   Batches: {}", stats.total_batches);
    info!("   Batch size: {}", stats.batch_size);
    info!("   Last batch size: {}", stats.last_batch_size);
    for (length, count) in &stats.length_distribution {
        info!("   Length {}: {} identifiers", length, count);
    }
    Ok(())
}
