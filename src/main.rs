// src/main.rs

use anyhow::Context;
use brp_feedback::{
    CommandLineInput, CsvSink, FeedbackHttpClient, HarvestConfig, HarvestReport, Harvester,
    OutputFormat, PageDiscovery, RecordSink, SkipLog, SqliteSink,
};
use clap::Parser;
use log::LevelFilter;
use log4rs::{
    append::console::ConsoleAppender,
    append::file::FileAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Config,
};
use std::fs;

/// Sets up logging configuration.
fn setup_logging(verbose: bool) -> anyhow::Result<()> {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let log_file_path = std::env::temp_dir().join("brp_feedback.log");
    if let Some(parent) = log_file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let pattern = if verbose {
        "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}"
    } else {
        "{m}{n}"
    };

    let stdout_appender = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}",
        )))
        .build(&log_file_path)?;

    let config = Config::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout_appender)))
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(LevelFilter::Debug)))
                .build("file", Box::new(file_appender)),
        )
        .build(
            Root::builder()
                .appender("stdout")
                .appender("file")
                .build(log_level),
        )?;

    log4rs::init_config(config)?;
    log::debug!("Logging initialized. Log file: {}", log_file_path.display());
    Ok(())
}

/// Builds the sink selected on the command line.
fn open_sink(config: &HarvestConfig) -> anyhow::Result<Box<dyn RecordSink>> {
    Ok(match config.format {
        OutputFormat::Csv => Box::new(CsvSink::new(&config.output)),
        OutputFormat::Sqlite => Box::new(
            SqliteSink::open(&config.output, config.table.clone(), config.table_policy)
                .with_context(|| format!("opening database {}", config.output.display()))?,
        ),
    })
}

/// Discovers, fetches and persists every page of the publication.
async fn execute_harvest(config: &HarvestConfig) -> anyhow::Result<HarvestReport> {
    let client = FeedbackHttpClient::new(&config.client_settings())?;
    let plan = config.harvest_plan();
    let mut sink = open_sink(config)?;
    let mut skip_log = SkipLog::new(&config.skip_log);

    let report = Harvester::new(&client, &plan)
        .run(sink.as_mut(), &mut skip_log)
        .await
        .with_context(|| format!("harvesting publication {}", config.publication))?;

    Ok(report)
}

/// Reports completion to the user with stats.
fn report_completion(config: &HarvestConfig, report: &HarvestReport) {
    if let PageDiscovery::Unavailable { status } = report.discovery {
        eprintln!(
            "⚠️  The feedback API answered HTTP {} to the page count request; nothing was fetched.",
            status
        );
    }

    if !report.skipped_pages.is_empty() {
        eprintln!(
            "⚠️  {} page(s) could not be fetched: {:?} (recorded in {})",
            report.skipped_pages.len(),
            report.skipped_pages,
            config.skip_log.display()
        );
    }

    println!(
        "📄 Harvested {} feedbacks from {}/{} pages in {}s.",
        report.records_harvested,
        report.pages_fetched,
        report.pages_requested,
        report.elapsed().num_seconds()
    );
    println!(
        "✓ {} records saved to {}",
        report.sink.records_written,
        report.sink.destination.display()
    );
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = CommandLineInput::parse();

    setup_logging(cli.verbose)?;

    let config = HarvestConfig::resolve(cli)?;

    let report = execute_harvest(&config).await?;
    report_completion(&config, &report);

    Ok(())
}
