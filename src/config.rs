// src/config.rs
use crate::api::ClientSettings;
use crate::constants::*;
use crate::error::AppError;
use crate::harvest::{HarvestPlan, PausePolicy};
use crate::output::TablePolicy;
use crate::types::{PageSize, PublicationId, TableName, ValidatedUrl};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;

/// Where harvested records go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Csv,
    Sqlite,
}

impl OutputFormat {
    fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Sqlite => "db",
        }
    }
}

/// Parsed and validated command-line input.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineInput {
    /// Publication ID, or a portal/API URL containing it
    pub publication: String,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Sqlite)]
    pub format: OutputFormat,

    /// Output file (defaults to feedback_<id>.csv or feedback_<id>.db)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Table name for SQLite output
    #[arg(long, default_value = DEFAULT_TABLE_NAME)]
    pub table: String,

    /// Insert into the table if it already exists (SQLite)
    #[arg(long, default_value_t = false, conflicts_with = "replace")]
    pub append: bool,

    /// Drop and recreate the table if it already exists (SQLite)
    #[arg(long, default_value_t = false)]
    pub replace: bool,

    /// Records per page, constant for the whole run
    #[arg(short = 's', long, default_value_t = DEFAULT_PAGE_SIZE)]
    pub page_size: u32,

    /// File collecting the indices of pages that could not be fetched
    #[arg(long, default_value = DEFAULT_SKIP_LOG)]
    pub skip_log: String,

    /// Request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS)]
    pub timeout: u64,

    /// User-Agent header sent with every request
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Pause after every N harvested records
    #[arg(long, default_value_t = DEFAULT_PAUSE_BATCH)]
    pub batch_size: u32,

    /// Shortest pause in milliseconds
    #[arg(long, default_value_t = DEFAULT_PAUSE_MIN_MS)]
    pub pause_min_ms: u64,

    /// Longest pause in milliseconds
    #[arg(long, default_value_t = DEFAULT_PAUSE_MAX_MS)]
    pub pause_max_ms: u64,

    /// Enable verbose logging (debug level)
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

/// Resolved harvest configuration, validated and ready to drive a run.
#[derive(Debug, Clone)]
pub struct HarvestConfig {
    pub publication: PublicationId,
    pub format: OutputFormat,
    pub output: PathBuf,
    pub table: TableName,
    pub table_policy: TablePolicy,
    pub page_size: PageSize,
    pub skip_log: PathBuf,
    pub api_url: ValidatedUrl,
    pub download_base: ValidatedUrl,
    pub user_agent: String,
    pub timeout: Duration,
    pub pause: PausePolicy,
}

impl HarvestConfig {
    /// Resolves a complete configuration from CLI input and environment.
    pub fn resolve(cli: CommandLineInput) -> Result<Self, AppError> {
        let api_url = url_from_env(ENV_API_URL, FEEDBACK_API_URL)?;
        let download_base = url_from_env(ENV_DOWNLOAD_BASE, ATTACHMENT_DOWNLOAD_BASE)?;
        Self::resolve_with(cli, api_url, download_base)
    }

    /// Resolves against explicit endpoint URLs.
    pub fn resolve_with(
        cli: CommandLineInput,
        api_url: ValidatedUrl,
        download_base: ValidatedUrl,
    ) -> Result<Self, AppError> {
        let publication = PublicationId::parse(&cli.publication)?;

        if cli.timeout == 0 {
            return Err(AppError::MissingConfiguration(
                "--timeout must be at least one second".to_string(),
            ));
        }

        let output = cli.output.map(PathBuf::from).unwrap_or_else(|| {
            PathBuf::from(format!(
                "feedback_{}.{}",
                publication,
                cli.format.extension()
            ))
        });

        let table_policy = match (cli.append, cli.replace) {
            (true, _) => TablePolicy::Append,
            (_, true) => TablePolicy::Replace,
            _ => TablePolicy::Fresh,
        };

        if cli.format == OutputFormat::Csv && table_policy != TablePolicy::Fresh {
            log::warn!("--append/--replace only apply to SQLite output; ignoring");
        }

        Ok(HarvestConfig {
            publication,
            format: cli.format,
            output,
            table: TableName::new(cli.table)?,
            table_policy,
            page_size: PageSize::new(cli.page_size)?,
            skip_log: PathBuf::from(cli.skip_log),
            api_url,
            download_base,
            user_agent: cli.user_agent,
            timeout: Duration::from_secs(cli.timeout),
            pause: PausePolicy::new(cli.batch_size, cli.pause_min_ms, cli.pause_max_ms)?,
        })
    }

    /// Settings for the HTTP client.
    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            endpoint: self.api_url.clone(),
            user_agent: self.user_agent.clone(),
            timeout: self.timeout,
        }
    }

    /// Settings for the harvest loop.
    pub fn harvest_plan(&self) -> HarvestPlan {
        HarvestPlan {
            publication: self.publication,
            page_size: self.page_size,
            download_base: self.download_base.as_str().to_string(),
            pause: self.pause,
        }
    }
}

/// Reads a URL override from the environment, falling back to `default`.
fn url_from_env(var: &str, default: &str) -> Result<ValidatedUrl, AppError> {
    match std::env::var(var) {
        Ok(value) if !value.trim().is_empty() => {
            log::debug!("Using {} from environment: {}", var, value);
            Ok(ValidatedUrl::parse(value.trim())?)
        }
        _ => Ok(ValidatedUrl::parse(default)?),
    }
}
