use super::LogLevel;
use super::common::init_logging;
use crate::config::Config;
use crate::facts::adopters::fetch_adopters;
use crate::facts::hosting::Client;
use crate::facts::{Collector, PaginationPolicy};
use crate::metrics::{BotFilter, MetricsAccumulator};
use crate::publish::publish_summary;
use crate::{Host, Result};
use camino::{Utf8Path, Utf8PathBuf};
use chrono::Utc;
use clap::Args;
use ohno::IntoAppError;
use std::fs;
use std::io::Write;

const LOG_TARGET: &str = "  generate";

/// Arguments controlling a metrics run
#[derive(Args, Debug, Default)]
pub struct MetricsArgs {
    /// GitHub personal access token
    #[arg(long, value_name = "TOKEN", env = "GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    /// Commit the summary to the configured repository (otherwise this is a dry run)
    #[arg(long, alias = "commitChanges")]
    pub commit_changes: bool,

    /// Collect pull request and issue metrics
    #[arg(long, alias = "withMetrics")]
    pub with_metrics: bool,

    /// Scrape the adopters table
    #[arg(long, alias = "withAdopterList")]
    pub with_adopter_list: bool,

    /// Stop paginating at the first item older than the trailing window
    #[arg(long)]
    pub recent_only: bool,

    /// Also write the summary to this file
    #[arg(long, value_name = "PATH")]
    pub output: Option<Utf8PathBuf>,

    /// Path to configuration file (default is `metrics.toml` in the current directory)
    #[arg(long, value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,

    /// Length of the trailing window in days
    #[arg(long, value_name = "DAYS")]
    pub window_days: Option<u32>,

    /// URL of the markdown document holding the adopters table
    #[arg(long, value_name = "URL")]
    pub adopters_url: Option<String>,

    /// Base URL of the GitHub API
    #[arg(long, value_name = "URL", default_value = "https://api.github.com", hide = true)]
    pub api_url: String,

    /// Log level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "info")]
    pub log_level: LogLevel,
}

/// Perform a complete metrics run
///
/// A missing token is reported on the host's error stream followed by `host.exit(1)`, before any
/// network traffic. Every other failure is returned as an error.
pub async fn generate_metrics<H: Host>(host: &mut H, args: &MetricsArgs) -> Result<()> {
    init_logging(args.log_level);

    let Some(token) = args.github_token.as_deref().filter(|t| !t.is_empty()) else {
        let _ = writeln!(host.error(), "GITHUB_TOKEN is not set. Please provide a GitHub token");
        host.exit(1);
        return Ok(());
    };

    let mut config = Config::load(Utf8Path::new("."), args.config.as_ref())?;
    config.apply_overrides(args.window_days, args.adopters_url.as_deref())?;

    if !args.commit_changes {
        log::warn!(target: LOG_TARGET, "Running in dry-run mode, pass --commit-changes to commit the metrics");
    }

    let client = Client::new(token, &args.api_url)?;
    let mut accumulator = MetricsAccumulator::new(Utc::now(), config.window_days, BotFilter::new(config.bot_accounts.iter().cloned()));

    if args.with_metrics {
        let policy = if args.recent_only {
            PaginationPolicy::RecentOnly
        } else {
            PaginationPolicy::Full
        };

        Collector::new(&client, &config.organization, policy)
            .collect(&mut accumulator)
            .await?;
    }

    let adopters = if args.with_adopter_list {
        fetch_adopters(&client, &config.adopters_url).await?
    } else {
        Vec::new()
    };

    let json = accumulator.finalize(adopters).to_json()?;
    writeln!(host.output(), "{json}").into_app_err("writing metrics summary")?;

    if let Some(path) = &args.output {
        fs::write(path, format!("{json}\n")).into_app_err_with(|| format!("writing metrics summary to '{path}'"))?;
        log::info!(target: LOG_TARGET, "Wrote metrics summary to '{path}'");
    }

    if args.commit_changes {
        publish_summary(&client, &config, &json).await?;
    }

    Ok(())
}
