//! A tool to summarize pull request and issue activity across a GitHub organization.
//!
//! # Overview
//!
//! `org-metrics` walks every repository of an organization, collects closed pull requests
//! and closed issues, and produces a small JSON document describing how quickly work gets
//! closed, who contributes, and how many people are contributing for the first time. The
//! document can optionally be committed back to a repository so that a website can render it.
//!
//! # Quick Start
//!
//! ```bash
//! export GITHUB_TOKEN=$GITHUB_PAT
//! org-metrics --with-metrics --with-adopter-list
//! ```
//!
//! Without `--commit-changes` the tool runs in dry-run mode: the summary is printed to
//! standard output and nothing is written back.
//!
//! # Flags
//!
//! - `--with-metrics`: fetch pull requests and issues. Without it only the adopter list is produced.
//! - `--with-adopter-list`: scrape the adopters table from the configured markdown document.
//! - `--commit-changes`: commit the summary to the configured repository.
//! - `--recent-only`: stop paginating at the first item older than the trailing window.
//! - `--output <PATH>`: also write the summary to a local file.
//! - `--config <PATH>`: read configuration from the given TOML file instead of `metrics.toml`.
//!
//! # Configuration
//!
//! ```toml
//! organization = "backstage"
//! repository = "tempo"
//! metrics_path = "metrics.json"
//! window_days = 30
//! bot_accounts = ["snyk-bot"]
//! ```
//!
//! # Output
//!
//! ```json
//! {
//!   "namesOfAdopters": ["Acme Corp"],
//!   "namesOfContributors": ["octocat"],
//!   "namesOfContributorsNew": ["hubot"],
//!   "numberOfPullRequestNew": 1,
//!   "p50NumberOfNewPullsPerWeek": 1,
//!   "p50NumberOfNewContributorsPerWeek": 1,
//!   "p50SecondsToClosePulls": 3600,
//!   "p50SecondsToCloseIssues": null,
//!   "meanNumberOfNewPullsPerWeek": 1.0,
//!   "meanNumberOfNewContributorsPerWeek": 1.0,
//!   "meanSecondsToClosePulls": 3600.0,
//!   "meanSecondsToCloseIssues": null
//! }
//! ```
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use org_metrics::{Host, run};
use std::io::Write;
use std::io::{stderr, stdout};

/// Default host that talks to the real process.
#[derive(Debug, Clone, Default)]
pub struct RealHost;

#[cfg_attr(coverage_nightly, coverage(off))]
impl Host for RealHost {
    fn output(&mut self) -> impl Write {
        stdout()
    }

    fn error(&mut self) -> impl Write {
        stderr()
    }

    fn exit(&mut self, code: i32) {
        std::process::exit(code);
    }
}

#[tokio::main]
#[cfg_attr(coverage_nightly, coverage(off))]
async fn main() -> Result<(), ohno::AppError> {
    run(&mut RealHost, std::env::args()).await
}
