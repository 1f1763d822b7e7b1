//! Command-line interface and orchestration for org-metrics
//!
//! The `run` function parses command-line arguments using clap and hands them to
//! [`generate_metrics`], which performs the whole run:
//!
//! 1. Check the credential and load configuration
//! 2. Collect work items from every repository of the organization
//! 3. Optionally scrape the adopters table
//! 4. Finalize the accumulated facts into a summary and print it
//! 5. Optionally write the summary to a local file and commit it back
//!
//! The `common` module provides logging setup shared by the command.

mod common;
mod generate;
mod host;
mod run;

pub use common::LogLevel;
pub use generate::{MetricsArgs, generate_metrics};
pub use host::Host;
pub use run::run;
