//! Command dispatch logic for org-metrics

use super::{MetricsArgs, generate_metrics};
use crate::{Host, Result};
use clap::Parser;
use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "org-metrics", version, about, author, long_about = None)]
#[command(about = "Summarize pull request and issue activity across a GitHub organization")]
#[command(styles = CLAP_STYLES)]
struct Cli {
    #[command(flatten)]
    args: MetricsArgs,
}

/// Parse command-line arguments and generate the metrics summary
///
/// # Arguments
///
/// * `args` - An iterator of command-line arguments (typically from `std::env::args()`)
///
/// # Errors
///
/// Returns an error if any upstream call fails while generating the summary
pub async fn run<I, T, H>(host: &mut H, args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
    H: Host,
{
    let cli = Cli::parse_from(args);
    generate_metrics(host, &cli.args).await
}
