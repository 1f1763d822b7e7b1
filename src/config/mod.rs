//! Run configuration for org-metrics
//!
//! Configuration is read from a TOML file (`metrics.toml` by default). Any value missing
//! from the file falls back to the embedded `default_config.toml`.

#[expect(clippy::module_inception, reason = "mirrors the type it exports")]
mod config;

pub use config::{Committer, Config, DEFAULT_CONFIG_TOML};
