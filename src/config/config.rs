use crate::Result;
use camino::{Utf8Path, Utf8PathBuf};
use ohno::{EnrichableExt, IntoAppError, app_err};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;

/// The default configuration TOML content, embedded from `default_config.toml`
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../../default_config.toml");

/// Name of the configuration file looked up in the working directory
const CONFIG_FILE_NAME: &str = "metrics.toml";

/// Identity recorded as the committer of the metrics file
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Committer {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Organization whose repositories are scanned
    #[serde(default = "default_organization")]
    pub organization: String,

    /// Repository that receives the committed metrics file
    #[serde(default = "default_repository")]
    pub repository: String,

    /// Path of the metrics file inside the target repository
    #[serde(default = "default_metrics_path")]
    pub metrics_path: String,

    /// URL of the markdown document holding the adopters table
    #[serde(default = "default_adopters_url")]
    pub adopters_url: String,

    /// Length of the trailing window in days
    #[serde(default = "default_window_days")]
    pub window_days: u32,

    /// Commit message used for the write-back
    #[serde(default = "default_commit_message")]
    pub commit_message: String,

    /// Accounts excluded from contributor statistics
    #[serde(default = "default_bot_accounts")]
    pub bot_accounts: Vec<String>,

    #[serde(default = "default_committer")]
    pub committer: Committer,
}

fn default_organization() -> String {
    "backstage".into()
}

fn default_repository() -> String {
    "tempo".into()
}

fn default_metrics_path() -> String {
    "metrics.json".into()
}

fn default_adopters_url() -> String {
    "https://raw.githubusercontent.com/backstage/backstage/master/ADOPTERS.md".into()
}

const fn default_window_days() -> u32 {
    30
}

fn default_commit_message() -> String {
    "Updated metrics".into()
}

fn default_bot_accounts() -> Vec<String> {
    vec!["snyk-bot".into()]
}

fn default_committer() -> Committer {
    Committer {
        name: "Backstage Bot".into(),
        email: "bot@backstage.io".into(),
    }
}

impl Config {
    /// Load configuration from a file or use defaults
    ///
    /// When `config_path` is `None`, `metrics.toml` is looked up in `base_dir` and the
    /// defaults are used if it does not exist.
    pub fn load(base_dir: &Utf8Path, config_path: Option<&Utf8PathBuf>) -> Result<Self> {
        let (final_path, text) = if let Some(path) = config_path {
            let text = fs::read_to_string(path).into_app_err_with(|| format!("reading configuration file '{path}'"))?;
            (path.clone(), text)
        } else {
            let path = base_dir.join(CONFIG_FILE_NAME);
            match fs::read_to_string(&path) {
                Ok(text) => (path, text),
                Err(e) if e.kind() == io::ErrorKind::NotFound => return Self::parse(DEFAULT_CONFIG_TOML),
                Err(e) => return Err(e).into_app_err_with(|| format!("reading configuration file '{path}'")),
            }
        };

        Self::parse(&text).map_err(|e| e.enrich_with(|| format!("parsing configuration file '{final_path}'")))
    }

    /// Parse and validate configuration text
    pub fn parse(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply command-line overrides on top of the loaded values
    pub fn apply_overrides(&mut self, window_days: Option<u32>, adopters_url: Option<&str>) -> Result<()> {
        if let Some(days) = window_days {
            self.window_days = days;
        }

        if let Some(url) = adopters_url {
            self.adopters_url = url.to_string();
        }

        self.validate()
    }

    fn validate(&self) -> Result<()> {
        if self.window_days == 0 {
            return Err(app_err!("window_days must be greater than zero"));
        }

        for (name, value) in [
            ("organization", &self.organization),
            ("repository", &self.repository),
            ("metrics_path", &self.metrics_path),
        ] {
            if value.trim().is_empty() {
                return Err(app_err!("{name} must not be empty"));
            }
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG_TOML).expect("default_config.toml should be valid TOML that deserializes to Config")
    }
}
