use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::classify::rules::Rules;

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

/// Runtime settings: optional `scraper.toml`, overridden by `SZ_*` env vars.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Pause between consecutive rent listing pages.
    #[serde(default = "default_page_delay_ms")]
    pub page_delay_ms: u64,
    /// JSON rules file for the classifier; built-in tables when unset.
    #[serde(default)]
    pub rules: Option<PathBuf>,
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_timeout_secs() -> u64 {
    20
}

fn default_page_delay_ms() -> u64 {
    1000
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
            page_delay_ms: default_page_delay_ms(),
            rules: None,
        }
    }
}

impl Settings {
    pub fn load() -> Result<Self> {
        config::Config::builder()
            .add_source(config::File::with_name("scraper").required(false))
            .add_source(config::Environment::with_prefix("SZ"))
            .build()
            .context("Failed to read settings")?
            .try_deserialize()
            .context("Invalid settings")
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn page_delay(&self) -> Duration {
        Duration::from_millis(self.page_delay_ms)
    }

    /// A CLI path takes precedence over the configured one.
    pub fn load_rules(&self, cli_path: Option<&PathBuf>) -> Result<Rules> {
        match cli_path.or(self.rules.as_ref()) {
            Some(path) => Rules::from_json_file(path)
                .with_context(|| format!("Failed to load rules from {}", path.display())),
            None => Ok(Rules::default()),
        }
    }
}
