//! TOML configuration.
//!
//! ```toml
//! [api]
//! base_url = "http://localhost:8080/api"
//! timeout_secs = 10
//! uploads_url = "http://localhost:8080/uploads"
//!
//! [search]
//! min_query_chars = 2
//! recent_limit = 5
//!
//! [logging]
//! level = "warn"
//! ```
//!
//! Every section is optional; missing keys fall back to the defaults shown.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use home_inventory_core::session::{DEFAULT_MIN_QUERY_CHARS, DEFAULT_RECENT_LIMIT};

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub uploads_url: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            uploads_url: None,
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8080/api".to_string()
}
fn default_timeout_secs() -> u64 {
    10
}

impl ApiConfig {
    /// Root URL for photo files. Derived from `base_url` when not set:
    /// `http://host:8080/api` becomes `http://host:8080/uploads`.
    pub fn uploads_root(&self) -> String {
        if let Some(ref url) = self.uploads_url {
            return url.trim_end_matches('/').to_string();
        }
        let base = self.base_url.trim_end_matches('/');
        let root = base.strip_suffix("/api").unwrap_or(base);
        format!("{}/uploads", root)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct SearchConfig {
    #[serde(default = "default_min_query_chars")]
    pub min_query_chars: usize,
    #[serde(default = "default_recent_limit")]
    pub recent_limit: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            min_query_chars: DEFAULT_MIN_QUERY_CHARS,
            recent_limit: DEFAULT_RECENT_LIMIT,
        }
    }
}

fn default_min_query_chars() -> usize {
    DEFAULT_MIN_QUERY_CHARS
}
fn default_recent_limit() -> usize {
    DEFAULT_RECENT_LIMIT
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

fn default_level() -> String {
    "warn".to_string()
}

impl Config {
    /// Built-in defaults, used when no config file exists.
    pub fn minimal() -> Self {
        Self::default()
    }

    /// Validate all sections. Called by [`load_config`] and again after
    /// command-line overrides are applied.
    pub fn validate(&self) -> Result<()> {
        let url = &self.api.base_url;
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            anyhow::bail!("api.base_url must start with http:// or https:// (got '{}')", url);
        }

        if self.api.timeout_secs == 0 {
            anyhow::bail!("api.timeout_secs must be > 0");
        }

        if self.search.min_query_chars == 0 {
            anyhow::bail!("search.min_query_chars must be >= 1");
        }

        if self.search.recent_limit == 0 {
            anyhow::bail!("search.recent_limit must be >= 1");
        }

        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            other => anyhow::bail!(
                "Unknown logging.level: '{}'. Must be trace, debug, info, warn, or error.",
                other
            ),
        }

        Ok(())
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;
    config.validate()?;

    Ok(config)
}

/// Load the config file if it exists, otherwise fall back to
/// [`Config::minimal`]. A file that exists but is invalid is an error.
pub fn load_or_default(path: &Path) -> Result<Config> {
    if path.exists() {
        load_config(path)
    } else {
        Ok(Config::minimal())
    }
}
