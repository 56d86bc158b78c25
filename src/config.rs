//! Application configuration loaded from TOML.
//!
//! [`AppConfig`] is the host-side source of truth for provider keys,
//! endpoints, the site exclusion list, proxies, and logging. It is turned
//! into an explicit [`SearchConfig`] value for the providers; nothing in
//! the search crate reads files or the environment.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use websift_search::config::{BingConfig, DuckDuckGoConfig, GoogleConfig, MetasoConfig};
use websift_search::{ProviderKind, ProxyConfig, SearchConfig};

use crate::error::{AppError, Result};

/// Environment variables that override API keys from the config file.
pub const METASO_KEY_ENV: &str = "WEBSIFT_METASO_API_KEY";
/// See [`METASO_KEY_ENV`].
pub const BING_KEY_ENV: &str = "WEBSIFT_BING_API_KEY";
/// See [`METASO_KEY_ENV`].
pub const GOOGLE_KEY_ENV: &str = "WEBSIFT_GOOGLE_API_KEY";

const REDACTED: &str = "<redacted>";

/// Where a loaded [`AppConfig`] came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Parsed from this file.
    File(PathBuf),
    /// No file at this path; built-in defaults were used.
    Defaults(PathBuf),
}

/// Top-level configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Provider selection and shared search settings.
    pub search: SearchSection,
    /// Metaso answer engine.
    pub metaso: MetasoConfig,
    /// Bing Web Search API.
    pub bing: BingConfig,
    /// Google Custom Search API.
    pub google: GoogleConfig,
    /// DuckDuckGo endpoints.
    pub duckduckgo: DuckDuckGoConfig,
    /// Outbound proxy settings.
    pub proxy: ProxyConfig,
    /// Log output settings.
    pub logging: LoggingConfig,
}

/// `[search]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSection {
    /// Provider used when none is given on the command line.
    pub provider: ProviderKind,
    /// URL substrings that are never returned as a first link.
    pub no_sites: Vec<String>,
    /// Request timeout in seconds for link-yielding providers.
    pub timeout_seconds: u64,
    /// Custom User-Agent for the scraping session.
    pub user_agent: Option<String>,
}

impl Default for SearchSection {
    fn default() -> Self {
        let defaults = SearchConfig::default();
        Self {
            provider: ProviderKind::default(),
            no_sites: Vec::new(),
            timeout_seconds: defaults.timeout_seconds,
            user_agent: None,
        }
    }
}

/// `[logging]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset.
    pub level: String,
    /// Also write a daily rolling log file under the logs directory.
    pub file: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "websift=info,websift_search=info".to_owned(),
            file: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file, falling back to defaults for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| AppError::Config(e.to_string()))
    }

    /// Load from `path`, or from [`default_config_path`](Self::default_config_path)
    /// if `path` is `None`. A missing default file yields the defaults; a
    /// missing explicit file is an error.
    ///
    /// Nothing is logged here because this runs before logging is set up;
    /// callers report the returned [`ConfigSource`] once it is.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> Result<(Self, ConfigSource)> {
        Self::load_or_default(path, Self::default_config_path())
    }

    fn load_or_default(
        path: Option<&Path>,
        default_path: PathBuf,
    ) -> Result<(Self, ConfigSource)> {
        match path {
            Some(path) => {
                let config = Self::from_file(path)?;
                Ok((config, ConfigSource::File(path.to_path_buf())))
            }
            None if default_path.exists() => {
                let config = Self::from_file(&default_path)?;
                Ok((config, ConfigSource::File(default_path)))
            }
            None => Ok((Self::default(), ConfigSource::Defaults(default_path))),
        }
    }

    /// Save configuration to a TOML file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or the config cannot be serialized.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| AppError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> PathBuf {
        crate::dirs::config_file()
    }

    /// Override API keys from the process environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    /// Override API keys from `lookup`; empty values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let fetch = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        if let Some(key) = fetch(METASO_KEY_ENV) {
            self.metaso.api_key = key;
        }
        if let Some(key) = fetch(BING_KEY_ENV) {
            self.bing.api_key = key;
        }
        if let Some(key) = fetch(GOOGLE_KEY_ENV) {
            self.google.api_key = key;
        }
    }

    /// Build the explicit provider configuration.
    pub fn to_search_config(&self) -> SearchConfig {
        SearchConfig {
            exclusions: self.search.no_sites.clone(),
            timeout_seconds: self.search.timeout_seconds,
            user_agent: self.search.user_agent.clone(),
            proxy: self.proxy.clone(),
            metaso: self.metaso.clone(),
            bing: self.bing.clone(),
            google: self.google.clone(),
            duckduckgo: self.duckduckgo.clone(),
        }
    }

    /// A copy safe to print: every non-empty API key is replaced.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        for key in [
            &mut copy.metaso.api_key,
            &mut copy.bing.api_key,
            &mut copy.google.api_key,
        ] {
            if !key.is_empty() {
                *key = REDACTED.to_owned();
            }
        }
        copy
    }
}
