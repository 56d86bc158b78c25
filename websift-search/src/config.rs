//! Provider configuration with sensible defaults.
//!
//! [`SearchConfig`] is the explicit configuration value handed to every
//! provider constructor. Providers never read ambient global state; the
//! host application decides where these values come from.

use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

use crate::error::SearchError;
use crate::types::ProviderKind;

/// Configuration shared by all providers, plus one section per provider.
///
/// Use [`Default::default()`] for sensible defaults, or construct with
/// field overrides for custom behaviour.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Substrings marking URLs that must never be returned as a first link.
    pub exclusions: Vec<String>,
    /// HTTP request timeout in seconds for the link-yielding providers.
    pub timeout_seconds: u64,
    /// Custom User-Agent string. If `None`, rotates through a built-in list
    /// of realistic browser User-Agents.
    pub user_agent: Option<String>,
    /// Outbound proxy settings. The direct-answer provider ignores these.
    pub proxy: ProxyConfig,
    /// Metaso answer engine settings.
    pub metaso: MetasoConfig,
    /// Bing Web Search API settings.
    pub bing: BingConfig,
    /// Google Custom Search API settings.
    pub google: GoogleConfig,
    /// DuckDuckGo scraping endpoints.
    pub duckduckgo: DuckDuckGoConfig,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            exclusions: Vec::new(),
            timeout_seconds: 10,
            user_agent: None,
            proxy: ProxyConfig::default(),
            metaso: MetasoConfig::default(),
            bing: BingConfig::default(),
            google: GoogleConfig::default(),
            duckduckgo: DuckDuckGoConfig::default(),
        }
    }
}

/// Metaso answer engine configuration.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MetasoConfig {
    /// Bearer token for the answer API.
    pub api_key: String,
    /// Answer API endpoint.
    pub base_url: String,
    /// Model identifier sent with deferred search requests.
    pub model: String,
    /// Request timeout in seconds. Answers can take minutes.
    pub timeout_seconds: u64,
}

impl Default for MetasoConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: "https://metaso.cn/api/open/search/v2".to_owned(),
            model: "fast".to_owned(),
            timeout_seconds: 180,
        }
    }
}

impl fmt::Debug for MetasoConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MetasoConfig")
            .field("api_key", &redact(&self.api_key))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

/// Bing Web Search API configuration.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BingConfig {
    /// Subscription key sent as `Ocp-Apim-Subscription-Key`.
    pub api_key: String,
    /// Search endpoint.
    pub endpoint: String,
    /// Market code sent as `mkt`.
    pub market: String,
}

impl Default for BingConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            endpoint: "https://api.bing.microsoft.com/v7.0/search".to_owned(),
            market: "en-US".to_owned(),
        }
    }
}

impl fmt::Debug for BingConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BingConfig")
            .field("api_key", &redact(&self.api_key))
            .field("endpoint", &self.endpoint)
            .field("market", &self.market)
            .finish()
    }
}

/// Google Custom Search JSON API configuration.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GoogleConfig {
    /// API key sent as `key`.
    pub api_key: String,
    /// Programmable search engine ID sent as `cx`.
    pub engine_id: String,
    /// Search endpoint.
    pub endpoint: String,
}

impl Default for GoogleConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            engine_id: String::new(),
            endpoint: "https://www.googleapis.com/customsearch/v1".to_owned(),
        }
    }
}

impl fmt::Debug for GoogleConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GoogleConfig")
            .field("api_key", &redact(&self.api_key))
            .field("engine_id", &self.engine_id)
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

/// Stand-in printed for an API key; an unset key stays visibly empty.
fn redact(key: &str) -> &'static str {
    if key.is_empty() {
        ""
    } else {
        "<redacted>"
    }
}

/// DuckDuckGo scraping endpoints.
///
/// These are only configurable so tests can point the flow at a local
/// mock server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DuckDuckGoConfig {
    /// Landing page that hands out the `vqd` token.
    pub landing_url: String,
    /// Results endpoint returning the JavaScript payload.
    pub results_url: String,
    /// Fixed `Referer` header carried by the session.
    pub referer: String,
    /// Locale sent as `kl`.
    pub locale: String,
}

impl Default for DuckDuckGoConfig {
    fn default() -> Self {
        Self {
            landing_url: "https://duckduckgo.com/".to_owned(),
            results_url: "https://links.duckduckgo.com/d.js".to_owned(),
            referer: "https://duckduckgo.com/".to_owned(),
            locale: "en-us".to_owned(),
        }
    }
}

/// Outbound proxy settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxyConfig {
    /// Proxy for plain HTTP requests.
    pub http: Option<String>,
    /// Proxy for HTTPS requests.
    pub https: Option<String>,
    /// Comma-separated hosts that bypass the proxy.
    pub no_proxy: Option<String>,
}

impl ProxyConfig {
    /// Whether any proxy is configured.
    pub fn is_enabled(&self) -> bool {
        self.http.is_some() || self.https.is_some()
    }
}

impl SearchConfig {
    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `timeout_seconds` and `metaso.timeout_seconds` must be greater than 0
    /// - every endpoint must be an absolute URL
    /// - proxy URLs, when set, must be absolute URLs
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.timeout_seconds == 0 {
            return Err(SearchError::Config(
                "timeout_seconds must be greater than 0".into(),
            ));
        }
        if self.metaso.timeout_seconds == 0 {
            return Err(SearchError::Config(
                "metaso.timeout_seconds must be greater than 0".into(),
            ));
        }
        check_url("metaso.base_url", &self.metaso.base_url)?;
        check_url("bing.endpoint", &self.bing.endpoint)?;
        check_url("google.endpoint", &self.google.endpoint)?;
        check_url("duckduckgo.landing_url", &self.duckduckgo.landing_url)?;
        check_url("duckduckgo.results_url", &self.duckduckgo.results_url)?;
        if let Some(ref http) = self.proxy.http {
            check_url("proxy.http", http)?;
        }
        if let Some(ref https) = self.proxy.https {
            check_url("proxy.https", https)?;
        }
        Ok(())
    }

    /// Validates the configuration needed by one provider, including its key.
    pub fn validate_for(&self, kind: ProviderKind) -> Result<(), SearchError> {
        self.validate()?;
        let missing = match kind {
            ProviderKind::Metaso => self.metaso.api_key.is_empty().then_some("metaso.api_key"),
            ProviderKind::Bing => self.bing.api_key.is_empty().then_some("bing.api_key"),
            ProviderKind::Google => {
                if self.google.api_key.is_empty() {
                    Some("google.api_key")
                } else if self.google.engine_id.is_empty() {
                    Some("google.engine_id")
                } else {
                    None
                }
            }
            ProviderKind::DuckDuckGo => None,
        };
        match missing {
            Some(field) => Err(SearchError::Config(format!(
                "{field} is required for the {kind} provider"
            ))),
            None => Ok(()),
        }
    }
}

fn check_url(field: &str, value: &str) -> Result<(), SearchError> {
    Url::parse(value)
        .map(|_| ())
        .map_err(|e| SearchError::Config(format!("{field} is not a valid URL: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_sensible_values() {
        let config = SearchConfig::default();
        assert!(config.exclusions.is_empty());
        assert_eq!(config.timeout_seconds, 10);
        assert!(config.user_agent.is_none());
        assert!(!config.proxy.is_enabled());
        assert_eq!(config.metaso.model, "fast");
        assert_eq!(config.metaso.timeout_seconds, 180);
        assert_eq!(config.bing.market, "en-US");
        assert_eq!(config.duckduckgo.locale, "en-us");
    }

    #[test]
    fn valid_config_passes_validation() {
        assert!(SearchConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_timeout_rejected() {
        let config = SearchConfig {
            timeout_seconds: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("timeout_seconds"));
    }

    #[test]
    fn zero_metaso_timeout_rejected() {
        let mut config = SearchConfig::default();
        config.metaso.timeout_seconds = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("metaso.timeout_seconds"));
    }

    #[test]
    fn relative_endpoint_rejected() {
        let mut config = SearchConfig::default();
        config.bing.endpoint = "/v7.0/search".into();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("bing.endpoint"));
    }

    #[test]
    fn bad_proxy_rejected() {
        let mut config = SearchConfig::default();
        config.proxy.https = Some("not a url".into());
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("proxy.https"));
    }

    #[test]
    fn duckduckgo_needs_no_key() {
        let config = SearchConfig::default();
        assert!(config.validate_for(ProviderKind::DuckDuckGo).is_ok());
    }

    #[test]
    fn keyed_providers_need_keys() {
        let config = SearchConfig::default();
        let err = config.validate_for(ProviderKind::Bing).unwrap_err();
        assert!(err.to_string().contains("bing.api_key"));
        let err = config.validate_for(ProviderKind::Metaso).unwrap_err();
        assert!(err.to_string().contains("metaso.api_key"));
    }

    #[test]
    fn google_needs_engine_id() {
        let mut config = SearchConfig::default();
        config.google.api_key = "k".into();
        let err = config.validate_for(ProviderKind::Google).unwrap_err();
        assert!(err.to_string().contains("google.engine_id"));
        config.google.engine_id = "cx".into();
        assert!(config.validate_for(ProviderKind::Google).is_ok());
    }

    #[test]
    fn debug_redacts_every_key() {
        let mut config = SearchConfig::default();
        config.metaso.api_key = "secret-metaso".into();
        config.bing.api_key = "secret-bing".into();
        config.google.api_key = "secret-google".into();
        config.google.engine_id = "cx-visible".into();
        let debug = format!("{config:?}");
        assert!(!debug.contains("secret-"), "key leaked: {debug}");
        assert_eq!(debug.matches("<redacted>").count(), 3);
        assert!(debug.contains("cx-visible"));
    }

    #[test]
    fn debug_leaves_unset_key_empty() {
        let debug = format!("{:?}", BingConfig::default());
        assert!(debug.contains(r#"api_key: """#));
        assert!(!debug.contains("<redacted>"));
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config: SearchConfig =
            serde_json::from_str(r#"{"exclusions": ["pinterest."], "bing": {"api_key": "k"}}"#)
                .expect("deserialize");
        assert_eq!(config.exclusions, vec!["pinterest.".to_string()]);
        assert_eq!(config.bing.api_key, "k");
        assert_eq!(config.bing.market, "en-US");
        assert_eq!(config.timeout_seconds, 10);
    }
}
