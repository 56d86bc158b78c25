//! Shared HTTP client construction for search providers.
//!
//! Two flavours of [`reqwest::Client`] are built here:
//!
//! - a browser-like scraping session (rotating User-Agent, cookies, fixed
//!   referer, **no** redirect following) for the token-gated scraping flow
//! - a plain API client for the keyed REST and answer-engine providers
//!
//! Configured proxies are applied to both, unless the caller opts out.

use crate::config::{ProxyConfig, SearchConfig};
use crate::error::SearchError;
use rand::seq::SliceRandom;
use reqwest::header::{self, HeaderMap, HeaderValue};
use std::time::Duration;

/// Realistic browser User-Agent strings, one picked per session.
const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
];

/// Build the persistent session used by the scraping provider.
///
/// The client has:
/// - Cookie store enabled
/// - Timeout from config
/// - Chrome User-Agent from the rotation list (or custom if configured)
/// - Browser-style `Accept`/`Accept-Language` headers and a fixed `Referer`
/// - Redirects disabled, so a redirect surfaces as a rate-limit signal
///
/// # Errors
///
/// Returns [`SearchError::Config`] for an invalid referer or proxy, and
/// [`SearchError::Transport`] if the client cannot be constructed.
pub fn build_scraping_client(
    config: &SearchConfig,
    referer: &str,
) -> Result<reqwest::Client, SearchError> {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::REFERER,
        HeaderValue::from_str(referer)
            .map_err(|e| SearchError::Config(format!("invalid referer header: {e}")))?,
    );
    headers.insert(
        header::ACCEPT,
        HeaderValue::from_static("text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"),
    );
    headers.insert(
        header::ACCEPT_LANGUAGE,
        HeaderValue::from_static("en-US,en;q=0.9"),
    );

    let builder = reqwest::Client::builder()
        .cookie_store(true)
        .timeout(Duration::from_secs(config.timeout_seconds))
        .user_agent(user_agent(config))
        .default_headers(headers)
        .redirect(reqwest::redirect::Policy::none());

    apply_proxy(builder, &config.proxy)?
        .build()
        .map_err(|e| SearchError::Transport(format!("failed to build HTTP client: {e}")))
}

/// Build a plain client for JSON APIs.
///
/// When `use_proxy` is false the client bypasses both configured and
/// environment proxies.
///
/// # Errors
///
/// Returns [`SearchError::Config`] for an invalid proxy, and
/// [`SearchError::Transport`] if the client cannot be constructed.
pub fn build_api_client(
    config: &SearchConfig,
    timeout_seconds: u64,
    use_proxy: bool,
) -> Result<reqwest::Client, SearchError> {
    let builder = reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_seconds))
        .user_agent(concat!("websift/", env!("CARGO_PKG_VERSION")));

    let builder = if use_proxy {
        apply_proxy(builder, &config.proxy)?
    } else {
        builder.no_proxy()
    };

    builder
        .build()
        .map_err(|e| SearchError::Transport(format!("failed to build HTTP client: {e}")))
}

fn apply_proxy(
    mut builder: reqwest::ClientBuilder,
    proxy: &ProxyConfig,
) -> Result<reqwest::ClientBuilder, SearchError> {
    let no_proxy = || {
        proxy
            .no_proxy
            .as_deref()
            .and_then(reqwest::NoProxy::from_string)
    };

    if let Some(ref http) = proxy.http {
        let p = reqwest::Proxy::http(http)
            .map_err(|e| SearchError::Config(format!("invalid http proxy: {e}")))?
            .no_proxy(no_proxy());
        builder = builder.proxy(p);
    }
    if let Some(ref https) = proxy.https {
        let p = reqwest::Proxy::https(https)
            .map_err(|e| SearchError::Config(format!("invalid https proxy: {e}")))?
            .no_proxy(no_proxy());
        builder = builder.proxy(p);
    }
    Ok(builder)
}

fn user_agent(config: &SearchConfig) -> String {
    match config.user_agent {
        Some(ref custom) => custom.clone(),
        None => random_user_agent().to_owned(),
    }
}

/// Select a random User-Agent string from the rotation list.
pub fn random_user_agent() -> &'static str {
    let mut rng = rand::thread_rng();
    USER_AGENTS
        .choose(&mut rng)
        .copied()
        // SAFETY: USER_AGENTS is a non-empty const array, choose only returns None on empty slices
        .unwrap_or(USER_AGENTS[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_user_agent_is_chrome() {
        let ua = random_user_agent();
        assert!(USER_AGENTS.contains(&ua));
        assert!(ua.contains("Chrome/"));
    }

    #[test]
    fn scraping_client_with_default_config() {
        let config = SearchConfig::default();
        assert!(build_scraping_client(&config, "https://duckduckgo.com/").is_ok());
    }

    #[test]
    fn scraping_client_rejects_bad_referer() {
        let config = SearchConfig::default();
        let err = build_scraping_client(&config, "bad\nreferer").unwrap_err();
        assert!(matches!(err, SearchError::Config(_)));
    }

    #[test]
    fn api_client_with_and_without_proxy() {
        let mut config = SearchConfig::default();
        config.proxy.https = Some("http://127.0.0.1:3128".into());
        config.proxy.no_proxy = Some("localhost,127.0.0.1".into());
        assert!(build_api_client(&config, 5, true).is_ok());
        assert!(build_api_client(&config, 5, false).is_ok());
    }

    #[test]
    fn custom_user_agent_wins() {
        let config = SearchConfig {
            user_agent: Some("CustomBot/1.0".into()),
            ..Default::default()
        };
        assert_eq!(user_agent(&config), "CustomBot/1.0");
    }
}
