//! Process bootstrap: directories, proxy reporting, provider config.
//!
//! Runs once before any provider is constructed and produces the explicit
//! [`SearchConfig`] that every provider receives.

use std::path::Path;

use websift_search::{ProviderKind, SearchConfig};

use crate::config::AppConfig;
use crate::error::Result;

/// Prepare the process and validate configuration for `provider`.
///
/// Creates the data and logs directories, logs which proxies are in use,
/// and returns the provider configuration.
///
/// # Errors
///
/// Returns an error if a directory cannot be created or the configuration
/// is invalid for `provider`.
pub fn initialize(config: &AppConfig, provider: ProviderKind) -> Result<SearchConfig> {
    initialize_in(
        config,
        provider,
        &crate::dirs::data_dir(),
        &crate::dirs::logs_dir(),
    )
}

/// [`initialize`] with explicit directories.
///
/// # Errors
///
/// Same as [`initialize`].
pub fn initialize_in(
    config: &AppConfig,
    provider: ProviderKind,
    data_dir: &Path,
    logs_dir: &Path,
) -> Result<SearchConfig> {
    tracing::info!(%provider, "websift starting");

    for dir in [data_dir, logs_dir] {
        std::fs::create_dir_all(dir)?;
    }

    let proxy = &config.proxy;
    if let Some(ref http) = proxy.http {
        tracing::info!(http_proxy = %http, "using http proxy");
    }
    if let Some(ref https) = proxy.https {
        tracing::info!(https_proxy = %https, "using https proxy");
    }
    if let Some(ref no_proxy) = proxy.no_proxy {
        tracing::info!(no_proxy = %no_proxy, "proxy bypass list");
    }
    if proxy.is_enabled() && provider == ProviderKind::Metaso {
        tracing::debug!("Metaso requests bypass the proxy");
    }

    let search = config.to_search_config();
    search.validate_for(provider)?;
    Ok(search)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use websift_search::SearchError;

    #[test]
    fn creates_directories() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let data = tmp.path().join("data");
        let logs = data.join("logs");

        let search = initialize_in(&AppConfig::default(), ProviderKind::DuckDuckGo, &data, &logs)
            .expect("defaults are valid for DuckDuckGo");
        assert!(data.is_dir());
        assert!(logs.is_dir());
        assert!(search.exclusions.is_empty());
    }

    #[test]
    fn missing_key_is_reported() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let err = initialize_in(
            &AppConfig::default(),
            ProviderKind::Bing,
            tmp.path(),
            tmp.path(),
        )
        .unwrap_err();
        assert!(matches!(err, AppError::Search(SearchError::Config(_))));
    }

    #[test]
    fn exclusions_come_from_no_sites() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let mut config = AppConfig::default();
        config.search.no_sites = vec!["youtube.com".into()];
        let search = initialize_in(&config, ProviderKind::DuckDuckGo, tmp.path(), tmp.path())
            .expect("valid");
        assert_eq!(search.exclusions, vec!["youtube.com"]);
    }
}
