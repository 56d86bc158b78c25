//! Provider selection and the search-then-first-link flow.
//!
//! The caller picks a [`ProviderKind`]; this module builds the matching
//! provider, runs `search`, and then either reads the first eligible link
//! or, for the answer engine, executes the deferred request.

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::provider::SearchProvider;
use crate::providers::{
    AnswerExecutor, BingProvider, DuckDuckGoProvider, GoogleProvider, MetasoProvider,
};
use crate::types::{Lookup, ProviderKind};

/// Run `query` through a link-yielding provider and return its first link.
///
/// # Errors
///
/// Whatever the provider's `search` reports. Once `search` succeeds the
/// link step cannot fail for link-yielding providers.
pub async fn first_link<P: SearchProvider>(
    provider: &mut P,
    query: &str,
) -> Result<String, SearchError> {
    provider.search(query).await?;
    provider.get_first_link()
}

/// Build the provider for `kind` and resolve `query` to a link or answer.
///
/// # Errors
///
/// [`SearchError::Config`] if the provider cannot be built, otherwise the
/// provider's own search errors.
pub async fn lookup(
    kind: ProviderKind,
    query: &str,
    config: &SearchConfig,
) -> Result<Lookup, SearchError> {
    tracing::debug!(provider = %kind, "lookup");
    match kind {
        ProviderKind::Metaso => {
            let mut provider = MetasoProvider::new(config)?;
            let request = provider.search(query).await?;
            let answer = AnswerExecutor::new(config)?.execute(&request).await?;
            Ok(Lookup::Answer(answer))
        }
        ProviderKind::Bing => {
            let mut provider = BingProvider::new(config)?;
            first_link(&mut provider, query).await.map(Lookup::Link)
        }
        ProviderKind::Google => {
            let mut provider = GoogleProvider::new(config)?;
            first_link(&mut provider, query).await.map(Lookup::Link)
        }
        ProviderKind::DuckDuckGo => {
            let mut provider = DuckDuckGoProvider::new(config)?;
            first_link(&mut provider, query).await.map(Lookup::Link)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn lookup_fails_fast_without_key() {
        let err = lookup(ProviderKind::Bing, "rust", &SearchConfig::default())
            .await
            .unwrap_err();
        assert!(matches!(err, SearchError::Config(_)));
    }

    #[tokio::test]
    async fn lookup_google_returns_link() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [{"link": "https://www.rust-lang.org/"}]
            })))
            .mount(&server)
            .await;

        let mut config = SearchConfig::default();
        config.google.api_key = "k".into();
        config.google.engine_id = "cx".into();
        config.google.endpoint = server.uri();

        let outcome = lookup(ProviderKind::Google, "rust", &config)
            .await
            .expect("should succeed");
        assert_eq!(outcome, Lookup::Link("https://www.rust-lang.org/".into()));
    }

    #[tokio::test]
    async fn lookup_metaso_returns_answer() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"answer": "42"})))
            .mount(&server)
            .await;

        let mut config = SearchConfig::default();
        config.metaso.api_key = "k".into();
        config.metaso.base_url = server.uri();

        let outcome = lookup(ProviderKind::Metaso, "meaning of life", &config)
            .await
            .expect("should succeed");
        assert_eq!(outcome, Lookup::Answer("42".into()));
    }
}
