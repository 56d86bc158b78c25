//! Bing Web Search API provider.
//!
//! Keyed REST backend: the subscription key travels in the
//! `Ocp-Apim-Subscription-Key` header and results live under
//! `webPages.value[].url`.

use serde_json::Value;

use crate::config::{BingConfig, SearchConfig};
use crate::error::SearchError;
use crate::http;
use crate::provider::SearchProvider;
use crate::types::ProviderKind;

use super::rest::{self, ResultList};

const RESULTS: ResultList = ResultList {
    pointer: "/webPages/value",
    url_field: "url",
};

/// Bing Web Search provider.
pub struct BingProvider {
    client: reqwest::Client,
    config: BingConfig,
    exclusions: Vec<String>,
    query_result: Option<Value>,
}

impl BingProvider {
    /// Create a provider from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] if the key is missing or the
    /// configuration is otherwise invalid.
    pub fn new(config: &SearchConfig) -> Result<Self, SearchError> {
        config.validate_for(ProviderKind::Bing)?;
        Ok(Self {
            client: http::build_api_client(config, config.timeout_seconds, true)?,
            config: config.bing.clone(),
            exclusions: config.exclusions.clone(),
            query_result: None,
        })
    }
}

impl SearchProvider for BingProvider {
    type Output = Value;

    /// Query the API and remember the parsed document.
    ///
    /// # Errors
    ///
    /// The failure is handed back as a value for the caller to inspect:
    /// [`SearchError::Transport`], [`SearchError::HttpStatus`] for a
    /// non-success status, or [`SearchError::Parse`] for a non-JSON body.
    async fn search(&mut self, query: &str) -> Result<Value, SearchError> {
        let query = query.trim();
        tracing::trace!(query, "Bing search");
        self.query_result = None;

        let response = self
            .client
            .get(&self.config.endpoint)
            .header("Ocp-Apim-Subscription-Key", &self.config.api_key)
            .query(&[("q", query), ("mkt", self.config.market.as_str())])
            .send()
            .await
            .map_err(|e| rest::transport_error(ProviderKind::Bing, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SearchError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        let document = rest::read_json(ProviderKind::Bing, response).await?;
        self.query_result = Some(document.clone());
        Ok(document)
    }

    fn get_first_link(&self) -> Result<String, SearchError> {
        Ok(rest::first_link(
            ProviderKind::Bing,
            self.query_result.as_ref(),
            RESULTS,
            &self.exclusions,
        ))
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::Bing
    }
}
