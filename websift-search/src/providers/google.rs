//! Google Custom Search JSON API provider.
//!
//! Keyed REST backend: key, engine ID, and query travel as `key`, `cx`,
//! and `q` parameters; results live under `items[].link`.

use serde_json::Value;

use crate::config::{GoogleConfig, SearchConfig};
use crate::error::SearchError;
use crate::http;
use crate::provider::SearchProvider;
use crate::types::ProviderKind;

use super::rest::{self, ResultList};

const RESULTS: ResultList = ResultList {
    pointer: "/items",
    url_field: "link",
};

/// Google Custom Search provider.
pub struct GoogleProvider {
    client: reqwest::Client,
    config: GoogleConfig,
    exclusions: Vec<String>,
    query_result: Option<Value>,
}

impl GoogleProvider {
    /// Create a provider from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] if the key or engine ID is missing
    /// or the configuration is otherwise invalid.
    pub fn new(config: &SearchConfig) -> Result<Self, SearchError> {
        config.validate_for(ProviderKind::Google)?;
        Ok(Self {
            client: http::build_api_client(config, config.timeout_seconds, true)?,
            config: config.google.clone(),
            exclusions: config.exclusions.clone(),
            query_result: None,
        })
    }
}

impl SearchProvider for GoogleProvider {
    type Output = Value;

    /// Query the API and remember the parsed document.
    ///
    /// The status code is not checked: Google error bodies are JSON too,
    /// and simply lack `items`.
    ///
    /// # Errors
    ///
    /// The failure is handed back as a value for the caller to inspect:
    /// [`SearchError::Transport`] or [`SearchError::Parse`] for a
    /// non-JSON body.
    async fn search(&mut self, query: &str) -> Result<Value, SearchError> {
        let query = query.trim();
        tracing::trace!(query, "Google search");
        self.query_result = None;

        let response = self
            .client
            .get(&self.config.endpoint)
            .query(&[
                ("key", self.config.api_key.as_str()),
                ("cx", self.config.engine_id.as_str()),
                ("q", query),
            ])
            .send()
            .await
            .map_err(|e| rest::transport_error(ProviderKind::Google, e))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "Google returned non-success status");
        }

        let document = rest::read_json(ProviderKind::Google, response).await?;
        self.query_result = Some(document.clone());
        Ok(document)
    }

    fn get_first_link(&self) -> Result<String, SearchError> {
        Ok(rest::first_link(
            ProviderKind::Google,
            self.query_result.as_ref(),
            RESULTS,
            &self.exclusions,
        ))
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::Google
    }
}
