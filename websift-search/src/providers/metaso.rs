//! Metaso answer-engine provider.
//!
//! Unlike the other providers, Metaso answers the question itself instead
//! of returning a ranked link list. Its `search` therefore does no I/O: it
//! returns an [`AnswerRequest`] describing the POST to make, and an
//! [`AnswerExecutor`] runs one or many of those descriptors. Callers that
//! want a link must use another provider; `get_first_link` is unsupported.
//!
//! Requests to the answer API never go through a configured proxy.

use reqwest::header::{self, HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::time::Duration;

use crate::config::{MetasoConfig, SearchConfig};
use crate::error::SearchError;
use crate::http;
use crate::provider::SearchProvider;
use crate::types::ProviderKind;

/// JSON body of an answer request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerBody {
    /// The stripped question.
    pub q: String,
    /// Model identifier.
    pub model: String,
    /// Output format flag.
    pub format: String,
    /// Ask for short snippets alongside the answer.
    pub concise_snippet: bool,
}

/// A not-yet-executed answer request.
///
/// Holds everything needed to make the call (endpoint, bearer key, body,
/// timeout) so several can be collected and dispatched together.
#[derive(Clone)]
pub struct AnswerRequest {
    endpoint: String,
    api_key: String,
    body: AnswerBody,
    timeout: Duration,
}

impl AnswerRequest {
    fn new(config: &MetasoConfig, model: &str, question: &str) -> Self {
        Self {
            endpoint: config.base_url.clone(),
            api_key: config.api_key.clone(),
            body: AnswerBody {
                q: question.trim().to_owned(),
                model: model.to_owned(),
                format: "simple".to_owned(),
                concise_snippet: true,
            },
            timeout: Duration::from_secs(config.timeout_seconds),
        }
    }

    /// Endpoint the request will be POSTed to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// JSON body of the request.
    pub fn body(&self) -> &AnswerBody {
        &self.body
    }

    /// Per-request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Headers sent with the request, including the bearer token.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] if the key cannot be a header value.
    pub fn headers(&self) -> Result<HeaderMap, SearchError> {
        let mut headers = HeaderMap::new();
        let bearer = HeaderValue::from_str(&format!("Bearer {}", self.api_key))
            .map_err(|_| SearchError::Config("metaso.api_key is not a valid header value".into()))?;
        headers.insert(header::AUTHORIZATION, bearer);
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        Ok(headers)
    }
}

impl fmt::Debug for AnswerRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnswerRequest")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"<redacted>")
            .field("body", &self.body)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Metaso provider: turns queries into deferred [`AnswerRequest`]s.
pub struct MetasoProvider {
    config: MetasoConfig,
}

impl MetasoProvider {
    /// Create a provider from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] if the key is missing or the
    /// configuration is otherwise invalid.
    pub fn new(config: &SearchConfig) -> Result<Self, SearchError> {
        config.validate_for(ProviderKind::Metaso)?;
        Ok(Self {
            config: config.metaso.clone(),
        })
    }

    /// Describe the answer request for `query` without sending it.
    pub fn request(&self, query: &str) -> AnswerRequest {
        AnswerRequest::new(&self.config, &self.config.model, query)
    }
}

impl SearchProvider for MetasoProvider {
    type Output = AnswerRequest;

    /// Returns the deferred request; nothing is sent.
    async fn search(&mut self, query: &str) -> Result<AnswerRequest, SearchError> {
        tracing::trace!(query = query.trim(), "Metaso request prepared");
        Ok(self.request(query))
    }

    fn get_first_link(&self) -> Result<String, SearchError> {
        Err(SearchError::Unsupported(
            "Metaso does not support get_first_link; use inference instead".into(),
        ))
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::Metaso
    }
}

/// Runs [`AnswerRequest`]s, singly or as a concurrent batch.
pub struct AnswerExecutor {
    client: reqwest::Client,
    config: MetasoConfig,
}

impl AnswerExecutor {
    /// Create an executor. Its client never uses a proxy.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] if the configuration is invalid.
    pub fn new(config: &SearchConfig) -> Result<Self, SearchError> {
        config.validate()?;
        Ok(Self {
            client: http::build_api_client(config, config.metaso.timeout_seconds, false)?,
            config: config.metaso.clone(),
        })
    }

    /// Send one request and extract its answer.
    ///
    /// On success returns the trimmed `answer` field (empty if absent). A
    /// non-success status is not an error: it yields
    /// `"Error: <status> - <body>"` as the answer text.
    ///
    /// # Errors
    ///
    /// [`SearchError::Transport`] if the request fails, or
    /// [`SearchError::Parse`] if a success body is not JSON.
    pub async fn execute(&self, request: &AnswerRequest) -> Result<String, SearchError> {
        let response = self
            .client
            .post(request.endpoint())
            .headers(request.headers()?)
            .timeout(request.timeout())
            .json(request.body())
            .send()
            .await
            .map_err(|e| SearchError::Transport(format!("Metaso request failed: {e}")))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| SearchError::Transport(format!("Metaso response read failed: {e}")))?;

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "Metaso returned non-success status");
            return Ok(format!("Error: {} - {}", status.as_u16(), text));
        }

        let parsed: Value = serde_json::from_str(&text)
            .map_err(|e| SearchError::Parse(format!("Metaso response is not JSON: {e}")))?;
        Ok(parsed
            .get("answer")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .trim()
            .to_owned())
    }

    /// Send every request concurrently. Results keep the input order.
    pub async fn execute_all(&self, requests: &[AnswerRequest]) -> Vec<Result<String, SearchError>> {
        futures::future::join_all(requests.iter().map(|r| self.execute(r))).await
    }

    /// Ask `prompt` with an explicit model and wait for the answer.
    ///
    /// # Errors
    ///
    /// Same as [`execute`](Self::execute).
    pub async fn inference(&self, model_id: &str, prompt: &str) -> Result<String, SearchError> {
        let request = AnswerRequest::new(&self.config, model_id, prompt);
        self.execute(&request).await
    }
}
