//! DuckDuckGo provider: keyless search through the browser-facing flow.
//!
//! The flow has two requests sharing one cookie-carrying session:
//!
//! 1. POST the query to the landing page and pull the `vqd` token out of
//!    the returned HTML.
//! 2. GET the results script with that token, cut the JSON array out of
//!    the `DDG.pageLayout.load('d', ...)` call, and normalise each row.
//!
//! Redirects are never followed. A redirect, `202`, `403`, or `429` is how
//! the service signals throttling, so those statuses become
//! [`SearchError::RateLimited`]. A transport timeout becomes
//! [`SearchError::Timeout`] so callers can tell the retryable case apart.
//! A malformed result page is logged and yields an empty result set.
//!
//! Rows on the exclusion list are dropped while the result set is built,
//! so [`DuckDuckGoProvider::results`] only ever holds eligible rows.

pub mod parse;

use reqwest::StatusCode;

use crate::config::{DuckDuckGoConfig, SearchConfig};
use crate::error::SearchError;
use crate::http;
use crate::provider::SearchProvider;
use crate::site_filter::{first_eligible, is_excluded};
use crate::types::{ProviderKind, ScrapedResult, NOT_FOUND};

use parse::{collect_results, extract_payload, extract_vqd};

/// DuckDuckGo scraping provider.
///
/// Owns its session; the last search's normalised rows are the only state.
pub struct DuckDuckGoProvider {
    client: reqwest::Client,
    endpoints: DuckDuckGoConfig,
    exclusions: Vec<String>,
    query_result: Vec<ScrapedResult>,
}

impl DuckDuckGoProvider {
    /// Create a provider with its own browser-like session.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] if the configuration is invalid.
    pub fn new(config: &SearchConfig) -> Result<Self, SearchError> {
        config.validate_for(ProviderKind::DuckDuckGo)?;
        let client = http::build_scraping_client(config, &config.duckduckgo.referer)?;
        Ok(Self {
            client,
            endpoints: config.duckduckgo.clone(),
            exclusions: config.exclusions.clone(),
            query_result: Vec::new(),
        })
    }

    /// Normalised rows from the most recent search.
    pub fn results(&self) -> &[ScrapedResult] {
        &self.query_result
    }

    /// Run the two-step flow for an already-trimmed query.
    async fn duck(&self, query: &str) -> Result<Vec<ScrapedResult>, SearchError> {
        let landing = self
            .fetch(
                self.client
                    .post(&self.endpoints.landing_url)
                    .form(&[("q", query)]),
            )
            .await?;

        let vqd = landing
            .as_deref()
            .and_then(extract_vqd)
            .ok_or_else(|| SearchError::Parse("vqd token not found in landing page".into()))?;
        tracing::trace!(vqd = %vqd, "DuckDuckGo token acquired");

        let page = self
            .fetch(self.client.get(&self.endpoints.results_url).query(&[
                ("q", query),
                ("kl", self.endpoints.locale.as_str()),
                ("p", "1"),
                ("s", "0"),
                ("df", ""),
                ("vqd", vqd.as_str()),
                ("ex", ""),
            ]))
            .await?;

        let Some(page) = page else {
            tracing::debug!("DuckDuckGo result page returned no data");
            return Ok(Vec::new());
        };

        let rows = match extract_payload(&page) {
            Ok(rows) => rows,
            Err(err) => {
                tracing::warn!(error = %err, "DuckDuckGo result payload extraction failed");
                return Ok(Vec::new());
            }
        };

        let mut results = collect_results(&rows, query);
        results.retain(|r| !is_excluded(&r.href, &self.exclusions));
        tracing::debug!(rows = rows.len(), count = results.len(), "DuckDuckGo results parsed");
        Ok(results)
    }

    /// Send one request and classify the response.
    ///
    /// `200` with a body yields the body, throttling statuses are errors,
    /// and anything else (including an empty body) is "no data".
    async fn fetch(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<Option<Vec<u8>>, SearchError> {
        let response = request.send().await.map_err(classify_transport)?;
        let status = response.status();

        if status == StatusCode::OK {
            let body = response.bytes().await.map_err(classify_transport)?;
            tracing::trace!(bytes = body.len(), "DuckDuckGo response received");
            return Ok((!body.is_empty()).then(|| body.to_vec()));
        }
        if is_rate_limit_status(status) {
            return Err(SearchError::RateLimited(format!(
                "DuckDuckGo returned status {}",
                status.as_u16()
            )));
        }
        tracing::debug!(status = status.as_u16(), "DuckDuckGo returned no data");
        Ok(None)
    }
}

impl SearchProvider for DuckDuckGoProvider {
    type Output = Vec<ScrapedResult>;

    /// Search DuckDuckGo and remember the normalised rows.
    ///
    /// The previous result is cleared first, so a failed search leaves
    /// nothing for `get_first_link` to return.
    ///
    /// # Errors
    ///
    /// [`SearchError::Timeout`], [`SearchError::RateLimited`],
    /// [`SearchError::Transport`], or [`SearchError::Parse`] when no token
    /// could be obtained. A malformed result page is not an error.
    async fn search(&mut self, query: &str) -> Result<Vec<ScrapedResult>, SearchError> {
        let query = query.trim();
        tracing::trace!(query, "DuckDuckGo search");

        self.query_result.clear();
        let results = self.duck(query).await?;
        self.query_result = results.clone();
        Ok(results)
    }

    fn get_first_link(&self) -> Result<String, SearchError> {
        let hrefs = self.query_result.iter().map(|r| r.href.as_str());
        Ok(first_eligible(hrefs, &self.exclusions)
            .unwrap_or(NOT_FOUND)
            .to_owned())
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::DuckDuckGo
    }
}

/// Statuses the service uses for redirects, refusals, and throttling.
fn is_rate_limit_status(status: StatusCode) -> bool {
    status == StatusCode::ACCEPTED
        || status.is_redirection()
        || status == StatusCode::FORBIDDEN
        || status == StatusCode::TOO_MANY_REQUESTS
}

fn classify_transport(err: reqwest::Error) -> SearchError {
    if err.is_timeout() {
        SearchError::Timeout("DuckDuckGo request timed out".into())
    } else {
        SearchError::Transport(format!("DuckDuckGo request failed: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> DuckDuckGoProvider {
        DuckDuckGoProvider::new(&SearchConfig::default()).expect("default config is valid")
    }

    #[test]
    fn first_link_before_search_is_not_found() {
        assert_eq!(provider().get_first_link().expect("no error"), NOT_FOUND);
    }

    #[test]
    fn first_link_skips_excluded() {
        let mut ddg = provider();
        ddg.exclusions = vec!["youtube.com".into()];
        ddg.query_result = vec![
            ScrapedResult {
                title: "Video".into(),
                href: "https://www.youtube.com/watch?v=1".into(),
                body: "v".into(),
            },
            ScrapedResult {
                title: "Book".into(),
                href: "https://doc.rust-lang.org/book/".into(),
                body: "b".into(),
            },
        ];
        assert_eq!(
            ddg.get_first_link().expect("no error"),
            "https://doc.rust-lang.org/book/"
        );
    }

    #[test]
    fn first_link_not_found_when_all_excluded() {
        let mut ddg = provider();
        ddg.exclusions = vec!["https://".into()];
        ddg.query_result = vec![ScrapedResult {
            title: "A".into(),
            href: "https://a.com".into(),
            body: "a".into(),
        }];
        assert_eq!(ddg.get_first_link().expect("no error"), NOT_FOUND);
    }

    #[test]
    fn rate_limit_statuses() {
        for code in [202u16, 301, 302, 303, 307, 403, 429] {
            let status = StatusCode::from_u16(code).expect("valid status");
            assert!(is_rate_limit_status(status), "{code} should be rate limited");
        }
        for code in [200u16, 204, 400, 404, 500, 503] {
            let status = StatusCode::from_u16(code).expect("valid status");
            assert!(!is_rate_limit_status(status), "{code} should not be rate limited");
        }
    }

    #[test]
    fn kind_is_duckduckgo() {
        assert_eq!(provider().kind(), ProviderKind::DuckDuckGo);
    }

    #[test]
    fn is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DuckDuckGoProvider>();
    }

    #[tokio::test]
    #[ignore] // Live test — run with `cargo test -- --ignored`
    async fn live_duckduckgo_search() {
        let mut ddg = provider();
        let results = ddg.search("rust ownership").await.expect("live search should work");
        assert!(!results.is_empty());
        for r in &results {
            assert!(!r.href.is_empty());
            assert!(!r.body.trim().is_empty());
        }
        assert!(!ddg.get_first_link().expect("no error").is_empty());
    }
}
