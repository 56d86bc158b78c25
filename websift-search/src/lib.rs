//! # websift-search
//!
//! One query, several interchangeable web search backends.
//!
//! Every backend implements [`SearchProvider`]: `search` runs the query and
//! remembers the result, `get_first_link` returns the first result URL that
//! is not on the caller's exclusion list (or the empty string).
//!
//! ## Providers
//!
//! - [`providers::MetasoProvider`]: answer engine. `search` returns a
//!   deferred [`providers::AnswerRequest`] that an
//!   [`providers::AnswerExecutor`] runs, alone or batched.
//! - [`providers::BingProvider`], [`providers::GoogleProvider`]: keyed REST
//!   APIs. Failures come back as `Err` values from `search`; reading a link
//!   never fails.
//! - [`providers::DuckDuckGoProvider`]: keyless, scrapes the token-gated
//!   browser flow. Timeouts and throttling are errors; a malformed result
//!   page is logged and yields no results.
//!
//! ## Security
//!
//! - API keys are never logged and are redacted from `Debug` output
//! - Search queries are logged only at trace level
//! - No network listeners — this is a library, not a server

pub mod config;
pub mod dispatch;
pub mod error;
pub mod http;
pub mod provider;
pub mod providers;
pub mod site_filter;
pub mod types;

pub use config::{ProxyConfig, SearchConfig};
pub use error::{Result, SearchError};
pub use provider::SearchProvider;
pub use site_filter::is_excluded;
pub use types::{Lookup, ProviderKind, ScrapedResult, NOT_FOUND};

/// Resolve `query` with the chosen provider.
///
/// Link-yielding providers return [`Lookup::Link`] (empty when nothing is
/// eligible); the answer engine returns [`Lookup::Answer`].
///
/// # Errors
///
/// Returns [`SearchError::Config`] for invalid configuration, otherwise the
/// provider's search error.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> websift_search::Result<()> {
/// let config = websift_search::SearchConfig::default();
/// let outcome =
///     websift_search::lookup(websift_search::ProviderKind::DuckDuckGo, "rust ownership", &config)
///         .await?;
/// println!("{}", outcome.as_str());
/// # Ok(())
/// # }
/// ```
pub async fn lookup(kind: ProviderKind, query: &str, config: &SearchConfig) -> Result<Lookup> {
    dispatch::lookup(kind, query, config).await
}
