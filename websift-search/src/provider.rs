//! Capability trait implemented by every search backend.
//!
//! Each provider (Metaso, Bing, Google, DuckDuckGo) implements
//! [`SearchProvider`] so the caller can select one at runtime and drive it
//! through the same two steps: `search`, then `get_first_link`.

use crate::error::SearchError;
use crate::types::ProviderKind;

/// A pluggable search backend.
///
/// Implementors own their HTTP client and remember the result of the most
/// recent [`search`](SearchProvider::search) call, which is the only state
/// [`get_first_link`](SearchProvider::get_first_link) reads. Each call to
/// `search` replaces that state; no history is kept.
///
/// All implementations must be `Send + Sync` so a provider can be moved
/// into a spawned task.
pub trait SearchProvider: Send + Sync {
    /// What a successful `search` hands back to the caller.
    type Output;

    /// Run a query against the backend.
    ///
    /// Leading and trailing whitespace is stripped from `query` before it is
    /// sent.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError`] on transport, status, or protocol failure.
    /// Each provider documents which failures it reports and which it
    /// absorbs into an empty result.
    fn search(
        &mut self,
        query: &str,
    ) -> impl std::future::Future<Output = Result<Self::Output, SearchError>> + Send;

    /// First URL of the most recent result that the site filter allows.
    ///
    /// Returns [`NOT_FOUND`](crate::types::NOT_FOUND) when nothing is
    /// eligible, including when `search` has never succeeded.
    ///
    /// # Errors
    ///
    /// Only providers that cannot produce links return an error
    /// ([`SearchError::Unsupported`]).
    fn get_first_link(&self) -> Result<String, SearchError>;

    /// Returns which [`ProviderKind`] this implementation represents.
    fn kind(&self) -> ProviderKind;
}
