//! websift: resolve a query to one good link, or a direct answer.
//!
//! The heavy lifting lives in the `websift-search` crate. This crate is the
//! host around it: it loads the TOML configuration, applies environment
//! overrides for API keys, prepares directories and logging, and hands an
//! explicit [`websift_search::SearchConfig`] to the chosen provider.

pub mod config;
pub mod dirs;
pub mod error;
pub mod logging;
pub mod startup;

pub use config::{AppConfig, ConfigSource};
pub use error::{AppError, Result};
pub use websift_search::{Lookup, ProviderKind, SearchConfig};

/// Resolve `query` with `provider` using the host configuration.
///
/// # Errors
///
/// Returns [`AppError::Search`] for invalid provider configuration or a
/// failed search.
pub async fn run_lookup(
    config: &SearchConfig,
    provider: ProviderKind,
    query: &str,
) -> Result<Lookup> {
    Ok(websift_search::lookup(provider, query, config).await?)
}
