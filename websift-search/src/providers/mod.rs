//! Search provider implementations.
//!
//! Each module provides a struct implementing
//! [`crate::provider::SearchProvider`] for one backend.

pub mod bing;
pub mod duckduckgo;
pub mod google;
pub mod metaso;
mod rest;

pub use bing::BingProvider;
pub use duckduckgo::DuckDuckGoProvider;
pub use google::GoogleProvider;
pub use metaso::{AnswerExecutor, AnswerRequest, MetasoProvider};
