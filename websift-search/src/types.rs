//! Core types for provider identification and search outcomes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::SearchError;

/// The "no eligible link" value returned by `get_first_link`.
///
/// Always the empty string, never an error.
pub const NOT_FOUND: &str = "";

/// A normalised row produced by the scraping provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapedResult {
    /// Result title with tags stripped and entities decoded.
    pub title: String,
    /// Result URL, percent-decoded.
    pub href: String,
    /// Snippet text with tags stripped and entities decoded. Never empty.
    pub body: String,
}

/// Outcome of a full provider lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Lookup {
    /// First eligible result link. Empty when nothing was eligible.
    Link(String),
    /// A synthesised answer from the direct-answer provider.
    Answer(String),
}

impl Lookup {
    /// The link or answer text.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Link(s) | Self::Answer(s) => s,
        }
    }

    /// Whether this is a link lookup that found nothing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Link(s) if s.is_empty())
    }
}

/// Supported search providers.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Metaso answer engine: returns a synthesised answer, no links.
    Metaso,
    /// Bing Web Search REST API (keyed).
    Bing,
    /// Google Custom Search JSON API (keyed).
    Google,
    /// DuckDuckGo, scraped through its token-gated browser flow. No key needed.
    #[default]
    #[serde(alias = "ddg")]
    DuckDuckGo,
}

impl ProviderKind {
    /// Returns the human-readable name of this provider.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Metaso => "Metaso",
            Self::Bing => "Bing",
            Self::Google => "Google",
            Self::DuckDuckGo => "DuckDuckGo",
        }
    }

    /// Returns all available provider variants.
    pub fn all() -> &'static [ProviderKind] {
        &[Self::Metaso, Self::Bing, Self::Google, Self::DuckDuckGo]
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ProviderKind {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "metaso" => Ok(Self::Metaso),
            "bing" => Ok(Self::Bing),
            "google" => Ok(Self::Google),
            "duckduckgo" | "ddg" => Ok(Self::DuckDuckGo),
            other => {
                let known: Vec<String> = Self::all()
                    .iter()
                    .map(|kind| kind.name().to_ascii_lowercase())
                    .collect();
                Err(SearchError::Config(format!(
                    "unknown provider: {other} (expected one of: {})",
                    known.join(", ")
                )))
            }
        }
    }
}
