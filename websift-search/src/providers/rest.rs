//! Shared plumbing for the keyed JSON search APIs.
//!
//! Both keyed backends return a JSON document holding a list of entries,
//! each with a URL field. Only the location of that list differs, so
//! each provider supplies a [`ResultList`] description and reuses
//! [`first_link`] to walk it.

use serde_json::Value;

use crate::error::SearchError;
use crate::site_filter::is_excluded;
use crate::types::{ProviderKind, NOT_FOUND};

/// Where the result entries live in a provider's JSON response.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ResultList {
    /// JSON pointer to the array of entries, e.g. `/webPages/value`.
    pub pointer: &'static str,
    /// Field holding the URL in each entry.
    pub url_field: &'static str,
}

/// Return the first entry URL not excluded by the site filter.
///
/// Never fails: a missing document, a missing list, or an entry without a
/// URL all yield [`NOT_FOUND`] and are logged.
pub(crate) fn first_link(
    provider: ProviderKind,
    document: Option<&Value>,
    list: ResultList,
    exclusions: &[String],
) -> String {
    let Some(document) = document else {
        tracing::debug!(%provider, "no search result to read a link from");
        return NOT_FOUND.to_owned();
    };

    let Some(entries) = document.pointer(list.pointer).and_then(Value::as_array) else {
        tracing::error!(%provider, pointer = list.pointer, "no result list in search response");
        return NOT_FOUND.to_owned();
    };

    for entry in entries {
        let Some(url) = entry.get(list.url_field).and_then(Value::as_str) else {
            tracing::warn!(%provider, field = list.url_field, "result entry has no url");
            return NOT_FOUND.to_owned();
        };
        if !is_excluded(url, exclusions) {
            return url.to_owned();
        }
    }
    NOT_FOUND.to_owned()
}

/// Map a reqwest failure to a transport error tagged with the provider.
pub(crate) fn transport_error(provider: ProviderKind, err: reqwest::Error) -> SearchError {
    SearchError::Transport(format!("{provider} request failed: {err}"))
}

/// Read a response body as JSON.
pub(crate) async fn read_json(
    provider: ProviderKind,
    response: reqwest::Response,
) -> Result<Value, SearchError> {
    let bytes = response
        .bytes()
        .await
        .map_err(|e| transport_error(provider, e))?;
    tracing::trace!(%provider, bytes = bytes.len(), "response received");
    serde_json::from_slice(&bytes)
        .map_err(|e| SearchError::Parse(format!("{provider} response is not JSON: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const ITEMS: ResultList = ResultList {
        pointer: "/items",
        url_field: "link",
    };

    const WEB_PAGES: ResultList = ResultList {
        pointer: "/webPages/value",
        url_field: "url",
    };

    #[test]
    fn no_document_is_not_found() {
        assert_eq!(first_link(ProviderKind::Google, None, ITEMS, &[]), NOT_FOUND);
    }

    #[test]
    fn missing_list_is_not_found() {
        let doc = json!({"searchInformation": {"totalResults": "0"}});
        assert_eq!(
            first_link(ProviderKind::Google, Some(&doc), ITEMS, &[]),
            NOT_FOUND
        );
    }

    #[test]
    fn list_of_wrong_type_is_not_found() {
        let doc = json!({"items": "oops"});
        assert_eq!(
            first_link(ProviderKind::Google, Some(&doc), ITEMS, &[]),
            NOT_FOUND
        );
    }

    #[test]
    fn nested_pointer_walks_in_order() {
        let doc = json!({"webPages": {"value": [
            {"url": "https://www.pinterest.com/pin/1"},
            {"url": "https://www.rust-lang.org/"},
            {"url": "https://docs.rs/"}
        ]}});
        let exclusions = vec!["pinterest.".to_string()];
        assert_eq!(
            first_link(ProviderKind::Bing, Some(&doc), WEB_PAGES, &exclusions),
            "https://www.rust-lang.org/"
        );
    }

    #[test]
    fn all_excluded_is_not_found() {
        let doc = json!({"items": [{"link": "https://a.com"}, {"link": "https://b.com"}]});
        let exclusions = vec![".com".to_string()];
        assert_eq!(
            first_link(ProviderKind::Google, Some(&doc), ITEMS, &exclusions),
            NOT_FOUND
        );
    }

    #[test]
    fn entry_without_url_is_not_found() {
        let doc = json!({"items": [{"title": "no link"}, {"link": "https://b.com"}]});
        assert_eq!(
            first_link(ProviderKind::Google, Some(&doc), ITEMS, &[]),
            NOT_FOUND
        );
    }
}
