//! Parsing helpers for DuckDuckGo's token-gated result flow.
//!
//! Neither the `vqd` token nor the embedded result payload is a documented
//! contract. Both are located by fixed byte markers, so every function here
//! degrades to "nothing found" instead of panicking when the markers move.

use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

use crate::error::SearchError;
use crate::types::ScrapedResult;

/// Token patterns as `(start marker, end marker)`, in priority order.
const VQD_PATTERNS: &[(&[u8], &[u8])] = &[
    (b"vqd=\"", b"\""),
    (b"vqd=", b"&"),
    (b"vqd='", b"'"),
];

/// Opens the embedded result array.
const PAYLOAD_START: &[u8] = b"DDG.pageLayout.load('d',";
/// Sibling call that follows the result array.
const PAYLOAD_END: &[u8] = b");DDG.duckbar.load(";

/// Non-greedy, single-line tag matcher. Snippet HTML from a known service
/// only, not a general HTML parser.
const TAG_PATTERN: &str = "<.*?>";

static TAG_RE: OnceLock<Option<Regex>> = OnceLock::new();

/// One character reference: numeric, hex, or named, semicolon optional.
const ENTITY_PATTERN: &str = "&(?:#[0-9]+;?|#[xX][0-9a-fA-F]+;?|[A-Za-z][A-Za-z0-9]*;?)";

static ENTITY_RE: OnceLock<Option<Regex>> = OnceLock::new();

/// Named references browsers still decode without a trailing semicolon.
const LEGACY_ENTITIES: &[&str] = &[
    "AElig", "AMP", "Aacute", "Acirc", "Agrave", "Aring", "Atilde", "Auml", "COPY", "Ccedil",
    "ETH", "Eacute", "Ecirc", "Egrave", "Euml", "GT", "Iacute", "Icirc", "Igrave", "Iuml", "LT",
    "Ntilde", "Oacute", "Ocirc", "Ograve", "Oslash", "Otilde", "Ouml", "QUOT", "REG", "THORN",
    "Uacute", "Ucirc", "Ugrave", "Uuml", "Yacute", "aacute", "acirc", "acute", "aelig", "agrave",
    "amp", "aring", "atilde", "auml", "brvbar", "ccedil", "cedil", "cent", "copy", "curren",
    "deg", "divide", "eacute", "ecirc", "egrave", "eth", "euml", "frac12", "frac14", "frac34",
    "gt", "iacute", "icirc", "iexcl", "igrave", "iquest", "iuml", "laquo", "lt", "macr", "micro",
    "middot", "nbsp", "not", "ntilde", "oacute", "ocirc", "ograve", "ordf", "ordm", "oslash",
    "otilde", "ouml", "para", "plusmn", "pound", "quot", "raquo", "reg", "sect", "shy", "sup1",
    "sup2", "sup3", "szlig", "thorn", "times", "uacute", "ucirc", "ugrave", "uml", "uuml",
    "yacute", "yen", "yuml",
];

/// Extract the `vqd` session token from the landing page body.
///
/// Patterns are tried in order; a pattern whose end marker is missing or
/// whose token bytes are not UTF-8 falls through to the next one.
pub fn extract_vqd(body: &[u8]) -> Option<String> {
    VQD_PATTERNS.iter().find_map(|(open, close)| {
        let start = find_bytes(body, open, 0)? + open.len();
        let end = find_bytes(body, close, start)?;
        std::str::from_utf8(&body[start..end])
            .ok()
            .map(str::to_owned)
    })
}

/// Extract and parse the JSON array embedded in the result page script.
///
/// # Errors
///
/// Returns [`SearchError::Parse`] if either marker is missing or the text
/// between them is not a JSON array.
pub fn extract_payload(body: &[u8]) -> Result<Vec<Value>, SearchError> {
    let start = find_bytes(body, PAYLOAD_START, 0)
        .ok_or_else(|| SearchError::Parse("result payload start marker not found".into()))?
        + PAYLOAD_START.len();
    let end = find_bytes(body, PAYLOAD_END, start)
        .ok_or_else(|| SearchError::Parse("result payload end marker not found".into()))?;

    serde_json::from_slice(&body[start..end])
        .map_err(|e| SearchError::Parse(format!("result payload is not a JSON array: {e}")))
}

/// Turn raw payload rows into results, dropping placeholders and rows
/// without a usable href or snippet.
///
/// Row fields: `u` is the href, `a` the snippet, `t` the title.
pub fn collect_results(rows: &[Value], query: &str) -> Vec<ScrapedResult> {
    let placeholder = self_reference(query);
    let field = |row: &Value, key: &str| row.get(key).and_then(Value::as_str).unwrap_or("").to_owned();

    rows.iter()
        .filter_map(|row| {
            let href = field(row, "u");
            if href.is_empty() || href == placeholder {
                return None;
            }
            let body = normalize(&field(row, "a"));
            if body.trim().is_empty() {
                return None;
            }
            Some(ScrapedResult {
                title: normalize(&field(row, "t")),
                href: normalize_url(&href),
                body,
            })
        })
        .collect()
}

/// The placeholder row DuckDuckGo injects for `query`.
pub fn self_reference(query: &str) -> String {
    format!("http://www.google.com/search?q={query}")
}

/// Strip tags, then decode HTML entities. Empty input yields empty output.
///
/// Entities are decoded in one pass, so `&amp;lt;` becomes `&lt;` and not
/// `<`. Legacy named references without a semicolon (`&amp`, `&copy`)
/// decode to their longest known prefix, as browsers do.
pub fn normalize(raw_html: &str) -> String {
    if raw_html.is_empty() {
        return String::new();
    }
    let stripped = match tag_regex() {
        Some(re) => re.replace_all(raw_html, ""),
        None => raw_html.into(),
    };
    match entity_regex() {
        Some(re) => re
            .replace_all(&stripped, |caps: &regex::Captures<'_>| decode_entity(&caps[0]))
            .into_owned(),
        None => html_escape::decode_html_entities(&stripped).into_owned(),
    }
}

/// Decode a single `&...` reference; unknown references are kept verbatim.
fn decode_entity(entity: &str) -> String {
    let decoded = html_escape::decode_html_entities(entity);
    if decoded != entity {
        return decoded.into_owned();
    }
    let name = &entity[1..];
    if name.starts_with('#') {
        if entity.ends_with(';') {
            return entity.to_owned();
        }
        let terminated = format!("{entity};");
        let decoded = html_escape::decode_html_entities(&terminated);
        return if decoded == terminated {
            entity.to_owned()
        } else {
            decoded.into_owned()
        };
    }
    let legacy = LEGACY_ENTITIES
        .iter()
        .filter(|legacy| name.starts_with(**legacy))
        .max_by_key(|legacy| legacy.len());
    match legacy {
        Some(legacy) => {
            let ch = html_escape::decode_html_entities(&format!("&{legacy};")).into_owned();
            format!("{ch}{}", &name[legacy.len()..])
        }
        None => entity.to_owned(),
    }
}

/// Replace spaces with `+`, then percent-decode. Empty input yields empty
/// output. Invalid UTF-8 after decoding is replaced, not rejected.
pub fn normalize_url(url: &str) -> String {
    if url.is_empty() {
        return String::new();
    }
    let plussed = url.replace(' ', "+");
    let decoded = urlencoding::decode_binary(plussed.as_bytes());
    String::from_utf8_lossy(&decoded).into_owned()
}

fn tag_regex() -> Option<&'static Regex> {
    TAG_RE
        .get_or_init(|| match Regex::new(TAG_PATTERN) {
            Ok(re) => Some(re),
            Err(e) => {
                tracing::error!(error = %e, "tag pattern failed to compile");
                None
            }
        })
        .as_ref()
}

fn entity_regex() -> Option<&'static Regex> {
    ENTITY_RE
        .get_or_init(|| match Regex::new(ENTITY_PATTERN) {
            Ok(re) => Some(re),
            Err(e) => {
                tracing::error!(error = %e, "entity pattern failed to compile");
                None
            }
        })
        .as_ref()
}

fn find_bytes(haystack: &[u8], needle: &[u8], from: usize) -> Option<usize> {
    if needle.is_empty() {
        return None;
    }
    haystack
        .get(from..)?
        .windows(needle.len())
        .position(|w| w == needle)
        .map(|pos| pos + from)
}
