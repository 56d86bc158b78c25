//! Site exclusion filtering for result links.
//!
//! A URL is excluded when any configured entry is a substring of it.
//! Matching is case-sensitive and unanchored: `"pinterest."` excludes
//! `https://www.pinterest.com/pin/1` as well as `https://a.pinterest.co.uk`.

/// Returns `true` iff some entry of `exclusions` is a substring of `url`.
///
/// An empty list excludes nothing.
pub fn is_excluded<S: AsRef<str>>(url: &str, exclusions: &[S]) -> bool {
    match exclusions
        .iter()
        .map(AsRef::as_ref)
        .find(|entry| url.contains(entry))
    {
        Some(entry) => {
            tracing::debug!(url, entry, "url excluded by site filter");
            true
        }
        None => false,
    }
}

/// Returns the first URL in `urls` that is not excluded.
pub fn first_eligible<'a, I, S>(urls: I, exclusions: &[S]) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
    S: AsRef<str>,
{
    urls.into_iter().find(|url| !is_excluded(url, exclusions))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_list_excludes_nothing() {
        let none: [&str; 0] = [];
        assert!(!is_excluded("https://example.com", &none));
        assert!(!is_excluded("", &none));
    }

    #[test]
    fn substring_match_excludes() {
        let list = vec!["pinterest.".to_string(), "quora.com".to_string()];
        assert!(is_excluded("https://www.pinterest.com/pin/1", &list));
        assert!(is_excluded("https://www.quora.com/What-is-Rust", &list));
        assert!(!is_excluded("https://www.rust-lang.org/", &list));
    }

    #[test]
    fn matching_is_case_sensitive() {
        let list = ["Pinterest"];
        assert!(!is_excluded("https://www.pinterest.com/", &list));
        assert!(is_excluded("https://Pinterest.com/", &list));
    }

    #[test]
    fn matching_is_unanchored() {
        let list = ["/ads/"];
        assert!(is_excluded("https://example.com/ads/banner", &list));
    }

    #[test]
    fn empty_entry_matches_everything() {
        let list = [""];
        assert!(is_excluded("https://example.com", &list));
    }

    #[test]
    fn excluded_iff_some_entry_is_substring() {
        let urls = [
            "https://a.com/x",
            "https://b.org/y",
            "http://c.net",
            "https://docs.rs/regex",
        ];
        let lists: [&[&str]; 4] = [&[], &["a.com"], &["b.org", "docs"], &["zzz", ".net"]];
        for url in urls {
            for list in lists {
                let expected = list.iter().any(|e| url.contains(e));
                assert_eq!(is_excluded(url, list), expected, "{url} vs {list:?}");
            }
        }
    }

    #[test]
    fn first_eligible_skips_excluded() {
        let list = ["youtube.com"];
        let urls = ["https://youtube.com/watch", "https://rust-lang.org", "https://c.com"];
        assert_eq!(
            first_eligible(urls, &list),
            Some("https://rust-lang.org")
        );
    }

    #[test]
    fn first_eligible_none_when_all_excluded() {
        let list = ["."];
        let urls = ["https://a.com", "https://b.com"];
        assert_eq!(first_eligible(urls, &list), None);
    }
}
