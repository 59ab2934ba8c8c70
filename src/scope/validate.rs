// src/scope/validate.rs
// =============================================================================
// URL validation and normalization.
//
// A crawlable URL is:
// - absolute (parses without a base)
// - http or https
// - has a non-empty host
// - does not have a "tel:"-style pseudo path
//
// Normalization produces the dedup key the frontier uses: the url crate's
// serialization (lowercased scheme/host, default port dropped, "/" path for
// bare hosts) with the fragment removed, since "#section" never changes
// which page the server returns.
// =============================================================================

use url::Url;

// Checks whether a URL can be fetched by the crawler
//
// Examples:
//   "https://example.com/docs" -> true
//   "ftp://example.com"        -> false (wrong scheme)
//   "tel:12345"                -> false (not http)
//   "/relative/path"           -> false (not absolute)
pub fn is_crawlable(url: &str) -> bool {
    match Url::parse(url) {
        Ok(parsed) => is_crawlable_url(&parsed),
        Err(_) => false,
    }
}

pub(crate) fn is_crawlable_url(url: &Url) -> bool {
    matches!(url.scheme(), "http" | "https")
        && url.host_str().map_or(false, |host| !host.is_empty())
        && !url.path().starts_with("tel:")
}

/// Returns the dedup form of `url`, or `None` when it is not crawlable.
pub fn normalize_url(url: &str) -> Option<String> {
    let mut parsed = Url::parse(url).ok()?;
    if !is_crawlable_url(&parsed) {
        return None;
    }
    parsed.set_fragment(None);
    Some(parsed.into())
}
