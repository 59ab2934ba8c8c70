// src/scope/domain.rs
// =============================================================================
// Domain scoping: keeps the crawl on the site it started from.
//
// Rules:
// - A leading "www." label is ignored on both sides
// - Same host is in scope
// - Any subdomain of the host is in scope (blog.example.com for example.com)
// - Everything else is out of scope, including non-crawlable URLs
// =============================================================================

use url::Url;

use super::validate::is_crawlable_url;

// Checks whether `candidate` belongs to the same site as `host`
//
// Examples (host = "https://example.com"):
//   "https://www.example.com/x"  -> true
//   "https://blog.example.com/x" -> true
//   "https://example.org/x"      -> false
//   "https://notexample.com/x"   -> false (suffix match needs the dot)
pub fn in_scope(candidate: &str, host: &str) -> bool {
    let candidate = match Url::parse(candidate) {
        Ok(url) if is_crawlable_url(&url) => url,
        _ => return false,
    };
    let target = match Url::parse(host).ok().as_ref().and_then(site_host) {
        Some(target) => target,
        None => return false,
    };

    match site_host(&candidate) {
        Some(candidate_host) => {
            candidate_host == target || candidate_host.ends_with(&format!(".{}", target))
        }
        None => false,
    }
}

/// The host of `url` with a leading `www.` label removed.
pub fn site_host(url: &Url) -> Option<String> {
    let host = url.host_str()?;
    let host = host.strip_prefix("www.").unwrap_or(host);
    if host.is_empty() {
        None
    } else {
        Some(host.to_string())
    }
}
