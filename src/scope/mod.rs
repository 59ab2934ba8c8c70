// src/scope/mod.rs
// =============================================================================
// This module decides which URLs the crawler is allowed to touch.
//
// Submodules:
// - validate: is this string a crawlable absolute http(s) URL?
// - domain: does this URL belong to the site we are harvesting?
//
// Both checks are pure functions. They gate the host URL before a crawl
// starts and filter every link that link discovery produces.
// =============================================================================

mod domain;
mod validate;

pub use domain::{in_scope, site_host};
pub use validate::{is_crawlable, normalize_url};
