// src/fetcher/mod.rs
// =============================================================================
// The page fetcher is the crawler's only swappable collaborator.
//
// The crawl engine never talks HTTP directly for pages. It asks a
// PageFetcher for the rendered HTML of a URL and gets back the content plus
// the URL the content was actually served from (after redirects).
//
// Implementations:
// - http::HttpFetcher: plain reqwest GET, no JavaScript rendering
// - tests use an in-memory fetcher serving canned pages
// =============================================================================

mod http;

use anyhow::Result;
use async_trait::async_trait;

pub use http::{build_client, HttpFetcher};

/// Rendered page returned by a [`PageFetcher`].
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// HTML of the page as the fetcher rendered it.
    pub content: String,
    /// URL the content came from; relative links resolve against this.
    pub final_url: String,
}

/// Fetches and renders pages for the crawler.
///
/// Retries, rendering waits and timeouts are the implementation's business.
/// An `Err` is terminal for that URL only.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchedPage>;
}
