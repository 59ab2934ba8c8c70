// src/config.rs
// =============================================================================
// Crawl configuration.
//
// Every field has a default, so a config file only needs the keys it wants
// to change:
//
//   { "maxLinks": 100, "useSitemap": true }
//
// The CLI builds a CrawlConfig from an optional JSON file and then applies
// its own flags on top (flags win).
// =============================================================================

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Default width of the worker pool.
pub const DEFAULT_CONCURRENCY: usize = 50;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlConfig {
    /// Page budget: the most content items a crawl returns.
    #[serde(default = "default_max_links")]
    pub max_links: usize,

    /// Seed the frontier from the site's sitemap.xml when it has one.
    #[serde(default)]
    pub use_sitemap: bool,

    /// Pre-fetched sitemap entries; skips the live sitemap request.
    #[serde(default)]
    pub sitemap_urls: Option<Vec<String>>,

    /// Number of concurrent crawl workers.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// Extra URLs the frontier may accept beyond `max_links` so that
    /// workers are not starved while the last pages are in flight.
    #[serde(default)]
    pub fetch_margin: usize,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            max_links: default_max_links(),
            use_sitemap: false,
            sitemap_urls: None,
            concurrency: default_concurrency(),
            fetch_margin: 0,
            user_agent: default_user_agent(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl CrawlConfig {
    // Loads a JSON config file; missing keys fall back to defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Invalid config {}", path.display()))
    }

    /// How many URLs the frontier may accept in total.
    pub fn frontier_capacity(&self) -> usize {
        self.max_links.saturating_add(self.fetch_margin)
    }
}

fn default_max_links() -> usize {
    25
}

fn default_concurrency() -> usize {
    DEFAULT_CONCURRENCY
}

fn default_user_agent() -> String {
    format!("site-harvest/{}", env!("CARGO_PKG_VERSION"))
}

fn default_request_timeout_secs() -> u64 {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CrawlConfig::default();
        assert_eq!(config.max_links, 25);
        assert_eq!(config.concurrency, 50);
        assert_eq!(config.fetch_margin, 0);
        assert!(!config.use_sitemap);
        assert!(config.sitemap_urls.is_none());
        assert_eq!(config.frontier_capacity(), 25);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: CrawlConfig =
            serde_json::from_str(r#"{ "maxLinks": 7, "useSitemap": true, "fetchMargin": 2 }"#)
                .unwrap();
        assert_eq!(config.max_links, 7);
        assert!(config.use_sitemap);
        assert_eq!(config.concurrency, DEFAULT_CONCURRENCY);
        assert_eq!(config.frontier_capacity(), 9);
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("crawl.json");
        std::fs::write(&path, r#"{ "sitemapUrls": ["https://example.com/a"] }"#).unwrap();

        let config = CrawlConfig::from_file(&path).unwrap();
        assert_eq!(
            config.sitemap_urls,
            Some(vec!["https://example.com/a".to_string()])
        );
        assert_eq!(config.max_links, 25);
    }

    #[test]
    fn test_from_file_missing() {
        let result = CrawlConfig::from_file(Path::new("/nonexistent/crawl.json"));
        assert!(result.is_err());
    }
}
