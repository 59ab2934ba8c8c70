// src/model.rs
// =============================================================================
// Data produced by a crawl.
//
// - CrawledItem: one page as extracted, text exactly as it came out of the DOM
// - ContentItem: the same page after escape cleanup (what callers receive)
// - CrawlResult: the final snapshot returned from a crawl
//
// All three serialize to JSON with the field names downstream consumers
// already use (url, title, text_content, date_crawled, links, initial_urls).
// =============================================================================

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::extract::clean_text;

/// A page as the worker extracted it. Never modified after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrawledItem {
    pub url: String,
    pub title: String,
    pub text_content: String,
    pub date_crawled: DateTime<Utc>,
}

impl CrawledItem {
    // Stamps the item with the current time
    pub fn new(url: impl Into<String>, title: impl Into<String>, text_content: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            text_content: text_content.into(),
            date_crawled: Utc::now(),
        }
    }

    /// Resolves escape sequences in title and text.
    pub fn into_content(self) -> ContentItem {
        ContentItem {
            title: clean_text(&self.title),
            text_content: clean_text(&self.text_content),
            url: self.url,
            date_crawled: self.date_crawled,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    pub url: String,
    pub title: String,
    pub text_content: String,
    pub date_crawled: DateTime<Utc>,
}

/// Final output of a crawl.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CrawlResult {
    /// Harvested pages, at most `max_links`, in completion order.
    pub content: Vec<ContentItem>,
    /// URLs of `content`, same order.
    pub links: Vec<String>,
    /// Links found on the first page (or the sitemap seeds in sitemap mode).
    #[serde(alias = "unique_initial_urls")]
    pub initial_urls: Vec<String>,
}

impl CrawlResult {
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    // Removes the link at `index` along with its content item
    //
    // Returns the removed URL, or None when the index is out of range.
    pub fn remove_link(&mut self, index: usize) -> Option<String> {
        if index >= self.links.len() {
            return None;
        }
        let removed = self.links.remove(index);
        self.content.retain(|item| item.url != removed);
        Some(removed)
    }

    /// Writes the result as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write {}", path.display()))
    }
}
