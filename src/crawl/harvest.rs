// src/crawl/harvest.rs
// =============================================================================
// Result aggregation.
//
// Workers hand finished pages to the Harvest as they complete. It keeps them
// in completion order, refuses anything past the page budget or any URL it
// already holds, and produces the final CrawlResult when the crawl is over.
//
// The initial URL list is written once: by the first page that reports its
// links in heuristic mode, or up front with the sitemap seeds.
// =============================================================================

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

use once_cell::sync::OnceCell;

use crate::model::{CrawlResult, CrawledItem};

#[derive(Debug, Default)]
struct HarvestState {
    items: Vec<CrawledItem>,
    urls: HashSet<String>,
}

#[derive(Debug)]
pub struct Harvest {
    max_links: usize,
    state: Mutex<HarvestState>,
    initial_urls: OnceCell<Vec<String>>,
}

impl Harvest {
    pub fn new(max_links: usize) -> Self {
        Self {
            max_links,
            state: Mutex::new(HarvestState::default()),
            initial_urls: OnceCell::new(),
        }
    }

    /// A harvest whose initial URLs are fixed from the start (sitemap mode).
    pub fn with_initial_urls(max_links: usize, initial_urls: Vec<String>) -> Self {
        let harvest = Self::new(max_links);
        let _ = harvest.initial_urls.set(initial_urls);
        harvest
    }

    fn state(&self) -> MutexGuard<'_, HarvestState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // Adds a finished page
    //
    // Returns false (and drops the item) when the budget is already met or
    // the URL is already harvested.
    pub fn push(&self, item: CrawledItem) -> bool {
        let mut state = self.state();
        if state.items.len() >= self.max_links || state.urls.contains(&item.url) {
            return false;
        }
        state.urls.insert(item.url.clone());
        state.items.push(item);
        true
    }

    pub fn len(&self) -> usize {
        self.state().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_full(&self) -> bool {
        self.len() >= self.max_links
    }

    pub fn has_initial_urls(&self) -> bool {
        self.initial_urls.get().is_some()
    }

    /// Records the initial URLs; only the first call has any effect.
    pub fn record_initial_urls(&self, urls: Vec<String>) -> bool {
        self.initial_urls.set(urls).is_ok()
    }

    // Builds the final result: items truncated to the budget and cleaned,
    // links in the same order
    pub fn finish(&self) -> CrawlResult {
        let mut items = std::mem::take(&mut self.state().items);
        items.truncate(self.max_links);

        let content: Vec<_> = items.into_iter().map(CrawledItem::into_content).collect();
        let links = content.iter().map(|item| item.url.clone()).collect();

        CrawlResult {
            content,
            links,
            initial_urls: self.initial_urls.get().cloned().unwrap_or_default(),
        }
    }
}
