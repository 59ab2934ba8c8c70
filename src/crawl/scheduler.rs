// src/crawl/scheduler.rs
// =============================================================================
// The crawl loop.
//
// How it works:
// 1. Validate the host URL (the only hard failure)
// 2. Seed the frontier: sitemap entries when sitemap mode finds any,
//    otherwise the host URL alone
// 3. Start `concurrency` workers. Each one repeatedly:
//    - takes the next URL from the frontier
//    - fetches it through the PageFetcher
//    - extracts title and text, hands the page to the Harvest
//    - in heuristic mode, runs link discovery and enqueues what it finds
// 4. When the page budget is met the frontier is closed; workers finish
//    what they are doing and stop. Otherwise they stop when the frontier
//    runs dry.
// 5. Build the CrawlResult from whatever was harvested
//
// A failing page only costs that page. A panicking worker is logged and the
// crawl still returns everything harvested so far.
// =============================================================================

use std::sync::Arc;

use anyhow::{Context, Result};
use futures::future::join_all;
use reqwest::Client;
use scraper::Html;
use tracing::{debug, error, info, warn};
use url::Url;

use super::harvest::Harvest;
use super::queue::Frontier;
use crate::config::CrawlConfig;
use crate::error::CrawlError;
use crate::extract::{discover_links_in, extract_text, extract_title};
use crate::fetcher::{FetchedPage, HttpFetcher, PageFetcher};
use crate::model::{CrawlResult, CrawledItem};
use crate::scope::{is_crawlable, normalize_url};
use crate::sitemap::fetch_seeds;

/// Crawls one site at a time with a shared fetcher and HTTP client.
pub struct Crawler {
    fetcher: Arc<dyn PageFetcher>,
    // Used for sitemap.xml; pages always go through `fetcher`
    client: Client,
    config: CrawlConfig,
}

// Everything the workers of one crawl share
struct CrawlState {
    host_url: String,
    frontier: Frontier,
    harvest: Harvest,
    fetcher: Arc<dyn PageFetcher>,
    // false in sitemap mode: discovered links do not grow the frontier
    discover: bool,
}

impl Crawler {
    pub fn new(fetcher: Arc<dyn PageFetcher>, client: Client, config: CrawlConfig) -> Self {
        Self {
            fetcher,
            client,
            config,
        }
    }

    /// A crawler that fetches pages over plain HTTP.
    pub fn with_http(config: CrawlConfig) -> Result<Self> {
        let fetcher = HttpFetcher::from_config(&config)?;
        let client = fetcher.client().clone();
        Ok(Self::new(Arc::new(fetcher), client, config))
    }

    pub fn config(&self) -> &CrawlConfig {
        &self.config
    }

    // Crawls the site at `host_url`
    //
    // Errors only when the host URL is not a crawlable http(s) URL or the
    // page budget is zero; no fetch happens in that case.
    pub async fn crawl(&self, host_url: &str) -> Result<CrawlResult, CrawlError> {
        if !is_crawlable(host_url) {
            return Err(CrawlError::InvalidHostUrl(host_url.to_string()));
        }
        if self.config.max_links == 0 {
            return Err(CrawlError::ZeroBudget);
        }

        let seeds = self.sitemap_seeds(host_url).await;
        let sitemap_mode = !seeds.is_empty();

        let frontier = Frontier::new(self.config.frontier_capacity());
        let harvest = if sitemap_mode {
            info!("Seeding crawl with {} sitemap URLs", seeds.len());
            let queued = frontier.seed(seeds.clone());
            debug!("{} sitemap URLs queued, rest held in reserve", queued);
            Harvest::with_initial_urls(self.config.max_links, seeds)
        } else {
            frontier.seed(vec![host_url.to_string()]);
            Harvest::new(self.config.max_links)
        };

        let state = Arc::new(CrawlState {
            host_url: host_url.to_string(),
            frontier,
            harvest,
            fetcher: self.fetcher.clone(),
            discover: !sitemap_mode,
        });

        let workers: Vec<_> = (0..self.config.concurrency.max(1))
            .map(|id| tokio::spawn(run_worker(id, state.clone())))
            .collect();

        for outcome in join_all(workers).await {
            if let Err(e) = outcome {
                error!("Error during crawling: {}", e);
            }
        }
        state.frontier.close();

        let result = state.harvest.finish();
        info!(
            "Crawling completed. Total pages crawled: {}, initial URLs found: {}",
            result.content.len(),
            result.initial_urls.len()
        );
        Ok(result)
    }

    // Sitemap entries to seed with, or empty for heuristic crawling
    async fn sitemap_seeds(&self, host_url: &str) -> Vec<String> {
        if !self.config.use_sitemap {
            return Vec::new();
        }

        let seeds = match &self.config.sitemap_urls {
            Some(urls) if !urls.is_empty() => urls.clone(),
            _ => fetch_seeds(&self.client, host_url).await,
        };

        seeds.into_iter().filter(|url| is_crawlable(url)).collect()
    }
}

// Crawls `host_url` over HTTP with the given config
pub async fn crawl_website(host_url: &str, config: CrawlConfig) -> Result<CrawlResult> {
    let crawler = Crawler::with_http(config)?;
    Ok(crawler.crawl(host_url).await?)
}

// Gives the URL's frontier slot back if the worker never reports success,
// including when the worker panics mid-page.
struct InFlight<'a> {
    frontier: &'a Frontier,
    url: &'a str,
    done: bool,
}

impl<'a> InFlight<'a> {
    fn new(frontier: &'a Frontier, url: &'a str) -> Self {
        Self {
            frontier,
            url,
            done: false,
        }
    }

    fn visited(mut self) {
        self.done = true;
        self.frontier.mark_visited(self.url);
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.done {
            self.frontier.mark_failed(self.url);
        }
    }
}

async fn run_worker(id: usize, state: Arc<CrawlState>) {
    while let Some(url) = state.frontier.next().await {
        let slot = InFlight::new(&state.frontier, &url);

        if state.harvest.is_full() {
            state.frontier.close();
            break;
        }

        info!("Processing {} ...", url);

        let page = match state.fetcher.fetch(&url).await {
            Ok(page) => page,
            Err(e) => {
                warn!("Error fetching {}: {:#}", url, e);
                continue;
            }
        };

        match process_page(&state, &url, page) {
            Ok(true) => slot.visited(),
            Ok(false) => debug!("Discarded {}: page budget already met", url),
            Err(e) => warn!("Error processing {}: {:#}", url, e),
        }
    }

    debug!("Worker {} finished", id);
}

// Extracts one page and feeds the results back into the crawl
//
// Returns Ok(false) when the page arrived after the budget was met.
// Everything here is synchronous: the parsed DOM never crosses an await.
fn process_page(state: &CrawlState, url: &str, page: FetchedPage) -> Result<bool> {
    let page_url = Url::parse(&page.final_url)
        .with_context(|| format!("Fetcher returned invalid URL '{}'", page.final_url))?;
    let document = Html::parse_document(&page.content);

    let item = CrawledItem::new(url, extract_title(&document), extract_text(&document));
    let links = if state.discover {
        discover_links_in(&document, &page_url, &state.host_url)
    } else {
        Vec::new()
    };

    if page.final_url != url {
        state.frontier.mark_seen(&page.final_url);
    }

    if !state.harvest.push(item) {
        state.frontier.close();
        return Ok(false);
    }
    if state.harvest.is_full() {
        info!("Page budget reached after {} pages", state.harvest.len());
        state.frontier.close();
        return Ok(true);
    }

    if state.discover {
        if !state.harvest.has_initial_urls() {
            let own = normalize_url(url);
            let initial = links
                .iter()
                .filter(|link| Some(*link) != own.as_ref())
                .cloned()
                .collect();
            state.harvest.record_initial_urls(initial);
        }

        let added = links
            .iter()
            .filter(|link| state.frontier.try_enqueue(link))
            .count();
        debug!("{} of {} discovered links queued from {}", added, links.len(), url);
    }

    Ok(true)
}
