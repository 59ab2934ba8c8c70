// src/lib.rs
// =============================================================================
// site-harvest: crawl a website and collect the title and text of its pages.
//
// Starting from a host URL (or the site's sitemap), the crawler follows the
// most link-dense regions of each page, stays on the same site, and stops
// after max_links pages.
//
//   let config = CrawlConfig { max_links: 10, ..CrawlConfig::default() };
//   let result = crawl_website("https://example.com", config).await?;
//   for item in &result.content {
//       println!("{} - {}", item.url, item.title);
//   }
// =============================================================================

pub mod config;
pub mod crawl;
pub mod error;
pub mod extract;
pub mod fetcher;
pub mod model;
pub mod scope;
pub mod sitemap;

#[cfg(test)]
mod test_support;

pub use config::CrawlConfig;
pub use crawl::{crawl_website, Crawler};
pub use error::CrawlError;
pub use fetcher::{FetchedPage, HttpFetcher, PageFetcher};
pub use model::{ContentItem, CrawlResult, CrawledItem};
