// src/crawl/mod.rs
// =============================================================================
// This module is the crawl engine.
//
// Features:
// - Concurrent crawling with a fixed-size worker pool
// - Hard page budget (max_links) on both fetching and results
// - Same-site restriction (subdomains included, "www." ignored)
// - Sitemap seeding with fallback to link-density discovery
//
// Submodules:
// - queue: the frontier (dedup + budgeted work queue)
// - harvest: collects finished pages into the final result
// - scheduler: the Crawler and its worker loop
// =============================================================================

mod harvest;
mod queue;
mod scheduler;

pub use harvest::Harvest;
pub use queue::Frontier;
pub use scheduler::{crawl_website, Crawler};
