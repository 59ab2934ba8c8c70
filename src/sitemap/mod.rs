// src/sitemap/mod.rs
// =============================================================================
// Sitemap seeding.
//
// When sitemap mode is on, the crawler asks the site for its sitemap.xml and
// uses the listed pages as the frontier's starting contents. Any failure
// along the way (HTTP error, broken XML, empty sitemap) just means "no
// seeds", and the crawler falls back to following links from the host URL.
// =============================================================================

mod fetch;

pub use fetch::{fetch_seeds, parse_sitemap, sitemap_location, SitemapEntries, SITEMAP_NS};
