// src/extract/mod.rs
// =============================================================================
// Everything the crawler reads out of a fetched page.
//
// Submodules:
// - content: page title and visible body text
// - links: link-density heuristic that finds navigation links
// - clean: resolves escape sequences left in extracted strings
// =============================================================================

mod clean;
mod content;
mod links;

pub use clean::clean_text;
pub use content::{extract_text, extract_title, NO_TITLE};
pub use links::{discover_links, discover_links_in, top_link_containers, LinkContainer, TOP_CONTAINERS};

use scraper::Selector;

// Parses one of our own constant CSS selectors.
// These are literals checked by the tests, so a failure is a programmer error.
pub(crate) fn selector(css: &'static str) -> Selector {
    Selector::parse(css).expect("static CSS selector must parse")
}
