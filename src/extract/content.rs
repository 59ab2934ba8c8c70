// src/extract/content.rs
// =============================================================================
// Title and text extraction.
//
// - Title: text of the first <title>, trimmed; "No title" when missing
// - Text: every text node under <main> (or <body> when there is no <main>),
//   each trimmed, empty ones dropped, joined with single spaces
//
// Text inside <script>, <style> and <noscript> is not page content and is
// skipped.
// =============================================================================

use scraper::{ElementRef, Html};

use super::selector;

/// Title recorded for pages without a usable `<title>`.
pub const NO_TITLE: &str = "No title";

const SKIPPED_PARENTS: [&str; 3] = ["script", "style", "noscript"];

pub fn extract_title(document: &Html) -> String {
    document
        .select(&selector("title"))
        .next()
        .map(|title| title.text().collect::<String>().trim().to_string())
        .filter(|title| !title.is_empty())
        .unwrap_or_else(|| NO_TITLE.to_string())
}

pub fn extract_text(document: &Html) -> String {
    let root = document
        .select(&selector("main"))
        .next()
        .or_else(|| document.select(&selector("body")).next());

    let root = match root {
        Some(root) => root,
        None => return String::new(),
    };

    root.descendants()
        .filter(|node| {
            !node
                .parent()
                .and_then(ElementRef::wrap)
                .map_or(false, |parent| SKIPPED_PARENTS.contains(&parent.value().name()))
        })
        .filter_map(|node| node.value().as_text())
        .map(|text| text.trim())
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
