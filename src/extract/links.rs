// src/extract/links.rs
// =============================================================================
// Link discovery using a link-density heuristic.
//
// Instead of following every <a> on a page, we look for the regions that
// hold the most links (menus, footers, article lists) and follow only those:
//
// 1. Every element inside <body> that has at least one <a> descendant is a
//    candidate "link container"
// 2. Candidates are ranked by how many <a> descendants they have
// 3. The top 3 are kept (ties keep document order)
// 4. Their hrefs are resolved against the page URL, filtered to crawlable
//    in-scope URLs, and deduplicated
//
// Links outside the top containers are never discovered. That trade-off
// keeps one-off links in body copy out of the frontier.
//
// Containers nest: <ul> holding 10 links sits inside a <nav> that also holds
// those 10 links, so the same href often arrives from several containers.
// Deduplication happens after the union.
// =============================================================================

use std::collections::{HashMap, HashSet};

use scraper::{ElementRef, Html};
use tracing::debug;
use url::Url;

use super::selector;
use crate::scope::{in_scope, normalize_url};

/// How many link-dense containers contribute links.
pub const TOP_CONTAINERS: usize = 3;

/// An element ranked by how many anchors it contains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkContainer {
    /// CSS-like description, e.g. `nav#main.menu.top`.
    pub selector: String,
    /// Number of `<a>` descendants, with or without an href.
    pub anchor_count: usize,
    /// Raw href values of those anchors, in document order.
    pub hrefs: Vec<String>,
}

// Returns the `limit` elements with the most anchor descendants
//
// Sorting is stable, so elements with equal counts stay in document order.
pub fn top_link_containers(document: &Html, limit: usize) -> Vec<LinkContainer> {
    let body = match document.select(&selector("body")).next() {
        Some(body) => body,
        None => return Vec::new(),
    };

    // Document position of every element below <body>
    let order: HashMap<_, usize> = body
        .descendants()
        .filter(|node| node.id() != body.id())
        .filter_map(ElementRef::wrap)
        .enumerate()
        .map(|(position, element)| (element.id(), position))
        .collect();

    // Credit each anchor to all of its ancestors up to (not including) <body>
    let mut containers = HashMap::new();
    for anchor in body
        .descendants()
        .filter_map(ElementRef::wrap)
        .filter(|element| element.value().name() == "a")
    {
        let href = anchor.value().attr("href");
        for ancestor in anchor.ancestors().filter_map(ElementRef::wrap) {
            if ancestor.id() == body.id() {
                break;
            }
            let position = match order.get(&ancestor.id()) {
                Some(position) => *position,
                None => continue,
            };
            let entry = containers.entry(ancestor.id()).or_insert_with(|| {
                (
                    position,
                    LinkContainer {
                        selector: describe(&ancestor),
                        anchor_count: 0,
                        hrefs: Vec::new(),
                    },
                )
            });
            entry.1.anchor_count += 1;
            if let Some(href) = href {
                entry.1.hrefs.push(href.to_string());
            }
        }
    }

    let mut ranked: Vec<(usize, LinkContainer)> = containers.into_values().collect();
    ranked.sort_by_key(|(position, _)| *position);
    ranked.sort_by(|(_, a), (_, b)| b.anchor_count.cmp(&a.anchor_count));

    ranked
        .into_iter()
        .take(limit)
        .map(|(_, container)| container)
        .collect()
}

// Discovers in-scope links from raw HTML
//
// Parameters:
//   html: the rendered page
//   page_url: URL the page was served from (relative hrefs resolve here)
//   host_url: the crawl's host; only links on this site are returned
pub fn discover_links(html: &str, page_url: &str, host_url: &str) -> Vec<String> {
    let base = match Url::parse(page_url) {
        Ok(url) => url,
        Err(_) => return Vec::new(),
    };
    discover_links_in(&Html::parse_document(html), &base, host_url)
}

/// Same as [`discover_links`] for an already parsed page.
pub fn discover_links_in(document: &Html, page_url: &Url, host_url: &str) -> Vec<String> {
    let containers = top_link_containers(document, TOP_CONTAINERS);
    for container in &containers {
        debug!(
            "Link container {} with {} anchors on {}",
            container.selector, container.anchor_count, page_url
        );
    }

    let mut seen = HashSet::new();
    containers
        .iter()
        .flat_map(|container| container.hrefs.iter())
        .filter_map(|href| page_url.join(href).ok())
        .filter_map(|url| normalize_url(url.as_str()))
        .filter(|url| in_scope(url, host_url))
        .filter(|url| seen.insert(url.clone()))
        .collect()
}

// Builds "tag#id.class1.class2" for logging
fn describe(element: &ElementRef) -> String {
    let value = element.value();
    let mut description = value.name().to_string();
    if let Some(id) = value.id() {
        description.push('#');
        description.push_str(id);
    }
    for class in value.classes() {
        description.push('.');
        description.push_str(class);
    }
    description
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anchors(prefix: &str, count: usize) -> String {
        (0..count)
            .map(|i| format!(r#"<a href="/{}/{}">{} {}</a>"#, prefix, i, prefix, i))
            .collect()
    }

    // Four sibling sections with 15, 10, 5 and 2 links
    fn four_sections() -> String {
        format!(
            "<html><body>\
               <section id=\"small\">{}</section>\
               <section id=\"big\">{}</section>\
               <section id=\"mid\">{}</section>\
               <section id=\"low\">{}</section>\
             </body></html>",
            anchors("two", 2),
            anchors("fifteen", 15),
            anchors("ten", 10),
            anchors("five", 5),
        )
    }

    #[test]
    fn test_top_containers_descending() {
        let doc = Html::parse_document(&four_sections());
        let top = top_link_containers(&doc, TOP_CONTAINERS);

        let counts: Vec<usize> = top.iter().map(|c| c.anchor_count).collect();
        assert_eq!(counts, vec![15, 10, 5]);
        assert_eq!(top[0].selector, "section#big");
    }

    #[test]
    fn test_low_density_links_excluded() {
        let links = discover_links(
            &four_sections(),
            "https://example.com/",
            "https://example.com",
        );

        assert_eq!(links.len(), 30);
        assert!(links.iter().all(|l| !l.contains("/two/")));
        assert!(links.contains(&"https://example.com/fifteen/0".to_string()));
        assert!(links.contains(&"https://example.com/five/4".to_string()));
    }

    #[test]
    fn test_nested_containers_dedupe() {
        let html = format!(
            "<body><nav class=\"menu\"><ul>{}</ul></nav><p><a href=\"/lonely\">x</a></p></body>",
            anchors("nav", 4)
        );
        let doc = Html::parse_document(&html);
        let top = top_link_containers(&doc, TOP_CONTAINERS);

        // nav and ul both hold the same four anchors; nav comes first
        assert_eq!(top[0].selector, "nav.menu");
        assert_eq!(top[1].selector, "ul");
        assert_eq!(top[0].anchor_count, 4);
        assert_eq!(top[2].selector, "p");
        assert_eq!(top[2].anchor_count, 1);

        let links = discover_links(&html, "https://example.com/", "https://example.com");
        assert_eq!(
            links,
            vec![
                "https://example.com/nav/0",
                "https://example.com/nav/1",
                "https://example.com/nav/2",
                "https://example.com/nav/3",
                "https://example.com/lonely",
            ]
        );
    }

    #[test]
    fn test_ties_keep_document_order() {
        let html = "<body>\
            <div id=\"first\"><a href=\"/a\">a</a></div>\
            <div id=\"second\"><a href=\"/b\">b</a></div>\
            <div id=\"third\"><a href=\"/c\">c</a></div>\
            <div id=\"fourth\"><a href=\"/d\">d</a></div>\
            </body>";
        let doc = Html::parse_document(html);
        let top = top_link_containers(&doc, TOP_CONTAINERS);
        let names: Vec<&str> = top.iter().map(|c| c.selector.as_str()).collect();
        assert_eq!(names, vec!["div#first", "div#second", "div#third"]);
    }

    #[test]
    fn test_filters_out_of_scope_and_invalid() {
        let html = r##"<body><div>
            <a href="/ok">ok</a>
            <a href="https://blog.example.com/post">sub</a>
            <a href="https://other.org/">other</a>
            <a href="mailto:hi@example.com">mail</a>
            <a href="tel:12345">call</a>
            <a href="#top">top</a>
            <a>no href</a>
        </div></body>"##;
        let links = discover_links(html, "https://www.example.com/page", "https://example.com");
        assert_eq!(
            links,
            vec![
                "https://www.example.com/ok",
                "https://blog.example.com/post",
                "https://www.example.com/page",
            ]
        );
    }

    #[test]
    fn test_relative_to_page_url() {
        let html = r#"<body><div><a href="next">n</a></div></body>"#;
        let links = discover_links(html, "https://example.com/docs/intro", "https://example.com");
        assert_eq!(links, vec!["https://example.com/docs/next"]);
    }

    #[test]
    fn test_no_links() {
        let html = "<body><p>Nothing here</p></body>";
        assert!(discover_links(html, "https://example.com/", "https://example.com").is_empty());
    }
}
