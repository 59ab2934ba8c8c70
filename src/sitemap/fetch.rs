// src/sitemap/fetch.rs
// =============================================================================
// Fetches sitemap.xml and turns it into seed URLs.
//
// Strategy:
// - Resolve "sitemap.xml" against the host URL (same rules as a browser)
// - GET it; anything but a 2xx is "no sitemap"
// - Parse as XML and pull <url><loc> entries in the sitemap namespace
// - A <sitemapindex> is followed one level: each child sitemap is fetched
//   and its <url><loc> entries are appended in order
//
// fetch_seeds never fails. The caller treats an empty list as the signal to
// crawl heuristically instead.
// =============================================================================

use anyhow::{anyhow, Context, Result};
use reqwest::Client;
use sxd_document::parser;
use sxd_xpath::{Context as XPathContext, Factory, Value};
use tracing::{info, warn};
use url::Url;

/// The sitemap protocol namespace.
pub const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// The `loc` values found in one sitemap document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SitemapEntries {
    /// Page URLs from `<urlset><url><loc>`.
    pub pages: Vec<String>,
    /// Child sitemap URLs from `<sitemapindex><sitemap><loc>`.
    pub sitemaps: Vec<String>,
}

// Returns the seed URLs listed in the host's sitemap, or an empty Vec
//
// Parameters:
//   client: shared HTTP client
//   host_url: the crawl's starting URL
pub async fn fetch_seeds(client: &Client, host_url: &str) -> Vec<String> {
    let sitemap_url = match sitemap_location(host_url) {
        Ok(url) => url,
        Err(e) => {
            warn!("Cannot build sitemap location for {}: {}", host_url, e);
            return Vec::new();
        }
    };

    info!("Attempting to fetch sitemap from: {}", sitemap_url);

    let entries = match fetch_entries(client, &sitemap_url).await {
        Ok(entries) => entries,
        Err(e) => {
            warn!("Error fetching or parsing sitemap: {:#}", e);
            info!("Falling back to regular crawling.");
            return Vec::new();
        }
    };

    let mut seeds = entries.pages;
    for child in entries.sitemaps {
        match fetch_entries(client, &child).await {
            Ok(child_entries) => seeds.extend(child_entries.pages),
            Err(e) => warn!("Skipping child sitemap {}: {:#}", child, e),
        }
    }

    if seeds.is_empty() {
        warn!("No valid URLs found in the sitemap. Falling back to regular crawling.");
        return Vec::new();
    }

    info!("Found {} URLs in the sitemap.", seeds.len());
    seeds
}

/// Resolves `sitemap.xml` against the host URL.
pub fn sitemap_location(host_url: &str) -> Result<String> {
    let base = Url::parse(host_url).with_context(|| format!("Invalid URL '{}'", host_url))?;
    Ok(base.join("sitemap.xml")?.to_string())
}

async fn fetch_entries(client: &Client, sitemap_url: &str) -> Result<SitemapEntries> {
    let response = client.get(sitemap_url).send().await?;

    if !response.status().is_success() {
        return Err(anyhow!("HTTP {} for {}", response.status(), sitemap_url));
    }

    let xml = response.text().await?;
    parse_sitemap(&xml).with_context(|| format!("Couldn't parse {}", sitemap_url))
}

// Parses a sitemap document
//
// Only elements in the sitemap namespace count; a <urlset> without the
// xmlns declaration yields no entries.
pub fn parse_sitemap(xml: &str) -> Result<SitemapEntries> {
    let package = parser::parse(xml).map_err(|e| anyhow!("Invalid XML: {}", e))?;
    let document = package.as_document();

    let mut context = XPathContext::new();
    context.set_namespace("sm", SITEMAP_NS);
    let factory = Factory::new();

    let select = |expr: &str| -> Result<Vec<String>> {
        let xpath = factory
            .build(expr)?
            .ok_or_else(|| anyhow!("Missing XPath"))?;
        let value = xpath
            .evaluate(&context, document.root())
            .map_err(|e| anyhow!("Couldn't evaluate {}: {}", expr, e))?;

        Ok(match value {
            Value::Nodeset(nodes) => nodes
                .document_order()
                .into_iter()
                .map(|node| node.string_value().trim().to_string())
                .filter(|loc| !loc.is_empty())
                .collect(),
            _ => Vec::new(),
        })
    };

    Ok(SitemapEntries {
        pages: select("//sm:url/sm:loc")?,
        sitemaps: select("/sm:sitemapindex/sm:sitemap/sm:loc")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::serve;

    const URLSET: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <url><loc>https://example.com/</loc></url>
  <url>
    <loc>
      https://example.com/about
    </loc>
    <lastmod>2024-01-01</lastmod>
  </url>
  <url><loc>https://example.com/contact</loc></url>
</urlset>"#;

    #[test]
    fn test_parse_urlset_in_order() {
        let entries = parse_sitemap(URLSET).unwrap();
        assert_eq!(
            entries.pages,
            vec![
                "https://example.com/",
                "https://example.com/about",
                "https://example.com/contact"
            ]
        );
        assert!(entries.sitemaps.is_empty());
    }

    #[test]
    fn test_parse_index() {
        let xml = r#"<sitemapindex xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
            <sitemap><loc>https://example.com/a.xml</loc></sitemap>
            <sitemap><loc>https://example.com/b.xml</loc></sitemap>
        </sitemapindex>"#;
        let entries = parse_sitemap(xml).unwrap();
        assert!(entries.pages.is_empty());
        assert_eq!(
            entries.sitemaps,
            vec!["https://example.com/a.xml", "https://example.com/b.xml"]
        );
    }

    #[test]
    fn test_parse_without_namespace_is_empty() {
        let xml = "<urlset><url><loc>https://example.com/</loc></url></urlset>";
        assert_eq!(parse_sitemap(xml).unwrap(), SitemapEntries::default());
    }

    #[test]
    fn test_parse_invalid_xml() {
        assert!(parse_sitemap("<urlset><url></urlset>").is_err());
    }

    #[test]
    fn test_sitemap_location() {
        assert_eq!(
            sitemap_location("https://example.com").unwrap(),
            "https://example.com/sitemap.xml"
        );
        assert_eq!(
            sitemap_location("https://example.com/blog/post").unwrap(),
            "https://example.com/blog/sitemap.xml"
        );
    }

    #[tokio::test]
    async fn test_fetch_seeds_404_is_empty() {
        let base = serve(vec![]).await;
        let seeds = fetch_seeds(&Client::new(), &base).await;
        assert!(seeds.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_seeds_non_xml_is_empty() {
        let base = serve(vec![("/sitemap.xml", 200, "<html><p>oops</html>".to_string())]).await;
        let seeds = fetch_seeds(&Client::new(), &base).await;
        assert!(seeds.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_seeds_urlset() {
        let base = serve(vec![("/sitemap.xml", 200, URLSET.to_string())]).await;
        let seeds = fetch_seeds(&Client::new(), &base).await;
        assert_eq!(seeds.len(), 3);
        assert_eq!(seeds[1], "https://example.com/about");
    }

    #[tokio::test]
    async fn test_fetch_seeds_follows_index_once() {
        let child = r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
            <url><loc>https://example.com/from-child</loc></url>
        </urlset>"#;
        let base = serve(vec![("/child.xml", 200, child.to_string())]).await;
        let index = format!(
            r#"<sitemapindex xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
                <sitemap><loc>{base}child.xml</loc></sitemap>
                <sitemap><loc>{base}missing.xml</loc></sitemap>
            </sitemapindex>"#
        );
        let host = serve(vec![("/sitemap.xml", 200, index)]).await;

        let seeds = fetch_seeds(&Client::new(), &host).await;
        assert_eq!(seeds, vec!["https://example.com/from-child"]);
    }
}
