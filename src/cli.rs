// src/cli.rs
// =============================================================================
// Command-line interface, defined with clap's derive API.
//
//   site-harvest crawl https://example.com --max-links 50 --output out.json
//   site-harvest crawl https://example.com --sitemap --json
//   site-harvest sitemap https://example.com
// =============================================================================

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use site_harvest::CrawlConfig;

#[derive(Parser, Debug)]
#[command(
    name = "site-harvest",
    version,
    about = "Crawl a website and harvest the title and text of its pages",
    long_about = "site-harvest follows the most link-dense parts of each page (menus, footers, \
                  article lists) across a single site, or starts from the site's sitemap.xml, \
                  and collects page titles and text up to a page budget."
)]
pub struct Cli {
    /// Log debug details (link containers, queue decisions)
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Crawl a site and collect page content
    ///
    /// Example: site-harvest crawl https://example.com --max-links 25
    Crawl(CrawlArgs),

    /// Print the URLs listed in a site's sitemap.xml
    ///
    /// Example: site-harvest sitemap https://example.com
    Sitemap {
        /// Website URL whose sitemap.xml should be read
        host_url: String,

        /// Output the seed list as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug)]
pub struct CrawlArgs {
    /// Website URL to start from (e.g., https://example.com)
    pub host_url: String,

    /// Maximum number of pages to return
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub max_links: Option<u64>,

    /// Seed the crawl from the site's sitemap.xml (falls back to link discovery)
    #[arg(long)]
    pub sitemap: bool,

    /// Number of pages fetched concurrently
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub concurrency: Option<u64>,

    /// Extra URLs the frontier may accept beyond the page budget
    #[arg(long)]
    pub fetch_margin: Option<usize>,

    /// JSON config file; flags given here override its values
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Write the result as JSON to this file
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Print the full result as JSON instead of a summary
    #[arg(long)]
    pub json: bool,

    /// Drop the link at this index (and its content) before output
    #[arg(long)]
    pub remove_index: Option<usize>,
}

impl CrawlArgs {
    // Builds the crawl config: file (or defaults) first, then flags
    pub fn to_config(&self) -> anyhow::Result<CrawlConfig> {
        let mut config = match &self.config {
            Some(path) => CrawlConfig::from_file(path)?,
            None => CrawlConfig::default(),
        };

        if let Some(max_links) = self.max_links {
            config.max_links = max_links as usize;
        }
        if self.sitemap {
            config.use_sitemap = true;
        }
        if let Some(concurrency) = self.concurrency {
            config.concurrency = concurrency as usize;
        }
        if let Some(fetch_margin) = self.fetch_margin {
            config.fetch_margin = fetch_margin;
        }

        Ok(config)
    }
}
