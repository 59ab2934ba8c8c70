// src/main.rs
// =============================================================================
// Entry point of the site-harvest CLI.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging (RUST_LOG wins over --verbose)
// 3. Dispatch to the subcommand handler
// 4. Print or save the result
// 5. Exit with 0 = content harvested, 1 = nothing harvested, 2 = error
// =============================================================================

mod cli;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::{Cli, Commands, CrawlArgs};
use site_harvest::{fetcher, sitemap, CrawlConfig, CrawlResult, Crawler};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let exit_code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "site_harvest=debug"
    } else {
        "site_harvest=info"
    };

    // Logs go to stderr so --json output on stdout stays clean
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn run(cli: Cli) -> Result<i32> {
    match cli.command {
        Commands::Crawl(args) => handle_crawl(args).await,
        Commands::Sitemap { host_url, json } => handle_sitemap(&host_url, json).await,
    }
}

// Handles the 'crawl' subcommand
async fn handle_crawl(args: CrawlArgs) -> Result<i32> {
    let config = args.to_config()?;
    let started = std::time::Instant::now();

    let crawler = Crawler::with_http(config)?;
    let mut result = crawler.crawl(&args.host_url).await?;

    if let Some(index) = args.remove_index {
        match result.remove_link(index) {
            Some(url) => tracing::info!(
                "Removed URL: {} ({} remaining)",
                url,
                result.links.len()
            ),
            None => tracing::warn!("Index {} is out of range. No URL removed.", index),
        }
    }

    if let Some(path) = &args.output {
        result.save(path)?;
        tracing::info!("Results saved to {}", path.display());
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_summary(&result, crawler.config());
    }

    tracing::info!(
        "Total execution time: {:.2} seconds",
        started.elapsed().as_secs_f64()
    );

    if result.is_empty() {
        Ok(1)
    } else {
        Ok(0)
    }
}

// Handles the 'sitemap' subcommand
async fn handle_sitemap(host_url: &str, json: bool) -> Result<i32> {
    let config = CrawlConfig::default();
    let client = fetcher::build_client(&config)?;
    let seeds = sitemap::fetch_seeds(&client, host_url).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&seeds)?);
    } else {
        for url in &seeds {
            println!("{}", url);
        }
    }

    if seeds.is_empty() {
        Ok(1)
    } else {
        Ok(0)
    }
}

// Prints results as a human-readable table
fn print_summary(result: &CrawlResult, config: &CrawlConfig) {
    println!("{:<60} {:<40}", "URL", "TITLE");
    println!("{}", "=".repeat(100));

    for item in &result.content {
        println!("{:<60} {:<40}", truncate(&item.url, 57), truncate(&item.title, 37));
    }

    println!();
    println!("📊 Summary:");
    println!("   📄 Pages: {} (budget {})", result.content.len(), config.max_links);
    println!("   🔗 Initial URLs: {}", result.initial_urls.len());
    println!("   🗺️  Sitemap requested: {}", config.use_sitemap);
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let cut: String = text.chars().take(max).collect();
        format!("{}...", cut)
    } else {
        text.to_string()
    }
}
