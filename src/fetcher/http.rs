// src/fetcher/http.rs
// =============================================================================
// HTTP page fetcher built on reqwest.
//
// One Client is built per fetcher and shared by every worker (reqwest's
// Client is an Arc internally, so cloning it is cheap and keeps the
// connection pool shared).
// =============================================================================

use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::Client;

use super::{FetchedPage, PageFetcher};
use crate::config::CrawlConfig;

#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    // Builds a fetcher whose client honours the config's timeout and user agent
    pub fn from_config(config: &CrawlConfig) -> Result<Self> {
        Ok(Self::new(build_client(config)?))
    }

    pub fn client(&self) -> &Client {
        &self.client
    }
}

/// The HTTP client shared by page fetching and sitemap seeding.
pub fn build_client(config: &CrawlConfig) -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .user_agent(config.user_agent.clone())
        .redirect(reqwest::redirect::Policy::limited(5))
        .build()
        .context("Failed to create HTTP client")
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage> {
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(anyhow!("HTTP {} for {}", response.status(), url));
        }

        // Capture before .text() consumes the response
        let final_url = response.url().to_string();
        let content = response.text().await?;

        Ok(FetchedPage { content, final_url })
    }
}
