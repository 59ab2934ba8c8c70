// src/error.rs
// Errors a crawl can fail with. Only preconditions are errors: once the host
// URL is accepted, every later failure degrades to fewer results.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("Invalid host URL: {0}")]
    InvalidHostUrl(String),

    #[error("Page budget must be at least 1")]
    ZeroBudget,
}
