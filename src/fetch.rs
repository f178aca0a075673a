//! Page fetching for the crawl pipeline
//!
//! A fetch is a single bounded-timeout GET with a fixed User-Agent. Transport
//! failures and non-2xx statuses surface as [`FetchError`]; retry policy
//! belongs to the orchestrator, not this layer. Nothing is cached.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use thiserror::Error;
use tracing::debug;
use url::Url;

/// Error type for page fetches
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport-level failure (DNS, connect, timeout, body read)
    #[error("request to {url} failed: {source}")]
    Transport {
        /// The URL that failed
        url: String,
        /// The underlying client error
        source: reqwest::Error,
    },

    /// The server answered with a non-2xx status
    #[error("{url} returned status {status}")]
    Status {
        /// The URL that failed
        url: String,
        /// The response status
        status: StatusCode,
    },
}

/// One successfully fetched resource. Immutable; normalized and then
/// discarded by the caller.
#[derive(Debug, Clone)]
pub struct Page {
    /// The URL the body was fetched from
    pub url: Url,
    /// Raw response body
    pub body: String,
}

/// Abstraction over page retrieval, so the orchestrator can be driven by a
/// fake in tests.
#[async_trait]
pub trait Fetch: Send + Sync {
    /// Retrieve the resource at `url` with a single attempt
    async fn fetch(&self, url: &Url) -> Result<Page, FetchError>;
}

/// HTTP page fetcher backed by reqwest
#[derive(Debug, Clone)]
pub struct PageFetcher {
    client: Client,
}

impl PageFetcher {
    /// Create a fetcher with the given identity and per-request timeout
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self, crate::Error> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Fetch for PageFetcher {
    async fn fetch(&self, url: &Url) -> Result<Page, FetchError> {
        debug!(%url, "fetching page");

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }

        let body = response.text().await.map_err(|source| FetchError::Transport {
            url: url.to_string(),
            source,
        })?;

        Ok(Page {
            url: url.clone(),
            body,
        })
    }
}
