//! HTTP layer for the Gemini Developer API
//!
//! Handles authentication, request formatting, response parsing, and bounded
//! retry with exponential backoff and jitter when the service answers 429.

use std::time::Duration;

use rand::{Rng, thread_rng};
use reqwest::{Client as ReqwestClient, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, error, instrument};
use url::Url;

use crate::error::{Error, Result};

/// Generous timeout: model calls over large accumulated texts are slow
const DEFAULT_TIMEOUT_SECS: u64 = 120;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const API_VERSION: &str = "v1beta";

/// Maximum retry attempts for rate-limited requests
const MAX_RETRIES: u32 = 3;

/// Retry delay when the 429 carries no Retry-After header
const DEFAULT_RETRY_AFTER_SECS: u64 = 2;

/// Backoff ceiling in seconds
const MAX_RETRY_DELAY_SECS: u64 = 60;

/// HTTP client for the Gemini Developer API, authenticated with an API key.
/// Deliberately not Debug: the key must never reach logs.
#[derive(Clone)]
pub struct HttpClient {
    client: ReqwestClient,
    base_url: String,
    api_key: String,
}

#[cfg(test)]
impl HttpClient {
    /// Point the client at a local mock server (for testing only)
    pub fn set_base_url(&mut self, url: String) {
        self.base_url = url;
    }
}

impl HttpClient {
    /// Create a new HTTP client with an API key
    pub fn new(api_key: impl Into<String>) -> Self {
        let client = ReqwestClient::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .expect("reqwest client builds from static options");

        Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
        }
    }

    fn build_url(&self, path: &str) -> Result<Url> {
        let url = format!("{}/{}/{}", self.base_url, API_VERSION, path);
        Url::parse(&url).map_err(|e| Error::Other(format!("Invalid URL: {e}")))
    }

    /// POST a JSON body and parse the JSON response
    #[instrument(skip(self, body), level = "debug")]
    pub async fn post<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> Result<T> {
        let url = self.build_url(path)?;
        let mut attempts = 0;

        loop {
            debug!("Sending POST request to {}", path);
            let response = self
                .client
                .post(url.clone())
                .query(&[("key", self.api_key.as_str())])
                .json(body)
                .send()
                .await
                .map_err(Error::Http)?;

            let status = response.status();

            if status == StatusCode::TOO_MANY_REQUESTS {
                attempts += 1;

                let retry_after = response
                    .headers()
                    .get("retry-after")
                    .and_then(|h| h.to_str().ok())
                    .and_then(|s| s.parse::<u64>().ok())
                    .unwrap_or(DEFAULT_RETRY_AFTER_SECS);

                let response_text = response.text().await.map_err(Error::Http)?;
                error!("API error: {} - {}", status, response_text);

                if attempts > MAX_RETRIES {
                    return Err(Error::RateLimit { attempts });
                }

                // Exponential backoff with jitter, capped
                let mut delay = retry_after.saturating_mul(u64::pow(2, attempts - 1));
                if delay > 1 {
                    let jitter = thread_rng().gen_range(0.8..1.2);
                    delay = ((delay as f64) * jitter) as u64;
                }
                delay = delay.min(MAX_RETRY_DELAY_SECS);

                debug!(
                    "Rate limited. Retrying after {} seconds (attempt {}/{})",
                    delay, attempts, MAX_RETRIES
                );
                tokio::time::sleep(Duration::from_secs(delay)).await;
                continue;
            }

            let response_text = response.text().await.map_err(Error::Http)?;

            if status.is_success() {
                return serde_json::from_str(&response_text).map_err(|e| {
                    error!("Failed to parse response: {}", e);
                    Error::UnexpectedResponse(format!("Failed to parse response: {e}"))
                });
            }

            error!("API error: {} - {}", status, response_text);
            return if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
                Err(Error::Auth("Invalid API key or credentials".to_string()))
            } else {
                Err(Error::Api {
                    status_code: status.as_u16(),
                    message: response_text,
                })
            };
        }
    }
}
