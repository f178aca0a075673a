//! # Crawl Configuration Module
//!
//! This module provides configuration options for a profile-extraction run,
//! including the seed URLs, the topical keyword vocabulary used to select
//! follow-up pages, fetch timeouts and retry policy, and the per-seed
//! expansion ceiling. It uses a builder pattern for flexible configuration.
//!
//! Nothing here is global: the orchestrator receives a `CrawlConfig` at
//! construction, which keeps runs reproducible and lets tests swap in
//! arbitrary seeds, keywords, and limits.

use std::time::Duration;

use url::Url;

/// Default User-Agent header. The target sites serve their full markup to
/// mainstream browsers, so the fetcher identifies as one.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";

/// The topical vocabulary used to judge whether a discovered link is worth
/// fetching when the questionnaire is still incomplete.
pub fn default_keywords() -> Vec<String> {
    [
        "about-us",
        "about",
        "our-story",
        "company",
        "mission",
        "core-values",
        "leadership",
        "our-team",
        "executives",
        "founders",
        "history",
        "company-info",
        "vision",
        "values",
        "executive-team",
        "corporate-governance",
        "awards",
        "recognitions",
        "awards-and-recognition",
        "team",
        "headquarters",
        "location",
        "contact",
        "overview",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

/// Configuration for a profile-extraction run
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Seed URLs to profile, processed strictly in order
    pub seeds: Vec<Url>,

    /// Keyword vocabulary for candidate-link selection
    pub keywords: Vec<String>,

    /// Gemini model used for extraction
    pub model: String,

    /// User agent sent with every page fetch
    pub user_agent: String,

    /// Per-request timeout for page fetches
    pub fetch_timeout: Duration,

    /// Attempts for the seed-page fetch (candidate fetches get one attempt)
    pub fetch_attempts: u32,

    /// Base delay for fetch retries, doubled on each attempt
    pub retry_base_delay: Duration,

    /// Courtesy delay between seeds
    pub seed_delay: Duration,

    /// Maximum candidate pages visited per seed, on top of the implicit
    /// bound from keyword filtering
    pub max_candidate_pages: usize,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            seeds: Vec::new(),
            keywords: default_keywords(),
            model: "gemini-2.0-flash".to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            fetch_timeout: Duration::from_secs(10),
            fetch_attempts: 3,
            retry_base_delay: Duration::from_millis(500),
            seed_delay: Duration::from_secs(2),
            max_candidate_pages: 8,
        }
    }
}

/// Builder for CrawlConfig
#[derive(Debug, Default)]
pub struct CrawlConfigBuilder {
    config: CrawlConfig,
}

impl CrawlConfigBuilder {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self {
            config: CrawlConfig::default(),
        }
    }

    /// Set the seed URLs
    pub fn seeds(mut self, seeds: Vec<Url>) -> Self {
        self.config.seeds = seeds;
        self
    }

    /// Add a single seed URL
    pub fn seed(mut self, seed: Url) -> Self {
        self.config.seeds.push(seed);
        self
    }

    /// Replace the keyword vocabulary
    pub fn keywords(mut self, keywords: Vec<String>) -> Self {
        self.config.keywords = keywords;
        self
    }

    /// Set the Gemini model used for extraction
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    /// Set the user agent sent with page fetches
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Set the per-request fetch timeout
    pub fn fetch_timeout(mut self, timeout: Duration) -> Self {
        self.config.fetch_timeout = timeout;
        self
    }

    /// Set the number of attempts for the seed-page fetch
    pub fn fetch_attempts(mut self, attempts: u32) -> Self {
        self.config.fetch_attempts = attempts.max(1);
        self
    }

    /// Set the base delay for fetch retries
    pub fn retry_base_delay(mut self, delay: Duration) -> Self {
        self.config.retry_base_delay = delay;
        self
    }

    /// Set the courtesy delay between seeds
    pub fn seed_delay(mut self, delay: Duration) -> Self {
        self.config.seed_delay = delay;
        self
    }

    /// Set the maximum candidate pages visited per seed
    pub fn max_candidate_pages(mut self, max: usize) -> Self {
        self.config.max_candidate_pages = max;
        self
    }

    /// Build the configuration
    pub fn build(self) -> CrawlConfig {
        self.config
    }
}

impl CrawlConfig {
    /// Create a new builder
    pub fn builder() -> CrawlConfigBuilder {
        CrawlConfigBuilder::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_overrides_defaults() {
        let config = CrawlConfig::builder()
            .seed(Url::parse("https://example.com").unwrap())
            .model("gemini-1.5-pro")
            .max_candidate_pages(3)
            .fetch_attempts(0)
            .build();

        assert_eq!(config.seeds.len(), 1);
        assert_eq!(config.model, "gemini-1.5-pro");
        assert_eq!(config.max_candidate_pages, 3);
        // At least one attempt is always made
        assert_eq!(config.fetch_attempts, 1);
        assert_eq!(config.keywords, default_keywords());
    }

    #[test]
    fn default_vocabulary_covers_questionnaire_topics() {
        let keywords = default_keywords();
        for expected in ["about", "leadership", "headquarters", "awards"] {
            assert!(keywords.iter().any(|k| k == expected), "missing {expected}");
        }
    }
}
