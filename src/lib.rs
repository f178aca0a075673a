//! # prospect: company-profile extraction from websites
//!
//! This crate scrapes a company's landing page, asks a Gemini model to fill
//! a fixed six-question questionnaire (mission, offerings, founding,
//! headquarters, leadership, awards) from the page text, and, while any
//! answer is missing, autonomously fetches keyword-relevant same-site pages,
//! accumulating text and re-extracting until the questionnaire is complete or
//! candidates run out. Results are persisted as a two-column CSV, one row per
//! seed URL.
//!
//! ## Features
//!
//! - Adaptive completion loop with a well-defined termination policy
//! - Structured per-field answers: completeness is a structural predicate,
//!   not a substring search over free-form prose
//! - Deterministic candidate selection (stable ordering, canonical dedup)
//! - Bounded retry with backoff for seed fetches and rate-limited API calls
//! - Failure containment at seed granularity: a dead site yields a failure
//!   row, never an aborted batch
//!
//! ## Example
//!
//! ```rust,no_run
//! use prospect::config::CrawlConfig;
//! use prospect::extractor::QuestionnaireExtractor;
//! use prospect::fetch::PageFetcher;
//! use prospect::gemini;
//! use prospect::orchestrator::CrawlOrchestrator;
//! use url::Url;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = CrawlConfig::builder()
//!         .seed(Url::parse("https://www.example.com")?)
//!         .build();
//!
//!     let fetcher = PageFetcher::new(&config.user_agent, config.fetch_timeout)?;
//!     let client = gemini::Client::new("your-api-key");
//!     let extractor = QuestionnaireExtractor::new(client, config.model.clone());
//!
//!     let orchestrator = CrawlOrchestrator::new(fetcher, extractor, config);
//!     for outcome in orchestrator.run().await {
//!         println!("{}: {}", outcome.url, outcome.extracted_info);
//!     }
//!     Ok(())
//! }
//! ```

mod error;

pub mod config;
pub mod extractor;
pub mod fetch;
pub mod gemini;
pub mod links;
pub mod normalize;
pub mod orchestrator;
pub mod questionnaire;
pub mod report;

pub use error::{Error, Result};

/// Commonly used types, re-exported for convenience
pub mod prelude {
    pub use crate::config::CrawlConfig;
    pub use crate::error::{Error, Result};
    pub use crate::extractor::{Extract, QuestionnaireExtractor};
    pub use crate::fetch::{Fetch, PageFetcher};
    pub use crate::orchestrator::CrawlOrchestrator;
    pub use crate::questionnaire::{Answer, Questionnaire};
    pub use crate::report::SeedOutcome;
}
