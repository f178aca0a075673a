//! The adaptive completion loop
//!
//! Drives one seed URL at a time through fetch, normalize, and extract, then
//! expands over keyword-relevant candidate links harvested from the seed page
//! while the questionnaire is still incomplete. Text accumulates
//! monotonically across expansion steps and every re-extraction runs over the
//! full accumulated text, which keeps facts spread across pages visible to
//! the model at the cost of larger prompts; the candidate set is small enough
//! for that trade to hold.
//!
//! All failure is contained at seed granularity: a seed that cannot be
//! fetched or extracted yields a failure-string outcome, never an error that
//! aborts the batch.

use std::collections::HashSet;

use tokio::time::sleep;
use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::config::CrawlConfig;
use crate::extractor::Extract;
use crate::fetch::{Fetch, FetchError, Page};
use crate::links::{canonicalize, filter_relevant};
use crate::normalize;
use crate::questionnaire::Questionnaire;
use crate::report::SeedOutcome;

/// Outcome string for a seed whose landing page never came back
pub const FETCH_FAILED: &str = "Failed to fetch content.";

/// Outcome string for a seed whose first extraction call failed
pub const EXTRACT_FAILED: &str = "Failed to extract content.";

/// Per-seed crawl state. Created at the start of a seed, discarded once its
/// outcome is emitted; nothing crosses seed boundaries.
struct ExtractionState {
    /// Every normalized page text seen so far, concatenated in visit order.
    /// Grows monotonically, never truncated.
    accumulated_text: String,
    /// Canonical forms of URLs already fetched for this seed
    visited: HashSet<String>,
    /// Latest answer set, replaced wholesale on each re-extraction
    answers: Questionnaire,
}

/// Drives the crawl for a configured list of seeds
pub struct CrawlOrchestrator<F, E> {
    fetcher: F,
    extractor: E,
    config: CrawlConfig,
}

impl<F: Fetch, E: Extract> CrawlOrchestrator<F, E> {
    /// Create an orchestrator over the given collaborators
    pub fn new(fetcher: F, extractor: E, config: CrawlConfig) -> Self {
        Self {
            fetcher,
            extractor,
            config,
        }
    }

    /// Process every configured seed in order, with the courtesy delay in
    /// between. Always returns one outcome per seed.
    #[instrument(skip(self))]
    pub async fn run(&self) -> Vec<SeedOutcome> {
        let total = self.config.seeds.len();
        let mut outcomes = Vec::with_capacity(total);

        for (index, seed) in self.config.seeds.iter().enumerate() {
            if index > 0 && !self.config.seed_delay.is_zero() {
                sleep(self.config.seed_delay).await;
            }
            info!(%seed, "processing seed {}/{}", index + 1, total);
            outcomes.push(self.process_seed(seed).await);
        }

        outcomes
    }

    /// Run the state machine for one seed:
    /// fetch -> extract -> complete, or expand until complete or exhausted.
    #[instrument(skip(self), fields(seed = %seed))]
    pub async fn process_seed(&self, seed: &Url) -> SeedOutcome {
        let page = match self.fetch_seed(seed).await {
            Ok(page) => page,
            Err(err) => {
                warn!(%seed, error = %err, "giving up on seed");
                return SeedOutcome {
                    url: seed.to_string(),
                    extracted_info: FETCH_FAILED.to_string(),
                };
            }
        };

        let seed_page = normalize::normalize(&page);

        let answers = match self.extractor.extract(&seed_page.text).await {
            Ok(answers) => answers,
            Err(err) => {
                warn!(%seed, error = %err, "seed extraction failed");
                return SeedOutcome {
                    url: seed.to_string(),
                    extracted_info: EXTRACT_FAILED.to_string(),
                };
            }
        };

        if answers.is_complete() {
            info!(%seed, "questionnaire complete from landing page");
            return SeedOutcome {
                url: seed.to_string(),
                extracted_info: answers.raw,
            };
        }

        // Candidate discovery happens once, from the seed page only
        let candidates = filter_relevant(&seed_page.links, seed, &self.config.keywords);
        info!(
            %seed,
            missing = ?answers.missing(),
            candidates = candidates.len(),
            "questionnaire incomplete, expanding"
        );

        let mut state = ExtractionState {
            accumulated_text: seed_page.text,
            visited: HashSet::from([canonicalize(seed)]),
            answers,
        };
        self.expand(&mut state, candidates).await;

        SeedOutcome {
            url: seed.to_string(),
            extracted_info: state.answers.raw,
        }
    }

    /// Visit candidates in order, accumulating text and re-extracting, until
    /// the questionnaire completes, the list is exhausted, or the visit
    /// ceiling is hit. Exhaustion with partial answers is a normal outcome.
    async fn expand(&self, state: &mut ExtractionState, candidates: Vec<Url>) {
        let mut visits = 0;

        for url in candidates {
            if visits >= self.config.max_candidate_pages {
                debug!("candidate visit ceiling reached");
                break;
            }
            if !state.visited.insert(canonicalize(&url)) {
                continue;
            }
            visits += 1;

            info!(%url, "scraping additional link");
            let page = match self.fetcher.fetch(&url).await {
                Ok(page) => page,
                Err(err) => {
                    debug!(%url, error = %err, "candidate fetch failed, skipping");
                    continue;
                }
            };

            let extra = normalize::normalize(&page);
            state.accumulated_text.push('\n');
            state.accumulated_text.push_str(&extra.text);

            match self.extractor.extract(&state.accumulated_text).await {
                Ok(answers) => {
                    state.answers = answers;
                    if state.answers.is_complete() {
                        info!(%url, "questionnaire complete");
                        break;
                    }
                    debug!(missing = ?state.answers.missing(), "still incomplete");
                }
                Err(err) => {
                    warn!(
                        %url,
                        error = %err,
                        "extraction failed during expansion, keeping last answers"
                    );
                    break;
                }
            }
        }
    }

    /// Fetch the seed page with bounded retry and exponential backoff.
    /// Candidate pages get a single attempt; their failure is cheap.
    async fn fetch_seed(&self, seed: &Url) -> Result<Page, FetchError> {
        let attempts = self.config.fetch_attempts.max(1);
        let mut delay = self.config.retry_base_delay;

        for attempt in 1..attempts {
            match self.fetcher.fetch(seed).await {
                Ok(page) => return Ok(page),
                Err(err) => {
                    warn!(%seed, attempt, error = %err, "seed fetch failed, retrying");
                    if !delay.is_zero() {
                        sleep(delay).await;
                    }
                    delay = delay.saturating_mul(2);
                }
            }
        }

        self.fetcher.fetch(seed).await
    }
}
