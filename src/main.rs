//! # prospect CLI
//!
//! Command-line front end for the profile extractor: collect seed URLs from
//! the command line or a file, run the adaptive crawl sequentially across
//! them, and write the per-seed results to a CSV file.
//!
//! The Gemini API key is the only secret and comes from the `GEMINI_API_KEY`
//! environment variable (a `.env` file is honored). Everything else is
//! ordinary CLI configuration.

use std::path::PathBuf;

use anyhow::{Context, anyhow, bail};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use url::Url;

use prospect::config::CrawlConfig;
use prospect::extractor::QuestionnaireExtractor;
use prospect::fetch::PageFetcher;
use prospect::gemini;
use prospect::orchestrator::CrawlOrchestrator;
use prospect::report;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Extract company profiles from websites with a Gemini-driven questionnaire",
    long_about = None
)]
struct Cli {
    /// Seed URLs to profile
    seeds: Vec<String>,

    /// File with one seed URL per line (# starts a comment)
    #[arg(long, value_name = "FILE")]
    seeds_file: Option<PathBuf>,

    /// Output CSV path
    #[arg(short, long, default_value = "company_results.csv")]
    output: PathBuf,

    /// Gemini model used for extraction
    #[arg(short, long, default_value = "gemini-2.0-flash")]
    model: String,

    /// Courtesy delay between seeds, in seconds
    #[arg(long, default_value_t = 2)]
    delay: u64,

    /// Maximum candidate pages visited per seed
    #[arg(long, default_value_t = 8)]
    max_pages: usize,

    /// Per-request fetch timeout, in seconds
    #[arg(long, default_value_t = 10)]
    timeout: u64,

    /// Replace the default link-relevance vocabulary (repeatable)
    #[arg(short, long = "keyword", value_name = "WORD")]
    keywords: Vec<String>,
}

fn collect_seeds(cli: &Cli) -> anyhow::Result<Vec<Url>> {
    let mut raw = cli.seeds.clone();

    if let Some(path) = &cli.seeds_file {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("reading seeds file {}", path.display()))?;
        raw.extend(
            contents
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#'))
                .map(String::from),
        );
    }

    raw.iter()
        .map(|s| Url::parse(s).with_context(|| format!("invalid seed URL {s:?}")))
        .collect()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("prospect=info")),
        )
        .init();

    let cli = Cli::parse();

    let api_key = std::env::var("GEMINI_API_KEY")
        .map_err(|_| anyhow!("GEMINI_API_KEY environment variable not set"))?;

    let seeds = collect_seeds(&cli)?;
    if seeds.is_empty() {
        bail!("no seed URLs given; pass them as arguments or via --seeds-file");
    }

    let mut builder = CrawlConfig::builder()
        .seeds(seeds)
        .model(cli.model.as_str())
        .seed_delay(std::time::Duration::from_secs(cli.delay))
        .fetch_timeout(std::time::Duration::from_secs(cli.timeout))
        .max_candidate_pages(cli.max_pages);
    if !cli.keywords.is_empty() {
        builder = builder.keywords(cli.keywords.clone());
    }
    let config = builder.build();

    let fetcher = PageFetcher::new(&config.user_agent, config.fetch_timeout)?;
    let client = gemini::Client::new(api_key);
    let extractor = QuestionnaireExtractor::new(client, config.model.clone());

    info!(seeds = config.seeds.len(), model = %config.model, "starting extraction run");
    let orchestrator = CrawlOrchestrator::new(fetcher, extractor, config);
    let outcomes = orchestrator.run().await;

    report::write_csv(&cli.output, &outcomes)?;
    println!(
        "Extraction complete. Data saved to {} ({} rows).",
        cli.output.display(),
        outcomes.len()
    );

    Ok(())
}
