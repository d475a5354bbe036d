//! Crawler module: extraction and the crawl loop
//!
//! This module contains:
//! - Link and word extraction from fetched pages
//! - The coordinator that drives frontier, corpus and classifier
//! - `crawl`, which wires everything from a `Config`

mod coordinator;
mod extractor;

pub use coordinator::{Coordinator, CrawlOutcome};
pub use extractor::{extract_links, parse_page, tokenize, MarkupError, PageParse};

use crate::config::{Config, CorpusKind};
use crate::corpus::{DiskCorpus, HttpCorpus};
use crate::frontier::MemoryFrontier;
use crate::output::{write_reports, Stopwords};
use crate::url::UrlClassifier;
use crate::{ConfigError, Result};
use std::path::Path;

/// Runs a complete crawl described by `config`
///
/// This is the main entry point for a crawl. It will:
/// 1. Build the classifier from the policy
/// 2. Load the stopword list (bundled list if none is configured)
/// 3. Seed an in-memory frontier
/// 4. Open the configured corpus
/// 5. Run the crawl loop to exhaustion
/// 6. Write the six reports to the output directory
///
/// # Returns
///
/// * `Ok(CrawlOutcome)` - Crawl finished and reports were written
/// * `Err(CrawlError)` - Setup failed or reports could not be written
pub async fn crawl(config: &Config) -> Result<CrawlOutcome<MemoryFrontier>> {
    let classifier = UrlClassifier::from_policy(&config.policy)?;

    let stopwords = match &config.output.stopwords_path {
        Some(path) => Stopwords::load(Path::new(path))?,
        None => Stopwords::bundled(),
    };
    tracing::debug!("Using {} stopwords", stopwords.len());

    let frontier = MemoryFrontier::with_seeds(&config.crawler.seeds);

    let outcome = match config.corpus.kind {
        CorpusKind::Disk => {
            let root = config.corpus.root.as_deref().ok_or_else(|| {
                ConfigError::Validation("a disk corpus requires a root".to_string())
            })?;
            let corpus = DiskCorpus::open(root)?;
            Coordinator::new(frontier, corpus, classifier, stopwords)
                .with_max_pages(config.crawler.max_pages)
                .with_progress_interval(config.crawler.progress_interval)
                .run()
                .await
        }
        CorpusKind::Http => {
            let corpus = HttpCorpus::new(&config.corpus)?;
            Coordinator::new(frontier, corpus, classifier, stopwords)
                .with_max_pages(config.crawler.max_pages)
                .with_progress_interval(config.crawler.progress_interval)
                .run()
                .await
        }
    };

    let output_dir = Path::new(&config.output.directory);
    write_reports(&outcome.reports, output_dir)?;
    tracing::info!("Reports written to {}", output_dir.display());

    Ok(outcome)
}
