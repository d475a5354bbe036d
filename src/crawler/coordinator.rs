//! Crawler coordinator - the main crawl loop
//!
//! The coordinator owns the frontier, the corpus, the classifier and the
//! run's `CrawlState`. It processes one URL at a time:
//! - Pop a URL and fetch it through the corpus
//! - Record the download and extract links and words
//! - Classify each link and enqueue the accepted, storable ones
//! - Render the reports once the frontier runs dry

use crate::corpus::Corpus;
use crate::crawler::extractor::extract_links;
use crate::frontier::Frontier;
use crate::output::{render, Reports, Stopwords};
use crate::state::CrawlState;
use crate::url::{hostname, UrlClassifier};
use std::time::Instant;

/// Everything a finished crawl leaves behind
#[derive(Debug)]
pub struct CrawlOutcome<F> {
    /// Final analytics state
    pub state: CrawlState,
    /// Reports rendered from `state`
    pub reports: Reports,
    /// The frontier as the loop left it
    pub frontier: F,
    /// Number of URLs popped from the frontier
    pub pages_crawled: usize,
}

/// Main crawl loop
pub struct Coordinator<F, C> {
    frontier: F,
    corpus: C,
    classifier: UrlClassifier,
    stopwords: Stopwords,
    state: CrawlState,
    max_pages: Option<usize>,
    progress_interval: usize,
}

impl<F: Frontier, C: Corpus> Coordinator<F, C> {
    /// Creates a coordinator with a fresh `CrawlState`
    pub fn new(frontier: F, corpus: C, classifier: UrlClassifier, stopwords: Stopwords) -> Self {
        Self {
            frontier,
            corpus,
            classifier,
            stopwords,
            state: CrawlState::new(),
            max_pages: None,
            progress_interval: 10,
        }
    }

    /// Stops the crawl after `max_pages` URLs have been processed
    pub fn with_max_pages(mut self, max_pages: Option<usize>) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Logs a progress summary every `interval` pages
    pub fn with_progress_interval(mut self, interval: usize) -> Self {
        self.progress_interval = interval.max(1);
        self
    }

    /// Runs the crawl until the frontier is exhausted
    ///
    /// Consumes the coordinator, so the state is rendered exactly once.
    pub async fn run(mut self) -> CrawlOutcome<F> {
        tracing::info!("Starting crawl with {} queued URLs", self.frontier.len());

        let mut pages_crawled = 0;
        let start_time = Instant::now();

        while self.frontier.has_next_url() {
            if self.max_pages.is_some_and(|max| pages_crawled >= max) {
                tracing::info!("Reached page limit of {}, stopping", pages_crawled);
                break;
            }

            let Some(url) = self.frontier.next_url() else {
                break;
            };

            tracing::info!(
                "Fetching URL {} ... Fetched: {}, Queue size: {}",
                url,
                self.frontier.fetched(),
                self.frontier.len()
            );

            self.process_url(&url).await;
            pages_crawled += 1;

            if pages_crawled % self.progress_interval == 0 {
                let elapsed = start_time.elapsed();
                tracing::info!(
                    "Progress: {} pages crawled, {} in frontier, {} traps, {:.2} pages/sec",
                    pages_crawled,
                    self.frontier.len(),
                    self.state.traps().len(),
                    pages_crawled as f64 / elapsed.as_secs_f64().max(f64::EPSILON)
                );
            }
        }

        tracing::info!(
            "Crawl completed: {} pages crawled in {:?}",
            pages_crawled,
            start_time.elapsed()
        );

        let reports = render(&self.state, &self.stopwords);

        CrawlOutcome {
            state: self.state,
            reports,
            frontier: self.frontier,
            pages_crawled,
        }
    }

    /// Fetches one URL and handles every link found on it
    async fn process_url(&mut self, url: &str) {
        let fetch = self.corpus.fetch_url(url).await;

        if !fetch.is_empty() {
            self.state.record_download(&fetch.url);
        }

        let links = extract_links(&fetch, &mut self.state);
        let mut accepted = 0;
        for link in &links {
            if self.handle_link(url, link) {
                accepted += 1;
            }
        }

        tracing::debug!(
            "{}: {} links found, {} enqueued",
            url,
            links.len(),
            accepted
        );
    }

    /// Classifies one outlink and enqueues it if it is crawlable
    ///
    /// # Returns
    ///
    /// `true` if the link was passed to the frontier
    fn handle_link(&mut self, source: &str, link: &str) -> bool {
        if !self.classifier.is_valid(link, &mut self.state) {
            return false;
        }

        if self.corpus.file_name(link).is_none() {
            tracing::trace!("{} is valid but not storable", link);
            return false;
        }

        let host = hostname(link);
        self.state.record_outlink(source, host.as_deref());
        self.frontier.add_url(link);
        true
    }
}
