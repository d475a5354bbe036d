use std::collections::{BTreeMap, BTreeSet};

/// The page with the most words seen so far
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LongestPage {
    pub url: String,
    pub word_count: usize,
}

/// Accumulated analytics for one crawl run
///
/// Counters only ever grow. Ordered collections are used so that iteration,
/// and therefore every rendered report, is deterministic for a given run.
#[derive(Debug, Clone, Default)]
pub struct CrawlState {
    /// Hostname -> accepted outlinks pointing at it
    subdomain_counts: BTreeMap<String, u64>,

    /// Source page -> accepted outlinks found on it
    outlink_counts: BTreeMap<String, u64>,

    /// URLs the corpus returned content for
    downloaded: BTreeSet<String>,

    /// URLs rejected by the classifier
    traps: BTreeSet<String>,

    /// Rejections counted per occurrence, repeats included
    rejections: u64,

    longest_page: Option<LongestPage>,

    /// Token -> occurrences across all pages (stopwords included)
    word_frequency: BTreeMap<String, u64>,
}

impl CrawlState {
    /// Creates an empty state for a new run
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a URL the corpus returned a result for
    pub fn record_download(&mut self, url: &str) {
        self.downloaded.insert(url.to_string());
    }

    /// Records a URL rejected by the classifier
    pub fn record_trap(&mut self, url: &str) {
        self.rejections += 1;
        self.traps.insert(url.to_string());
    }

    /// Records one accepted outlink from `source` to a page on `target_host`
    ///
    /// The source always gains an outlink; the host counter is skipped when
    /// the target has no hostname.
    pub fn record_outlink(&mut self, source: &str, target_host: Option<&str>) {
        *self.outlink_counts.entry(source.to_string()).or_insert(0) += 1;

        if let Some(host) = target_host.filter(|h| !h.is_empty()) {
            *self.subdomain_counts.entry(host.to_string()).or_insert(0) += 1;
        }
    }

    /// Folds one page's qualifying tokens into the analytics
    ///
    /// Every token bumps its frequency. The page replaces the longest-page
    /// record only if it has strictly more tokens, so ties keep the page seen
    /// first.
    ///
    /// # Returns
    ///
    /// `true` if this page became the new longest page
    pub fn record_page_words(&mut self, url: &str, tokens: &[String]) -> bool {
        for token in tokens {
            *self.word_frequency.entry(token.clone()).or_insert(0) += 1;
        }

        let current = self.longest_page.as_ref().map_or(0, |p| p.word_count);
        if tokens.len() > current {
            self.longest_page = Some(LongestPage {
                url: url.to_string(),
                word_count: tokens.len(),
            });
            true
        } else {
            false
        }
    }

    pub fn subdomain_counts(&self) -> &BTreeMap<String, u64> {
        &self.subdomain_counts
    }

    pub fn outlink_counts(&self) -> &BTreeMap<String, u64> {
        &self.outlink_counts
    }

    pub fn downloaded(&self) -> &BTreeSet<String> {
        &self.downloaded
    }

    pub fn traps(&self) -> &BTreeSet<String> {
        &self.traps
    }

    /// Number of rejected links, counting every occurrence
    pub fn rejections(&self) -> u64 {
        self.rejections
    }

    pub fn longest_page(&self) -> Option<&LongestPage> {
        self.longest_page.as_ref()
    }

    pub fn word_frequency(&self) -> &BTreeMap<String, u64> {
        &self.word_frequency
    }

    /// True if nothing has been recorded yet
    pub fn is_empty(&self) -> bool {
        self.subdomain_counts.is_empty()
            && self.outlink_counts.is_empty()
            && self.downloaded.is_empty()
            && self.traps.is_empty()
            && self.longest_page.is_none()
            && self.word_frequency.is_empty()
    }
}
