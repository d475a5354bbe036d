//! Run summary printed after a crawl
//!
//! This module condenses the final `CrawlState` into a handful of counts
//! and prints them to stdout.

use crate::state::CrawlState;

/// Crawl statistics summary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlStatistics {
    /// Number of frontier URLs the loop processed
    pub pages_crawled: usize,

    /// URLs still waiting in the frontier when the run stopped
    pub pending: usize,

    /// Number of URLs the corpus returned a result for
    pub downloaded: usize,

    /// Number of distinct URLs rejected by the classifier
    pub traps: usize,

    /// Rejected links, counting every occurrence
    pub rejections: u64,

    /// Number of distinct hostnames among accepted outlinks
    pub subdomains: usize,

    /// Total accepted outlinks across all pages
    pub total_outlinks: u64,

    /// Number of distinct tokens seen
    pub distinct_words: usize,
}

impl CrawlStatistics {
    /// Summarizes a finished crawl
    pub fn from_state(state: &CrawlState, pages_crawled: usize, pending: usize) -> Self {
        Self {
            pages_crawled,
            pending,
            downloaded: state.downloaded().len(),
            traps: state.traps().len(),
            rejections: state.rejections(),
            subdomains: state.subdomain_counts().len(),
            total_outlinks: state.outlink_counts().values().sum(),
            distinct_words: state.word_frequency().len(),
        }
    }

    /// Share of classified links that were rejected, in percent
    ///
    /// Both sides count link occurrences: every accepted outlink and every
    /// rejection, repeats included.
    pub fn trap_rate(&self) -> f64 {
        let classified = self.total_outlinks + self.rejections;
        if classified > 0 {
            (self.rejections as f64 / classified as f64) * 100.0
        } else {
            0.0
        }
    }
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &CrawlStatistics) {
    println!("=== Crawl Statistics ===\n");

    println!("Overview:");
    println!("  Pages crawled: {}", stats.pages_crawled);
    println!("  Pages downloaded: {}", stats.downloaded);
    println!("  Still queued: {}", stats.pending);
    println!();

    println!("Links:");
    println!("  Accepted outlinks: {}", stats.total_outlinks);
    println!("  Subdomains reached: {}", stats.subdomains);
    println!("  Traps identified: {}", stats.traps);
    println!("  Rejected links: {}", stats.rejections);
    println!();

    println!("Distinct words: {}", stats.distinct_words);
    println!("Trap Rate: {:.1}%", stats.trap_rate());
}
