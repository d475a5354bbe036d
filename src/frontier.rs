//! URL frontier: the queue of pages still to crawl
//!
//! The crawl loop talks to the frontier only through the [`Frontier`] trait.
//! [`MemoryFrontier`] is the in-process implementation: a FIFO queue that
//! suppresses URLs it has already accepted, keyed by
//! [`frontier_key`](crate::url::frontier_key).

use crate::url::frontier_key;
use std::collections::{HashSet, VecDeque};

/// Queue of URLs waiting to be fetched
pub trait Frontier {
    /// True while at least one URL is waiting
    fn has_next_url(&self) -> bool;

    /// Pops the next URL to fetch
    fn next_url(&mut self) -> Option<String>;

    /// Offers a URL; duplicates are the frontier's to drop
    fn add_url(&mut self, url: &str);

    /// Number of URLs handed out so far
    fn fetched(&self) -> usize;

    /// Number of URLs still queued
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// FIFO frontier with duplicate suppression
#[derive(Debug, Default)]
pub struct MemoryFrontier {
    queue: VecDeque<String>,

    /// Keys of every URL ever accepted, including ones already popped
    seen: HashSet<String>,

    fetched: usize,
}

impl MemoryFrontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a frontier preloaded with seed URLs
    pub fn with_seeds<I, S>(seeds: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut frontier = Self::new();
        for seed in seeds {
            frontier.add_url(seed.as_ref());
        }
        frontier
    }
}

impl Frontier for MemoryFrontier {
    fn has_next_url(&self) -> bool {
        !self.queue.is_empty()
    }

    fn next_url(&mut self) -> Option<String> {
        let url = self.queue.pop_front()?;
        self.fetched += 1;
        Some(url)
    }

    fn add_url(&mut self, url: &str) {
        let url = url.trim();
        if url.is_empty() {
            return;
        }

        let key = frontier_key(url).unwrap_or_else(|| url.to_string());
        if self.seen.insert(key) {
            self.queue.push_back(url.to_string());
        } else {
            tracing::trace!("Frontier already has {}", url);
        }
    }

    fn fetched(&self) -> usize {
        self.fetched
    }

    fn len(&self) -> usize {
        self.queue.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fifo_order() {
        let mut frontier = MemoryFrontier::with_seeds([
            "http://x.ics.uci.edu/1",
            "http://x.ics.uci.edu/2",
            "http://x.ics.uci.edu/3",
        ]);

        assert_eq!(frontier.next_url().as_deref(), Some("http://x.ics.uci.edu/1"));
        assert_eq!(frontier.next_url().as_deref(), Some("http://x.ics.uci.edu/2"));
        assert_eq!(frontier.next_url().as_deref(), Some("http://x.ics.uci.edu/3"));
        assert_eq!(frontier.next_url(), None);
    }

    #[test]
    fn test_duplicates_suppressed() {
        let mut frontier = MemoryFrontier::new();
        frontier.add_url("http://x.ics.uci.edu/a");
        frontier.add_url("https://x.ics.uci.edu/a/");
        frontier.add_url("http://x.ics.uci.edu/a#top");

        assert_eq!(frontier.len(), 1);
    }

    #[test]
    fn test_popped_urls_not_requeued() {
        let mut frontier = MemoryFrontier::with_seeds(["http://x.ics.uci.edu/a"]);
        frontier.next_url();
        frontier.add_url("http://x.ics.uci.edu/a");

        assert!(!frontier.has_next_url());
        assert!(frontier.is_empty());
    }

    #[test]
    fn test_counters() {
        let mut frontier =
            MemoryFrontier::with_seeds(["http://x.ics.uci.edu/a", "http://x.ics.uci.edu/b"]);
        assert_eq!(frontier.fetched(), 0);
        assert_eq!(frontier.len(), 2);

        frontier.next_url();
        assert_eq!(frontier.fetched(), 1);
        assert_eq!(frontier.len(), 1);
    }

    #[test]
    fn test_blank_url_ignored() {
        let mut frontier = MemoryFrontier::new();
        frontier.add_url("   ");
        assert!(frontier.is_empty());
    }
}
