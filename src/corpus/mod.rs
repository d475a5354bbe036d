//! Corpus collaborators: where page content comes from
//!
//! The crawl loop only sees the [`Corpus`] trait. Two implementations ship
//! with the crate:
//! - [`DiskCorpus`]: an offline snapshot indexed by `bookkeeping.json`
//! - [`HttpCorpus`]: live fetching with a per-host politeness delay

mod disk;
mod http;

pub use disk::DiskCorpus;
pub use http::{build_http_client, HttpCorpus};

use std::future::Future;

/// Raw result of fetching one URL
///
/// An empty `url` means the corpus had nothing for the request; the crawl
/// loop only marks non-empty results as downloaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResult {
    /// URL the content was served for (after redirects for live fetches)
    pub url: String,
    pub content: Vec<u8>,
    pub http_status: u16,
    pub size_bytes: u64,
}

impl FetchResult {
    /// Creates a result whose size is the content length
    pub fn new(url: impl Into<String>, content: Vec<u8>, http_status: u16) -> Self {
        let size_bytes = content.len() as u64;
        Self {
            url: url.into(),
            content,
            http_status,
            size_bytes,
        }
    }

    /// A result for a URL the corpus could not serve
    pub fn empty(http_status: u16) -> Self {
        Self::new(String::new(), Vec::new(), http_status)
    }

    /// True if the corpus returned nothing for the request
    pub fn is_empty(&self) -> bool {
        self.url.is_empty()
    }

    pub fn is_not_found(&self) -> bool {
        self.http_status == 404
    }
}

/// Source of page content for the crawl loop
pub trait Corpus {
    /// Fetches a URL; failures are reported inside the result, never as errors
    fn fetch_url(&self, url: &str) -> impl Future<Output = FetchResult>;

    /// Name under which the corpus stores `url`, or `None` if it cannot
    ///
    /// The crawl loop only enqueues links for which this returns `Some`.
    fn file_name(&self, url: &str) -> Option<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_result_size_follows_content() {
        let result = FetchResult::new("http://x.ics.uci.edu/a", b"<html></html>".to_vec(), 200);
        assert_eq!(result.size_bytes, 13);
        assert!(!result.is_empty());
        assert!(!result.is_not_found());
    }

    #[test]
    fn test_empty_fetch_result() {
        let result = FetchResult::empty(404);
        assert!(result.is_empty());
        assert!(result.is_not_found());
        assert_eq!(result.size_bytes, 0);
    }
}
