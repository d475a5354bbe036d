//! State module for run-wide crawl analytics
//!
//! `CrawlState` is the single owner of everything the crawl accumulates:
//! subdomain and outlink counters, the downloaded and trap sets, the longest
//! page record and the word-frequency table. Components receive it by `&mut`
//! and change it only through its methods.

mod crawl_state;

// Re-export main types
pub use crawl_state::{CrawlState, LongestPage};
