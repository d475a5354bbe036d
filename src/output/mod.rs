//! Output module for crawl analytics
//!
//! This module handles:
//! - Rendering the six end-of-run reports from a `CrawlState`
//! - Writing rendered reports to an output directory
//! - Loading the stopword list used by the top-words report
//! - Printing a short run summary to stdout

mod report;
pub mod stats;
mod stopwords;

pub use report::{render, write_reports, Report, Reports, TOP_WORDS};
pub use stats::{print_statistics, CrawlStatistics};
pub use stopwords::Stopwords;
