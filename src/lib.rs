//! Trap-Sieve: link discovery and trap filtering for a restricted-domain crawler
//!
//! This crate extracts links from fetched pages, classifies them against a
//! crawl policy (scope, binary extensions, crawler traps), feeds accepted links
//! back into a frontier and accumulates run-wide analytics that are rendered
//! into plain-text reports when the run ends.

pub mod config;
pub mod corpus;
pub mod crawler;
pub mod frontier;
pub mod output;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Trap-Sieve operations
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Corpus error: {0}")]
    Corpus(#[from] CorpusError),

    #[error("Output error: {0}")]
    Output(#[from] OutputError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid policy pattern: {0}")]
    InvalidPattern(String),
}

/// Errors raised while opening an on-disk corpus
#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("Failed to read corpus index {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Malformed corpus index {path}: {source}")]
    Index {
        path: String,
        source: serde_json::Error,
    },
}

/// Errors raised while loading stopwords or writing reports
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to write report {name}: {source}")]
    Write {
        name: String,
        source: std::io::Error,
    },
}

/// Result type alias for Trap-Sieve operations
pub type Result<T> = std::result::Result<T, CrawlError>;

// Re-export commonly used types
pub use config::Config;
pub use corpus::{Corpus, FetchResult};
pub use crawler::{extract_links, Coordinator, CrawlOutcome};
pub use frontier::{Frontier, MemoryFrontier};
pub use output::{render, Reports, Stopwords};
pub use state::CrawlState;
pub use url::{UrlClassifier, Verdict};
