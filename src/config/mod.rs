//! Configuration module for Trap-Sieve
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use trap_sieve::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("crawl.toml")).unwrap();
//! println!("Allowed domain: {}", config.policy.allowed_domain);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CorpusConfig, CorpusKind, CrawlerConfig, OutputConfig, PolicyConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
