use crate::config::types::{Config, CorpusConfig, CorpusKind, CrawlerConfig, OutputConfig, PolicyConfig};
use crate::ConfigError;
use regex::Regex;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_corpus_config(&config.corpus)?;
    validate_policy(&config.policy)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates crawl loop configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.seeds.is_empty() {
        return Err(ConfigError::Validation(
            "at least one seed URL is required".to_string(),
        ));
    }

    for seed in &config.seeds {
        let url = Url::parse(seed)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid seed URL '{}': {}", seed, e)))?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ConfigError::Validation(format!(
                "Seed URL '{}' must use http or https",
                seed
            )));
        }
    }

    if config.progress_interval < 1 {
        return Err(ConfigError::Validation(
            "progress_interval must be >= 1".to_string(),
        ));
    }

    if config.max_pages == Some(0) {
        return Err(ConfigError::Validation(
            "max_pages must be >= 1 when set".to_string(),
        ));
    }

    Ok(())
}

/// Validates corpus configuration
fn validate_corpus_config(config: &CorpusConfig) -> Result<(), ConfigError> {
    match config.kind {
        CorpusKind::Disk => {
            if config.root.as_deref().map_or(true, str::is_empty) {
                return Err(ConfigError::Validation(
                    "a disk corpus requires a non-empty root".to_string(),
                ));
            }
        }
        CorpusKind::Http => {
            if config.timeout_secs < 1 {
                return Err(ConfigError::Validation(format!(
                    "timeout_secs must be >= 1, got {}",
                    config.timeout_secs
                )));
            }
            if config.user_agent.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "user_agent cannot be empty".to_string(),
                ));
            }
        }
    }

    Ok(())
}

/// Validates the classification policy
fn validate_policy(policy: &PolicyConfig) -> Result<(), ConfigError> {
    validate_domain_suffix(&policy.allowed_domain)?;

    for ext in &policy.blocked_extensions {
        if ext.is_empty() || ext.starts_with('.') {
            return Err(ConfigError::InvalidPattern(format!(
                "Blocked extension '{}' must be non-empty and given without the dot",
                ext
            )));
        }
    }

    for pattern in policy
        .path_patterns
        .iter()
        .chain(&policy.query_patterns)
        .chain(&policy.fragment_patterns)
    {
        Regex::new(pattern)
            .map_err(|e| ConfigError::InvalidPattern(format!("'{}': {}", pattern, e)))?;
    }

    if policy.blocked_hosts.iter().any(|h| h.is_empty()) {
        return Err(ConfigError::InvalidPattern(
            "Blocked host substrings cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates the allowed domain suffix (a leading dot is permitted)
fn validate_domain_suffix(suffix: &str) -> Result<(), ConfigError> {
    let domain = suffix.strip_prefix('.').unwrap_or(suffix);

    if domain.is_empty() {
        return Err(ConfigError::Validation(
            "allowed_domain cannot be empty".to_string(),
        ));
    }

    if !domain
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
    {
        return Err(ConfigError::InvalidPattern(format!(
            "Domain '{}' contains invalid characters",
            suffix
        )));
    }

    if domain.ends_with('.') || domain.starts_with('-') || domain.contains("..") {
        return Err(ConfigError::InvalidPattern(format!(
            "Domain '{}' is not a valid hostname suffix",
            suffix
        )));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.directory.is_empty() {
        return Err(ConfigError::Validation(
            "output directory cannot be empty".to_string(),
        ));
    }

    if config.stopwords_path.as_deref() == Some("") {
        return Err(ConfigError::Validation(
            "stopwords_path cannot be empty when set".to_string(),
        ));
    }

    Ok(())
}
