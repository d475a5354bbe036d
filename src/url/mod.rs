//! URL handling module for Trap-Sieve
//!
//! This module provides the URL classifier (crawl scope and trap detection),
//! the named rules it is built from, hostname extraction and the key used by
//! the frontier for duplicate suppression.

mod domain;
mod matcher;
mod normalize;
pub mod rules;

use crate::config::PolicyConfig;
use crate::state::CrawlState;
use crate::ConfigError;
use rules::{
    AnchorDuplicateRule, BlockedHostRule, Candidate, Component, DomainRule, ExtensionRule,
    PatternRule, QueryDensityRule, RepeatingFolderRule, SchemeRule, UrlRule,
};
use std::fmt;

// Re-export main functions
pub use domain::{extract_domain, hostname};
pub use matcher::{exceeds_separator_count, has_repeating_segment, path_extension};
pub use normalize::{frontier_key, strip_scheme};

/// Outcome of classifying one URL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The URL is in scope and does not look like a trap
    Accept,
    /// The URL was rejected by the named rule
    Reject { rule: &'static str },
}

impl Verdict {
    pub fn is_accept(&self) -> bool {
        matches!(self, Self::Accept)
    }

    /// Name of the rule that rejected the URL, if any
    pub fn rule(&self) -> Option<&'static str> {
        match self {
            Self::Accept => None,
            Self::Reject { rule } => Some(rule),
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Accept => write!(f, "ACCEPT"),
            Self::Reject { rule } => write!(f, "REJECT ({})", rule),
        }
    }
}

/// Rule name reported for input that does not parse as an absolute URL
pub const MALFORMED: &str = "malformed";

/// Decides whether a URL should be crawled
///
/// Rules are evaluated in order and evaluation stops at the first rule that
/// rejects; the order only affects which rule is blamed, never the final
/// accept/reject answer. A URL that fails to parse is rejected, so the
/// classifier fails closed.
pub struct UrlClassifier {
    rules: Vec<Box<dyn UrlRule>>,
}

impl UrlClassifier {
    /// Creates a classifier from an explicit rule list
    pub fn with_rules(rules: Vec<Box<dyn UrlRule>>) -> Self {
        Self { rules }
    }

    /// Builds the standard rule pipeline from policy data
    ///
    /// # Rule Order
    ///
    /// 1. `scheme` - http or https only
    /// 2. `domain` - hostname contains the allowed domain
    /// 3. `extension` - no binary/media/document extensions
    /// 4. `path-pattern`, `repeating-folder`, `query-pattern`,
    ///    `query-density`, `fragment-pattern`, `blocked-host`,
    ///    `anchor-duplicate` - trap heuristics
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidPattern` if a policy regex does not compile.
    pub fn from_policy(policy: &PolicyConfig) -> Result<Self, ConfigError> {
        let compile = |name: &'static str, component: Component, patterns: &[String]| {
            PatternRule::compile(name, component, patterns)
                .map_err(|e| ConfigError::InvalidPattern(format!("{}: {}", name, e)))
        };

        let rules: Vec<Box<dyn UrlRule>> = vec![
            Box::new(SchemeRule),
            Box::new(DomainRule::new(&policy.allowed_domain)),
            Box::new(ExtensionRule::new(&policy.blocked_extensions)),
            Box::new(compile("path-pattern", Component::Path, &policy.path_patterns[..])?),
            Box::new(RepeatingFolderRule),
            Box::new(compile("query-pattern", Component::Query, &policy.query_patterns[..])?),
            Box::new(QueryDensityRule::new(policy.max_query_separators)),
            Box::new(compile(
                "fragment-pattern",
                Component::Fragment,
                &policy.fragment_patterns[..],
            )?),
            Box::new(BlockedHostRule::new(&policy.blocked_hosts)),
            Box::new(AnchorDuplicateRule),
        ];

        Ok(Self::with_rules(rules))
    }

    /// Names of the rules in evaluation order
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Classifies a URL without touching any crawl state
    pub fn classify(&self, url: &str) -> Verdict {
        let Some(candidate) = Candidate::parse(url.trim()) else {
            return Verdict::Reject { rule: MALFORMED };
        };

        self.rules
            .iter()
            .find(|rule| rule.rejects(&candidate))
            .map_or(Verdict::Accept, |rule| Verdict::Reject { rule: rule.name() })
    }

    /// Returns true if the URL should be crawled
    ///
    /// A rejected, non-empty URL is recorded in the trap set of `state`.
    pub fn is_valid(&self, url: &str, state: &mut CrawlState) -> bool {
        match self.classify(url) {
            Verdict::Accept => true,
            Verdict::Reject { rule } => {
                tracing::debug!("Rejected {} ({})", url, rule);
                if !url.is_empty() {
                    state.record_trap(url);
                }
                false
            }
        }
    }
}

impl fmt::Debug for UrlClassifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UrlClassifier")
            .field("rules", &self.rule_names())
            .finish()
    }
}
