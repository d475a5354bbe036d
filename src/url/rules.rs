//! Named URL rules evaluated in order by the classifier
//!
//! Each rule answers one question about a parsed candidate URL: "does this
//! rule reject it?". Keeping them as separate objects lets each heuristic be
//! tested on its own and lets the classifier report which rule fired.

use crate::url::matcher::{exceeds_separator_count, has_repeating_segment, path_extension};
use regex::Regex;
use std::collections::HashSet;
use url::Url;

/// A URL broken into the components the rules inspect
///
/// Path, query and fragment are lowercased once up front; the raw string is
/// kept for rules that look at the URL as written.
#[derive(Debug)]
pub struct Candidate<'a> {
    pub raw: &'a str,
    pub scheme: String,
    pub host: Option<String>,
    pub path: String,
    pub query: String,
    pub fragment: String,
}

impl<'a> Candidate<'a> {
    /// Parses `raw` into a candidate, or `None` if it is not an absolute URL
    pub fn parse(raw: &'a str) -> Option<Self> {
        let url = Url::parse(raw).ok()?;
        Some(Self {
            raw,
            scheme: url.scheme().to_lowercase(),
            host: url.host_str().map(|h| h.to_lowercase()),
            path: url.path().to_lowercase(),
            query: url.query().unwrap_or_default().to_lowercase(),
            fragment: url.fragment().unwrap_or_default().to_lowercase(),
        })
    }
}

/// A single named classification rule
pub trait UrlRule: Send + Sync {
    /// Short identifier reported when the rule rejects a URL
    fn name(&self) -> &'static str;

    /// Returns true if the candidate must not be crawled
    fn rejects(&self, candidate: &Candidate<'_>) -> bool;
}

/// Only `http` and `https` are crawlable
#[derive(Debug, Default)]
pub struct SchemeRule;

impl UrlRule for SchemeRule {
    fn name(&self) -> &'static str {
        "scheme"
    }

    fn rejects(&self, candidate: &Candidate<'_>) -> bool {
        !matches!(candidate.scheme.as_str(), "http" | "https")
    }
}

/// Hostname must exist and contain the allowed domain suffix
#[derive(Debug)]
pub struct DomainRule {
    suffix: String,
}

impl DomainRule {
    pub fn new(suffix: &str) -> Self {
        Self {
            suffix: suffix.to_lowercase(),
        }
    }
}

impl UrlRule for DomainRule {
    fn name(&self) -> &'static str {
        "domain"
    }

    fn rejects(&self, candidate: &Candidate<'_>) -> bool {
        match candidate.host.as_deref() {
            Some(host) if !host.is_empty() => !host.contains(&self.suffix),
            _ => true,
        }
    }
}

/// Path must not end in a binary, media or document extension
#[derive(Debug)]
pub struct ExtensionRule {
    extensions: HashSet<String>,
}

impl ExtensionRule {
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            extensions: extensions
                .into_iter()
                .map(|e| e.as_ref().to_lowercase())
                .collect(),
        }
    }
}

impl UrlRule for ExtensionRule {
    fn name(&self) -> &'static str {
        "extension"
    }

    fn rejects(&self, candidate: &Candidate<'_>) -> bool {
        path_extension(&candidate.path).is_some_and(|ext| self.extensions.contains(&ext))
    }
}

/// Which URL component a [`PatternRule`] searches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Component {
    Path,
    Query,
    Fragment,
}

/// Rejects when any regex matches anywhere in one URL component
#[derive(Debug)]
pub struct PatternRule {
    name: &'static str,
    component: Component,
    patterns: Vec<Regex>,
}

impl PatternRule {
    pub fn new(name: &'static str, component: Component, patterns: Vec<Regex>) -> Self {
        Self {
            name,
            component,
            patterns,
        }
    }

    /// Compiles `patterns` into a rule
    pub fn compile<S: AsRef<str>>(
        name: &'static str,
        component: Component,
        patterns: &[S],
    ) -> Result<Self, regex::Error> {
        let patterns = patterns
            .iter()
            .map(|p| Regex::new(p.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(name, component, patterns))
    }
}

impl UrlRule for PatternRule {
    fn name(&self) -> &'static str {
        self.name
    }

    fn rejects(&self, candidate: &Candidate<'_>) -> bool {
        let text = match self.component {
            Component::Path => &candidate.path,
            Component::Query => &candidate.query,
            Component::Fragment => &candidate.fragment,
        };
        self.patterns.iter().any(|re| re.is_match(text))
    }
}

/// Rejects paths that repeat a folder segment
#[derive(Debug, Default)]
pub struct RepeatingFolderRule;

impl UrlRule for RepeatingFolderRule {
    fn name(&self) -> &'static str {
        "repeating-folder"
    }

    fn rejects(&self, candidate: &Candidate<'_>) -> bool {
        has_repeating_segment(&candidate.path)
    }
}

/// Rejects query strings with too many `&`, `=` or `%`
#[derive(Debug)]
pub struct QueryDensityRule {
    max: usize,
}

impl QueryDensityRule {
    pub fn new(max: usize) -> Self {
        Self { max }
    }
}

impl UrlRule for QueryDensityRule {
    fn name(&self) -> &'static str {
        "query-density"
    }

    fn rejects(&self, candidate: &Candidate<'_>) -> bool {
        exceeds_separator_count(&candidate.query, &['&', '=', '%'], self.max)
    }
}

/// Rejects hostnames containing a blocklisted substring
#[derive(Debug)]
pub struct BlockedHostRule {
    substrings: Vec<String>,
}

impl BlockedHostRule {
    pub fn new<I, S>(substrings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            substrings: substrings
                .into_iter()
                .map(|s| s.as_ref().to_lowercase())
                .collect(),
        }
    }
}

impl UrlRule for BlockedHostRule {
    fn name(&self) -> &'static str {
        "blocked-host"
    }

    fn rejects(&self, candidate: &Candidate<'_>) -> bool {
        let host = candidate.host.as_deref().unwrap_or_default();
        self.substrings.iter().any(|s| host.contains(s.as_str()))
    }
}

/// Rejects `page.html#anchor` links, which duplicate `page.html`
#[derive(Debug, Default)]
pub struct AnchorDuplicateRule;

impl UrlRule for AnchorDuplicateRule {
    fn name(&self) -> &'static str {
        "anchor-duplicate"
    }

    fn rejects(&self, candidate: &Candidate<'_>) -> bool {
        candidate.raw.contains("html#")
    }
}
