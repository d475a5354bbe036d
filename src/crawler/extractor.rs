//! Link and text extraction from fetched pages
//!
//! This module turns a `FetchResult` into:
//! - Absolute URLs for every `<a href>` on the page
//! - Word tokens from the visible text, folded into the crawl analytics
//!
//! Parsing happens in two stages. Content that is not clean UTF-8 (or carries
//! NUL bytes) gets one recovery pass that keeps only 7-bit ASCII bytes. A page
//! that still yields nothing is skipped; extraction never fails the crawl.

use crate::corpus::FetchResult;
use crate::state::CrawlState;
use scraper::{Html, Selector};
use thiserror::Error;
use url::Url;

/// Why a byte buffer could not be parsed as markup
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarkupError {
    #[error("content is not valid UTF-8 (valid up to byte {0})")]
    Encoding(usize),

    #[error("content contains NUL bytes")]
    NulByte,

    #[error("document is empty")]
    Empty,
}

/// Outcome of parsing a page
#[derive(Debug)]
pub enum PageParse {
    /// Parsed as delivered
    Parsed(Html),
    /// Parsed after dropping every non-ASCII (and NUL) byte
    Recovered(Html),
    /// Unusable even after recovery
    Failed(MarkupError),
}

impl PageParse {
    /// The parsed document, if any stage succeeded
    pub fn into_document(self) -> Option<Html> {
        match self {
            Self::Parsed(doc) | Self::Recovered(doc) => Some(doc),
            Self::Failed(_) => None,
        }
    }

    pub fn is_recovered(&self) -> bool {
        matches!(self, Self::Recovered(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// Parses raw page bytes, retrying once on ASCII-only content
pub fn parse_page(content: &[u8]) -> PageParse {
    match parse_markup(content) {
        Ok(doc) => PageParse::Parsed(doc),
        Err(first) => {
            tracing::debug!("Initial parse failed ({}), retrying with ASCII only", first);
            match parse_markup(&ascii_only(content)) {
                Ok(doc) => PageParse::Recovered(doc),
                Err(e) => PageParse::Failed(e),
            }
        }
    }
}

fn parse_markup(bytes: &[u8]) -> Result<Html, MarkupError> {
    let text = std::str::from_utf8(bytes).map_err(|e| MarkupError::Encoding(e.valid_up_to()))?;

    if text.contains('\0') {
        return Err(MarkupError::NulByte);
    }

    if text.trim().is_empty() {
        return Err(MarkupError::Empty);
    }

    Ok(Html::parse_document(text))
}

/// Keeps bytes in `0x01..=0x7F`
fn ascii_only(bytes: &[u8]) -> Vec<u8> {
    bytes
        .iter()
        .copied()
        .filter(|b| (0x01..=0x7F).contains(b))
        .collect()
}

/// Extracts absolute links from a fetched page and records its words
///
/// # Short Circuits
///
/// Returns no links and leaves `state` untouched when:
/// - the fetch status is 404
/// - the fetch size is zero or the content is only whitespace
/// - the page URL does not parse (links cannot be resolved)
/// - the content cannot be parsed even after ASCII recovery
///
/// Otherwise every token of the page's visible text (scripts and styles
/// removed) is counted and the page competes for the longest-page record.
///
/// # Returns
///
/// Absolute URLs in document order; duplicates are kept.
pub fn extract_links(fetch: &FetchResult, state: &mut CrawlState) -> Vec<String> {
    if fetch.is_not_found()
        || fetch.size_bytes == 0
        || fetch.content.iter().all(u8::is_ascii_whitespace)
    {
        return Vec::new();
    }

    let base_url = match Url::parse(&fetch.url) {
        Ok(url) => url,
        Err(e) => {
            tracing::warn!("Cannot resolve links for page {:?}: {}", fetch.url, e);
            return Vec::new();
        }
    };

    let mut document = match parse_page(&fetch.content) {
        PageParse::Parsed(doc) => doc,
        PageParse::Recovered(doc) => {
            tracing::debug!("Recovered {} by dropping non-ASCII bytes", fetch.url);
            doc
        }
        PageParse::Failed(e) => {
            tracing::warn!("Skipping unparseable page {}: {}", fetch.url, e);
            return Vec::new();
        }
    };

    let links = collect_links(&document, &base_url);

    strip_hidden(&mut document);
    let tokens = tokenize(&visible_text(&document));
    if state.record_page_words(&fetch.url, &tokens) {
        tracing::debug!("New longest page {} ({} words)", fetch.url, tokens.len());
    }

    links
}

/// Resolves every `<a href>` against the page URL
fn collect_links(document: &Html, base_url: &Url) -> Vec<String> {
    let Ok(selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .filter_map(|href| resolve_link(href, base_url))
        .collect()
}

/// Joins an href onto the base URL
///
/// Relative (`b`, `../b`), root-relative (`/b`), protocol-relative
/// (`//host/b`) and absolute hrefs all resolve. Scheme filtering is left to
/// the classifier so rejected schemes still show up as traps.
fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    match base_url.join(href.trim()) {
        Ok(url) => Some(url.to_string()),
        Err(e) => {
            tracing::trace!("Skipping href {:?}: {}", href, e);
            None
        }
    }
}

/// Detaches every `<script>` and `<style>` element from the tree
fn strip_hidden(document: &mut Html) {
    let Ok(selector) = Selector::parse("script, style") else {
        return;
    };

    let hidden: Vec<_> = document.select(&selector).map(|el| el.id()).collect();
    for id in hidden {
        if let Some(mut node) = document.tree.get_mut(id) {
            node.detach();
        }
    }
}

/// Text content of the document, one space between text nodes
fn visible_text(document: &Html) -> String {
    document
        .root_element()
        .text()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Splits text into analytics tokens
///
/// Tokens are whitespace-separated words with surrounding punctuation
/// trimmed, kept only if they are alphanumeric and longer than two
/// characters, then lowercased.
///
/// # Examples
///
/// ```
/// use trap_sieve::crawler::tokenize;
///
/// assert_eq!(
///     tokenize("The Cat sat on the CAT mat."),
///     vec!["the", "cat", "sat", "the", "cat", "mat"]
/// );
/// ```
pub fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|word| word.trim_matches(|c: char| c.is_ascii_punctuation()))
        .filter(|word| word.chars().count() > 2 && word.chars().all(char::is_alphanumeric))
        .map(str::to_lowercase)
        .collect()
}
