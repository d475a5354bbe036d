use serde::Deserialize;

/// Main configuration structure for Trap-Sieve
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawler: CrawlerConfig,
    pub corpus: CorpusConfig,
    #[serde(default)]
    pub policy: PolicyConfig,
    pub output: OutputConfig,
}

/// Crawl loop configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// URLs the frontier starts with
    pub seeds: Vec<String>,

    /// Stop after this many pages have been popped from the frontier
    #[serde(rename = "max-pages", default)]
    pub max_pages: Option<usize>,

    /// Emit a progress summary every N pages
    #[serde(rename = "progress-interval", default = "default_progress_interval")]
    pub progress_interval: usize,
}

/// Which corpus implementation backs the crawl
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorpusKind {
    /// Offline corpus: a directory with a bookkeeping.json index
    Disk,
    /// Live corpus fetched over HTTP
    Http,
}

/// Corpus (fetcher) configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CorpusConfig {
    pub kind: CorpusKind,

    /// Root directory of a disk corpus
    #[serde(default)]
    pub root: Option<String>,

    /// Minimum time between two requests to the same host (milliseconds)
    #[serde(rename = "politeness-delay-ms", default = "default_politeness_delay_ms")]
    pub politeness_delay_ms: u64,

    /// Whole-request timeout for the HTTP corpus
    #[serde(rename = "timeout-secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,
}

/// URL classification policy
///
/// Every field falls back to the tuning the crawler was built around, so an
/// empty `[policy]` table (or none at all) gives the stock behavior.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    /// Substring every accepted hostname must contain
    #[serde(rename = "allowed-domain")]
    pub allowed_domain: String,

    /// File extensions (without the dot) that are never fetched
    #[serde(rename = "blocked-extensions")]
    pub blocked_extensions: Vec<String>,

    /// Regexes searched in the lowercased path
    #[serde(rename = "path-patterns")]
    pub path_patterns: Vec<String>,

    /// Regexes searched in the lowercased query string
    #[serde(rename = "query-patterns")]
    pub query_patterns: Vec<String>,

    /// Regexes searched in the fragment
    #[serde(rename = "fragment-patterns")]
    pub fragment_patterns: Vec<String>,

    /// Hostname substrings that are always rejected
    #[serde(rename = "blocked-hosts")]
    pub blocked_hosts: Vec<String>,

    /// A query with more than this many `&`, `=` or `%` is treated as generated
    #[serde(rename = "max-query-separators")]
    pub max_query_separators: usize,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            allowed_domain: ".ics.uci.edu".to_string(),
            blocked_extensions: to_strings(DEFAULT_BLOCKED_EXTENSIONS),
            path_patterns: to_strings(&["/search/", "/calendar/", "/date/", "/filter/", "query"]),
            query_patterns: to_strings(&["sid=", "year=", "date=", "sort="]),
            fragment_patterns: to_strings(&["^respond$", "^comment", "^branding", "year"]),
            blocked_hosts: to_strings(&["fano"]),
            max_query_separators: 2,
        }
    }
}

/// Report output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Directory the six analytics reports are written to
    pub directory: String,

    /// Stopword list, one token per line; the bundled list is used when absent
    #[serde(rename = "stopwords-path", default)]
    pub stopwords_path: Option<String>,
}

const DEFAULT_BLOCKED_EXTENSIONS: &[&str] = &[
    "css", "js", "bmp", "gif", "jpg", "jpeg", "ico", "png", "tif", "tiff", "mid", "mp2", "mp3",
    "mp4", "wav", "avi", "mov", "mpeg", "ram", "m4v", "mkv", "ogg", "ogv", "pdf", "ps", "eps",
    "tex", "ppt", "pptx", "doc", "docx", "xls", "xlsx", "names", "data", "dat", "exe", "bz2",
    "tar", "msi", "bin", "7z", "psd", "dmg", "iso", "epub", "dll", "cnf", "tgz", "sha1", "thmx",
    "mso", "arff", "rtf", "jar", "csv", "rm", "smil", "wmv", "swf", "wma", "zip", "rar", "gz",
    "sql", "ds_store",
];

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn default_progress_interval() -> usize {
    10
}

fn default_politeness_delay_ms() -> u64 {
    500
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("trap-sieve/{}", env!("CARGO_PKG_VERSION"))
}
