//! Plain-text analytics reports
//!
//! Rendering is a pure function of the final `CrawlState`; writing the
//! rendered text to disk is a separate step.

use crate::output::Stopwords;
use crate::state::CrawlState;
use crate::OutputError;
use std::fmt::Write as _;
use std::path::Path;

/// Number of entries in the top-words report
pub const TOP_WORDS: usize = 50;

/// One rendered report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// Short identifier
    pub name: &'static str,
    /// File the report is written to inside the output directory
    pub file_name: &'static str,
    pub body: String,
}

/// The full set of end-of-run reports
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reports {
    /// Hostnames and how many accepted outlinks pointed at each
    pub subdomains: Report,
    /// Page with the most accepted outlinks
    pub most_outlinks: Report,
    /// Every URL the corpus returned content for
    pub downloaded: Report,
    /// Every URL the classifier rejected
    pub traps: Report,
    /// Page with the most words
    pub longest_page: Report,
    /// Most frequent non-stopword tokens
    pub top_words: Report,
}

impl Reports {
    /// All reports, in a fixed order
    pub fn all(&self) -> [&Report; 6] {
        [
            &self.subdomains,
            &self.most_outlinks,
            &self.downloaded,
            &self.traps,
            &self.longest_page,
            &self.top_words,
        ]
    }

    /// Looks a report up by name
    pub fn get(&self, name: &str) -> Option<&Report> {
        self.all().into_iter().find(|r| r.name == name)
    }
}

/// Renders every report from the final crawl state
///
/// # Example
///
/// ```
/// use trap_sieve::output::{render, Stopwords};
/// use trap_sieve::state::CrawlState;
///
/// let reports = render(&CrawlState::new(), &Stopwords::default());
/// assert_eq!(reports.most_outlinks.body, "No pages found\n");
/// ```
pub fn render(state: &CrawlState, stopwords: &Stopwords) -> Reports {
    Reports {
        subdomains: Report {
            name: "subdomains",
            file_name: "subdomains.txt",
            body: render_subdomains(state),
        },
        most_outlinks: Report {
            name: "most_outlinks",
            file_name: "most_outlinks.txt",
            body: render_most_outlinks(state),
        },
        downloaded: Report {
            name: "downloaded",
            file_name: "downloaded.txt",
            body: render_url_list("List of downloaded URLs:", state.downloaded()),
        },
        traps: Report {
            name: "traps",
            file_name: "traps.txt",
            body: render_url_list("List of identified traps:", state.traps()),
        },
        longest_page: Report {
            name: "longest_page",
            file_name: "longest_page.txt",
            body: render_longest_page(state),
        },
        top_words: Report {
            name: "top_words",
            file_name: "top_words.txt",
            body: render_top_words(state, stopwords),
        },
    }
}

fn render_subdomains(state: &CrawlState) -> String {
    let mut out = String::from("Key: subdomain, number of URLs processed\n\n");
    for (host, count) in state.subdomain_counts() {
        let _ = writeln!(out, "{}, {}", host, count);
    }
    out
}

fn render_most_outlinks(state: &CrawlState) -> String {
    // First maximum in iteration order wins ties.
    let best = state
        .outlink_counts()
        .iter()
        .fold(None, |best: Option<(&String, &u64)>, (url, count)| match best {
            Some((_, top)) if count <= top => best,
            _ => Some((url, count)),
        });

    match best {
        Some((url, count)) => format!(
            "The page {} had the most out links, with {} out links.\n",
            url, count
        ),
        None => "No pages found\n".to_string(),
    }
}

fn render_url_list<'a>(header: &str, urls: impl IntoIterator<Item = &'a String>) -> String {
    let mut out = format!("{}\n\n", header);
    for url in urls {
        out.push_str(url);
        out.push('\n');
    }
    out
}

fn render_longest_page(state: &CrawlState) -> String {
    match state.longest_page() {
        Some(page) => format!(
            "The longest page is {}, with {} words.\n",
            page.url, page.word_count
        ),
        None => "No pages found\n".to_string(),
    }
}

fn render_top_words(state: &CrawlState, stopwords: &Stopwords) -> String {
    let mut words: Vec<(&String, &u64)> = state
        .word_frequency()
        .iter()
        .filter(|(word, _)| !stopwords.contains(word))
        .collect();

    // Stable sort: equal counts stay in alphabetical order.
    words.sort_by(|a, b| b.1.cmp(a.1));

    let mut out = format!("Top {} most common words:\n\n", TOP_WORDS);
    for (word, count) in words.into_iter().take(TOP_WORDS) {
        let _ = writeln!(out, "{}, {}", word, count);
    }
    out
}

/// Writes every report into `dir`, creating it if needed
///
/// # Errors
///
/// Returns `OutputError::Write` naming the first report that failed.
pub fn write_reports(reports: &Reports, dir: &Path) -> Result<(), OutputError> {
    std::fs::create_dir_all(dir)?;

    for report in reports.all() {
        std::fs::write(dir.join(report.file_name), report.body.as_bytes()).map_err(|source| {
            OutputError::Write {
                name: report.name.to_string(),
                source,
            }
        })?;
    }

    Ok(())
}
