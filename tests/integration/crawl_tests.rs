//! Integration tests for the crawler
//!
//! These tests drive the full crawl cycle end-to-end against on-disk corpora
//! built in temp directories and against wiremock servers for the HTTP corpus.

use std::collections::{HashMap, VecDeque};
use std::path::Path;
use tempfile::TempDir;
use trap_sieve::config::{load_config, PolicyConfig};
use trap_sieve::corpus::{Corpus, DiskCorpus, HttpCorpus};
use trap_sieve::crawler::{crawl, Coordinator};
use trap_sieve::frontier::{Frontier, MemoryFrontier};
use trap_sieve::output::Stopwords;
use trap_sieve::url::UrlClassifier;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Frontier that remembers every URL offered to it
#[derive(Default)]
struct RecordingFrontier {
    queue: VecDeque<String>,
    added: Vec<String>,
    fetched: usize,
}

impl RecordingFrontier {
    fn seeded(urls: &[&str]) -> Self {
        Self {
            queue: urls.iter().map(|u| u.to_string()).collect(),
            ..Self::default()
        }
    }
}

impl Frontier for RecordingFrontier {
    fn has_next_url(&self) -> bool {
        !self.queue.is_empty()
    }

    fn next_url(&mut self) -> Option<String> {
        let url = self.queue.pop_front()?;
        self.fetched += 1;
        Some(url)
    }

    fn add_url(&mut self, url: &str) {
        self.added.push(url.to_string());
        self.queue.push_back(url.to_string());
    }

    fn fetched(&self) -> usize {
        self.fetched
    }

    fn len(&self) -> usize {
        self.queue.len()
    }
}

/// Writes a disk corpus: `pages` are (scheme-less url, body) pairs
fn write_corpus(root: &Path, pages: &[(&str, &[u8])]) {
    let mut index = HashMap::new();
    for (i, (url, body)) in pages.iter().enumerate() {
        let file = format!("0/{}", i);
        std::fs::create_dir_all(root.join("0")).unwrap();
        std::fs::write(root.join(&file), body).unwrap();
        index.insert(file, url.to_string());
    }
    std::fs::write(
        root.join(DiskCorpus::INDEX_FILE),
        serde_json::to_string(&index).unwrap(),
    )
    .unwrap();
}

fn default_classifier() -> UrlClassifier {
    UrlClassifier::from_policy(&PolicyConfig::default()).unwrap()
}

#[tokio::test]
async fn test_single_link_end_to_end() {
    let dir = TempDir::new().unwrap();
    write_corpus(
        dir.path(),
        &[
            (
                "x.ics.uci.edu/a",
                &b"<html><body><a href=\"/b\">next</a></body></html>"[..],
            ),
            ("x.ics.uci.edu/b", &b"<html></html>"[..]),
        ],
    );
    let corpus = DiskCorpus::open(dir.path()).unwrap();
    let frontier = RecordingFrontier::seeded(&["http://x.ics.uci.edu/a"]);

    let outcome = Coordinator::new(frontier, corpus, default_classifier(), Stopwords::default())
        .run()
        .await;

    assert_eq!(outcome.frontier.added, vec!["http://x.ics.uci.edu/b"]);
    assert_eq!(
        outcome.state.subdomain_counts().get("x.ics.uci.edu"),
        Some(&1)
    );
    assert_eq!(
        outcome.state.outlink_counts().get("http://x.ics.uci.edu/a"),
        Some(&1)
    );
    assert!(outcome.state.traps().is_empty());
    assert_eq!(outcome.pages_crawled, 2);
}

#[tokio::test]
async fn test_disk_crawl_filters_traps() {
    let dir = TempDir::new().unwrap();
    write_corpus(
        dir.path(),
        &[
            (
                "www.ics.uci.edu/",
                &b"<html><body>\
                  <a href=\"/about\">About</a>\
                  <a href=\"/calendar/2020-01-01\">Calendar</a>\
                  <a href=\"/paper.pdf\">Paper</a>\
                  <a href=\"http://www.google.com/\">Elsewhere</a>\
                  <a href=\"/a/b/a/b/\">Loop</a>\
                  </body></html>"[..],
            ),
            (
                "www.ics.uci.edu/about",
                &b"<html><body><p>About the department of information and computer sciences</p>\
                  <a href=\"/\">Home</a></body></html>"[..],
            ),
        ],
    );
    let corpus = DiskCorpus::open(dir.path()).unwrap();
    let frontier = MemoryFrontier::with_seeds(["http://www.ics.uci.edu/"]);

    let outcome = Coordinator::new(frontier, corpus, default_classifier(), Stopwords::default())
        .run()
        .await;

    let traps: Vec<&str> = outcome.state.traps().iter().map(String::as_str).collect();
    assert_eq!(
        traps,
        vec![
            "http://www.google.com/",
            "http://www.ics.uci.edu/a/b/a/b/",
            "http://www.ics.uci.edu/calendar/2020-01-01",
            "http://www.ics.uci.edu/paper.pdf",
        ]
    );

    assert_eq!(outcome.state.downloaded().len(), 2);
    assert_eq!(outcome.pages_crawled, 2);
    assert!(outcome.frontier.is_empty());
    assert!(outcome
        .reports
        .longest_page
        .body
        .contains("http://www.ics.uci.edu/about"));
}

#[tokio::test]
async fn test_invalid_utf8_page_is_recovered() {
    let dir = TempDir::new().unwrap();
    write_corpus(
        dir.path(),
        &[
            (
                "x.ics.uci.edu/a",
                &b"<html><body>caf\xe9 \xff<a href=\"/b\">recovered link</a></body></html>"[..],
            ),
            ("x.ics.uci.edu/b", &b"<html></html>"[..]),
        ],
    );
    let corpus = DiskCorpus::open(dir.path()).unwrap();
    let frontier = RecordingFrontier::seeded(&["http://x.ics.uci.edu/a"]);

    let outcome = Coordinator::new(frontier, corpus, default_classifier(), Stopwords::default())
        .run()
        .await;

    assert_eq!(outcome.frontier.added, vec!["http://x.ics.uci.edu/b"]);
    assert_eq!(outcome.state.word_frequency().get("recovered"), Some(&1));
    assert_eq!(outcome.pages_crawled, 2);
}

#[tokio::test]
async fn test_unreadable_page_yields_nothing() {
    let dir = TempDir::new().unwrap();
    write_corpus(
        dir.path(),
        &[("x.ics.uci.edu/a", &b"   \n\t  "[..]), ("x.ics.uci.edu/b", &b""[..])],
    );
    let corpus = DiskCorpus::open(dir.path()).unwrap();
    let frontier = RecordingFrontier::seeded(&["http://x.ics.uci.edu/a", "http://x.ics.uci.edu/b"]);

    let outcome = Coordinator::new(frontier, corpus, default_classifier(), Stopwords::default())
        .run()
        .await;

    assert!(outcome.frontier.added.is_empty());
    assert!(outcome.state.word_frequency().is_empty());
    assert!(outcome.state.longest_page().is_none());
    assert_eq!(outcome.reports.most_outlinks.body, "No pages found\n");
}

#[tokio::test]
async fn test_crawl_from_config_writes_reports() {
    let corpus_dir = TempDir::new().unwrap();
    write_corpus(
        corpus_dir.path(),
        &[
            (
                "www.ics.uci.edu/",
                &b"<html><body><p>The the the crawler</p>\
                  <a href=\"/news\">News</a>\
                  <a href=\"/search/?q=x\">Search</a></body></html>"[..],
            ),
            (
                "www.ics.uci.edu/news",
                &b"<html><body><p>Crawler news</p></body></html>"[..],
            ),
        ],
    );

    let work_dir = TempDir::new().unwrap();
    let out_dir = work_dir.path().join("analytics");
    let stopwords_path = work_dir.path().join("stopwords.txt");
    std::fs::write(&stopwords_path, "the\n").unwrap();

    let config_path = work_dir.path().join("crawl.toml");
    std::fs::write(
        &config_path,
        format!(
            r#"
[crawler]
seeds = ["http://www.ics.uci.edu/"]

[corpus]
kind = "disk"
root = {:?}

[output]
directory = {:?}
stopwords-path = {:?}
"#,
            corpus_dir.path().display().to_string(),
            out_dir.display().to_string(),
            stopwords_path.display().to_string(),
        ),
    )
    .unwrap();

    let config = load_config(&config_path).unwrap();
    let outcome = crawl(&config).await.unwrap();
    assert_eq!(outcome.pages_crawled, 2);

    let read = |name: &str| std::fs::read_to_string(out_dir.join(name)).unwrap();

    assert_eq!(
        read("subdomains.txt"),
        "Key: subdomain, number of URLs processed\n\nwww.ics.uci.edu, 1\n"
    );
    assert_eq!(
        read("traps.txt"),
        "List of identified traps:\n\nhttp://www.ics.uci.edu/search/?q=x\n"
    );
    assert!(read("downloaded.txt").contains("http://www.ics.uci.edu/news"));
    assert!(read("most_outlinks.txt").contains("http://www.ics.uci.edu/"));

    let top_words = read("top_words.txt");
    assert!(top_words.starts_with("Top 50 most common words:\n\ncrawler, 2\n"));
    assert!(!top_words.contains("the,"));

    assert!(read("longest_page.txt").contains("http://www.ics.uci.edu/, with"));
}

#[tokio::test]
async fn test_crawl_missing_corpus_index() {
    let work_dir = TempDir::new().unwrap();
    let config_path = work_dir.path().join("crawl.toml");
    std::fs::write(
        &config_path,
        format!(
            r#"
[crawler]
seeds = ["http://www.ics.uci.edu/"]

[corpus]
kind = "disk"
root = {:?}

[output]
directory = {:?}
"#,
            work_dir.path().join("missing").display().to_string(),
            work_dir.path().join("out").display().to_string(),
        ),
    )
    .unwrap();

    let config = load_config(&config_path).unwrap();
    let result = crawl(&config).await;

    assert!(matches!(result, Err(trap_sieve::CrawlError::Corpus(_))));
}

fn html(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body.to_string(), "text/html; charset=utf-8")
}

#[tokio::test]
async fn test_http_crawl_single_host() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(
            "<html><body>\
             <a href=\"/about\">About</a>\
             <a href=\"/calendar/2021\">Calendar</a>\
             <a href=\"/logo.png\">Logo</a>\
             </body></html>",
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/about"))
        .respond_with(html("<html><body><a href=\"/\">Home</a></body></html>"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let policy = PolicyConfig {
        allowed_domain: "127.0.0.1".to_string(),
        ..PolicyConfig::default()
    };
    let classifier = UrlClassifier::from_policy(&policy).unwrap();
    let corpus = HttpCorpus::with_client(reqwest::Client::new(), std::time::Duration::ZERO);
    let frontier = MemoryFrontier::with_seeds([format!("{}/", base_url)]);

    let outcome = Coordinator::new(frontier, corpus, classifier, Stopwords::default())
        .run()
        .await;

    assert_eq!(outcome.pages_crawled, 2);
    assert!(outcome
        .state
        .downloaded()
        .contains(&format!("{}/about", base_url)));

    let traps = outcome.state.traps();
    assert!(traps.contains(&format!("{}/calendar/2021", base_url)));
    assert!(traps.contains(&format!("{}/logo.png", base_url)));
    assert_eq!(outcome.state.subdomain_counts().get("127.0.0.1"), Some(&2));
}

#[tokio::test]
async fn test_http_not_found_page() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(404).set_body_raw("<a href=\"/x\">x</a>", "text/html"))
        .mount(&mock_server)
        .await;

    let corpus = HttpCorpus::with_client(reqwest::Client::new(), std::time::Duration::ZERO);
    let result = corpus
        .fetch_url(&format!("{}/gone", mock_server.uri()))
        .await;

    assert!(result.is_not_found());

    let mut state = trap_sieve::CrawlState::new();
    assert!(trap_sieve::extract_links(&result, &mut state).is_empty());
}
