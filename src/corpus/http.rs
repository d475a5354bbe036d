//! Live HTTP corpus
//!
//! This module fetches pages over the network for the crawl loop:
//! - Building the HTTP client with the configured user agent and timeouts
//! - Enforcing a minimum delay between requests to the same host
//! - Mapping responses (and failures) onto `FetchResult`

use crate::config::CorpusConfig;
use crate::corpus::{Corpus, FetchResult};
use crate::url::{extract_domain, frontier_key};
use reqwest::{redirect::Policy, Client};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use url::Url;

/// Builds an HTTP client from the corpus configuration
///
/// # Example
///
/// ```no_run
/// use trap_sieve::config::{CorpusConfig, CorpusKind};
/// use trap_sieve::corpus::build_http_client;
///
/// let config = CorpusConfig {
///     kind: CorpusKind::Http,
///     root: None,
///     politeness_delay_ms: 500,
///     timeout_secs: 30,
///     user_agent: "trap-sieve/0.1".to_string(),
/// };
///
/// let client = build_http_client(&config).unwrap();
/// ```
pub fn build_http_client(config: &CorpusConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.timeout_secs.min(10)))
        .redirect(Policy::limited(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Corpus that fetches pages over HTTP
pub struct HttpCorpus {
    client: Client,

    /// Minimum time between two requests to the same host
    politeness_delay: Duration,

    /// Host -> time its most recent request was (or will be) sent
    last_request: Mutex<HashMap<String, Instant>>,
}

impl HttpCorpus {
    /// Creates a corpus from configuration
    pub fn new(config: &CorpusConfig) -> Result<Self, reqwest::Error> {
        Ok(Self::with_client(
            build_http_client(config)?,
            Duration::from_millis(config.politeness_delay_ms),
        ))
    }

    /// Creates a corpus around an existing client
    pub fn with_client(client: Client, politeness_delay: Duration) -> Self {
        Self {
            client,
            politeness_delay,
            last_request: Mutex::new(HashMap::new()),
        }
    }

    /// Reserves the next request slot for `host` and returns how long to wait for it
    fn reserve_slot(&self, host: &str, now: Instant) -> Duration {
        let mut last_request = self
            .last_request
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let wait = last_request
            .get(host)
            .map(|last| (*last + self.politeness_delay).saturating_duration_since(now))
            .unwrap_or_default();

        last_request.insert(host.to_string(), now + wait);
        wait
    }
}

impl Corpus for HttpCorpus {
    /// Fetches a URL
    ///
    /// # Response Mapping
    ///
    /// | Condition | Result |
    /// |-----------|--------|
    /// | Any HTTP response | final URL, status, body |
    /// | Non-HTML Content-Type | final URL, status, empty body |
    /// | Timeout / connection / body error | empty result, status 0 |
    async fn fetch_url(&self, url: &str) -> FetchResult {
        if let Some(host) = Url::parse(url).ok().as_ref().and_then(extract_domain) {
            let wait = self.reserve_slot(&host, Instant::now());
            if !wait.is_zero() {
                tracing::trace!("Waiting {:?} before requesting {}", wait, host);
                tokio::time::sleep(wait).await;
            }
        }

        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                if e.is_timeout() {
                    tracing::warn!("Request timeout for {}", url);
                } else if e.is_connect() {
                    tracing::warn!("Connection failed for {}", url);
                } else {
                    tracing::warn!("Request failed for {}: {}", url, e);
                }
                return FetchResult::empty(0);
            }
        };

        let status = response.status().as_u16();
        let final_url = response.url().to_string();

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_lowercase();

        if !content_type.is_empty() && !content_type.contains("html") {
            tracing::debug!("Skipping body of {} ({})", final_url, content_type);
            return FetchResult::new(final_url, Vec::new(), status);
        }

        match response.bytes().await {
            Ok(body) => FetchResult::new(final_url, body.to_vec(), status),
            Err(e) => {
                tracing::warn!("Failed to read body of {}: {}", final_url, e);
                FetchResult::empty(0)
            }
        }
    }

    fn file_name(&self, url: &str) -> Option<String> {
        let parsed = Url::parse(url.trim()).ok()?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return None;
        }
        frontier_key(url)
    }
}
