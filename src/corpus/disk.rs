use crate::corpus::{Corpus, FetchResult};
use crate::url::strip_scheme;
use crate::CorpusError;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Offline corpus stored on disk
///
/// The root directory holds the raw pages plus an index file mapping each
/// page's relative path (e.g. `"0/12"`) to the scheme-less URL it was
/// downloaded from (e.g. `"www.ics.uci.edu/about"`).
#[derive(Debug, Clone)]
pub struct DiskCorpus {
    root: PathBuf,

    /// Scheme-less URL -> path relative to `root`
    url_to_file: HashMap<String, String>,
}

impl DiskCorpus {
    /// Name of the index file inside the corpus root
    pub const INDEX_FILE: &'static str = "bookkeeping.json";

    /// Opens the corpus at `root`, reading its index
    ///
    /// # Errors
    ///
    /// Returns `CorpusError` if the index cannot be read or is not a JSON
    /// object of strings.
    pub fn open(root: impl AsRef<Path>) -> Result<Self, CorpusError> {
        let root = root.as_ref().to_path_buf();
        let index_path = root.join(Self::INDEX_FILE);
        let display = index_path.display().to_string();

        let raw = std::fs::read_to_string(&index_path).map_err(|source| CorpusError::Io {
            path: display.clone(),
            source,
        })?;
        let index: HashMap<String, String> =
            serde_json::from_str(&raw).map_err(|source| CorpusError::Index {
                path: display,
                source,
            })?;

        tracing::info!("Loaded corpus index with {} pages", index.len());
        Ok(Self::from_index(root, index))
    }

    /// Builds a corpus from an already-loaded `file -> url` index
    pub fn from_index(root: impl Into<PathBuf>, index: HashMap<String, String>) -> Self {
        let url_to_file = index
            .into_iter()
            .map(|(file, url)| (url.trim().to_string(), file))
            .collect();

        Self {
            root: root.into(),
            url_to_file,
        }
    }

    /// Number of pages in the index
    pub fn len(&self) -> usize {
        self.url_to_file.len()
    }

    pub fn is_empty(&self) -> bool {
        self.url_to_file.is_empty()
    }
}

impl Corpus for DiskCorpus {
    async fn fetch_url(&self, url: &str) -> FetchResult {
        let Some(file) = self.file_name(url) else {
            tracing::debug!("{} is not in the corpus", url);
            return FetchResult::empty(404);
        };

        match tokio::fs::read(self.root.join(&file)).await {
            Ok(content) => FetchResult::new(url, content, 200),
            Err(e) => {
                tracing::warn!("Failed to read {} for {}: {}", file, url, e);
                FetchResult::empty(404)
            }
        }
    }

    fn file_name(&self, url: &str) -> Option<String> {
        self.url_to_file.get(strip_scheme(url)).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn corpus_with_page(body: &[u8]) -> (TempDir, DiskCorpus) {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("0")).unwrap();
        std::fs::write(dir.path().join("0/1"), body).unwrap();
        std::fs::write(
            dir.path().join(DiskCorpus::INDEX_FILE),
            r#"{"0/1": "x.ics.uci.edu/a", "0/2": "x.ics.uci.edu/missing-file"}"#,
        )
        .unwrap();

        let corpus = DiskCorpus::open(dir.path()).unwrap();
        (dir, corpus)
    }

    #[test]
    fn test_file_name_ignores_scheme() {
        let (_dir, corpus) = corpus_with_page(b"<html></html>");

        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus.file_name("http://x.ics.uci.edu/a").as_deref(), Some("0/1"));
        assert_eq!(corpus.file_name("https://x.ics.uci.edu/a").as_deref(), Some("0/1"));
        assert_eq!(corpus.file_name("http://x.ics.uci.edu/b"), None);
    }

    #[tokio::test]
    async fn test_fetch_indexed_page() {
        let (_dir, corpus) = corpus_with_page(b"<html>hi</html>");

        let result = corpus.fetch_url("http://x.ics.uci.edu/a").await;
        assert_eq!(result.url, "http://x.ics.uci.edu/a");
        assert_eq!(result.content, b"<html>hi</html>");
        assert_eq!(result.http_status, 200);
        assert_eq!(result.size_bytes, 15);
    }

    #[tokio::test]
    async fn test_fetch_unknown_page_is_empty() {
        let (_dir, corpus) = corpus_with_page(b"<html></html>");

        let result = corpus.fetch_url("http://x.ics.uci.edu/b").await;
        assert!(result.is_empty());
        assert!(result.is_not_found());
    }

    #[tokio::test]
    async fn test_fetch_indexed_but_missing_file_is_empty() {
        let (_dir, corpus) = corpus_with_page(b"<html></html>");

        let result = corpus.fetch_url("http://x.ics.uci.edu/missing-file").await;
        assert!(result.is_empty());
    }

    #[test]
    fn test_open_without_index_fails() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            DiskCorpus::open(dir.path()),
            Err(CorpusError::Io { .. })
        ));
    }

    #[test]
    fn test_open_with_malformed_index_fails() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(DiskCorpus::INDEX_FILE), "[1, 2, 3]").unwrap();
        assert!(matches!(
            DiskCorpus::open(dir.path()),
            Err(CorpusError::Index { .. })
        ));
    }
}
