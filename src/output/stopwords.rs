//! Stopword list for the top-words report

use crate::OutputError;
use std::collections::HashSet;
use std::path::Path;

const BUNDLED: &str = include_str!("stopwords.txt");

/// Words excluded from the top-words report
///
/// Lookups are case-insensitive; entries are stored lowercased.
#[derive(Debug, Clone, Default)]
pub struct Stopwords {
    words: HashSet<String>,
}

impl Stopwords {
    /// Parses one word per line, ignoring blank lines and `#` comments
    pub fn parse(text: &str) -> Self {
        let words = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_lowercase)
            .collect();
        Self { words }
    }

    /// Loads a stopword file from disk
    pub fn load(path: &Path) -> Result<Self, OutputError> {
        let text = std::fs::read_to_string(path)?;
        Ok(Self::parse(&text))
    }

    /// The built-in English list
    pub fn bundled() -> Self {
        Self::parse(BUNDLED)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&word.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_skips_comments_and_blanks() {
        let words = Stopwords::parse("# header\n\nThe\n  and  \n");
        assert_eq!(words.len(), 2);
        assert!(words.contains("the"));
        assert!(words.contains("AND"));
        assert!(!words.contains("header"));
    }

    #[test]
    fn test_bundled_list() {
        let words = Stopwords::bundled();
        assert!(!words.is_empty());
        assert!(words.contains("the"));
        assert!(words.contains("would"));
        assert!(!words.contains("crawler"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "alpha\nbeta").unwrap();

        let words = Stopwords::load(file.path()).unwrap();
        assert_eq!(words.len(), 2);
        assert!(words.contains("beta"));
    }

    #[test]
    fn test_load_missing_file() {
        let result = Stopwords::load(Path::new("/nonexistent/stopwords.txt"));
        assert!(matches!(result, Err(OutputError::Io(_))));
    }
}
