//! The reference word corpus.
//!
//! Loaded once at startup from a newline-delimited word list and
//! immutable afterward, so any number of synthesis attempts can share
//! it by reference without locking.

use std::fs;
use std::path::Path;

use thiserror::Error;

/// Errors from loading a corpus file.
#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("failed to read corpus file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("corpus file {path} contains no words")]
    Empty { path: String },
}

/// An immutable ordered list of candidate words.
///
/// The engine trusts the file precondition (each line one word of
/// lowercase a-z) and performs no validation beyond skipping empty
/// lines.
#[derive(Debug, Clone)]
pub struct Corpus {
    words: Vec<String>,
}

impl Corpus {
    /// Build a corpus from an in-memory word list.
    ///
    /// This is the constructor tests use with small synthetic corpora.
    #[must_use]
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: words.into_iter().map(Into::into).collect(),
        }
    }

    /// Load a corpus from a newline-delimited word file.
    pub fn load(path: &Path) -> Result<Self, CorpusError> {
        let contents = fs::read_to_string(path).map_err(|source| CorpusError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let words: Vec<String> = contents
            .lines()
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();
        if words.is_empty() {
            return Err(CorpusError::Empty {
                path: path.display().to_string(),
            });
        }
        Ok(Self { words })
    }

    /// All words, in file order.
    #[must_use]
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Number of words in the corpus.
    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the corpus holds no words.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_words() {
        let corpus = Corpus::from_words(["apple", "banana"]);
        assert_eq!(corpus.len(), 2);
        assert!(!corpus.is_empty());
        assert_eq!(corpus.words()[1], "banana");
    }

    #[test]
    fn test_load_missing_file() {
        let err = Corpus::load(Path::new("/nonexistent/words.txt")).unwrap_err();
        assert!(matches!(err, CorpusError::Io { .. }));
    }
}
