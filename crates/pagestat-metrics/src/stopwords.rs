//! Words excluded from frequency counting.

use std::collections::BTreeSet;
use std::fmt;

/// Common English words that carry no meaning on their own.
pub const DEFAULT_STOPWORDS: &[&str] = &[
    "the", "a", "in", "as", "an", "of", "but", "and", "or", "to", "be", "for", "on",
];

/// An immutable, lowercase set of stopwords.
///
/// Built once before analysis starts and handed to the
/// [`WordCounter`](crate::WordCounter) that owns it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopwordSet {
    words: BTreeSet<String>,
}

impl Default for StopwordSet {
    fn default() -> Self {
        Self::from_words(DEFAULT_STOPWORDS.iter().copied())
    }
}

impl StopwordSet {
    /// A set that excludes nothing.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            words: BTreeSet::new(),
        }
    }

    /// Build a set from arbitrary words. Words are trimmed and lowercased;
    /// blanks are skipped.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();
        Self { words }
    }

    /// Parse a comma-separated list such as `"the, a,an"`.
    #[must_use]
    pub fn parse_list(list: &str) -> Self {
        Self::from_words(list.split(','))
    }

    /// Whether `word` (already lowercase) is excluded.
    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Number of stopwords.
    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// True if nothing is excluded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Stopwords in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }
}

impl fmt::Display for StopwordSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, word) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{word}")?;
        }
        write!(f, "}}")
    }
}
