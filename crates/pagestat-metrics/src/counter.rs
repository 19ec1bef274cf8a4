//! Word frequency counting.
//!
//! Text is split on runs of Unicode whitespace. Each token is then either:
//! - a word, when every character is alphabetic: lowercased and counted
//!   unless it is a stopword
//! - a number, when every character is numeric: counted separately
//! - anything else (`he$$o`, `don't`, `3rd`): dropped
//!
//! Two pipelines share that rule. Text taken from HTML goes through
//! [`WordCounter::accumulate`] untouched, so punctuation glued to a word
//! drops the whole token. Plain text goes through [`WordCounter::count`],
//! which first runs [`clean`] to strip everything that is neither
//! alphanumeric nor whitespace.

use std::collections::HashMap;

use crate::stopwords::StopwordSet;

/// Lowercase word to number of occurrences.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordFrequency {
    counts: HashMap<String, usize>,
}

impl WordFrequency {
    /// An empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one more occurrence of `word`. The first occurrence yields 1.
    pub fn increment(&mut self, word: &str) {
        if let Some(count) = self.counts.get_mut(word) {
            *count += 1;
        } else {
            let _ = self.counts.insert(word.to_string(), 1);
        }
    }

    /// Occurrences of `word`, if it was seen at all.
    #[must_use]
    pub fn get(&self, word: &str) -> Option<usize> {
        self.counts.get(word).copied()
    }

    /// Number of distinct words.
    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// True if no word was counted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Total occurrences across all words.
    #[must_use]
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Words in arbitrary order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.counts.keys().map(String::as_str)
    }

    /// `(word, count)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(word, &count)| (word.as_str(), count))
    }

    /// `(word, count)` pairs, most frequent first, ties broken alphabetically.
    #[must_use]
    pub fn sorted(&self) -> Vec<(&str, usize)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_unstable_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        entries
    }
}

impl<S: Into<String>, const N: usize> From<[(S, usize); N]> for WordFrequency {
    fn from(entries: [(S, usize); N]) -> Self {
        Self {
            counts: entries
                .into_iter()
                .map(|(word, count)| (word.into(), count))
                .collect(),
        }
    }
}

/// Result of counting a plain-text input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextCount {
    /// Word frequencies.
    pub words: WordFrequency,
    /// How many whitespace-separated tokens were entirely numeric. `123` is
    /// one number, not three.
    pub number_count: usize,
}

/// Keep only alphanumeric and whitespace characters, lowercased.
///
/// Whitespace is kept as-is so that splitting afterwards still separates
/// tokens: `"he$$o world"` becomes `"heo world"`.
#[must_use]
pub fn clean(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Splits text into tokens and counts words, skipping stopwords.
#[derive(Debug, Clone, Default)]
pub struct WordCounter {
    stopwords: StopwordSet,
}

impl WordCounter {
    /// A counter that excludes `stopwords`.
    #[must_use]
    pub const fn new(stopwords: StopwordSet) -> Self {
        Self { stopwords }
    }

    /// The stopwords this counter excludes.
    #[must_use]
    pub const fn stopwords(&self) -> &StopwordSet {
        &self.stopwords
    }

    /// Count the words of an HTML text fragment into `words`.
    ///
    /// No cleaning pass: a token with any non-alphabetic character is
    /// dropped. Numeric tokens are ignored.
    pub fn accumulate(&self, text: &str, words: &mut WordFrequency) {
        let _numbers = self.tally(text, words);
    }

    /// Count a plain-text input: clean, split, then count words and numbers.
    #[must_use]
    pub fn count(&self, text: &str) -> TextCount {
        let mut words = WordFrequency::new();
        let number_count = self.tally(&clean(text), &mut words);
        TextCount {
            words,
            number_count,
        }
    }

    /// Shared token loop. Returns how many numeric tokens were seen.
    fn tally(&self, text: &str, words: &mut WordFrequency) -> usize {
        let mut numbers = 0;
        for token in text.split_whitespace() {
            if token.chars().all(char::is_alphabetic) {
                let word = token.to_lowercase();
                if !self.stopwords.contains(&word) {
                    words.increment(&word);
                }
            } else if token.chars().all(char::is_numeric) {
                numbers += 1;
            }
        }
        numbers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain() -> WordCounter {
        WordCounter::new(StopwordSet::empty())
    }

    #[test]
    fn test_plain_text_table() {
        // (input, number count, words)
        let cases: &[(&str, usize, &[(&str, usize)])] = &[
            ("Hello world", 0, &[("hello", 1), ("world", 1)]),
            ("dog cat dog cat cat cat", 0, &[("dog", 2), ("cat", 4)]),
            ("Hello $ world £", 0, &[("hello", 1), ("world", 1)]),
            ("$hello", 0, &[("hello", 1)]),
            ("hello$", 0, &[("hello", 1)]),
            ("he$$o", 0, &[("heo", 1)]),
            ("2 dog dog 4 cat cat cat cat", 2, &[("dog", 2), ("cat", 4)]),
            ("123 456 78 9", 4, &[]),
        ];

        for (input, numbers, expected) in cases {
            let result = plain().count(input);
            assert_eq!(result.number_count, *numbers, "{input}");
            let mut got = result.words.sorted();
            got.sort_unstable();
            let mut want = expected.to_vec();
            want.sort_unstable();
            assert_eq!(got, want, "{input}");
        }
    }

    #[test]
    fn test_html_pipeline_does_not_clean() {
        let mut words = WordFrequency::new();
        plain().accumulate("he$$o there", &mut words);
        assert_eq!(words, WordFrequency::from([("there", 1)]));
    }

    #[test]
    fn test_html_pipeline_ignores_numbers() {
        let mut words = WordFrequency::new();
        plain().accumulate("42 cats", &mut words);
        assert_eq!(words, WordFrequency::from([("cats", 1)]));
    }

    #[test]
    fn test_case_insensitive() {
        for input in ["Hello hello", "hello HELLO"] {
            let mut words = WordFrequency::new();
            plain().accumulate(input, &mut words);
            assert_eq!(words, WordFrequency::from([("hello", 2)]), "{input}");
        }
    }

    #[test]
    fn test_stopwords_skipped_after_lowercasing() {
        let counter = WordCounter::new(StopwordSet::default());
        let mut words = WordFrequency::new();
        counter.accumulate("The cat and THE dog", &mut words);
        assert_eq!(words, WordFrequency::from([("cat", 1), ("dog", 1)]));
    }

    #[test]
    fn test_unicode_letters_and_whitespace() {
        let mut words = WordFrequency::new();
        plain().accumulate("Café\u{00A0}naïve\u{2003}CAFÉ", &mut words);
        assert_eq!(words, WordFrequency::from([("café", 2), ("naïve", 1)]));
    }

    #[test]
    fn test_accumulate_adds_to_existing_counts() {
        let mut words = WordFrequency::from([("cat", 3)]);
        plain().accumulate("cat", &mut words);
        assert_eq!(words.get("cat"), Some(4));
        assert_eq!(words.total(), 4);
    }

    #[test]
    fn test_sorted_order() {
        let words = WordFrequency::from([("b", 2), ("a", 2), ("c", 5)]);
        assert_eq!(words.sorted(), vec![("c", 5), ("a", 2), ("b", 2)]);
    }

    #[test]
    fn test_clean() {
        assert_eq!(clean("He$$o, World 42!"), "heo world 42");
    }
}
