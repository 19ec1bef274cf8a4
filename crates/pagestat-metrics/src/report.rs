//! Rendering finished analyses as text.

use std::fmt;

use crate::counter::{TextCount, WordFrequency};
use crate::stopwords::StopwordSet;
use crate::tracker::PageMetrics;

/// The summary printed for an HTML page.
///
/// ```text
/// Ignoring words: {a, an, and, ...}
/// Unique words: 1234
/// Hyperlinks: 567
/// References: 89
/// ```
///
/// followed by the word table when requested.
#[derive(Debug, Clone, Copy)]
pub struct PageReport<'a> {
    /// Stopwords that were excluded.
    pub stopwords: &'a StopwordSet,
    /// Counts to report.
    pub metrics: &'a PageMetrics,
    /// Append every word with its count.
    pub show_word_table: bool,
}

impl fmt::Display for PageReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Ignoring words: {}", self.stopwords)?;
        writeln!(f, "Unique words: {}", self.metrics.unique_words())?;
        writeln!(f, "Hyperlinks: {}", self.metrics.link_count)?;
        writeln!(f, "References: {}", self.metrics.reference_count)?;
        if self.show_word_table {
            write_word_table(f, &self.metrics.words)?;
        }
        Ok(())
    }
}

/// The summary printed for a plain-text input.
#[derive(Debug, Clone, Copy)]
pub struct TextReport<'a> {
    /// Counts to report.
    pub count: &'a TextCount,
}

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Number Count: {}", self.count.number_count)?;
        write_word_table(f, &self.count.words)
    }
}

fn write_word_table(f: &mut fmt::Formatter<'_>, words: &WordFrequency) -> fmt::Result {
    writeln!(f, "Word table:")?;
    for (word, count) in words.sorted() {
        writeln!(f, "  {word}: {count}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_report_without_table() {
        let stopwords = StopwordSet::from_words(["the", "a"]);
        let metrics = PageMetrics {
            words: WordFrequency::from([("cat", 3), ("dog", 1)]),
            link_count: 7,
            reference_count: 2,
        };
        let report = PageReport {
            stopwords: &stopwords,
            metrics: &metrics,
            show_word_table: false,
        };
        assert_eq!(
            report.to_string(),
            "Ignoring words: {a, the}\nUnique words: 2\nHyperlinks: 7\nReferences: 2\n"
        );
    }

    #[test]
    fn test_page_report_with_table() {
        let stopwords = StopwordSet::empty();
        let metrics = PageMetrics {
            words: WordFrequency::from([("dog", 1), ("cat", 3)]),
            ..PageMetrics::default()
        };
        let rendered = PageReport {
            stopwords: &stopwords,
            metrics: &metrics,
            show_word_table: true,
        }
        .to_string();
        assert!(rendered.ends_with("Word table:\n  cat: 3\n  dog: 1\n"));
    }

    #[test]
    fn test_text_report() {
        let count = TextCount {
            words: WordFrequency::from([("dog", 2), ("cat", 4)]),
            number_count: 2,
        };
        assert_eq!(
            TextReport { count: &count }.to_string(),
            "Number Count: 2\nWord table:\n  cat: 4\n  dog: 2\n"
        );
    }
}
