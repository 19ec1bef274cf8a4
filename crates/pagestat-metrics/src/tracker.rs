//! Structural context tracking over a flat tag event stream.
//!
//! The tracker never sees a tree. It keeps five flags and updates them from
//! open, close and text events in document order:
//!
//! ```text
//! <body> ... <p> text is counted </p> ... </body>          valid once body closes
//! <h2 id="References"> ... <ol> <li> <li> </ol>            two references
//! ```
//!
//! A references section starts at `<h2 id="References">`, becomes a list at
//! the next `<ol>` or `<ul>`, and ends at the first list close after that.
//! Nested lists are not distinguished.

use pagestat_html::{AttributesMap, TagEventSink, tokenize_into};

use crate::counter::{WordCounter, WordFrequency};

/// `id` value that marks the references heading. Compared case-sensitively.
pub const REFERENCES_HEADER_ID: &str = "References";

/// Parse context for one document.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseState {
    /// Between `<body>` and `</body>`.
    pub in_body: bool,
    /// Inside a `<p>` that was opened within the body.
    pub in_paragraph: bool,
    /// `<h2 id="References">` seen and its list not yet closed.
    pub found_references_header: bool,
    /// Inside the list that follows the references heading.
    pub in_references_list: bool,
    /// Set on `</body>`: true if a body had been opened.
    pub valid: bool,
}

/// What a successful analysis produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageMetrics {
    /// Frequencies of non-stopword words found in paragraphs.
    pub words: WordFrequency,
    /// Number of `<a>` open tags anywhere in the document.
    pub link_count: usize,
    /// Number of `<li>` entries in the references list.
    pub reference_count: usize,
}

impl PageMetrics {
    /// Number of distinct non-stopword words.
    #[must_use]
    pub fn unique_words(&self) -> usize {
        self.words.len()
    }
}

/// Follows document structure from tag events and accumulates counts.
///
/// One tracker per document: it owns its state, frequency map and counters
/// and only borrows the shared [`WordCounter`].
#[derive(Debug)]
pub struct TagStateTracker<'a> {
    counter: &'a WordCounter,
    state: ParseState,
    words: WordFrequency,
    link_count: usize,
    reference_count: usize,
}

impl<'a> TagStateTracker<'a> {
    /// A fresh tracker for a new document.
    #[must_use]
    pub fn new(counter: &'a WordCounter) -> Self {
        Self {
            counter,
            state: ParseState::default(),
            words: WordFrequency::new(),
            link_count: 0,
            reference_count: 0,
        }
    }

    /// Current parse context.
    #[must_use]
    pub const fn state(&self) -> ParseState {
        self.state
    }

    /// Words counted so far.
    #[must_use]
    pub const fn words(&self) -> &WordFrequency {
        &self.words
    }

    /// `<a>` tags seen so far.
    #[must_use]
    pub const fn link_count(&self) -> usize {
        self.link_count
    }

    /// Reference entries seen so far.
    #[must_use]
    pub const fn reference_count(&self) -> usize {
        self.reference_count
    }

    /// End of the event stream. Metrics are only reported for a document
    /// whose body was opened and closed.
    #[must_use]
    pub fn finish(self) -> Option<PageMetrics> {
        self.state.valid.then_some(PageMetrics {
            words: self.words,
            link_count: self.link_count,
            reference_count: self.reference_count,
        })
    }
}

impl TagEventSink for TagStateTracker<'_> {
    fn on_open_tag(&mut self, name: &str, attributes: &AttributesMap) {
        let state = &mut self.state;
        match name {
            "a" => self.link_count += 1,
            "body" => state.in_body = true,
            "h2" => {
                if attributes
                    .get("id")
                    .is_some_and(|id| id == REFERENCES_HEADER_ID)
                {
                    state.found_references_header = true;
                }
            }
            "ol" | "ul" => {
                if state.found_references_header {
                    state.in_references_list = true;
                }
            }
            "li" => {
                if state.found_references_header && state.in_references_list {
                    self.reference_count += 1;
                }
            }
            "p" => {
                if state.in_body {
                    state.in_paragraph = true;
                }
            }
            _ => {}
        }
    }

    fn on_close_tag(&mut self, name: &str) {
        let state = &mut self.state;
        match name {
            "body" => {
                state.valid = state.in_body;
                state.in_body = false;
            }
            "ol" | "ul" => {
                if state.in_references_list {
                    state.in_references_list = false;
                    state.found_references_header = false;
                }
            }
            "p" => state.in_paragraph = false,
            _ => {}
        }
    }

    fn on_text(&mut self, data: &str) {
        if self.state.in_paragraph {
            self.counter.accumulate(data, &mut self.words);
        }
    }
}

/// Tokenize `html` and run a fresh tracker over it.
///
/// Returns `None` when the document never had a complete body region.
#[must_use]
pub fn analyze_html(html: &str, counter: &WordCounter) -> Option<PageMetrics> {
    let mut tracker = TagStateTracker::new(counter);
    let _parse_errors = tokenize_into(html, &mut tracker);
    tracker.finish()
}
