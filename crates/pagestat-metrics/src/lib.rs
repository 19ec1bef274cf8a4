//! Page statistics for pagestat.
//!
//! # Scope
//!
//! This crate provides:
//! - **Stopwords** - the immutable set of words excluded from counting
//! - **Word Counter** - whitespace tokenizing, alphabetic filtering and
//!   frequency counting, in an HTML flavour and a plain-text flavour
//! - **Tag-State Tracker** - a [`pagestat_html::TagEventSink`] that follows
//!   body, paragraph and references-list context from a flat event stream
//! - **Reports** - the text printed for a finished analysis
//!
//! Nothing here fails: every input yields either metrics or an explicit
//! "no body" result.

pub mod counter;
pub mod report;
pub mod stopwords;
pub mod tracker;

pub use counter::{TextCount, WordCounter, WordFrequency, clean};
pub use report::{PageReport, TextReport};
pub use stopwords::{DEFAULT_STOPWORDS, StopwordSet};
pub use tracker::{PageMetrics, ParseState, REFERENCES_HEADER_ID, TagStateTracker, analyze_html};
