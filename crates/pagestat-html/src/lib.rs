//! HTML tokenizer and tag event stream for pagestat.
//!
//! # Scope
//!
//! This crate implements:
//! - **Shallow HTML Tokenizer** ([WHATWG § 13.2.5](https://html.spec.whatwg.org/multipage/parsing.html#tokenization))
//!   - Data, raw text (`script`/`style`) and tag states
//!   - Comment, bogus comment and DOCTYPE skipping
//!   - Attribute parsing with duplicate removal
//!   - Common named and all numeric character references
//!
//! - **Tag events** - the open/close/text callbacks consumers implement via
//!   [`TagEventSink`]
//!
//! # Not Implemented
//!
//! - Tree construction and implied end tags
//! - RCDATA (`title`, `textarea`) and script escape states
//! - The full named character reference table

/// Tag event dispatch over a token stream.
pub mod events;
/// HTML tokenizer for converting input into tokens.
pub mod tokenizer;

pub use events::{
    AttributesMap, EventRecorder, TagEvent, TagEventSink, Tee, attributes_map, dispatch,
    tokenize_into,
};
pub use tokenizer::{Attribute, HTMLTokenizer, ParseError, Token, TokenizerState};
