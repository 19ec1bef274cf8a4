//! Shallow HTML tokenizer.
//!
//! Follows the shape of [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
//! closely enough to recover from real-world markup, without tree
//! construction or the full set of states.

/// Character reference decoding per § 13.2.5.72.
pub mod character_reference;
/// HTML tokenizer state machine implementation.
pub mod core;
/// Helper methods for tokenizer state transitions.
pub mod helpers;
/// Token types produced by the tokenizer.
pub mod token;

pub use self::core::{HTMLTokenizer, ParseError, TokenizerState};
pub use token::{Attribute, Token};
