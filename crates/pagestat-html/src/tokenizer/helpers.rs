//! Helper functions for the HTML tokenizer.
//!
//! [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
//!
//! This module contains utility functions used throughout the tokenizer:
//! - State transitions ("Switch to", "Reconsume in")
//! - Input/character handling ("Consume the next input character")
//! - Token emission, including text-run folding and raw text bookkeeping
//! - Attribute helpers for duplicate detection

use std::mem;

use pagestat_common::warning::warn_once;

use super::character_reference::decode_character_references;
use super::core::{HTMLTokenizer, ParseError, TokenizerState};
use super::token::Token;

/// Elements whose contents are read as raw text.
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

// =============================================================================
// State Transition Helpers
// =============================================================================

impl HTMLTokenizer {
    /// "Switch to the X state"
    ///
    /// Transitions to a new state. The next character will be consumed on the
    /// next iteration of the main loop.
    pub(super) const fn switch_to(&mut self, new_state: TokenizerState) {
        self.state = new_state;
    }

    /// "Reconsume in the X state"
    ///
    /// Transitions to a new state without consuming the current character.
    pub(super) const fn reconsume_in(&mut self, new_state: TokenizerState) {
        self.reconsume = true;
        self.state = new_state;
    }
}

// =============================================================================
// Input/Character Helpers
// =============================================================================

impl HTMLTokenizer {
    /// "Consume the next input character"
    ///
    /// Returns None if we've reached the end of input.
    pub(super) fn consume(&mut self) -> Option<char> {
        let c = self.input[self.current_pos..].chars().next()?;
        self.current_pos += c.len_utf8();
        Some(c)
    }

    /// Peek at a codepoint at the given offset from the current position without
    /// consuming it.
    #[must_use]
    pub fn peek_codepoint(&self, offset: usize) -> Option<char> {
        self.input[self.current_pos..].chars().nth(offset)
    }

    /// "If the next few characters are..."
    #[must_use]
    pub fn next_few_characters_are(&self, target: &str) -> bool {
        self.input[self.current_pos..].starts_with(target)
    }

    /// "ASCII case-insensitive match for the word 'DOCTYPE'"
    #[must_use]
    pub fn next_few_characters_are_case_insensitive(&self, target: &str) -> bool {
        self.input
            .get(self.current_pos..self.current_pos + target.len())
            .is_some_and(|candidate| candidate.eq_ignore_ascii_case(target))
    }

    /// Consume the given ASCII string from the input.
    /// Caller must have already verified the characters are present.
    pub(super) const fn consume_string(&mut self, target: &str) {
        self.current_pos += target.len();
    }

    /// [ASCII whitespace](https://infra.spec.whatwg.org/#ascii-whitespace)
    ///
    /// CR is included because input is not newline-normalized first.
    pub(super) const fn is_whitespace_char(input_char: char) -> bool {
        matches!(input_char, ' ' | '\t' | '\n' | '\x0C' | '\r')
    }

    /// In raw text, only `</name` followed by whitespace, `/`, `>` or EOF
    /// ends the element.
    pub(super) fn at_appropriate_raw_text_end_tag(&self) -> bool {
        let Some(name) = self.raw_text_element.as_deref() else {
            return false;
        };
        if self.peek_codepoint(0) != Some('/') {
            return false;
        }
        let name_matches = name.chars().enumerate().all(|(i, expected)| {
            self.peek_codepoint(i + 1)
                .is_some_and(|c| c.eq_ignore_ascii_case(&expected))
        });
        if !name_matches {
            return false;
        }
        match self.peek_codepoint(name.chars().count() + 1) {
            None | Some('/' | '>') => true,
            Some(c) => Self::is_whitespace_char(c),
        }
    }
}

// =============================================================================
// Emission Helpers
// =============================================================================

impl HTMLTokenizer {
    /// Append a character to the current text run.
    pub(super) fn emit_character(&mut self, c: char) {
        self.pending_text.push(c);
    }

    /// Emit the pending text run, if any, as a single text token.
    pub(super) fn flush_text(&mut self) {
        if self.pending_text.is_empty() {
            return;
        }
        let raw = mem::take(&mut self.pending_text);
        let data = if self.raw_text_element.is_some() {
            raw
        } else {
            decode_character_references(&raw).into_owned()
        };
        self.token_stream.push_back(Token::Text { data });
    }

    /// "Emit the current tag token" (or comment token).
    ///
    /// Attribute values are decoded here. Emitting a `script` or `style`
    /// start tag enters raw text; emitting the matching end tag leaves it.
    pub(super) fn emit_current_token(&mut self) {
        self.finish_current_attribute();
        let Some(mut token) = self.current_token.take() else {
            return;
        };
        self.flush_text();

        if let Token::StartTag { attributes, .. } | Token::EndTag { attributes, .. } = &mut token {
            for attr in attributes.iter_mut() {
                if attr.value.contains('&') {
                    attr.value = decode_character_references(&attr.value).into_owned();
                }
            }
        }

        match &token {
            Token::StartTag {
                name,
                self_closing: false,
                ..
            } if RAW_TEXT_ELEMENTS.contains(&name.as_str()) => {
                self.raw_text_element = Some(name.clone());
                self.switch_to(TokenizerState::RawText);
            }
            Token::EndTag { name, attributes } => {
                if !attributes.is_empty() {
                    self.log_parse_error("end-tag-with-attributes");
                }
                if self.raw_text_element.as_deref() == Some(name.as_str()) {
                    self.raw_text_element = None;
                }
            }
            _ => {}
        }

        self.token_stream.push_back(token);
    }

    /// Emit a DOCTYPE token built from the collected buffer.
    pub(super) fn emit_doctype_token(&mut self) {
        self.flush_text();
        let name = self
            .doctype_buffer
            .split_whitespace()
            .next()
            .map(str::to_ascii_lowercase);
        self.doctype_buffer.clear();
        self.token_stream.push_back(Token::Doctype { name });
    }

    /// "Emit an end-of-file token."
    pub(super) fn emit_eof_token(&mut self) {
        self.flush_text();
        self.token_stream.push_back(Token::EndOfFile);
        self.at_eof = true;
    }

    /// "When the user agent leaves the attribute name state... if there is
    /// already an attribute on the token with the exact same name, then this
    /// is a duplicate-attribute parse error and the new attribute must be
    /// removed from the token."
    ///
    /// Removal waits until the attribute's value has been read, so that the
    /// value does not land on the earlier attribute.
    pub(super) fn check_duplicate_attribute(&mut self) {
        let is_duplicate = self
            .current_token
            .as_ref()
            .is_some_and(Token::current_attribute_name_is_duplicate);

        if is_duplicate {
            self.log_parse_error("duplicate-attribute");
            self.drop_current_attribute = true;
        }
    }

    /// Drop the attribute just read if it was a duplicate.
    pub(super) fn finish_current_attribute(&mut self) {
        if mem::take(&mut self.drop_current_attribute)
            && let Some(ref mut token) = self.current_token
        {
            token.remove_current_attribute();
        }
    }

    /// "Start a new attribute in the current tag token."
    pub(super) fn start_new_attribute(&mut self) {
        self.finish_current_attribute();
        if let Some(ref mut token) = self.current_token {
            token.start_new_attribute();
        }
    }
}

// =============================================================================
// Error Handling
// =============================================================================

impl HTMLTokenizer {
    /// [§ 13.2.2 Parse errors](https://html.spec.whatwg.org/multipage/parsing.html#parse-errors)
    ///
    /// Records the error and reports its code through the warning channel,
    /// once per code. Positions are only kept in [`ParseError`].
    /// Parse errors are never fatal; the tokenizer recovers and continues.
    pub(super) fn log_parse_error(&mut self, code: &'static str) {
        warn_once("HTML Tokenizer", code);
        self.parse_errors.push(ParseError {
            code,
            position: self.current_pos,
            state: self.state,
        });
    }
}
