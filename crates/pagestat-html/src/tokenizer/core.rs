use std::collections::VecDeque;
use std::fmt;

use strum_macros::Display;

use super::token::Token;

/// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
///
/// A reduced set of the WHATWG tokenizer states. Character references are
/// decoded when a token is emitted rather than through dedicated states, and
/// `script`/`style` share a single raw text state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum TokenizerState {
    /// [§ 13.2.5.1 Data state](https://html.spec.whatwg.org/multipage/parsing.html#data-state)
    Data,
    /// [§ 13.2.5.3 RAWTEXT state](https://html.spec.whatwg.org/multipage/parsing.html#rawtext-state)
    RawText,
    /// [§ 13.2.5.6 Tag open state](https://html.spec.whatwg.org/multipage/parsing.html#tag-open-state)
    TagOpen,
    /// [§ 13.2.5.7 End tag open state](https://html.spec.whatwg.org/multipage/parsing.html#end-tag-open-state)
    EndTagOpen,
    /// [§ 13.2.5.8 Tag name state](https://html.spec.whatwg.org/multipage/parsing.html#tag-name-state)
    TagName,
    /// [§ 13.2.5.32 Before attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#before-attribute-name-state)
    BeforeAttributeName,
    /// [§ 13.2.5.33 Attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-name-state)
    AttributeName,
    /// [§ 13.2.5.34 After attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#after-attribute-name-state)
    AfterAttributeName,
    /// [§ 13.2.5.35 Before attribute value state](https://html.spec.whatwg.org/multipage/parsing.html#before-attribute-value-state)
    BeforeAttributeValue,
    /// [§ 13.2.5.36 Attribute value (double-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(double-quoted)-state)
    AttributeValueDoubleQuoted,
    /// [§ 13.2.5.37 Attribute value (single-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(single-quoted)-state)
    AttributeValueSingleQuoted,
    /// [§ 13.2.5.38 Attribute value (unquoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(unquoted)-state)
    AttributeValueUnquoted,
    /// [§ 13.2.5.39 After attribute value (quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#after-attribute-value-(quoted)-state)
    AfterAttributeValueQuoted,
    /// [§ 13.2.5.40 Self-closing start tag state](https://html.spec.whatwg.org/multipage/parsing.html#self-closing-start-tag-state)
    SelfClosingStartTag,
    /// [§ 13.2.5.41 Bogus comment state](https://html.spec.whatwg.org/multipage/parsing.html#bogus-comment-state)
    BogusComment,
    /// [§ 13.2.5.45 Comment state](https://html.spec.whatwg.org/multipage/parsing.html#comment-state)
    Comment,
    /// [§ 13.2.5.53 DOCTYPE state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-state)
    Doctype,
}

/// A recoverable problem found while tokenizing.
///
/// Codes follow the WHATWG parse error names
/// ([§ 13.2.2](https://html.spec.whatwg.org/multipage/parsing.html#parse-errors)).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// WHATWG error code, e.g. `eof-in-tag`.
    pub code: &'static str,
    /// Byte offset into the input where the error was noticed.
    pub position: usize,
    /// State the tokenizer was in.
    pub state: TokenizerState,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at position {} ({} state)",
            self.code, self.position, self.state
        )
    }
}

/// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
///
/// A shallow, forgiving HTML tokenizer. It never builds a tree and never
/// fails: every input produces a token stream terminated by
/// [`Token::EndOfFile`].
///
/// Tokens can be pulled one at a time through [`Iterator`], which runs the
/// state machine only as far as the next token, or all at once with
/// [`HTMLTokenizer::run`] and [`HTMLTokenizer::into_tokens`].
pub struct HTMLTokenizer {
    pub(super) state: TokenizerState,
    pub(super) input: String,
    pub(super) current_pos: usize,
    pub(super) current_input_character: Option<char>,
    pub(super) current_token: Option<Token>,
    pub(super) at_eof: bool,
    pub(super) token_stream: VecDeque<Token>,
    // When true, the next iteration of the main loop will not consume a new character.
    // "Reconsume in the X state" sets this flag.
    pub(super) reconsume: bool,

    /// Character data seen since the last emitted token.
    pub(super) pending_text: String,

    /// Name of the `script`/`style` element whose contents are being read as
    /// raw text.
    pub(super) raw_text_element: Option<String>,

    /// Raw `<!DOCTYPE ...>` contents.
    pub(super) doctype_buffer: String,

    /// Set when the attribute being read duplicates an earlier one; it is
    /// dropped once complete.
    pub(super) drop_current_attribute: bool,

    pub(super) parse_errors: Vec<ParseError>,
}

impl Iterator for HTMLTokenizer {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        self.next_token()
    }
}

impl HTMLTokenizer {
    /// Create a new tokenizer for the given input.
    ///
    /// "The initial state is the data state."
    #[must_use]
    pub const fn new(input: String) -> Self {
        Self {
            state: TokenizerState::Data,
            input,
            current_pos: 0,
            current_input_character: None,
            current_token: None,
            at_eof: false,
            token_stream: VecDeque::new(),
            reconsume: false,
            pending_text: String::new(),
            raw_text_element: None,
            doctype_buffer: String::new(),
            drop_current_attribute: false,
            parse_errors: Vec::new(),
        }
    }

    /// Consume the tokenizer and return the token stream.
    /// Call this after `run()` to get the tokens.
    #[must_use]
    pub fn into_tokens(self) -> Vec<Token> {
        self.token_stream.into()
    }

    /// Parse errors recovered from so far.
    #[must_use]
    pub fn parse_errors(&self) -> &[ParseError] {
        &self.parse_errors
    }

    /// True once the end-of-file token has been emitted.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.at_eof
    }

    /// Run the state machine until the end-of-file token has been emitted.
    pub fn run(&mut self) {
        while !self.at_eof {
            self.step();
        }
    }

    /// Run the state machine until at least one token is queued, then hand
    /// out the oldest one. `None` after the end-of-file token.
    pub fn next_token(&mut self) -> Option<Token> {
        while self.token_stream.is_empty() && !self.at_eof {
            self.step();
        }
        self.token_stream.pop_front()
    }

    /// One turn of the state machine.
    fn step(&mut self) {
        // Each state begins by consuming the next input character,
        // unless we're reconsuming from a previous state transition.
        if self.reconsume {
            self.reconsume = false;
        } else {
            self.current_input_character = self.consume();
        }

        match self.state {
            TokenizerState::Data => self.handle_data_state(),
            TokenizerState::RawText => self.handle_raw_text_state(),
            TokenizerState::TagOpen => self.handle_tag_open_state(),
            TokenizerState::EndTagOpen => self.handle_end_tag_open_state(),
            TokenizerState::TagName => self.handle_tag_name_state(),
            TokenizerState::BeforeAttributeName => self.handle_before_attribute_name_state(),
            TokenizerState::AttributeName => self.handle_attribute_name_state(),
            TokenizerState::AfterAttributeName => self.handle_after_attribute_name_state(),
            TokenizerState::BeforeAttributeValue => self.handle_before_attribute_value_state(),
            TokenizerState::AttributeValueDoubleQuoted => {
                self.handle_attribute_value_quoted_state('"');
            }
            TokenizerState::AttributeValueSingleQuoted => {
                self.handle_attribute_value_quoted_state('\'');
            }
            TokenizerState::AttributeValueUnquoted => {
                self.handle_attribute_value_unquoted_state();
            }
            TokenizerState::AfterAttributeValueQuoted => {
                self.handle_after_attribute_value_quoted_state();
            }
            TokenizerState::SelfClosingStartTag => self.handle_self_closing_start_tag_state(),
            TokenizerState::BogusComment => self.handle_bogus_comment_state(),
            TokenizerState::Comment => self.handle_comment_state(),
            TokenizerState::Doctype => self.handle_doctype_state(),
        }
    }

    /// [§ 13.2.5.1 Data state](https://html.spec.whatwg.org/multipage/parsing.html#data-state)
    fn handle_data_state(&mut self) {
        match self.current_input_character {
            // "U+003C LESS-THAN SIGN (<) - Switch to the tag open state."
            Some('<') => self.switch_to(TokenizerState::TagOpen),
            // "EOF - Emit an end-of-file token."
            None => self.emit_eof_token(),
            // "Anything else - Emit the current input character as a character token."
            Some(c) => self.emit_character(c),
        }
    }

    /// Contents of `script` and `style`: everything up to the matching end
    /// tag is text.
    fn handle_raw_text_state(&mut self) {
        match self.current_input_character {
            Some('<') if self.at_appropriate_raw_text_end_tag() => {
                self.switch_to(TokenizerState::TagOpen);
            }
            None => {
                self.log_parse_error("eof-in-raw-text");
                self.emit_eof_token();
            }
            Some(c) => self.emit_character(c),
        }
    }

    /// [§ 13.2.5.6 Tag open state](https://html.spec.whatwg.org/multipage/parsing.html#tag-open-state)
    fn handle_tag_open_state(&mut self) {
        match self.current_input_character {
            // "U+0021 EXCLAMATION MARK (!) - Switch to the markup declaration open state."
            Some('!') => self.handle_markup_declaration_open(),
            // "U+002F SOLIDUS (/) - Switch to the end tag open state."
            Some('/') => self.switch_to(TokenizerState::EndTagOpen),
            // "ASCII alpha - Create a new start tag token, set its tag name to
            // the empty string. Reconsume in the tag name state."
            Some(c) if c.is_ascii_alphabetic() => {
                self.current_token = Some(Token::new_start_tag());
                self.reconsume_in(TokenizerState::TagName);
            }
            // "U+003F QUESTION MARK (?) - This is an
            // unexpected-question-mark-instead-of-tag-name parse error. Create a
            // comment token whose data is the empty string. Reconsume in the
            // bogus comment state."
            Some('?') => {
                self.log_parse_error("unexpected-question-mark-instead-of-tag-name");
                self.current_token = Some(Token::new_comment());
                self.reconsume_in(TokenizerState::BogusComment);
            }
            // "EOF - This is an eof-before-tag-name parse error. Emit a U+003C
            // LESS-THAN SIGN character token and an end-of-file token."
            None => {
                self.log_parse_error("eof-before-tag-name");
                self.emit_character('<');
                self.emit_eof_token();
            }
            // "Anything else - This is an invalid-first-character-of-tag-name
            // parse error. Emit a U+003C LESS-THAN SIGN character token.
            // Reconsume in the data state."
            Some(_) => {
                self.log_parse_error("invalid-first-character-of-tag-name");
                self.emit_character('<');
                self.reconsume_in(TokenizerState::Data);
            }
        }
    }

    /// [§ 13.2.5.42 Markup declaration open state](https://html.spec.whatwg.org/multipage/parsing.html#markup-declaration-open-state)
    ///
    /// Entered with the `!` as the current character; everything after it is
    /// examined by lookahead.
    fn handle_markup_declaration_open(&mut self) {
        self.current_token = Some(Token::new_comment());
        if self.next_few_characters_are("--") {
            // "Consume those two characters, create a comment token whose data
            // is the empty string, and switch to the comment start state."
            self.consume_string("--");
            self.switch_to(TokenizerState::Comment);
        } else if self.next_few_characters_are_case_insensitive("DOCTYPE") {
            self.consume_string("DOCTYPE");
            self.current_token = None;
            self.doctype_buffer.clear();
            self.switch_to(TokenizerState::Doctype);
        } else {
            // "[CDATA[" outside foreign content lands here as well.
            self.log_parse_error("incorrectly-opened-comment");
            self.switch_to(TokenizerState::BogusComment);
        }
    }

    /// [§ 13.2.5.7 End tag open state](https://html.spec.whatwg.org/multipage/parsing.html#end-tag-open-state)
    fn handle_end_tag_open_state(&mut self) {
        match self.current_input_character {
            Some(c) if c.is_ascii_alphabetic() => {
                self.current_token = Some(Token::new_end_tag());
                self.reconsume_in(TokenizerState::TagName);
            }
            // "U+003E GREATER-THAN SIGN (>) - This is a missing-end-tag-name
            // parse error. Switch to the data state."
            Some('>') => {
                self.log_parse_error("missing-end-tag-name");
                self.switch_to(TokenizerState::Data);
            }
            None => {
                self.log_parse_error("eof-before-tag-name");
                self.emit_character('<');
                self.emit_character('/');
                self.emit_eof_token();
            }
            Some(_) => {
                self.log_parse_error("invalid-first-character-of-tag-name");
                self.current_token = Some(Token::new_comment());
                self.reconsume_in(TokenizerState::BogusComment);
            }
        }
    }

    /// [§ 13.2.5.8 Tag name state](https://html.spec.whatwg.org/multipage/parsing.html#tag-name-state)
    fn handle_tag_name_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {
                self.switch_to(TokenizerState::BeforeAttributeName);
            }
            Some('/') => self.switch_to(TokenizerState::SelfClosingStartTag),
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_current_token();
            }
            None => self.eof_in_tag(),
            // "ASCII upper alpha - Append the lowercase version of the current
            // input character to the current tag token's tag name."
            Some(c) => {
                if let Some(ref mut token) = self.current_token {
                    token.append_to_tag_name(c.to_ascii_lowercase());
                }
            }
        }
    }

    /// [§ 13.2.5.32 Before attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#before-attribute-name-state)
    fn handle_before_attribute_name_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {}
            Some('/' | '>') | None => self.reconsume_in(TokenizerState::AfterAttributeName),
            // "U+003D EQUALS SIGN (=) - This is an
            // unexpected-equals-sign-before-attribute-name parse error. Start a
            // new attribute in the current tag token. Set that attribute's name
            // to the current input character."
            Some('=') => {
                self.log_parse_error("unexpected-equals-sign-before-attribute-name");
                self.start_new_attribute();
                if let Some(ref mut token) = self.current_token {
                    token.append_to_current_attribute_name('=');
                }
                self.switch_to(TokenizerState::AttributeName);
            }
            Some(_) => {
                self.start_new_attribute();
                self.reconsume_in(TokenizerState::AttributeName);
            }
        }
    }

    /// [§ 13.2.5.33 Attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-name-state)
    fn handle_attribute_name_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {
                self.check_duplicate_attribute();
                self.reconsume_in(TokenizerState::AfterAttributeName);
            }
            Some('/' | '>') | None => {
                self.check_duplicate_attribute();
                self.reconsume_in(TokenizerState::AfterAttributeName);
            }
            Some('=') => {
                self.check_duplicate_attribute();
                self.switch_to(TokenizerState::BeforeAttributeValue);
            }
            Some(c) => {
                if matches!(c, '"' | '\'' | '<') {
                    self.log_parse_error("unexpected-character-in-attribute-name");
                }
                if let Some(ref mut token) = self.current_token {
                    token.append_to_current_attribute_name(c.to_ascii_lowercase());
                }
            }
        }
    }

    /// [§ 13.2.5.34 After attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#after-attribute-name-state)
    fn handle_after_attribute_name_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {}
            Some('/') => self.switch_to(TokenizerState::SelfClosingStartTag),
            Some('=') => self.switch_to(TokenizerState::BeforeAttributeValue),
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_current_token();
            }
            None => self.eof_in_tag(),
            Some(_) => {
                self.start_new_attribute();
                self.reconsume_in(TokenizerState::AttributeName);
            }
        }
    }

    /// [§ 13.2.5.35 Before attribute value state](https://html.spec.whatwg.org/multipage/parsing.html#before-attribute-value-state)
    fn handle_before_attribute_value_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {}
            Some('"') => self.switch_to(TokenizerState::AttributeValueDoubleQuoted),
            Some('\'') => self.switch_to(TokenizerState::AttributeValueSingleQuoted),
            // "U+003E GREATER-THAN SIGN (>) - This is a missing-attribute-value
            // parse error. Switch to the data state. Emit the current tag token."
            Some('>') => {
                self.log_parse_error("missing-attribute-value");
                self.switch_to(TokenizerState::Data);
                self.emit_current_token();
            }
            _ => self.reconsume_in(TokenizerState::AttributeValueUnquoted),
        }
    }

    /// [§ 13.2.5.36](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(double-quoted)-state)
    /// and [§ 13.2.5.37](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(single-quoted)-state)
    fn handle_attribute_value_quoted_state(&mut self, quote: char) {
        match self.current_input_character {
            Some(c) if c == quote => self.switch_to(TokenizerState::AfterAttributeValueQuoted),
            None => self.eof_in_tag(),
            Some(c) => {
                if let Some(ref mut token) = self.current_token {
                    token.append_to_current_attribute_value(c);
                }
            }
        }
    }

    /// [§ 13.2.5.38 Attribute value (unquoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(unquoted)-state)
    fn handle_attribute_value_unquoted_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {
                self.switch_to(TokenizerState::BeforeAttributeName);
            }
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_current_token();
            }
            None => self.eof_in_tag(),
            Some(c) => {
                if matches!(c, '"' | '\'' | '<' | '=' | '`') {
                    self.log_parse_error("unexpected-character-in-unquoted-attribute-value");
                }
                if let Some(ref mut token) = self.current_token {
                    token.append_to_current_attribute_value(c);
                }
            }
        }
    }

    /// [§ 13.2.5.39 After attribute value (quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#after-attribute-value-(quoted)-state)
    fn handle_after_attribute_value_quoted_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {
                self.switch_to(TokenizerState::BeforeAttributeName);
            }
            Some('/') => self.switch_to(TokenizerState::SelfClosingStartTag),
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_current_token();
            }
            None => self.eof_in_tag(),
            Some(_) => {
                self.log_parse_error("missing-whitespace-between-attributes");
                self.reconsume_in(TokenizerState::BeforeAttributeName);
            }
        }
    }

    /// [§ 13.2.5.40 Self-closing start tag state](https://html.spec.whatwg.org/multipage/parsing.html#self-closing-start-tag-state)
    fn handle_self_closing_start_tag_state(&mut self) {
        match self.current_input_character {
            Some('>') => {
                if let Some(ref mut token) = self.current_token {
                    token.set_self_closing();
                }
                self.switch_to(TokenizerState::Data);
                self.emit_current_token();
            }
            None => self.eof_in_tag(),
            Some(_) => {
                self.log_parse_error("unexpected-solidus-in-tag");
                self.reconsume_in(TokenizerState::BeforeAttributeName);
            }
        }
    }

    /// [§ 13.2.5.41 Bogus comment state](https://html.spec.whatwg.org/multipage/parsing.html#bogus-comment-state)
    fn handle_bogus_comment_state(&mut self) {
        match self.current_input_character {
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_current_token();
            }
            None => {
                self.emit_current_token();
                self.emit_eof_token();
            }
            Some(c) => {
                if let Some(ref mut token) = self.current_token {
                    token.append_to_comment(c);
                }
            }
        }
    }

    /// [§ 13.2.5.45 Comment state](https://html.spec.whatwg.org/multipage/parsing.html#comment-state)
    ///
    /// The comment start and comment end states are folded in here via
    /// lookahead.
    fn handle_comment_state(&mut self) {
        let comment_is_empty = self
            .current_token
            .as_ref()
            .is_some_and(Token::is_empty_comment);

        match self.current_input_character {
            // "-->"
            Some('-') if self.next_few_characters_are("->") => {
                self.consume_string("->");
                self.switch_to(TokenizerState::Data);
                self.emit_current_token();
            }
            // "<!-->" and "<!--->": abrupt-closing-of-empty-comment
            Some('>') if comment_is_empty => {
                self.log_parse_error("abrupt-closing-of-empty-comment");
                self.switch_to(TokenizerState::Data);
                self.emit_current_token();
            }
            Some('-') if comment_is_empty && self.next_few_characters_are(">") => {
                self.log_parse_error("abrupt-closing-of-empty-comment");
                self.consume_string(">");
                self.switch_to(TokenizerState::Data);
                self.emit_current_token();
            }
            None => {
                self.log_parse_error("eof-in-comment");
                self.emit_current_token();
                self.emit_eof_token();
            }
            Some(c) => {
                if let Some(ref mut token) = self.current_token {
                    token.append_to_comment(c);
                }
            }
        }
    }

    /// [§ 13.2.5.53 DOCTYPE state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-state)
    ///
    /// Only the name is of interest, so the identifiers are collected as raw
    /// text and discarded.
    fn handle_doctype_state(&mut self) {
        match self.current_input_character {
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_doctype_token();
            }
            None => {
                self.log_parse_error("eof-in-doctype");
                self.emit_doctype_token();
                self.emit_eof_token();
            }
            Some(c) => self.doctype_buffer.push(c),
        }
    }

    /// "EOF - This is an eof-in-tag parse error. Emit an end-of-file token."
    ///
    /// The partially built tag is dropped.
    fn eof_in_tag(&mut self) {
        self.log_parse_error("eof-in-tag");
        self.current_token = None;
        self.emit_eof_token();
    }
}
