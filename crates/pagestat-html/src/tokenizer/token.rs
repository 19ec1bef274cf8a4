use core::fmt;

/// An attribute on a start or end tag token.
///
/// Per [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization):
/// "a list of attributes, each of which has a name and a value"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Attribute name, ASCII-lowercased.
    pub name: String,
    /// Attribute value with character references decoded. Empty for
    /// attributes written without a value.
    pub value: String,
}

impl Attribute {
    /// Create a new attribute with the given name and value.
    #[must_use]
    pub const fn new(name: String, value: String) -> Self {
        Self { name, value }
    }
}

/// A token produced by the shallow tokenizer.
///
/// Unlike a full WHATWG tokenizer, consecutive character data is folded into
/// a single [`Token::Text`] run, so a word is never split across two tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// `<!DOCTYPE ...>`. Only the name is kept.
    Doctype {
        /// "a name", lowercased. `None` for `<!DOCTYPE>`.
        name: Option<String>,
    },

    /// A start tag such as `<h2 id="References">`.
    StartTag {
        /// "a tag name", lowercased
        name: String,
        /// "a self-closing flag"
        self_closing: bool,
        /// "a list of attributes", duplicates already removed
        attributes: Vec<Attribute>,
    },

    /// An end tag such as `</p>`.
    EndTag {
        /// "a tag name", lowercased
        name: String,
        /// Attributes on end tags are a parse error but are still collected.
        attributes: Vec<Attribute>,
    },

    /// `<!-- ... -->` or a bogus comment.
    Comment {
        /// "data"
        data: String,
    },

    /// A run of character data between two markup constructs.
    Text {
        /// Decoded text. Raw (undecoded) inside `script` and `style`.
        data: String,
    },

    /// End-of-file token signals the end of input.
    EndOfFile,
}

impl Token {
    /// "When a start or end tag token is created, its self-closing flag must be
    /// unset (its other state is that it be set), and its attributes list must
    /// be empty."
    #[must_use]
    pub const fn new_start_tag() -> Self {
        Self::StartTag {
            name: String::new(),
            self_closing: false,
            attributes: Vec::new(),
        }
    }

    /// Create a new end tag token.
    #[must_use]
    pub const fn new_end_tag() -> Self {
        Self::EndTag {
            name: String::new(),
            attributes: Vec::new(),
        }
    }

    /// Create a new comment token with empty data.
    #[must_use]
    pub const fn new_comment() -> Self {
        Self::Comment {
            data: String::new(),
        }
    }

    /// Returns true if this is an end-of-file token.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self, Self::EndOfFile)
    }

    /// The tag name for start and end tags.
    #[must_use]
    pub fn tag_name(&self) -> Option<&str> {
        match self {
            Self::StartTag { name, .. } | Self::EndTag { name, .. } => Some(name),
            _ => None,
        }
    }

    /// [§ 13.2.5.8 Tag name state](https://html.spec.whatwg.org/multipage/parsing.html#tag-name-state)
    ///
    /// "Append the current input character to the current tag token's tag name."
    ///
    /// Does nothing on non-tag tokens.
    pub fn append_to_tag_name(&mut self, c: char) {
        if let Self::StartTag { name, .. } | Self::EndTag { name, .. } = self {
            name.push(c);
        }
    }

    /// [§ 13.2.5.40 Self-closing start tag state](https://html.spec.whatwg.org/multipage/parsing.html#self-closing-start-tag-state)
    ///
    /// "Set the self-closing flag of the current tag token."
    pub fn set_self_closing(&mut self) {
        if let Self::StartTag { self_closing, .. } = self {
            *self_closing = true;
        }
    }

    /// [§ 13.2.5.32 Before attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#before-attribute-name-state)
    ///
    /// "Start a new attribute in the current tag token. Set that attribute
    /// name and value to the empty string."
    pub fn start_new_attribute(&mut self) {
        if let Self::StartTag { attributes, .. } | Self::EndTag { attributes, .. } = self {
            attributes.push(Attribute::new(String::new(), String::new()));
        }
    }

    /// "Append the current input character to the current attribute's name."
    pub fn append_to_current_attribute_name(&mut self, c: char) {
        if let Self::StartTag { attributes, .. } | Self::EndTag { attributes, .. } = self
            && let Some(attr) = attributes.last_mut()
        {
            attr.name.push(c);
        }
    }

    /// "Append the current input character to the current attribute's value."
    pub fn append_to_current_attribute_value(&mut self, c: char) {
        if let Self::StartTag { attributes, .. } | Self::EndTag { attributes, .. } = self
            && let Some(attr) = attributes.last_mut()
        {
            attr.value.push(c);
        }
    }

    /// [§ 13.2.5.33 Attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-name-state)
    ///
    /// "if there is already an attribute on the token with the exact same
    /// name, then this is a duplicate-attribute parse error"
    #[must_use]
    pub fn current_attribute_name_is_duplicate(&self) -> bool {
        match self {
            Self::StartTag { attributes, .. } | Self::EndTag { attributes, .. } => {
                attributes.split_last().is_some_and(|(current, earlier)| {
                    earlier.iter().any(|attr| attr.name == current.name)
                })
            }
            _ => false,
        }
    }

    /// Remove the current (last) attribute from the token.
    /// Used when a duplicate attribute is detected.
    pub fn remove_current_attribute(&mut self) {
        if let Self::StartTag { attributes, .. } | Self::EndTag { attributes, .. } = self {
            let _ = attributes.pop();
        }
    }

    /// Append a character to a comment token's data.
    pub fn append_to_comment(&mut self, c: char) {
        if let Self::Comment { data } = self {
            data.push(c);
        }
    }

    /// Returns true if this is a comment token with no data yet.
    #[must_use]
    pub fn is_empty_comment(&self) -> bool {
        matches!(self, Self::Comment { data } if data.is_empty())
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Doctype { name } => {
                write!(f, "DOCTYPE")?;
                if let Some(n) = name {
                    write!(f, " {n}")?;
                }
                Ok(())
            }
            Self::StartTag {
                name,
                self_closing,
                attributes,
            } => {
                write!(f, "<{name}")?;
                for attr in attributes {
                    write!(f, " {}=\"{}\"", attr.name, attr.value)?;
                }
                if *self_closing {
                    write!(f, " /")?;
                }
                write!(f, ">")
            }
            Self::EndTag { name, .. } => write!(f, "</{name}>"),
            Self::Comment { data } => write!(f, "<!--{data}-->"),
            Self::Text { data } => write!(f, "{data:?}"),
            Self::EndOfFile => write!(f, "EOF"),
        }
    }
}
