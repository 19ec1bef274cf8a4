//! Tag events: the streaming interface between the tokenizer and analyzers.
//!
//! Consumers never see the token stream directly. They implement
//! [`TagEventSink`] and receive open-tag, close-tag and text callbacks in
//! document order, which is enough to track structural context without a
//! tree.

use std::collections::HashMap;
use std::fmt;

use crate::tokenizer::{Attribute, HTMLTokenizer, ParseError, Token};

/// Attribute name to value, looked up by exact key.
pub type AttributesMap = HashMap<String, String>;

/// Receives tag events in document order.
pub trait TagEventSink {
    /// A start tag, e.g. `<h2 id="References">`.
    fn on_open_tag(&mut self, name: &str, attributes: &AttributesMap);

    /// An end tag, e.g. `</ol>`.
    fn on_close_tag(&mut self, name: &str);

    /// A run of character data.
    fn on_text(&mut self, data: &str);
}

/// Build the attribute map for a tag. The first occurrence of a name wins.
#[must_use]
pub fn attributes_map(attributes: &[Attribute]) -> AttributesMap {
    let mut map = AttributesMap::with_capacity(attributes.len());
    for attr in attributes {
        let _ = map
            .entry(attr.name.clone())
            .or_insert_with(|| attr.value.clone());
    }
    map
}

/// Feed a token stream to `sink`.
///
/// A self-closing start tag produces an open event immediately followed by a
/// close event for the same name. Comments, DOCTYPEs and end-of-file produce
/// nothing.
pub fn dispatch<I, S>(tokens: I, sink: &mut S)
where
    I: IntoIterator<Item = Token>,
    S: TagEventSink + ?Sized,
{
    for token in tokens {
        match token {
            Token::StartTag {
                name,
                self_closing,
                attributes,
            } => {
                sink.on_open_tag(&name, &attributes_map(&attributes));
                if self_closing {
                    sink.on_close_tag(&name);
                }
            }
            Token::EndTag { name, .. } => sink.on_close_tag(&name),
            Token::Text { data } => sink.on_text(&data),
            Token::Comment { .. } | Token::Doctype { .. } | Token::EndOfFile => {}
        }
    }
}

/// Tokenize `html` and feed the result to `sink`.
///
/// Tokens are pulled from the tokenizer one at a time, so each event reaches
/// the sink as soon as its token is complete. Returns the parse errors the
/// tokenizer recovered from.
pub fn tokenize_into<S>(html: &str, sink: &mut S) -> Vec<ParseError>
where
    S: TagEventSink + ?Sized,
{
    let mut tokenizer = HTMLTokenizer::new(html.to_string());
    dispatch(tokenizer.by_ref(), sink);
    tokenizer.parse_errors().to_vec()
}

/// Forwards every event to two sinks, first then second.
pub struct Tee<'a, A: ?Sized, B: ?Sized> {
    first: &'a mut A,
    second: &'a mut B,
}

impl<'a, A, B> Tee<'a, A, B>
where
    A: TagEventSink + ?Sized,
    B: TagEventSink + ?Sized,
{
    /// Combine two sinks.
    #[must_use]
    pub const fn new(first: &'a mut A, second: &'a mut B) -> Self {
        Self { first, second }
    }
}

impl<A, B> TagEventSink for Tee<'_, A, B>
where
    A: TagEventSink + ?Sized,
    B: TagEventSink + ?Sized,
{
    fn on_open_tag(&mut self, name: &str, attributes: &AttributesMap) {
        self.first.on_open_tag(name, attributes);
        self.second.on_open_tag(name, attributes);
    }

    fn on_close_tag(&mut self, name: &str) {
        self.first.on_close_tag(name);
        self.second.on_close_tag(name);
    }

    fn on_text(&mut self, data: &str) {
        self.first.on_text(data);
        self.second.on_text(data);
    }
}

/// One recorded tag event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagEvent {
    /// See [`TagEventSink::on_open_tag`].
    Open {
        /// Tag name.
        name: String,
        /// Attributes by name.
        attributes: AttributesMap,
    },
    /// See [`TagEventSink::on_close_tag`].
    Close {
        /// Tag name.
        name: String,
    },
    /// See [`TagEventSink::on_text`].
    Text {
        /// Character data.
        data: String,
    },
}

impl fmt::Display for TagEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open { name, attributes } => {
                write!(f, "open  {name}")?;
                let mut names: Vec<_> = attributes.keys().collect();
                names.sort();
                for key in names {
                    write!(f, " {key}={:?}", attributes[key])?;
                }
                Ok(())
            }
            Self::Close { name } => write!(f, "close {name}"),
            Self::Text { data } => write!(f, "text  {data:?}"),
        }
    }
}

/// A sink that simply remembers every event. Used for debugging output and
/// tests.
#[derive(Debug, Default)]
pub struct EventRecorder {
    /// Events in the order they were received.
    pub events: Vec<TagEvent>,
}

impl TagEventSink for EventRecorder {
    fn on_open_tag(&mut self, name: &str, attributes: &AttributesMap) {
        self.events.push(TagEvent::Open {
            name: name.to_string(),
            attributes: attributes.clone(),
        });
    }

    fn on_close_tag(&mut self, name: &str) {
        self.events.push(TagEvent::Close {
            name: name.to_string(),
        });
    }

    fn on_text(&mut self, data: &str) {
        self.events.push(TagEvent::Text {
            data: data.to_string(),
        });
    }
}
