//! Integration tests for tag event dispatch.

use std::cell::RefCell;

use pagestat_html::{
    Attribute, AttributesMap, EventRecorder, TagEvent, TagEventSink, Tee, Token, attributes_map,
    dispatch, tokenize_into,
};

/// Helper to record the event stream for a document
fn events(html: &str) -> Vec<TagEvent> {
    let mut recorder = EventRecorder::default();
    let _ = tokenize_into(html, &mut recorder);
    recorder.events
}

fn open(name: &str) -> TagEvent {
    TagEvent::Open {
        name: name.to_string(),
        attributes: AttributesMap::new(),
    }
}

fn close(name: &str) -> TagEvent {
    TagEvent::Close {
        name: name.to_string(),
    }
}

fn text(data: &str) -> TagEvent {
    TagEvent::Text {
        data: data.to_string(),
    }
}

#[test]
fn test_events_in_document_order() {
    assert_eq!(
        events("<body><p>Hi there</p></body>"),
        vec![
            open("body"),
            open("p"),
            text("Hi there"),
            close("p"),
            close("body"),
        ]
    );
}

#[test]
fn test_self_closing_emits_open_then_close() {
    assert_eq!(events("<p/>"), vec![open("p"), close("p")]);
}

#[test]
fn test_comments_and_doctype_are_silent() {
    assert_eq!(
        events("<!DOCTYPE html><!-- hidden --><a></a>"),
        vec![open("a"), close("a")]
    );
}

#[test]
fn test_attributes_are_a_typed_map() {
    let recorded = events(r#"<h2 id="References" class="mw-headline">"#);
    match &recorded[0] {
        TagEvent::Open { name, attributes } => {
            assert_eq!(name, "h2");
            assert_eq!(attributes.get("id").map(String::as_str), Some("References"));
            assert_eq!(
                attributes.get("class").map(String::as_str),
                Some("mw-headline")
            );
        }
        other => panic!("Expected open event, got {other:?}"),
    }
}

#[test]
fn test_attributes_map_first_wins() {
    let map = attributes_map(&[
        Attribute::new("id".into(), "first".into()),
        Attribute::new("id".into(), "second".into()),
    ]);
    assert_eq!(map.len(), 1);
    assert_eq!(map["id"], "first");
}

#[test]
fn test_dispatch_accepts_handwritten_tokens() {
    let mut recorder = EventRecorder::default();
    dispatch(
        vec![
            Token::EndTag {
                name: "ol".into(),
                attributes: Vec::new(),
            },
            Token::Text { data: "x".into() },
            Token::EndOfFile,
        ],
        &mut recorder,
    );
    assert_eq!(recorder.events, vec![close("ol"), text("x")]);
}

#[test]
fn test_malformed_markup_still_streams() {
    let mut recorder = EventRecorder::default();
    let errors = tokenize_into("<body><p>a < b<p>c</body", &mut recorder);
    assert!(!errors.is_empty());
    assert_eq!(
        recorder.events,
        vec![open("body"), open("p"), text("a < b"), open("p"), text("c")]
    );
}

#[test]
fn test_display() {
    let recorded = events(r#"<a href="/x" class="y">go</a>"#);
    let lines: Vec<String> = recorded.iter().map(ToString::to_string).collect();
    assert_eq!(
        lines,
        vec![
            r#"open  a class="y" href="/x""#.to_string(),
            r#"text  "go""#.to_string(),
            "close a".to_string(),
        ]
    );
}

#[test]
fn test_tee_forwards_to_both_sinks_in_one_pass() {
    let mut first = EventRecorder::default();
    let mut second = EventRecorder::default();
    let errors = tokenize_into(
        "<body><p>x < y</p><br/></body>",
        &mut Tee::new(&mut first, &mut second),
    );

    assert_eq!(errors.len(), 1);
    assert_eq!(first.events, second.events);
    assert_eq!(
        first.events,
        vec![
            open("body"),
            open("p"),
            text("x < y"),
            close("p"),
            open("br"),
            close("br"),
            close("body"),
        ]
    );
}

/// Sink that appends its name to a shared log on every event
struct Named<'a> {
    name: &'static str,
    log: &'a RefCell<Vec<&'static str>>,
}

impl TagEventSink for Named<'_> {
    fn on_open_tag(&mut self, _name: &str, _attributes: &AttributesMap) {
        self.log.borrow_mut().push(self.name);
    }

    fn on_close_tag(&mut self, _name: &str) {
        self.log.borrow_mut().push(self.name);
    }

    fn on_text(&mut self, _data: &str) {
        self.log.borrow_mut().push(self.name);
    }
}

#[test]
fn test_tee_calls_first_sink_first() {
    let log = RefCell::new(Vec::new());
    let mut a = Named { name: "a", log: &log };
    let mut b = Named { name: "b", log: &log };
    let _ = tokenize_into("<p>t</p>", &mut Tee::new(&mut a, &mut b));
    assert_eq!(log.into_inner(), vec!["a", "b", "a", "b", "a", "b"]);
}
