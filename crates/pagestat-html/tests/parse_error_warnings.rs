//! Parse errors reach the warning channel once per error code.
//!
//! Kept in its own test binary: it counts entries in the process-wide
//! warning set, which other tests would disturb.

use pagestat_common::warning::{warning_count, was_warned};
use pagestat_html::{EventRecorder, tokenize_into};

#[test]
fn test_repeated_parse_errors_warn_once_per_code() {
    let before = warning_count();
    let html = format!("<body><p>{}</p></body>", "1 < 2 ".repeat(500));

    let errors = tokenize_into(&html, &mut EventRecorder::default());

    assert_eq!(errors.len(), 500);
    assert!(
        errors
            .iter()
            .all(|e| e.code == "invalid-first-character-of-tag-name")
    );
    let mut positions: Vec<usize> = errors.iter().map(|e| e.position).collect();
    positions.dedup();
    assert_eq!(positions.len(), 500);

    assert!(was_warned(
        "HTML Tokenizer",
        "invalid-first-character-of-tag-name"
    ));
    assert_eq!(warning_count(), before + 1);
}
