//! Property tests for the word counter and the tag-state tracker.

#![allow(clippy::needless_pass_by_value)]

use std::collections::BTreeSet;

use pagestat_metrics::{DEFAULT_STOPWORDS, StopwordSet, WordCounter, WordFrequency, analyze_html};
use quickcheck_macros::quickcheck;

fn key_set(words: &WordFrequency) -> BTreeSet<String> {
    words.keys().map(str::to_string).collect()
}

#[quickcheck]
fn prop_counting_own_keys_reproduces_them(text: String) -> bool {
    let counter = WordCounter::default();
    let first = counter.count(&text).words;

    let joined = first.keys().collect::<Vec<_>>().join(" ");
    let second = counter.count(&joined).words;

    key_set(&first) == key_set(&second) && second.iter().all(|(_, count)| count == 1)
}

#[quickcheck]
fn prop_ascii_case_does_not_matter(text: String) -> bool {
    let text: String = text.chars().filter(char::is_ascii).collect();
    let counter = WordCounter::default();

    let mut upper = WordFrequency::new();
    let mut lower = WordFrequency::new();
    counter.accumulate(&text.to_ascii_uppercase(), &mut upper);
    counter.accumulate(&text.to_ascii_lowercase(), &mut lower);

    upper == lower
        && counter.count(&text.to_ascii_uppercase()) == counter.count(&text.to_ascii_lowercase())
}

#[quickcheck]
fn prop_stopwords_never_become_keys(words: Vec<String>, picks: Vec<u8>) -> bool {
    let mut text = words.join(" ");
    for pick in picks {
        let stopword = DEFAULT_STOPWORDS[usize::from(pick) % DEFAULT_STOPWORDS.len()];
        text.push(' ');
        text.push_str(&stopword.to_uppercase());
        text.push(' ');
        text.push_str(stopword);
    }

    let stopwords = StopwordSet::default();
    let counter = WordCounter::new(stopwords.clone());
    let mut html_words = WordFrequency::new();
    counter.accumulate(&text, &mut html_words);
    let plain_words = counter.count(&text).words;

    html_words
        .keys()
        .chain(plain_words.keys())
        .all(|word| !stopwords.contains(word))
}

#[quickcheck]
fn prop_link_count_is_anchor_open_count(tags: Vec<bool>) -> bool {
    let mut html = String::from("<body>");
    for open in &tags {
        html.push_str(if *open { r#"<a href="x">"# } else { "</a>" });
    }
    html.push_str("</body>");

    let expected = tags.iter().filter(|open| **open).count();
    analyze_html(&html, &WordCounter::default()).is_some_and(|m| m.link_count == expected)
}

#[quickcheck]
fn prop_unclosed_body_is_never_valid(text: String) -> bool {
    let text: String = text.chars().filter(|&c| c != '<').collect();
    analyze_html(&format!("<body><p>{text}"), &WordCounter::default()).is_none()
}

#[quickcheck]
fn prop_any_input_is_analyzed(html: String) -> bool {
    let stopwords = StopwordSet::default();
    analyze_html(&html, &WordCounter::new(stopwords.clone()))
        .is_none_or(|metrics| metrics.words.keys().all(|word| !stopwords.contains(word)))
}
