//! Diagnostics with colored terminal output.
//!
//! Provides deduplication to avoid spamming the same warning multiple times.
//! Used by the tokenizer, the fetcher and the CLI to report recoverable
//! problems. Everything here goes to stderr so that stdout only carries the
//! report itself.

use std::collections::HashSet;
use std::sync::Mutex;

use owo_colors::OwoColorize;

/// Global set of warnings we've already printed (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Warn about a recoverable problem (prints once per unique message)
///
/// # Example
/// ```ignore
/// warn_once("HTML Tokenizer", "eof-in-tag at position 42");
/// ```
///
/// # Panics
/// Panics if the global warning set mutex is poisoned.
pub fn warn_once(component: &str, message: &str) {
    let key = format!("[{component}] {message}");
    let should_print = WARNED
        .lock()
        .unwrap()
        .get_or_insert_with(HashSet::new)
        .insert(key);

    if should_print {
        eprintln!("{}", format!("[pagestat {component}] ⚠ {message}").yellow());
    }
}

/// Print a progress line for the user. Never deduplicated.
pub fn info(component: &str, message: &str) {
    eprintln!("{} {message}", format!("[pagestat {component}]").dimmed());
}

/// Returns true if this exact warning has already been printed.
///
/// # Panics
/// Panics if the global warning set mutex is poisoned.
#[must_use]
pub fn was_warned(component: &str, message: &str) -> bool {
    let key = format!("[{component}] {message}");
    WARNED
        .lock()
        .unwrap()
        .as_ref()
        .is_some_and(|set| set.contains(&key))
}

/// Number of distinct warnings printed since the last clear.
///
/// # Panics
/// Panics if the global warning set mutex is poisoned.
#[must_use]
pub fn warning_count() -> usize {
    WARNED.lock().unwrap().as_ref().map_or(0, HashSet::len)
}

/// Clear all recorded warnings (call before analyzing a new page)
///
/// # Panics
/// Panics if the global warning set mutex is poisoned.
pub fn clear_warnings() {
    let mut guard = WARNED.lock().unwrap();
    if let Some(set) = guard.as_mut() {
        set.clear();
    }
}
