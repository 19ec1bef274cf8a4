//! Turning command-line arguments into an analysis request.

use std::path::PathBuf;

use anyhow::bail;

/// Page analyzed when no URL is given.
pub const DEFAULT_URL: &str = "https://en.wikipedia.org/wiki/Cat";

/// Positional literal that asks for the word table.
pub const WORDMAP: &str = "wordmap";

/// Positional URL meaning "read the URL from stdin".
pub const STDIN_URL: &str = "-";

/// Where the HTML comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// Fetch this URL.
    Url(String),
    /// Read a URL from stdin, then fetch it.
    StdinUrl,
    /// Read a local file.
    File(PathBuf),
    /// Analyze this string as-is.
    Inline(String),
}

/// A fully resolved page analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// Input to analyze.
    pub source: Source,
    /// Print the word table after the summary.
    pub show_word_table: bool,
}

fn is_wordmap(arg: &str) -> bool {
    arg.to_lowercase() == WORDMAP
}

/// Apply the positional rules: `[URL] [wordmap]`.
///
/// With two arguments the first is the URL and the second may request the
/// table. A single argument that reads `wordmap` requests the table and keeps
/// the default URL; any other single argument is the URL.
#[must_use]
pub fn split_positionals(first: Option<&str>, second: Option<&str>) -> (Option<String>, bool) {
    match (first, second) {
        (Some(url), Some(flag)) => (Some(url.to_string()), is_wordmap(flag)),
        (Some(only), None) if is_wordmap(only) => (None, true),
        (Some(url), None) => (Some(url.to_string()), false),
        (None, _) => (None, false),
    }
}

/// Combine positionals with `--file`, `--html` and `--word-table`.
///
/// # Errors
///
/// Returns an error if more than one input source is named.
pub fn resolve(
    first: Option<&str>,
    second: Option<&str>,
    file: Option<PathBuf>,
    html: Option<String>,
    word_table: bool,
) -> anyhow::Result<Request> {
    let (url, wordmap) = split_positionals(first, second);

    let source = match (url, file, html) {
        (None, None, None) => Source::Url(DEFAULT_URL.to_string()),
        (Some(url), None, None) if url == STDIN_URL => Source::StdinUrl,
        (Some(url), None, None) => Source::Url(url),
        (None, Some(path), None) => Source::File(path),
        (None, None, Some(html)) => Source::Inline(html),
        _ => bail!("Give at most one of a URL, --file or --html"),
    };

    Ok(Request {
        source,
        show_word_table: wordmap || word_table,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_arguments_uses_default_url() {
        let request = resolve(None, None, None, None, false).unwrap();
        assert_eq!(request.source, Source::Url(DEFAULT_URL.to_string()));
        assert!(!request.show_word_table);
    }

    #[test]
    fn test_single_wordmap_keeps_default_url() {
        for arg in ["wordmap", "WordMap", "WORDMAP"] {
            assert_eq!(split_positionals(Some(arg), None), (None, true), "{arg}");
        }
    }

    #[test]
    fn test_single_url() {
        assert_eq!(
            split_positionals(Some("https://example.com"), None),
            (Some("https://example.com".to_string()), false)
        );
    }

    #[test]
    fn test_url_then_flag() {
        assert_eq!(
            split_positionals(Some("https://example.com"), Some("Wordmap")),
            (Some("https://example.com".to_string()), true)
        );
        assert_eq!(
            split_positionals(Some("https://example.com"), Some("table")),
            (Some("https://example.com".to_string()), false)
        );
    }

    #[test]
    fn test_wordmap_then_anything_is_a_url() {
        // Two arguments: the first is always the URL.
        assert_eq!(
            split_positionals(Some("wordmap"), Some("wordmap")),
            (Some("wordmap".to_string()), true)
        );
    }

    #[test]
    fn test_stdin_url() {
        let request = resolve(Some("-"), Some("wordmap"), None, None, false).unwrap();
        assert_eq!(request.source, Source::StdinUrl);
        assert!(request.show_word_table);
    }

    #[test]
    fn test_file_with_wordmap() {
        let request = resolve(
            Some("wordmap"),
            None,
            Some(PathBuf::from("page.html")),
            None,
            false,
        )
        .unwrap();
        assert_eq!(request.source, Source::File(PathBuf::from("page.html")));
        assert!(request.show_word_table);
    }

    #[test]
    fn test_inline_with_flag() {
        let request = resolve(None, None, None, Some("<body></body>".into()), true).unwrap();
        assert_eq!(request.source, Source::Inline("<body></body>".into()));
        assert!(request.show_word_table);
    }

    #[test]
    fn test_conflicting_sources() {
        assert!(resolve(Some("https://example.com"), None, None, Some("<p>".into()), false).is_err());
        assert!(resolve(None, None, Some("a.html".into()), Some("<p>".into()), false).is_err());
    }
}
