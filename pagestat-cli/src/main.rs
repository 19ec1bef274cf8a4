//! pagestat - word, hyperlink and reference statistics for web pages
//!
//! Fetches a page (or reads a local one), follows its tag events and prints:
//! - the stopwords that were ignored
//! - how many distinct words its paragraphs contain
//! - how many hyperlinks it has
//! - how many entries its References list has
//!
//! The `text` subcommand counts words and numbers in a line of plain text.

mod args;
mod input;

use std::fs;
use std::io::{self, BufRead};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use pagestat_common::{FetchConfig, scrape};
use pagestat_common::warning::warn_once;
use pagestat_html::{EventRecorder, ParseError, TagEvent, Tee, tokenize_into};
use pagestat_metrics::{PageReport, StopwordSet, TagStateTracker, TextReport, WordCounter};

use args::{Request, Source};

/// pagestat - count words, hyperlinks and references on a web page
#[derive(Parser, Debug)]
#[command(name = "pagestat")]
#[command(author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
#[command(after_help = r#"EXAMPLES:
    # Analyze the default page (https://en.wikipedia.org/wiki/Cat)
    pagestat

    # Analyze the default page and print every word with its count
    pagestat wordmap

    # Analyze another page with the word table
    pagestat https://en.wikipedia.org/wiki/Bjarne_Stroustrup wordmap

    # Read the URL from stdin
    echo https://en.wikipedia.org/wiki/C++ | pagestat -

    # Analyze a saved page or an inline string
    pagestat --file ./page.html
    pagestat --html '<body><p>Hello world</p></body>'

    # Count words and numbers in a line of text
    pagestat text

SAMPLE PAGES:
    https://en.wikipedia.org/wiki/Python_(programming_language)
    https://en.wikipedia.org/wiki/C++
    https://en.wikipedia.org/wiki/Bjarne_Stroustrup
    https://en.wikipedia.org/wiki/Cat
    https://en.wikipedia.org/wiki/Miss_Meyers
"#)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Page to analyze, `-` to read it from stdin, or `wordmap` alone to
    /// print the word table for the default page
    #[arg(value_name = "URL")]
    url: Option<String>,

    /// `wordmap` to print the word table
    #[arg(value_name = "WORDMAP")]
    wordmap: Option<String>,

    /// Print the word table after the summary
    #[arg(short = 'w', long)]
    word_table: bool,

    /// Analyze a local HTML file instead of fetching
    #[arg(long, value_name = "PATH")]
    file: Option<PathBuf>,

    /// Analyze an HTML string directly instead of fetching
    #[arg(long, value_name = "HTML")]
    html: Option<String>,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECS", default_value_t = 5)]
    timeout: u64,

    /// Comma-separated words to ignore instead of the built-in list
    #[arg(long, value_name = "WORDS")]
    stopwords: Option<String>,

    /// Print the tag event stream before the summary
    #[arg(long)]
    dump_events: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Count words and numbers in one line of plain text
    Text {
        /// Text to count instead of prompting for it
        #[arg(long, value_name = "TEXT")]
        input: Option<String>,

        /// Comma-separated words to ignore (none by default)
        #[arg(long, value_name = "WORDS")]
        stopwords: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Some(Command::Text { input, stopwords }) = cli.command {
        let stopwords = stopwords
            .as_deref()
            .map_or_else(StopwordSet::empty, StopwordSet::parse_list);
        return run_text(input, stopwords);
    }

    let stopwords = cli
        .stopwords
        .as_deref()
        .map_or_else(StopwordSet::default, StopwordSet::parse_list);
    let config = FetchConfig::default().with_timeout(Duration::from_secs(cli.timeout));
    let dump_events = cli.dump_events;
    let request = args::resolve(
        cli.url.as_deref(),
        cli.wordmap.as_deref(),
        cli.file,
        cli.html,
        cli.word_table,
    )?;

    run_page(&request, &config, stopwords, dump_events)
}

/// Analyze one HTML page and print its report
fn run_page(
    request: &Request,
    config: &FetchConfig,
    stopwords: StopwordSet,
    dump_events: bool,
) -> anyhow::Result<()> {
    let Some(html) = load_html(&request.source, config)? else {
        warn_once("pagestat", "Request failed");
        return Ok(());
    };

    let counter = WordCounter::new(stopwords);
    let mut tracker = TagStateTracker::new(&counter);
    if dump_events {
        let mut recorder = EventRecorder::default();
        let errors = tokenize_into(&html, &mut Tee::new(&mut recorder, &mut tracker));
        print_events(&recorder.events, &errors);
    } else {
        let _ = tokenize_into(&html, &mut tracker);
    }

    if let Some(metrics) = tracker.finish() {
        let report = PageReport {
            stopwords: counter.stopwords(),
            metrics: &metrics,
            show_word_table: request.show_word_table,
        };
        print!("{report}");
    } else {
        warn_once("Tracker", "no complete <body> region found, nothing to report");
    }
    Ok(())
}

/// Load HTML from the requested source. `None` means the fetch failed.
fn load_html(source: &Source, config: &FetchConfig) -> anyhow::Result<Option<String>> {
    match source {
        Source::Url(url) => Ok(scrape(url, config)),
        Source::StdinUrl => {
            let url = read_url_from_stdin()?;
            Ok(scrape(&url, config))
        }
        Source::File(path) => fs::read_to_string(path)
            .map(Some)
            .with_context(|| format!("Failed to read {}", path.display())),
        Source::Inline(html) => Ok(Some(html.clone())),
    }
}

fn read_url_from_stdin() -> anyhow::Result<String> {
    let mut line = String::new();
    let _ = io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read URL from stdin")?;
    let url = line.trim();
    if url.is_empty() {
        anyhow::bail!("No URL on stdin");
    }
    Ok(url.to_string())
}

/// Print every tag event in document order, then any parse errors
/// (debugging aid)
fn print_events(events: &[TagEvent], errors: &[ParseError]) {
    println!("=== Tag Events ===");
    for event in events {
        println!("{event}");
    }

    if !errors.is_empty() {
        println!("\n=== Parse Errors ===");
        for error in errors {
            println!("  - {error}");
        }
    }
    println!();
}

/// Plain-text mode: one line in, number count and word table out
fn run_text(text: Option<String>, stopwords: StopwordSet) -> anyhow::Result<()> {
    let Some(line) = text.map_or_else(prompt_for_line, |line| Ok(Some(line)))? else {
        return Ok(());
    };

    let count = WordCounter::new(stopwords).count(&line);
    print!("{}", TextReport { count: &count });
    Ok(())
}

fn prompt_for_line() -> anyhow::Result<Option<String>> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    input::read_line(&mut stdin.lock(), &mut stdout.lock()).context("Failed to read input")
}
