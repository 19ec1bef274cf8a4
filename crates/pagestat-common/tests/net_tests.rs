//! Integration tests for the page fetcher.
//!
//! Every test talks to a throwaway server on 127.0.0.1 so nothing leaves the
//! machine.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread;
use std::time::{Duration, Instant};

use pagestat_common::warning::was_warned;
use pagestat_common::{FetchConfig, FetchError, fetch_page, scrape};

/// Helper to serve exactly one canned HTTP response and return the URL
fn serve_once(response: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let _handle = thread::spawn(move || {
        if let Ok((mut stream, _)) = listener.accept() {
            let mut buf = [0u8; 4096];
            let _ = stream.read(&mut buf);
            let _ = stream.write_all(response.as_bytes());
            let _ = stream.flush();
        }
    });
    format!("http://{addr}/")
}

fn quick_config() -> FetchConfig {
    FetchConfig::default().with_timeout(Duration::from_secs(2))
}

#[test]
fn test_default_timeout_is_five_seconds() {
    assert_eq!(FetchConfig::default().timeout, Duration::from_secs(5));
}

#[test]
fn test_ok_response_returns_body() {
    let url = serve_once(
        "HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nContent-Length: 26\r\nConnection: close\r\n\r\n<html><body></body></html>",
    );
    let body = fetch_page(&url, &quick_config()).unwrap();
    assert_eq!(body, "<html><body></body></html>");
}

#[test]
fn test_not_found_is_a_status_error() {
    let url = serve_once("HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n");
    match fetch_page(&url, &quick_config()) {
        Err(FetchError::Status(code)) => assert_eq!(code, 404),
        other => panic!("Expected status error, got {other:?}"),
    }
}

#[test]
fn test_non_200_success_is_still_a_failure() {
    let url = serve_once("HTTP/1.1 204 No Content\r\nConnection: close\r\n\r\n");
    assert!(matches!(
        fetch_page(&url, &quick_config()),
        Err(FetchError::Status(204))
    ));
}

#[test]
fn test_scrape_folds_failure_into_none() {
    let url = serve_once("HTTP/1.1 500 Internal Server Error\r\nContent-Length: 0\r\nConnection: close\r\n\r\n");
    assert_eq!(scrape(&url, &quick_config()), None);
    assert!(was_warned("Fetch", &format!("{url}: HTTP error: 500")));
}

#[test]
fn test_scrape_returns_content_on_success() {
    let url = serve_once("HTTP/1.1 200 OK\r\nContent-Length: 2\r\nConnection: close\r\n\r\nok");
    assert_eq!(scrape(&url, &quick_config()).as_deref(), Some("ok"));
}

#[test]
fn test_silent_server_times_out() {
    // The kernel completes the handshake from the backlog, but nobody ever
    // answers.
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}/", listener.local_addr().unwrap());
    let config = FetchConfig::default().with_timeout(Duration::from_millis(300));

    let start = Instant::now();
    let result = fetch_page(&url, &config);
    let elapsed = start.elapsed();

    assert!(matches!(result, Err(FetchError::Timeout(_))));
    assert!(elapsed < Duration::from_secs(5), "took {elapsed:?}");
    assert_eq!(scrape(&url, &config), None);
    drop(listener);
}

#[test]
fn test_unreachable_host_is_a_transport_error() {
    // Bind then drop so the port is very likely closed.
    let addr = TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap();
    let url = format!("http://{addr}/");
    assert!(matches!(
        fetch_page(&url, &quick_config()),
        Err(FetchError::Transport(_))
    ));
}
