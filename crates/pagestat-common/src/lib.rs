//! Common utilities for pagestat.
//!
//! This crate provides shared infrastructure used by the other crates:
//! - **Warning System** - colored terminal output for recoverable problems
//! - **Networking** - the blocking HTTP GET used to fetch pages

pub mod net;
pub mod warning;

pub use net::{DEFAULT_TIMEOUT, FetchConfig, FetchError, fetch_page, scrape};
