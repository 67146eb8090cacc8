//! Crawler module for repository file discovery and retrieval
//!
//! This module contains the network-facing stages, including:
//! - HTTP fetching with typed failures
//! - HTML parsing and link extraction
//! - Root-page link discovery
//! - Per-file content collection
//! - Overall pipeline coordination

mod collector;
mod coordinator;
mod discover;
mod fetcher;
mod parser;

pub use collector::{ContentCollector, FetchOutcome, RetrievedContent, RetryPolicy};
pub use coordinator::{run_harvest, Coordinator, Harvest};
pub use discover::Crawler;
pub use fetcher::{build_http_client, fetch_document, fetch_text, fetch_url, FetchedPage};
pub use parser::{extract_links, parse_html, ParsedPage};
