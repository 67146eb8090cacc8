//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the harvester, including:
//! - Building HTTP clients with the configured user agent
//! - GET requests for the root page and discovered files
//! - Error classification into `FetchError`

use crate::config::FetcherConfig;
use crate::FetchError;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// A successfully retrieved response
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Final URL after redirects
    pub final_url: String,

    /// HTTP status code
    pub status_code: u16,

    /// Content-Type header value, if the server sent one
    pub content_type: Option<String>,

    /// Response body decoded as text
    pub body: String,
}

/// Builds an HTTP client with proper configuration
///
/// Redirects follow reqwest's default policy. A request timeout is only set
/// when `timeout-secs` is configured.
///
/// # Example
///
/// ```no_run
/// use sumi_harvest::config::FetcherConfig;
/// use sumi_harvest::crawler::build_http_client;
///
/// let client = build_http_client(&FetcherConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &FetcherConfig) -> Result<Client, reqwest::Error> {
    let mut builder = Client::builder()
        .user_agent(config.user_agent())
        .gzip(true)
        .brotli(true);

    if let Some(secs) = config.timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }

    builder.build()
}

/// Performs a single GET request
///
/// # Error Classification
///
/// | Condition | Result |
/// |-----------|--------|
/// | non-2xx status | `FetchError::Status` |
/// | timeout | `FetchError::Timeout` |
/// | connection refused / DNS / TLS | `FetchError::Connect` |
/// | empty body | `FetchError::EmptyBody` |
/// | anything else (decode, body read) | `FetchError::Http` |
///
/// The response is dropped before returning on every path, which releases the
/// connection back to the client's pool.
pub async fn fetch_url(client: &Client, url: &Url) -> Result<FetchedPage, FetchError> {
    let page = fetch_document(client, url).await?;

    if page.body.is_empty() {
        return Err(FetchError::EmptyBody {
            url: url.to_string(),
        });
    }

    Ok(page)
}

/// Performs a single GET request, accepting an empty 2xx body
///
/// Classifies failures like [`fetch_url`] except that an empty body is
/// returned as an empty page.
pub async fn fetch_document(client: &Client, url: &Url) -> Result<FetchedPage, FetchError> {
    tracing::debug!("GET {}", url);

    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(|e| classify_error(url, e))?;

    let status = response.status();
    let final_url = response.url().to_string();

    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_string());

    let body = response
        .text()
        .await
        .map_err(|e| classify_error(url, e))?;

    tracing::trace!("{} -> {} ({} bytes)", url, status, body.len());

    Ok(FetchedPage {
        final_url,
        status_code: status.as_u16(),
        content_type,
        body,
    })
}

/// Performs a single GET request and returns only the body text
pub async fn fetch_text(client: &Client, url: &Url) -> Result<String, FetchError> {
    fetch_url(client, url).await.map(|page| page.body)
}

/// Maps a transport error to a `FetchError`
fn classify_error(url: &Url, error: reqwest::Error) -> FetchError {
    let url = url.to_string();

    if error.is_timeout() {
        FetchError::Timeout { url }
    } else if error.is_connect() {
        FetchError::Connect { url }
    } else {
        FetchError::Http { url, source: error }
    }
}
