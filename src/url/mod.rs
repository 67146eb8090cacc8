//! URL handling module for Sumi-Harvest
//!
//! This module provides the typed locations the pipeline passes around,
//! link-target resolution against a base origin, and suffix filtering.

mod resolve;
mod suffix;

use crate::{UrlError, UrlResult};
use std::fmt;
use url::Url;

// Re-export main functions
pub use resolve::resolve_target;
pub use suffix::{matches_suffix, target_path, url_matches_suffix};

/// Parses an absolute HTTP(S) URL
fn parse_http_url(url_str: &str) -> UrlResult<Url> {
    let url = Url::parse(url_str.trim()).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    Ok(url)
}

/// The page a crawl starts from
///
/// # Examples
///
/// ```
/// use sumi_harvest::url::RepositoryLocation;
///
/// let root = RepositoryLocation::parse("https://github.com/username/repository").unwrap();
/// assert_eq!(root.as_url().host_str(), Some("github.com"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryLocation(Url);

impl RepositoryLocation {
    /// Parses an absolute HTTP(S) URL into a repository location
    pub fn parse(url_str: &str) -> UrlResult<Self> {
        parse_http_url(url_str).map(Self)
    }

    pub fn as_url(&self) -> &Url {
        &self.0
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for RepositoryLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

/// An absolute URL to a discovered candidate file
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileReference(Url);

impl FileReference {
    /// Wraps an already-resolved URL
    pub fn new(url: Url) -> Self {
        Self(url)
    }

    /// Parses an absolute HTTP(S) URL into a file reference
    pub fn parse(url_str: &str) -> UrlResult<Self> {
        parse_http_url(url_str).map(Self)
    }

    pub fn as_url(&self) -> &Url {
        &self.0
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// The path component of the reference (no query, no fragment)
    pub fn path(&self) -> &str {
        self.0.path()
    }

    /// The path with percent-escapes decoded
    pub fn decoded_path(&self) -> String {
        suffix::decoded_path(&self.0)
    }
}

impl fmt::Display for FileReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}
