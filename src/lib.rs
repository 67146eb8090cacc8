//! Sumi-Harvest: a repository token harvester
//!
//! This crate discovers source files linked from a repository's web page,
//! downloads their contents, ranks the most frequent tokens, and renders a
//! script templated on those tokens.

pub mod analysis;
pub mod config;
pub mod crawler;
pub mod output;
pub mod url;

use thiserror::Error;

/// Main error type for Sumi-Harvest operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("HTML parse error for {url}: {source}")]
    Parse { url: String, source: ParseError },

    #[error("URL error: {0}")]
    Url(#[from] UrlError),

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("IO error writing {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
}

/// Errors raised by a single HTTP GET
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Connection failed for {url}")]
    Connect { url: String },

    #[error("HTTP status {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Empty response body for {url}")]
    EmptyBody { url: String },

    #[error("Fetch task for {url} did not complete: {reason}")]
    Aborted { url: String, reason: String },
}

impl FetchError {
    /// The URL the failed request was sent to
    pub fn url(&self) -> &str {
        match self {
            Self::Http { url, .. }
            | Self::Timeout { url }
            | Self::Connect { url }
            | Self::Status { url, .. }
            | Self::EmptyBody { url }
            | Self::Aborted { url, .. } => url,
        }
    }

    /// Returns true if retrying the request could plausibly succeed
    ///
    /// Timeouts, connection failures and 5xx responses are transient.
    /// Client errors (4xx) and empty bodies are not.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Timeout { .. } | Self::Connect { .. } => true,
            Self::Status { status, .. } => *status >= 500,
            Self::Http { .. } | Self::EmptyBody { .. } | Self::Aborted { .. } => false,
        }
    }
}

/// Errors raised when a document cannot be read as hyperlink-bearing markup
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("unsupported content type '{0}'")]
    ContentMismatch(String),

    #[error("document contains no markup")]
    NoMarkup,

    #[error("invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),
}

/// Result type alias for Sumi-Harvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use analysis::{FrequencyAnalyzer, RankedFeature, RankedFeatures, TokenFrequency};
pub use config::Config;
pub use crawler::{ContentCollector, Coordinator, Crawler, RetrievedContent};
pub use crate::url::{FileReference, RepositoryLocation};
