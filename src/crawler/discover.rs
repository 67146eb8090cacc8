//! Link discovery: root page → absolute file references

use crate::crawler::fetcher::fetch_document;
use crate::crawler::parser::parse_html;
use crate::url::{resolve_target, url_matches_suffix, FileReference, RepositoryLocation};
use crate::{HarvestError, ParseError};
use reqwest::Client;
use url::Url;

/// Discovers candidate files linked from a repository page
///
/// The base origin is fixed at construction and used to resolve relative
/// link targets. Absolute targets are kept as they are.
#[derive(Debug, Clone)]
pub struct Crawler {
    client: Client,
    base_origin: Url,
}

impl Crawler {
    /// Creates a crawler that resolves relative links against `base_origin`
    pub fn new(client: Client, base_origin: Url) -> Self {
        Self {
            client,
            base_origin,
        }
    }

    pub fn base_origin(&self) -> &Url {
        &self.base_origin
    }

    /// Fetches `root` and returns the linked files whose path ends with `suffix`
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<FileReference>)` - Matching references in document order,
    ///   duplicates included. Empty when nothing matches or the root body is
    ///   empty.
    /// * `Err(HarvestError::Fetch)` - The root page could not be retrieved
    /// * `Err(HarvestError::Parse)` - The root page is neither text nor XML,
    ///   or holds no markup
    pub async fn discover(
        &self,
        root: &RepositoryLocation,
        suffix: &str,
    ) -> Result<Vec<FileReference>, HarvestError> {
        tracing::info!("Discovering '{}' files from {}", suffix, root);

        let page = fetch_document(&self.client, root.as_url()).await?;

        if let Some(content_type) = &page.content_type {
            if !is_markup_content_type(content_type) {
                return Err(HarvestError::Parse {
                    url: root.to_string(),
                    source: ParseError::ContentMismatch(content_type.clone()),
                });
            }
        }

        if page.body.trim().is_empty() {
            tracing::info!("Root page is empty, no files to discover");
            return Ok(Vec::new());
        }

        let parsed = parse_html(&page.body).map_err(|source| HarvestError::Parse {
            url: root.to_string(),
            source,
        })?;

        if let Some(title) = &parsed.title {
            tracing::debug!("Root page title: {}", title);
        }
        tracing::debug!("Root page has {} links", parsed.links.len());

        let mut references = Vec::new();
        for target in parsed.links_matching(suffix) {
            match resolve_target(&target, &self.base_origin) {
                Some(url) if url_matches_suffix(&url, suffix) => {
                    references.push(FileReference::new(url));
                }
                Some(url) => tracing::debug!(
                    "Skipping {}: resolved path '{}' does not end with '{}'",
                    target,
                    url.path(),
                    suffix
                ),
                None => tracing::warn!("Skipping unresolvable link target: {}", target),
            }
        }

        tracing::info!("Discovered {} matching files", references.len());
        Ok(references)
    }
}

/// Checks a Content-Type header value for a type that may carry markup
///
/// Any `text/*` type is accepted, as are `application/xml` and the
/// `application/*+xml` family.
fn is_markup_content_type(content_type: &str) -> bool {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase();

    match mime.split_once('/') {
        Some(("text", subtype)) => !subtype.is_empty(),
        Some(("application", subtype)) => match subtype.strip_suffix("xml") {
            Some(prefix) => {
                let prefix = prefix.strip_suffix('+').unwrap_or(prefix);
                prefix.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
            }
            None => false,
        },
        _ => false,
    }
}
