//! HTML parser for extracting link targets
//!
//! This module handles parsing a repository page to extract:
//! - `href` targets of `<a>` elements, in document order
//! - The page title, for logging

use crate::url::matches_suffix;
use crate::ParseError;
use scraper::{Html, Selector};

const LINK_SELECTOR: &str = "a[href]";
const TITLE_SELECTOR: &str = "title";

/// Extracted information from an HTML page
#[derive(Debug, Clone)]
pub struct ParsedPage {
    /// The page title (from <title> tag)
    pub title: Option<String>,

    /// Raw `href` values of every anchor, in document order
    pub links: Vec<String>,
}

impl ParsedPage {
    /// Returns the link targets whose path ends with `suffix`
    ///
    /// Document order and duplicates are kept.
    pub fn links_matching(&self, suffix: &str) -> Vec<String> {
        self.links
            .iter()
            .filter(|href| matches_suffix(href, suffix))
            .cloned()
            .collect()
    }
}

/// Parses HTML content and extracts anchor targets and the title
///
/// The HTML parser recovers from malformed markup the way browsers do, so the
/// only input rejected here is text with no markup in it at all.
///
/// # Returns
///
/// * `Ok(ParsedPage)` - Successfully parsed page
/// * `Err(ParseError)` - The input is not markup
///
/// # Example
///
/// ```
/// use sumi_harvest::crawler::parse_html;
///
/// let html = r#"<html><head><title>Repo</title></head><body><a href="/a.py">a</a></body></html>"#;
/// let parsed = parse_html(html).unwrap();
/// assert_eq!(parsed.title, Some("Repo".to_string()));
/// assert_eq!(parsed.links, vec!["/a.py".to_string()]);
/// ```
pub fn parse_html(html: &str) -> Result<ParsedPage, ParseError> {
    if !html.contains('<') {
        return Err(ParseError::NoMarkup);
    }

    let document = Html::parse_document(html);

    let title = extract_title(&document)?;
    let links = extract_hrefs(&document)?;

    Ok(ParsedPage { title, links })
}

/// Extracts the link targets of an HTML document that end with `suffix`
///
/// This is the link-extraction stage on its own: no fetching, no URL
/// resolution.
pub fn extract_links(html: &str, suffix: &str) -> Result<Vec<String>, ParseError> {
    parse_html(html).map(|parsed| parsed.links_matching(suffix))
}

fn selector(source: &str) -> Result<Selector, ParseError> {
    Selector::parse(source).map_err(|e| ParseError::Selector {
        selector: source.to_string(),
        message: format!("{:?}", e),
    })
}

/// Extracts the page title from the HTML document
fn extract_title(document: &Html) -> Result<Option<String>, ParseError> {
    let title_selector = selector(TITLE_SELECTOR)?;

    Ok(document
        .select(&title_selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty()))
}

/// Extracts every anchor `href` from the HTML document
fn extract_hrefs(document: &Html) -> Result<Vec<String>, ParseError> {
    let a_selector = selector(LINK_SELECTOR)?;

    Ok(document
        .select(&a_selector)
        .filter_map(|element| element.value().attr("href"))
        .map(|href| href.trim().to_string())
        .collect())
}
