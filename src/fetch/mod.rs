//! Page fetching collaborators.
//!
//! The extraction engine never talks to the network itself; it asks a
//! [`PageFetcher`] for a portal path and receives a [`ParsedDocument`].
//! Transport failures surface as `AppError::Fetch`/`AppError::Http` and
//! are never retried here.

mod http;
mod memory;

use async_trait::async_trait;
use scraper::Html;
use serde_json::Value;
use url::Url;

use crate::error::Result;

pub use http::HttpFetcher;
pub use memory::MemoryFetcher;

/// A fetched portal page, parsed once.
#[derive(Debug)]
pub enum ParsedDocument {
    /// Tool or portal HTML page
    Html(Html),
    /// Entity-broker REST response
    Json(Value),
}

impl ParsedDocument {
    /// Parse a response body, preferring JSON when it is an object or array.
    pub fn parse(body: &str) -> Self {
        let trimmed = body.trim_start();
        if trimmed.starts_with('{') || trimmed.starts_with('[') {
            if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
                return Self::Json(value);
            }
        }
        Self::Html(Html::parse_document(body))
    }

    pub fn as_html(&self) -> Option<&Html> {
        match self {
            Self::Html(html) => Some(html),
            Self::Json(_) => None,
        }
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Html(_) => None,
        }
    }
}

/// Source of portal pages.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch and parse the page at `path` (relative to [`base_url`](Self::base_url)).
    async fn fetch(&self, path: &str) -> Result<ParsedDocument>;

    /// Base URL that relative links are resolved against.
    fn base_url(&self) -> &Url;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_json_object() {
        let doc = ParsedDocument::parse(r#"  {"site_collection": []}"#);
        assert!(doc.as_json().is_some());
    }

    #[test]
    fn test_parse_html() {
        let doc = ParsedDocument::parse("<html><body><p>hi</p></body></html>");
        assert!(doc.as_html().is_some());
    }

    #[test]
    fn test_parse_broken_json_falls_back_to_html() {
        let doc = ParsedDocument::parse("{not json");
        assert!(doc.as_html().is_some());
    }
}
