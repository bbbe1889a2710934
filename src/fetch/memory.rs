//! In-memory page fetcher for fixture replay.

use std::collections::HashMap;

use async_trait::async_trait;
use url::Url;

use super::{PageFetcher, ParsedDocument};
use crate::error::{AppError, Result};

/// Serves canned page bodies keyed by portal path.
///
/// Unknown paths fail like an unreachable page would.
#[derive(Debug, Clone)]
pub struct MemoryFetcher {
    base_url: Url,
    pages: HashMap<String, String>,
}

impl MemoryFetcher {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            pages: HashMap::new(),
        }
    }

    /// Register a page body for `path`.
    pub fn with_page(mut self, path: impl Into<String>, body: impl Into<String>) -> Self {
        self.pages.insert(path.into(), body.into());
        self
    }
}

#[async_trait]
impl PageFetcher for MemoryFetcher {
    async fn fetch(&self, path: &str) -> Result<ParsedDocument> {
        self.pages
            .get(path)
            .map(|body| ParsedDocument::parse(body))
            .ok_or_else(|| AppError::fetch(path, "404 Not Found"))
    }

    fn base_url(&self) -> &Url {
        &self.base_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_serves_registered_pages() {
        let fetcher = MemoryFetcher::new(Url::parse("https://sakai.example.edu").unwrap())
            .with_page("/direct/site.json", r#"{"site_collection": []}"#);

        assert!(fetcher.fetch("/direct/site.json").await.unwrap().as_json().is_some());
        let err = fetcher.fetch("/missing").await.unwrap_err();
        assert!(err.is_transport());
    }
}
