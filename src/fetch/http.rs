//! reqwest-backed page fetcher.

use async_trait::async_trait;
use url::Url;

use super::{PageFetcher, ParsedDocument};
use crate::error::{AppError, Result};
use crate::models::Config;
use crate::utils::http::create_async_client;

/// Fetches portal pages over HTTP with an already-established session.
pub struct HttpFetcher {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpFetcher {
    /// Create a fetcher from a client and the portal base URL.
    pub fn new(client: reqwest::Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    /// Build the client and base URL from configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = create_async_client(&config.crawler, &config.portal)?;
        Ok(Self::new(client, config.base_url()?))
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, path: &str) -> Result<ParsedDocument> {
        let url = self.base_url.join(path)?;
        log::debug!("GET {}", url);

        let response = self.client.get(url).send().await?.error_for_status()?;

        // An expired session is answered with the login form, not an error status.
        if response.url().path().contains("/xlogin") && !path.contains("/xlogin") {
            return Err(AppError::fetch(path, "redirected to login page (session expired?)"));
        }

        let body = response.text().await?;
        Ok(ParsedDocument::parse(&body))
    }

    fn base_url(&self) -> &Url {
        &self.base_url
    }
}
