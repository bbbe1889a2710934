// src/utils/http.rs

//! HTTP client utilities.

use std::time::Duration;

use reqwest::header::{ACCEPT, COOKIE, HeaderMap, HeaderValue};

use crate::error::{AppError, Result};
use crate::models::{CrawlerConfig, PortalConfig};

/// Create a configured asynchronous HTTP client.
///
/// When a session cookie is configured it is sent with every request;
/// establishing that session is left to the caller.
pub fn create_async_client(crawler: &CrawlerConfig, portal: &PortalConfig) -> Result<reqwest::Client> {
    let mut headers = HeaderMap::new();
    headers.insert(
        ACCEPT,
        HeaderValue::from_static("text/html,application/json;q=0.9,*/*;q=0.8"),
    );
    if let Some(cookie) = portal.session_cookie.as_deref() {
        let value = HeaderValue::from_str(cookie.trim())
            .map_err(|e| AppError::config(format!("portal.session_cookie is not a valid header: {e}")))?;
        headers.insert(COOKIE, value);
    }

    let client = reqwest::Client::builder()
        .user_agent(&crawler.user_agent)
        .timeout(Duration::from_secs(crawler.timeout_secs))
        .default_headers(headers)
        .build()?;
    Ok(client)
}
