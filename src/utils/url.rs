// src/utils/url.rs

//! URL manipulation utilities.

use url::Url;

/// Resolve a potentially relative link against the portal base URL.
///
/// Returns `None` for empty links and for fragments/`javascript:` pseudo-links
/// that do not address a page.
///
/// # Examples
/// ```
/// use sakai_crawler::utils::url::resolve_url;
/// use url::Url;
///
/// let base = Url::parse("https://sakai.example.edu").unwrap();
/// assert_eq!(
///     resolve_url(&base, "/portal/site/abc").as_deref(),
///     Some("https://sakai.example.edu/portal/site/abc")
/// );
/// ```
pub fn resolve_url(base: &Url, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() || href.starts_with('#') || href.starts_with("javascript:") {
        return None;
    }
    base.join(href).ok().map(|u| u.to_string())
}

/// Value of the first query parameter named `key` (case-insensitive), if non-empty.
pub fn query_param(url: &str, key: &str) -> Option<String> {
    let parsed = parse_lenient(url)?;
    parsed
        .query_pairs()
        .find(|(k, v)| k.eq_ignore_ascii_case(key) && !v.trim().is_empty())
        .map(|(_, v)| v.trim().to_string())
}

/// Site identifier from a `/portal/site/<id>` link.
pub fn site_id_from_link(url: &str) -> Option<String> {
    let parsed = parse_lenient(url)?;
    let mut segments = parsed.path_segments()?;
    segments.find(|s| *s == "site")?;
    segments
        .next()
        .filter(|id| !id.is_empty())
        .map(|id| id.to_string())
}

/// Parse absolute URLs as-is and relative ones against a dummy origin.
fn parse_lenient(url: &str) -> Option<Url> {
    Url::parse(url).ok().or_else(|| {
        Url::parse("http://localhost/")
            .ok()
            .and_then(|base| base.join(url).ok())
    })
}
