// src/services/identity.rs

//! Stable identifiers for scraped items.
//!
//! An identifier is taken from the portal whenever one is exposed (record
//! id, message path, `itemId`/`id` query parameter) and otherwise derived by
//! hashing the site id and title, so the same item gets the same id on every
//! run.

use crate::models::ExamSource;
use crate::utils::short_hash;
use crate::utils::url::query_param;

/// Namespace for the hash fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdScope {
    /// Announcements and other plain items
    Item,
    Assignment,
}

/// Resolve an item identifier, most specific source first.
pub fn resolve(
    record_id: Option<String>,
    link: Option<&str>,
    site_id: &str,
    title: &str,
    scope: IdScope,
) -> String {
    record_id
        .filter(|id| !id.trim().is_empty())
        .or_else(|| link.and_then(message_id))
        .or_else(|| link.and_then(|l| query_param(l, "itemId")))
        .or_else(|| link.and_then(|l| query_param(l, "id")))
        .unwrap_or_else(|| fallback_id(site_id, title, scope))
}

/// Id segment of a `/msg/<site>/<channel>/<id>` path.
pub fn message_id(link: &str) -> Option<String> {
    let path = link.split(['?', '#']).next().unwrap_or(link);
    let mut segments = path.split('/').skip_while(|s| *s != "msg").skip(1);
    let _site = segments.next().filter(|s| !s.is_empty())?;
    let _channel = segments.next().filter(|s| !s.is_empty())?;
    segments
        .next()
        .filter(|id| !id.is_empty())
        .map(str::to_string)
}

/// Hash of site and title, 16 hex characters.
pub fn fallback_id(site_id: &str, title: &str, scope: IdScope) -> String {
    match scope {
        IdScope::Item => short_hash(&format!("{site_id}:{title}")),
        IdScope::Assignment => short_hash(&format!("assignment:{site_id}:{title}")),
    }
}

/// Id of an exam detected in an announcement.
pub fn announcement_exam_id(announcement_id: &str) -> String {
    format!("ann-{announcement_id}")
}

/// Id of an exam found in the calendar or Tests & Quizzes tool.
pub fn tool_exam_id(source: ExamSource, site_id: &str, title: &str) -> String {
    let tag = match source {
        ExamSource::Calendar => "cal",
        ExamSource::Samigo => "samigo",
        ExamSource::Announcement => "ann",
    };
    short_hash(&format!("{tag}-{site_id}-{title}"))
}
