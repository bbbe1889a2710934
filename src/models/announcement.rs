// src/models/announcement.rs

//! Announcement data structure.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Identified;
use crate::utils::short_hash;

/// A course announcement.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Announcement {
    /// Stable identifier (portal message id or derived hash)
    pub id: String,

    /// Code of the owning course
    pub course_code: String,

    /// Title of the owning course
    pub course_title: String,

    /// Announcement title, never empty
    pub title: String,

    /// Plain-text body, possibly empty
    pub content: String,

    /// Name of the poster
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    /// When the announcement was posted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub posted_at: Option<DateTime<Utc>>,

    /// Link to the announcement
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Announcement {
    /// Key for the downstream notification store.
    pub fn dedup_key(&self) -> String {
        format!("announcement:{}", self.id)
    }

    /// Hash of the visible content, for edit detection.
    pub fn content_hash(&self) -> String {
        short_hash(&format!("{}|{}", self.title, self.content))
    }
}

impl Identified for Announcement {
    fn id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Announcement {
        Announcement {
            id: "msg-1".to_string(),
            course_code: "DCIT 301".to_string(),
            course_title: "Operating Systems".to_string(),
            title: "Lab moved".to_string(),
            content: "Lab is now in Room 12".to_string(),
            author: None,
            posted_at: None,
            url: None,
        }
    }

    #[test]
    fn test_dedup_key() {
        assert_eq!(sample().dedup_key(), "announcement:msg-1");
    }

    #[test]
    fn test_content_hash_tracks_edits() {
        let original = sample();
        let edited = Announcement {
            content: "Lab is now in Room 14".to_string(),
            ..sample()
        };
        assert_eq!(original.content_hash().len(), 16);
        assert_eq!(original.content_hash(), sample().content_hash());
        assert_ne!(original.content_hash(), edited.content_hash());
    }
}
