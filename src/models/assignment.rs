// src/models/assignment.rs

//! Assignment data structure.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Identified;
use crate::utils::short_hash;

/// Submission status of an assignment.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentStatus {
    #[default]
    NotStarted,
    InProgress,
    Submitted,
    Graded,
    Late,
    Closed,
}

impl AssignmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotStarted => "not_started",
            Self::InProgress => "in_progress",
            Self::Submitted => "submitted",
            Self::Graded => "graded",
            Self::Late => "late",
            Self::Closed => "closed",
        }
    }
}

impl fmt::Display for AssignmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A course assignment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Assignment {
    /// Stable identifier (portal id or derived hash)
    pub id: String,

    /// Code of the owning course
    pub course_code: String,

    /// Title of the owning course
    pub course_title: String,

    /// Assignment title, never empty
    pub title: String,

    /// Instructions as plain text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open_date: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub close_date: Option<DateTime<Utc>>,

    #[serde(default)]
    pub status: AssignmentStatus,

    /// Maximum attainable points
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_points: Option<f64>,

    /// Link to the assignment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Assignment {
    /// Key for the downstream notification store.
    pub fn dedup_key(&self) -> String {
        format!("assignment:{}", self.id)
    }

    /// Hash over title, due date and status, for edit detection.
    pub fn content_hash(&self) -> String {
        let due = self
            .due_date
            .map(|d| d.to_rfc3339())
            .unwrap_or_else(|| "none".to_string());
        short_hash(&format!("{}|{}|{}", self.title, due, self.status))
    }

    /// Whether the assignment is still ahead of its due date at `now`.
    pub fn is_upcoming(&self, now: DateTime<Utc>) -> bool {
        self.due_date.is_none_or(|due| due > now)
    }
}

impl Identified for Assignment {
    fn id(&self) -> &str {
        &self.id
    }
}
