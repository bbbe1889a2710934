// src/models/exam.rs

//! Exam data structure.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Identified;
use crate::utils::short_hash;

/// Kind of assessment.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExamType {
    #[default]
    Exam,
    Final,
    Midterm,
    Quiz,
    Practical,
    Oral,
    Test,
}

impl ExamType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Exam => "exam",
            Self::Final => "final",
            Self::Midterm => "midterm",
            Self::Quiz => "quiz",
            Self::Practical => "practical",
            Self::Oral => "oral",
            Self::Test => "test",
        }
    }
}

impl fmt::Display for ExamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where an exam was detected.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ExamSource {
    Announcement,
    Calendar,
    /// The Tests & Quizzes tool
    Samigo,
}

impl ExamSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Announcement => "announcement",
            Self::Calendar => "calendar",
            Self::Samigo => "samigo",
        }
    }
}

impl fmt::Display for ExamSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An exam, test or quiz.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Exam {
    /// Stable identifier, namespaced by source
    pub id: String,

    pub course_code: String,

    pub course_title: String,

    pub title: String,

    pub exam_type: ExamType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exam_date: Option<DateTime<Utc>>,

    /// Time as written in the source text (e.g. "10:00am")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exam_time: Option<String>,

    /// Venue, at most 100 characters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    pub source: ExamSource,

    /// Id of the originating announcement
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Excerpt of the source text, at most 500 characters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// Time limit, only known for Tests & Quizzes items
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u32>,
}

impl Exam {
    /// Key for the downstream notification store.
    pub fn dedup_key(&self) -> String {
        format!("exam:{}", self.id)
    }

    /// Hash over title, date and time, for reschedule detection.
    pub fn content_hash(&self) -> String {
        let date = self
            .exam_date
            .map(|d| d.to_rfc3339())
            .unwrap_or_else(|| "none".to_string());
        let time = self.exam_time.as_deref().unwrap_or("none");
        short_hash(&format!("{}|{}|{}", self.title, date, time))
    }
}

impl Identified for Exam {
    fn id(&self) -> &str {
        &self.id
    }
}
