// src/models/report.rs

//! Aggregate result of one scrape run.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Announcement, Assignment, Course, Exam};

/// Counters and timing for a scrape run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScrapeStats {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub course_count: usize,
    pub announcement_count: usize,
    pub assignment_count: usize,
    pub exam_count: usize,
}

/// Everything produced by one scrape invocation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScrapeReport {
    pub stats: ScrapeStats,
    pub courses: Vec<Course>,
    pub announcements: Vec<Announcement>,
    pub assignments: Vec<Assignment>,
    pub exams: Vec<Exam>,
}

impl ScrapeReport {
    /// Assemble a report, deriving the counters from the entity lists.
    pub fn new(
        started_at: DateTime<Utc>,
        courses: Vec<Course>,
        announcements: Vec<Announcement>,
        assignments: Vec<Assignment>,
        exams: Vec<Exam>,
    ) -> Self {
        let stats = ScrapeStats {
            started_at,
            finished_at: Utc::now(),
            course_count: courses.len(),
            announcement_count: announcements.len(),
            assignment_count: assignments.len(),
            exam_count: exams.len(),
        };
        Self {
            stats,
            courses,
            announcements,
            assignments,
            exams,
        }
    }

    /// Total number of notifiable items (courses excluded).
    pub fn item_count(&self) -> usize {
        self.announcements.len() + self.assignments.len() + self.exams.len()
    }
}
