// src/models/mod.rs

//! Domain models for the crawler.
//!
//! Canonical entities produced by a scrape plus the configuration types
//! that drive it. Entities are plain values: once built they are handed
//! to the pipeline and never mutated.

mod announcement;
mod assignment;
mod config;
mod course;
mod exam;
mod report;

pub use announcement::Announcement;
pub use assignment::{Assignment, AssignmentStatus};
pub use config::{
    Config, CrawlerConfig, FilterConfig, LoggingConfig, OutputConfig, PortalConfig,
};
pub use course::Course;
pub use exam::{Exam, ExamSource, ExamType};
pub use report::{ScrapeReport, ScrapeStats};

/// An entity carrying a scrape-stable identifier.
pub trait Identified {
    /// Identifier used for deduplication within one scrape.
    fn id(&self) -> &str;
}
