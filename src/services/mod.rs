//! Service layer for the crawler application.
//!
//! This module contains the extraction engine:
//! - Layout strategy chains (`SelectorChain`)
//! - Field extraction (`FieldExtractor`)
//! - Identifier resolution and deduplication
//! - Exam classification (`ExamClassifier`)
//! - The per-entity scrape operations on `PortalScraper`

mod announcements;
mod assignments;
pub mod classifier;
mod courses;
pub mod dedup;
mod exams;
pub mod extract;
pub mod identity;
pub(crate) mod scraper;
pub mod selectors;

pub use announcements::{USER_FEED_PATH, announcement_sources};
pub use assignments::{ASSIGNMENT_FEED_PATH, assignment_sources};
pub use classifier::ExamClassifier;
pub use courses::{PORTAL_PATH, SITES_PATH, matches_filters};
pub use dedup::dedup_by_id;
pub use exams::{CALENDAR_TOOL, SAMIGO_TOOL};
pub use extract::FieldExtractor;
pub use scraper::{PortalScraper, ScrapeOptions, tool_path};
pub use selectors::{EntityKind, SelectorChain};
