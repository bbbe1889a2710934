//! Storage abstractions for scrape snapshots.
//!
//! Each run is written twice: an immutable per-run file and a `latest.json`
//! pointer that downstream consumers read.
//!
//! ## Directory Structure
//!
//! ```text
//! storage/
//! ├── latest.json                  # Most recent report
//! └── runs/
//!     ├── 20260301T080000.000Z.json
//!     └── 20260302T080000.000Z.json
//! ```

pub mod local;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::models::ScrapeReport;

pub use local::LocalStorage;

/// Metadata about a storage write operation.
#[derive(Debug, Clone)]
pub struct WriteMetadata {
    /// Announcements, assignments and exams written
    pub item_count: usize,
    pub course_count: usize,
    /// Timestamp of the write
    pub timestamp: DateTime<Utc>,
    /// Location of the per-run snapshot
    pub snapshot_location: String,
    /// Location of the latest pointer
    pub latest_location: String,
}

/// Trait for snapshot storage backends.
#[async_trait]
pub trait SnapshotStorage: Send + Sync {
    /// Persist a report as both the run snapshot and the latest view.
    async fn write_report(&self, report: &ScrapeReport) -> Result<WriteMetadata>;

    /// Load the most recently written report, if any.
    async fn load_latest(&self) -> Result<Option<ScrapeReport>>;
}
