//! Local filesystem storage implementation.
//!
//! ## Storage Layout
//!
//! ```text
//! {root}/
//! ├── latest.json           # Latest report
//! └── runs/                 # One immutable file per run
//!     └── YYYYMMDDTHHMMSS.mmmZ[-n].json
//! ```

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use serde::{Serialize, de::DeserializeOwned};
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};
use crate::models::ScrapeReport;
use crate::storage::{SnapshotStorage, WriteMetadata};

const LATEST_KEY: &str = "latest.json";

/// Local filesystem storage backend.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    root_dir: PathBuf,
}

impl LocalStorage {
    /// Create a new LocalStorage rooted at the given directory.
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
        }
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    /// Get the full path for a relative key.
    fn path(&self, key: &str) -> PathBuf {
        self.root_dir.join(key)
    }

    /// Ensure parent directory exists.
    async fn ensure_dir(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        Ok(())
    }

    /// Write bytes atomically (write to temp, then rename).
    async fn write_bytes(&self, key: &str, bytes: &[u8]) -> Result<()> {
        let path = self.path(key);
        self.ensure_dir(&path).await?;

        let tmp = path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }

    async fn write_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(value)?;
        self.write_bytes(key, &bytes).await
    }

    /// Read bytes, returning None if file doesn't exist.
    async fn read_bytes(&self, key: &str) -> Result<Option<Vec<u8>>> {
        match tokio::fs::read(self.path(key)).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Io(e)),
        }
    }

    async fn read_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.read_bytes(key).await? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Unused run snapshot key named after the run start time, with a
    /// numeric suffix when an earlier run already took the name.
    async fn run_key(&self, report: &ScrapeReport) -> Result<String> {
        let stem = format!("runs/{}", report.stats.started_at.format("%Y%m%dT%H%M%S%.3fZ"));
        let mut key = format!("{stem}.json");
        let mut suffix = 1;
        while tokio::fs::try_exists(self.path(&key)).await? {
            key = format!("{stem}-{suffix}.json");
            suffix += 1;
        }
        Ok(key)
    }
}

#[async_trait]
impl SnapshotStorage for LocalStorage {
    async fn write_report(&self, report: &ScrapeReport) -> Result<WriteMetadata> {
        let run_key = self.run_key(report).await?;

        self.write_json(&run_key, report).await?;
        self.write_json(LATEST_KEY, report).await?;
        log::info!(
            "Snapshot: {} items written to {}",
            report.item_count(),
            run_key
        );

        Ok(WriteMetadata {
            item_count: report.item_count(),
            course_count: report.courses.len(),
            timestamp: Utc::now(),
            snapshot_location: self.path(&run_key).display().to_string(),
            latest_location: self.path(LATEST_KEY).display().to_string(),
        })
    }

    async fn load_latest(&self) -> Result<Option<ScrapeReport>> {
        let latest = self.read_json(LATEST_KEY).await?;
        if latest.is_none() {
            log::warn!("No {} found in {}", LATEST_KEY, self.root_dir.display());
        }
        Ok(latest)
    }
}
