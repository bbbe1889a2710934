// src/models/course.rs

//! Course data structure.

use serde::{Deserialize, Serialize};

use super::Identified;

/// An enrolled course site.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Course {
    /// Opaque site identifier within the portal
    pub site_id: String,

    /// Short code derived from the title (e.g. "DCIT 301")
    pub code: String,

    /// Full site title
    pub title: String,

    /// Absolute URL of the course site
    pub url: String,
}

impl Course {
    /// Formatted course name for display.
    pub fn display_name(&self) -> String {
        if self.code.is_empty() {
            self.title.clone()
        } else {
            format!("{}: {}", self.code, self.title)
        }
    }

    /// Key for the downstream notification store.
    pub fn dedup_key(&self) -> String {
        format!("course:{}", self.site_id)
    }
}

impl Identified for Course {
    fn id(&self) -> &str {
        &self.site_id
    }
}
