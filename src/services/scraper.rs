// src/services/scraper.rs

//! Portal scraper: the entry point that ties fetching, locating,
//! extraction and classification together.
//!
//! The per-entity operations live in sibling modules (`courses`,
//! `announcements`, `assignments`, `exams`) as further `impl` blocks.

use std::future::Future;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};

use super::classifier::ExamClassifier;
use super::extract::FieldExtractor;
use crate::dates::{DateParser, FuzzyDateParser};
use crate::error::Result;
use crate::fetch::{HttpFetcher, PageFetcher, ParsedDocument};
use crate::models::{Config, Course, FilterConfig};

/// Path of a course tool page, reset to its landing view.
pub fn tool_path(site_id: &str, tool: &str) -> String {
    format!("/portal/site/{site_id}/tool-reset/{tool}")
}

/// How a source failure is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SourceKind {
    /// Failure of the last source is an error
    Required,
    /// Tools a course may simply not have
    Optional,
}

/// Scrape tuning taken from configuration.
#[derive(Debug, Clone)]
pub struct ScrapeOptions {
    /// Courses processed at once
    pub max_concurrent: usize,
    pub filters: FilterConfig,
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self {
            max_concurrent: 4,
            filters: FilterConfig::default(),
        }
    }
}

/// Scrapes canonical entities from one portal.
pub struct PortalScraper {
    fetcher: Arc<dyn PageFetcher>,
    dates: Arc<dyn DateParser>,
    options: ScrapeOptions,
    now: Option<DateTime<Utc>>,
}

impl PortalScraper {
    pub fn new(fetcher: Arc<dyn PageFetcher>, dates: Arc<dyn DateParser>) -> Self {
        Self {
            fetcher,
            dates,
            options: ScrapeOptions::default(),
            now: None,
        }
    }

    /// HTTP-backed scraper for the configured portal.
    pub fn from_config(config: &Config) -> Result<Self> {
        let fetcher = HttpFetcher::from_config(config)?;
        let dates = FuzzyDateParser::from_timezone_name(&config.portal.timezone)?;
        Ok(Self::new(Arc::new(fetcher), Arc::new(dates)).with_options(ScrapeOptions {
            max_concurrent: config.crawler.max_concurrent,
            filters: config.filters.clone(),
        }))
    }

    pub fn with_options(mut self, options: ScrapeOptions) -> Self {
        self.options = options;
        self
    }

    /// Pin the clock used for assignment status rules.
    pub fn with_now(mut self, now: DateTime<Utc>) -> Self {
        self.now = Some(now);
        self
    }

    pub fn options(&self) -> &ScrapeOptions {
        &self.options
    }

    pub(crate) fn fetcher(&self) -> &dyn PageFetcher {
        self.fetcher.as_ref()
    }

    pub(crate) fn extractor(&self) -> FieldExtractor<'_> {
        let extractor = FieldExtractor::new(self.fetcher.base_url(), self.dates.as_ref());
        match self.now {
            Some(now) => extractor.with_now(now),
            None => extractor,
        }
    }

    pub(crate) fn classifier(&self) -> ExamClassifier<'_> {
        ExamClassifier::new(self.dates.as_ref())
    }

    /// Try each source in order and return the first non-empty extraction.
    ///
    /// Fetch failures move on to the next source. When the last source
    /// fails, required sources log an error and optional ones a debug line.
    pub(crate) async fn first_productive<T>(
        &self,
        sources: &[String],
        context: &str,
        kind: SourceKind,
        extract: impl Fn(&ParsedDocument) -> Vec<T>,
    ) -> Vec<T> {
        for (index, path) in sources.iter().enumerate() {
            let is_last = index + 1 == sources.len();
            match self.fetcher.fetch(path).await {
                Ok(document) => {
                    let items = extract(&document);
                    if !items.is_empty() || is_last {
                        return items;
                    }
                    log::debug!("{}: nothing found at {}", context, path);
                }
                Err(e) if is_last && kind == SourceKind::Required => {
                    log::error!("{}: {}", context, e);
                }
                Err(e) if !e.is_transport() => log::warn!("{}: {}", context, e),
                Err(e) => log::debug!("{}: {}", context, e),
            }
        }
        Vec::new()
    }

    /// Run `task` for every course with bounded concurrency, keeping course order.
    pub(crate) async fn for_each_course<'s, T, F, Fut>(
        &'s self,
        courses: &'s [Course],
        task: F,
    ) -> Vec<T>
    where
        F: Fn(&'s Course) -> Fut,
        Fut: Future<Output = Vec<T>>,
    {
        let per_course: Vec<Vec<T>> = stream::iter(courses)
            .map(task)
            .buffered(self.options.max_concurrent.max(1))
            .collect()
            .await;
        per_course.into_iter().flatten().collect()
    }
}
