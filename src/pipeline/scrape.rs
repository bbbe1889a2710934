// src/pipeline/scrape.rs

//! Full scrape run.

use chrono::Utc;

use crate::error::Result;
use crate::models::{Config, ScrapeReport};
use crate::services::PortalScraper;
use crate::storage::SnapshotStorage;
use crate::utils::log as banner;

const STEPS: usize = 5;

/// Scrape courses, announcements, assignments and exams, then persist the report.
///
/// Exams are fed the announcements already scraped, so each announcement
/// page is fetched once per run.
pub async fn run_scrape(
    config: &Config,
    scraper: &PortalScraper,
    storage: &dyn SnapshotStorage,
) -> Result<ScrapeReport> {
    let started_at = Utc::now();
    banner::header(&format!("Sakai scrape: {}", config.portal.base_url));

    banner::step(1, STEPS, "Discovering courses");
    let courses = scraper.scrape_courses().await;
    if courses.is_empty() {
        log::warn!("No courses found; check the session cookie and filters");
    }

    banner::step(2, STEPS, "Scraping announcements");
    let announcements = scraper.scrape_announcements(&courses).await;

    banner::step(3, STEPS, "Scraping assignments");
    let assignments = scraper.scrape_assignments(&courses).await;

    banner::step(4, STEPS, "Detecting exams");
    let exams = scraper
        .scrape_exams(&courses, Some(announcements.as_slice()))
        .await;

    let report = ScrapeReport::new(started_at, courses, announcements, assignments, exams);

    banner::step(5, STEPS, "Writing snapshot");
    let written = storage.write_report(&report).await?;

    if config.output.console_enabled {
        let elapsed = report.stats.finished_at - report.stats.started_at;
        banner::summary(
            "Scrape complete",
            &[
                ("Courses", report.stats.course_count.to_string()),
                ("Announcements", report.stats.announcement_count.to_string()),
                ("Assignments", report.stats.assignment_count.to_string()),
                ("Exams", report.stats.exam_count.to_string()),
                ("Elapsed", format!("{:.1}s", elapsed.num_milliseconds() as f64 / 1000.0)),
                ("Snapshot", written.snapshot_location),
                ("Latest", written.latest_location),
            ],
        );
    }

    Ok(report)
}
