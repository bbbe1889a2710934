// src/services/courses.rs

//! Enrolled course discovery.

use super::dedup::dedup_by_id;
use super::scraper::{PortalScraper, SourceKind};
use super::selectors::{EntityKind, SelectorChain};
use crate::fetch::ParsedDocument;
use crate::models::{Course, FilterConfig};

/// Entity-broker list of the user's sites.
pub const SITES_PATH: &str = "/direct/site.json";

/// Portal landing page with the site navigation.
pub const PORTAL_PATH: &str = "/portal";

impl PortalScraper {
    /// Courses the session is enrolled in, after configured filters.
    pub async fn scrape_courses(&self) -> Vec<Course> {
        let sources = [SITES_PATH.to_string(), PORTAL_PATH.to_string()];
        let found = self
            .first_productive(&sources, "courses", SourceKind::Required, |doc| {
                self.parse_courses(doc)
            })
            .await;

        let total = found.len();
        let courses: Vec<Course> = dedup_by_id(found)
            .into_iter()
            .filter(|course| matches_filters(course, &self.options().filters))
            .collect();

        log::info!("Found {} courses ({} before filtering)", courses.len(), total);
        courses
    }

    /// Courses listed on one page, in page order.
    pub fn parse_courses(&self, document: &ParsedDocument) -> Vec<Course> {
        let extractor = self.extractor();
        SelectorChain::for_kind(EntityKind::Course)
            .locate(document)
            .iter()
            .filter_map(|item| extractor.course(item))
            .collect()
    }
}

/// Whether a course passes the semester and level filters.
///
/// Courses whose code has no three-digit number pass the level filter.
pub fn matches_filters(course: &Course, filters: &FilterConfig) -> bool {
    if let Some(semester) = filters.current_semester.as_deref() {
        let haystack = format!("{} {}", course.title, course.site_id).to_lowercase();
        if !haystack.contains(&semester.to_lowercase()) {
            return false;
        }
    }

    if let Some(min_level) = filters.course_level {
        if let Some(level) = course_level(&course.code) {
            return level >= min_level;
        }
    }

    true
}

/// Level of a course code: the first digit of its number times 100.
fn course_level(code: &str) -> Option<u32> {
    code.split(|c: char| !c.is_ascii_digit())
        .find(|digits| digits.len() == 3)
        .and_then(|digits| digits.chars().next())
        .and_then(|first| first.to_digit(10))
        .map(|digit| digit * 100)
}
