// src/services/assignments.rs

//! Assignment scraping: the user-level feed first, then per-course sources
//! for courses the feed did not cover.

use std::collections::{HashMap, HashSet};

use serde_json::Value;

use super::dedup::dedup_by_id;
use super::scraper::{PortalScraper, SourceKind, tool_path};
use super::selectors::{EntityKind, RawItem, SelectorChain};
use crate::fetch::ParsedDocument;
use crate::models::{Assignment, Course};

/// Assignments across all of the user's sites.
pub const ASSIGNMENT_FEED_PATH: &str = "/direct/assignment/my.json";

/// Sources tried for one course, in order.
pub fn assignment_sources(site_id: &str) -> Vec<String> {
    vec![
        format!("/direct/assignment/site/{site_id}.json"),
        tool_path(site_id, "sakai.assignment.grades"),
    ]
}

impl PortalScraper {
    /// Assignments of every course: feed items first, then the per-course
    /// sources of courses with nothing in the feed, in course order.
    pub async fn scrape_assignments(&self, courses: &[Course]) -> Vec<Assignment> {
        let feed = self.user_feed_assignments(courses).await;
        let covered: HashSet<&str> = feed.iter().map(|(site_id, _)| *site_id).collect();
        let remaining: Vec<Course> = courses
            .iter()
            .filter(|course| !covered.contains(course.site_id.as_str()))
            .cloned()
            .collect();
        let mut found: Vec<Assignment> = feed.into_iter().map(|(_, assignment)| assignment).collect();
        if !found.is_empty() {
            log::debug!(
                "Assignment feed covered {} of {} courses",
                courses.len() - remaining.len(),
                courses.len()
            );
        }

        let per_course = self
            .for_each_course(&remaining, |course| async move {
                let context = format!("assignments for {}", course.code);
                self.first_productive(
                    &assignment_sources(&course.site_id),
                    &context,
                    SourceKind::Required,
                    |doc| self.parse_assignments(doc, course),
                )
                .await
            })
            .await;
        found.extend(per_course);

        let assignments = dedup_by_id(found);
        log::info!("Total assignments scraped: {}", assignments.len());
        assignments
    }

    /// Assignments on one page for `course`.
    pub fn parse_assignments(&self, document: &ParsedDocument, course: &Course) -> Vec<Assignment> {
        let extractor = self.extractor();
        SelectorChain::for_kind(EntityKind::Assignment)
            .locate(document)
            .iter()
            .filter_map(|item| extractor.assignment(item, course))
            .collect()
    }

    async fn user_feed_assignments<'c>(&self, courses: &'c [Course]) -> Vec<(&'c str, Assignment)> {
        if courses.is_empty() {
            return Vec::new();
        }
        match self.fetcher().fetch(ASSIGNMENT_FEED_PATH).await {
            Ok(document) => self.parse_assignment_feed(&document, courses),
            Err(e) => {
                log::debug!("User assignment feed unavailable: {}", e);
                Vec::new()
            }
        }
    }

    /// Feed records whose `context` is the site id of one of `courses`,
    /// paired with that site id.
    pub fn parse_assignment_feed<'c>(
        &self,
        document: &ParsedDocument,
        courses: &'c [Course],
    ) -> Vec<(&'c str, Assignment)> {
        let lookup: HashMap<&str, &'c Course> = courses
            .iter()
            .map(|course| (course.site_id.as_str(), course))
            .collect();

        let extractor = self.extractor();
        SelectorChain::for_kind(EntityKind::Assignment)
            .locate(document)
            .iter()
            .filter_map(|item| {
                let RawItem::Record(record) = item else {
                    return None;
                };
                let context = record.get("context").and_then(Value::as_str)?;
                let course = *lookup.get(context)?;
                extractor
                    .assignment(item, course)
                    .map(|assignment| (course.site_id.as_str(), assignment))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::models::AssignmentStatus;
    use crate::services::identity::{IdScope, fallback_id};
    use crate::services::scraper::test_support::*;

    #[tokio::test]
    async fn test_assignments_from_tool_table() {
        let page = r#"<html><body><table class="table">
            <tr><th id="title">Assignment Title</th><th id="status">Status</th><th id="dueDate">Due</th></tr>
            <tr>
                <td headers="title"><h4><a href="/portal/site/s1/tool/t?assignmentReference=%2Fassignment%2Fa%2Fs1%2Fx1">Lab Report 1</a></h4></td>
                <td headers="status">Not Started</td>
                <td headers="dueDate">Mar 20, 2024 11:55 pm</td>
                <td headers="maxgrade">10</td>
            </tr>
            <tr>
                <td headers="title"><a href="/portal/site/s1/tool/t?itemId=x2">Essay</a></td>
                <td headers="status">Graded</td>
                <td headers="dueDate">Jan 5, 2024 11:55 pm</td>
            </tr>
        </table></body></html>"#;
        let fetcher = fetcher().with_page(tool_path("s1", "sakai.assignment.grades"), page);
        let scraper = scraper(fetcher).with_now(Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap());

        let assignments = scraper
            .scrape_assignments(&[course("s1", "DCIT 301 - Operating Systems")])
            .await;

        assert_eq!(assignments.len(), 2);
        assert_eq!(assignments[0].title, "Lab Report 1");
        assert_eq!(assignments[0].id, fallback_id("s1", "Lab Report 1", IdScope::Assignment));
        assert_eq!(assignments[0].status, AssignmentStatus::NotStarted);
        assert_eq!(assignments[0].max_points, Some(10.0));
        assert_eq!(assignments[1].id, "x2");
        assert_eq!(assignments[1].status, AssignmentStatus::Graded);
    }

    #[tokio::test]
    async fn test_assignments_from_rest_in_course_order() {
        let fetcher = fetcher()
            .with_page(
                "/direct/assignment/site/s1.json",
                r#"{"assignment_collection": [
                    {"id": "r1", "title": "Shell", "context": "s1", "dueTime": {"epochSecond": 1711929600}},
                    {"id": "", "title": "", "context": "s1"}
                ]}"#,
            )
            .with_page(
                "/direct/assignment/site/s2.json",
                r#"{"assignment_collection": [
                    {"id": "r2", "title": "Proofs", "context": "s2", "status": "Submitted"}
                ]}"#,
            );
        let scraper = scraper(fetcher).with_now(Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap());

        let assignments = scraper
            .scrape_assignments(&[course("s1", "DCIT 301"), course("s2", "MATH 223")])
            .await;

        let ids: Vec<&str> = assignments.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["r1", "r2"]);
        assert_eq!(assignments[0].status, AssignmentStatus::NotStarted);
        assert!(assignments[0].is_upcoming(Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap()));
        assert_eq!(assignments[1].status, AssignmentStatus::Submitted);
        assert_eq!(assignments[1].course_code, "MATH 223");
    }

    #[tokio::test]
    async fn test_user_feed_first_then_uncovered_courses() {
        let fetcher = fetcher()
            .with_page(
                ASSIGNMENT_FEED_PATH,
                r#"{"assignment_collection": [
                    {"id": "f1", "title": "Shell", "context": "s1"},
                    {"id": "f9", "title": "Elsewhere", "context": "other-site"}
                ]}"#,
            )
            .with_page(
                "/direct/assignment/site/s1.json",
                r#"{"assignment_collection": [{"id": "r1", "title": "Not fetched", "context": "s1"}]}"#,
            )
            .with_page(
                "/direct/assignment/site/s2.json",
                r#"{"assignment_collection": [{"id": "r2", "title": "Proofs", "context": "s2"}]}"#,
            );
        let scraper = scraper(fetcher);

        let assignments = scraper
            .scrape_assignments(&[course("s1", "DCIT 301"), course("s2", "MATH 223")])
            .await;

        let ids: Vec<&str> = assignments.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["f1", "r2"]);
        assert_eq!(assignments[0].course_code, "DCIT 301");
    }

    #[tokio::test]
    async fn test_missing_tool_yields_empty_list() {
        let scraper = scraper(fetcher());
        assert!(scraper.scrape_assignments(&[course("s1", "DCIT 301")]).await.is_empty());
    }
}
