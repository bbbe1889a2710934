// src/services/announcements.rs

//! Announcement scraping, per course plus the user-level feed.

use std::collections::HashMap;

use serde_json::Value;

use super::dedup::dedup_by_id;
use super::scraper::{PortalScraper, SourceKind, tool_path};
use super::selectors::{EntityKind, RawItem, SelectorChain};
use crate::fetch::ParsedDocument;
use crate::models::{Announcement, Course};

/// Announcements across all of the user's sites.
pub const USER_FEED_PATH: &str = "/direct/announcement/user.json";

/// Sources tried for one course, in order.
pub fn announcement_sources(site_id: &str) -> Vec<String> {
    vec![
        format!("/direct/announcement/site/{site_id}.json"),
        tool_path(site_id, "sakai.announcements"),
        tool_path(site_id, "sakai.synoptic.announcement"),
    ]
}

impl PortalScraper {
    /// Announcements of every course, in course order, then feed-only items.
    pub async fn scrape_announcements(&self, courses: &[Course]) -> Vec<Announcement> {
        let mut found = self
            .for_each_course(courses, |course| self.course_announcements(course))
            .await;
        found.extend(self.user_feed_announcements(courses).await);

        let announcements = dedup_by_id(found);
        log::info!("Total announcements scraped: {}", announcements.len());
        announcements
    }

    async fn course_announcements(&self, course: &Course) -> Vec<Announcement> {
        let context = format!("announcements for {}", course.code);
        let announcements = self
            .first_productive(
                &announcement_sources(&course.site_id),
                &context,
                SourceKind::Required,
                |doc| self.parse_announcements(doc, course),
            )
            .await;
        log::debug!("Found {} announcements in {}", announcements.len(), course.code);
        announcements
    }

    /// Announcements on one page for `course`.
    pub fn parse_announcements(&self, document: &ParsedDocument, course: &Course) -> Vec<Announcement> {
        let extractor = self.extractor();
        SelectorChain::for_kind(EntityKind::Announcement)
            .locate(document)
            .iter()
            .filter_map(|item| extractor.announcement(item, course))
            .collect()
    }

    async fn user_feed_announcements(&self, courses: &[Course]) -> Vec<Announcement> {
        if courses.is_empty() {
            return Vec::new();
        }
        match self.fetcher().fetch(USER_FEED_PATH).await {
            Ok(document) => self.parse_user_feed(&document, courses),
            Err(e) => {
                log::debug!("User announcement feed unavailable: {}", e);
                Vec::new()
            }
        }
    }

    /// Feed items that belong to one of `courses`, matched by site id or title.
    pub fn parse_user_feed(&self, document: &ParsedDocument, courses: &[Course]) -> Vec<Announcement> {
        let mut lookup: HashMap<&str, &Course> = HashMap::new();
        for course in courses {
            lookup.entry(course.site_id.as_str()).or_insert(course);
            lookup.entry(course.title.as_str()).or_insert(course);
        }

        let extractor = self.extractor();
        SelectorChain::for_kind(EntityKind::Announcement)
            .locate(document)
            .iter()
            .filter_map(|item| {
                let RawItem::Record(record) = item else {
                    return None;
                };
                let course = ["siteId", "siteTitle"]
                    .iter()
                    .filter_map(|key| record.get(*key).and_then(Value::as_str))
                    .find_map(|key| lookup.get(key).copied())?;
                extractor.announcement(item, course)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Identified;
    use crate::services::scraper::test_support::*;

    const LIST_PAGE: &str = r#"<html><body><div class="portletBody">
        <table class="listHier">
            <tr><th>Subject</th><th>Saved By</th><th>Date</th></tr>
            <tr>
                <td headers="subject"><a href="/access/announcement/msg/s1/main/m-1">Midterm Notice</a></td>
                <td headers="author">Dr. Boateng</td>
                <td headers="date">Mar 1, 2024 8:00 am</td>
            </tr>
            <tr>
                <td headers="subject"><a href="/portal/site/s1/tool/x?itemId=m-2">Slides</a></td>
                <td headers="author">TA</td>
                <td headers="date">Feb 20, 2024 8:00 am</td>
            </tr>
            <tr>
                <td headers="subject"><a href="javascript:void(0)">Office hours</a></td>
            </tr>
        </table>
        <div id="synopticAnnouncements"><ul>
            <li><a href="/access/announcement/msg/s1/main/m-1">Midterm Notice</a></li>
        </ul></div>
    </div></body></html>"#;

    fn ids(announcements: &[Announcement]) -> Vec<String> {
        announcements.iter().map(|a| a.id().to_string()).collect()
    }

    #[tokio::test]
    async fn test_tool_page_fallback_and_merged_duplicates() {
        let course = course("s1", "DCIT 301 - Operating Systems");
        let fetcher = fetcher().with_page(tool_path("s1", "sakai.announcements"), LIST_PAGE);
        let scraper = scraper(fetcher);

        let announcements = scraper.scrape_announcements(&[course]).await;
        let office_hours = crate::services::identity::fallback_id(
            "s1",
            "Office hours",
            crate::services::identity::IdScope::Item,
        );
        assert_eq!(ids(&announcements), vec!["m-1".to_string(), "m-2".to_string(), office_hours]);
        assert_eq!(announcements[0].author.as_deref(), Some("Dr. Boateng"));
        assert!(announcements.iter().all(|a| !a.title.trim().is_empty()));
    }

    #[tokio::test]
    async fn test_ids_are_stable_across_runs() {
        let course = course("s1", "DCIT 301 - Operating Systems");
        let page = tool_path("s1", "sakai.announcements");

        let first = scraper(fetcher().with_page(page.clone(), LIST_PAGE))
            .scrape_announcements(&[course.clone()])
            .await;
        let second = scraper(fetcher().with_page(page, LIST_PAGE))
            .scrape_announcements(&[course])
            .await;
        assert_eq!(ids(&first), ids(&second));
    }

    #[tokio::test]
    async fn test_rest_collection_and_user_feed() {
        let os = course("s1", "DCIT 301 - Operating Systems");
        let algo = course("s2", "DCIT 305 - Algorithms");
        let fetcher = fetcher()
            .with_page(
                "/direct/announcement/site/s1.json",
                r#"{"announcement_collection": [
                    {"id": "a1", "title": "Welcome", "body": "<p>Hello</p>", "siteId": "s1", "createdOn": 1704067200000}
                ]}"#,
            )
            .with_page(
                "/direct/announcement/site/s2.json",
                r#"{"announcement_collection": []}"#,
            )
            .with_page(
                USER_FEED_PATH,
                r#"{"announcement_collection": [
                    {"id": "a1", "title": "Welcome", "siteId": "s1"},
                    {"id": "a9", "title": "Cross-listed", "siteTitle": "DCIT 305 - Algorithms"},
                    {"id": "a7", "title": "Other site", "siteId": "elsewhere"}
                ]}"#,
            );
        let scraper = scraper(fetcher);

        let announcements = scraper.scrape_announcements(&[os, algo]).await;
        assert_eq!(ids(&announcements), vec!["a1".to_string(), "a9".to_string()]);
        assert_eq!(announcements[0].content, "Hello");
        assert_eq!(announcements[1].course_code, "DCIT 305");
    }

    #[tokio::test]
    async fn test_unknown_layout_yields_empty_list() {
        let course = course("s1", "DCIT 301");
        let fetcher = fetcher()
            .with_page(tool_path("s1", "sakai.announcements"), "<html><body><p>Maintenance</p></body></html>")
            .with_page(tool_path("s1", "sakai.synoptic.announcement"), "<html><body></body></html>");
        let scraper = scraper(fetcher);
        assert!(scraper.scrape_announcements(&[course]).await.is_empty());
    }
}
