// src/services/exams.rs

//! Exam detection across announcements, the schedule and Tests & Quizzes.

use super::dedup::dedup_by_id;
use super::scraper::{PortalScraper, SourceKind, tool_path};
use super::selectors::{EntityKind, SelectorChain};
use crate::fetch::ParsedDocument;
use crate::models::{Announcement, Course, Exam};

pub const CALENDAR_TOOL: &str = "sakai.schedule";
pub const SAMIGO_TOOL: &str = "sakai.samigo";

impl PortalScraper {
    /// Exams from announcements first, then each course's calendar and
    /// assessments, deduplicated by id.
    ///
    /// Announcements are scraped here when the caller has none at hand.
    pub async fn scrape_exams(
        &self,
        courses: &[Course],
        announcements: Option<&[Announcement]>,
    ) -> Vec<Exam> {
        let scraped;
        let announcements = match announcements {
            Some(announcements) => announcements,
            None => {
                scraped = self.scrape_announcements(courses).await;
                scraped.as_slice()
            }
        };

        let classifier = self.classifier();
        let mut found: Vec<Exam> = announcements
            .iter()
            .filter_map(|announcement| classifier.from_announcement(announcement))
            .collect();
        found.extend(
            self.for_each_course(courses, |course| self.course_tool_exams(course))
                .await,
        );

        let exams = dedup_by_id(found);
        log::info!("Detected {} exams/quizzes", exams.len());
        exams
    }

    async fn course_tool_exams(&self, course: &Course) -> Vec<Exam> {
        let mut exams = self
            .first_productive(
                &[tool_path(&course.site_id, CALENDAR_TOOL)],
                &format!("calendar for {}", course.code),
                SourceKind::Optional,
                |doc| self.parse_calendar_exams(doc, course),
            )
            .await;
        exams.extend(
            self.first_productive(
                &[tool_path(&course.site_id, SAMIGO_TOOL)],
                &format!("tests & quizzes for {}", course.code),
                SourceKind::Optional,
                |doc| self.parse_samigo_exams(doc, course),
            )
            .await,
        );
        exams
    }

    /// Exam-related events on a schedule page.
    pub fn parse_calendar_exams(&self, document: &ParsedDocument, course: &Course) -> Vec<Exam> {
        let extractor = self.extractor();
        let classifier = self.classifier();
        SelectorChain::for_kind(EntityKind::Calendar)
            .locate(document)
            .iter()
            .filter_map(|item| extractor.calendar_item(item))
            .filter_map(|event| classifier.from_calendar(&event, course))
            .collect()
    }

    /// Published assessments on a Tests & Quizzes page.
    pub fn parse_samigo_exams(&self, document: &ParsedDocument, course: &Course) -> Vec<Exam> {
        let extractor = self.extractor();
        let classifier = self.classifier();
        SelectorChain::for_kind(EntityKind::Samigo)
            .locate(document)
            .iter()
            .filter_map(|item| extractor.samigo_item(item))
            .map(|assessment| classifier.from_samigo(&assessment, course))
            .collect()
    }
}
