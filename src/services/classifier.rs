// src/services/classifier.rs

//! Exam detection over free text.

use chrono::{DateTime, Utc};

use super::extract::ToolItem;
use super::identity;
use crate::dates::DateParser;
use crate::models::{Announcement, Course, Exam, ExamSource, ExamType};
use crate::patterns::{PatternLibrary, library};
use crate::utils::normalize_whitespace;
use crate::utils::text::{grapheme_len, truncate_graphemes};

/// Longest accepted location capture, in characters.
pub const MAX_LOCATION_LEN: usize = 100;

/// Longest notes excerpt, in characters.
pub const MAX_NOTES_LEN: usize = 500;

/// Keyword-driven exam classifier.
pub struct ExamClassifier<'a> {
    patterns: &'static PatternLibrary,
    dates: &'a dyn DateParser,
}

impl<'a> ExamClassifier<'a> {
    pub fn new(dates: &'a dyn DateParser) -> Self {
        Self {
            patterns: library(),
            dates,
        }
    }

    pub fn is_exam_related(&self, text: &str) -> bool {
        self.patterns.is_exam_related(&text.to_lowercase())
    }

    pub fn exam_type(&self, text: &str) -> ExamType {
        self.patterns.exam_type(&text.to_lowercase())
    }

    /// First date found in `text`, parsed.
    pub fn extract_date(&self, text: &str) -> Option<DateTime<Utc>> {
        let found = self.patterns.find_date(text)?;
        self.dates.parse(found)
    }

    /// First time expression in `text`, as written.
    pub fn extract_time(&self, text: &str) -> Option<String> {
        self.patterns.find_time(text).map(str::to_string)
    }

    /// Venue following a location label; over-long captures fall through to
    /// the next pattern.
    pub fn extract_location(&self, text: &str) -> Option<String> {
        self.patterns.location_patterns.iter().find_map(|re| {
            re.captures_iter(text).find_map(|caps| {
                let location = normalize_whitespace(caps.get(1)?.as_str());
                let location = location
                    .trim_end_matches(|c: char| matches!(c, '.' | ',' | ';' | ':' | '!' | '?'))
                    .trim()
                    .to_string();
                if location.is_empty() || grapheme_len(&location) > MAX_LOCATION_LEN {
                    None
                } else {
                    Some(location)
                }
            })
        })
    }

    /// Exam described by an announcement, if it mentions one.
    pub fn from_announcement(&self, announcement: &Announcement) -> Option<Exam> {
        let full_text = format!("{} {}", announcement.title, announcement.content);
        if !self.is_exam_related(&full_text) {
            return None;
        }

        let content = announcement.content.as_str();
        Some(Exam {
            id: identity::announcement_exam_id(&announcement.id),
            course_code: announcement.course_code.clone(),
            course_title: announcement.course_title.clone(),
            title: announcement.title.clone(),
            exam_type: self.exam_type(&full_text),
            exam_date: self.extract_date(content),
            exam_time: self.extract_time(content),
            location: self.extract_location(content),
            source: ExamSource::Announcement,
            source_id: Some(announcement.id.clone()),
            url: announcement.url.clone(),
            notes: Some(truncate_graphemes(content, MAX_NOTES_LEN)).filter(|n| !n.is_empty()),
            duration_minutes: None,
        })
    }

    /// Exam from a calendar event, kept only when it mentions an exam.
    pub fn from_calendar(&self, item: &ToolItem, course: &Course) -> Option<Exam> {
        let full_text = format!("{} {}", item.title, item.details);
        if !self.is_exam_related(&full_text) {
            return None;
        }
        Some(self.tool_exam(item, course, ExamSource::Calendar, self.exam_type(&full_text)))
    }

    /// Exam from a published assessment. Every assessment counts; ones
    /// without a more specific keyword are quizzes.
    pub fn from_samigo(&self, item: &ToolItem, course: &Course) -> Exam {
        let full_text = format!("{} {}", item.title, item.details);
        let exam_type = match self.exam_type(&full_text) {
            ExamType::Exam if !self.mentions_exam(&full_text) => ExamType::Quiz,
            other => other,
        };
        self.tool_exam(item, course, ExamSource::Samigo, exam_type)
    }

    fn mentions_exam(&self, text: &str) -> bool {
        text.to_lowercase().contains("exam")
    }

    fn tool_exam(
        &self,
        item: &ToolItem,
        course: &Course,
        source: ExamSource,
        exam_type: ExamType,
    ) -> Exam {
        Exam {
            id: identity::tool_exam_id(source, &course.site_id, &item.title),
            course_code: course.code.clone(),
            course_title: course.title.clone(),
            title: item.title.clone(),
            exam_type,
            exam_date: item.date.or_else(|| self.extract_date(&item.details)),
            exam_time: self.extract_time(&item.details),
            location: self.extract_location(&item.details),
            source,
            source_id: None,
            url: item.url.clone(),
            notes: Some(truncate_graphemes(&item.details, MAX_NOTES_LEN))
                .filter(|n| !n.is_empty()),
            duration_minutes: item.duration_minutes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dates::FuzzyDateParser;
    use chrono::{Datelike, NaiveDate};

    fn parser() -> FuzzyDateParser {
        FuzzyDateParser::from_timezone_name("Africa/Accra")
            .unwrap()
            .with_reference_date(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
    }

    fn announcement(title: &str, content: &str) -> Announcement {
        Announcement {
            id: "ann-src-1".to_string(),
            course_code: "DCIT 301".to_string(),
            course_title: "Operating Systems".to_string(),
            title: title.to_string(),
            content: content.to_string(),
            author: None,
            posted_at: None,
            url: Some("https://sakai.example.edu/portal/site/s1".to_string()),
        }
    }

    fn course() -> Course {
        Course {
            site_id: "s1".to_string(),
            code: "DCIT 301".to_string(),
            title: "Operating Systems".to_string(),
            url: "https://sakai.example.edu/portal/site/s1".to_string(),
        }
    }

    #[test]
    fn test_midterm_notice_end_to_end() {
        let dates = parser();
        let classifier = ExamClassifier::new(&dates);
        let ann = announcement(
            "Midterm Notice",
            "The midterm will be held on March 15, 2024 at 10:00am in Room 204.",
        );

        let exam = classifier.from_announcement(&ann).unwrap();
        assert_eq!(exam.exam_type, ExamType::Midterm);
        let date = exam.exam_date.unwrap();
        assert_eq!((date.year(), date.month(), date.day()), (2024, 3, 15));
        assert_eq!(exam.exam_time.as_deref(), Some("10:00am"));
        assert_eq!(exam.location.as_deref(), Some("Room 204"));
        assert_eq!(exam.id, "ann-ann-src-1");
        assert_eq!(exam.source, ExamSource::Announcement);
        assert_eq!(exam.source_id.as_deref(), Some("ann-src-1"));
    }

    #[test]
    fn test_type_priority() {
        let dates = parser();
        let classifier = ExamClassifier::new(&dates);
        assert_eq!(classifier.exam_type("Final quiz on Friday"), ExamType::Final);
        assert_eq!(classifier.exam_type("Viva schedule"), ExamType::Oral);
        assert_eq!(classifier.exam_type("Continuous Assessment"), ExamType::Exam);
    }

    #[test]
    fn test_non_exam_announcement_ignored() {
        let dates = parser();
        let classifier = ExamClassifier::new(&dates);
        let ann = announcement("Slides uploaded", "Week 3 slides are on the portal.");
        assert!(classifier.from_announcement(&ann).is_none());
    }

    #[test]
    fn test_location_labels() {
        let dates = parser();
        let classifier = ExamClassifier::new(&dates);
        assert_eq!(
            classifier.extract_location("Venue: Great Hall, Legon. Bring your ID.").as_deref(),
            Some("Great Hall")
        );
        assert_eq!(
            classifier.extract_location("Location:  JQB   23\nTime: 2pm").as_deref(),
            Some("JQB 23")
        );
        assert_eq!(
            classifier.extract_location("The quiz will take place in the N Block lab.").as_deref(),
            Some("the N Block lab")
        );
        assert_eq!(classifier.extract_location("No venue given"), None);
    }

    #[test]
    fn test_overlong_location_falls_through() {
        let dates = parser();
        let classifier = ExamClassifier::new(&dates);
        let text = format!("Venue: {}\nThe paper is in Room 5.", "x".repeat(120));
        assert_eq!(classifier.extract_location(&text).as_deref(), Some("Room 5"));
    }

    #[test]
    fn test_notes_capped_by_graphemes() {
        let dates = parser();
        let classifier = ExamClassifier::new(&dates);
        let content = format!("Final exam. {}", "é".repeat(600));
        let exam = classifier.from_announcement(&announcement("Exam", &content)).unwrap();
        assert_eq!(grapheme_len(exam.notes.as_deref().unwrap()), MAX_NOTES_LEN);
    }

    #[test]
    fn test_calendar_event_requires_keyword() {
        let dates = parser();
        let classifier = ExamClassifier::new(&dates);
        let event = ToolItem {
            title: "Lecture".to_string(),
            details: "Lecture\nMarch 1, 2024".to_string(),
            date: None,
            url: None,
            duration_minutes: None,
        };
        assert!(classifier.from_calendar(&event, &course()).is_none());

        let exam_event = ToolItem {
            title: "Final Exam".to_string(),
            details: "Final Exam\nApril 20, 2024 9:00am\nVenue: Great Hall".to_string(),
            ..event
        };
        let exam = classifier.from_calendar(&exam_event, &course()).unwrap();
        assert_eq!(exam.exam_type, ExamType::Final);
        assert_eq!(exam.source, ExamSource::Calendar);
        assert!(exam.source_id.is_none());
        assert_eq!(exam.location.as_deref(), Some("Great Hall"));
        assert_eq!(exam.exam_time.as_deref(), Some("9:00am"));
        assert_eq!(exam.exam_date.map(|d| d.day()), Some(20));
        assert_eq!(exam.id, identity::tool_exam_id(ExamSource::Calendar, "s1", "Final Exam"));
    }

    #[test]
    fn test_samigo_defaults_to_quiz() {
        let dates = parser();
        let classifier = ExamClassifier::new(&dates);
        let item = ToolItem {
            title: "Week 4 Check".to_string(),
            details: "Week 4 Check".to_string(),
            date: None,
            url: None,
            duration_minutes: Some(30),
        };
        let exam = classifier.from_samigo(&item, &course());
        assert_eq!(exam.exam_type, ExamType::Quiz);
        assert_eq!(exam.duration_minutes, Some(30));

        let midterm = ToolItem {
            title: "Midterm".to_string(),
            ..item
        };
        assert_eq!(classifier.from_samigo(&midterm, &course()).exam_type, ExamType::Midterm);
    }
}
