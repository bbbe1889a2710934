// src/patterns.rs

//! Static pattern tables for exam detection and field recognition.
//!
//! Everything here is built once on first use and shared read-only, so
//! concurrent course scrapes can consult it without locking. Order is
//! significant in every list: callers scan top to bottom and stop at the
//! first hit.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::ExamType;

/// Month names with their common abbreviations.
const MONTHS: &str = r"(?:jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)";

const WEEKDAYS: &str = r"(?:mon|tues?|wed(?:nes)?|thu(?:rs?)?|fri|sat(?:ur)?|sun)(?:day)?";

/// End of a location capture: sentence punctuation before a space or the
/// end of the line, a newline, or the end of the text.
const BOUNDARY: &str = r"\s*(?:[.,;!?](?:\s|$)|\n|$)";

/// Case-insensitive substrings that mark text as exam-related.
pub const EXAM_KEYWORDS: &[&str] = &[
    "exam",
    "examination",
    "midterm",
    "mid-term",
    "mid term",
    "final",
    "finals",
    "quiz",
    "quizz",
    "test",
    "assessment",
    "practical",
    "lab exam",
    "oral exam",
    "oral",
    "viva",
    "defense",
    "end of semester",
    "end-of-semester",
    "eos exam",
    "continuous assessment",
    "ca test",
    "ca exam",
];

/// Exam type rules; the first rule with a matching keyword wins.
pub const TYPE_PRIORITY: &[(&[&str], ExamType)] = &[
    (&["final"], ExamType::Final),
    (&["midterm", "mid-term", "mid term"], ExamType::Midterm),
    (&["quiz"], ExamType::Quiz),
    (&["practical", "lab exam"], ExamType::Practical),
    (&["oral", "viva"], ExamType::Oral),
    (&["test"], ExamType::Test),
];

/// Labels that introduce a status in assignment listings, in match order.
pub const STATUS_RULES: &[(&[&str], crate::models::AssignmentStatus)] = {
    use crate::models::AssignmentStatus as S;
    &[
        (&["not started", "not submitted"], S::NotStarted),
        (&["graded", "returned"], S::Graded),
        (&["submitted"], S::Submitted),
        (&["in progress", "draft", "started"], S::InProgress),
        (&["late"], S::Late),
        (&["closed"], S::Closed),
    ]
};

/// Compiled regex tables.
pub struct PatternLibrary {
    /// (a) month-name dates, (b) numeric dates, (c) weekday-prefixed dates
    pub date_patterns: Vec<Regex>,
    /// Ranges, then `HH:MM am/pm`, then `HH am/pm`
    pub time_patterns: Vec<Regex>,
    /// Label-prefixed venues; group 1 holds the location text
    pub location_patterns: Vec<Regex>,
    /// Course codes such as `CSCD 101`, `CS101`, `DCIT-103`
    pub course_code_patterns: Vec<Regex>,
    /// Durations such as `1 hr 30 min`, `90 minutes`
    pub duration_hours: Regex,
    pub duration_minutes: Regex,
    pub duration_clock: Regex,
    /// First decimal number in a string
    pub number: Regex,
}

static LIBRARY: LazyLock<PatternLibrary> = LazyLock::new(PatternLibrary::build);

/// The shared pattern library.
pub fn library() -> &'static PatternLibrary {
    &LIBRARY
}

impl PatternLibrary {
    fn build() -> Self {
        let compile = |pattern: String| Regex::new(&pattern).unwrap();

        let date_patterns = vec![
            compile(format!(
                r"(?i)\b(?:{MONTHS}\.?\s+\d{{1,2}}(?:st|nd|rd|th)?,?\s*\d{{4}}|\d{{1,2}}(?:st|nd|rd|th)?\s+(?:of\s+)?{MONTHS}\.?,?\s+\d{{4}})\b"
            )),
            compile(r"\b\d{1,2}[/-]\d{1,2}[/-]\d{2,4}\b".to_string()),
            compile(format!(
                r"(?i)\b{WEEKDAYS},?\s+{MONTHS}\.?\s+\d{{1,2}}(?:st|nd|rd|th)?\b"
            )),
        ];

        let time_patterns = vec![
            compile(
                r"(?i)\b\d{1,2}:\d{2}\s*(?:[ap]\.?m\.?)?\s*(?:-|–|—|to)\s*\d{1,2}:\d{2}\s*(?:[ap]\.?m\b\.?)?"
                    .to_string(),
            ),
            compile(r"(?i)\b\d{1,2}:\d{2}(?:\s*[ap]\.?m\b\.?)?".to_string()),
            compile(r"(?i)\b\d{1,2}\s*[ap]\.?m\b\.?".to_string()),
        ];

        let location_patterns = vec![
            compile(format!(r"(?im)\bvenue\s*:\s*([^\n;]+?){BOUNDARY}")),
            compile(format!(r"(?im)\blocation\s*:\s*([^\n;]+?){BOUNDARY}")),
            compile(format!(r"(?im)\broom\s*:\s*([^\n;]+?){BOUNDARY}")),
            compile(format!(r"(?im)\bhall\s*:\s*([^\n;]+?){BOUNDARY}")),
            compile(format!(
                r"(?im)\b(?:held|takes?\s+place|taking\s+place)\s+(?:at|in)\s+([^\n;]+?){BOUNDARY}"
            )),
            compile(format!(
                r"(?im)\b(?:in|at)\s+((?:room|hall|lecture\s+hall|lecture\s+theatre|lab|laboratory|auditorium|block)\s+[^\n;]+?){BOUNDARY}"
            )),
        ];

        let course_code_patterns = vec![
            compile(r"(?i)\b([A-Z]{2,4}[- ]?\d{3}[A-Z]?)\b".to_string()),
            compile(r"(?i)\b([A-Z]{2,4}\s+\d{3})\b".to_string()),
        ];

        Self {
            date_patterns,
            time_patterns,
            location_patterns,
            course_code_patterns,
            duration_hours: compile(r"(?i)(\d+(?:\.\d+)?)\s*(?:h|hr|hrs|hour|hours)\b".to_string()),
            duration_minutes: compile(r"(?i)(\d+)\s*(?:m|min|mins|minute|minutes)\b".to_string()),
            duration_clock: compile(r"\b(\d{1,2}):(\d{2})(?::\d{2})?\b".to_string()),
            number: compile(r"\d+(?:\.\d+)?".to_string()),
        }
    }

    /// Whether lower-cased `text` contains any exam keyword.
    pub fn is_exam_related(&self, text_lower: &str) -> bool {
        EXAM_KEYWORDS.iter().any(|k| text_lower.contains(k))
    }

    /// Exam type for lower-cased `text`, defaulting to [`ExamType::Exam`].
    pub fn exam_type(&self, text_lower: &str) -> ExamType {
        TYPE_PRIORITY
            .iter()
            .find(|(keywords, _)| keywords.iter().any(|k| text_lower.contains(k)))
            .map(|(_, exam_type)| *exam_type)
            .unwrap_or_default()
    }

    /// First date-looking substring, by pattern family order.
    pub fn find_date<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.date_patterns
            .iter()
            .find_map(|re| re.find(text))
            .map(|m| m.as_str())
    }

    /// First time-looking substring, by pattern family order.
    pub fn find_time<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.time_patterns
            .iter()
            .find_map(|re| re.find(text))
            .map(|m| m.as_str().trim())
    }

    /// Upper-cased course code in `title`, else the text before `" - "`.
    pub fn course_code(&self, title: &str) -> String {
        self.course_code_patterns
            .iter()
            .find_map(|re| re.captures(title))
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_uppercase())
            .unwrap_or_else(|| {
                title
                    .split(" - ")
                    .next()
                    .unwrap_or(title)
                    .trim()
                    .to_string()
            })
    }

    /// Duration in minutes from text like `1 hr 30 min`, `90 minutes` or `01:30`.
    pub fn duration_minutes(&self, text: &str) -> Option<u32> {
        let hours = self
            .duration_hours
            .captures(text)
            .and_then(|c| c[1].parse::<f64>().ok());
        let minutes = self
            .duration_minutes
            .captures(text)
            .and_then(|c| c[1].parse::<u32>().ok());

        match (hours, minutes) {
            (None, None) => {
                let caps = self.duration_clock.captures(text)?;
                let h: u32 = caps[1].parse().ok()?;
                let m: u32 = caps[2].parse().ok()?;
                Some(h * 60 + m).filter(|total| *total > 0)
            }
            (h, m) => {
                let hours = (h.unwrap_or(0.0) * 60.0).round();
                if !(0.0..=u32::MAX as f64).contains(&hours) {
                    return None;
                }
                (hours as u32)
                    .checked_add(m.unwrap_or(0))
                    .filter(|total| *total > 0)
            }
        }
    }

    /// First decimal number in `text`.
    pub fn first_number(&self, text: &str) -> Option<f64> {
        self.number.find(text).and_then(|m| m.as_str().parse().ok())
    }
}
