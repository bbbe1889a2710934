// src/dates.rs

//! Free-text date parsing.
//!
//! Portal pages write dates in many human formats ("Jan 15, 2024 11:55 pm",
//! "15/01/2024", "Monday, January 15"). [`FuzzyDateParser`] accepts the
//! common ones and reports anything else as absent; it never fails loudly.

use std::sync::LazyLock;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use regex::Regex;

use crate::error::{AppError, Result};
use crate::utils::normalize_whitespace;

/// Turns human-readable date text into a timestamp.
pub trait DateParser: Send + Sync {
    /// Parse `text`, returning `None` when it is not a recognizable date.
    fn parse(&self, text: &str) -> Option<DateTime<Utc>>;
}

static RE_LABEL_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:due date|open date|close date|due|posted|opens?|closes?|date)\s*:").unwrap()
});
static RE_WEEKDAY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:monday|tuesday|wednesday|thursday|friday|saturday|sunday|mon|tues?|wed|thu(?:rs?)?|fri|sat|sun)\b\.?,?",
    )
    .unwrap()
});
static RE_ORDINAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(\d{1,2})(?:st|nd|rd|th)\b").unwrap());
static RE_AT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\s+(?:at|@)\s+").unwrap());
static RE_SEPT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\bsept\b\.?").unwrap());
static RE_MONTH_DOT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(jan|feb|mar|apr|jun|jul|aug|sep|oct|nov|dec)\.").unwrap()
});
static RE_TIME_12H: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(\d{1,2})(?::(\d{2}))?(?::(\d{2}))?\s*([ap])\.?m\.?(?:\W|$)").unwrap()
});
static RE_TIME_24H: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d{1,2}):(\d{2})(?::(\d{2}))?\b").unwrap());
static RE_NUMERIC_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,2})[/.-](\d{1,2})[/.-](\d{2}|\d{4})$").unwrap());

/// Date formats with a year, tried in order.
const DATE_FORMATS: &[&str] = &[
    "%B %d, %Y",
    "%B %d %Y",
    "%d %B %Y",
    "%d %B, %Y",
    "%Y-%m-%d",
    "%Y/%m/%d",
];

/// Date formats without a year; the reference year is appended.
const YEARLESS_FORMATS: &[&str] = &["%B %d", "%d %B"];

/// Format-list date parser interpreting naive values in a fixed timezone.
#[derive(Debug, Clone)]
pub struct FuzzyDateParser {
    tz: Tz,
    reference: Option<NaiveDate>,
}

impl FuzzyDateParser {
    pub fn new(tz: Tz) -> Self {
        Self {
            tz,
            reference: None,
        }
    }

    /// Create a parser from an IANA timezone name.
    pub fn from_timezone_name(name: &str) -> Result<Self> {
        let tz: Tz = name
            .parse()
            .map_err(|e| AppError::config(format!("Unknown timezone '{name}': {e}")))?;
        Ok(Self::new(tz))
    }

    /// Pin the date used to fill in a missing year (defaults to today).
    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.reference = Some(date);
        self
    }

    fn reference_year(&self) -> i32 {
        self.reference
            .map(|d| d.year())
            .unwrap_or_else(|| Utc::now().with_timezone(&self.tz).year())
    }

    fn localize(&self, naive: NaiveDateTime) -> Option<DateTime<Utc>> {
        self.tz
            .from_local_datetime(&naive)
            .earliest()
            .map(|dt| dt.with_timezone(&Utc))
    }

    fn parse_date_part(&self, s: &str) -> Option<NaiveDate> {
        let s = s.trim().trim_matches(|c: char| c == ',' || c == '-').trim();
        if s.is_empty() {
            return None;
        }

        if let Some(date) = parse_numeric_date(s) {
            return Some(date);
        }

        if let Some(date) = DATE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        {
            return Some(date);
        }

        let with_year = format!("{} {}", s.trim_end_matches(','), self.reference_year());
        YEARLESS_FORMATS.iter().find_map(|fmt| {
            NaiveDate::parse_from_str(&with_year, &format!("{fmt} %Y")).ok()
        })
    }
}

impl DateParser for FuzzyDateParser {
    fn parse(&self, text: &str) -> Option<DateTime<Utc>> {
        let raw = normalize_whitespace(text);
        if raw.is_empty() {
            return None;
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(&raw) {
            return Some(dt.with_timezone(&Utc));
        }
        if let Ok(dt) = DateTime::parse_from_rfc2822(&raw) {
            return Some(dt.with_timezone(&Utc));
        }
        if let Ok(naive) = NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S") {
            return self.localize(naive);
        }

        let cleaned = clean(&raw);
        let (time, date_text) = split_time(&cleaned);
        let date = self.parse_date_part(&date_text)?;
        let naive = date.and_time(time.unwrap_or(NaiveTime::MIN));

        let parsed = self.localize(naive);
        if parsed.is_none() {
            log::debug!("Could not localize date '{}'", text);
        }
        parsed
    }
}

/// Strip labels, weekdays, ordinals and connecting words.
fn clean(raw: &str) -> String {
    let s = RE_LABEL_PREFIX.replace_all(raw, " ");
    let s = RE_WEEKDAY.replace_all(&s, " ");
    let s = RE_ORDINAL.replace_all(&s, "$1");
    let s = RE_AT.replace_all(&s, " ");
    let s = RE_SEPT.replace_all(&s, "Sep");
    let s = RE_MONTH_DOT.replace_all(&s, "$1");
    normalize_whitespace(&s)
}

/// Pull a clock time out of the text, returning it and the remainder.
fn split_time(s: &str) -> (Option<NaiveTime>, String) {
    if let Some(caps) = RE_TIME_12H.captures(s) {
        let hour: u32 = caps[1].parse().unwrap_or(99);
        let minute: u32 = caps.get(2).map_or(Some(0), |m| m.as_str().parse().ok()).unwrap_or(99);
        let second: u32 = caps.get(3).map_or(Some(0), |m| m.as_str().parse().ok()).unwrap_or(99);
        let pm = caps[4].eq_ignore_ascii_case("p");
        let hour24 = match (hour, pm) {
            (12, false) => 0,
            (12, true) => 12,
            (h, true) => h + 12,
            (h, false) => h,
        };
        if (1..=12).contains(&hour) {
            if let Some(time) = NaiveTime::from_hms_opt(hour24, minute, second) {
                let whole = caps.get(0).map_or("", |m| m.as_str());
                return (Some(time), s.replacen(whole, " ", 1));
            }
        }
    }

    if let Some(caps) = RE_TIME_24H.captures(s) {
        let hour: u32 = caps[1].parse().unwrap_or(99);
        let minute: u32 = caps[2].parse().unwrap_or(99);
        let second: u32 = caps.get(3).map_or(Some(0), |m| m.as_str().parse().ok()).unwrap_or(99);
        if let Some(time) = NaiveTime::from_hms_opt(hour, minute, second) {
            let whole = caps.get(0).map_or("", |m| m.as_str());
            return (Some(time), s.replacen(whole, " ", 1));
        }
    }

    (None, s.to_string())
}

/// `a/b/yyyy` style dates: month-first when ambiguous, day-first otherwise.
fn parse_numeric_date(s: &str) -> Option<NaiveDate> {
    let caps = RE_NUMERIC_DATE.captures(s)?;
    let a: u32 = caps[1].parse().ok()?;
    let b: u32 = caps[2].parse().ok()?;
    let mut year: i32 = caps[3].parse().ok()?;
    if caps[3].len() == 2 {
        year += 2000;
    }
    NaiveDate::from_ymd_opt(year, a, b).or_else(|| NaiveDate::from_ymd_opt(year, b, a))
}
