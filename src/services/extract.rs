// src/services/extract.rs

//! Field extraction over located items.
//!
//! Every puller returns `Option` and degrades to absent. The only reason an
//! item is dropped is a missing title (or, for courses, a missing site id).

use chrono::{DateTime, Utc};
use scraper::ElementRef;
use serde_json::Value;
use url::Url;

use super::identity::{self, IdScope};
use super::selectors::{RawItem, parse_selector};
use crate::dates::DateParser;
use crate::models::{Announcement, Assignment, AssignmentStatus, Course};
use crate::patterns::{STATUS_RULES, library};
use crate::utils::text::html_to_text;
use crate::utils::url::site_id_from_link;
use crate::utils::{normalize_whitespace, resolve_url};

/// Where to look for one field: CSS selectors inside an HTML item, keys in
/// a JSON record. Both lists are tried in order.
#[derive(Debug, Clone, Copy)]
pub struct Markers {
    pub css: &'static [&'static str],
    pub keys: &'static [&'static str],
}

const fn markers(css: &'static [&'static str], keys: &'static [&'static str]) -> Markers {
    Markers { css, keys }
}

pub mod fields {
    use super::{Markers, markers};

    pub const ANNOUNCEMENT_TITLE: Markers = markers(
        &[".announcementTitle", "h4", "h3", r#"td[headers="subject"]"#, ".title"],
        &["title"],
    );
    pub const ANNOUNCEMENT_BODY: Markers = markers(
        &[".announcementBody", ".content", ".description", r#"td[headers="body"]"#],
        &["body"],
    );
    pub const ANNOUNCEMENT_AUTHOR: Markers = markers(
        &[".announcementAuthor", ".author", r#"td[headers="author"]"#],
        &["createdByDisplayName", "author"],
    );
    pub const ANNOUNCEMENT_DATE: Markers = markers(
        &[".announcementDate", r#"td[headers="date"]"#, ".date", "time"],
        &["createdOn", "date"],
    );

    pub const ASSIGNMENT_TITLE: Markers = markers(
        &[r#"td[headers="title"] a"#, r#"td[headers="title"]"#, "h4", ".title"],
        &["title"],
    );
    pub const ASSIGNMENT_BODY: Markers = markers(
        &[".instructions", ".description", r#"td[headers="instructions"]"#],
        &["instructions"],
    );
    pub const ASSIGNMENT_STATUS: Markers = markers(
        &[r#"td[headers="status"]"#, ".status"],
        &["submissionStatus", "status"],
    );
    pub const ASSIGNMENT_DUE: Markers = markers(
        &[r#"td[headers="dueDate"]"#, ".dueDate", ".due-date"],
        &["dueTime", "dueTimeString", "dueDate"],
    );
    pub const ASSIGNMENT_OPEN: Markers = markers(
        &[r#"td[headers="openDate"]"#, ".openDate", ".open-date"],
        &["openTime", "openTimeString", "openDate"],
    );
    pub const ASSIGNMENT_CLOSE: Markers = markers(
        &[r#"td[headers="closeDate"]"#, ".closeDate", ".close-date"],
        &["closeTime", "closeTimeString", "closeDate"],
    );
    pub const ASSIGNMENT_POINTS: Markers = markers(
        &[r#"td[headers="maxgrade"]"#, ".points", ".maxPoints"],
        &["gradeScaleMaxPoints", "maxPoints"],
    );

    pub const CALENDAR_TITLE: Markers = markers(
        &[r#"td[headers="title"]"#, ".event-title", ".fc-title", ".title"],
        &["title", "displayName"],
    );
    pub const CALENDAR_DATE: Markers = markers(
        &[r#"td[headers="date"]"#, ".event-date", ".date", "time"],
        &["firstTime", "start", "date"],
    );
    pub const CALENDAR_BODY: Markers =
        markers(&[".description", ".event-description"], &["description"]);

    pub const SAMIGO_TITLE: Markers = markers(
        &[r#"td[headers="title"]"#, ".assessmentTitle", ".title"],
        &["title"],
    );
    pub const SAMIGO_DATE: Markers = markers(
        &[r#"td[headers="dueDate"]"#, ".dueDate", ".due-date"],
        &["dueDate", "startDate"],
    );
    pub const SAMIGO_TIME_LIMIT: Markers = markers(
        &[r#"td[headers="timeLimit"]"#, ".timeLimit", ".time-limit"],
        &["timeLimit"],
    );
}

/// Epoch values above this are taken as milliseconds.
const MILLIS_THRESHOLD: f64 = 32_503_680_000.0;

/// Fields of a calendar event or published assessment, before classification.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolItem {
    pub title: String,
    /// All visible text of the item, used for time and venue detection
    pub details: String,
    pub date: Option<DateTime<Utc>>,
    pub url: Option<String>,
    pub duration_minutes: Option<u32>,
}

/// Builds entities from raw items for one portal.
pub struct FieldExtractor<'a> {
    base_url: &'a Url,
    dates: &'a dyn DateParser,
    now: DateTime<Utc>,
}

impl<'a> FieldExtractor<'a> {
    pub fn new(base_url: &'a Url, dates: &'a dyn DateParser) -> Self {
        Self {
            base_url,
            dates,
            now: Utc::now(),
        }
    }

    /// Pin the instant used for due/close date status rules.
    pub fn with_now(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }

    /// Title from the markers, else the first hyperlink text.
    pub fn title(&self, item: &RawItem<'_>, markers: &Markers) -> Option<String> {
        text(item, markers).or_else(|| match item {
            RawItem::Element(el) => hyperlink(*el).map(collapse).filter(|t| !t.is_empty()),
            RawItem::Record(_) => None,
        })
    }

    /// Multi-line body text; HTML inside JSON records is stripped.
    pub fn body(&self, item: &RawItem<'_>, markers: &Markers) -> Option<String> {
        let body = match item {
            RawItem::Element(el) => markers
                .css
                .iter()
                .find_map(|css| select_first(*el, css))
                .map(block_text),
            RawItem::Record(record) => markers
                .keys
                .iter()
                .find_map(|key| record.get(*key).and_then(Value::as_str))
                .map(html_to_text),
        };
        body.filter(|b| !b.is_empty())
    }

    pub fn date(&self, item: &RawItem<'_>, markers: &Markers) -> Option<DateTime<Utc>> {
        match item {
            RawItem::Element(el) => markers
                .css
                .iter()
                .filter_map(|css| select_first(*el, css))
                .find_map(|found| {
                    found
                        .value()
                        .attr("datetime")
                        .and_then(|dt| self.dates.parse(dt))
                        .or_else(|| self.dates.parse(&collapse(found)))
                }),
            RawItem::Record(record) => markers
                .keys
                .iter()
                .filter_map(|key| record.get(*key))
                .find_map(|value| decode_json_date(value, self.dates)),
        }
    }

    /// Absolute link of the item.
    ///
    /// HTML items use their own `href` or the first anchor inside them. JSON
    /// records use `entityURL`/`url`, else the portal page of their site.
    pub fn link(&self, item: &RawItem<'_>) -> Option<String> {
        match item {
            RawItem::Element(el) => hyperlink(*el)
                .and_then(|a| a.value().attr("href"))
                .and_then(|href| resolve_url(self.base_url, href)),
            RawItem::Record(record) => ["entityURL", "url"]
                .iter()
                .find_map(|key| record.get(*key).and_then(Value::as_str))
                .and_then(|href| resolve_url(self.base_url, href))
                .or_else(|| {
                    ["siteId", "context"]
                        .iter()
                        .find_map(|key| record.get(*key).and_then(Value::as_str))
                        .filter(|site| !site.is_empty())
                        .and_then(|site| self.site_url(site))
                }),
        }
    }

    fn site_url(&self, site_id: &str) -> Option<String> {
        resolve_url(self.base_url, &format!("/portal/site/{site_id}"))
    }

    /// Build a course from a site record or a site link.
    pub fn course(&self, item: &RawItem<'_>) -> Option<Course> {
        let (site_id, title) = match item {
            RawItem::Record(record) => {
                let kind = record.get("type").and_then(Value::as_str).unwrap_or("");
                if kind.eq_ignore_ascii_case("myworkspace") {
                    return None;
                }
                (record_id(item)?, text(item, &markers(&[], &["title"]))?)
            }
            RawItem::Element(el) => {
                let href = hyperlink(*el)?.value().attr("href")?;
                let site_id = site_id_from_link(href)?;
                let title = Some(collapse(*el))
                    .filter(|t| !t.is_empty())
                    .or_else(|| el.value().attr("title").map(normalize_whitespace))
                    .filter(|t| !t.is_empty())?;
                (site_id, title)
            }
        };

        if site_id.starts_with('~') || site_id.starts_with('!') {
            return None;
        }

        Some(Course {
            url: self.site_url(&site_id)?,
            code: library().course_code(&title),
            site_id,
            title,
        })
    }

    pub fn announcement(&self, item: &RawItem<'_>, course: &Course) -> Option<Announcement> {
        let Some(title) = self.title(item, &fields::ANNOUNCEMENT_TITLE) else {
            log::debug!("Dropping untitled announcement in {}", course.code);
            return None;
        };
        let url = self.link(item);
        let id = identity::resolve(
            record_id(item),
            url.as_deref(),
            &course.site_id,
            &title,
            IdScope::Item,
        );

        Some(Announcement {
            id,
            course_code: course.code.clone(),
            course_title: course.title.clone(),
            content: self
                .body(item, &fields::ANNOUNCEMENT_BODY)
                .unwrap_or_default(),
            author: text(item, &fields::ANNOUNCEMENT_AUTHOR),
            posted_at: self.date(item, &fields::ANNOUNCEMENT_DATE),
            title,
            url,
        })
    }

    pub fn assignment(&self, item: &RawItem<'_>, course: &Course) -> Option<Assignment> {
        let Some(title) = self.title(item, &fields::ASSIGNMENT_TITLE) else {
            log::debug!("Dropping untitled assignment in {}", course.code);
            return None;
        };
        let url = self.link(item);
        let id = identity::resolve(
            record_id(item),
            url.as_deref(),
            &course.site_id,
            &title,
            IdScope::Assignment,
        );

        let due_date = self.date(item, &fields::ASSIGNMENT_DUE);
        let close_date = self.date(item, &fields::ASSIGNMENT_CLOSE);
        let status = resolve_status(
            text(item, &fields::ASSIGNMENT_STATUS).as_deref(),
            due_date,
            close_date,
            self.now,
        );
        let max_points = text(item, &fields::ASSIGNMENT_POINTS)
            .and_then(|points| library().first_number(&points))
            .filter(|points| *points > 0.0);

        Some(Assignment {
            id,
            course_code: course.code.clone(),
            course_title: course.title.clone(),
            description: self.body(item, &fields::ASSIGNMENT_BODY),
            due_date,
            open_date: self.date(item, &fields::ASSIGNMENT_OPEN),
            close_date,
            status,
            max_points,
            title,
            url,
        })
    }

    /// Calendar event fields.
    pub fn calendar_item(&self, item: &RawItem<'_>) -> Option<ToolItem> {
        self.tool_item(item, &fields::CALENDAR_TITLE, &fields::CALENDAR_DATE, None)
    }

    /// Published assessment fields, with the time limit when shown.
    pub fn samigo_item(&self, item: &RawItem<'_>) -> Option<ToolItem> {
        self.tool_item(
            item,
            &fields::SAMIGO_TITLE,
            &fields::SAMIGO_DATE,
            Some(&fields::SAMIGO_TIME_LIMIT),
        )
    }

    fn tool_item(
        &self,
        item: &RawItem<'_>,
        title: &Markers,
        date: &Markers,
        time_limit: Option<&Markers>,
    ) -> Option<ToolItem> {
        let title = self.title(item, title)?;
        let details = match item {
            RawItem::Element(el) => block_text(*el),
            RawItem::Record(_) => self
                .body(item, &fields::CALENDAR_BODY)
                .unwrap_or_default(),
        };
        let duration_minutes = time_limit
            .and_then(|markers| text(item, markers))
            .and_then(|limit| library().duration_minutes(&limit));

        Some(ToolItem {
            date: self.date(item, date),
            url: self.link(item),
            title,
            details,
            duration_minutes,
        })
    }
}

/// Explicit status text wins; otherwise derive it from the close and due dates.
pub fn resolve_status(
    explicit: Option<&str>,
    due_date: Option<DateTime<Utc>>,
    close_date: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> AssignmentStatus {
    let explicit = explicit.map(str::to_lowercase).and_then(|status| {
        STATUS_RULES
            .iter()
            .find(|(labels, _)| labels.iter().any(|label| status.contains(label)))
            .map(|(_, status)| *status)
    });

    if let Some(status) = explicit {
        return status;
    }
    if close_date.is_some_and(|close| now > close) {
        return AssignmentStatus::Closed;
    }
    if due_date.is_some_and(|due| now > due) {
        return AssignmentStatus::Late;
    }
    AssignmentStatus::NotStarted
}

/// Decode an entity-broker date: epoch seconds or milliseconds, an
/// `{epochSecond}`/`{time}` object, or free text.
pub fn decode_json_date(value: &Value, dates: &dyn DateParser) -> Option<DateTime<Utc>> {
    match value {
        Value::Number(n) => from_epoch(n.as_f64()?),
        Value::Object(map) => map
            .get("epochSecond")
            .or_else(|| map.get("time"))
            .and_then(Value::as_f64)
            .and_then(from_epoch),
        Value::String(s) if !s.trim().is_empty() => dates.parse(s),
        _ => None,
    }
}

fn from_epoch(raw: f64) -> Option<DateTime<Utc>> {
    if raw <= 0.0 {
        return None;
    }
    let seconds = if raw > MILLIS_THRESHOLD { raw / 1000.0 } else { raw };
    DateTime::from_timestamp(seconds.trunc() as i64, 0)
}

/// JSON record id (`id`, then `entityId`).
pub fn record_id(item: &RawItem<'_>) -> Option<String> {
    match item {
        RawItem::Record(record) => ["id", "entityId"]
            .iter()
            .find_map(|key| record.get(*key).and_then(scalar_text)),
        RawItem::Element(_) => None,
    }
}

/// Single-line text of the first marker that yields any.
pub fn text(item: &RawItem<'_>, markers: &Markers) -> Option<String> {
    match item {
        RawItem::Element(el) => markers
            .css
            .iter()
            .filter_map(|css| select_first(*el, css))
            .map(collapse)
            .find(|t| !t.is_empty()),
        RawItem::Record(record) => markers
            .keys
            .iter()
            .filter_map(|key| record.get(*key).and_then(scalar_text))
            .find(|t| !t.is_empty()),
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(normalize_whitespace(s)),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn select_first<'e>(el: ElementRef<'e>, css: &str) -> Option<ElementRef<'e>> {
    match parse_selector(css) {
        Ok(selector) => el.select(&selector).next(),
        Err(e) => {
            log::warn!("{}", e);
            None
        }
    }
}

/// The element itself when it is an anchor, else its first anchor with an href.
fn hyperlink(el: ElementRef<'_>) -> Option<ElementRef<'_>> {
    if el.value().name() == "a" {
        return Some(el);
    }
    select_first(el, "a[href]")
}

fn collapse(el: ElementRef<'_>) -> String {
    normalize_whitespace(&el.text().collect::<String>())
}

fn block_text(el: ElementRef<'_>) -> String {
    el.text()
        .map(normalize_whitespace)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dates::FuzzyDateParser;
    use crate::fetch::ParsedDocument;
    use crate::services::selectors::{EntityKind, SelectorChain};
    use chrono::{NaiveDate, TimeZone};

    fn base() -> Url {
        Url::parse("https://sakai.example.edu").unwrap()
    }

    fn parser() -> FuzzyDateParser {
        FuzzyDateParser::from_timezone_name("UTC")
            .unwrap()
            .with_reference_date(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
    }

    fn course() -> Course {
        Course {
            site_id: "site-1".to_string(),
            code: "DCIT 301".to_string(),
            title: "DCIT 301 - Operating Systems".to_string(),
            url: "https://sakai.example.edu/portal/site/site-1".to_string(),
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 2, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_announcement_from_html_list() {
        let doc = ParsedDocument::parse(
            r#"<ul class="announcementList"><li>
                <h4><a href="/access/announcement/msg/site-1/main/abc-123">  Lab   moved </a></h4>
                <span class="announcementAuthor">Dr. Mensah</span>
                <span class="announcementDate">Jan 10, 2024 9:00 am</span>
                <div class="announcementBody"><p>Lab moves to</p><p>Room 12.</p></div>
            </li></ul>"#,
        );
        let items = SelectorChain::for_kind(EntityKind::Announcement).locate(&doc);
        let dates = parser();
        let base = base();
        let extractor = FieldExtractor::new(&base, &dates);
        let ann = extractor.announcement(&items[0], &course()).unwrap();

        assert_eq!(ann.id, "abc-123");
        assert_eq!(ann.title, "Lab moved");
        assert_eq!(ann.content, "Lab moves to\nRoom 12.");
        assert_eq!(ann.author.as_deref(), Some("Dr. Mensah"));
        assert_eq!(ann.posted_at, Some(Utc.with_ymd_and_hms(2024, 1, 10, 9, 0, 0).unwrap()));
        assert_eq!(
            ann.url.as_deref(),
            Some("https://sakai.example.edu/access/announcement/msg/site-1/main/abc-123")
        );
        assert_eq!(ann.course_code, "DCIT 301");
    }

    #[test]
    fn test_blank_title_discards_item() {
        let doc = ParsedDocument::parse(
            r#"<ul class="announcementList"><li><h4>   </h4><p>no link</p></li></ul>"#,
        );
        let items = SelectorChain::for_kind(EntityKind::Announcement).locate(&doc);
        let dates = parser();
        let base = base();
        let extractor = FieldExtractor::new(&base, &dates);
        assert!(extractor.announcement(&items[0], &course()).is_none());
    }

    #[test]
    fn test_announcement_from_json_record() {
        let doc = ParsedDocument::parse(
            r#"{"announcement_collection": [{
                "id": "9f1c", "title": "Quiz 1", "body": "<p>Bring a pencil</p><p>See you</p>",
                "createdByDisplayName": "TA", "createdOn": 1705312800000, "siteId": "site-1"
            }]}"#,
        );
        let items = SelectorChain::for_kind(EntityKind::Announcement).locate(&doc);
        let dates = parser();
        let base = base();
        let extractor = FieldExtractor::new(&base, &dates);
        let ann = extractor.announcement(&items[0], &course()).unwrap();

        assert_eq!(ann.id, "9f1c");
        assert_eq!(ann.content, "Bring a pencil\nSee you");
        assert_eq!(ann.posted_at, Some(Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap()));
        assert_eq!(
            ann.url.as_deref(),
            Some("https://sakai.example.edu/portal/site/site-1")
        );
    }

    #[test]
    fn test_json_body_entities_match_html_layout() {
        let rest = ParsedDocument::parse(
            r#"{"announcement_collection": [{"id": "e1", "title": "Moved", "body": "Quiz &amp; Lab exam moved"}]}"#,
        );
        let html = ParsedDocument::parse(
            r#"<ul class="announcementList"><li><h4>Moved</h4><div class="announcementBody">Quiz &amp; Lab exam moved</div></li></ul>"#,
        );
        let dates = parser();
        let base = base();
        let extractor = FieldExtractor::new(&base, &dates);
        let from_rest = SelectorChain::for_kind(EntityKind::Announcement).locate(&rest);
        let from_html = SelectorChain::for_kind(EntityKind::Announcement).locate(&html);

        let rest_ann = extractor.announcement(&from_rest[0], &course()).unwrap();
        let html_ann = extractor.announcement(&from_html[0], &course()).unwrap();
        assert_eq!(rest_ann.content, "Quiz & Lab exam moved");
        assert_eq!(rest_ann.content_hash(), html_ann.content_hash());
    }

    #[test]
    fn test_assignment_from_table_row() {
        let doc = ParsedDocument::parse(
            r#"<table><tr>
                <td headers="title"><a href="/portal/site/site-1/tool/x?assignmentReference=r&amp;itemId=77">Essay</a></td>
                <td headers="status">Submitted</td>
                <td headers="dueDate">Jan 15, 2024 11:55 pm</td>
                <td headers="maxgrade">20.0</td>
            </tr></table>"#,
        );
        let items = SelectorChain::for_kind(EntityKind::Assignment).locate(&doc);
        let dates = parser();
        let base = base();
        let extractor = FieldExtractor::new(&base, &dates).with_now(now());
        let assignment = extractor.assignment(&items[0], &course()).unwrap();

        assert_eq!(assignment.id, "77");
        assert_eq!(assignment.title, "Essay");
        assert_eq!(assignment.status, AssignmentStatus::Submitted);
        assert_eq!(assignment.max_points, Some(20.0));
        assert_eq!(
            assignment.due_date,
            Some(Utc.with_ymd_and_hms(2024, 1, 15, 23, 55, 0).unwrap())
        );
    }

    #[test]
    fn test_assignment_from_json_record() {
        let doc = ParsedDocument::parse(
            r#"{"assignment_collection": [{
                "entityId": "a-1", "title": "Project", "context": "site-1",
                "instructions": "<b>Build</b> a shell",
                "dueTime": {"epochSecond": 1704067200},
                "gradeScaleMaxPoints": "0"
            }]}"#,
        );
        let items = SelectorChain::for_kind(EntityKind::Assignment).locate(&doc);
        let dates = parser();
        let base = base();
        let extractor = FieldExtractor::new(&base, &dates).with_now(now());
        let assignment = extractor.assignment(&items[0], &course()).unwrap();

        assert_eq!(assignment.id, "a-1");
        assert_eq!(assignment.description.as_deref(), Some("Build\na shell"));
        assert_eq!(
            assignment.due_date,
            Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
        );
        assert_eq!(assignment.status, AssignmentStatus::Late);
        assert_eq!(assignment.max_points, None);
    }

    #[test]
    fn test_status_resolution() {
        let past = Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        let future = Some(Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap());

        assert_eq!(resolve_status(Some("Not Started"), past, None, now()), AssignmentStatus::NotStarted);
        assert_eq!(resolve_status(Some("Returned"), None, None, now()), AssignmentStatus::Graded);
        assert_eq!(resolve_status(Some("Draft - In progress"), None, None, now()), AssignmentStatus::InProgress);
        assert_eq!(resolve_status(None, future, past, now()), AssignmentStatus::Closed);
        assert_eq!(resolve_status(None, past, future, now()), AssignmentStatus::Late);
        assert_eq!(resolve_status(Some("Open"), future, None, now()), AssignmentStatus::NotStarted);
    }

    #[test]
    fn test_course_from_record_and_link() {
        let dates = parser();
        let base = base();
        let extractor = FieldExtractor::new(&base, &dates);

        let record = serde_json::json!({"id": "DCIT-301-S1", "title": "DCIT 301 - Operating Systems", "type": "course"});
        let course = extractor.course(&RawItem::Record(&record)).unwrap();
        assert_eq!(course.code, "DCIT 301");
        assert_eq!(course.url, "https://sakai.example.edu/portal/site/DCIT-301-S1");

        let workspace = serde_json::json!({"id": "~student", "title": "My Workspace"});
        assert!(extractor.course(&RawItem::Record(&workspace)).is_none());

        let typed = serde_json::json!({"id": "abc", "title": "Home", "type": "myworkspace"});
        assert!(extractor.course(&RawItem::Record(&typed)).is_none());

        let doc = ParsedDocument::parse(
            r#"<a href="https://sakai.example.edu/portal/site/xyz" title="CS 101 Intro">CS 101 Intro</a>"#,
        );
        let items = SelectorChain::for_kind(EntityKind::Course).locate(&doc);
        let course = extractor.course(&items[0]).unwrap();
        assert_eq!(course.site_id, "xyz");
        assert_eq!(course.code, "CS 101");
    }

    #[test]
    fn test_decode_json_dates() {
        let dates = parser();
        let expected = Some(Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap());
        assert_eq!(decode_json_date(&serde_json::json!(1705312800), &dates), expected);
        assert_eq!(decode_json_date(&serde_json::json!(1705312800000u64), &dates), expected);
        assert_eq!(decode_json_date(&serde_json::json!({"time": 1705312800000u64}), &dates), expected);
        assert_eq!(decode_json_date(&serde_json::json!("2024-01-15T10:00:00Z"), &dates), expected);
        assert_eq!(decode_json_date(&serde_json::json!(0), &dates), None);
        assert_eq!(decode_json_date(&serde_json::json!(null), &dates), None);
    }

    #[test]
    fn test_samigo_time_limit() {
        let doc = ParsedDocument::parse(
            r#"<table id="selectIndexForm:selectTable"><tr>
                <td headers="title"><a href="/samigo/take?id=5">Quiz 2</a></td>
                <td headers="timeLimit">1 hr 30 min</td>
                <td headers="dueDate">Feb 10, 2024 10:00 am</td>
            </tr></table>"#,
        );
        let items = SelectorChain::for_kind(EntityKind::Samigo).locate(&doc);
        let dates = parser();
        let base = base();
        let extractor = FieldExtractor::new(&base, &dates);
        let tool = extractor.samigo_item(&items[0]).unwrap();

        assert_eq!(tool.title, "Quiz 2");
        assert_eq!(tool.duration_minutes, Some(90));
        assert_eq!(tool.date, Some(Utc.with_ymd_and_hms(2024, 2, 10, 10, 0, 0).unwrap()));
    }
}
