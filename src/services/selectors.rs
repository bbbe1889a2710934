// src/services/selectors.rs

//! Ordered layout strategies for locating entity items on a portal page.
//!
//! Each entity kind has a fixed list of strategies. The chain walks the list
//! and stops at the first strategy that yields at least one item; results of
//! different primary strategies are never mixed. Announcement pages also
//! carry a "recent announcements" region which is always scanned and
//! appended after the primary results.

use scraper::{ElementRef, Selector};
use serde_json::Value;

use crate::error::{AppError, Result};
use crate::fetch::ParsedDocument;

/// The kinds of items the portal exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Course,
    Announcement,
    Assignment,
    /// Schedule tool events, scanned for exams
    Calendar,
    /// Tests & Quizzes published assessments
    Samigo,
}

/// How a strategy finds items in a document.
#[derive(Debug, Clone, Copy)]
pub enum Locator {
    /// CSS selector over an HTML page
    Css(&'static str),
    /// Name of an array in an entity-broker JSON response
    JsonArray(&'static str),
}

/// One named way of locating items.
#[derive(Debug, Clone, Copy)]
pub struct LayoutStrategy {
    pub name: &'static str,
    pub locator: Locator,
}

const fn css(name: &'static str, selector: &'static str) -> LayoutStrategy {
    LayoutStrategy {
        name,
        locator: Locator::Css(selector),
    }
}

const fn json(name: &'static str, key: &'static str) -> LayoutStrategy {
    LayoutStrategy {
        name,
        locator: Locator::JsonArray(key),
    }
}

const COURSE_STRATEGIES: &[LayoutStrategy] = &[
    json("site-collection", "site_collection"),
    css(
        "site-navigation",
        r#"#topnav a.link-container[href*="/portal/site/"], nav#linkNav a[href*="/portal/site/"]"#,
    ),
    css(
        "favorite-sites",
        r#".fav-sites-entry a[href*="/portal/site/"], #selectSite a[href*="/portal/site/"]"#,
    ),
    css("site-links", r#"a[href*="/portal/site/"]"#),
];

const ANNOUNCEMENT_STRATEGIES: &[LayoutStrategy] = &[
    json("announcement-collection", "announcement_collection"),
    css("announcement-list", "ul.announcementList > li, div.announcement-item"),
    css("announcement-table", "table.listHier tr:has(td)"),
    css("portlet-list", ".portletBody li:has(a)"),
];

/// Recent-announcements region shown alongside the main listing.
const ANNOUNCEMENT_MERGED: LayoutStrategy = css(
    "recent-announcements",
    "#synopticAnnouncements li, .synopticList li, table.synopticList tr:has(td)",
);

const ASSIGNMENT_STRATEGIES: &[LayoutStrategy] = &[
    json("assignment-collection", "assignment_collection"),
    css("assignment-list", r#"table tr:has(td[headers="title"])"#),
    css("assignment-table", "table.listHier tr:has(td)"),
    css("portlet-list", ".portletBody li:has(a)"),
];

const CALENDAR_STRATEGIES: &[LayoutStrategy] = &[
    css("schedule-list", "table.listHier tr:has(td), table.calendar-list tr:has(td)"),
    css("event-list", "li.event, .event-list li, div.fc-event"),
];

const SAMIGO_STRATEGIES: &[LayoutStrategy] = &[
    css(
        "published-assessments",
        r#"table[id$="selectTable"] tr:has(td), table.tablesorter tr:has(td)"#,
    ),
    css("assessment-list", ".portletBody li:has(a), div.assessment-item"),
];

/// An item located on a page, borrowed from the parsed document.
#[derive(Debug, Clone, Copy)]
pub enum RawItem<'a> {
    Element(ElementRef<'a>),
    Record(&'a Value),
}

/// Fixed strategy list for one entity kind.
#[derive(Debug, Clone, Copy)]
pub struct SelectorChain {
    kind: EntityKind,
    strategies: &'static [LayoutStrategy],
    merged: Option<LayoutStrategy>,
}

impl SelectorChain {
    pub fn for_kind(kind: EntityKind) -> Self {
        let (strategies, merged) = match kind {
            EntityKind::Course => (COURSE_STRATEGIES, None),
            EntityKind::Announcement => (ANNOUNCEMENT_STRATEGIES, Some(ANNOUNCEMENT_MERGED)),
            EntityKind::Assignment => (ASSIGNMENT_STRATEGIES, None),
            EntityKind::Calendar => (CALENDAR_STRATEGIES, None),
            EntityKind::Samigo => (SAMIGO_STRATEGIES, None),
        };
        Self {
            kind,
            strategies,
            merged,
        }
    }

    pub fn strategies(&self) -> &'static [LayoutStrategy] {
        self.strategies
    }

    /// Locate items using the first productive strategy, then append the
    /// merged region. Unknown layouts yield an empty list.
    pub fn locate<'a>(&self, document: &'a ParsedDocument) -> Vec<RawItem<'a>> {
        let mut items = self
            .strategies
            .iter()
            .find_map(|strategy| {
                let found = apply(strategy, document);
                if found.is_empty() {
                    None
                } else {
                    log::debug!(
                        "{:?}: strategy '{}' matched {} items",
                        self.kind,
                        strategy.name,
                        found.len()
                    );
                    Some(found)
                }
            })
            .unwrap_or_default();

        if let Some(merged) = &self.merged {
            let extra = apply(merged, document);
            if !extra.is_empty() {
                log::debug!(
                    "{:?}: merged region '{}' added {} items",
                    self.kind,
                    merged.name,
                    extra.len()
                );
                items.extend(extra);
            }
        }

        items
    }
}

fn apply<'a>(strategy: &LayoutStrategy, document: &'a ParsedDocument) -> Vec<RawItem<'a>> {
    match (strategy.locator, document) {
        (Locator::Css(selector), ParsedDocument::Html(html)) => match parse_selector(selector) {
            Ok(sel) => html.select(&sel).map(RawItem::Element).collect(),
            Err(e) => {
                log::warn!("Skipping strategy '{}': {}", strategy.name, e);
                Vec::new()
            }
        },
        (Locator::JsonArray(key), ParsedDocument::Json(value)) => value
            .get(key)
            .and_then(Value::as_array)
            .map(|records| records.iter().map(RawItem::Record).collect())
            .unwrap_or_default(),
        _ => Vec::new(),
    }
}

pub(crate) fn parse_selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
}
