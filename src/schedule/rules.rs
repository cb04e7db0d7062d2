//! Where each field lives on the schedule page.
//!
//! Layout changes from season to season should only need edits to a
//! [`RuleTable`], never to the extraction code.

use scraper::{ElementRef, Selector};

use crate::{error::ScrapeStructureError, schedule::collapse_whitespace};

/// Selector strings for one page layout.
///
/// `rows` lists alternative row selectors; the first one that matches
/// anything wins.  Every field lists selectors tried in order inside a row.
#[derive(Clone, Copy, Debug)]
pub struct RuleTable {
    pub rows: &'static [&'static str],
    pub date: &'static [&'static str],
    pub time: &'static [&'static str],
    pub opponent: &'static [&'static str],
    pub home_away: &'static [&'static str],
    pub location: &'static [&'static str],
    pub broadcast: &'static [&'static str],
    /// Class names on a row element that mark an away game.
    pub away_row_classes: &'static [&'static str],
}

/// Sidearm Sports schedule pages, with the generic fallbacks used when the
/// markup drifts.
pub const SIDEARM: RuleTable = RuleTable {
    rows: &[
        ".sidearm-schedule-games-container .sidearm-schedule-game, .event-row",
        r#"div[id*="schedule"] tr, div[class*="schedule"] .event"#,
        r#"table tbody tr[data-url], div[class*="schedule"] li, div[class*="events"] li"#,
    ],
    date: &[
        ".sidearm-schedule-game-opponent-date > span:first-child",
        r#".sidearm-schedule-game-opponent-date, .event-date, [data-field="date"]"#,
        r#"span[class*="date"]"#,
        r#"div[class*="date"]"#,
    ],
    time: &[
        ".sidearm-schedule-game-opponent-date > span:nth-child(2)",
        r#".sidearm-schedule-game-time, .event-time, [data-field="time"]"#,
        r#"span[class*="time"]"#,
        r#"div[class*="time"]"#,
    ],
    opponent: &[
        r#".sidearm-schedule-game-opponent-name, .event-opponent, [data-field="opponent"]"#,
        r#"a[class*="opponent"]"#,
        r#"span[class*="team"]"#,
    ],
    home_away: &[
        ".sidearm-schedule-game-conference-vs",
        r#".event-home-away, [data-field="home-away"]"#,
    ],
    location: &[
        r#".sidearm-schedule-game-location, .event-location, [data-field="location"]"#,
        r#"span[class*="location"]"#,
        r#"div[class*="location"]"#,
    ],
    broadcast: &[
        r#".sidearm-schedule-game-network, .event-network, [data-field="network"]"#,
        r#"span[class*="network"]"#,
        r#"div[class*="tv"]"#,
    ],
    away_row_classes: &["away", "sidearm-schedule-away-game"],
};

impl RuleTable {
    pub fn compile(&self) -> Result<ExtractionRules, ScrapeStructureError> {
        Ok(ExtractionRules {
            rows: self
                .rows
                .iter()
                .map(|s| Ok((s.to_string(), parse_selector(s)?)))
                .collect::<Result<_, ScrapeStructureError>>()?,
            date: FieldRule::compile(self.date)?,
            time: FieldRule::compile(self.time)?,
            opponent: FieldRule::compile(self.opponent)?,
            home_away: FieldRule::compile(self.home_away)?,
            location: FieldRule::compile(self.location)?,
            broadcast: FieldRule::compile(self.broadcast)?,
            away_row_classes: self.away_row_classes.iter().map(|s| s.to_string()).collect(),
        })
    }
}

fn parse_selector(s: &str) -> Result<Selector, ScrapeStructureError> {
    Selector::parse(s).map_err(|e| ScrapeStructureError::InvalidSelector {
        selector: s.to_owned(),
        message: format!("{e:?}"),
    })
}

/// A compiled [`RuleTable`].
#[derive(Debug)]
pub struct ExtractionRules {
    pub(crate) rows: Vec<(String, Selector)>,
    pub(crate) date: FieldRule,
    pub(crate) time: FieldRule,
    pub(crate) opponent: FieldRule,
    pub(crate) home_away: FieldRule,
    pub(crate) location: FieldRule,
    pub(crate) broadcast: FieldRule,
    pub(crate) away_row_classes: Vec<String>,
}

impl ExtractionRules {
    pub fn sidearm() -> Result<Self, ScrapeStructureError> {
        SIDEARM.compile()
    }

    /// Rows matched by the first row selector that matches anything.
    pub fn select_rows<'a>(&self, html: &'a scraper::Html) -> Option<Vec<ElementRef<'a>>> {
        self.rows.iter().find_map(|(_, selector)| {
            let rows: Vec<_> = html.select(selector).collect();
            (!rows.is_empty()).then_some(rows)
        })
    }

    pub fn row_selectors(&self) -> Vec<String> {
        self.rows.iter().map(|(s, _)| s.clone()).collect()
    }

    pub fn is_away_row(&self, row: ElementRef) -> bool {
        row.value()
            .classes()
            .any(|class| self.away_row_classes.iter().any(|c| c == class))
    }
}

#[derive(Debug)]
pub struct FieldRule(Vec<Selector>);

impl FieldRule {
    fn compile(selectors: &[&str]) -> Result<Self, ScrapeStructureError> {
        selectors
            .iter()
            .map(|s| parse_selector(s))
            .collect::<Result<_, _>>()
            .map(Self)
    }

    /// Text of the first matching element that has any, whitespace collapsed.
    pub fn extract(&self, row: ElementRef) -> Option<String> {
        self.0.iter().find_map(|selector| {
            row.select(selector)
                .map(|e| collapse_whitespace(e.text()))
                .find(|text| !text.is_empty())
        })
    }
}
