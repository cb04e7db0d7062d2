//! Turning raw schedule rows into a calendar.

use std::{collections::HashSet, fmt::Display};

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use getset::{CopyGetters, Getters};
use icalendar::{Calendar, Component, DatePerhapsTime, Event, EventLike, Property};
use itertools::Itertools;

use crate::{
    chrono_util::local_to_utc,
    config::Config,
    error::{BuilderError, RowParseWarning},
    logger::Logger,
    schedule::RawGameEntry,
    season::Season,
};

pub mod record;

pub use record::{GameRecord, HomeAway};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum EventTime {
    /// An instant, in UTC.
    Utc(NaiveDateTime),
    /// An all-day date.
    Date(NaiveDate),
}

impl EventTime {
    fn to_ical(self) -> DatePerhapsTime {
        match self {
            EventTime::Utc(t) => Utc.from_utc_datetime(&t).into(),
            EventTime::Date(d) => d.into(),
        }
    }
}

#[derive(Clone, PartialEq, Eq, Debug, Getters, CopyGetters)]
pub struct CalendarEvent {
    #[getset(get = "pub")]
    uid: String,
    /// Local game date, which can differ from the UTC date of `start`.
    #[getset(get_copy = "pub")]
    date: NaiveDate,
    #[getset(get_copy = "pub")]
    stamp: NaiveDateTime,
    #[getset(get_copy = "pub")]
    start: EventTime,
    #[getset(get_copy = "pub")]
    end: EventTime,
    #[getset(get = "pub")]
    summary: String,
    #[getset(get = "pub")]
    location: Option<String>,
    #[getset(get = "pub")]
    description: String,
}

impl CalendarEvent {
    pub fn all_day(&self) -> bool {
        matches!(self.start, EventTime::Date(_))
    }

    /// Chronological by local date; all-day entries come before timed ones
    /// on the same day and the UID breaks any remaining tie.
    fn sort_key(&self) -> (NaiveDate, Option<NaiveDateTime>, &str) {
        let start = match self.start {
            EventTime::Utc(start) => Some(start),
            EventTime::Date(_) => None,
        };
        (self.date, start, self.uid.as_str())
    }

    fn to_component(&self) -> Event {
        let mut event = Event::new();
        event
            .uid(&self.uid)
            .timestamp(Utc.from_utc_datetime(&self.stamp))
            .starts(self.start.to_ical())
            .ends(self.end.to_ical())
            .summary(&self.summary)
            .description(&self.description);
        if let Some(location) = &self.location {
            event.location(location);
        }
        event.done()
    }
}

/// The generated calendar.  Always rebuilt from scratch.
#[derive(Clone, PartialEq, Debug, Getters, CopyGetters)]
pub struct CalendarDocument {
    #[getset(get = "pub")]
    name: String,
    #[getset(get_copy = "pub")]
    time_zone: Tz,
    #[getset(get = "pub")]
    events: Vec<CalendarEvent>,
}

impl CalendarDocument {
    pub fn to_calendar(&self) -> Calendar {
        let mut calendar = Calendar::new();
        calendar
            .name(&self.name)
            .timezone(self.time_zone.name())
            .append_property(Property::new("METHOD", "PUBLISH"));
        for event in &self.events {
            calendar.push(event.to_component());
        }
        calendar.done()
    }

    /// RFC 5545 text; identical for identical events.
    pub fn to_ics(&self) -> String {
        self.to_calendar().to_string()
    }
}

impl Display for CalendarDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_ics())
    }
}

/// Builds one event per usable row, sorted by date.
///
/// Bad rows are logged and dropped.  Fails only when no game survives, since
/// an empty calendar almost always means the page was not understood.
pub fn create_calendar(
    raw_entries: &[RawGameEntry],
    today: NaiveDate,
    config: &Config,
    logger: &dyn Logger,
) -> Result<CalendarDocument, BuilderError> {
    let season = Season::current(today);
    let (records, warnings): (Vec<_>, Vec<_>) = normalize_all(raw_entries, season, config, logger)
        .into_iter()
        .partition_result();
    for warning in &warnings {
        logger.warn(&warning.to_string());
    }
    if records.is_empty() {
        let error = BuilderError::NoGames {
            skipped: warnings.len(),
        };
        logger.error(&error.to_string());
        return Err(error);
    }

    let events = records
        .into_iter()
        .map(|record| to_event(record, config, logger))
        .sorted_by(|a, b| a.sort_key().cmp(&b.sort_key()))
        .collect_vec();
    logger.info(&format!(
        "Calendar created with {} events ({} rows skipped)",
        events.len(),
        warnings.len()
    ));
    Ok(CalendarDocument {
        name: config.calendar_name.clone(),
        time_zone: config.time_zone,
        events,
    })
}

/// One outcome per row, in page order.  Later rows repeating an earlier
/// (date, opponent) are reported as duplicates.
fn normalize_all(
    raw_entries: &[RawGameEntry],
    season: Season,
    config: &Config,
    logger: &dyn Logger,
) -> Vec<Result<GameRecord, RowParseWarning>> {
    let mut seen = HashSet::new();
    raw_entries
        .iter()
        .map(|raw| {
            let record = record::normalize(raw, season, &config.uid_domain, |time| {
                logger.warn(&format!(
                    "Unrecognized time {time:?} for {:?} on {:?}; treating it as TBA",
                    raw.opponent(),
                    raw.date()
                ))
            })?;
            if !seen.insert(record.uid().clone()) {
                return Err(RowParseWarning::Duplicate {
                    date: record.date(),
                    opponent: record.opponent().clone(),
                });
            }
            Ok(record)
        })
        .collect()
}

fn to_event(record: GameRecord, config: &Config, logger: &dyn Logger) -> CalendarEvent {
    let kickoff = record.start_time().and_then(|time| {
        let utc = local_to_utc(config.time_zone, record.date().and_time(time));
        if utc.is_none() {
            logger.warn(&format!(
                "Kickoff {time} on {} does not exist in {}; treating it as TBA",
                record.date(),
                config.time_zone
            ));
        }
        utc
    });
    let record = match kickoff {
        Some(_) => record,
        None => record.without_start_time(),
    };

    let (start, end, stamp) = match kickoff {
        Some(start) => (
            EventTime::Utc(start),
            EventTime::Utc(start + config.game_duration()),
            start,
        ),
        None => {
            let date = record.date();
            (
                EventTime::Date(date),
                EventTime::Date(date.succ_opt().unwrap_or(date)),
                date.and_time(NaiveTime::MIN),
            )
        }
    };

    let versus = match record.home_away() {
        HomeAway::Home => "vs",
        HomeAway::Away => "at",
    };
    let summary = format!("{} {versus} {}", config.team_name, record.opponent());

    let mut description = vec![];
    if record.tba() {
        description.push("Time TBA".to_owned());
    }
    description.push(record.home_away().to_string());
    if !record.venue().is_empty() {
        description.push(format!("Location: {}", record.venue()));
    }
    if !record.broadcast().is_empty() {
        description.push(format!("Broadcast on: {}", record.broadcast()));
    }

    CalendarEvent {
        uid: record.uid().clone(),
        date: record.date(),
        stamp,
        start,
        end,
        summary,
        location: (!record.venue().is_empty()).then(|| record.venue().clone()),
        description: description.join("\n"),
    }
}
