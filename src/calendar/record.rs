use chrono::{NaiveDate, NaiveTime};
use getset::{CopyGetters, Getters};
use itertools::Itertools;
use scraping_utils::regex;

use crate::{error::RowParseWarning, schedule::RawGameEntry, season::Season};

#[derive(Clone, Copy, PartialEq, Eq, Debug, derive_more::Display)]
pub enum HomeAway {
    #[display("Home Game")]
    Home,
    #[display("Away Game")]
    Away,
}

#[derive(Clone, PartialEq, Eq, Debug, Getters, CopyGetters)]
pub struct GameRecord {
    #[getset(get_copy = "pub")]
    season: Season,
    #[getset(get_copy = "pub")]
    date: NaiveDate,
    /// Local kickoff time; `None` while it is still TBA.
    #[getset(get_copy = "pub")]
    start_time: Option<NaiveTime>,
    #[getset(get = "pub")]
    opponent: String,
    #[getset(get = "pub")]
    venue: String,
    #[getset(get = "pub")]
    broadcast: String,
    #[getset(get_copy = "pub")]
    home_away: HomeAway,
    #[getset(get = "pub")]
    uid: String,
}

/// Outcome of reading the time column.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Kickoff {
    At(NaiveTime),
    Tba,
    Unrecognized,
}

impl GameRecord {
    pub fn tba(&self) -> bool {
        self.start_time.is_none()
    }

    pub(crate) fn without_start_time(self) -> Self {
        Self {
            start_time: None,
            ..self
        }
    }
}

/// Turns one raw row into a record, or says why it cannot.
///
/// `on_unrecognized_time` is called with the raw time text when a time is
/// present but neither a clock time nor a TBA marker; the game is kept as TBA.
pub fn normalize(
    raw: &RawGameEntry,
    season: Season,
    uid_domain: &str,
    mut on_unrecognized_time: impl FnMut(&str),
) -> Result<GameRecord, RowParseWarning> {
    let (opponent, marked_away) = clean_opponent(raw.opponent());
    if opponent.is_empty() {
        return Err(RowParseWarning::MissingOpponent {
            date: raw.date().clone(),
        });
    }
    let date = parse_date(raw.date(), season).ok_or_else(|| RowParseWarning::UnparseableDate {
        date: raw.date().clone(),
        opponent: opponent.to_owned(),
    })?;

    let time_text = raw.time().as_deref().unwrap_or_default();
    let start_time = match parse_time(time_text) {
        Kickoff::At(time) => Some(time),
        Kickoff::Tba => None,
        Kickoff::Unrecognized => {
            on_unrecognized_time(time_text);
            None
        }
    };

    let home_away = if marked_away || raw.away_hint() || location_says_away(raw.location()) {
        HomeAway::Away
    } else {
        HomeAway::Home
    };

    Ok(GameRecord {
        season: Season::containing(date),
        date,
        start_time,
        uid: event_uid(date, opponent, uid_domain),
        opponent: opponent.to_owned(),
        venue: raw.location().clone(),
        broadcast: raw.broadcast().clone(),
        home_away,
    })
}

/// Strips "at"/"@"/"vs." prefixes.  The flag tells whether an away prefix was found.
fn clean_opponent(text: &str) -> (&str, bool) {
    let text = text.trim();
    let lower = text.to_ascii_lowercase();
    let prefixes = [
        ("at ", true),
        ("@ ", true),
        ("@", true),
        ("vs. ", false),
        ("vs ", false),
    ];
    for (prefix, away) in prefixes {
        if lower.starts_with(prefix) {
            return (text[prefix.len()..].trim_start(), away);
        }
    }
    (text, false)
}

fn location_says_away(location: &str) -> bool {
    let lower = location.to_ascii_lowercase();
    lower.starts_with("at ") || lower.contains("away")
}

/// Stable for a given (date, opponent), whatever else about the row changes.
pub fn event_uid(date: NaiveDate, opponent: &str, domain: &str) -> String {
    let slug = opponent
        .split(|c: char| !c.is_alphanumeric())
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase)
        .join("-");
    let slug = if slug.is_empty() { "game" } else { slug.as_str() };
    format!("{}-{slug}@{domain}", date.format("%Y%m%d"))
}

/// Accepted date shapes, tried in order:
///
/// * `Sep 21, 2024`, `Saturday, September 21 2024`, `Sep 21 (Sat)`, `Sept. 21`
/// * `9/21/2024`, `9/21/24`, `9/21`
/// * `2024-09-21`
///
/// Trailing text after the date (a weekday in parentheses, a time) is ignored.
/// A missing year is filled in from `season`.
pub fn parse_date(text: &str, season: Season) -> Option<NaiveDate> {
    const FORMATS: [fn(&str, Season) -> Option<NaiveDate>; 3] =
        [parse_month_name_date, parse_numeric_date, parse_iso_date];
    let text = text.trim();
    FORMATS.iter().find_map(|f| f(text, season))
}

fn parse_month_name_date(text: &str, season: Season) -> Option<NaiveDate> {
    let captures = regex!(
        r"^(?:[A-Za-z]+\.?,?\s+)??([A-Za-z]{3,})\.?\s+(\d{1,2})(?:st|nd|rd|th)?(?:,?\s+(\d{4}))?(?:\b|$)"
    )
    .captures(text)?;
    let month = month_from_name(&captures[1])?;
    let day = captures[2].parse().ok()?;
    match captures.get(3) {
        Some(year) => NaiveDate::from_ymd_opt(year.as_str().parse().ok()?, month, day),
        None => season.resolve(month, day),
    }
}

fn parse_numeric_date(text: &str, season: Season) -> Option<NaiveDate> {
    let captures = regex!(r"^(\d{1,2})/(\d{1,2})(?:/(\d{4}|\d{2}))?(?:\b|$)").captures(text)?;
    let month = captures[1].parse().ok()?;
    let day = captures[2].parse().ok()?;
    match captures.get(3) {
        Some(year) => {
            let year: i32 = year.as_str().parse().ok()?;
            let year = if year < 100 { 2000 + year } else { year };
            NaiveDate::from_ymd_opt(year, month, day)
        }
        None => season.resolve(month, day),
    }
}

fn parse_iso_date(text: &str, _: Season) -> Option<NaiveDate> {
    let date = regex!(r"^\d{4}-\d{2}-\d{2}").find(text)?;
    NaiveDate::parse_from_str(date.as_str(), "%Y-%m-%d").ok()
}

fn month_from_name(name: &str) -> Option<u32> {
    let months = [
        "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
    ];
    let lower = name.to_ascii_lowercase();
    let prefix = lower.get(..3)?;
    let month = months.iter().position(|&m| m == prefix)? as u32 + 1;
    // reject words that merely start like a month ("Mayhem", "Marathon")
    let full = NaiveDate::from_ymd_opt(2000, month, 1)?.format("%B").to_string();
    full.to_ascii_lowercase().starts_with(&lower).then_some(month)
}

/// Reads a kickoff time.  Dots and a trailing zone abbreviation are ignored,
/// so `1 p.m. ET` reads the same as `1:00 PM`.
pub fn parse_time(text: &str) -> Kickoff {
    let normalized = text.replace('.', "").trim().to_ascii_uppercase();
    let normalized = regex!(r"\s*\b(?:ET|EST|EDT)$")
        .replace(&normalized, "")
        .into_owned();
    if matches!(normalized.as_str(), "" | "TBA" | "TBD" | "ALL DAY") {
        return Kickoff::Tba;
    }
    let Some(captures) = regex!(r"^(\d{1,2})(?::(\d{2}))?\s*(AM|PM)?$").captures(&normalized)
    else {
        return Kickoff::Unrecognized;
    };
    let hour: u32 = match captures[1].parse() {
        Ok(hour) => hour,
        Err(_) => return Kickoff::Unrecognized,
    };
    let minute: u32 = captures
        .get(2)
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0);
    let hour = match captures.get(3).map(|m| m.as_str()) {
        Some(_) if !(1..=12).contains(&hour) => return Kickoff::Unrecognized,
        Some("AM") => hour % 12,
        Some(_) => hour % 12 + 12,
        // a bare "1" is too ambiguous to be a clock time
        None if captures.get(2).is_none() => return Kickoff::Unrecognized,
        None => hour,
    };
    NaiveTime::from_hms_opt(hour, minute, 0).map_or(Kickoff::Unrecognized, Kickoff::At)
}
