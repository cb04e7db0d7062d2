use chrono::{Datelike, NaiveDate};

/// First month that belongs to the season starting in the same calendar year.
/// January to June are the tail of the previous season.
const SEASON_START_MONTH: u32 = 7;

/// A football season, identified by the calendar year it starts in.
#[derive(
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Debug,
    derive_more::From,
    derive_more::Into,
    derive_more::Display,
)]
pub struct Season(i32);

impl Season {
    pub fn containing(date: NaiveDate) -> Self {
        if date.month() >= SEASON_START_MONTH {
            Self(date.year())
        } else {
            Self(date.year() - 1)
        }
    }

    /// The season in progress (or upcoming) on the day of invocation.
    pub fn current(today: NaiveDate) -> Self {
        Self::containing(today)
    }

    pub fn year(self) -> i32 {
        self.0
    }

    /// Stamps a year onto a month/day that came without one.
    pub fn resolve(self, month: u32, day: u32) -> Option<NaiveDate> {
        let year = if month >= SEASON_START_MONTH {
            self.0
        } else {
            self.0 + 1
        };
        NaiveDate::from_ymd_opt(year, month, day)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::Season;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn season_boundary() {
        assert_eq!(Season::containing(ymd(2025, 1, 15)), Season::from(2024));
        assert_eq!(Season::containing(ymd(2025, 6, 30)), Season::from(2024));
        assert_eq!(Season::containing(ymd(2025, 7, 1)), Season::from(2025));
        assert_eq!(Season::containing(ymd(2025, 12, 31)), Season::from(2025));
    }

    #[test]
    fn resolve_in_january_run() {
        let season = Season::current(ymd(2025, 1, 5));
        assert_eq!(season.year(), 2024);
        assert_eq!(season.resolve(1, 15), Some(ymd(2025, 1, 15)));
        assert_eq!(season.resolve(9, 10), Some(ymd(2024, 9, 10)));
    }

    #[test]
    fn resolve_in_september_run() {
        let season = Season::current(ymd(2025, 9, 1));
        assert_eq!(season.year(), 2025);
        assert_eq!(season.resolve(9, 10), Some(ymd(2025, 9, 10)));
        assert_eq!(season.resolve(1, 15), Some(ymd(2026, 1, 15)));
    }

    #[test]
    fn resolve_rejects_impossible_days() {
        assert_eq!(Season::from(2024).resolve(2, 30), None);
        assert_eq!(Season::from(2024).resolve(13, 1), None);
        // 2025 is not a leap year
        assert_eq!(Season::from(2024).resolve(2, 29), None);
        assert_eq!(Season::from(2023).resolve(2, 29), Some(ymd(2024, 2, 29)));
    }
}
