use scraper::{ElementRef, Html};

use crate::{
    error::{RowParseWarning, ScrapeStructureError},
    logger::Logger,
    schedule::{ExtractionRules, RawGameEntry},
};

pub fn parse_schedule(
    html: &Html,
    rules: &ExtractionRules,
    logger: &dyn Logger,
) -> Result<Vec<RawGameEntry>, ScrapeStructureError> {
    let rows = rules
        .select_rows(html)
        .ok_or_else(|| ScrapeStructureError::NoScheduleRows {
            tried: rules.row_selectors(),
        })?;
    logger.info(&format!("Found {} potential schedule rows", rows.len()));

    let mut entries = Vec::with_capacity(rows.len());
    for row in rows {
        match parse_row(row, rules) {
            Ok(entry) => entries.push(entry),
            Err(warning) => logger.warn(&warning.to_string()),
        }
    }
    Ok(entries)
}

fn parse_row(row: ElementRef, rules: &ExtractionRules) -> Result<RawGameEntry, RowParseWarning> {
    let date = rules.date.extract(row);
    let opponent = rules.opponent.extract(row);
    let (date, opponent) = match (date, opponent) {
        (Some(date), Some(opponent)) => (date, opponent),
        (None, opponent) => {
            return Err(RowParseWarning::MissingDate {
                opponent: opponent.unwrap_or_default(),
            })
        }
        (Some(date), None) => return Err(RowParseWarning::MissingOpponent { date }),
    };

    let marked_away = rules.home_away.extract(row).is_some_and(|marker| {
        let marker = marker.to_ascii_lowercase();
        marker.starts_with("at") || marker.starts_with('@')
    });

    Ok(RawGameEntry {
        date,
        time: rules.time.extract(row),
        opponent,
        location: rules.location.extract(row).unwrap_or_default(),
        broadcast: rules.broadcast.extract(row).unwrap_or_default(),
        away_hint: marked_away || rules.is_away_row(row),
    })
}

#[cfg(test)]
mod tests {
    use scraper::Html;

    use super::parse_schedule;
    use crate::{
        error::ScrapeStructureError,
        logger::testing::RecordingLogger,
        schedule::{ExtractionRules, RawGameEntry},
    };

    const SIDEARM_PAGE: &str = include_str!("../../tests/fixtures/sidearm_schedule.html");

    #[test]
    fn sidearm_page() {
        let logger = RecordingLogger::default();
        let entries = parse_schedule(
            &Html::parse_document(SIDEARM_PAGE),
            &ExtractionRules::sidearm().unwrap(),
            &logger,
        )
        .unwrap();

        assert_eq!(
            entries,
            vec![
                RawGameEntry::builder()
                    .date("Sep 20 (Sat)")
                    .time(Some("1:00 PM".to_owned()))
                    .opponent("Holy Cross")
                    .location("New Haven, Conn. Yale Bowl")
                    .broadcast("ESPN+")
                    .build(),
                RawGameEntry::builder()
                    .date("Sep 27 (Sat)")
                    .time(Some("TBA".to_owned()))
                    .opponent("Cornell")
                    .location("Ithaca, N.Y.")
                    .away_hint(true)
                    .build(),
                RawGameEntry::builder()
                    .date("Oct 4 (Sat)")
                    .opponent("Lehigh")
                    .location("Bethlehem, Pa.")
                    .broadcast("ESPN+")
                    .away_hint(true)
                    .build(),
                RawGameEntry::builder()
                    .date("Nov 22 (Sat)")
                    .time(Some("12:00 PM".to_owned()))
                    .opponent("Harvard")
                    .location("New Haven, Conn. Yale Bowl")
                    .broadcast("ESPNU")
                    .build(),
            ]
        );

        // the row with no opponent is dropped, and said so
        let warnings = logger.warnings();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("without an opponent"), "{warnings:?}");
    }

    #[test]
    fn missing_date_is_skipped() {
        let logger = RecordingLogger::default();
        let html = Html::parse_document(
            r#"<div class="schedule"><ul>
                <li class="event"><span class="event-opponent">Brown</span></li>
                <li class="event">
                    <span class="event-date">11/8</span>
                    <span class="event-opponent">Princeton</span>
                </li>
            </ul></div>"#,
        );
        let entries =
            parse_schedule(&html, &ExtractionRules::sidearm().unwrap(), &logger).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].opponent(), "Princeton");
        assert_eq!(entries[0].date(), "11/8");
        assert_eq!(entries[0].time(), &None);
        assert_eq!(entries[0].location(), "");
        assert!(logger.warnings()[0].contains("Brown"));
    }

    #[test]
    fn unknown_layout_is_fatal() {
        let logger = RecordingLogger::default();
        let html = Html::parse_document("<html><body><h1>Page moved</h1></body></html>");
        let err = parse_schedule(&html, &ExtractionRules::sidearm().unwrap(), &logger).unwrap_err();
        assert!(matches!(err, ScrapeStructureError::NoScheduleRows { ref tried } if tried.len() == 3));
    }
}
