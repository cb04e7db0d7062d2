use crate::{
    calendar::{create_calendar, CalendarDocument},
    chrono_util::today_in,
    config::Config,
    error::Error,
    logger::Logger,
    schedule::ScheduleScraper,
    season::Season,
};

/// Scrape the current season and build its calendar.
///
/// Row-level problems are logged and skipped.  Network, page-layout and
/// empty-result problems come back as errors; the caller should then leave
/// the previously published calendar alone.
pub async fn update_calendar(config: &Config, logger: &dyn Logger) -> Result<CalendarDocument, Error> {
    let today = today_in(config.time_zone);
    let season = Season::current(today);
    logger.info(&format!("Updating the calendar for the {season} season"));
    let entries = ScheduleScraper::new(config, season, logger)?
        .scrape_schedule()
        .await?;
    Ok(create_calendar(&entries, today, config, logger)?)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use itertools::Itertools;
    use scraper::Html;

    use crate::{
        calendar::create_calendar,
        config::Config,
        logger::testing::RecordingLogger,
        schedule::{parse_schedule, ExtractionRules},
    };

    #[test]
    fn fixture_page_to_calendar() {
        let logger = RecordingLogger::default();
        let html = Html::parse_document(include_str!("../tests/fixtures/sidearm_schedule.html"));
        let entries = parse_schedule(&html, &ExtractionRules::sidearm().unwrap(), &logger).unwrap();
        let today = NaiveDate::from_ymd_opt(2025, 9, 1).unwrap();
        let calendar = create_calendar(&entries, today, &Config::default(), &logger).unwrap();

        let summaries = calendar.events().iter().map(|e| e.summary().as_str()).collect_vec();
        assert_eq!(
            summaries,
            [
                "Yale Football vs Holy Cross",
                "Yale Football at Cornell",
                "Yale Football at Lehigh",
                "Yale Football vs Harvard",
            ]
        );
        // only the "Open Date" row was dropped
        assert_eq!(logger.warnings().len(), 1);

        let again = create_calendar(&entries, today, &Config::default(), &logger).unwrap();
        assert_eq!(calendar.to_ics(), again.to_ics());
    }
}
