//! Fetching the schedule page and pulling raw per-game text out of it.

use getset::{CopyGetters, Getters};
use itertools::Itertools;
use scraper::Html;
use typed_builder::TypedBuilder;
use url::Url;

use crate::{
    api::{fetch_page, reqwest_client},
    config::Config,
    error::{Error, FetchError},
    logger::Logger,
    season::Season,
};

pub mod parser;
pub mod rules;

pub use parser::parse_schedule;
pub use rules::{ExtractionRules, RuleTable, SIDEARM};

/// Text of one schedule row, exactly as found on the page.
#[derive(Clone, PartialEq, Eq, Debug, TypedBuilder, Getters, CopyGetters)]
pub struct RawGameEntry {
    #[builder(setter(into))]
    #[getset(get = "pub")]
    date: String,
    /// `None` when the row has no time at all.
    #[builder(default, setter(into))]
    #[getset(get = "pub")]
    time: Option<String>,
    #[builder(setter(into))]
    #[getset(get = "pub")]
    opponent: String,
    #[builder(default, setter(into))]
    #[getset(get = "pub")]
    location: String,
    #[builder(default, setter(into))]
    #[getset(get = "pub")]
    broadcast: String,
    /// The row itself says the game is away (row class or an "at" marker).
    #[builder(default)]
    #[getset(get_copy = "pub")]
    away_hint: bool,
}

pub struct ScheduleScraper<'l> {
    client: reqwest::Client,
    url: Url,
    rules: ExtractionRules,
    logger: &'l dyn Logger,
}

impl<'l> ScheduleScraper<'l> {
    pub fn new(config: &Config, season: Season, logger: &'l dyn Logger) -> Result<Self, Error> {
        let url = config.schedule_url(season);
        let url = Url::parse(&url).map_err(|source| FetchError::Url { url, source })?;
        Ok(Self {
            client: reqwest_client(config)?,
            url,
            rules: ExtractionRules::sidearm()?,
            logger,
        })
    }

    /// One GET, one parse pass.  Network and layout problems are fatal;
    /// bad rows are logged and dropped.
    pub async fn scrape_schedule(&self) -> Result<Vec<RawGameEntry>, Error> {
        self.logger.info(&format!("Fetching football schedule from {}", self.url));
        let body = fetch_page(&self.client, self.url.clone()).await?;
        let document = Html::parse_document(&body);
        let entries = parse_schedule(&document, &self.rules, self.logger)?;
        self.logger.info(&format!("Scraped {} games", entries.len()));
        Ok(entries)
    }
}

pub(crate) fn collapse_whitespace<'a>(text: impl Iterator<Item = &'a str>) -> String {
    text.flat_map(str::split_whitespace).join(" ")
}
