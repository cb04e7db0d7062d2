use std::{path::Path, time::Duration};

use anyhow::ensure;
use chrono_tz::Tz;
use serde::Deserialize;

use crate::season::Season;

const MAX_GAME_DURATION_MINUTES: i64 = 24 * 60;

/// Runtime settings.  Every field has a default, so an empty (or absent)
/// config file describes the stock Yale setup.
#[derive(Clone, PartialEq, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Schedule page; `{season}` is replaced with the season's starting year.
    pub schedule_url: String,
    pub user_agent: String,
    pub fetch_timeout_secs: u64,
    /// Zone the page's kickoff times are written in.
    pub time_zone: Tz,
    pub team_name: String,
    pub calendar_name: String,
    pub game_duration_minutes: i64,
    /// Right-hand side of every event UID.
    pub uid_domain: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            schedule_url: "https://yalebulldogs.com/sports/football/schedule/{season}".to_owned(),
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36".to_owned(),
            fetch_timeout_secs: 30,
            time_zone: chrono_tz::America::New_York,
            team_name: "Yale Football".to_owned(),
            calendar_name: "Yale Football".to_owned(),
            game_duration_minutes: 210,
            uid_domain: "yale-football-calendar".to_owned(),
        }
    }
}

impl Config {
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let config: Self = match path {
            Some(path) => scraping_utils::fs_util::read_toml(path)?,
            None => Self::default(),
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        ensure!(
            self.fetch_timeout_secs > 0,
            "fetch_timeout_secs must be positive"
        );
        ensure!(
            (1..=MAX_GAME_DURATION_MINUTES).contains(&self.game_duration_minutes),
            "game_duration_minutes must be between 1 and {MAX_GAME_DURATION_MINUTES}, got {}",
            self.game_duration_minutes
        );
        Ok(())
    }

    pub fn schedule_url(&self, season: Season) -> String {
        self.schedule_url.replace("{season}", &season.to_string())
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    pub fn game_duration(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.game_duration_minutes)
    }
}
