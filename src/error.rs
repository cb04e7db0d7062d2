use chrono::NaiveDate;
use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Invalid schedule URL {url:?}: {source}")]
    Url {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("Could not build the HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("Request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("Request to {url} returned {status}")]
    Status { url: String, status: StatusCode },
}

#[derive(Debug, Error)]
pub enum ScrapeStructureError {
    #[error("No schedule rows were found with any of the selectors {tried:?}; the page layout has probably changed")]
    NoScheduleRows { tried: Vec<String> },
    #[error("Invalid selector {selector:?} in extraction rules: {message}")]
    InvalidSelector { selector: String, message: String },
}

/// Why a single row was dropped.  Never fatal on its own.
#[derive(Clone, PartialEq, Eq, Debug, Error)]
pub enum RowParseWarning {
    #[error("Skipping row without a date (opponent: {opponent:?})")]
    MissingDate { opponent: String },
    #[error("Skipping row without an opponent (date: {date:?})")]
    MissingOpponent { date: String },
    #[error("Skipping row with unrecognized date {date:?} (opponent: {opponent:?})")]
    UnparseableDate { date: String, opponent: String },
    #[error("Skipping duplicate game against {opponent:?} on {date}")]
    Duplicate { date: NaiveDate, opponent: String },
}

#[derive(Debug, Error)]
pub enum BuilderError {
    #[error("No valid games survived parsing ({skipped} rows skipped); the season is empty or the page could not be read")]
    NoGames { skipped: usize },
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    ScrapeStructure(#[from] ScrapeStructureError),
    #[error(transparent)]
    Builder(#[from] BuilderError),
}
