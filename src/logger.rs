//! Progress reporting handed to the scraper and the calendar builder.
//!
//! Progress and row warnings go through a [`Logger`] the caller passes in.
//! [`LogFacade`] is the one used by the binary and simply forwards to the
//! `log` crate.

pub trait Logger {
    fn info(&self, message: &str);
    fn warn(&self, message: &str);
    fn error(&self, message: &str);
}

const TARGET: &str = "yale_football_calendar";

#[derive(Clone, Copy, Default, Debug)]
pub struct LogFacade;

impl Logger for LogFacade {
    fn info(&self, message: &str) {
        log::info!(target: TARGET, "{message}");
    }
    fn warn(&self, message: &str) {
        log::warn!(target: TARGET, "{message}");
    }
    fn error(&self, message: &str) {
        log::error!(target: TARGET, "{message}");
    }
}
