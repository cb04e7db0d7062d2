pub mod api;
pub mod calendar;
pub mod chrono_util;
pub mod config;
pub mod error;
pub mod logger;
pub mod pipeline;
pub mod schedule;
pub mod season;
