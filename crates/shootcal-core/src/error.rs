//! Error types for shootcal-core.
//!
//! Building a calendar is deliberately forgiving (see
//! [`build_calendar`](crate::builder::build_calendar)); the variants here are
//! what the strict entry points and the day-move operator report.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for shootcal operations.
#[derive(Debug, Error)]
pub enum ScheduleError {
    /// The project lacks a prep start or shoot start date.
    #[error("Project '{0}' is missing its prep start or shoot start date")]
    MissingProjectDates(String),

    /// Date arithmetic left chrono's supported range.
    #[error("Date out of range: {0}")]
    DateOutOfRange(String),

    /// A move was requested with a mode other than `swap`.
    #[error("Unsupported move mode: '{0}'. Expected 'swap'")]
    UnsupportedMoveMode(String),

    /// One of the requested dates is not part of the calendar.
    #[error("Day {0} not found in calendar")]
    DayNotFound(NaiveDate),

    /// Only shoot days may be moved.
    #[error("Day {0} is not a shoot day; only shoot days can be moved")]
    NotAShootDay(NaiveDate),

    /// The destination cannot host a shoot day.
    #[error("Cannot move to {0}: it is a non-working day")]
    IneligibleDestination(NaiveDate),

    /// Reading a data file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A data file did not contain the expected JSON shape.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ScheduleError {
    /// Short machine-readable tag for rejected move operations.
    ///
    /// Returns `None` for errors that are not move rejections.
    pub fn rejection_kind(&self) -> Option<&'static str> {
        match self {
            ScheduleError::UnsupportedMoveMode(_) => Some("unsupported_mode"),
            ScheduleError::DayNotFound(_) => Some("day_not_found"),
            ScheduleError::NotAShootDay(_) => Some("not_a_shoot_day"),
            ScheduleError::IneligibleDestination(_) => Some("ineligible_destination"),
            _ => None,
        }
    }
}

/// Result type alias for shootcal operations.
pub type Result<T> = std::result::Result<T, ScheduleError>;
