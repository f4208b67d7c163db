//! Error types surfaced at the editing and persistence boundaries.
//!
//! The arithmetic itself never fails loudly: conversions return `Option` and
//! callers drop whatever does not convert. These errors exist for the places
//! where a user or a store hands over data that must be rejected.

use crate::{CalendarDate, DayNumber};

/// Error returned when a calendar configuration breaks a shape invariant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// No day names, so there is no week.
    #[error("calendar must define at least one day name")]
    NoDayNames,

    /// No month names, so a year has no length.
    #[error("calendar must define at least one month")]
    NoMonths,

    /// `daysPerMonth` is not index-aligned with `monthNames`.
    #[error("daysPerMonth has {days} entries but there are {months} months")]
    MonthLengthMismatch { months: usize, days: usize },

    /// A month was configured with zero days.
    #[error("month {month} ({name}) must have at least one day")]
    EmptyMonth { month: usize, name: String },

    /// The custom leap rule needs a positive interval.
    #[error("custom leap year offset must be at least 1")]
    InvalidLeapYearOffset,

    /// The custom leap rule points at a month that does not exist.
    #[error("leap day month index {index} is out of range (must be < {months})")]
    InvalidLeapDayMonth { index: usize, months: usize },

    /// The standard rule adds its day to month 1, which must exist.
    #[error("standard leap rule needs at least two months, found {months}")]
    StandardRuleWithoutSecondMonth { months: usize },

    /// The week would start on a day that does not exist.
    #[error("first day of week {index} is out of range (must be < {days})")]
    InvalidFirstDayOfWeek { index: usize, days: usize },

    /// Two eras share an id.
    #[error("duplicate era id: {0}")]
    DuplicateEraId(String),

    /// An era failed its own validation.
    #[error(transparent)]
    Era(#[from] EraError),

    /// The serialized configuration could not be decoded.
    #[error("invalid calendar configuration document: {0}")]
    Malformed(String),
}

/// Error returned when an era cannot be placed on the day-number line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EraError {
    /// One of the era's dates does not exist under the configuration.
    #[error("era {id}: date {date} cannot be converted to a day number")]
    Unconvertible { id: String, date: CalendarDate },

    /// The era ends before it starts.
    #[error("era {id}: start day {start} is after end day {end}")]
    Inverted {
        id: String,
        start: DayNumber,
        end: DayNumber,
    },
}

/// Error returned when a date is not valid under a configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DateError {
    /// Month index outside `0..month_count`.
    #[error("invalid month: {month} (must be < {months})")]
    InvalidMonth { month: usize, months: usize },

    /// Day outside `1..=days_in_month`.
    #[error("invalid day {day} for month {month} of year {year} (max {max_day})")]
    InvalidDay {
        year: i64,
        month: usize,
        day: u32,
        max_day: u32,
    },
}

/// Error returned by a [`CalendarStore`](crate::CalendarStore).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// No configuration is stored for the context.
    #[error("no calendar configuration stored for context {0}")]
    NotFound(String),

    /// The configuration offered for saving is invalid.
    #[error("rejected calendar configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),
}
