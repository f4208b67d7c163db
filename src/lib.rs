//! Calendar arithmetic for fictional worlds.
//!
//! A [`CalendarConfiguration`] describes a calendar's shape: month names and
//! lengths, a leap rule, a week, and a list of named eras. Every date under a
//! configuration maps to a signed [`DayNumber`], a single integer line used for
//! sorting, range queries and timeline geometry. Day number 1 is the first day
//! of year 1, day number 0 is the last day of year 0, and negative years
//! continue backwards from there.
//!
//! ```
//! use lore_calendar::{CalendarConfiguration, CalendarDate};
//!
//! let config = CalendarConfiguration::gregorian();
//! let leap_day = CalendarDate::new(2024, 1, 29);
//! let n = config.date_to_day_number(&leap_day).unwrap_or_default();
//! assert_eq!(config.day_number_to_date(n), Some(leap_day));
//! assert_eq!(
//!     config.date_to_day_number(&CalendarDate::new(2024, 2, 1)),
//!     Some(n + 1)
//! );
//! ```
//!
//! The [`timeline`] module lays events out on that line, [`era`] queries the
//! configured eras, and [`CalendarStore`] is the contract for the document
//! store that owns configurations and events.

mod arithmetic;
mod config;
mod consts;
pub mod era;
mod error;
mod format;
mod prelude;
mod store;
pub mod timeline;

pub use config::{CalendarConfiguration, LeapYearRule};
pub use consts::*;
pub use era::{Era, EraOverlap};
pub use error::{ConfigError, DateError, EraError, StoreError};
pub use store::{CalendarStore, EventFilter, MemoryStore};
pub use timeline::{TimelineEvent, VisibleWindow};

use crate::prelude::*;
use serde::{Deserialize, Serialize};

/// Position of a day on the linear day-number line of one configuration.
pub type DayNumber = i64;

/// A year, month and day under some calendar configuration.
///
/// `month` is a zero-based index into the configuration's months. Nothing here
/// guarantees the date exists: `day` may exceed the month's length and `month`
/// may be out of range until checked with
/// [`CalendarConfiguration::validate_date`] or clamped with
/// [`CalendarConfiguration::clamp_date`].
///
/// The derived ordering (year, then month, then day) is chronological under
/// every configuration.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, Display,
)]
#[display(fmt = "{year}-{month:02}-{day:02}")]
pub struct CalendarDate {
    pub year: i64,
    pub month: usize,
    pub day: u32,
}

impl CalendarDate {
    pub const fn new(year: i64, month: usize, day: u32) -> Self {
        Self { year, month, day }
    }

    /// First day of the first month of `year`.
    pub const fn start_of_year(year: i64) -> Self {
        Self::new(year, 0, 1)
    }

    /// First day of `month` in `year`.
    pub const fn start_of_month(year: i64, month: usize) -> Self {
        Self::new(year, month, 1)
    }

    /// Returns a copy with `day` replaced.
    pub const fn with_day(self, day: u32) -> Self {
        Self { day, ..self }
    }
}

impl From<(i64, usize, u32)> for CalendarDate {
    fn from((year, month, day): (i64, usize, u32)) -> Self {
        Self::new(year, month, day)
    }
}
