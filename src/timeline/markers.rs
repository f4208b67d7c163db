//! Axis markers: choosing a tick interval for the visible span and walking a
//! date cursor across the window.

use crate::consts::{MAX_MARKER_ITERATIONS, TARGET_MARKER_COUNT};
use crate::prelude::*;
use crate::{CalendarConfiguration, CalendarDate, DayNumber};

use super::window::VisibleWindow;

/// Distance between two consecutive markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum MarkerInterval {
    #[display(fmt = "{_0} year(s)")]
    Years(i64),
    #[display(fmt = "{_0} month(s)")]
    Months(i64),
    #[display(fmt = "{_0} day(s)")]
    Days(i64),
}

/// One axis tick.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub date:       CalendarDate,
    pub day_number: DayNumber,
    /// Position in percent of the track.
    pub percent:    f64,
    pub label:      String,
}

/// Snaps to 1, 2, 5 or 10 times a power of ten, never below 1.
fn nice_step(raw: f64) -> i64 {
    if !raw.is_finite() || raw <= 1.0 {
        return 1;
    }
    let magnitude = 10f64.powf(raw.log10().floor());
    let fraction = raw / magnitude;
    let nice = if fraction < 1.5 {
        1.0
    } else if fraction < 3.5 {
        2.0
    } else if fraction < 7.5 {
        5.0
    } else {
        10.0
    };
    ((nice * magnitude).round() as i64).max(1)
}

/// Picks the marker interval that puts roughly [`TARGET_MARKER_COUNT`] markers
/// across `span_days`.
///
/// Very wide spans use "nice" multi-year steps, then single years, then
/// 6/3/1-month steps, then 7/2/1-day steps.
pub fn choose_interval(span_days: f64, config: &CalendarConfiguration) -> MarkerInterval {
    let year = config.average_year_length().max(1.0);
    let month = year / config.month_count().max(1) as f64;
    let per_marker = span_days.max(0.0) / TARGET_MARKER_COUNT;

    if per_marker >= 1.5 * year {
        MarkerInterval::Years(nice_step(per_marker / year))
    } else if per_marker >= 0.5 * year {
        MarkerInterval::Years(1)
    } else if per_marker >= 0.75 * month {
        let months = per_marker / month;
        if months >= 4.5 {
            MarkerInterval::Months(6)
        } else if months >= 1.5 {
            MarkerInterval::Months(3)
        } else {
            MarkerInterval::Months(1)
        }
    } else if per_marker >= 4.0 {
        MarkerInterval::Days(7)
    } else if per_marker >= 1.5 {
        MarkerInterval::Days(2)
    } else {
        MarkerInterval::Days(1)
    }
}

/// First cursor at or before `start`, aligned to the interval.
fn first_cursor(
    start: &CalendarDate,
    start_day: DayNumber,
    interval: MarkerInterval,
    config: &CalendarConfiguration,
) -> Option<CalendarDate> {
    match interval {
        MarkerInterval::Years(step) => Some(CalendarDate::start_of_year(
            start.year.div_euclid(step) * step,
        )),
        MarkerInterval::Months(step) => {
            let step = usize::try_from(step).ok().filter(|&s| s > 0)?;
            Some(CalendarDate::start_of_month(start.year, start.month / step * step))
        }
        MarkerInterval::Days(step) => {
            config.day_number_to_date((start_day - 1).div_euclid(step) * step + 1)
        }
    }
}

fn advance(
    cursor: &CalendarDate,
    interval: MarkerInterval,
    config: &CalendarConfiguration,
) -> CalendarDate {
    match interval {
        MarkerInterval::Years(step) => {
            let months = i64::try_from(config.month_count()).unwrap_or(i64::MAX);
            config.add_months_to_date(cursor, step.saturating_mul(months))
        }
        MarkerInterval::Months(step) => config.add_months_to_date(cursor, step),
        MarkerInterval::Days(step) => config.add_days_to_date(cursor, step),
    }
}

fn label(date: &CalendarDate, interval: MarkerInterval, config: &CalendarConfiguration) -> String {
    match interval {
        MarkerInterval::Years(_) => date.year.to_string(),
        MarkerInterval::Months(_) => config.format_month_year(date.year, date.month),
        MarkerInterval::Days(_) => config.format_day_month(date),
    }
}

/// Markers inside `window`, left to right.
///
/// Stops after [`MAX_MARKER_ITERATIONS`] steps, or as soon as the cursor
/// fails to convert or stops moving forward.
pub fn generate_markers(window: VisibleWindow, config: &CalendarConfiguration) -> Vec<Marker> {
    let mut markers = Vec::new();
    if !window.start.is_finite() || !window.end.is_finite() {
        return markers;
    }

    let interval = choose_interval(window.span(), config);
    let Some(start) = config.day_number_to_date_f64(window.start.floor()) else {
        tracing::warn!(start = window.start, "window start has no date, no markers");
        return markers;
    };
    let start_day = window.start.floor() as DayNumber;
    let Some(mut cursor) = first_cursor(&start, start_day, interval, config) else {
        return markers;
    };
    tracing::debug!(%interval, span = window.span(), "generating timeline markers");

    for _ in 0..MAX_MARKER_ITERATIONS {
        let Some(day_number) = config.date_to_day_number(&cursor) else {
            tracing::warn!(date = %cursor, "marker cursor has no day number");
            return markers;
        };
        if day_number as f64 > window.end {
            return markers;
        }
        if day_number as f64 >= window.start {
            markers.push(Marker {
                date: cursor,
                day_number,
                percent: window.percent_of(day_number as f64),
                label: label(&cursor, interval, config),
            });
        }

        let next = advance(&cursor, interval, config);
        match config.date_to_day_number(&next) {
            Some(next_day) if next_day > day_number => cursor = next,
            _ => {
                tracing::warn!(date = %cursor, %interval, "marker cursor stopped advancing");
                return markers;
            }
        }
    }

    tracing::warn!(
        limit = MAX_MARKER_ITERATIONS,
        "marker generation hit its iteration limit"
    );
    markers
}
