//! Named date ranges attached to a calendar configuration.
//!
//! Eras are drawn as background bands behind the timeline, so the queries here
//! work on the day-number line: an era is placed by converting its two dates,
//! then compared against a visible window.

use serde::{Deserialize, Serialize};

use crate::error::EraError;
use crate::{CalendarConfiguration, CalendarDate, DayNumber};

/// A named, inclusive range of dates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Era {
    pub id:         String,
    pub name:       String,
    pub start_date: CalendarDate,
    pub end_date:   CalendarDate,
}

/// An era clipped to a visible window.
#[derive(Debug, Clone, PartialEq)]
pub struct EraOverlap<'a> {
    pub era: &'a Era,
    /// Day number where the era becomes visible.
    pub clipped_start_day: DayNumber,
    /// Day number where the era stops being visible.
    pub clipped_end_day: DayNumber,
    /// The era began before the window.
    pub extends_left: bool,
    /// The era continues past the window.
    pub extends_right: bool,
    /// Offset of the clipped band from the window's left edge, in percent.
    pub left_percent: f64,
    /// Width of the clipped band, in percent of the window.
    pub width_percent: f64,
}

impl Era {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        start_date: CalendarDate,
        end_date: CalendarDate,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            start_date,
            end_date,
        }
    }

    /// Places the era on the day-number line.
    ///
    /// # Errors
    /// Returns [`EraError::Unconvertible`] if either date does not convert and
    /// [`EraError::Inverted`] if the era ends before it starts.
    pub fn validate(
        &self,
        config: &CalendarConfiguration,
    ) -> Result<(DayNumber, DayNumber), EraError> {
        let convert = |date: &CalendarDate| {
            config
                .date_to_day_number(date)
                .ok_or_else(|| EraError::Unconvertible {
                    id:   self.id.clone(),
                    date: *date,
                })
        };
        let start = convert(&self.start_date)?;
        let end = convert(&self.end_date)?;
        if start > end {
            return Err(EraError::Inverted {
                id: self.id.clone(),
                start,
                end,
            });
        }
        Ok((start, end))
    }

    /// Inclusive day-number range, or `None` for a malformed era.
    pub fn day_range(&self, config: &CalendarConfiguration) -> Option<(DayNumber, DayNumber)> {
        self.validate(config).ok()
    }

    /// Whether `day` falls inside the era.
    pub fn contains_day(&self, day: DayNumber, config: &CalendarConfiguration) -> bool {
        self.day_range(config)
            .is_some_and(|(start, end)| start <= day && day <= end)
    }
}

/// Eras overlapping `[visible_start, visible_end]`, clipped to it, in
/// configuration order.
///
/// Eras that fail to convert or end before they start are skipped with a
/// warning.
pub fn find_overlapping(
    visible_start: DayNumber,
    visible_end: DayNumber,
    config: &CalendarConfiguration,
) -> Vec<EraOverlap<'_>> {
    let span = visible_end.saturating_sub(visible_start) as f64;
    let percent = |day: DayNumber| {
        if span > 0.0 {
            (day.saturating_sub(visible_start) as f64 / span) * 100.0
        } else {
            0.0
        }
    };

    config
        .eras
        .iter()
        .filter_map(|era| match era.validate(config) {
            Ok(range) => Some((era, range)),
            Err(err) => {
                tracing::warn!(era = %era.id, %err, "skipping era");
                None
            }
        })
        .filter(|&(_, (start, end))| !(end < visible_start || start > visible_end))
        .map(|(era, (start, end))| {
            let clipped_start_day = start.max(visible_start);
            let clipped_end_day = end.min(visible_end);
            let left_percent = percent(clipped_start_day);
            EraOverlap {
                era,
                clipped_start_day,
                clipped_end_day,
                extends_left: start < visible_start,
                extends_right: end > visible_end,
                left_percent,
                width_percent: percent(clipped_end_day) - left_percent,
            }
        })
        .collect()
}

/// Eras containing `day`, in configuration order.
pub fn eras_at(day: DayNumber, config: &CalendarConfiguration) -> Vec<&Era> {
    config
        .eras
        .iter()
        .filter(|era| era.contains_day(day, config))
        .collect()
}
