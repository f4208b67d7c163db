//! Conversions between calendar dates and day numbers.
//!
//! Year lengths are summed in closed form: every year has the same months
//! except for one leap-affected month, so the days spanned by a run of years is
//! `years * common_year_length + leap_years * 1`. This keeps conversions O(1) in
//! the year and O(months) within a year, for any sign of year.

use crate::config::{CalendarConfiguration, LeapYearRule};
use crate::consts::{
    CENTURY_CYCLE, DAY_NUMBER_LIMIT, EPOCH_YEAR, FALLBACK_DAYS_IN_MONTH, GREGORIAN_CYCLE,
    LEAP_YEAR_CYCLE, MAX_YEAR_SEARCH, STANDARD_LEAP_MONTH,
};
use crate::error::DateError;
use crate::{CalendarDate, DayNumber};

/// Gregorian leap test, valid for negative years and year 0.
pub const fn is_gregorian_leap_year(year: i64) -> bool {
    (year % LEAP_YEAR_CYCLE == 0 && year % CENTURY_CYCLE != 0) || (year % GREGORIAN_CYCLE == 0)
}

/// Multiples of `cycle` strictly below `year`, relative to an arbitrary origin.
/// Differences of two calls count the multiples in a half-open year range.
fn multiples_below(year: i128, cycle: i128) -> i128 {
    (year - 1).div_euclid(cycle)
}

fn clamp_day_number(raw: i128) -> DayNumber {
    let limit = i128::from(DAY_NUMBER_LIMIT);
    if raw > limit || raw < -limit {
        tracing::warn!(
            raw = %raw,
            limit = DAY_NUMBER_LIMIT,
            "day number accumulator out of range, clamping"
        );
    }
    // Within i64 after the clamp.
    raw.clamp(-limit, limit) as DayNumber
}

impl CalendarConfiguration {
    /// Whether `year` is a leap year under the configured rule.
    ///
    /// A custom rule with a zero interval never produces a leap year.
    pub fn is_leap_year(&self, year: i64) -> bool {
        match self.leap_year_rule {
            LeapYearRule::Standard => is_gregorian_leap_year(year),
            LeapYearRule::Custom => {
                self.leap_year_offset > 0 && year % i64::from(self.leap_year_offset) == 0
            }
            LeapYearRule::None => false,
        }
    }

    /// The month receiving the leap day, if the rule adds one to a month that
    /// exists.
    fn leap_month(&self) -> Option<usize> {
        let month = match self.leap_year_rule {
            LeapYearRule::Standard => STANDARD_LEAP_MONTH,
            LeapYearRule::Custom if self.leap_year_offset > 0 => self.leap_day_month_index,
            LeapYearRule::Custom | LeapYearRule::None => return None,
        };
        (month < self.month_count()).then_some(month)
    }

    /// Length of `month` in a non-leap year; out-of-range months get
    /// [`FALLBACK_DAYS_IN_MONTH`] and zero-length months count as one day.
    fn common_month_length(&self, month: usize) -> u32 {
        if month >= self.month_count() {
            return FALLBACK_DAYS_IN_MONTH;
        }
        self.days_per_month
            .get(month)
            .map_or(FALLBACK_DAYS_IN_MONTH, |&days| days.max(1))
    }

    /// Number of days in `month` of `year`.
    ///
    /// An out-of-range `month` returns [`FALLBACK_DAYS_IN_MONTH`] instead of
    /// failing, so partially loaded configurations still render. The result
    /// is always at least 1.
    pub fn days_in_month(&self, month: usize, year: i64) -> u32 {
        let days = self.common_month_length(month);
        if self.leap_month() == Some(month) && self.is_leap_year(year) {
            days.saturating_add(1)
        } else {
            days
        }
    }

    /// Days in a year without the leap day.
    fn common_year_length(&self) -> i128 {
        (0..self.month_count())
            .map(|month| i128::from(self.common_month_length(month)))
            .sum()
    }

    /// Number of days in `year`, all months summed.
    pub fn year_length(&self, year: i64) -> i64 {
        let leap = self.leap_month().is_some() && self.is_leap_year(year);
        clamp_day_number(self.common_year_length() + i128::from(leap))
    }

    /// Mean year length over a full leap cycle.
    pub fn average_year_length(&self) -> f64 {
        let common = self.common_year_length() as f64;
        if self.leap_month().is_none() {
            return common;
        }
        match self.leap_year_rule {
            LeapYearRule::Standard => common + 97.0 / 400.0,
            LeapYearRule::Custom => common + 1.0 / f64::from(self.leap_year_offset),
            LeapYearRule::None => common,
        }
    }

    /// Leap years in `from..to`.
    fn leap_years_between(&self, from: i128, to: i128) -> i128 {
        if self.leap_month().is_none() || to <= from {
            return 0;
        }
        let count = |cycle: i128| multiples_below(to, cycle) - multiples_below(from, cycle);
        match self.leap_year_rule {
            LeapYearRule::Standard => {
                count(LEAP_YEAR_CYCLE.into()) - count(CENTURY_CYCLE.into())
                    + count(GREGORIAN_CYCLE.into())
            }
            LeapYearRule::Custom => count(self.leap_year_offset.into()),
            LeapYearRule::None => 0,
        }
    }

    /// Total days in the years `from..to`.
    fn days_in_years(&self, from: i128, to: i128) -> i128 {
        if to <= from {
            return 0;
        }
        (to - from) * self.common_year_length() + self.leap_years_between(from, to)
    }

    /// Signed day offset of the first day of `year` from the epoch: the day
    /// number of `{year, 0, 1}` minus one. Unclamped.
    fn days_before_year(&self, year: i64) -> i128 {
        let year = i128::from(year);
        let epoch = i128::from(EPOCH_YEAR);
        if year >= epoch {
            self.days_in_years(epoch, year)
        } else {
            -self.days_in_years(year, epoch)
        }
    }

    /// Converts a date to its day number.
    ///
    /// Returns `None` when the month is out of range, the day is zero, or the
    /// configuration has no months. A day past the end of its month clamps to
    /// the month's last day. Results beyond [`DAY_NUMBER_LIMIT`] clamp to it.
    pub fn date_to_day_number(&self, date: &CalendarDate) -> Option<DayNumber> {
        if self.month_count() == 0 || date.month >= self.month_count() || date.day == 0 {
            return None;
        }

        let mut total = self.days_before_year(date.year);
        for month in 0..date.month {
            total += i128::from(self.days_in_month(month, date.year));
        }
        total += i128::from(date.day.min(self.days_in_month(date.month, date.year)));
        Some(clamp_day_number(total))
    }

    /// Converts a day number back to a date.
    ///
    /// Returns `None` for a configuration whose years have no length, or when
    /// the day falls outside [`MAX_YEAR_SEARCH`] years of the epoch.
    pub fn day_number_to_date(&self, day_number: DayNumber) -> Option<CalendarDate> {
        if self.month_count() == 0 || self.common_year_length() <= 0 {
            tracing::warn!(day_number, "calendar has zero-length years, cannot resolve date");
            return None;
        }

        let target = i128::from(day_number);
        let start_of = |year: i64| self.days_before_year(year) + 1;

        let (mut low, mut high) = (-MAX_YEAR_SEARCH, MAX_YEAR_SEARCH);
        if target < start_of(low) || target >= start_of(high + 1) {
            tracing::warn!(
                day_number,
                max_years = MAX_YEAR_SEARCH,
                "day number outside the searchable year range"
            );
            return None;
        }

        // Largest year whose first day is not after the target.
        while low < high {
            let mid = low + (high - low + 1) / 2;
            if start_of(mid) <= target {
                low = mid;
            } else {
                high = mid - 1;
            }
        }
        let year = low;

        let mut remaining = target - self.days_before_year(year);
        for month in 0..self.month_count() {
            let days = i128::from(self.days_in_month(month, year));
            if remaining <= days {
                // 1..=days, so it fits a u32.
                return Some(CalendarDate::new(year, month, remaining as u32));
            }
            remaining -= days;
        }

        tracing::warn!(day_number, year, "day number overran its year");
        None
    }

    /// Converts a fractional day position to the date of the nearest day.
    ///
    /// Returns `None` for NaN, infinities and anything beyond
    /// [`DAY_NUMBER_LIMIT`].
    pub fn day_number_to_date_f64(&self, day_number: f64) -> Option<CalendarDate> {
        if !day_number.is_finite() {
            return None;
        }
        let rounded = day_number.round();
        if rounded.abs() > DAY_NUMBER_LIMIT as f64 {
            return None;
        }
        self.day_number_to_date(rounded as DayNumber)
    }

    /// Day number of the first day of `year`.
    pub fn year_to_start_day_number(&self, year: i64) -> Option<DayNumber> {
        self.date_to_day_number(&CalendarDate::start_of_year(year))
    }

    /// Day number of the first day of `month` in `year`.
    pub fn month_to_start_day_number(&self, year: i64, month: usize) -> Option<DayNumber> {
        self.date_to_day_number(&CalendarDate::start_of_month(year, month))
    }

    /// Moves a date by whole months, carrying into years in either direction.
    ///
    /// The day is kept as is, even if the target month is shorter; use
    /// [`clamp_date`](Self::clamp_date) when a real date is needed. A
    /// configuration without months returns the date unchanged.
    pub fn add_months_to_date(&self, date: &CalendarDate, months: i64) -> CalendarDate {
        let count = self.month_count() as i128;
        if count == 0 {
            return *date;
        }
        let absolute = i128::from(date.year) * count + date.month as i128 + i128::from(months);
        let Ok(year) = i64::try_from(absolute.div_euclid(count)) else {
            return *date;
        };
        // rem_euclid is in 0..count.
        let month = absolute.rem_euclid(count) as usize;
        CalendarDate::new(year, month, date.day)
    }

    /// Moves a date by whole days through the day-number line.
    ///
    /// If either conversion fails the original date is returned unchanged.
    pub fn add_days_to_date(&self, date: &CalendarDate, days: i64) -> CalendarDate {
        self.date_to_day_number(date)
            .and_then(|n| n.checked_add(days))
            .and_then(|n| self.day_number_to_date(n))
            .unwrap_or(*date)
    }

    /// Checks that `date` names a real day.
    ///
    /// # Errors
    /// Returns [`DateError`] for an out-of-range month or day.
    pub fn validate_date(&self, date: &CalendarDate) -> Result<(), DateError> {
        if date.month >= self.month_count() {
            return Err(DateError::InvalidMonth {
                month:  date.month,
                months: self.month_count(),
            });
        }
        let max_day = self.days_in_month(date.month, date.year);
        if date.day == 0 || date.day > max_day {
            return Err(DateError::InvalidDay {
                year: date.year,
                month: date.month,
                day: date.day,
                max_day,
            });
        }
        Ok(())
    }

    /// Pulls `day` into `1..=days_in_month`. Returns `None` if the month does
    /// not exist.
    pub fn clamp_date(&self, date: &CalendarDate) -> Option<CalendarDate> {
        if date.month >= self.month_count() {
            return None;
        }
        let max_day = self.days_in_month(date.month, date.year);
        Some(date.with_day(date.day.clamp(1, max_day)))
    }
}
