//! Display labels and week layout for calendar dates.

use crate::{CalendarConfiguration, CalendarDate, DayNumber};

impl CalendarConfiguration {
    /// Name of `month`, or `"Month N"` (one-based) when it has none.
    pub fn month_name(&self, month: usize) -> String {
        self.month_names
            .get(month)
            .filter(|name| !name.trim().is_empty())
            .cloned()
            .unwrap_or_else(|| format!("Month {}", month.saturating_add(1)))
    }

    /// Full label, e.g. `"3 Hammer, 1372"`.
    pub fn format_date(&self, date: &CalendarDate) -> String {
        format!("{} {}, {}", date.day, self.month_name(date.month), date.year)
    }

    /// Month label, e.g. `"Hammer 1372"`.
    pub fn format_month_year(&self, year: i64, month: usize) -> String {
        format!("{} {year}", self.month_name(month))
    }

    /// Day label without the year, e.g. `"3 Hammer"`.
    pub fn format_day_month(&self, date: &CalendarDate) -> String {
        format!("{} {}", date.day, self.month_name(date.month))
    }

    /// Index into `day_names` of the weekday `day_number` falls on.
    ///
    /// Day number 1 is the first day name; weeks run on without breaks across
    /// years and into negative years.
    pub fn weekday_of_day_number(&self, day_number: DayNumber) -> Option<usize> {
        let week = i64::try_from(self.days_per_week()).ok().filter(|&n| n > 0)?;
        // rem_euclid is in 0..week.
        Some((day_number - 1).rem_euclid(week) as usize)
    }

    /// Index into `day_names` of the weekday `date` falls on.
    pub fn weekday_index(&self, date: &CalendarDate) -> Option<usize> {
        self.weekday_of_day_number(self.date_to_day_number(date)?)
    }

    /// Name of the weekday `date` falls on.
    pub fn weekday_name(&self, date: &CalendarDate) -> Option<&str> {
        let index = self.weekday_index(date)?;
        self.day_names.get(index).map(String::as_str)
    }

    /// Day names in display order, starting at `first_day_of_week`.
    pub fn week_header(&self) -> Vec<&str> {
        let days = self.days_per_week();
        if days == 0 {
            return Vec::new();
        }
        (0..days)
            .map(|i| self.day_names[(self.first_day_of_week % days + i) % days].as_str())
            .collect()
    }

    /// Empty cells before the first day of `month` in a week grid that starts
    /// at `first_day_of_week`.
    pub fn leading_blank_days(&self, year: i64, month: usize) -> Option<usize> {
        let days = self.days_per_week();
        let first = self.weekday_index(&CalendarDate::start_of_month(year, month))?;
        Some((first + days - self.first_day_of_week % days) % days)
    }
}
