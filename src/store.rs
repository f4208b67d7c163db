//! The document store the calendar core is fed from.
//!
//! The core does no I/O. Applications implement [`CalendarStore`] over their
//! database; [`MemoryStore`] keeps everything in process.

use std::collections::HashMap;

use crate::error::StoreError;
use crate::timeline::{TimelineEvent, normalize_events};
use crate::{CalendarConfiguration, DayNumber};

/// Which events to list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventFilter {
    /// Case-insensitive substring of the title.
    pub title_contains: Option<String>,
    /// Inclusive day-number window the event must overlap.
    pub between: Option<(DayNumber, DayNumber)>,
}

impl EventFilter {
    #[must_use]
    pub fn title(mut self, needle: impl Into<String>) -> Self {
        self.title_contains = Some(needle.into());
        self
    }

    #[must_use]
    pub const fn between(mut self, start: DayNumber, end: DayNumber) -> Self {
        self.between = Some((start, end));
        self
    }

    /// Whether `event` passes the filter. Events whose dates do not convert
    /// never match a day-number window.
    pub fn matches(&self, event: &TimelineEvent, config: &CalendarConfiguration) -> bool {
        let title_matches = self
            .title_contains
            .as_ref()
            .is_none_or(|needle| event.title.to_lowercase().contains(&needle.to_lowercase()));
        if !title_matches {
            return false;
        }
        let Some((start, end)) = self.between else {
            return true;
        };
        normalize_events(std::slice::from_ref(event), config)
            .first()
            .is_some_and(|e| !(e.end_day < start || e.start_day > end))
    }
}

/// Storage for per-context calendar configurations and events.
pub trait CalendarStore {
    /// Loads the configuration of `context_id`.
    ///
    /// # Errors
    /// Returns [`StoreError::NotFound`] if none has been saved.
    fn get_calendar_configuration(
        &self,
        context_id: &str,
    ) -> Result<CalendarConfiguration, StoreError>;

    /// Replaces the configuration of `context_id` as a whole.
    ///
    /// # Errors
    /// Returns [`StoreError::InvalidConfiguration`] if `config` is invalid;
    /// the stored configuration is left untouched.
    fn save_calendar_configuration(
        &mut self,
        context_id: &str,
        config: CalendarConfiguration,
    ) -> Result<(), StoreError>;

    /// Events of `context_id` passing `filter`, in storage order.
    ///
    /// # Errors
    /// Implementations return a [`StoreError`] if the events cannot be read.
    fn list_events(
        &self,
        context_id: &str,
        filter: &EventFilter,
    ) -> Result<Vec<TimelineEvent>, StoreError>;
}

/// A [`CalendarStore`] held in memory. Last write wins.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    configurations: HashMap<String, CalendarConfiguration>,
    events:         HashMap<String, Vec<TimelineEvent>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `event`, replacing any event with the same id.
    pub fn put_event(&mut self, context_id: &str, event: TimelineEvent) {
        let events = self.events.entry(context_id.to_owned()).or_default();
        match events.iter_mut().find(|e| e.id == event.id) {
            Some(existing) => *existing = event,
            None => events.push(event),
        }
    }

    /// Removes the event with `id`, returning it if it existed.
    pub fn delete_event(&mut self, context_id: &str, id: &str) -> Option<TimelineEvent> {
        let events = self.events.get_mut(context_id)?;
        let index = events.iter().position(|e| e.id == id)?;
        Some(events.remove(index))
    }
}

impl CalendarStore for MemoryStore {
    fn get_calendar_configuration(
        &self,
        context_id: &str,
    ) -> Result<CalendarConfiguration, StoreError> {
        self.configurations
            .get(context_id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(context_id.to_owned()))
    }

    fn save_calendar_configuration(
        &mut self,
        context_id: &str,
        config: CalendarConfiguration,
    ) -> Result<(), StoreError> {
        config.validate()?;
        tracing::info!(
            context = context_id,
            months = config.month_count(),
            "saving calendar configuration"
        );
        self.configurations.insert(context_id.to_owned(), config);
        Ok(())
    }

    fn list_events(
        &self,
        context_id: &str,
        filter: &EventFilter,
    ) -> Result<Vec<TimelineEvent>, StoreError> {
        let Some(events) = self.events.get(context_id) else {
            return Ok(Vec::new());
        };
        let config = self
            .configurations
            .get(context_id)
            .cloned()
            .unwrap_or_default();
        Ok(events
            .iter()
            .filter(|event| filter.matches(event, &config))
            .cloned()
            .collect())
    }
}
