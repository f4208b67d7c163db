//! Layout math for a pannable, zoomable horizontal timeline.
//!
//! Everything here works on the day-number line of one
//! [`CalendarConfiguration`]: events are normalized to inclusive day ranges,
//! packed into lanes, and projected into percentages of a [`VisibleWindow`].
//! Dates only come back out for marker labels.

mod lanes;
mod markers;
mod window;

pub use lanes::{LaidOutEvent, TimelineLayout, layout_events, layout_normalized};
pub use markers::{Marker, MarkerInterval, choose_interval, generate_markers};
pub use window::{PanDirection, TimelineBounds, VisibleWindow, zoom_focus};

use serde::{Deserialize, Serialize};

use crate::era::{self, EraOverlap};
use crate::{CalendarConfiguration, CalendarDate, DayNumber};

/// An event as stored by the wiki, read-only here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEvent {
    pub id:         String,
    pub title:      String,
    pub start_date: CalendarDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date:   Option<CalendarDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color:      Option<String>,
}

impl TimelineEvent {
    pub fn new(id: impl Into<String>, title: impl Into<String>, start_date: CalendarDate) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            start_date,
            end_date: None,
            color: None,
        }
    }

    #[must_use]
    pub fn ending(mut self, end_date: CalendarDate) -> Self {
        self.end_date = Some(end_date);
        self
    }

    #[must_use]
    pub fn colored(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}

/// An event placed on the day-number line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizedEvent<'a> {
    pub event:     &'a TimelineEvent,
    pub start_day: DayNumber,
    /// Never before `start_day`.
    pub end_day:   DayNumber,
}

/// Places every event on the day-number line, sorted by start day.
///
/// Events whose start date does not convert are dropped with a warning. A
/// missing, unconvertible or earlier end collapses to the start day. Events
/// with equal start days keep their input order.
pub fn normalize_events<'a>(
    events: &'a [TimelineEvent],
    config: &CalendarConfiguration,
) -> Vec<NormalizedEvent<'a>> {
    let mut normalized: Vec<_> = events
        .iter()
        .filter_map(|event| {
            let Some(start_day) = config.date_to_day_number(&event.start_date) else {
                tracing::warn!(
                    event = %event.id,
                    date = %event.start_date,
                    "dropping event with unconvertible start date"
                );
                return None;
            };
            let end_day = match event.end_date {
                None => start_day,
                Some(end) => config.date_to_day_number(&end).unwrap_or_else(|| {
                    tracing::warn!(
                        event = %event.id,
                        date = %end,
                        "unconvertible end date, treating event as a single day"
                    );
                    start_day
                }),
            };
            Some(NormalizedEvent {
                event,
                start_day,
                end_day: end_day.max(start_day),
            })
        })
        .collect();
    normalized.sort_by_key(|e| e.start_day);
    normalized
}

/// Pan and zoom state for one set of events under one configuration.
///
/// Events are normalized once; every interaction recomputes the window and
/// callers ask for a fresh layout afterwards.
#[derive(Debug, Clone)]
pub struct TimelineView<'a> {
    config: &'a CalendarConfiguration,
    events: Vec<NormalizedEvent<'a>>,
    bounds: Option<TimelineBounds>,
    window: VisibleWindow,
}

impl<'a> TimelineView<'a> {
    /// Starts with the window fitted to all events, or an empty `0..=0`
    /// window when there are none.
    pub fn new(events: &'a [TimelineEvent], config: &'a CalendarConfiguration) -> Self {
        let events = normalize_events(events, config);
        let bounds = TimelineBounds::from_events(&events);
        let window = bounds.map_or_else(|| VisibleWindow::new(0.0, 0.0), VisibleWindow::fit);
        Self {
            config,
            events,
            bounds,
            window,
        }
    }

    pub const fn window(&self) -> VisibleWindow {
        self.window
    }

    pub const fn bounds(&self) -> Option<TimelineBounds> {
        self.bounds
    }

    pub fn events(&self) -> &[NormalizedEvent<'a>] {
        &self.events
    }

    pub fn layout(&self) -> TimelineLayout<'a> {
        layout_normalized(&self.events, self.window)
    }

    pub fn markers(&self) -> Vec<Marker> {
        generate_markers(self.window, self.config)
    }

    /// Configured eras overlapping the visible window.
    ///
    /// Visibility, edge flags and percentages are measured against the exact
    /// window, as event bars are, so a band and a bar on the same day line up.
    pub fn eras(&self) -> Vec<EraOverlap<'a>> {
        let window = self.window;
        let (start, end) = window.day_range();
        era::find_overlapping(start, end, self.config)
            .into_iter()
            .filter_map(|overlap| {
                let (first, last) = overlap.era.day_range(self.config)?;
                let (first, last) = (first as f64, last as f64);
                if last < window.start || first > window.end {
                    return None;
                }
                let left_percent = window.percent_of(first.max(window.start));
                let right_percent = window.percent_of(last.min(window.end));
                Some(EraOverlap {
                    extends_left: first < window.start,
                    extends_right: last > window.end,
                    left_percent,
                    width_percent: right_percent - left_percent,
                    ..overlap
                })
            })
            .collect()
    }

    /// Pans by a pointer drag of `dx` pixels over a track `track_width` wide.
    pub fn drag(&mut self, dx: f64, track_width: f64) {
        if let Some(bounds) = self.bounds {
            self.window = self.window.pan_by_pixels(dx, track_width, bounds);
        }
    }

    /// Pans one key-press step.
    pub fn step(&mut self, direction: PanDirection) {
        if let Some(bounds) = self.bounds {
            self.window = self.window.pan_step(direction, bounds);
        }
    }

    /// Zooms by `factor` (below 1 zooms in) around the pointer at
    /// `pointer_fraction` of the track, favoring `hovered` if given.
    pub fn zoom(
        &mut self,
        factor: f64,
        pointer_fraction: f64,
        hovered: Option<&LaidOutEvent<'_>>,
    ) {
        if let Some(bounds) = self.bounds {
            let focal = zoom_focus(self.window, pointer_fraction, hovered);
            self.window = self.window.zoom(factor, focal, bounds);
        }
    }

    /// Shows every event again.
    pub fn reset(&mut self) {
        if let Some(bounds) = self.bounds {
            self.window = VisibleWindow::fit(bounds);
        }
    }
}
