//! The visible day range and its pan/zoom arithmetic.

use crate::DayNumber;
use crate::consts::{
    HOVER_FOCUS_WEIGHT, KEY_PAN_FRACTION, MIN_ZOOM_SPAN, ZOOM_IN_FACTOR, ZOOM_OUT_FACTOR,
};
use crate::prelude::*;

use super::NormalizedEvent;
use super::lanes::LaidOutEvent;

/// The day-number extent of all events; the window never leaves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[display(fmt = "{min}..={max}")]
pub struct TimelineBounds {
    pub min: DayNumber,
    /// Always greater than `min`.
    pub max: DayNumber,
}

impl TimelineBounds {
    /// Smallest range covering every event, widened to one day when all
    /// events share a single day. `None` without events.
    pub fn from_events(events: &[NormalizedEvent<'_>]) -> Option<Self> {
        let min = events.iter().map(|e| e.start_day).min()?;
        let max = events.iter().map(|e| e.end_day).max()?;
        Some(Self {
            min,
            max: max.max(min.saturating_add(1)),
        })
    }

    pub fn span(self) -> f64 {
        (self.max - self.min) as f64
    }
}

/// Direction of a key-press pan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanDirection {
    Left,
    Right,
}

/// The currently displayed `[start, end]` day range.
///
/// Positions are fractional so that drags and zooms move smoothly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibleWindow {
    pub start: f64,
    pub end:   f64,
}

impl VisibleWindow {
    /// A window between two day positions, in either order.
    pub fn new(a: f64, b: f64) -> Self {
        Self {
            start: a.min(b),
            end:   a.max(b),
        }
    }

    /// The window showing all of `bounds`.
    pub fn fit(bounds: TimelineBounds) -> Self {
        Self::new(bounds.min as f64, bounds.max as f64)
    }

    pub fn span(self) -> f64 {
        self.end - self.start
    }

    /// Whole days touched by the window.
    pub fn day_range(self) -> (DayNumber, DayNumber) {
        (self.start.floor() as DayNumber, self.end.ceil() as DayNumber)
    }

    /// Horizontal position of `day`, in percent of the track. A window with
    /// no width places everything at 0.
    pub fn percent_of(self, day: f64) -> f64 {
        let span = self.span();
        if span > 0.0 && span.is_finite() {
            (day - self.start) / span * 100.0
        } else {
            0.0
        }
    }

    /// Day position at `fraction` (0 = left edge, 1 = right edge).
    pub fn day_at(self, fraction: f64) -> f64 {
        self.start + fraction * self.span()
    }

    /// Moves the window so it lies inside `bounds`, keeping its span. A window
    /// wider than the bounds is centred on them.
    #[must_use]
    pub fn clamp_to(self, bounds: TimelineBounds) -> Self {
        let span = self.span();
        let (min, max) = (bounds.min as f64, bounds.max as f64);
        if span >= max - min {
            let start = (min + max) / 2.0 - span / 2.0;
            return Self {
                start,
                end: start + span,
            };
        }
        let start = self.start.clamp(min, max - span);
        Self {
            start,
            end: start + span,
        }
    }

    /// Shifts the window by `fraction` of its span (positive moves right).
    #[must_use]
    pub fn pan(self, fraction: f64, bounds: TimelineBounds) -> Self {
        if !fraction.is_finite() {
            return self;
        }
        let delta = fraction * self.span();
        Self {
            start: self.start + delta,
            end:   self.end + delta,
        }
        .clamp_to(bounds)
    }

    /// Pans for a pointer drag. Dragging right by `dx` pixels reveals earlier
    /// days.
    #[must_use]
    pub fn pan_by_pixels(self, dx: f64, track_width: f64, bounds: TimelineBounds) -> Self {
        if track_width <= 0.0 || !track_width.is_finite() {
            return self;
        }
        self.pan(-dx / track_width, bounds)
    }

    /// Pans one key-press step.
    #[must_use]
    pub fn pan_step(self, direction: PanDirection, bounds: TimelineBounds) -> Self {
        let fraction = match direction {
            PanDirection::Left => -KEY_PAN_FRACTION,
            PanDirection::Right => KEY_PAN_FRACTION,
        };
        self.pan(fraction, bounds)
    }

    /// Rescales the span by `factor` around `focal_day`, which keeps its
    /// relative position on screen.
    ///
    /// The new span is kept within `[MIN_ZOOM_SPAN, bounds.span()]` and the
    /// result is clamped to `bounds`.
    #[must_use]
    pub fn zoom(self, factor: f64, focal_day: f64, bounds: TimelineBounds) -> Self {
        if !factor.is_finite() || factor <= 0.0 || !focal_day.is_finite() {
            return self;
        }
        let span = self.span();
        let max_span = bounds.span().max(MIN_ZOOM_SPAN);
        let new_span = (span * factor).clamp(MIN_ZOOM_SPAN, max_span);

        let ratio = if span > 0.0 {
            ((focal_day - self.start) / span).clamp(0.0, 1.0)
        } else {
            0.5
        };
        let start = focal_day - ratio * new_span;
        Self {
            start,
            end: start + new_span,
        }
        .clamp_to(bounds)
    }

    #[must_use]
    pub fn zoom_in(self, focal_day: f64, bounds: TimelineBounds) -> Self {
        self.zoom(ZOOM_IN_FACTOR, focal_day, bounds)
    }

    #[must_use]
    pub fn zoom_out(self, focal_day: f64, bounds: TimelineBounds) -> Self {
        self.zoom(ZOOM_OUT_FACTOR, focal_day, bounds)
    }
}

/// Day to zoom around for a pointer at `pointer_fraction` of the track.
///
/// When the pointer is over an event, the focus is pulled towards the
/// event's midpoint so it stays on screen as the span shrinks.
pub fn zoom_focus(
    window: VisibleWindow,
    pointer_fraction: f64,
    hovered: Option<&LaidOutEvent<'_>>,
) -> f64 {
    let fraction = if pointer_fraction.is_finite() {
        pointer_fraction.clamp(0.0, 1.0)
    } else {
        0.5
    };
    let pointer_day = window.day_at(fraction);
    hovered.map_or(pointer_day, |event| {
        let midpoint = (event.start_day as f64 + event.end_day as f64) / 2.0;
        pointer_day + (midpoint - pointer_day) * HOVER_FOCUS_WEIGHT
    })
}
