//! Greedy lane packing of events inside a visible window.

use crate::consts::{LANE_SEPARATION_PERCENT, MIN_EVENT_WIDTH_PERCENT};
use crate::{CalendarConfiguration, DayNumber};

use super::window::VisibleWindow;
use super::{NormalizedEvent, TimelineEvent, normalize_events};

/// An event with its lane and on-screen extent.
#[derive(Debug, Clone, PartialEq)]
pub struct LaidOutEvent<'a> {
    pub event:         &'a TimelineEvent,
    pub start_day:     DayNumber,
    pub end_day:       DayNumber,
    pub lane:          usize,
    /// Left edge, in percent of the track.
    pub left_percent:  f64,
    /// At least [`MIN_EVENT_WIDTH_PERCENT`].
    pub width_percent: f64,
    /// The event starts before the window.
    pub extends_left:  bool,
    /// The event ends after the window.
    pub extends_right: bool,
}

impl LaidOutEvent<'_> {
    pub fn right_percent(&self) -> f64 {
        self.left_percent + self.width_percent
    }
}

/// Events packed into lanes for one window.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineLayout<'a> {
    /// Visible events in start order.
    pub events:      Vec<LaidOutEvent<'a>>,
    /// Lanes needed to draw `events`; at least 1.
    pub total_lanes: usize,
}

/// Normalizes `events` and lays out the ones visible in `window`.
pub fn layout_events<'a>(
    events: &'a [TimelineEvent],
    window: VisibleWindow,
    config: &CalendarConfiguration,
) -> TimelineLayout<'a> {
    layout_normalized(&normalize_events(events, config), window)
}

/// Lays out already normalized events, which must be sorted by start day.
///
/// Events entirely outside the window are left out. The rest are clipped to
/// the window edges, widened to [`MIN_EVENT_WIDTH_PERCENT`], and placed in
/// the first lane whose last event ends at least
/// [`LANE_SEPARATION_PERCENT`] before them; a new lane opens when none does.
pub fn layout_normalized<'a>(
    events: &[NormalizedEvent<'a>],
    window: VisibleWindow,
) -> TimelineLayout<'a> {
    let mut lane_ends: Vec<f64> = Vec::new();
    let mut laid_out = Vec::with_capacity(events.len());

    for normalized in events {
        let (start, end) = (normalized.start_day as f64, normalized.end_day as f64);
        if end < window.start || start > window.end {
            continue;
        }

        let left = window.percent_of(start.max(window.start));
        let right = window.percent_of(end.min(window.end));
        let width_percent = (right - left).max(MIN_EVENT_WIDTH_PERCENT);
        let left_percent = if left + width_percent > 100.0 {
            (100.0 - width_percent).max(0.0)
        } else {
            left
        };
        let right_edge = left_percent + width_percent;

        let lane = match lane_ends
            .iter()
            .position(|&lane_end| lane_end < left_percent - LANE_SEPARATION_PERCENT)
        {
            Some(lane) => {
                lane_ends[lane] = right_edge;
                lane
            }
            None => {
                lane_ends.push(right_edge);
                lane_ends.len() - 1
            }
        };

        laid_out.push(LaidOutEvent {
            event: normalized.event,
            start_day: normalized.start_day,
            end_day: normalized.end_day,
            lane,
            left_percent,
            width_percent,
            extends_left: start < window.start,
            extends_right: end > window.end,
        });
    }

    let total_lanes = lane_ends.len().max(1);
    tracing::debug!(
        events = laid_out.len(),
        hidden = events.len() - laid_out.len(),
        total_lanes,
        "timeline layout computed"
    );
    TimelineLayout {
        events: laid_out,
        total_lanes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CalendarDate;

    fn event(id: &str) -> TimelineEvent {
        TimelineEvent::new(id, id, CalendarDate::new(1, 0, 1))
    }

    fn normalized(
        event: &TimelineEvent,
        start_day: DayNumber,
        end_day: DayNumber,
    ) -> NormalizedEvent<'_> {
        NormalizedEvent {
            event,
            start_day,
            end_day,
        }
    }

    fn lanes(layout: &TimelineLayout<'_>) -> Vec<(String, usize)> {
        layout
            .events
            .iter()
            .map(|e| (e.event.id.clone(), e.lane))
            .collect()
    }

    #[test]
    fn test_overlapping_events_get_separate_lanes() {
        let (a, b, c) = (event("a"), event("b"), event("c"));
        let events = [normalized(&a, 1, 10), normalized(&b, 5, 15), normalized(&c, 20, 25)];
        let layout = layout_normalized(&events, VisibleWindow::new(0.0, 100.0));
        assert_eq!(
            lanes(&layout),
            vec![("a".to_owned(), 0), ("b".to_owned(), 1), ("c".to_owned(), 0)]
        );
        assert_eq!(layout.total_lanes, 2);
    }

    #[test]
    fn test_separation_is_required() {
        let (a, b) = (event("a"), event("b"));
        // b starts 2% after a ends, closer than the separation.
        let events = [normalized(&a, 0, 10), normalized(&b, 12, 20)];
        let layout = layout_normalized(&events, VisibleWindow::new(0.0, 100.0));
        assert_eq!(layout.events[1].lane, 1);

        let events = [normalized(&a, 0, 10), normalized(&b, 14, 20)];
        let layout = layout_normalized(&events, VisibleWindow::new(0.0, 100.0));
        assert_eq!(layout.events[1].lane, 0);
    }

    #[test]
    fn test_first_free_lane_is_reused() {
        let events: Vec<_> = ["a", "b", "c", "d"].into_iter().map(event).collect();
        let ranges = [(0, 50), (0, 10), (0, 30), (20, 25)];
        let normalized: Vec<_> = events
            .iter()
            .zip(ranges)
            .map(|(e, (s, t))| normalized(e, s, t))
            .collect();
        let layout = layout_normalized(&normalized, VisibleWindow::new(0.0, 100.0));
        // Lane 1 (ending at 10) is the first with room for d at 20.
        assert_eq!(layout.events[3].lane, 1);
        assert_eq!(layout.total_lanes, 3);
    }

    #[test]
    fn test_clipping_and_flags() {
        let (a, b, c, d) = (event("a"), event("b"), event("c"), event("d"));
        let events = [
            normalized(&a, -50, 20),
            normalized(&b, 40, 60),
            normalized(&c, 90, 400),
            normalized(&d, 500, 600),
        ];
        let layout = layout_normalized(&events, VisibleWindow::new(0.0, 100.0));
        assert_eq!(layout.events.len(), 3);

        let first = &layout.events[0];
        assert!(first.extends_left && !first.extends_right);
        assert!((first.left_percent - 0.0).abs() < 1e-9);
        assert!((first.width_percent - 20.0).abs() < 1e-9);

        let middle = &layout.events[1];
        assert!(!middle.extends_left && !middle.extends_right);

        let last = &layout.events[2];
        assert!(last.extends_right);
        assert!((last.left_percent - 90.0).abs() < 1e-9);
        assert!((last.right_percent() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_thin_events_get_minimum_width() {
        let (a, b) = (event("a"), event("b"));
        let events = [normalized(&a, 50, 50), normalized(&b, 100, 100)];
        let layout = layout_normalized(&events, VisibleWindow::new(0.0, 100.0));
        assert!((layout.events[0].width_percent - MIN_EVENT_WIDTH_PERCENT).abs() < 1e-9);
        // Pulled back inside the track rather than overflowing it.
        assert!((layout.events[1].right_percent() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_and_zero_span() {
        let layout = layout_normalized(&[], VisibleWindow::new(0.0, 100.0));
        assert!(layout.events.is_empty());
        assert_eq!(layout.total_lanes, 1);

        let a = event("a");
        let layout = layout_normalized(&[normalized(&a, 5, 5)], VisibleWindow::new(5.0, 5.0));
        assert_eq!(layout.events.len(), 1);
        assert_eq!(layout.events[0].left_percent, 0.0);
        assert!(layout.events[0].width_percent.is_finite());
    }

    #[test]
    fn test_layout_events_from_dates() {
        let config = CalendarConfiguration::gregorian();
        let events = vec![
            TimelineEvent::new("a", "A", CalendarDate::new(1, 0, 1))
                .ending(CalendarDate::new(1, 0, 10)),
            TimelineEvent::new("broken", "Broken", CalendarDate::new(1, 99, 1)),
            TimelineEvent::new("b", "B", CalendarDate::new(1, 0, 5))
                .ending(CalendarDate::new(1, 0, 15)),
        ];
        let layout = layout_events(&events, VisibleWindow::new(0.0, 100.0), &config);
        assert_eq!(
            lanes(&layout),
            vec![("a".to_owned(), 0), ("b".to_owned(), 1)]
        );
    }
}
