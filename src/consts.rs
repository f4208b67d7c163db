/// Days reported for a month index that does not exist in the configuration.
/// Keeps callers working while a configuration is still loading.
pub const FALLBACK_DAYS_IN_MONTH: u32 = 30;

/// Largest day-number magnitude the accumulators produce (2^52, half of the
/// 53-bit exactly-representable range of an `f64`). Results beyond it clamp.
pub const DAY_NUMBER_LIMIT: i64 = 1 << 52;

/// Years searched on either side of the epoch when resolving a day number.
pub const MAX_YEAR_SEARCH: i64 = 100_000;

/// First year of the positive era; day number 1 is its first day.
pub const EPOCH_YEAR: i64 = 1;

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: i64 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: i64 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: i64 = 400;

/// Month that receives the leap day under the standard rule.
pub const STANDARD_LEAP_MONTH: usize = 1;

/// Minimum gap, in percent of track width, between two events sharing a lane.
pub const LANE_SEPARATION_PERCENT: f64 = 3.5;

/// Narrowest on-screen width of an event bar, in percent of track width.
pub const MIN_EVENT_WIDTH_PERCENT: f64 = 5.0;

/// Number of axis markers the interval selection aims for.
pub const TARGET_MARKER_COUNT: f64 = 15.0;

/// Hard cap on markers generated for one window.
pub const MAX_MARKER_ITERATIONS: usize = 500;

/// Smallest visible span, in days, reachable by zooming in.
pub const MIN_ZOOM_SPAN: f64 = 10.0;

/// Span multiplier applied by one zoom-in step.
pub const ZOOM_IN_FACTOR: f64 = 0.8;

/// Span multiplier applied by one zoom-out step.
pub const ZOOM_OUT_FACTOR: f64 = 1.25;

/// Fraction of the visible span moved by one key-press pan.
pub const KEY_PAN_FRACTION: f64 = 0.1;

/// Weight given to a hovered event's midpoint when picking a zoom focus.
pub const HOVER_FOCUS_WEIGHT: f64 = 0.7;
