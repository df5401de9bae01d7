//! Conversion between elapsed time and scrub units
//!
//! The position slider of a front-end works in integer ticks; the session
//! works in elapsed time within the loaded bag. [`TimelineMapper`] is the
//! pure conversion between the two, parameterized by the slider's tick
//! range. Both directions are total: a zero-duration bag pins the scrub
//! position to the range minimum instead of dividing by zero, and the
//! elapsed result is always clamped into `[0, duration]`.

use std::time::Duration;

/// Inclusive integer tick range of a scrub control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrubRange {
    /// Tick value at the start of the bag
    pub min: i64,
    /// Tick value at the end of the bag
    pub max: i64,
}

impl Default for ScrubRange {
    fn default() -> Self {
        Self { min: 0, max: 100 }
    }
}

impl ScrubRange {
    /// Create a range; `max` below `min` is treated as an empty span
    pub fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    /// Number of ticks between the endpoints
    pub fn span(&self) -> i64 {
        (self.max - self.min).max(0)
    }

    /// Clamp a tick value into the range
    pub fn clamp(&self, value: i64) -> i64 {
        value.clamp(self.min, self.min + self.span())
    }
}

/// Pure conversion between elapsed time and scrub ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimelineMapper {
    range: ScrubRange,
}

impl TimelineMapper {
    /// Create a mapper over the given tick range
    pub fn new(range: ScrubRange) -> Self {
        Self { range }
    }

    /// The tick range this mapper converts into
    pub fn range(&self) -> ScrubRange {
        self.range
    }

    /// Convert elapsed time within a bag of `duration` to a tick value
    ///
    /// The result is quantized round-half-up to whole ticks. A zero
    /// `duration` maps everything to the range minimum.
    pub fn to_scrub(&self, elapsed: Duration, duration: Duration) -> i64 {
        if duration.is_zero() {
            return self.range.min;
        }

        let fraction = (elapsed.as_secs_f64() / duration.as_secs_f64()).clamp(0.0, 1.0);
        let raw = self.range.min as f64 + self.range.span() as f64 * fraction;
        self.range.clamp((raw + 0.5).floor() as i64)
    }

    /// Convert a tick value back to elapsed time, clamped into `[0, duration]`
    ///
    /// The elapsed result keeps full floating-point precision; only the
    /// tick side of the mapping is quantized.
    pub fn to_elapsed(&self, value: i64, duration: Duration) -> Duration {
        let span = self.range.span();
        if span == 0 {
            return Duration::ZERO;
        }

        let fraction = ((value - self.range.min) as f64 / span as f64).clamp(0.0, 1.0);
        Duration::from_secs_f64(duration.as_secs_f64() * fraction)
    }
}
