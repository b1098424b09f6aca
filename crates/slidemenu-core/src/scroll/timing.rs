//! Time calculation utilities for settle animations
//!
//! The current time is always passed in so that a run is a pure function of
//! elapsed time.

use std::time::{Duration, Instant};

/// Calculate animation progress (0.0 to 1.0) at `now`
///
/// A zero duration is complete immediately. A `now` earlier than `start`
/// counts as no progress.
#[inline]
pub fn progress(start: Instant, duration: Duration, now: Instant) -> f64 {
    if duration.is_zero() {
        return 1.0;
    }
    let elapsed = now.saturating_duration_since(start);
    let ratio = elapsed.as_secs_f64() / duration.as_secs_f64();
    ratio.clamp(0.0, 1.0)
}

/// Check if an animation is complete at `now`
#[inline]
pub fn is_complete(start: Instant, duration: Duration, now: Instant) -> bool {
    now.saturating_duration_since(start) >= duration
}

/// Linear interpolation between two values
#[inline]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

/// Linear interpolation for scroll offsets, rounded to the nearest unit
#[inline]
pub fn lerp_i32(from: i32, to: i32, t: f64) -> i32 {
    lerp(from as f64, to as f64, t).round() as i32
}
