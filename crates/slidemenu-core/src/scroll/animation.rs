//! Settle animation controller
//!
//! Combines easing functions and timing utilities. The host drives it: every
//! frame callback calls `advance(now)` and applies the returned offset.

use std::time::{Duration, Instant};

use tracing::trace;

use super::easing::{EasingType, EasingTypeExt};
use super::timing::{is_complete, lerp_i32, progress};

/// One timed interpolation from `start_offset` to `start_offset + delta`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationRun {
    pub start_offset: i32,
    pub delta: i32,
    pub start_time: Instant,
    pub duration: Duration,
    pub easing: EasingType,
}

impl AnimationRun {
    /// Offset the run settles on
    #[inline]
    pub fn final_offset(&self) -> i32 {
        self.start_offset.saturating_add(self.delta)
    }

    /// Interpolated offset at `now`
    pub fn offset_at(&self, now: Instant) -> i32 {
        if is_complete(self.start_time, self.duration, now) {
            return self.final_offset();
        }
        let t = self.easing.apply(progress(self.start_time, self.duration, now));
        lerp_i32(self.start_offset, self.final_offset(), t)
    }
}

/// Scroll animation controller
///
/// Holds at most one run. `start()` preempts whatever is in flight; there is no
/// cancel-and-idle operation.
#[derive(Debug, Clone, Default)]
pub struct ScrollAnimator {
    run: Option<AnimationRun>,
    easing: EasingType,
}

impl ScrollAnimator {
    /// Create an animator using the given easing for every run
    pub fn new(easing: EasingType) -> Self {
        Self { run: None, easing }
    }

    /// Check if a run is in flight
    #[inline]
    pub fn is_animating(&self) -> bool {
        self.run.is_some()
    }

    /// The in-flight run, if any
    pub fn run(&self) -> Option<&AnimationRun> {
        self.run.as_ref()
    }

    /// Offset the in-flight run settles on
    pub fn target(&self) -> Option<i32> {
        self.run.as_ref().map(AnimationRun::final_offset)
    }

    /// Begin a run from `from` to `to`, discarding any unfinished run
    ///
    /// A run with `from == to` is still created; it completes on the first
    /// frame at or after `duration`.
    pub fn start(&mut self, from: i32, to: i32, duration: Duration, now: Instant) {
        let run = AnimationRun {
            start_offset: from,
            delta: to.saturating_sub(from),
            start_time: now,
            duration,
            easing: self.easing,
        };
        trace!(from, to, ?duration, "starting settle run");
        self.run = Some(run);
    }

    /// Advance the run to `now`
    ///
    /// Returns the offset to apply while the run is unfinished, including the
    /// exact final offset on the frame that completes it. Returns `None` once
    /// no run remains.
    pub fn advance(&mut self, now: Instant) -> Option<i32> {
        let run = self.run?;
        if is_complete(run.start_time, run.duration, now) {
            self.run = None;
            return Some(run.final_offset());
        }
        Some(run.offset_at(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_idle_animator_yields_nothing() {
        let mut animator = ScrollAnimator::default();
        assert!(!animator.is_animating());
        assert_eq!(animator.advance(Instant::now()), None);
    }

    #[test]
    fn test_linear_run_interpolates_and_finishes() {
        let mut animator = ScrollAnimator::new(EasingType::Linear);
        let start = Instant::now();
        animator.start(0, 300, ms(500), start);
        assert_eq!(animator.target(), Some(300));

        assert_eq!(animator.advance(start), Some(0));
        assert_eq!(animator.advance(start + ms(250)), Some(150));
        assert_eq!(animator.advance(start + ms(500)), Some(300));
        assert!(!animator.is_animating());
        assert_eq!(animator.advance(start + ms(516)), None);
    }

    #[test]
    fn test_closing_run_moves_toward_zero() {
        let mut animator = ScrollAnimator::new(EasingType::Linear);
        let start = Instant::now();
        animator.start(200, 0, ms(400), start);
        assert_eq!(animator.run().map(|r| r.delta), Some(-200));
        assert_eq!(animator.advance(start + ms(100)), Some(150));
        assert_eq!(animator.advance(start + ms(1000)), Some(0));
    }

    #[test]
    fn test_start_preempts_unfinished_run() {
        let mut animator = ScrollAnimator::new(EasingType::Linear);
        let start = Instant::now();
        animator.start(0, 300, ms(500), start);
        let mid = animator.advance(start + ms(250)).unwrap();

        animator.start(mid, 0, ms(500), start + ms(250));
        assert_eq!(animator.target(), Some(0));
        assert_eq!(animator.advance(start + ms(750)), Some(0));
        assert_eq!(animator.advance(start + ms(800)), None);
    }

    #[test]
    fn test_zero_delta_run_completes() {
        let mut animator = ScrollAnimator::default();
        let start = Instant::now();
        animator.start(0, 0, ms(500), start);
        assert!(animator.is_animating());
        assert_eq!(animator.advance(start + ms(10)), Some(0));
        assert_eq!(animator.advance(start + ms(500)), Some(0));
        assert!(!animator.is_animating());
    }

    #[test]
    fn test_zero_duration_completes_on_first_frame() {
        let mut animator = ScrollAnimator::default();
        let start = Instant::now();
        animator.start(40, 300, Duration::ZERO, start);
        assert_eq!(animator.advance(start), Some(300));
        assert_eq!(animator.advance(start), None);
    }

    #[test]
    fn test_run_is_deterministic_in_elapsed_time() {
        let start = Instant::now();
        let run = AnimationRun {
            start_offset: 0,
            delta: 300,
            start_time: start,
            duration: ms(500),
            easing: EasingType::Viscous,
        };
        let a = run.offset_at(start + ms(123));
        let b = run.offset_at(start + ms(123));
        assert_eq!(a, b);
        assert!(a > 0 && a < 300);
    }
}
