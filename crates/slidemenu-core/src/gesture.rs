//! Pointer samples and horizontal gesture classification

use std::time::Instant;

use serde::{Deserialize, Serialize};

/// Phase of a pointer sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerPhase {
    Down,
    Move,
    Up,
}

/// A single pointer sample in the panel's local coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub x: f32,
    pub y: f32,
    pub phase: PointerPhase,
    pub time: Instant,
}

impl PointerEvent {
    pub fn new(phase: PointerPhase, x: f32, y: f32, time: Instant) -> Self {
        Self { x, y, phase, time }
    }

    pub fn down(x: f32, y: f32, time: Instant) -> Self {
        Self::new(PointerPhase::Down, x, y, time)
    }

    pub fn moved(x: f32, y: f32, time: Instant) -> Self {
        Self::new(PointerPhase::Move, x, y, time)
    }

    pub fn up(x: f32, y: f32, time: Instant) -> Self {
        Self::new(PointerPhase::Up, x, y, time)
    }

    /// Point of the sample as (x, y)
    #[inline]
    pub fn point(&self) -> (f32, f32) {
        (self.x, self.y)
    }
}

/// Decides whether a pointer stream is a horizontal swipe the panel should claim
///
/// The rule is a bare comparison of the latest move against the down sample:
/// horizontal displacement strictly greater than vertical displacement claims.
/// There is no touch slop, so a one-unit horizontal wobble is enough when the
/// vertical displacement is zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct GestureClassifier {
    down: Option<(f32, f32)>,
}

impl GestureClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a sample and report whether the panel should take the stream
    pub fn should_intercept(&mut self, event: &PointerEvent) -> bool {
        match event.phase {
            PointerPhase::Down => {
                self.down = Some(event.point());
                false
            }
            PointerPhase::Move => match self.down {
                Some((down_x, down_y)) => (event.x - down_x).abs() > (event.y - down_y).abs(),
                // A stream that started outside the panel has no down point
                None => false,
            },
            PointerPhase::Up => false,
        }
    }

    /// Down point of the current stream
    pub fn down_point(&self) -> Option<(f32, f32)> {
        self.down
    }
}

/// Horizontal delta between two samples, truncated toward zero
#[inline]
pub fn horizontal_delta(from_x: f32, to_x: f32) -> i32 {
    (to_x - from_x) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(samples: &[(PointerPhase, f32, f32)]) -> Vec<bool> {
        let now = Instant::now();
        let mut classifier = GestureClassifier::new();
        samples
            .iter()
            .map(|&(phase, x, y)| classifier.should_intercept(&PointerEvent::new(phase, x, y, now)))
            .collect()
    }

    #[test]
    fn test_horizontal_displacement_is_intercepted() {
        let decisions = classify(&[
            (PointerPhase::Down, 100.0, 100.0),
            (PointerPhase::Move, 110.0, 105.0),
        ]);
        assert_eq!(decisions, vec![false, true]);
    }

    #[test]
    fn test_vertical_displacement_is_not_intercepted() {
        let decisions = classify(&[
            (PointerPhase::Down, 100.0, 100.0),
            (PointerPhase::Move, 105.0, 110.0),
        ]);
        assert_eq!(decisions, vec![false, false]);
    }

    #[test]
    fn test_equal_displacement_is_not_intercepted() {
        let decisions = classify(&[
            (PointerPhase::Down, 0.0, 0.0),
            (PointerPhase::Move, -7.0, 7.0),
        ]);
        assert_eq!(decisions, vec![false, false]);
    }

    #[test]
    fn test_compares_latest_move_against_down_not_running_delta() {
        // Mostly vertical first, then a long horizontal leg
        let decisions = classify(&[
            (PointerPhase::Down, 0.0, 0.0),
            (PointerPhase::Move, 2.0, 20.0),
            (PointerPhase::Move, 40.0, 22.0),
            (PointerPhase::Up, 40.0, 22.0),
        ]);
        assert_eq!(decisions, vec![false, false, true, false]);
    }

    #[test]
    fn test_leftward_swipe_is_intercepted() {
        let decisions = classify(&[
            (PointerPhase::Down, 300.0, 10.0),
            (PointerPhase::Move, 200.0, 12.0),
        ]);
        assert_eq!(decisions, vec![false, true]);
    }

    #[test]
    fn test_move_without_down_is_not_intercepted() {
        let decisions = classify(&[(PointerPhase::Move, 50.0, 0.0)]);
        assert_eq!(decisions, vec![false]);
    }

    #[test]
    fn test_horizontal_delta_truncates_toward_zero() {
        assert_eq!(horizontal_delta(10.0, 12.9), 2);
        assert_eq!(horizontal_delta(10.0, 7.1), -2);
        assert_eq!(horizontal_delta(10.0, 10.4), 0);
    }
}
