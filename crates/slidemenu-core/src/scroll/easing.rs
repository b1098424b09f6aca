//! Pure easing functions for settle animations
//!
//! Every curve maps input progress [0, 1] to output [0, 1].

pub use crate::config::EasingType;

/// Extension trait for EasingType with calculation methods
pub trait EasingTypeExt {
    /// Apply the easing function to a progress value
    ///
    /// # Arguments
    /// * `t` - Progress value in range [0, 1]
    ///
    /// # Returns
    /// Eased value in range [0, 1]
    fn apply(&self, t: f64) -> f64;
}

impl EasingTypeExt for EasingType {
    #[inline]
    fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            EasingType::Linear => t,
            EasingType::Cubic => cubic_ease_out(t),
            EasingType::Quintic => quintic_ease_out(t),
            EasingType::EaseOut => exponential_ease_out(t),
            EasingType::Viscous => viscous_fluid_ease_out(t),
        }
    }
}

/// Cubic ease-out: f(t) = 1 - (1-t)³
#[inline]
fn cubic_ease_out(t: f64) -> f64 {
    let inv = 1.0 - t;
    1.0 - inv * inv * inv
}

/// Quintic ease-out: f(t) = 1 - (1-t)⁵
#[inline]
fn quintic_ease_out(t: f64) -> f64 {
    let inv = 1.0 - t;
    1.0 - inv * inv * inv * inv * inv
}

/// Exponential ease-out: f(t) = 1 - 2^(-10t)
#[inline]
fn exponential_ease_out(t: f64) -> f64 {
    if t >= 1.0 {
        1.0
    } else {
        1.0 - 2.0_f64.powf(-10.0 * t)
    }
}

const VISCOUS_FLUID_SCALE: f64 = 8.0;

/// Unnormalized viscous-fluid curve: quadratic start, exponential tail
fn viscous_fluid(t: f64) -> f64 {
    let x = t * VISCOUS_FLUID_SCALE;
    if x < 1.0 {
        x - (1.0 - (-x).exp())
    } else {
        let start = (-1.0_f64).exp();
        let tail = 1.0 - (1.0 - x).exp();
        start + tail * (1.0 - start)
    }
}

/// Viscous-fluid ease-out normalized so that f(1) = 1
#[inline]
fn viscous_fluid_ease_out(t: f64) -> f64 {
    if t >= 1.0 {
        return 1.0;
    }
    (viscous_fluid(t) / viscous_fluid(1.0)).clamp(0.0, 1.0)
}
