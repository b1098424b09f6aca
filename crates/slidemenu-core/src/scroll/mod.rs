//! Settle animation for slide panels
//!
//! A leaf-first stack in the same shape as any smooth-scroll system:
//!
//! - `easing` - Pure easing curves mapping progress [0, 1] to [0, 1]
//! - `timing` - Progress and interpolation helpers over injected timestamps
//! - `animation` - The animator that owns at most one in-flight run
//!
//! # Usage
//!
//! ```ignore
//! use std::time::{Duration, Instant};
//! use slidemenu_core::scroll::ScrollAnimator;
//!
//! let mut animator = ScrollAnimator::default();
//! let start = Instant::now();
//! animator.start(0, 300, Duration::from_millis(500), start);
//!
//! // Host frame callback
//! while let Some(offset) = animator.advance(Instant::now()) {
//!     // apply offset, request another frame
//! }
//! ```

pub mod easing;
pub mod timing;

pub mod animation;

pub use animation::{AnimationRun, ScrollAnimator};
pub use easing::EasingTypeExt;
