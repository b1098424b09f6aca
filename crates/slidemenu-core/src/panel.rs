//! Open/close state machine of a slide panel
//!
//! The panel owns the horizontal scroll offset of its viewport over the
//! content + action strip. Pointer streams are either delegated to the content
//! surface or claimed by the panel; once claimed the offset tracks the finger
//! 1:1 inside `[0, action_width]` and release settles it fully open or closed.

use std::time::Instant;

use serde::Serialize;
use tracing::{debug, trace};

use crate::actions::{ActionCallbacks, ActionKind};
use crate::config::PanelConfig;
use crate::gesture::{horizontal_delta, GestureClassifier, PointerEvent, PointerPhase};
use crate::layout::{self, ContentSpec, MeasureSpec, PanelLayout, Size};
use crate::scroll::{AnimationRun, ScrollAnimator};

/// Horizontal direction of the most recent non-zero drag step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Left,
    Right,
    #[default]
    None,
}

/// What happened to a dispatched pointer event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Disposition {
    /// The panel did not claim the stream; route the event to the content surface
    Delegated,
    /// The panel consumed the event as part of a swipe
    Consumed,
    /// A tap on an action button fired its callback and closed the panel
    Activated(ActionKind),
}

/// Settle target chosen on release
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settle {
    Open,
    Close,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Ownership {
    Unclaimed,
    Claimed,
}

/// Decide where a released drag settles
///
/// Open panels close on a rightward release at or below the close threshold and
/// re-open otherwise. Closed panels open on a leftward release strictly beyond
/// the open threshold and snap back otherwise. Without any horizontal movement
/// there is nothing to settle.
pub fn settle_decision(
    is_open: bool,
    direction: Direction,
    offset: i32,
    action_width: i32,
    config: &PanelConfig,
) -> Option<Settle> {
    match (is_open, direction) {
        (_, Direction::None) => None,
        (true, Direction::Left) => Some(Settle::Open),
        (true, Direction::Right) => {
            if offset <= config.close_threshold.apply(action_width) {
                Some(Settle::Close)
            } else {
                Some(Settle::Open)
            }
        }
        (false, Direction::Left) => {
            if offset > config.open_threshold.apply(action_width) {
                Some(Settle::Open)
            } else {
                Some(Settle::Close)
            }
        }
        (false, Direction::Right) => Some(Settle::Close),
    }
}

/// A slidable content + action panel
#[derive(Debug)]
pub struct Panel {
    config: PanelConfig,
    content: ContentSpec,
    layout: PanelLayout,
    offset: i32,
    is_open: bool,
    direction: Direction,
    /// Previous sample of the local drag, deltas are taken against it
    anchor: Option<(f32, f32)>,
    classifier: GestureClassifier,
    ownership: Ownership,
    /// Action button under the current down point
    pressed: Option<ActionKind>,
    animator: ScrollAnimator,
    callbacks: ActionCallbacks,
    repaint: bool,
}

impl Panel {
    pub fn new(config: PanelConfig, content: ContentSpec) -> Self {
        let animator = ScrollAnimator::new(config.easing);
        Self {
            config,
            content,
            layout: PanelLayout::default(),
            offset: 0,
            is_open: false,
            direction: Direction::None,
            anchor: None,
            classifier: GestureClassifier::new(),
            ownership: Ownership::Unclaimed,
            pressed: None,
            animator,
            callbacks: ActionCallbacks::new(),
            repaint: false,
        }
    }

    pub fn with_callbacks(mut self, callbacks: ActionCallbacks) -> Self {
        self.callbacks = callbacks;
        self
    }

    /// Measure both surfaces against the parent constraints
    ///
    /// Returns the overall widget size. A live offset beyond the new action
    /// width is pulled back inside it.
    pub fn measure(&mut self, width: MeasureSpec, height: MeasureSpec) -> Size {
        self.layout = layout::measure(width, height, &self.content, self.config.action_width_ratio);
        let clamped = self.offset.clamp(0, self.action_width());
        self.scroll_to(clamped);
        self.layout.size
    }

    pub fn layout(&self) -> &PanelLayout {
        &self.layout
    }

    #[inline]
    pub fn action_width(&self) -> i32 {
        self.layout.action_width()
    }

    /// Live horizontal scroll offset
    #[inline]
    pub fn offset(&self) -> i32 {
        self.offset
    }

    /// Target of the last open/close call
    #[inline]
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Whether the panel currently owns the pointer stream
    pub fn is_dragging(&self) -> bool {
        self.ownership == Ownership::Claimed
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        self.animator.is_animating()
    }

    /// The in-flight settle run, if any
    pub fn current_run(&self) -> Option<&AnimationRun> {
        self.animator.run()
    }

    /// Take the pending repaint request
    pub fn take_repaint(&mut self) -> bool {
        std::mem::take(&mut self.repaint)
    }

    /// Interception check, fed every sample while the stream is unclaimed
    pub fn intercept(&mut self, event: &PointerEvent) -> bool {
        self.classifier.should_intercept(event)
    }

    /// Local handling of a stream the panel owns
    pub fn on_touch_event(&mut self, event: &PointerEvent) {
        match event.phase {
            PointerPhase::Down => {
                self.anchor = Some(event.point());
                self.direction = Direction::None;
            }
            PointerPhase::Move => self.drag_to(event.x, event.y),
            PointerPhase::Up => self.release(event.time),
        }
    }

    /// Route one sample through interception and local handling
    ///
    /// While unclaimed, samples only feed the classifier and are delegated. The
    /// sample that makes the classifier claim resets the drag anchor to the
    /// stream's down point and is applied immediately, so the swipe loses no
    /// distance to the claim. From then on every sample up to and including
    /// the release is handled locally.
    ///
    /// A down sample always starts a fresh stream, even when the release of the
    /// previous one never arrived.
    pub fn dispatch(&mut self, event: &PointerEvent) -> crate::Result<Disposition> {
        if event.phase == PointerPhase::Down {
            self.cancel_gesture(event.time);
        }

        if self.ownership == Ownership::Claimed {
            self.on_touch_event(event);
            if event.phase == PointerPhase::Up {
                self.ownership = Ownership::Unclaimed;
            }
            return Ok(Disposition::Consumed);
        }

        if event.phase == PointerPhase::Down {
            self.direction = Direction::None;
            self.anchor = None;
            self.pressed = self.action_under(event.x, event.y);
        }

        if self.intercept(event) {
            let down = self.classifier.down_point().unwrap_or(event.point());
            debug!(down_x = down.0, x = event.x, y = event.y, "panel claimed horizontal swipe");
            self.ownership = Ownership::Claimed;
            self.pressed = None;
            self.anchor = Some(down);
            self.on_touch_event(event);
            return Ok(Disposition::Consumed);
        }

        if event.phase == PointerPhase::Up {
            let pressed = self.pressed.take();
            if let Some(kind) = pressed.filter(|&kind| self.action_under(event.x, event.y) == Some(kind)) {
                self.activate(kind, event.time)?;
                return Ok(Disposition::Activated(kind));
            }
        }

        Ok(Disposition::Delegated)
    }

    /// Give up a stream whose release never arrived
    ///
    /// A claimed drag settles as if it had been released at its last sample.
    pub fn cancel_gesture(&mut self, now: Instant) {
        if self.ownership == Ownership::Claimed {
            debug!(offset = self.offset, "pointer stream abandoned without release");
            self.ownership = Ownership::Unclaimed;
            self.release(now);
        }
        self.anchor = None;
        self.pressed = None;
    }

    /// Animate to fully open
    pub fn open(&mut self, now: Instant) {
        let target = self.action_width();
        debug!(from = self.offset, to = target, "opening panel");
        self.settle_to(target, now);
        self.is_open = true;
    }

    /// Animate to fully closed
    pub fn close(&mut self, now: Instant) {
        debug!(from = self.offset, to = 0, "closing panel");
        self.settle_to(0, now);
        self.is_open = false;
    }

    /// Frame callback: apply the animated offset for `now`
    ///
    /// Returns true while the run still needs frames.
    pub fn compute_scroll(&mut self, now: Instant) -> bool {
        if let Some(offset) = self.animator.advance(now) {
            trace!(offset, "settle frame");
            self.scroll_to(offset.clamp(0, self.action_width()));
        }
        self.animator.is_animating()
    }

    /// Fire the callback of an action control, then close
    ///
    /// Fails with `Error::NoListener` when the host did not register the
    /// action; the panel is left as it was.
    pub fn activate(&mut self, kind: ActionKind, now: Instant) -> crate::Result<()> {
        debug!(action = %kind, "action activated");
        self.callbacks.invoke(kind)?;
        self.close(now);
        Ok(())
    }

    fn settle_to(&mut self, target: i32, now: Instant) {
        self.animator
            .start(self.offset, target, self.config.animation_duration(), now);
        self.repaint = true;
    }

    fn drag_to(&mut self, x: f32, y: f32) {
        let Some((anchor_x, _)) = self.anchor else {
            self.anchor = Some((x, y));
            return;
        };

        let dx = horizontal_delta(anchor_x, x);
        if dx > 0 {
            self.direction = Direction::Right;
        } else if dx < 0 {
            self.direction = Direction::Left;
        }
        self.anchor = Some((x, y));

        let action_width = self.action_width();
        let result = self.offset.saturating_sub(dx);
        if result <= 0 {
            self.scroll_to(0);
        } else if result > action_width {
            self.scroll_to(action_width);
        } else {
            self.scroll_to(result);
        }
    }

    fn release(&mut self, now: Instant) {
        let decision = settle_decision(
            self.is_open,
            self.direction,
            self.offset,
            self.action_width(),
            &self.config,
        );
        debug!(
            offset = self.offset,
            is_open = self.is_open,
            direction = ?self.direction,
            ?decision,
            "drag released"
        );
        match decision {
            Some(Settle::Open) => self.open(now),
            Some(Settle::Close) => self.close(now),
            None => {}
        }
    }

    fn scroll_to(&mut self, offset: i32) {
        if offset != self.offset {
            self.offset = offset;
            self.repaint = true;
        }
    }

    /// Action button under a point in viewport coordinates
    fn action_under(&self, x: f32, y: f32) -> Option<ActionKind> {
        self.layout.action_at(x + self.offset as f32, y)
    }
}
