//! Measurement and placement of the content and action surfaces
//!
//! The two surfaces sit side by side in a strip `parent_width + action_width`
//! wide. Layout never moves them afterwards; the panel only shifts the
//! viewport over the strip.

use serde::{Deserialize, Serialize};

use crate::actions::ActionKind;
use crate::config::Fraction;

/// How a parent constrains one dimension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeasureMode {
    /// The child must be exactly `size`
    Exactly,
    /// The child may be at most `size`
    AtMost,
    /// No constraint, `size` is only a hint
    Unspecified,
}

/// One dimension of a measurement request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeasureSpec {
    pub mode: MeasureMode,
    pub size: u32,
}

impl MeasureSpec {
    pub fn exactly(size: u32) -> Self {
        Self {
            mode: MeasureMode::Exactly,
            size,
        }
    }

    pub fn at_most(size: u32) -> Self {
        Self {
            mode: MeasureMode::AtMost,
            size,
        }
    }

    pub fn unspecified() -> Self {
        Self {
            mode: MeasureMode::Unspecified,
            size: 0,
        }
    }
}

/// Declared height of the content surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeightMode {
    Fixed(u32),
    FillParent,
    FitContent,
}

/// What the layout engine knows about the opaque content surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentSpec {
    pub height: HeightMode,
    /// Height the content would take if unconstrained
    #[serde(default)]
    pub intrinsic_height: u32,
}

impl ContentSpec {
    pub fn fixed(height: u32) -> Self {
        Self {
            height: HeightMode::Fixed(height),
            intrinsic_height: height,
        }
    }

    pub fn fill_parent() -> Self {
        Self {
            height: HeightMode::FillParent,
            intrinsic_height: 0,
        }
    }

    pub fn fit_content(intrinsic_height: u32) -> Self {
        Self {
            height: HeightMode::FitContent,
            intrinsic_height,
        }
    }

    /// Resolve the content height against the parent's height constraint
    fn resolve_height(&self, parent: MeasureSpec) -> u32 {
        match (self.height, parent.mode) {
            (HeightMode::Fixed(height), _) => height,
            // Nothing to fill without a bound, fall back to the content itself
            (HeightMode::FillParent, MeasureMode::Unspecified) => self.intrinsic_height,
            (HeightMode::FillParent, _) => parent.size,
            (HeightMode::FitContent, MeasureMode::Unspecified) => self.intrinsic_height,
            (HeightMode::FitContent, _) => self.intrinsic_height.min(parent.size),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn right(&self) -> u32 {
        self.x.saturating_add(self.width)
    }

    #[inline]
    pub fn bottom(&self) -> u32 {
        self.y.saturating_add(self.height)
    }

    /// Half-open containment test
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x as f32 && x < self.right() as f32 && y >= self.y as f32 && y < self.bottom() as f32
    }
}

/// Result of a measure pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PanelLayout {
    pub content: Rect,
    pub action: Rect,
    pub size: Size,
}

/// Measure both surfaces and place them side by side
pub fn measure(
    width: MeasureSpec,
    height: MeasureSpec,
    content: &ContentSpec,
    action_ratio: Fraction,
) -> PanelLayout {
    let parent_width = width.size;
    let content_height = content.resolve_height(height);
    let action_width = action_ratio.apply_u32(parent_width);

    let content_rect = Rect::new(0, 0, parent_width, content_height);
    let action_rect = Rect::new(content_rect.right(), 0, action_width, content_height);

    PanelLayout {
        content: content_rect,
        action: action_rect,
        size: Size {
            width: parent_width.saturating_add(action_width),
            height: content_height,
        },
    }
}

impl PanelLayout {
    /// Width of the action surface, the upper bound of the scroll offset
    #[inline]
    pub fn action_width(&self) -> i32 {
        self.action.width.min(i32::MAX as u32) as i32
    }

    /// Strip region visible through the parent-wide viewport at `offset`
    pub fn viewport(&self, offset: i32) -> Rect {
        let offset = offset.clamp(0, self.action_width()) as u32;
        Rect::new(offset, 0, self.content.width, self.size.height)
    }

    /// The three action buttons, left to right, in strip coordinates
    ///
    /// Buttons share the action width evenly; the last one absorbs the remainder.
    pub fn action_buttons(&self) -> [(ActionKind, Rect); 3] {
        let base = self.action.width / 3;
        let last = self.action.width - base * 2;
        let y = self.action.y;
        let h = self.action.height;
        let x0 = self.action.x;
        [
            (ActionKind::Read, Rect::new(x0, y, base, h)),
            (ActionKind::Top, Rect::new(x0 + base, y, base, h)),
            (ActionKind::Delete, Rect::new(x0 + base * 2, y, last, h)),
        ]
    }

    /// Action button under a point given in strip coordinates
    pub fn action_at(&self, x: f32, y: f32) -> Option<ActionKind> {
        self.action_buttons()
            .into_iter()
            .find(|(_, rect)| rect.contains(x, y))
            .map(|(kind, _)| kind)
    }
}
