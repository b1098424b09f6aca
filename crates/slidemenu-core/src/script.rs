//! Headless replay of recorded pointer sequences
//!
//! A script describes the parent constraints and a list of timestamped pointer
//! samples. Replaying it drives a [`Panel`] exactly as a host would: samples go
//! through `dispatch`, and frame callbacks fire at a fixed interval while a
//! settle run is in flight.

use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::actions::{ActionCallbacks, ActionKind};
use crate::config::PanelConfig;
use crate::gesture::{PointerEvent, PointerPhase};
use crate::layout::{ContentSpec, MeasureSpec};
use crate::panel::{Direction, Disposition, Panel};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GestureScript {
    /// Exact parent width
    pub parent_width: u32,
    /// Upper bound on the parent height
    #[serde(default = "default_parent_height")]
    pub parent_height: u32,
    #[serde(default = "default_content")]
    pub content: ContentSpec,
    /// Interval between frame callbacks in milliseconds
    #[serde(default = "default_frame_interval")]
    pub frame_interval_ms: u64,
    /// Settle fully open before the first sample
    #[serde(default)]
    pub start_open: bool,
    pub events: Vec<ScriptEvent>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScriptEvent {
    pub phase: PointerPhase,
    pub x: f32,
    #[serde(default)]
    pub y: f32,
    /// Milliseconds since the start of the script
    pub t_ms: u64,
}

/// What produced a trace frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum FrameSource {
    Pointer {
        phase: PointerPhase,
        disposition: Disposition,
    },
    Tick,
}

/// Panel state after one sample or frame callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TraceFrame {
    pub t_ms: u64,
    pub source: FrameSource,
    pub offset: i32,
    pub is_open: bool,
    pub direction: Direction,
}

#[derive(Debug, Clone, Serialize)]
pub struct Trace {
    pub action_width: i32,
    pub frames: Vec<TraceFrame>,
    pub activated: Vec<ActionKind>,
    pub final_offset: i32,
    pub is_open: bool,
}

fn default_parent_height() -> u32 {
    72
}

fn default_content() -> ContentSpec {
    ContentSpec::fill_parent()
}

fn default_frame_interval() -> u64 {
    16
}

impl GestureScript {
    /// Load a script from a JSON file
    pub fn load(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> crate::Result<Self> {
        let script: Self = serde_json::from_str(content)?;
        script.validate()?;
        Ok(script)
    }

    fn validate(&self) -> crate::Result<()> {
        if self.frame_interval_ms == 0 {
            return Err(crate::Error::Script("frame_interval_ms must be positive".into()));
        }
        if let Some(pair) = self.events.windows(2).find(|pair| pair[1].t_ms < pair[0].t_ms) {
            return Err(crate::Error::Script(format!(
                "events go back in time ({} ms after {} ms)",
                pair[1].t_ms, pair[0].t_ms
            )));
        }
        Ok(())
    }

    /// Replay the script through a fresh panel
    pub fn replay(&self, config: &PanelConfig) -> crate::Result<Trace> {
        self.validate()?;

        let activated = Rc::new(RefCell::new(Vec::new()));
        let sink = activated.clone();
        let mut panel = Panel::new(config.clone(), self.content)
            .with_callbacks(ActionCallbacks::for_all(move |kind| sink.borrow_mut().push(kind)));
        panel.measure(
            MeasureSpec::exactly(self.parent_width),
            MeasureSpec::at_most(self.parent_height),
        );

        let mut base = Instant::now();
        if self.start_open {
            // Settle before the script clock starts
            panel.open(base);
            base += config.animation_duration();
            panel.compute_scroll(base);
        }

        let at = |t_ms: u64| base + Duration::from_millis(t_ms);
        let mut frames = Vec::new();
        let mut clock = 0u64;

        for event in &self.events {
            // Frame callbacks that fall before this sample
            while panel.is_animating() && clock + self.frame_interval_ms <= event.t_ms {
                clock += self.frame_interval_ms;
                panel.compute_scroll(at(clock));
                frames.push(Self::snapshot(&panel, clock, FrameSource::Tick));
            }
            clock = clock.max(event.t_ms);

            let sample = PointerEvent::new(event.phase, event.x, event.y, at(event.t_ms));
            let disposition = panel.dispatch(&sample)?;
            debug!(t_ms = event.t_ms, ?disposition, offset = panel.offset(), "replayed sample");
            frames.push(Self::snapshot(
                &panel,
                event.t_ms,
                FrameSource::Pointer {
                    phase: event.phase,
                    disposition,
                },
            ));
        }

        while panel.is_animating() {
            clock += self.frame_interval_ms;
            panel.compute_scroll(at(clock));
            frames.push(Self::snapshot(&panel, clock, FrameSource::Tick));
        }

        let activated = activated.borrow().clone();
        info!(
            frames = frames.len(),
            final_offset = panel.offset(),
            is_open = panel.is_open(),
            "replay finished"
        );

        Ok(Trace {
            action_width: panel.action_width(),
            frames,
            activated,
            final_offset: panel.offset(),
            is_open: panel.is_open(),
        })
    }

    fn snapshot(panel: &Panel, t_ms: u64, source: FrameSource) -> TraceFrame {
        TraceFrame {
            t_ms,
            source,
            offset: panel.offset(),
            is_open: panel.is_open(),
            direction: panel.direction(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EasingType;

    fn linear() -> PanelConfig {
        PanelConfig {
            easing: EasingType::Linear,
            ..Default::default()
        }
    }

    #[test]
    fn test_swipe_open_script() {
        let script = GestureScript::from_json(
            r#"{
                "parent_width": 400,
                "events": [
                    { "phase": "down", "x": 350, "y": 10, "t_ms": 0 },
                    { "phase": "move", "x": 300, "y": 11, "t_ms": 16 },
                    { "phase": "move", "x": 250, "y": 12, "t_ms": 32 },
                    { "phase": "up", "x": 250, "y": 12, "t_ms": 48 }
                ]
            }"#,
        )
        .unwrap();

        let trace = script.replay(&linear()).unwrap();
        assert_eq!(trace.action_width, 300);
        assert_eq!(trace.frames[2].offset, 100);
        assert!(trace.is_open);
        assert_eq!(trace.final_offset, 300);

        let ticks: Vec<i32> = trace
            .frames
            .iter()
            .filter(|f| f.source == FrameSource::Tick)
            .map(|f| f.offset)
            .collect();
        assert!(ticks.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(ticks.last(), Some(&300));
    }

    #[test]
    fn test_start_open_then_tap_delete() {
        let script = GestureScript::from_json(
            r#"{
                "parent_width": 400,
                "start_open": true,
                "events": [
                    { "phase": "down", "x": 380, "y": 5, "t_ms": 0 },
                    { "phase": "up", "x": 380, "y": 5, "t_ms": 40 }
                ]
            }"#,
        )
        .unwrap();

        let trace = script.replay(&linear()).unwrap();
        assert_eq!(trace.activated, vec![ActionKind::Delete]);
        assert_eq!(
            trace.frames[1].source,
            FrameSource::Pointer {
                phase: PointerPhase::Up,
                disposition: Disposition::Activated(ActionKind::Delete),
            }
        );
        assert!(!trace.is_open);
        assert_eq!(trace.final_offset, 0);
    }

    #[test]
    fn test_vertical_script_never_moves() {
        let script = GestureScript::from_json(
            r#"{
                "parent_width": 400,
                "content": { "height": { "fixed": 48 } },
                "events": [
                    { "phase": "down", "x": 200, "y": 0, "t_ms": 0 },
                    { "phase": "move", "x": 205, "y": 40, "t_ms": 16 },
                    { "phase": "up", "x": 205, "y": 40, "t_ms": 32 }
                ]
            }"#,
        )
        .unwrap();

        let trace = script.replay(&linear()).unwrap();
        assert!(trace.frames.iter().all(|f| f.offset == 0));
        assert!(!trace.is_open);
        assert_eq!(trace.frames.len(), 3);
    }

    #[test]
    fn test_rejects_events_out_of_order() {
        let err = GestureScript::from_json(
            r#"{
                "parent_width": 400,
                "events": [
                    { "phase": "down", "x": 1, "t_ms": 50 },
                    { "phase": "up", "x": 1, "t_ms": 10 }
                ]
            }"#,
        )
        .unwrap_err();
        assert!(matches!(err, crate::Error::Script(_)));
    }

    #[test]
    fn test_rejects_zero_frame_interval() {
        let err = GestureScript::from_json(
            r#"{ "parent_width": 400, "frame_interval_ms": 0, "events": [] }"#,
        )
        .unwrap_err();
        assert!(matches!(err, crate::Error::Script(_)));
    }
}
