pub mod actions;
pub mod config;
pub mod error;
pub mod gesture;
pub mod layout;
pub mod panel;
pub mod script;
pub mod scroll;

pub use actions::{ActionCallbacks, ActionKind};
pub use config::{AppConfig, EasingType, Fraction, PanelConfig};
pub use error::{Error, Result};
pub use gesture::{GestureClassifier, PointerEvent, PointerPhase};
pub use layout::{ContentSpec, HeightMode, MeasureMode, MeasureSpec, PanelLayout};
pub use panel::{Direction, Disposition, Panel};
