use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use tracing::warn;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub panel: PanelConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level used when RUST_LOG is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Tunables of the slide panel gesture and settle animation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelConfig {
    /// Settle animation duration in milliseconds
    #[serde(default = "default_animation_duration")]
    pub animation_duration_ms: u64,
    /// Easing curve of the settle animation
    #[serde(default)]
    pub easing: EasingType,
    /// Action surface width as a fraction of the parent width
    #[serde(default = "default_action_width_ratio")]
    pub action_width_ratio: Fraction,
    /// A closed panel opens when released beyond this fraction of the action width
    #[serde(default = "default_open_threshold")]
    pub open_threshold: Fraction,
    /// An open panel closes when released at or below this fraction of the action width
    #[serde(default = "default_close_threshold")]
    pub close_threshold: Fraction,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            animation_duration_ms: default_animation_duration(),
            easing: EasingType::default(),
            action_width_ratio: default_action_width_ratio(),
            open_threshold: default_open_threshold(),
            close_threshold: default_close_threshold(),
        }
    }
}

impl PanelConfig {
    /// Settle animation duration as a Duration
    #[inline]
    pub fn animation_duration(&self) -> Duration {
        Duration::from_millis(self.animation_duration_ms)
    }

    /// Reject fractions that cannot describe a position inside the action surface
    pub fn validate(&self) -> crate::Result<()> {
        let fractions = [
            ("action_width_ratio", self.action_width_ratio),
            ("open_threshold", self.open_threshold),
            ("close_threshold", self.close_threshold),
        ];
        for (name, fraction) in fractions {
            if fraction.denominator == 0 {
                return Err(crate::Error::Config(format!(
                    "panel.{} has a zero denominator",
                    name
                )));
            }
            if fraction.numerator > fraction.denominator {
                return Err(crate::Error::Config(format!(
                    "panel.{} must not exceed 1 (got {})",
                    name, fraction
                )));
            }
        }
        Ok(())
    }
}

/// Highest frame rate that still leaves a 1ms poll interval
const MAX_ANIMATION_FPS: u32 = 1000;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Tick rate in milliseconds while idle
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Frame rate while a settle animation is running
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u32,
    /// Height of one message row in terminal lines
    #[serde(default = "default_row_height")]
    pub row_height: u16,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            animation_fps: default_animation_fps(),
            row_height: default_row_height(),
        }
    }
}

impl UiConfig {
    /// Frame interval used while animating, never shorter than 1ms
    pub fn animation_tick_duration(&self) -> Duration {
        if self.animation_fps == 0 {
            Duration::from_millis(16) // ~60fps fallback
        } else {
            Duration::from_millis(1000 / self.animation_fps.min(MAX_ANIMATION_FPS) as u64)
        }
    }

    /// Pull rates and sizes the event loop cannot use back into range
    pub fn clamp(&mut self) {
        if self.tick_rate_ms == 0 {
            warn!(default = default_tick_rate(), "ui.tick_rate_ms must be positive, using default");
            self.tick_rate_ms = default_tick_rate();
        }
        if self.animation_fps == 0 {
            warn!(default = default_animation_fps(), "ui.animation_fps must be positive, using default");
            self.animation_fps = default_animation_fps();
        } else if self.animation_fps > MAX_ANIMATION_FPS {
            warn!(
                animation_fps = self.animation_fps,
                max = MAX_ANIMATION_FPS,
                "ui.animation_fps too high, clamping"
            );
            self.animation_fps = MAX_ANIMATION_FPS;
        }
        if self.row_height == 0 {
            warn!("ui.row_height must be at least 1, clamping");
            self.row_height = 1;
        }
    }
}

/// Easing curve applied to settle animations
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingType {
    Linear,
    Cubic,
    Quintic,
    /// Exponential ease-out
    EaseOut,
    /// Viscous-fluid ease-out of the classic platform scroller
    #[default]
    Viscous,
}

/// Integer fraction evaluated with truncating integer arithmetic
///
/// Written in config files either as a string (`"3/4"`) or as a table
/// (`{ numerator = 3, denominator = 4 }`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fraction {
    pub numerator: u32,
    pub denominator: u32,
}

impl Fraction {
    pub const fn new(numerator: u32, denominator: u32) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    /// `value * numerator / denominator`, multiplying first.
    /// A zero denominator yields 0; the result saturates at the i32 bounds.
    pub fn apply(&self, value: i32) -> i32 {
        if self.denominator == 0 {
            return 0;
        }
        let scaled = value as i64 * self.numerator as i64 / self.denominator as i64;
        scaled.clamp(i32::MIN as i64, i32::MAX as i64) as i32
    }

    /// Unsigned variant of [`Fraction::apply`] used by layout
    pub fn apply_u32(&self, value: u32) -> u32 {
        if self.denominator == 0 {
            return 0;
        }
        let scaled = value as u64 * self.numerator as u64 / self.denominator as u64;
        scaled.min(u32::MAX as u64) as u32
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

impl Serialize for Fraction {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

// Accept either "3/4" or a map with numerator/denominator
impl<'de> Deserialize<'de> for Fraction {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::{self, MapAccess, Visitor};

        struct FractionVisitor;

        impl<'de> Visitor<'de> for FractionVisitor {
            type Value = Fraction;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string like \"3/4\" or a map with 'numerator' and 'denominator'")
            }

            fn visit_str<E>(self, value: &str) -> Result<Fraction, E>
            where
                E: de::Error,
            {
                let (num, den) = value
                    .split_once('/')
                    .ok_or_else(|| E::custom(format!("missing '/' in fraction \"{}\"", value)))?;
                let numerator = num
                    .trim()
                    .parse()
                    .map_err(|_| E::custom(format!("invalid numerator in \"{}\"", value)))?;
                let denominator = den
                    .trim()
                    .parse()
                    .map_err(|_| E::custom(format!("invalid denominator in \"{}\"", value)))?;
                Ok(Fraction::new(numerator, denominator))
            }

            fn visit_map<M>(self, mut map: M) -> Result<Fraction, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut numerator: Option<u32> = None;
                let mut denominator: Option<u32> = None;

                while let Some(key) = map.next_key::<String>()? {
                    match key.as_str() {
                        "numerator" => numerator = Some(map.next_value()?),
                        "denominator" => denominator = Some(map.next_value()?),
                        _ => {
                            let _: de::IgnoredAny = map.next_value()?;
                        }
                    }
                }

                Ok(Fraction::new(
                    numerator.ok_or_else(|| de::Error::missing_field("numerator"))?,
                    denominator.ok_or_else(|| de::Error::missing_field("denominator"))?,
                ))
            }
        }

        deserializer.deserialize_any(FractionVisitor)
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_animation_duration() -> u64 {
    500
}

fn default_action_width_ratio() -> Fraction {
    Fraction::new(3, 4)
}

fn default_open_threshold() -> Fraction {
    Fraction::new(1, 4)
}

fn default_close_threshold() -> Fraction {
    Fraction::new(3, 4)
}

fn default_tick_rate() -> u64 {
    100
}

fn default_animation_fps() -> u32 {
    60
}

fn default_row_height() -> u16 {
    3
}

impl AppConfig {
    /// Load configuration from file or return defaults
    pub fn load() -> crate::Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            Self::from_toml(&content)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse and validate configuration text
    pub fn from_toml(content: &str) -> crate::Result<Self> {
        let mut config: Self = toml::from_str(content)?;
        config.panel.validate()?;
        config.ui.clamp();
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> crate::Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&config_path, self.to_toml()?)?;

        Ok(())
    }

    /// Render configuration as TOML
    pub fn to_toml(&self) -> crate::Result<String> {
        toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Get the configuration file path
    /// Always uses ~/.config/slidemenu/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("slidemenu")
            .join("config.toml")
    }

    /// Log file of the interactive demo, next to the config file
    pub fn log_path() -> PathBuf {
        Self::config_path().with_file_name("slidemenu.log")
    }
}
