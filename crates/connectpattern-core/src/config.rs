//! Widget configuration.

use crate::animation::AnimationKind;
use kurbo::Insets;
use peniko::Color;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Number of targets shown when nothing else is configured.
pub const DEFAULT_TARGET_COUNT: u8 = 9;
/// Circle radius in pixels.
pub const DEFAULT_RADIUS: f64 = 14.0;
/// Connector line width in pixels.
pub const DEFAULT_LINE_WIDTH: f64 = 7.0;
/// Side length of the square hit-box that follows the pointer.
pub const DEFAULT_TOUCH_SIZE: f64 = 48.0;
/// Standard animation duration, also used as the release debounce.
pub const DEFAULT_ANIMATION_DURATION_MS: u64 = 300;
/// Height assumed for the bottom transition when the surface is unmeasured.
pub const DEFAULT_DISPLAY_HEIGHT: f64 = 1080.0;
/// How many times an animation request waits for layout before giving up.
pub const DEFAULT_MAX_LAYOUT_RETRIES: u32 = 16;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Unsupported target count {0} (expected 2, 3, 5 or 9)")]
    UnsupportedTargetCount(u8),
    #[error("Radius must be positive, got {0}")]
    InvalidRadius(f64),
    #[error("Line width must not be negative, got {0}")]
    InvalidLineWidth(f64),
    #[error("Touch size must be positive, got {0}")]
    InvalidTouchSize(f64),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    pub const fn light_gray() -> Self {
        Self::new(0xCC, 0xCC, 0xCC, 255)
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Construction-time settings for a pattern view.
///
/// Every field has a default, so a JSON document only needs to name the
/// values it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternConfig {
    /// Number of active targets. Only 2, 3, 5 and 9 are supported; anything
    /// else leaves the widget permanently unlaid-out.
    pub target_count: u8,
    pub circle_color: SerializableColor,
    pub line_color: SerializableColor,
    pub line_width: f64,
    pub radius: f64,
    pub touch_size: f64,
    pub animation: AnimationKind,
    pub animation_duration_ms: u64,
    /// Space between the surface bounds and the outermost targets.
    pub padding: Insets,
    /// Fallback for the bottom transition when the surface height is unknown.
    pub display_height: f64,
    pub max_layout_retries: u32,
    /// Optional image drawn in place of each circle.
    pub stamp: Option<PathBuf>,
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            target_count: DEFAULT_TARGET_COUNT,
            circle_color: SerializableColor::black(),
            line_color: SerializableColor::light_gray(),
            line_width: DEFAULT_LINE_WIDTH,
            radius: DEFAULT_RADIUS,
            touch_size: DEFAULT_TOUCH_SIZE,
            animation: AnimationKind::default(),
            animation_duration_ms: DEFAULT_ANIMATION_DURATION_MS,
            padding: Insets::ZERO,
            display_height: DEFAULT_DISPLAY_HEIGHT,
            max_layout_retries: DEFAULT_MAX_LAYOUT_RETRIES,
            stamp: None,
        }
    }
}

impl PatternConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the geometric settings.
    ///
    /// The target count is not checked here. An unsupported count leaves
    /// the view inert instead.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.radius.is_nan() || self.radius <= 0.0 {
            return Err(ConfigError::InvalidRadius(self.radius));
        }
        if self.line_width.is_nan() || self.line_width < 0.0 {
            return Err(ConfigError::InvalidLineWidth(self.line_width));
        }
        if self.touch_size.is_nan() || self.touch_size <= 0.0 {
            return Err(ConfigError::InvalidTouchSize(self.touch_size));
        }
        Ok(())
    }

    /// Scale the density-independent sizes by a display density.
    pub fn with_density(mut self, density: f64) -> Self {
        self.line_width *= density;
        self.radius *= density;
        self.touch_size *= density;
        self
    }

    pub fn with_target_count(mut self, count: u8) -> Self {
        self.target_count = count;
        self
    }

    pub fn with_animation(mut self, animation: AnimationKind) -> Self {
        self.animation = animation;
        self
    }

    pub fn with_padding(mut self, padding: Insets) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_stamp(mut self, path: impl Into<PathBuf>) -> Self {
        self.stamp = Some(path.into());
        self
    }

    /// Circle diameter in pixels.
    pub fn diameter(&self) -> f64 {
        self.radius * 2.0
    }

    /// Standard animation duration.
    pub fn animation_duration(&self) -> Duration {
        Duration::from_millis(self.animation_duration_ms)
    }

    pub fn circle_color(&self) -> Color {
        self.circle_color.into()
    }

    pub fn line_color(&self) -> Color {
        self.line_color.into()
    }
}
