//! Overlay settings loaded from TOML.
//!
//! Example `overlay.toml`:
//!
//! ```toml
//! color-high = [0.43, 0.81, 0.96, 1.0]
//! color-low = [0.9, 0.2, 0.2, 1.0]
//! color-lerp-power = 2.0
//! swap-high-low = false
//! line-width-2d = 1.0
//! line-width-3d = 5.0
//! notification-seconds = 5.0
//! ```
//!
//! Every key is optional.

use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use super::error::SettingsError;
use crate::overlay::render_sync::LineWidths;
use crate::overlay::signal_color::{ColorScheme, LinkColor};

/// Longest on-screen time accepted for mode-change messages.
pub const MAX_NOTIFICATION_SECONDS: f32 = 3600.0;

/// Name of the settings file looked up next to a scene file.
pub const SETTINGS_FILE_NAME: &str = "overlay.toml";

/// Colors, curve and line widths of the overlay.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct OverlaySettings {
    /// Color of a full-strength link. Fully transparent disables coloring.
    pub color_high: LinkColor,
    /// Color of a zero-strength link.
    pub color_low: LinkColor,
    /// Exponent applied to the strength before interpolation.
    pub color_lerp_power: f32,
    /// Interpolate from high toward low instead.
    pub swap_high_low: bool,
    pub line_width_2d: f32,
    pub line_width_3d: f32,
    /// How long a mode-change message stays on screen.
    pub notification_seconds: f32,
}

impl Default for OverlaySettings {
    fn default() -> Self {
        Self {
            color_high: LinkColor::new(0.43, 0.81, 0.96, 1.0),
            color_low: LinkColor::new(0.9, 0.2, 0.2, 1.0),
            color_lerp_power: 1.0,
            swap_high_low: false,
            line_width_2d: 1.0,
            line_width_3d: 5.0,
            notification_seconds: 5.0,
        }
    }
}

impl OverlaySettings {
    /// Parse and validate settings from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, SettingsError> {
        let settings: Self = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a TOML file.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Load settings from `path`, using defaults when the file does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, SettingsError> {
        if !path.exists() {
            log::info!("No overlay settings at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let settings = Self::load(path)?;
        log::info!("Loaded overlay settings from {}", path.display());
        Ok(settings)
    }

    /// Derive the settings path from a scene file path.
    pub fn path_next_to(scene_path: &Path) -> std::path::PathBuf {
        scene_path.parent().unwrap_or(Path::new(".")).join(SETTINGS_FILE_NAME)
    }

    fn validate(&self) -> Result<(), SettingsError> {
        if !(self.color_lerp_power.is_finite() && self.color_lerp_power > 0.0) {
            return Err(SettingsError::Validation(format!(
                "color-lerp-power must be a positive number, got {}",
                self.color_lerp_power
            )));
        }
        for (name, width) in [("line-width-2d", self.line_width_2d), ("line-width-3d", self.line_width_3d)] {
            if !(width.is_finite() && width >= 0.0) {
                return Err(SettingsError::Validation(format!("{} must be non-negative, got {}", name, width)));
            }
        }
        if !(0.0..=MAX_NOTIFICATION_SECONDS).contains(&self.notification_seconds) {
            return Err(SettingsError::Validation(format!(
                "notification-seconds must be between 0 and {}, got {}",
                MAX_NOTIFICATION_SECONDS, self.notification_seconds
            )));
        }
        Ok(())
    }

    pub fn color_scheme(&self) -> ColorScheme {
        ColorScheme {
            high: self.color_high,
            low: self.color_low,
            gamma: self.color_lerp_power,
            swapped: self.swap_high_low,
        }
    }

    pub fn line_widths(&self) -> LineWidths {
        LineWidths {
            width_2d: self.line_width_2d,
            width_3d: self.line_width_3d,
        }
    }

    /// On-screen time of mode-change messages, clamped to
    /// [`MAX_NOTIFICATION_SECONDS`] for settings built without validation.
    pub fn notification_duration(&self) -> Duration {
        Duration::try_from_secs_f32(self.notification_seconds.min(MAX_NOTIFICATION_SECONDS)).unwrap_or(Duration::ZERO)
    }
}
