//! Saving and restoring the remembered display modes.
//!
//! The host provides a flat container of name/value pairs. Two values are
//! written, one per mode context, holding the display mode name.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::display_mode::DisplayMode;
use super::mode_controller::ModeContextState;
use crate::common::error::PersistenceError;

pub const DISPLAY_MODE_TRACKING: &str = "DisplayModeTracking";
pub const DISPLAY_MODE_FLIGHT: &str = "DisplayModeFlight";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigValue {
    pub name: String,
    pub value: String,
}

/// Ordered name/value container. Names may repeat.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigNode {
    pub values: Vec<ConfigValue>,
}

impl ConfigNode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_value(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.push(ConfigValue {
            name: name.into(),
            value: value.into(),
        });
    }

    /// Value of the last entry named `name`.
    pub fn get_value(&self, name: &str) -> Option<&str> {
        self.values.iter().rev().find(|v| v.name == name).map(|v| v.value.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl fmt::Display for ConfigNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for value in &self.values {
            write!(f, " {} = {};", value.name, value.value)?;
        }
        write!(f, " }}")
    }
}

impl ModeContextState {
    /// Write both remembered modes into `node`.
    pub fn save(&self, node: &mut ConfigNode) {
        node.add_value(DISPLAY_MODE_TRACKING, self.tracking_station.name());
        node.add_value(DISPLAY_MODE_FLIGHT, self.flight_map.name());
        log::info!("Saved display modes: {}", node);
    }

    /// Restore both remembered modes from `node`.
    ///
    /// Missing values keep the defaults (`Network` for the tracking station,
    /// `Path` for the flight map); unrelated values are ignored. A value that
    /// names no display mode is an error.
    pub fn load(node: &ConfigNode) -> Result<Self, PersistenceError> {
        log::info!("Loading display modes: {}", node);
        let mut state = Self::default();
        for entry in &node.values {
            let slot = match entry.name.as_str() {
                DISPLAY_MODE_TRACKING => &mut state.tracking_station,
                DISPLAY_MODE_FLIGHT => &mut state.flight_map,
                _ => continue,
            };
            *slot = entry.value.parse::<DisplayMode>().map_err(|_| PersistenceError::InvalidDisplayMode {
                key: entry.name.clone(),
                value: entry.value.clone(),
            })?;
        }
        Ok(state)
    }
}
