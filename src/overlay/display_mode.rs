//! Display modes of the overlay.
//!
//! Modes are ordered and cyclic; stepping past the last one wraps around to
//! `None`. Each mode has a human-readable label kept in a single table.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::common::error::UnknownDisplayMode;

/// Selection policy governing which links are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DisplayMode {
    #[default]
    None,
    /// First link of the focal vessel's control path.
    FirstHop,
    /// The focal vessel's whole control path.
    Path,
    /// Every link incident to the focal vessel's node.
    VesselLinks,
    /// Every link in the network.
    Network,
    /// Deduplicated union of all vessels' control paths.
    MultiPaths,
}

const LABELS: [&str; DisplayMode::COUNT] = ["None", "First Hop", "Path", "Vessel Links", "Network", "Multiple Paths"];

const NAMES: [&str; DisplayMode::COUNT] = ["None", "FirstHop", "Path", "VesselLinks", "Network", "MultiPaths"];

impl DisplayMode {
    pub const COUNT: usize = 6;

    pub const ALL: [DisplayMode; Self::COUNT] = [
        DisplayMode::None,
        DisplayMode::FirstHop,
        DisplayMode::Path,
        DisplayMode::VesselLinks,
        DisplayMode::Network,
        DisplayMode::MultiPaths,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// The mode `step` positions away, wrapping modulo [`Self::COUNT`].
    pub fn stepped(self, step: i32) -> Self {
        let count = Self::COUNT as i64;
        let index = (self.index() as i64 + step as i64).rem_euclid(count);
        Self::ALL[index as usize]
    }

    /// Text shown to the user.
    pub fn label(self) -> &'static str {
        LABELS[self.index()]
    }

    /// Identifier used in persisted values.
    pub fn name(self) -> &'static str {
        NAMES[self.index()]
    }

    /// Whether the mode makes sense without a focal vessel connection.
    pub fn is_valid_without_connection(self) -> bool {
        matches!(self, DisplayMode::None | DisplayMode::Network | DisplayMode::MultiPaths)
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Accepts the exact variant name or an in-range decimal index.
impl FromStr for DisplayMode {
    type Err = UnknownDisplayMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Some(pos) = NAMES.iter().position(|name| *name == trimmed) {
            return Ok(Self::ALL[pos]);
        }
        trimmed
            .parse::<usize>()
            .ok()
            .and_then(Self::from_index)
            .ok_or_else(|| UnknownDisplayMode(s.to_string()))
    }
}

/// What the host's mode button should show for a mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeIndicator {
    pub tooltip: String,
    /// State-image indices to apply to the button, in order.
    pub state_images: Vec<usize>,
}

impl ModeIndicator {
    pub fn for_mode(mode: DisplayMode) -> Self {
        // The multi-path image is an overlay on top of the network image.
        let state_images = match mode {
            DisplayMode::MultiPaths => vec![DisplayMode::Network.index(), mode.index()],
            _ => vec![mode.index()],
        };
        Self {
            tooltip: format!("CommNet: {}", mode.label()),
            state_images,
        }
    }
}
