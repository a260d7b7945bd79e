//! Signal strength to color mapping.

use serde::{Deserialize, Serialize};

use super::display_mode::DisplayMode;
use crate::commnet::{Link, NodeId};

/// RGBA color with float channels in `0.0..=1.0`.
///
/// Serialized as a `[r, g, b, a]` array.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f32; 4]", into = "[f32; 4]")]
pub struct LinkColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl LinkColor {
    /// Fully transparent. As the high color it disables coloring.
    pub const CLEAR: LinkColor = LinkColor::new(0.0, 0.0, 0.0, 0.0);
    pub const RED: LinkColor = LinkColor::new(1.0, 0.0, 0.0, 1.0);
    pub const GREEN: LinkColor = LinkColor::new(0.0, 1.0, 0.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Per-channel linear interpolation, `t` clamped to `0..=1`.
    pub fn lerp(self, to: LinkColor, t: f32) -> LinkColor {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        LinkColor {
            r: self.r + (to.r - self.r) * t,
            g: self.g + (to.g - self.g) * t,
            b: self.b + (to.b - self.b) * t,
            a: self.a + (to.a - self.a) * t,
        }
    }
}

impl From<[f32; 4]> for LinkColor {
    fn from([r, g, b, a]: [f32; 4]) -> Self {
        Self { r, g, b, a }
    }
}

impl From<LinkColor> for [f32; 4] {
    fn from(c: LinkColor) -> Self {
        [c.r, c.g, c.b, c.a]
    }
}

/// Map a normalized signal strength onto the low..high gradient.
///
/// # Parameters
///
/// * `strength` - Signal strength in `0..=1`
/// * `gamma` - Exponent applied to `strength` before interpolation
/// * `swapped` - Interpolate from `high` toward `low` instead
///
/// # Returns
///
/// `high` unchanged when it is [`LinkColor::CLEAR`], the interpolated color
/// otherwise.
pub fn color_for(strength: f64, low: LinkColor, high: LinkColor, gamma: f32, swapped: bool) -> LinkColor {
    if high == LinkColor::CLEAR {
        return high;
    }
    let level = (strength as f32).powf(gamma);
    if swapped { high.lerp(low, level) } else { low.lerp(high, level) }
}

/// Gradient configuration applied to every selected link.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorScheme {
    pub high: LinkColor,
    pub low: LinkColor,
    pub gamma: f32,
    pub swapped: bool,
}

impl Default for ColorScheme {
    fn default() -> Self {
        crate::common::settings::OverlaySettings::default().color_scheme()
    }
}

impl ColorScheme {
    pub fn color(&self, strength: f64) -> LinkColor {
        color_for(strength, self.low, self.high, self.gamma, self.swapped)
    }
}

/// Strength of `link` as colored in `mode`.
///
/// Vessel links are seen from the focal node: each end counts as relaying
/// unless it is the focal node itself. The network view uses the best
/// signal in any direction; path views use the plain link strength.
pub fn strength_for(mode: DisplayMode, link: &Link, focal: Option<NodeId>) -> f64 {
    match mode {
        DisplayMode::VesselLinks => match focal {
            Some(node) => link.signal_strength_for(link.a != node, link.b != node),
            None => link.signal_strength,
        },
        DisplayMode::Network => link.best_signal(),
        DisplayMode::None | DisplayMode::FirstHop | DisplayMode::Path | DisplayMode::MultiPaths => link.signal_strength,
    }
}

/// Link indices in the order their colors are pushed to the line resource.
///
/// Path-like and network views are colored last-to-first; vessel links
/// first-to-last; a first hop only ever has index 0.
pub fn paint_order(mode: DisplayMode, count: usize) -> Vec<usize> {
    match mode {
        DisplayMode::None => Vec::new(),
        DisplayMode::FirstHop => (0..count.min(1)).collect(),
        DisplayMode::VesselLinks => (0..count).collect(),
        DisplayMode::Path | DisplayMode::Network | DisplayMode::MultiPaths => (0..count).rev().collect(),
    }
}
