//! Link overlay for a CommNet-style communication network.
//!
//! - `commnet`: the network snapshot the overlay reads (nodes, links, paths, vessels)
//! - `overlay`: display modes, link selection, coloring and line sync
//! - `common`: settings, scene files and error types

pub mod commnet;
pub mod common;
pub mod overlay;

pub use common::error::{PersistenceError, SceneLoadError, SettingsError};
pub use common::settings::OverlaySettings;
pub use overlay::{CommNetOverlay, DisplayMode, ModeContextState};
