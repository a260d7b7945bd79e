//! CommNet link overlay.
//!
//! Every refresh tick the overlay resolves the display mode for the current
//! context, selects the links that mode shows, colors them by signal
//! strength and pushes the result to a host-owned line resource.

pub mod display_mode;
pub mod link_selector;
pub mod mode_controller;
pub mod path_aggregator;
pub mod persistence;
pub mod pipeline;
pub mod render_sync;
pub mod signal_color;

#[cfg(test)]
pub(crate) mod testing;

pub use display_mode::{DisplayMode, ModeIndicator};
pub use link_selector::{LinkSelection, LinkSelector, SelectedLink};
pub use mode_controller::{DisplayModeController, ModeContext, ModeContextState, NotificationSink};
pub use path_aggregator::PathAggregator;
pub use persistence::{ConfigNode, ConfigValue};
pub use pipeline::{CommNetOverlay, TickInput, context_for, reset_context_for};
pub use render_sync::{LineHost, LineResource, LineWidths, RenderSync};
pub use signal_color::{ColorScheme, LinkColor, color_for};
