// UI module for the CommNet overlay viewer
//
// This module organizes the UI into separate components:
// - `top_panel`: Focus selection and display mode controls
// - `right_panel`: Inspector listing the links currently drawn
// - `map`: Central map with nodes and the overlay line
// - `app_state`: Application state management and main update loop

pub mod app_state;
pub mod map;
pub mod right_panel;
pub mod top_panel;

use commnet_overlay::overlay::NotificationSink;
use std::time::{Duration, Instant};

pub use app_state::AppState;

/// On-screen messages posted by the overlay, each shown until it expires.
#[derive(Debug, Default)]
pub struct ScreenMessages {
    messages: Vec<(String, Instant)>,
}

impl ScreenMessages {
    /// Drop expired messages.
    pub fn expire(&mut self, now: Instant) {
        self.messages.retain(|(_, expiry)| *expiry > now);
    }

    /// Newest message still on screen.
    pub fn current(&self) -> Option<&str> {
        self.messages.last().map(|(text, _)| text.as_str())
    }

    /// Time until the next message expires.
    pub fn next_expiry(&self, now: Instant) -> Option<Duration> {
        self.messages.iter().map(|(_, expiry)| expiry.saturating_duration_since(now)).min()
    }
}

impl NotificationSink for ScreenMessages {
    fn post(&mut self, message: &str, duration: Duration) {
        log::info!("{}", message);
        self.messages.push((message.to_string(), Instant::now() + duration));
    }
}
