//! Display mode state and transitions.
//!
//! Two modes are remembered independently: one for the tracking-station
//! overview (no focal vessel, or a focal vessel without a usable
//! connection) and one for the flight map around a connected vessel.
//! The controller is the only writer of [`ModeContextState`].

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::display_mode::DisplayMode;

/// Which remembered mode applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeContext {
    /// Overview without a connected focal vessel.
    TrackingStation,
    /// Map view around a connected focal vessel.
    FlightMap,
}

impl ModeContext {
    /// Context for a focal vessel with or without a valid connection.
    pub fn for_connection(has_valid_connection: bool) -> Self {
        if has_valid_connection { ModeContext::FlightMap } else { ModeContext::TrackingStation }
    }

    /// Context a reset writes to: the flight map whenever a vessel has focus,
    /// connected or not.
    pub fn for_focus(has_focal_vessel: bool) -> Self {
        if has_focal_vessel { ModeContext::FlightMap } else { ModeContext::TrackingStation }
    }
}

/// Persisted per-context modes plus the mode resolved for the current tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeContextState {
    pub tracking_station: DisplayMode,
    pub flight_map: DisplayMode,
    /// Mode in effect this tick. Not persisted.
    #[serde(skip)]
    pub current: DisplayMode,
}

impl Default for ModeContextState {
    fn default() -> Self {
        Self {
            tracking_station: DisplayMode::Network,
            flight_map: DisplayMode::Path,
            current: DisplayMode::Path,
        }
    }
}

impl ModeContextState {
    pub fn mode_for(&self, context: ModeContext) -> DisplayMode {
        match context {
            ModeContext::TrackingStation => self.tracking_station,
            ModeContext::FlightMap => self.flight_map,
        }
    }

    fn slot_mut(&mut self, context: ModeContext) -> &mut DisplayMode {
        match context {
            ModeContext::TrackingStation => &mut self.tracking_station,
            ModeContext::FlightMap => &mut self.flight_map,
        }
    }
}

/// Receives short-lived on-screen messages.
pub trait NotificationSink {
    fn post(&mut self, message: &str, duration: Duration);
}

impl<F> NotificationSink for F
where
    F: FnMut(&str, Duration),
{
    fn post(&mut self, message: &str, duration: Duration) {
        self(message, duration)
    }
}

/// Applies mode changes and announces them.
#[derive(Debug, Clone)]
pub struct DisplayModeController {
    notification_duration: Duration,
}

impl Default for DisplayModeController {
    fn default() -> Self {
        Self::new(Duration::from_secs(5))
    }
}

impl DisplayModeController {
    pub fn new(notification_duration: Duration) -> Self {
        Self { notification_duration }
    }

    pub fn notification_duration(&self) -> Duration {
        self.notification_duration
    }

    /// Set the context's mode to `None`.
    pub fn reset(&self, state: &mut ModeContextState, context: ModeContext, sink: &mut dyn NotificationSink) {
        state.current = DisplayMode::None;
        *state.slot_mut(context) = DisplayMode::None;
        log::info!("Display mode reset ({:?})", context);
        self.announce_reset(DisplayMode::None, sink);
    }

    /// Step the current mode by `step` positions (wrapping) and apply it to
    /// `context` through [`Self::clamp_and_set`].
    pub fn switch_mode(
        &self,
        state: &mut ModeContextState,
        context: ModeContext,
        step: i32,
        sink: &mut dyn NotificationSink,
    ) -> DisplayMode {
        let requested = state.current.stepped(step);
        self.clamp_and_set(state, context, requested, context == ModeContext::FlightMap, sink)
    }

    /// Store `requested` for `context`, replacing it when it needs a
    /// connection that is not there.
    ///
    /// The replacement is `None`, unless the context already was at `None`,
    /// in which case it is `Network`. Either way the rejected mode is never
    /// stored.
    ///
    /// # Returns
    ///
    /// The mode actually stored.
    pub fn clamp_and_set(
        &self,
        state: &mut ModeContextState,
        context: ModeContext,
        requested: DisplayMode,
        has_valid_connection: bool,
        sink: &mut dyn NotificationSink,
    ) -> DisplayMode {
        let slot = state.slot_mut(context);
        let mut mode = requested;
        if !has_valid_connection && !mode.is_valid_without_connection() {
            mode = if *slot != DisplayMode::None { DisplayMode::None } else { DisplayMode::Network };
            log::info!("{:?} needs a connection, using {:?}", requested, mode);
        }
        *slot = mode;
        state.current = mode;
        log::info!("Display mode set to {:?} ({:?})", mode, context);
        sink.post(&format!("Display mode: {}", mode.label()), self.notification_duration);
        mode
    }

    /// Resolve the mode in effect for this tick and store it as current.
    ///
    /// The tracking-station mode is corrected to `Network` whenever it is not
    /// usable without a connection. The flight-map mode is taken as stored.
    pub fn resolve(&self, state: &mut ModeContextState, context: ModeContext, sink: &mut dyn NotificationSink) -> DisplayMode {
        match context {
            ModeContext::TrackingStation => {
                if !state.tracking_station.is_valid_without_connection() {
                    log::warn!("Tracking station mode {:?} needs a connection, resetting to Network", state.tracking_station);
                    state.tracking_station = DisplayMode::Network;
                    self.announce_reset(DisplayMode::Network, sink);
                }
                state.current = state.tracking_station;
            }
            ModeContext::FlightMap => state.current = state.flight_map,
        }
        state.current
    }

    fn announce_reset(&self, mode: DisplayMode, sink: &mut dyn NotificationSink) {
        sink.post(&format!("Display mode reset: {}", mode.label()), self.notification_duration);
    }
}
