//! One refresh tick of the overlay.
//!
//! Resolves the display mode, selects links, colors them by signal strength
//! and hands the result to the host's line resource.

use super::display_mode::{DisplayMode, ModeIndicator};
use super::link_selector::{LinkSelection, LinkSelector, SelectedLink, has_valid_connection};
use super::mode_controller::{DisplayModeController, ModeContext, ModeContextState, NotificationSink};
use super::render_sync::{LineHost, LineResource, RenderSync};
use super::signal_color::{ColorScheme, LinkColor, paint_order};
use crate::commnet::{CommVessel, Network};
use crate::common::settings::OverlaySettings;

/// Upstream state read during one tick.
pub struct TickInput<'a, V> {
    /// Current network snapshot, `None` before one exists.
    pub network: Option<&'a Network>,
    pub vessels: &'a mut [V],
    /// Index of the focal vessel in `vessels`.
    pub active_vessel: Option<usize>,
}

/// The assembled overlay: controller, selector, colors and line sync.
#[derive(Debug)]
pub struct CommNetOverlay<L> {
    controller: DisplayModeController,
    selector: LinkSelector,
    render_sync: RenderSync<L>,
    colors: ColorScheme,
    last_selection: LinkSelection,
    last_colors: Vec<LinkColor>,
}

impl<L> Default for CommNetOverlay<L> {
    fn default() -> Self {
        Self::new(&OverlaySettings::default())
    }
}

/// Mode context for the given focal vessel.
pub fn context_for<V: CommVessel>(vessels: &[V], active_vessel: Option<usize>) -> ModeContext {
    ModeContext::for_connection(has_valid_connection(active_vessel.and_then(|i| vessels.get(i))))
}

/// Mode context a reset applies to, chosen by focus alone.
pub fn reset_context_for(active_vessel: Option<usize>) -> ModeContext {
    ModeContext::for_focus(active_vessel.is_some())
}

impl<L> CommNetOverlay<L> {
    pub fn new(settings: &OverlaySettings) -> Self {
        Self {
            controller: DisplayModeController::new(settings.notification_duration()),
            selector: LinkSelector::new(),
            render_sync: RenderSync::new(settings.line_widths()),
            colors: settings.color_scheme(),
            last_selection: LinkSelection::default(),
            last_colors: Vec::new(),
        }
    }

    /// Take over new colors, widths and notification duration.
    pub fn apply_settings(&mut self, settings: &OverlaySettings) {
        self.controller = DisplayModeController::new(settings.notification_duration());
        self.render_sync.set_widths(settings.line_widths());
        self.colors = settings.color_scheme();
    }

    pub fn controller(&self) -> &DisplayModeController {
        &self.controller
    }

    pub fn render_sync(&self) -> &RenderSync<L> {
        &self.render_sync
    }

    /// Links drawn at the last tick.
    pub fn selection(&self) -> &LinkSelection {
        &self.last_selection
    }

    /// Colors of the last tick, by link index.
    pub fn colors(&self) -> &[LinkColor] {
        &self.last_colors
    }

    /// Links drawn at the last tick with their colors.
    pub fn selected_links(&self) -> impl Iterator<Item = (&SelectedLink, LinkColor)> + '_ {
        self.last_selection.links.iter().zip(self.last_colors.iter().copied())
    }

    pub fn indicator(state: &ModeContextState) -> ModeIndicator {
        ModeIndicator::for_mode(state.current)
    }

    pub fn request_rebuild(&mut self) {
        self.render_sync.request_rebuild();
    }

    /// Reset the mode of `context` to `None`.
    pub fn reset(&mut self, state: &mut ModeContextState, context: ModeContext, sink: &mut dyn NotificationSink) {
        self.controller.reset(state, context, sink);
        self.render_sync.clear_points();
    }

    /// Step the mode of `context` by `step` positions.
    pub fn switch_mode(
        &mut self,
        state: &mut ModeContextState,
        context: ModeContext,
        step: i32,
        sink: &mut dyn NotificationSink,
    ) -> DisplayMode {
        let mode = self.controller.switch_mode(state, context, step, sink);
        self.render_sync.clear_points();
        mode
    }
}

impl<L: LineResource> CommNetOverlay<L> {
    /// Run one refresh tick.
    ///
    /// Before a network exists nothing is resolved or drawn and the stored
    /// modes are left alone.
    ///
    /// # Returns
    ///
    /// The display mode in effect for this tick.
    pub fn update<V, H>(
        &mut self,
        state: &mut ModeContextState,
        input: TickInput<'_, V>,
        host: &mut H,
        sink: &mut dyn NotificationSink,
    ) -> DisplayMode
    where
        V: CommVessel,
        H: LineHost<Line = L>,
    {
        let Some(network) = input.network else {
            let empty = LinkSelection::empty(state.current);
            self.render_sync.sync(host, &empty, |_| {});
            self.last_selection = empty;
            self.last_colors.clear();
            return state.current;
        };

        let context = context_for(input.vessels, input.active_vessel);
        let mode = self.controller.resolve(state, context, sink);

        let selection = self.selector.select(mode, Some(network), input.vessels, input.active_vessel);
        let colors: Vec<LinkColor> = selection.links.iter().map(|link| self.colors.color(link.strength)).collect();
        let order = paint_order(mode, selection.len());

        self.render_sync.sync(host, &selection, |line| {
            for &index in &order {
                line.set_color(colors[index], index);
            }
        });

        self.last_selection = selection;
        self.last_colors = colors;
        mode
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commnet::{CommNetVessel, ControlState, Link, LinkId, Position};
    use crate::overlay::testing::{LineCall, RecordingHost, RecordingLine, RecordingSink};

    fn red_green() -> OverlaySettings {
        OverlaySettings {
            color_low: LinkColor::RED,
            color_high: LinkColor::GREEN,
            ..Default::default()
        }
    }

    fn tick(
        overlay: &mut CommNetOverlay<RecordingLine>,
        state: &mut ModeContextState,
        net: &Network,
        vessels: &mut [CommNetVessel],
        active: Option<usize>,
        host: &mut RecordingHost,
        sink: &mut RecordingSink,
    ) -> DisplayMode {
        let input = TickInput {
            network: Some(net),
            vessels,
            active_vessel: active,
        };
        overlay.update(state, input, host, sink)
    }

    #[test]
    fn network_colors_are_set_last_link_first() {
        let mut net = Network::new();
        let a = net.add_node("A", Position::new(0.0, 0.0, 0.0), true, true);
        let b = net.add_node("B", Position::new(1.0, 0.0, 0.0), false, true);
        let c = net.add_node("C", Position::new(2.0, 0.0, 0.0), false, true);
        net.connect(Link::new(a, b, 0.2)).unwrap();
        net.connect(Link::new(b, c, 0.9)).unwrap();

        let mut overlay = CommNetOverlay::new(&red_green());
        let mut state = ModeContextState::default();
        let mut host = RecordingHost::default();
        let mut sink = RecordingSink::default();
        let mut vessels: Vec<CommNetVessel> = Vec::new();
        let mode = tick(&mut overlay, &mut state, &net, &mut vessels, None, &mut host, &mut sink);

        assert_eq!(mode, DisplayMode::Network);
        let expected_l1 = LinkColor::RED.lerp(LinkColor::GREEN, 0.2);
        let expected_l2 = LinkColor::RED.lerp(LinkColor::GREEN, 0.9);
        let line = overlay.render_sync().line().unwrap();
        assert_eq!(line.last_colors(), vec![(expected_l2, 1), (expected_l1, 0)]);
        assert_eq!(overlay.colors(), &[expected_l1, expected_l2]);
        assert!(sink.posts.is_empty());
    }

    #[test]
    fn multi_paths_merges_shared_link_once() {
        let p1 = Position::new(1.0, 0.0, 0.0);
        let p2 = Position::new(2.0, 0.0, 0.0);
        let p3 = Position::new(3.0, 0.0, 0.0);
        let mut net = Network::new();
        let a1 = net.add_node("A@P1", p1, false, true);
        let a2 = net.add_node("A@P2", p2, false, true);
        let a3 = net.add_node("A@P3", p3, true, true);
        let b1 = net.add_node("B@P1", p1, false, true);
        let b2 = net.add_node("B@P2", p2, true, true);
        let la12 = net.connect(Link::new(a1, a2, 0.5)).unwrap();
        let la23 = net.connect(Link::new(a2, a3, 0.5)).unwrap();
        let lb12 = net.connect(Link::new(b1, b2, 0.5)).unwrap();

        let mut vessel_a = CommNetVessel::new("A", a1, ControlState::Normal);
        vessel_a.loaded = true;
        vessel_a.control_path = Some([la12, la23].into_iter().collect());
        let mut vessel_b = CommNetVessel::new("B", b1, ControlState::Normal);
        vessel_b.loaded = true;
        vessel_b.control_path = Some([lb12].into_iter().collect());
        let mut vessels = vec![vessel_a, vessel_b];

        let mut overlay = CommNetOverlay::default();
        let mut state = ModeContextState {
            tracking_station: DisplayMode::MultiPaths,
            ..Default::default()
        };
        let mut host = RecordingHost::default();
        let mut sink = RecordingSink::default();
        tick(&mut overlay, &mut state, &net, &mut vessels, None, &mut host, &mut sink);

        let drawn: Vec<LinkId> = overlay.selection().ids().collect();
        assert_eq!(drawn, vec![la12, la23]);
        let line = overlay.render_sync().line().unwrap();
        assert_eq!(line.points, vec![p1, p2, p2, p3]);
    }

    #[test]
    fn disconnected_focus_uses_tracking_station_and_heals_it() {
        let mut net = Network::new();
        let home = net.add_node("KSC", Position::new(0.0, 0.0, 0.0), true, true);
        let probe = net.add_node("Probe", Position::new(1.0, 0.0, 0.0), false, false);
        net.connect(Link::new(probe, home, 0.5)).unwrap();
        let mut vessels = vec![CommNetVessel::without_connection("Flag")];

        let mut overlay = CommNetOverlay::default();
        let mut state = ModeContextState {
            tracking_station: DisplayMode::Path,
            flight_map: DisplayMode::FirstHop,
            current: DisplayMode::Path,
        };
        let mut host = RecordingHost::default();
        let mut sink = RecordingSink::default();
        let mode = tick(&mut overlay, &mut state, &net, &mut vessels, Some(0), &mut host, &mut sink);

        assert_eq!(mode, DisplayMode::Network);
        assert_eq!(state.tracking_station, DisplayMode::Network);
        assert_eq!(state.flight_map, DisplayMode::FirstHop);
        assert_eq!(sink.messages(), vec!["Display mode reset: Network"]);
        assert_eq!(overlay.selection().len(), 1);
    }

    #[test]
    fn connected_focus_uses_flight_map_mode() {
        let mut net = Network::new();
        let home = net.add_node("KSC", Position::new(0.0, 0.0, 0.0), true, true);
        let relay = net.add_node("Relay", Position::new(1.0, 0.0, 0.0), false, true);
        let probe = net.add_node("Probe", Position::new(2.0, 0.0, 0.0), false, false);
        let first = net.connect(Link::new(probe, relay, 0.5)).unwrap();
        net.connect(Link::new(relay, home, 0.5)).unwrap();
        let mut vessel = CommNetVessel::new("Probe", probe, ControlState::Normal);
        vessel.loaded = true;
        vessel.force_recompute(&net);
        let mut vessels = vec![vessel];

        let mut overlay = CommNetOverlay::default();
        let mut state = ModeContextState {
            flight_map: DisplayMode::FirstHop,
            ..Default::default()
        };
        let mut host = RecordingHost::default();
        let mut sink = RecordingSink::default();
        let mode = tick(&mut overlay, &mut state, &net, &mut vessels, Some(0), &mut host, &mut sink);
        assert_eq!(mode, DisplayMode::FirstHop);
        assert_eq!(overlay.selection().ids().collect::<Vec<_>>(), vec![first]);
        assert_eq!(overlay.selected_links().count(), 1);
    }

    #[test]
    fn switch_and_reset_force_a_rebuild() {
        let mut net = Network::new();
        let a = net.add_node("A", Position::new(0.0, 0.0, 0.0), true, true);
        let b = net.add_node("B", Position::new(1.0, 0.0, 0.0), false, true);
        net.connect(Link::new(a, b, 0.5)).unwrap();
        let mut vessels: Vec<CommNetVessel> = Vec::new();

        let mut overlay = CommNetOverlay::default();
        let mut state = ModeContextState::default();
        let mut host = RecordingHost::default();
        let mut sink = RecordingSink::default();
        tick(&mut overlay, &mut state, &net, &mut vessels, None, &mut host, &mut sink);
        tick(&mut overlay, &mut state, &net, &mut vessels, None, &mut host, &mut sink);
        assert_eq!(overlay.render_sync().line().unwrap().rebuilds(), 1);

        // Network -> MultiPaths has nothing to draw without vessels.
        let context = context_for(&vessels, None);
        assert_eq!(overlay.switch_mode(&mut state, context, 1, &mut sink), DisplayMode::MultiPaths);
        tick(&mut overlay, &mut state, &net, &mut vessels, None, &mut host, &mut sink);
        assert_eq!(overlay.render_sync().line().unwrap().calls.last(), Some(&LineCall::Active(false)));

        overlay.switch_mode(&mut state, context, -1, &mut sink);
        tick(&mut overlay, &mut state, &net, &mut vessels, None, &mut host, &mut sink);
        assert_eq!(overlay.render_sync().line().unwrap().rebuilds(), 2);

        overlay.reset(&mut state, context, &mut sink);
        assert_eq!(tick(&mut overlay, &mut state, &net, &mut vessels, None, &mut host, &mut sink), DisplayMode::None);
        assert!(overlay.selection().is_empty());
        assert_eq!(sink.messages().last(), Some(&"Display mode reset: None"));
    }

    #[test]
    fn missing_network_draws_nothing() {
        let mut overlay: CommNetOverlay<RecordingLine> = CommNetOverlay::default();
        let mut host = RecordingHost::default();
        let mut sink = RecordingSink::default();
        let mut vessels: Vec<CommNetVessel> = Vec::new();
        let input = TickInput {
            network: None,
            vessels: &mut vessels,
            active_vessel: None,
        };
        let mut state = ModeContextState {
            tracking_station: DisplayMode::Path,
            ..Default::default()
        };
        overlay.update(&mut state, input, &mut host, &mut sink);
        assert!(overlay.selection().is_empty());
        assert_eq!(host.created, 0);
        assert_eq!(state.tracking_station, DisplayMode::Path);
        assert!(sink.messages().is_empty());
    }

    #[test]
    fn reset_with_unconnected_focus_clears_flight_map_mode() {
        let vessels = vec![CommNetVessel::without_connection("Flag")];
        let mut overlay: CommNetOverlay<RecordingLine> = CommNetOverlay::default();
        let mut state = ModeContextState::default();
        let mut sink = RecordingSink::default();

        assert_eq!(context_for(&vessels, Some(0)), ModeContext::TrackingStation);
        let context = reset_context_for(Some(0));
        assert_eq!(context, ModeContext::FlightMap);
        overlay.reset(&mut state, context, &mut sink);
        assert_eq!(state.flight_map, DisplayMode::None);
        assert_eq!(state.tracking_station, DisplayMode::Network);
        assert_eq!(reset_context_for(None), ModeContext::TrackingStation);
    }

    #[test]
    fn indicator_follows_current_mode() {
        let state = ModeContextState {
            current: DisplayMode::VesselLinks,
            ..Default::default()
        };
        let indicator = CommNetOverlay::<RecordingLine>::indicator(&state);
        assert_eq!(indicator.tooltip, "CommNet: Vessel Links");
    }
}
