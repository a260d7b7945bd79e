//! # Application State Management
//!
//! This module implements the central `AppState` struct which owns the loaded
//! network scene, the overlay pipeline and everything the panels need. It
//! implements the `eframe::App` trait to integrate with the egui application
//! framework.
//!
//! ## Responsibilities
//!
//! - Loads scene files and the overlay settings next to them
//! - Runs one overlay refresh tick per frame before the panels are drawn
//! - Tracks the focal vessel (the one "in flight") and keeps its path fresh
//! - Persists the remembered display modes and the last directory across sessions

use anyhow::Context;
use eframe::egui;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Instant;

use commnet_overlay::commnet::{CommNetVessel, CommVessel, Network};
use commnet_overlay::common::scene::load_scene;
use commnet_overlay::overlay::{
    CommNetOverlay, ConfigNode, ModeContext, ModeContextState, TickInput, context_for, reset_context_for,
};
use commnet_overlay::OverlaySettings;

use super::ScreenMessages;
use super::map::{MapLineHost, PaintedLine};

/// Central application state.
///
/// The UI is rebuilt every frame (immediate mode); this struct carries what
/// survives between frames.
pub struct AppState {
    /// Optional alert message to display in a modal dialog.
    pub alert: Option<String>,
    /// Scene file currently shown.
    pub scene_path: Option<PathBuf>,
    /// Network snapshot of the loaded scene.
    pub network: Option<Network>,
    /// Vessel-like entities of the loaded scene.
    pub vessels: Vec<CommNetVessel>,
    /// Index of the focal vessel in `vessels`; `None` is the tracking station.
    pub active_vessel: Option<usize>,
    pub mode_state: ModeContextState,
    pub overlay: CommNetOverlay<PaintedLine>,
    pub line_host: MapLineHost,
    pub messages: ScreenMessages,
    pub settings: OverlaySettings,
    /// Whether to display node names on the map.
    pub show_node_names: bool,
    /// Last directory used for the scene file picker.
    pub last_open_dir: Option<String>,
    /// Width of the right inspector panel in pixels.
    pub right_panel_width: f32,
}

/// Settings persisted across application sessions.
#[derive(Default, Serialize, Deserialize)]
struct PersistedSettings {
    last_open_dir: Option<String>,
    display_modes: Option<ConfigNode>,
    right_panel_width: Option<f32>,
}

impl AppState {
    /// Create a new AppState, restoring persisted settings if available.
    ///
    /// # Parameters
    ///
    /// * `storage` - Optional persistent storage for loading saved settings
    /// * `scene_path` - Scene to open right away, if given on the command line
    pub fn new(storage: Option<&dyn eframe::Storage>, scene_path: Option<PathBuf>) -> Self {
        let persisted: PersistedSettings = storage.and_then(|s| eframe::get_value(s, "app_settings")).unwrap_or_default();

        let mut alert = None;
        let mode_state = match persisted.display_modes.as_ref().map(ModeContextState::load) {
            Some(Ok(state)) => state,
            Some(Err(e)) => {
                log::error!("Failed to restore display modes: {}", e);
                alert = Some(format!("Failed to restore display modes: {}", e));
                ModeContextState::default()
            }
            None => ModeContextState::default(),
        };

        let settings = OverlaySettings::default();
        let mut state = Self {
            alert,
            scene_path: None,
            network: None,
            vessels: Vec::new(),
            active_vessel: None,
            mode_state,
            overlay: CommNetOverlay::new(&settings),
            line_host: MapLineHost::default(),
            messages: ScreenMessages::default(),
            settings,
            show_node_names: true,
            last_open_dir: persisted.last_open_dir,
            right_panel_width: persisted.right_panel_width.unwrap_or(420.0),
        };

        if let Some(path) = scene_path {
            state.open_scene(&path);
        }
        state
    }

    /// Open a scene, reporting failures through the alert dialog.
    pub fn open_scene(&mut self, path: &Path) {
        if let Err(e) = self.load_scene(path) {
            log::error!("{:#}", e);
            self.alert = Some(format!("{:#}", e));
        }
    }

    fn load_scene(&mut self, path: &Path) -> anyhow::Result<()> {
        let scene = load_scene(&path.to_string_lossy()).with_context(|| format!("Failed to load scene {}", path.display()))?;
        let settings_path = OverlaySettings::path_next_to(path);
        let settings = OverlaySettings::load_or_default(&settings_path)
            .with_context(|| format!("Failed to load settings {}", settings_path.display()))?;

        let (network, vessels) = scene.build();
        log::info!(
            "Loaded scene {}: {} nodes, {} links, {} vessels",
            path.display(),
            network.nodes().len(),
            network.link_count(),
            vessels.len()
        );

        self.overlay.apply_settings(&settings);
        self.overlay.request_rebuild();
        self.settings = settings;
        self.network = Some(network);
        self.vessels = vessels;
        self.scene_path = Some(path.to_path_buf());
        self.set_focus(None);
        Ok(())
    }

    /// Open a native file picker for a scene JSON file.
    pub fn open_file_selector(&mut self) {
        let mut dialog = rfd::FileDialog::new().add_filter("Scene files", &["json"]);
        if let Some(dir) = &self.last_open_dir {
            dialog = dialog.set_directory(dir);
        }
        if let Some(file) = dialog.pick_file() {
            // Remember directory for next time
            if let Some(parent) = file.parent() {
                self.last_open_dir = Some(parent.to_string_lossy().to_string());
            }
            self.open_scene(&file);
        }
    }

    /// Focus a vessel, or the tracking station with `None`.
    ///
    /// Only the focal vessel is loaded; its control path is recomputed here
    /// while the others keep whatever path they last had.
    pub fn set_focus(&mut self, focus: Option<usize>) {
        self.active_vessel = focus.filter(|&i| i < self.vessels.len());
        for (i, vessel) in self.vessels.iter_mut().enumerate() {
            vessel.loaded = Some(i) == self.active_vessel;
        }
        if let (Some(i), Some(network)) = (self.active_vessel, self.network.as_ref()) {
            self.vessels[i].force_recompute(network);
            log::info!("Focused {}", self.vessels[i].name());
        }
    }

    /// Mode context the controls act on.
    pub fn mode_context(&self) -> ModeContext {
        context_for(&self.vessels, self.active_vessel)
    }

    pub fn switch_mode(&mut self, step: i32) {
        let context = self.mode_context();
        self.overlay.switch_mode(&mut self.mode_state, context, step, &mut self.messages);
    }

    pub fn reset_mode(&mut self) {
        let context = reset_context_for(self.active_vessel);
        self.overlay.reset(&mut self.mode_state, context, &mut self.messages);
    }

    /// Run one overlay refresh tick.
    fn tick(&mut self) {
        let input = TickInput {
            network: self.network.as_ref(),
            vessels: &mut self.vessels,
            active_vessel: self.active_vessel,
        };
        self.overlay.update(&mut self.mode_state, input, &mut self.line_host, &mut self.messages);
    }
}

impl eframe::App for AppState {
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        let mut display_modes = ConfigNode::new();
        self.mode_state.save(&mut display_modes);
        let settings = PersistedSettings {
            last_open_dir: self.last_open_dir.clone(),
            display_modes: Some(display_modes),
            right_panel_width: Some(self.right_panel_width),
        };
        eframe::set_value(storage, "app_settings", &settings);
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        self.messages.expire(now);
        self.tick();

        // Repaint when the next notification goes away
        if let Some(remaining) = self.messages.next_expiry(now) {
            ctx.request_repaint_after(remaining);
        }

        if let Some(alert) = self.alert.clone() {
            egui::Window::new("Alert")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
                .show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(20.0);
                        ui.label(alert);
                        ui.add_space(20.0);

                        if ui.button("OK").clicked() {
                            self.alert = None;
                        }
                        ui.add_space(10.0);
                    });
                });
        }

        // Panels layout: top (fixed), right (fixed), map fills the remaining using CentralPanel
        super::top_panel::render(ctx, self);
        super::right_panel::render(ctx, self);
        super::map::render(ctx, self);
    }
}
