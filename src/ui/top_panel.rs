//! # Top Panel - Focus and Display Mode Controls
//!
//! This module renders the fixed-height top panel with three columns:
//! - Column 1: Scene file and focus selection (tracking station or a vessel)
//! - Column 2: Display mode controls (previous, next, reset, 3D lines)
//! - Column 3: Mode indicator and the latest on-screen notification

use commnet_overlay::commnet::CommVessel;
use commnet_overlay::overlay::{CommNetOverlay, ModeContext, ModeIndicator};
use eframe::egui;
use egui::Color32;

use crate::ui::AppState;
use crate::ui::map::PaintedLine;

const TRACKING_STATION_LABEL: &str = "Tracking station";

/// Render the top panel.
///
/// # Parameters
///
/// * `ctx` - egui context
/// * `state` - Mutable application state for reading and updating controls
pub fn render(ctx: &egui::Context, state: &mut AppState) {
    egui::TopBottomPanel::top("top_controls").exact_height(120.0).show(ctx, |ui| {
        ui.columns(3, |cols| {
            cols[0].vertical(|ui| {
                render_scene_and_focus(ui, state);
            });
            cols[1].vertical(|ui| {
                render_mode_controls(ui, state);
            });
            cols[2].vertical(|ui| {
                render_indicator(ui, state);
            });
        });
    });
}

fn render_scene_and_focus(ui: &mut egui::Ui, state: &mut AppState) {
    ui.heading("Scene");
    ui.separator();
    ui.horizontal(|ui| {
        if ui.button("Open scene...").clicked() {
            state.open_file_selector();
        }
        let name = state
            .scene_path
            .as_ref()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "-".to_string());
        ui.label(egui::RichText::new(name).monospace().strong());
    });

    let selected_text = state
        .active_vessel
        .and_then(|i| state.vessels.get(i))
        .map(|v| v.name().to_string())
        .unwrap_or_else(|| TRACKING_STATION_LABEL.to_string());

    let mut focus = state.active_vessel;
    ui.horizontal(|ui| {
        ui.label("Focus:");
        egui::ComboBox::from_id_salt("focus_selector").selected_text(selected_text).show_ui(ui, |ui| {
            ui.selectable_value(&mut focus, None, TRACKING_STATION_LABEL);
            for (i, vessel) in state.vessels.iter().enumerate() {
                let label = if vessel.is_connected() {
                    vessel.name().to_string()
                } else {
                    format!("{} (no connection)", vessel.name())
                };
                ui.selectable_value(&mut focus, Some(i), label);
            }
        });
    });
    if focus != state.active_vessel {
        state.set_focus(focus);
    }

    ui.checkbox(&mut state.show_node_names, "Show node names");
}

fn render_mode_controls(ui: &mut egui::Ui, state: &mut AppState) {
    ui.heading("Display Mode");
    ui.separator();

    ui.horizontal(|ui| {
        if ui.button("◀ Previous").clicked() {
            state.switch_mode(-1);
            ui.ctx().request_repaint();
        }
        if ui.button("Next ▶").clicked() {
            state.switch_mode(1);
            ui.ctx().request_repaint();
        }
        if ui.button("Reset").clicked() {
            state.reset_mode();
            ui.ctx().request_repaint();
        }
    });

    if ui.checkbox(&mut state.line_host.draw_3d, "3D lines").changed() {
        ui.ctx().request_repaint();
    }

    let context = match state.mode_context() {
        ModeContext::TrackingStation => "tracking station",
        ModeContext::FlightMap => "flight map",
    };
    ui.horizontal(|ui| {
        ui.label("Context:");
        ui.label(egui::RichText::new(context).strong());
    });
}

fn render_indicator(ui: &mut egui::Ui, state: &AppState) {
    let indicator: ModeIndicator = CommNetOverlay::<PaintedLine>::indicator(&state.mode_state);

    ui.heading("Overlay");
    ui.separator();
    ui.horizontal(|ui| {
        ui.label("Mode:");
        ui.label(egui::RichText::new(state.mode_state.current.label()).strong().color(Color32::from_rgb(0, 128, 255)))
            .on_hover_text(indicator.tooltip.as_str());
        let images: Vec<String> = indicator.state_images.iter().map(|i| i.to_string()).collect();
        ui.label(egui::RichText::new(format!("[{}]", images.join(","))).monospace().weak());
    });
    ui.horizontal(|ui| {
        ui.label("Links drawn:");
        ui.label(egui::RichText::new(state.overlay.selection().len().to_string()).strong());
    });
    if let Some(message) = state.messages.current() {
        ui.label(egui::RichText::new(message).color(Color32::YELLOW));
    }
}
