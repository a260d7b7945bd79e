//! # Right Panel - Link Inspector
//!
//! This module renders the right panel listing the links the overlay drew at
//! the last refresh tick, in selection order.
//!
//! ## Link Table
//!
//! The table uses `egui_extras::TableBuilder` for virtualized rendering, so
//! full-network views with thousands of links scroll smoothly. Each row shows
//! the link's endpoints, the strength used for coloring and a swatch of the
//! color the overlay assigned.

use commnet_overlay::commnet::{CommVessel, LinkId, Network};
use eframe::egui;
use egui::Color32;

use crate::ui::AppState;
use crate::ui::map::to_color32;

/// Render the right inspector panel.
///
/// # Parameters
///
/// * `ctx` - egui context
/// * `state` - Mutable application state (panel width is remembered)
pub fn render(ctx: &egui::Context, state: &mut AppState) {
    let response = egui::SidePanel::right("inspector_right")
        .resizable(true)
        .default_width(state.right_panel_width)
        .show(ctx, |ui| {
            ui.heading("Inspector");
            ui.separator();

            let focus = state
                .active_vessel
                .and_then(|i| state.vessels.get(i))
                .map(|v| v.name().to_string())
                .unwrap_or_else(|| "Tracking station".to_string());
            ui.horizontal(|ui| {
                ui.label("Focus:");
                ui.label(egui::RichText::new(focus).strong().color(Color32::from_rgb(0, 128, 255)));
            });
            ui.horizontal(|ui| {
                ui.label("Mode:");
                ui.label(egui::RichText::new(state.overlay.selection().mode.label()).strong());
                ui.label("Links:");
                ui.label(egui::RichText::new(state.overlay.selection().len().to_string()).strong());
            });
            ui.separator();

            match state.network.as_ref() {
                Some(network) if !state.overlay.selection().is_empty() => render_link_table(ui, state, network),
                _ => {
                    ui.centered_and_justified(|ui| {
                        ui.label("No links drawn in this mode.");
                    });
                }
            }
        });
    state.right_panel_width = response.response.rect.width();
}

/// Names of both ends of a link, `a - b`.
fn link_label(network: &Network, id: LinkId) -> String {
    let name = |node| network.node(node).map_or("?", |n| n.name.as_str());
    match network.link(id) {
        Some(link) => format!("{} - {}", name(link.a), name(link.b)),
        None => format!("link {}", id.0),
    }
}

/// Render the virtualized table of drawn links.
fn render_link_table(ui: &mut egui::Ui, state: &AppState, network: &Network) {
    use egui_extras::{Column, TableBuilder};

    let rows: Vec<_> = state.overlay.selected_links().collect();
    let row_height = ui.text_style_height(&egui::TextStyle::Body) * 1.3;
    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .vscroll(true)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .column(Column::initial(40.0).at_least(30.0)) // Index
        .column(Column::remainder()) // Endpoints
        .column(Column::initial(70.0).at_least(50.0)) // Strength
        .column(Column::initial(50.0).at_least(30.0)) // Color
        .header(row_height, |mut header| {
            header.col(|ui| {
                ui.strong("#");
            });
            header.col(|ui| {
                ui.strong("Link");
            });
            header.col(|ui| {
                ui.strong("Strength");
            });
            header.col(|ui| {
                ui.strong("Color");
            });
        })
        .body(|body| {
            body.rows(row_height, rows.len(), |mut row| {
                let (link, color) = rows[row.index()];
                let index = row.index();
                row.col(|ui| {
                    ui.label(index.to_string());
                });
                row.col(|ui| {
                    ui.label(link_label(network, link.id));
                });
                row.col(|ui| {
                    ui.label(egui::RichText::new(format!("{:.3}", link.strength)).monospace());
                });
                row.col(|ui| {
                    let (rect, _) = ui.allocate_exact_size(egui::vec2(30.0, row_height * 0.6), egui::Sense::hover());
                    ui.painter().rect_filled(rect, 2.0, to_color32(color));
                });
            });
        });
}
