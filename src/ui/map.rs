//! # Central Map Visualization
//!
//! This module renders the main map view showing:
//! - Network nodes as colored circles (stations, relays, plain endpoints)
//! - The focal vessel's node with a highlight ring
//! - The overlay line: one colored segment per selected link
//!
//! ## Line Resource
//!
//! The overlay configures a `PaintedLine` through the `LineResource` trait
//! (activation, rebuild, width, colors, draw call); this module only paints
//! what that line holds. Segment endpoints come from the overlay's point
//! buffer.
//!
//! ## Projection
//!
//! In 2D mode the map is a top-down view of the x/y plane. With 3D lines
//! enabled an oblique projection shifts points by their height so vertical
//! separation stays visible.

use commnet_overlay::commnet::Position;
use commnet_overlay::overlay::{LineHost, LineResource, LinkColor};
use eframe::egui;
use egui::Color32;

use crate::ui::AppState;

/// Screen offset per unit of height in the oblique projection.
const OBLIQUE_SHIFT: f64 = 0.35;
/// Clicks farther than this (in pixels) from any node select nothing.
const PICK_RADIUS: f32 = 12.0;

/// How a line was last drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Projection {
    TopDown,
    Oblique,
}

impl Projection {
    fn project(self, p: Position) -> (f64, f64) {
        match self {
            Projection::TopDown => (p.x, p.y),
            Projection::Oblique => (p.x + p.z * OBLIQUE_SHIFT, p.y + p.z * OBLIQUE_SHIFT),
        }
    }
}

/// Line resource painted onto the map.
#[derive(Debug)]
pub struct PaintedLine {
    segments: usize,
    colors: Vec<Color32>,
    width: f32,
    active: bool,
    drawn: Option<Projection>,
}

impl PaintedLine {
    fn new() -> Self {
        Self {
            segments: 0,
            colors: Vec::new(),
            width: 1.0,
            active: false,
            drawn: None,
        }
    }

    /// Projection of the last draw call, `None` while inactive or never drawn.
    pub fn visible_as(&self) -> Option<Projection> {
        if self.active { self.drawn } else { None }
    }

    pub fn segment_color(&self, index: usize) -> Color32 {
        self.colors.get(index).copied().unwrap_or(Color32::WHITE)
    }
}

impl LineResource for PaintedLine {
    fn rebuild(&mut self, points: &[Position]) {
        self.segments = points.len() / 2;
        self.colors.resize(self.segments, Color32::WHITE);
    }

    fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    fn set_width(&mut self, width: f32) {
        self.width = width;
    }

    fn set_color(&mut self, color: LinkColor, index: usize) {
        if let Some(slot) = self.colors.get_mut(index) {
            *slot = to_color32(color);
        }
    }

    fn draw(&mut self) {
        self.drawn = Some(Projection::TopDown);
    }

    fn draw_3d(&mut self) {
        self.drawn = Some(Projection::Oblique);
    }
}

/// Creates map lines and holds the 2D/3D toggle.
#[derive(Debug, Default)]
pub struct MapLineHost {
    pub draw_3d: bool,
}

impl LineHost for MapLineHost {
    type Line = PaintedLine;

    fn create_line(&mut self) -> PaintedLine {
        log::debug!("Creating map line");
        PaintedLine::new()
    }

    fn draw_3d_lines(&self) -> bool {
        self.draw_3d
    }
}

/// Convert an overlay color to an egui color.
pub fn to_color32(color: LinkColor) -> Color32 {
    let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color32::from_rgba_unmultiplied(channel(color.r), channel(color.g), channel(color.b), channel(color.a))
}

/// Projected world bounds of all nodes.
#[derive(Debug, Clone, Copy)]
struct WorldBounds {
    min_x: f64,
    max_x: f64,
    min_y: f64,
    max_y: f64,
}

impl WorldBounds {
    fn of(points: impl Iterator<Item = (f64, f64)>) -> Self {
        let mut bounds = WorldBounds {
            min_x: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            min_y: f64::INFINITY,
            max_y: f64::NEG_INFINITY,
        };
        for (x, y) in points {
            bounds.min_x = bounds.min_x.min(x);
            bounds.max_x = bounds.max_x.max(x);
            bounds.min_y = bounds.min_y.min(y);
            bounds.max_y = bounds.max_y.max(y);
        }
        if !bounds.min_x.is_finite() {
            return WorldBounds {
                min_x: 0.0,
                max_x: 1.0,
                min_y: 0.0,
                max_y: 1.0,
            };
        }
        // 10% margin, at least one unit so single points stay centered
        let pad_x = ((bounds.max_x - bounds.min_x) * 0.1).max(1.0);
        let pad_y = ((bounds.max_y - bounds.min_y) * 0.1).max(1.0);
        WorldBounds {
            min_x: bounds.min_x - pad_x,
            max_x: bounds.max_x + pad_x,
            min_y: bounds.min_y - pad_y,
            max_y: bounds.max_y + pad_y,
        }
    }

    fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Map projected world coordinates into `rect`; world y grows upwards.
    fn to_screen(&self, rect: egui::Rect, (x, y): (f64, f64)) -> egui::Pos2 {
        egui::pos2(
            egui::lerp(rect.left()..=rect.right(), ((x - self.min_x) / self.width()) as f32),
            egui::lerp(rect.bottom()..=rect.top(), ((y - self.min_y) / self.height()) as f32),
        )
    }
}

/// Render the central map panel.
///
/// # Parameters
///
/// * `ctx` - egui context for rendering
/// * `state` - Mutable application state for updating the focus
pub fn render(ctx: &egui::Context, state: &mut AppState) {
    egui::CentralPanel::default().show(ctx, |ui| {
        ui.heading("Map");
        ui.separator();

        let Some(network) = state.network.as_ref() else {
            ui.centered_and_justified(|ui| {
                ui.label("Open a scene file to show its network.");
            });
            return;
        };

        let projection = if state.line_host.draw_3d { Projection::Oblique } else { Projection::TopDown };
        let bounds = WorldBounds::of(network.nodes().iter().map(|n| projection.project(n.position)));

        // Fit the map into the available space keeping the world aspect ratio
        let aspect_ratio = (bounds.width() / bounds.height()) as f32;
        let avail_rect = ui.available_rect_before_wrap();
        let (map_width, map_height) = if avail_rect.width() / avail_rect.height() > aspect_ratio {
            (avail_rect.height() * aspect_ratio, avail_rect.height())
        } else {
            (avail_rect.width(), avail_rect.width() / aspect_ratio)
        };
        let rect = egui::Rect::from_center_size(avail_rect.center(), egui::vec2(map_width, map_height));
        let response = ui.interact(rect, egui::Id::new("map_canvas"), egui::Sense::click());
        let painter = ui.painter_at(rect);

        painter.rect_filled(rect, 4.0, ui.visuals().extreme_bg_color);

        draw_overlay_line(&painter, rect, &bounds, state);
        draw_nodes(&painter, rect, &bounds, projection, state);

        if let Some(focus) = pick_vessel(&response, rect, &bounds, projection, state) {
            state.set_focus(focus);
        }
    });
}

/// Paint the overlay line segments in their assigned colors.
fn draw_overlay_line(painter: &egui::Painter, rect: egui::Rect, bounds: &WorldBounds, state: &AppState) {
    let Some(line) = state.overlay.render_sync().line() else {
        return;
    };
    let Some(projection) = line.visible_as() else {
        return;
    };
    let points = state.overlay.render_sync().points();
    for (i, segment) in points.chunks_exact(2).enumerate() {
        let a = bounds.to_screen(rect, projection.project(segment[0]));
        let b = bounds.to_screen(rect, projection.project(segment[1]));
        painter.line_segment([a, b], egui::Stroke::new(line.width, line.segment_color(i)));
    }
}

fn draw_nodes(painter: &egui::Painter, rect: egui::Rect, bounds: &WorldBounds, projection: Projection, state: &AppState) {
    let Some(network) = state.network.as_ref() else {
        return;
    };
    let focal_node = state.active_vessel.and_then(|i| state.vessels.get(i)).and_then(|v| v.node);

    for node in network.nodes() {
        let pos = bounds.to_screen(rect, projection.project(node.position));
        let color = if node.is_home {
            Color32::from_rgb(255, 165, 0)
        } else if node.can_relay {
            Color32::from_rgb(40, 200, 255)
        } else {
            Color32::from_gray(180)
        };
        painter.circle_filled(pos, if node.is_home { 6.0 } else { 4.0 }, color);

        if focal_node == Some(node.id) {
            painter.circle_stroke(pos, 9.0, egui::Stroke::new(2.0, Color32::YELLOW));
        }

        if state.show_node_names {
            painter.text(
                egui::pos2(pos.x + 7.0, pos.y - 7.0),
                egui::Align2::LEFT_BOTTOM,
                &node.name,
                egui::FontId::monospace(12.0),
                color,
            );
        }
    }
}

/// Translate a click into a focus change.
///
/// Clicking a vessel's node focuses that vessel; clicking it again, or
/// clicking away from every node, returns to the tracking station.
///
/// # Returns
///
/// `Some(new_focus)` when the click changes the focus.
fn pick_vessel(
    response: &egui::Response,
    rect: egui::Rect,
    bounds: &WorldBounds,
    projection: Projection,
    state: &AppState,
) -> Option<Option<usize>> {
    if !response.clicked() {
        return None;
    }
    let click_pos = response.interact_pointer_pos()?;
    let network = state.network.as_ref()?;

    let mut best: Option<(usize, f32)> = None;
    for (i, node) in network.nodes().iter().enumerate() {
        let d2 = bounds.to_screen(rect, projection.project(node.position)).distance_sq(click_pos);
        if best.is_none_or(|(_, bd)| d2 < bd) {
            best = Some((i, d2));
        }
    }

    let picked = best
        .filter(|(_, d2)| *d2 <= PICK_RADIUS * PICK_RADIUS)
        .and_then(|(node, _)| state.vessels.iter().position(|v| v.node.map(|n| n.0) == Some(node)));
    let focus = if picked == state.active_vessel { None } else { picked };
    (focus != state.active_vessel).then_some(focus)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_conversion_rounds_channels() {
        assert_eq!(to_color32(LinkColor::new(1.0, 0.0, 0.5, 1.0)), Color32::from_rgba_unmultiplied(255, 0, 128, 255));
    }

    #[test]
    fn painted_line_tracks_draw_calls() {
        let mut line = PaintedLine::new();
        line.rebuild(&[Position::default(); 4]);
        assert_eq!(line.visible_as(), None);
        line.set_active(true);
        line.set_color(LinkColor::new(0.0, 1.0, 0.0, 1.0), 1);
        line.set_color(LinkColor::new(0.0, 1.0, 0.0, 1.0), 7);
        line.draw_3d();
        assert_eq!(line.visible_as(), Some(Projection::Oblique));
        assert_eq!(line.segment_color(1), Color32::from_rgb(0, 255, 0));
        assert_eq!(line.segment_color(0), Color32::WHITE);
        line.set_active(false);
        assert_eq!(line.visible_as(), None);
    }

    #[test]
    fn bounds_fit_single_point() {
        let bounds = WorldBounds::of(std::iter::once((5.0, 5.0)));
        let rect = egui::Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(100.0, 100.0));
        assert_eq!(bounds.to_screen(rect, (5.0, 5.0)), egui::pos2(50.0, 50.0));
    }
}
