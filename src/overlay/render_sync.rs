//! Keeps the host's line resource in step with the selection.
//!
//! The line resource belongs to the host; this module only decides when its
//! geometry has to be rebuilt and pushes width, colors and the draw call.

use super::link_selector::LinkSelection;
use super::signal_color::LinkColor;
use crate::commnet::Position;

/// A drawable polyline of segment pairs owned by the host.
pub trait LineResource {
    /// Replace the geometry. `points` holds two entries per segment.
    fn rebuild(&mut self, points: &[Position]);
    fn set_active(&mut self, active: bool);
    fn set_width(&mut self, width: f32);
    /// Color of segment `index`.
    fn set_color(&mut self, color: LinkColor, index: usize);
    fn draw(&mut self);
    fn draw_3d(&mut self);
}

/// Host facility creating line resources and holding the global draw mode.
pub trait LineHost {
    type Line: LineResource;

    fn create_line(&mut self) -> Self::Line;

    /// Whether lines are currently drawn in 3D.
    fn draw_3d_lines(&self) -> bool;

    /// Map local positions into the host's drawing space, in place.
    fn to_scaled_space(&self, _points: &mut [Position]) {}
}

/// Line widths for the two draw modes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineWidths {
    pub width_2d: f32,
    pub width_3d: f32,
}

impl Default for LineWidths {
    fn default() -> Self {
        Self {
            width_2d: 1.0,
            width_3d: 5.0,
        }
    }
}

impl LineWidths {
    pub fn for_mode(&self, draw_3d: bool) -> f32 {
        if draw_3d { self.width_3d } else { self.width_2d }
    }
}

/// Rebuild bookkeeping for one line resource.
#[derive(Debug)]
pub struct RenderSync<L> {
    line: Option<L>,
    points: Vec<Position>,
    /// Point count of the last rebuild.
    built_points: usize,
    draw_3d: bool,
    rebuild_requested: bool,
    widths: LineWidths,
}

impl<L> Default for RenderSync<L> {
    fn default() -> Self {
        Self::new(LineWidths::default())
    }
}

impl<L> RenderSync<L> {
    pub fn new(widths: LineWidths) -> Self {
        Self {
            line: None,
            points: Vec::new(),
            built_points: 0,
            draw_3d: false,
            rebuild_requested: false,
            widths,
        }
    }

    pub fn line(&self) -> Option<&L> {
        self.line.as_ref()
    }

    /// Points pushed at the last update, in drawing space.
    pub fn points(&self) -> &[Position] {
        &self.points
    }

    pub fn set_widths(&mut self, widths: LineWidths) {
        self.widths = widths;
    }

    /// Force a geometry rebuild on the next update.
    pub fn request_rebuild(&mut self) {
        self.rebuild_requested = true;
    }

    /// Drop the point buffer, so the next non-empty update rebuilds.
    pub fn clear_points(&mut self) {
        self.points.clear();
        self.built_points = 0;
    }
}

impl<L: LineResource> RenderSync<L> {
    /// Push `selection` to the host line.
    ///
    /// `paint` is called with the line after any rebuild and before the
    /// width and draw call, to set segment colors.
    ///
    /// # Returns
    ///
    /// `true` if the geometry was rebuilt.
    pub fn sync<H>(&mut self, host: &mut H, selection: &LinkSelection, paint: impl FnOnce(&mut L)) -> bool
    where
        H: LineHost<Line = L>,
    {
        if selection.is_empty() {
            if let Some(line) = self.line.as_mut() {
                line.set_active(false);
            }
            self.points.clear();
            self.built_points = 0;
            return false;
        }

        selection.write_points(&mut self.points);
        host.to_scaled_space(&mut self.points);

        let host_3d = host.draw_3d_lines();
        let needs_rebuild =
            self.line.is_none() || self.rebuild_requested || host_3d != self.draw_3d || self.points.len() != self.built_points;

        let line = self.line.get_or_insert_with(|| host.create_line());
        line.set_active(true);
        if needs_rebuild {
            log::debug!("Rebuilding line geometry: {} points, 3d={}", self.points.len(), host_3d);
            line.rebuild(&self.points);
            self.rebuild_requested = false;
            self.draw_3d = host_3d;
            self.built_points = self.points.len();
        }

        paint(line);

        line.set_width(self.widths.for_mode(self.draw_3d));
        if self.draw_3d {
            line.draw_3d();
        } else {
            line.draw();
        }
        needs_rebuild
    }
}
