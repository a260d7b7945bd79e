//! Recording host doubles for overlay tests.

use std::time::Duration;

use super::mode_controller::NotificationSink;
use super::render_sync::{LineHost, LineResource};
use super::signal_color::LinkColor;
use crate::commnet::Position;

#[derive(Debug, Clone, PartialEq)]
pub enum LineCall {
    Active(bool),
    /// Rebuild with the given number of points.
    Rebuild(usize),
    Width(f32),
    Color(LinkColor, usize),
    Draw,
    Draw3d,
}

#[derive(Debug, Default)]
pub struct RecordingLine {
    pub calls: Vec<LineCall>,
    pub points: Vec<Position>,
}

impl RecordingLine {
    pub fn rebuilds(&self) -> usize {
        self.calls.iter().filter(|c| matches!(c, LineCall::Rebuild(_))).count()
    }

    /// Colors set since the last draw call, in call order.
    pub fn last_colors(&self) -> Vec<(LinkColor, usize)> {
        let start = self
            .calls
            .iter()
            .rposition(|c| matches!(c, LineCall::Draw | LineCall::Draw3d))
            .map(|draw| {
                self.calls[..draw]
                    .iter()
                    .rposition(|c| matches!(c, LineCall::Draw | LineCall::Draw3d))
                    .map_or(0, |prev| prev + 1)
            })
            .unwrap_or(0);
        self.calls[start..]
            .iter()
            .filter_map(|c| match c {
                LineCall::Color(color, index) => Some((*color, *index)),
                _ => None,
            })
            .collect()
    }
}

impl LineResource for RecordingLine {
    fn rebuild(&mut self, points: &[Position]) {
        self.points = points.to_vec();
        self.calls.push(LineCall::Rebuild(points.len()));
    }

    fn set_active(&mut self, active: bool) {
        self.calls.push(LineCall::Active(active));
    }

    fn set_width(&mut self, width: f32) {
        self.calls.push(LineCall::Width(width));
    }

    fn set_color(&mut self, color: LinkColor, index: usize) {
        self.calls.push(LineCall::Color(color, index));
    }

    fn draw(&mut self) {
        self.calls.push(LineCall::Draw);
    }

    fn draw_3d(&mut self) {
        self.calls.push(LineCall::Draw3d);
    }
}

#[derive(Debug)]
pub struct RecordingHost {
    pub created: usize,
    pub draw_3d: bool,
    /// Uniform factor applied by `to_scaled_space`.
    pub scale: f64,
}

impl Default for RecordingHost {
    fn default() -> Self {
        Self {
            created: 0,
            draw_3d: false,
            scale: 1.0,
        }
    }
}

impl LineHost for RecordingHost {
    type Line = RecordingLine;

    fn create_line(&mut self) -> RecordingLine {
        self.created += 1;
        RecordingLine::default()
    }

    fn draw_3d_lines(&self) -> bool {
        self.draw_3d
    }

    fn to_scaled_space(&self, points: &mut [Position]) {
        for p in points {
            p.x *= self.scale;
            p.y *= self.scale;
            p.z *= self.scale;
        }
    }
}

#[derive(Debug, Default)]
pub struct RecordingSink {
    pub posts: Vec<(String, Duration)>,
}

impl RecordingSink {
    pub fn messages(&self) -> Vec<&str> {
        self.posts.iter().map(|(m, _)| m.as_str()).collect()
    }
}

impl NotificationSink for RecordingSink {
    fn post(&mut self, message: &str, duration: Duration) {
        self.posts.push((message.to_string(), duration));
    }
}
