use egui::{Color32, Pos2};

use super::{Damage, Drawable};
use crate::surface::Surface;

/// A freehand polyline with width and color fixed at creation time.
#[derive(Debug, Clone)]
pub struct Stroke {
    points: Vec<Pos2>,
    line_width: f32,
    color: Color32,
}

impl Stroke {
    pub fn new(start: Pos2, line_width: f32, color: Color32) -> Self {
        Self {
            points: vec![start],
            line_width,
            color,
        }
    }

    /// The recorded points, in append order.
    pub fn points(&self) -> &[Pos2] {
        &self.points
    }

    pub fn line_width(&self) -> f32 {
        self.line_width
    }

    pub fn color(&self) -> Color32 {
        self.color
    }
}

impl Drawable for Stroke {
    fn extend(&mut self, pos: Pos2) -> Damage {
        let from = *self.points.last().unwrap_or(&pos);
        self.points.push(pos);
        Damage::Segment {
            from,
            to: pos,
            width: self.line_width,
            color: self.color,
        }
    }

    fn render(&self, surface: &mut dyn Surface) {
        // A single point has no extent; pointer-down always appends the
        // start twice so even a zero-length drag reaches this path.
        if self.points.len() < 2 {
            return;
        }
        surface.stroke_polyline(&self.points, self.line_width, self.color);
    }
}
