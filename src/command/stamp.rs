use egui::{Color32, Pos2};

use super::{Damage, Drawable};
use crate::surface::Surface;

/// Glyph font size is the line width scaled by this factor.
pub const GLYPH_SIZE_FACTOR: f32 = 4.0;

/// A single glyph placed on the surface. While the pointer is down the
/// stamp follows the cursor rather than accumulating a trail; the glyph,
/// size and rotation are fixed at creation time.
#[derive(Debug, Clone)]
pub struct Stamp {
    anchor: Pos2,
    glyph: String,
    line_width: f32,
    rotation_deg: f32,
}

impl Stamp {
    pub fn new(anchor: Pos2, glyph: String, line_width: f32, rotation_deg: f32) -> Self {
        Self {
            anchor,
            glyph,
            line_width,
            rotation_deg,
        }
    }

    pub fn anchor(&self) -> Pos2 {
        self.anchor
    }

    pub fn glyph(&self) -> &str {
        &self.glyph
    }

    pub fn rotation_deg(&self) -> f32 {
        self.rotation_deg
    }
}

impl Drawable for Stamp {
    fn extend(&mut self, pos: Pos2) -> Damage {
        // Moving the anchor uncovers whatever the glyph previously sat on.
        self.anchor = pos;
        Damage::Full
    }

    fn render(&self, surface: &mut dyn Surface) {
        surface.draw_glyph(
            &self.glyph,
            self.anchor,
            self.line_width * GLYPH_SIZE_FACTOR,
            self.rotation_deg,
            Color32::BLACK,
        );
    }
}
