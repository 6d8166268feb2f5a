use egui::emath::Rot2;
use egui::epaint::TextShape;
use egui::{Color32, FontId, Painter, Pos2, Rect, Shape, Stroke as EguiStroke, Vec2};

/// Abstract 2D drawing target.
///
/// The engine renders through this trait so the same replay code drives the
/// on-screen canvas, the export pipeline, and test doubles. Rotation and
/// opacity are plain parameters (opacity travels in the color's alpha
/// channel), so no implementation leaks transform state between calls.
pub trait Surface {
    /// Clear the whole surface back to its background.
    fn clear(&mut self);

    /// Stroke a connected polyline through `points`.
    fn stroke_polyline(&mut self, points: &[Pos2], width: f32, color: Color32);

    /// Stroke the outline of a circle.
    fn stroke_circle(&mut self, center: Pos2, radius: f32, width: f32, color: Color32);

    /// Draw a short text glyph centered on `anchor`, rotated by
    /// `rotation_deg` about the anchor. `size` is the font size in points.
    fn draw_glyph(&mut self, glyph: &str, anchor: Pos2, size: f32, rotation_deg: f32, color: Color32);
}

/// Background color shared by the canvas and the export pipeline.
pub const BACKGROUND: Color32 = Color32::WHITE;

/// A [`Surface`] backed by an [`egui::Painter`], clipped to the canvas
/// rect. The engine works in surface-local coordinates; this impl offsets
/// them into screen space.
pub struct PainterSurface {
    painter: Painter,
    rect: Rect,
    origin: Vec2,
}

impl PainterSurface {
    pub fn new(painter: &Painter, rect: Rect) -> Self {
        Self {
            painter: painter.with_clip_rect(rect),
            rect,
            origin: rect.min.to_vec2(),
        }
    }

    fn to_screen(&self, pos: Pos2) -> Pos2 {
        pos + self.origin
    }
}

impl Surface for PainterSurface {
    fn clear(&mut self) {
        self.painter.rect_filled(self.rect, 0.0, BACKGROUND);
    }

    fn stroke_polyline(&mut self, points: &[Pos2], width: f32, color: Color32) {
        if points.len() < 2 {
            return;
        }
        let screen: Vec<Pos2> = points.iter().map(|p| self.to_screen(*p)).collect();
        self.painter
            .add(Shape::line(screen, EguiStroke::new(width, color)));
    }

    fn stroke_circle(&mut self, center: Pos2, radius: f32, width: f32, color: Color32) {
        self.painter
            .circle_stroke(self.to_screen(center), radius, EguiStroke::new(width, color));
    }

    fn draw_glyph(&mut self, glyph: &str, anchor: Pos2, size: f32, rotation_deg: f32, color: Color32) {
        let galley = self
            .painter
            .layout_no_wrap(glyph.to_owned(), FontId::monospace(size), color);

        // TextShape rotates about the galley origin (top-left), so place the
        // origin such that the rotated glyph stays centered on the anchor.
        let angle = rotation_deg.to_radians();
        let rot = Rot2::from_angle(angle);
        let origin = self.to_screen(anchor) - rot * (galley.size() / 2.0);

        let shape = TextShape::new(origin, galley, color).with_angle(angle);
        self.painter.add(shape);
    }
}
