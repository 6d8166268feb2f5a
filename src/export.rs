//! Offscreen high-resolution replay of the drawing into a static image.
//!
//! The committed commands are replayed into an SVG intermediate, which is
//! rasterized with resvg/tiny-skia and encoded to PNG bytes with the
//! `image` crate. Export never mutates the visible surface or the history.

use std::fmt::Write as _;
use std::io::Cursor;

use egui::{Color32, Pos2, Vec2};
use log::info;

use crate::command::CommandHistory;
use crate::error::ExportError;
use crate::renderer;
use crate::surface::Surface;

/// Export output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// PNG image bytes.
    Png,
    /// The SVG intermediate as UTF-8 bytes.
    Svg,
}

/// A [`Surface`] that records draw calls as SVG elements.
pub struct SvgSurface {
    width: f32,
    height: f32,
    body: String,
}

impl SvgSurface {
    pub fn new(size: Vec2) -> Self {
        Self {
            width: size.x,
            height: size.y,
            body: String::new(),
        }
    }

    /// Consume the surface and produce the complete SVG document.
    pub fn into_svg(self) -> String {
        format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" \
             viewBox=\"0 0 {w} {h}\">\n{body}</svg>\n",
            w = self.width,
            h = self.height,
            body = self.body,
        )
    }
}

fn hex(color: Color32) -> String {
    format!("#{:02x}{:02x}{:02x}", color.r(), color.g(), color.b())
}

fn opacity(color: Color32) -> f32 {
    f32::from(color.a()) / 255.0
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

impl Surface for SvgSurface {
    fn clear(&mut self) {
        self.body.clear();
        let _ = writeln!(
            self.body,
            "  <rect width=\"100%\" height=\"100%\" fill=\"#ffffff\"/>"
        );
    }

    fn stroke_polyline(&mut self, points: &[Pos2], width: f32, color: Color32) {
        if points.len() < 2 {
            return;
        }
        let mut coords = String::new();
        for p in points {
            let _ = write!(coords, "{},{} ", p.x, p.y);
        }
        let _ = writeln!(
            self.body,
            "  <polyline points=\"{}\" fill=\"none\" stroke=\"{}\" stroke-opacity=\"{:.3}\" \
             stroke-width=\"{}\" stroke-linecap=\"round\" stroke-linejoin=\"round\"/>",
            coords.trim_end(),
            hex(color),
            opacity(color),
            width,
        );
    }

    fn stroke_circle(&mut self, center: Pos2, radius: f32, width: f32, color: Color32) {
        let _ = writeln!(
            self.body,
            "  <circle cx=\"{}\" cy=\"{}\" r=\"{}\" fill=\"none\" stroke=\"{}\" \
             stroke-opacity=\"{:.3}\" stroke-width=\"{}\"/>",
            center.x,
            center.y,
            radius,
            hex(color),
            opacity(color),
            width,
        );
    }

    fn draw_glyph(&mut self, glyph: &str, anchor: Pos2, size: f32, rotation_deg: f32, color: Color32) {
        let _ = writeln!(
            self.body,
            "  <text x=\"{x}\" y=\"{y}\" font-size=\"{size}\" font-family=\"monospace\" \
             text-anchor=\"middle\" dominant-baseline=\"central\" fill=\"{fill}\" \
             fill-opacity=\"{op:.3}\" transform=\"rotate({rot} {x} {y})\">{text}</text>",
            x = anchor.x,
            y = anchor.y,
            size = size,
            fill = hex(color),
            op = opacity(color),
            rot = rotation_deg,
            text = escape_text(glyph),
        );
    }
}

/// Replay the committed commands (no preview overlay) into an SVG document
/// of the given logical size.
pub fn render_svg(history: &CommandHistory, size: Vec2) -> String {
    let mut surface = SvgSurface::new(size);
    renderer::full_repaint(&mut surface, history);
    surface.into_svg()
}

/// Rasterize the drawing at `scale` times its logical size and encode it
/// as PNG bytes.
pub fn render_png(
    history: &CommandHistory,
    size: Vec2,
    scale: f32,
) -> Result<Vec<u8>, ExportError> {
    let svg = render_svg(history, size);

    let mut options = usvg::Options::default();
    options.fontdb_mut().load_system_fonts();
    let tree = usvg::Tree::from_str(&svg, &options)?;

    let width = (size.x * scale).round().max(1.0) as u32;
    let height = (size.y * scale).round().max(1.0) as u32;
    let mut pixmap = tiny_skia::Pixmap::new(width, height)
        .ok_or(ExportError::PixmapAllocation { width, height })?;
    resvg::render(
        &tree,
        tiny_skia::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );

    // tiny-skia pixels are premultiplied; the PNG encoder wants straight
    // alpha.
    let mut img = image::RgbaImage::new(width, height);
    for (src, dst) in pixmap.pixels().iter().zip(img.pixels_mut()) {
        let c = src.demultiply();
        *dst = image::Rgba([c.red(), c.green(), c.blue(), c.alpha()]);
    }

    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, image::ImageFormat::Png)?;

    info!(
        "exported {} commands to a {}x{} png ({} bytes)",
        history.len(),
        width,
        height,
        buf.get_ref().len()
    );
    Ok(buf.into_inner())
}
