use egui::{Color32, Pos2};
use log::{info, warn};

use crate::command::GLYPH_SIZE_FACTOR;
use crate::surface::Surface;

/// Line width a freshly selected sticker tool starts with.
const STICKER_DEFAULT_WIDTH: f32 = 5.0;

/// Live style configuration owned by the engine. These values seed new
/// commands at pointer-down; committed commands never read them again.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StyleState {
    pub line_width: f32,
    pub color: Color32,
    /// Degrees, wrapped into `[0, 360)`. Only stickers use it.
    pub rotation_deg: f32,
}

impl Default for StyleState {
    fn default() -> Self {
        Self {
            line_width: 1.0,
            color: Color32::BLACK,
            rotation_deg: 0.0,
        }
    }
}

impl StyleState {
    pub fn set_rotation(&mut self, degrees: f32) {
        self.rotation_deg = degrees.rem_euclid(360.0);
    }
}

/// A drawing tool. Tools are immutable once built; everything that varies
/// per use (width, color, rotation) lives in [`StyleState`].
#[derive(Debug, Clone, PartialEq)]
pub enum Tool {
    Marker { line_width: f32 },
    Sticker { glyph: String },
}

impl Tool {
    pub fn is_sticker(&self) -> bool {
        matches!(self, Tool::Sticker { .. })
    }

    /// Button label for the UI layer.
    pub fn label(&self) -> String {
        match self {
            Tool::Marker { line_width } if *line_width <= 2.0 => "Thin marker".to_owned(),
            Tool::Marker { .. } => "Thick marker".to_owned(),
            Tool::Sticker { glyph } => glyph.clone(),
        }
    }

    /// Draw this tool's preview mark at `cursor`. The mark is overlay-only:
    /// translucent, never committed, and composed on top of a full repaint
    /// by the render pipeline.
    pub fn preview_mark(&self, surface: &mut dyn Surface, cursor: Pos2, style: &StyleState) {
        match self {
            Tool::Marker { .. } => {
                // A circle whose diameter equals the live line width.
                surface.stroke_circle(
                    cursor,
                    style.line_width / 2.0,
                    style.line_width,
                    Color32::from_black_alpha(128),
                );
            }
            Tool::Sticker { glyph } => {
                surface.draw_glyph(
                    glyph,
                    cursor,
                    style.line_width * GLYPH_SIZE_FACTOR,
                    style.rotation_deg,
                    Color32::from_black_alpha(51),
                );
            }
        }
    }
}

/// The fixed, ordered tool set plus the current selection.
#[derive(Debug)]
pub struct ToolRegistry {
    tools: Vec<Tool>,
    selected: usize,
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolRegistry {
    /// Build the startup tool set: two markers at distinct widths and the
    /// stock sticker glyphs, with the thin marker selected.
    pub fn new() -> Self {
        Self {
            tools: vec![
                Tool::Marker { line_width: 1.0 },
                Tool::Marker { line_width: 3.0 },
                Tool::Sticker { glyph: "🐵".to_owned() },
                Tool::Sticker { glyph: "🖐️".to_owned() },
                Tool::Sticker { glyph: "🌳".to_owned() },
                Tool::Sticker { glyph: "💥".to_owned() },
            ],
            selected: 0,
        }
    }

    pub fn tools(&self) -> &[Tool] {
        &self.tools
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected(&self) -> &Tool {
        &self.tools[self.selected]
    }

    /// Whether the active tool stamps stickers rather than drawing strokes.
    pub fn sticker_mode(&self) -> bool {
        self.selected().is_sticker()
    }

    /// Make the tool at `index` active and reset `style` to defaults
    /// appropriate for it. Selecting the same tool twice is idempotent;
    /// an out-of-range index is ignored. Does not repaint. Returns whether
    /// the selection took effect.
    pub fn select(&mut self, index: usize, style: &mut StyleState) -> bool {
        let Some(tool) = self.tools.get(index) else {
            warn!("ignoring selection of unknown tool {index}");
            return false;
        };
        match tool {
            Tool::Marker { line_width } => style.line_width = *line_width,
            Tool::Sticker { .. } => style.line_width = STICKER_DEFAULT_WIDTH,
        }
        self.selected = index;
        true
    }

    /// Append a user-supplied sticker glyph to the tool set and return its
    /// index.
    pub fn add_user_sticker(&mut self, glyph: impl Into<String>) -> usize {
        let glyph = glyph.into();
        info!("adding user sticker {glyph:?}");
        self.tools.push(Tool::Sticker { glyph });
        self.tools.len() - 1
    }
}
