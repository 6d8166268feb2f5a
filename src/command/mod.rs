mod history;
mod stamp;
mod stroke;

use egui::{Color32, Pos2};

pub use history::CommandHistory;
pub use stamp::{Stamp, GLYPH_SIZE_FACTOR};
pub use stroke::Stroke;

use crate::surface::Surface;

/// Repaint work owed after extending a command.
///
/// Extending a stroke only dirties the newest segment, so an active drag can
/// paint incrementally instead of replaying the whole drawing on every
/// pointer event. Moving a stamp invalidates whatever it previously covered,
/// which needs a full replay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Damage {
    /// Stroke the single segment from `from` to `to`; nothing else changed.
    Segment {
        from: Pos2,
        to: Pos2,
        width: f32,
        color: Color32,
    },
    /// Replay the whole committed list.
    Full,
}

/// One undoable unit of drawing.
///
/// A command is mutable through [`Drawable::extend`] only while it is the
/// most recently committed entry and the pointer is still down; after that
/// it is only ever replayed through [`Drawable::render`].
pub trait Drawable {
    /// Grow the command toward `pos`, returning the repaint work this
    /// caused. Style values were snapshotted at creation and never change.
    fn extend(&mut self, pos: Pos2) -> Damage;

    /// Replay the finished command onto `surface`.
    fn render(&self, surface: &mut dyn Surface);
}

/// Closed set of command kinds held by the history stacks.
#[derive(Debug, Clone)]
pub enum DrawCommand {
    Stroke(Stroke),
    Stamp(Stamp),
}

impl Drawable for DrawCommand {
    fn extend(&mut self, pos: Pos2) -> Damage {
        match self {
            DrawCommand::Stroke(s) => s.extend(pos),
            DrawCommand::Stamp(s) => s.extend(pos),
        }
    }

    fn render(&self, surface: &mut dyn Surface) {
        match self {
            DrawCommand::Stroke(s) => s.render(surface),
            DrawCommand::Stamp(s) => s.render(surface),
        }
    }
}

/// Factory functions for creating commands from the live tool/style state.
pub mod factory {
    use super::*;
    use crate::tools::{StyleState, Tool};

    /// Create the command a pointer-down at `pos` starts, snapshotting the
    /// current style by value. Later style changes must not retroactively
    /// alter commands created here.
    pub fn create(pos: Pos2, tool: &Tool, style: &StyleState) -> DrawCommand {
        match tool {
            Tool::Marker { .. } => DrawCommand::Stroke(Stroke::new(
                pos,
                style.line_width,
                style.color,
            )),
            Tool::Sticker { glyph } => DrawCommand::Stamp(Stamp::new(
                pos,
                glyph.clone(),
                style.line_width,
                style.rotation_deg,
            )),
        }
    }
}
