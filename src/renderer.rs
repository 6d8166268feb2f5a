//! Full-surface replay: clear, render every committed command in insertion
//! order, optionally overlay the active tool's preview.

use egui::Pos2;

use crate::command::{CommandHistory, Drawable};
use crate::surface::Surface;
use crate::tools::{StyleState, Tool};

/// Clear `surface` and replay every committed command, oldest first, so
/// later ink lands on top of earlier ink.
pub fn full_repaint(surface: &mut dyn Surface, history: &CommandHistory) {
    surface.clear();
    for command in history.iter() {
        command.render(surface);
    }
}

/// [`full_repaint`], then the active tool's translucent preview mark at the
/// cursor. `cursor` is `None` when the pointer is off-surface, in which
/// case no mark is drawn. Never touches the history.
pub fn preview_overlay(
    surface: &mut dyn Surface,
    history: &CommandHistory,
    tool: &Tool,
    cursor: Option<Pos2>,
    style: &StyleState,
) {
    full_repaint(surface, history);
    if let Some(pos) = cursor {
        tool.preview_mark(surface, pos, style);
    }
}
