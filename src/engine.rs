use egui::{Color32, Pos2, Vec2};
use log::warn;

use crate::command::{factory, CommandHistory, Damage, Drawable};
use crate::error::ExportError;
use crate::event::{EngineEvent, EventBus, EventHandler};
use crate::export::{self, ExportFormat};
use crate::renderer;
use crate::surface::Surface;
use crate::tools::{StyleState, Tool, ToolRegistry};

/// Pointer state tracked between events.
#[derive(Debug, Default, Clone, Copy)]
pub struct CursorState {
    /// Whether a pointer button is held, i.e. a drag is in progress.
    pub active: bool,
    /// Last known position; `None` while the pointer is off-surface.
    pub position: Option<Pos2>,
}

/// The drawing-command engine.
///
/// Owns the tool registry, the undo/redo history, the cursor and live style
/// state, and the event bus; the UI layer only talks to it through the
/// operations below. All mutation happens synchronously inside pointer and
/// tool-selection handlers, so exactly one command is ever under
/// construction and it is always the newest committed entry.
#[derive(Debug)]
pub struct Engine {
    tools: ToolRegistry,
    history: CommandHistory,
    cursor: CursorState,
    style: StyleState,
    events: EventBus,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Start an empty session with the default marker selected.
    pub fn new() -> Self {
        Self {
            tools: ToolRegistry::new(),
            history: CommandHistory::new(),
            cursor: CursorState::default(),
            style: StyleState::default(),
            events: EventBus::new(),
        }
    }

    // ---- observers -------------------------------------------------------

    pub fn subscribe(&self, handler: Box<dyn EventHandler>) {
        self.events.subscribe(handler);
    }

    fn notify_drawing_changed(&self) {
        self.events.emit(EngineEvent::DrawingChanged {
            empty: self.history.is_empty(),
        });
    }

    // ---- pointer state machine -------------------------------------------

    /// Idle → Drawing: snapshot the current style into a fresh command,
    /// commit it (discarding redo history) and seed it with its starting
    /// point twice so a zero-length drag still renders.
    pub fn pointer_down(&mut self, pos: Pos2) {
        if self.cursor.active {
            warn!("pointer_down while already drawing; ignored");
            return;
        }
        self.cursor.active = true;
        self.cursor.position = Some(pos);

        let command = factory::create(pos, self.tools.selected(), &self.style);
        self.history.commit(command);
        if let Some(active) = self.history.active_mut() {
            active.extend(pos);
        }
        self.notify_drawing_changed();
    }

    /// While Drawing, forward the coordinate to the active command and
    /// report the repaint work it caused. While Idle, only the preview
    /// cursor moves: committed state is untouched and a `ToolMoved` event
    /// fires instead.
    pub fn pointer_move(&mut self, pos: Pos2) -> Option<Damage> {
        self.cursor.position = Some(pos);
        if self.cursor.active {
            self.history.active_mut().map(|active| active.extend(pos))
        } else {
            self.events.emit(EngineEvent::ToolMoved { pos });
            None
        }
    }

    /// Drawing → Idle: the active command is final from here on.
    pub fn pointer_up(&mut self) {
        if self.cursor.active {
            self.cursor.active = false;
            self.notify_drawing_changed();
        }
    }

    /// Treat leaving the surface as pointer-up, and forget the cursor
    /// position so no stale preview is drawn at the old spot.
    pub fn pointer_leave(&mut self) {
        let was_drawing = self.cursor.active;
        self.cursor.active = false;
        self.cursor.position = None;
        if was_drawing {
            self.notify_drawing_changed();
        }
    }

    // ---- tool selection and style ----------------------------------------

    pub fn select_tool(&mut self, index: usize) {
        if self.tools.select(index, &mut self.style) {
            self.events.emit(EngineEvent::ToolSelected {
                index: self.tools.selected_index(),
            });
        }
    }

    /// Append a runtime sticker tool for a user-supplied glyph; returns its
    /// registry index.
    pub fn add_user_sticker(&mut self, glyph: impl Into<String>) -> usize {
        self.tools.add_user_sticker(glyph)
    }

    pub fn set_line_width(&mut self, width: f32) {
        self.style.line_width = width;
    }

    pub fn set_color(&mut self, color: Color32) {
        self.style.color = color;
    }

    pub fn set_rotation(&mut self, degrees: f32) {
        self.style.set_rotation(degrees);
    }

    // ---- history ---------------------------------------------------------

    pub fn undo(&mut self) {
        if self.history.undo() {
            self.notify_drawing_changed();
        }
    }

    pub fn redo(&mut self) {
        if self.history.redo() {
            self.notify_drawing_changed();
        }
    }

    pub fn clear(&mut self) {
        if self.history.clear() {
            self.notify_drawing_changed();
        }
    }

    // ---- rendering -------------------------------------------------------

    /// Clear and replay every committed command in order.
    pub fn full_repaint(&self, surface: &mut dyn Surface) {
        renderer::full_repaint(surface, &self.history);
    }

    /// Full repaint plus the active tool's preview at the cursor. No
    /// preview is drawn mid-drag (the ink itself is the feedback) or while
    /// the pointer is off-surface.
    pub fn preview_overlay(&self, surface: &mut dyn Surface) {
        let cursor = if self.cursor.active {
            None
        } else {
            self.cursor.position
        };
        renderer::preview_overlay(surface, &self.history, self.tools.selected(), cursor, &self.style);
    }

    /// Paint the repaint work reported by [`Engine::pointer_move`].
    pub fn apply_damage(&self, surface: &mut dyn Surface, damage: Damage) {
        match damage {
            Damage::Segment {
                from,
                to,
                width,
                color,
            } => surface.stroke_polyline(&[from, to], width, color),
            Damage::Full => self.full_repaint(surface),
        }
    }

    // ---- export ----------------------------------------------------------

    /// Replay the drawing offscreen at `scale` times `size` and return the
    /// encoded image. Does not touch the visible surface or the history.
    pub fn export(
        &self,
        size: Vec2,
        scale: f32,
        format: ExportFormat,
    ) -> Result<Vec<u8>, ExportError> {
        match format {
            ExportFormat::Png => export::render_png(&self.history, size, scale),
            ExportFormat::Svg => Ok(export::render_svg(&self.history, size).into_bytes()),
        }
    }

    // ---- accessors -------------------------------------------------------

    pub fn history(&self) -> &CommandHistory {
        &self.history
    }

    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    pub fn selected_tool(&self) -> &Tool {
        self.tools.selected()
    }

    pub fn style(&self) -> &StyleState {
        &self.style
    }

    pub fn cursor(&self) -> CursorState {
        self.cursor
    }
}
