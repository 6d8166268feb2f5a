use egui::Pos2;

/// Notifications emitted by the engine for the UI layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EngineEvent {
    /// The committed command list changed (commit, undo, redo or clear).
    /// `empty` lets the UI enable/disable its history controls without
    /// poking at the stacks itself.
    DrawingChanged { empty: bool },

    /// The pointer moved while no drag was in progress; the UI should draw
    /// the active tool's preview at `pos`.
    ToolMoved { pos: Pos2 },

    /// A different tool became active.
    ToolSelected { index: usize },
}
