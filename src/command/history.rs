use log::debug;

use super::DrawCommand;

/// Linear undo/redo history over draw commands.
///
/// The history exclusively owns every command; nothing outside keeps a
/// reference once a command leaves the active-construction phase.
#[derive(Debug, Default)]
pub struct CommandHistory {
    /// Commands in insertion order; replayed oldest-first on repaint.
    committed: Vec<DrawCommand>,
    /// Undone commands, most recently undone last.
    undone: Vec<DrawCommand>,
}

impl CommandHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a new command. Committing discards any redo history: the
    /// timeline is linear, not branching.
    pub fn commit(&mut self, command: DrawCommand) {
        self.committed.push(command);
        self.undone.clear();
    }

    /// Move the newest command onto the redo stack. Returns `false` when
    /// there is nothing to undo; that case is a silent no-op.
    pub fn undo(&mut self) -> bool {
        match self.committed.pop() {
            Some(command) => {
                self.undone.push(command);
                true
            }
            None => {
                debug!("undo ignored: history empty");
                false
            }
        }
    }

    /// Move the most recently undone command back onto the committed
    /// stack. Returns `false` when there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        match self.undone.pop() {
            Some(command) => {
                self.committed.push(command);
                true
            }
            None => {
                debug!("redo ignored: nothing undone");
                false
            }
        }
    }

    /// Discard everything, committed and undone. Returns `false` when the
    /// history was already empty.
    pub fn clear(&mut self) -> bool {
        if self.committed.is_empty() && self.undone.is_empty() {
            return false;
        }
        self.committed.clear();
        self.undone.clear();
        true
    }

    /// The command currently under construction: always the most recently
    /// committed entry.
    pub fn active_mut(&mut self) -> Option<&mut DrawCommand> {
        self.committed.last_mut()
    }

    /// Committed commands in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &DrawCommand> {
        self.committed.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.committed.is_empty()
    }

    pub fn len(&self) -> usize {
        self.committed.len()
    }

    pub fn can_undo(&self) -> bool {
        !self.committed.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.undone.is_empty()
    }
}
