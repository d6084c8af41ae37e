//! `ActionLog` — the undo/redo stack pair.

use crate::{Command, CommandTarget, LogError, LogResult};

/// Undo and redo stacks of [`Command`]s.
///
/// The redo stack is non-empty only between an undo and the next
/// [`record`](ActionLog::record).
#[derive(Clone, Default, Debug)]
pub struct ActionLog {
    undo: Vec<Command>,
    redo: Vec<Command>,
}

impl ActionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a command whose forward effect has just been applied.
    /// Invalidates everything on the redo stack.
    pub fn record(&mut self, command: Command) {
        self.undo.push(command);
        self.redo.clear();
    }

    /// Revert the most recent command and move it to the redo stack.
    pub fn undo<T: CommandTarget + ?Sized>(&mut self, target: &mut T) -> LogResult<&Command> {
        let command = self.undo.pop().ok_or(LogError::NothingToUndo)?;
        if let Err(err) = target.revert(&command) {
            self.undo.push(command);
            return Err(err.into());
        }
        Ok(push_top(&mut self.redo, command))
    }

    /// Re-apply the most recently undone command and move it back to the
    /// undo stack, keeping whatever the target refreshed in it.
    pub fn redo<T: CommandTarget + ?Sized>(&mut self, target: &mut T) -> LogResult<&Command> {
        let mut command = self.redo.pop().ok_or(LogError::NothingToRedo)?;
        if let Err(err) = target.apply(&mut command) {
            self.redo.push(command);
            return Err(err.into());
        }
        Ok(push_top(&mut self.undo, command))
    }

    /// The command `undo` would revert next.
    pub fn peek_undo(&self) -> Option<&Command> {
        self.undo.last()
    }

    /// The command `redo` would re-apply next.
    pub fn peek_redo(&self) -> Option<&Command> {
        self.redo.last()
    }

    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo.len()
    }

    /// Forget all history.
    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }
}

fn push_top(stack: &mut Vec<Command>, command: Command) -> &Command {
    stack.push(command);
    &stack[stack.len() - 1]
}
