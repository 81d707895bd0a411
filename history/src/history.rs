//! Undo/redo stacks.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An operation that can be applied to a target and later reverted.
///
/// Implementations capture whatever they need to revert at construction or
/// during `apply`, never lazily at revert time.
pub trait Reversible {
    type Target;
    type Error: fmt::Display;

    /// Perform the operation. On error the target must be unchanged.
    fn apply(&mut self, target: &mut Self::Target) -> Result<(), Self::Error>;

    /// Undo a previous `apply`. Conditions that make this impossible degrade
    /// to a no-op.
    fn revert(&mut self, target: &mut Self::Target);

    /// Short name for logs.
    fn label(&self) -> &'static str;
}

/// Occupancy of the two stacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HistoryState {
    pub can_undo: bool,
    pub can_redo: bool,
}

/// History configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Maximum undo depth. `None` keeps everything.
    pub limit: Option<usize>,
}

/// Undo/redo manager.
#[derive(Debug)]
pub struct History<C> {
    undo_stack: Vec<C>,
    redo_stack: Vec<C>,
    limit: Option<usize>,
}

impl<C> Default for History<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> History<C> {
    /// Create an unbounded history.
    pub fn new() -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            limit: None,
        }
    }

    pub fn with_config(config: HistoryConfig) -> Self {
        Self {
            limit: config.limit,
            ..Self::new()
        }
    }

    /// Bound the undo stack to `limit` entries; oldest entries are evicted.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self.evict();
        self
    }

    /// Empty both stacks.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn state(&self) -> HistoryState {
        HistoryState {
            can_undo: self.can_undo(),
            can_redo: self.can_redo(),
        }
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    /// The command `undo()` would revert next.
    pub fn peek_undo(&self) -> Option<&C> {
        self.undo_stack.last()
    }

    /// The command `redo()` would re-apply next.
    pub fn peek_redo(&self) -> Option<&C> {
        self.redo_stack.last()
    }

    fn evict(&mut self) {
        if let Some(limit) = self.limit {
            if self.undo_stack.len() > limit {
                let excess = self.undo_stack.len() - limit;
                self.undo_stack.drain(0..excess);
            }
        }
    }
}

impl<C: Reversible> History<C> {
    /// Apply `command` and record it.
    ///
    /// On success the redo stack is cleared. If `apply` fails nothing is
    /// recorded and both stacks are left as they were.
    pub fn execute(&mut self, mut command: C, target: &mut C::Target) -> Result<(), C::Error> {
        command.apply(target)?;
        tracing::debug!(command = command.label(), "executed");
        self.undo_stack.push(command);
        self.redo_stack.clear();
        self.evict();
        Ok(())
    }

    /// Revert the most recent command. Returns false if there was nothing to undo.
    pub fn undo(&mut self, target: &mut C::Target) -> bool {
        let Some(mut command) = self.undo_stack.pop() else {
            return false;
        };
        command.revert(target);
        tracing::debug!(command = command.label(), "undone");
        self.redo_stack.push(command);
        true
    }

    /// Re-apply the most recently undone command. Returns false if there was
    /// nothing to redo.
    ///
    /// A re-apply that fails (the target was changed out of band) is logged
    /// and the command still moves back to the undo stack.
    pub fn redo(&mut self, target: &mut C::Target) -> bool {
        let Some(mut command) = self.redo_stack.pop() else {
            return false;
        };
        match command.apply(target) {
            Ok(()) => tracing::debug!(command = command.label(), "redone"),
            Err(e) => tracing::warn!(command = command.label(), error = %e, "redo had no effect"),
        }
        self.undo_stack.push(command);
        self.evict();
        true
    }
}
