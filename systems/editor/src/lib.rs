#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Editing session that batches layout commands and keeps an undo history.

use std::{collections::VecDeque, num::NonZeroU32};

use kitchen_planner_core::{Command, LayoutError};
use kitchen_planner_layout::{apply, Layout};
use tracing::debug;

/// Default number of snapshots retained for undo.
pub const DEFAULT_HISTORY_LIMIT: usize = 64;

/// Editing session owning exactly one live layout.
///
/// Every batch is applied atomically: either all of its commands take effect
/// and the previous state becomes undoable, or none do.
#[derive(Debug)]
pub struct Editor {
    layout: Layout,
    undo: VecDeque<Layout>,
    redo: Vec<Layout>,
    history_limit: usize,
}

impl Editor {
    /// Starts a session on an empty layout of the provided dimensions.
    #[must_use]
    pub fn new(height: NonZeroU32, width: NonZeroU32, history_limit: usize) -> Self {
        Self::from_layout(Layout::new(height, width), history_limit)
    }

    /// Starts a session on an existing layout, typically one decoded from a share link.
    #[must_use]
    pub fn from_layout(layout: Layout, history_limit: usize) -> Self {
        Self {
            layout,
            undo: VecDeque::new(),
            redo: Vec::new(),
            history_limit,
        }
    }

    /// Live layout being edited.
    #[must_use]
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Consumes the session and returns the live layout.
    #[must_use]
    pub fn into_layout(self) -> Layout {
        self.layout
    }

    /// Applies a batch of commands.
    ///
    /// Commands run against a [`Layout::snapshot`] of the live layout, which
    /// replaces it only once every command succeeded, so placed squares keep
    /// their placement order across batches. Wall junctions are re-derived once after
    /// the batch when any command touched walls. On failure neither the layout
    /// nor the history changes.
    pub fn apply(&mut self, commands: &[Command]) -> Result<(), LayoutError> {
        if commands.is_empty() {
            return Ok(());
        }

        let mut draft = self.layout.snapshot();
        for (position, command) in commands.iter().enumerate() {
            if let Err(error) = apply(&mut draft, command) {
                debug!(position, ?command, %error, "batch rejected");
                return Err(error);
            }
        }
        if commands.iter().any(Command::touches_walls) {
            draft.fix_corner_walls();
        }

        let previous = std::mem::replace(&mut self.layout, draft);
        self.push_undo(previous);
        self.redo.clear();
        debug!(commands = commands.len(), "batch applied");
        Ok(())
    }

    /// Restores the state before the most recent batch.
    ///
    /// Returns `false` when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.undo.pop_back() else {
            return false;
        };
        self.redo.push(std::mem::replace(&mut self.layout, previous));
        debug!(undo = self.undo.len(), redo = self.redo.len(), "undo");
        true
    }

    /// Re-applies the most recently undone batch.
    ///
    /// Returns `false` when there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        let Some(next) = self.redo.pop() else {
            return false;
        };
        let current = std::mem::replace(&mut self.layout, next);
        self.push_undo(current);
        debug!(undo = self.undo.len(), redo = self.redo.len(), "redo");
        true
    }

    /// Number of batches that can currently be undone.
    #[must_use]
    pub fn undo_depth(&self) -> usize {
        self.undo.len()
    }

    /// Number of batches that can currently be redone.
    #[must_use]
    pub fn redo_depth(&self) -> usize {
        self.redo.len()
    }

    /// Encodes the live layout as shareable text.
    #[must_use]
    pub fn share_text(&self) -> String {
        self.layout.encode().to_text()
    }

    fn push_undo(&mut self, snapshot: Layout) {
        if self.history_limit == 0 {
            return;
        }
        if self.undo.len() == self.history_limit {
            let _ = self.undo.pop_front();
        }
        self.undo.push_back(snapshot);
    }
}
