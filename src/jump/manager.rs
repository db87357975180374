//! The jump stack: remember a position, wander off, pop back.

use anyhow::Result;
use tracing::{debug, trace};

use crate::jump::batch::CommandBatch;
use crate::jump::position::Position;
use crate::stack::{BoundedStack, StackError};
use crate::surface::{ChangeEvent, EditorSurface};

/// Owns the stack of remembered positions and the editing surface.
///
/// Every operation takes `&mut self`, so commands run by
/// [`push_position_do_commands`](Self::push_position_do_commands) cannot
/// reach back into the stack while a batch is in flight.
#[derive(Debug)]
pub struct JumpStack<S> {
    surface: S,
    positions: BoundedStack<Position>,
    /// Whether the last push recorded a new position
    has_pushed: bool,
    /// Used when a batch does not say whether to check the position
    check_position_default: bool,
}

impl<S: EditorSurface> JumpStack<S> {
    /// Creates an unbounded jump stack over `surface`.
    pub fn new(surface: S) -> Self {
        Self::with_capacity(surface, None)
    }

    /// Creates a jump stack holding at most `capacity` positions.
    pub fn with_capacity(surface: S, capacity: Option<usize>) -> Self {
        Self {
            surface,
            positions: BoundedStack::bounded_by(capacity),
            has_pushed: false,
            check_position_default: false,
        }
    }

    /// Sets whether batches without a `checkPosition` flag check the position.
    pub fn check_position_by_default(mut self, check: bool) -> Self {
        self.check_position_default = check;
        self
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Number of remembered positions.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// The position the next pop will jump to.
    pub fn peek(&self) -> Option<&Position> {
        self.positions.peek()
    }

    /// Remembered positions from oldest to newest.
    pub fn positions(&self) -> impl Iterator<Item = &Position> {
        self.positions.iter()
    }

    /// Whether the most recent push recorded a new position.
    pub fn has_pushed(&self) -> bool {
        self.has_pushed
    }

    /// Remembers the active editor's position.
    ///
    /// Does nothing when no editor is active. A position identical to the
    /// top of the stack is collapsed into it rather than pushed again; in
    /// both cases [`has_pushed`](Self::has_pushed) becomes false.
    pub fn push_position(&mut self) -> Result<(), StackError> {
        let Some(editor) = self.surface.active_editor() else {
            debug!("no active editor, nothing to push");
            self.has_pushed = false;
            return Ok(());
        };

        let candidate = Position::capture(&editor);
        if self.positions.peek() == Some(&candidate) {
            debug!(path = %candidate.path, line = candidate.cursor.line, "collapsing push into top of stack");
            self.has_pushed = false;
            return Ok(());
        }

        // Clear the flag first so a rejected push is not mistaken for a new entry
        self.has_pushed = false;
        debug!(
            path = %candidate.path,
            line = candidate.cursor.line,
            column = candidate.cursor.column,
            depth = self.positions.len() + 1,
            "pushing position"
        );
        self.positions.push(candidate)?;
        self.has_pushed = true;
        Ok(())
    }

    /// Pops the top position and jumps back to it.
    ///
    /// A no-op on an empty stack. The position is removed before the jump,
    /// so a failed jump does not put it back.
    pub async fn pop_position(&mut self) -> Result<()> {
        let Some(position) = self.positions.pop() else {
            debug!("jump stack is empty, nothing to pop");
            return Ok(());
        };

        debug!(
            path = %position.path,
            line = position.cursor.line,
            column = position.cursor.column,
            "popping position"
        );
        position.jump(&mut self.surface).await
    }

    /// Pushes the current position, then runs a batch of commands in order.
    ///
    /// An absent batch or one without a command list is a plain
    /// [`push_position`](Self::push_position). If the batch asks for a
    /// position check and the push recorded a new entry, the entry is
    /// dropped again when the commands left the cursor where it was. A
    /// failing command aborts the rest of the batch and skips the check.
    pub async fn push_position_do_commands(&mut self, batch: Option<&CommandBatch>) -> Result<()> {
        let Some((commands, check_position)) = batch.and_then(|batch| {
            batch.commands.as_deref().map(|commands| {
                (
                    commands,
                    batch.check_position.unwrap_or(self.check_position_default),
                )
            })
        }) else {
            self.push_position()?;
            return Ok(());
        };

        self.push_position()?;
        for command in commands {
            debug!(command = command.name(), "running batch command");
            self.surface
                .execute_command(command.name(), command.args())
                .await?;
        }

        if check_position && self.has_pushed {
            let (Some(top), Some(editor)) = (self.positions.peek(), self.surface.active_editor())
            else {
                return Ok(());
            };
            if top.matches(&editor) {
                debug!(path = %top.path, "batch did not move the cursor, dropping pushed position");
                self.positions.pop();
            }
        }
        Ok(())
    }

    /// Keeps remembered line numbers aligned with an edited document.
    ///
    /// Each change shifts the positions on the edited document whose line is
    /// strictly below the change's start line by the change's net line
    /// delta. Changes are applied one by one in the order reported. A
    /// position inside a removed range is clamped to the change's start line.
    pub fn fix_jump_stack(&mut self, event: &ChangeEvent) {
        for change in &event.changes {
            let delta = change.line_delta();
            if delta == 0 {
                continue;
            }

            let start = change.range.start.line;
            self.positions.for_each_mut(|position| {
                if position.path == event.path && position.cursor.line > start {
                    let before = position.cursor.line;
                    position.shift_lines(delta, start);
                    trace!(path = %position.path, before, after = position.cursor.line, "shifted position");
                }
            });
        }
    }
}
