//! Host lifecycle around the jump stack.
//!
//! An editor host activates the extension once, routes its three named
//! commands and every document-change notification to it, and deactivates
//! it on shutdown. There is no global state: the host owns the
//! [`JumpStackExtension`] value between activate and deactivate.

use anyhow::{bail, Result};
use serde_json::Value;
use tracing::info;

use crate::config::Config;
use crate::jump::batch::CommandBatch;
use crate::jump::manager::JumpStack;
use crate::surface::{ChangeEvent, EditorSurface};

/// Remember the current position.
pub const PUSH_POSITION: &str = "extension.jump-stack.pushPosition";
/// Jump back to the last remembered position.
pub const POP_POSITION: &str = "extension.jump-stack.popPosition";
/// Remember the current position, then run a batch of commands.
pub const PUSH_POSITION_DO_COMMANDS: &str = "extension.jump-stack.pushPositionDoCommands";

/// Every command the extension registers.
pub const COMMANDS: [&str; 3] = [PUSH_POSITION, POP_POSITION, PUSH_POSITION_DO_COMMANDS];

/// Returns true if `id` names one of the extension's commands.
pub fn is_jump_stack_command(id: &str) -> bool {
    COMMANDS.contains(&id)
}

/// An activated jump stack extension.
#[derive(Debug)]
pub struct JumpStackExtension<S> {
    jump_stack: JumpStack<S>,
}

impl<S: EditorSurface> JumpStackExtension<S> {
    /// Builds the jump stack for `surface` from `config`.
    pub fn activate(surface: S, config: &Config) -> Self {
        info!(capacity = ?config.capacity, "activating jump stack");
        let jump_stack = JumpStack::with_capacity(surface, config.capacity)
            .check_position_by_default(config.check_position);
        Self { jump_stack }
    }

    /// Drops every remembered position and hands the surface back.
    pub fn deactivate(self) -> S {
        info!(remembered = self.jump_stack.len(), "deactivating jump stack");
        self.jump_stack.into_surface()
    }

    pub fn jump_stack(&self) -> &JumpStack<S> {
        &self.jump_stack
    }

    pub fn jump_stack_mut(&mut self) -> &mut JumpStack<S> {
        &mut self.jump_stack
    }

    /// Runs one of the extension's commands.
    ///
    /// `args` is only read by [`PUSH_POSITION_DO_COMMANDS`].
    pub async fn execute(&mut self, id: &str, args: Option<&Value>) -> Result<()> {
        match id {
            PUSH_POSITION => self.jump_stack.push_position()?,
            POP_POSITION => self.jump_stack.pop_position().await?,
            PUSH_POSITION_DO_COMMANDS => {
                let batch = CommandBatch::from_json(args);
                self.jump_stack
                    .push_position_do_commands(batch.as_ref())
                    .await?;
            }
            _ => bail!("unknown jump stack command '{id}'"),
        }
        Ok(())
    }

    /// Forwards a document-change notification to the jump stack.
    pub fn on_did_change_text_document(&mut self, event: &ChangeEvent) {
        self.jump_stack.fix_jump_stack(event);
    }
}
