//! Replay scripts.
//!
//! A script seeds a [`MemorySurface`] with documents and then drives the
//! extension step by step, the way an editor host would: opening files,
//! moving the cursor, editing text, and invoking commands.
//!
//! ```json
//! {
//!   "documents": { "a.txt": "one\ntwo\nthree\n" },
//!   "steps": [
//!     { "open": { "path": "a.txt", "pane": 1 } },
//!     { "cursor": { "line": 2 } },
//!     { "command": { "id": "extension.jump-stack.pushPosition" } },
//!     "close"
//!   ]
//! }
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::config::Config;
use crate::host::{is_jump_stack_command, JumpStackExtension};
use crate::jump::position::Position;
use crate::surface::memory::MemorySurface;
use crate::surface::{ActiveEditor, CommandArg, Cursor, EditorSurface, LineRange, Pane};

/// A parsed replay script.
#[derive(Debug, Clone, Deserialize)]
pub struct Script {
    /// Document contents keyed by path
    #[serde(default)]
    pub documents: IndexMap<String, String>,
    /// Lines visible per pane
    #[serde(default)]
    pub viewport_height: Option<u32>,
    pub steps: Vec<Step>,
}

/// One host event.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// Show a document; `pane` 0 or absent means the active pane.
    Open {
        path: String,
        #[serde(default)]
        pane: Option<u32>,
    },
    /// Move the active cursor.
    Cursor(Cursor),
    /// Replace a range of a document and notify the jump stack.
    Edit {
        path: String,
        start: Cursor,
        end: Cursor,
        #[serde(default)]
        text: String,
    },
    /// Run a jump stack command or an editor command.
    Command {
        id: String,
        #[serde(default)]
        args: Option<Value>,
    },
    /// Close every editor.
    Close,
}

/// State left behind by a replay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Remembered positions, oldest first
    pub positions: Vec<Position>,
    pub active: Option<ActiveEditor>,
}

impl Outcome {
    /// Human-readable report: positions bottom to top, then the cursor.
    ///
    /// Lines and columns are shown 1-based.
    pub fn render(&self) -> String {
        let mut out = format!("remembered positions ({}):\n", self.positions.len());
        for (depth, position) in self.positions.iter().enumerate() {
            out.push_str(&format!(
                "  {depth}: {}:{}:{} ({:?})\n",
                position.path,
                position.cursor.line + 1,
                position.cursor.column + 1,
                position.pane
            ));
        }
        match &self.active {
            Some(editor) => out.push_str(&format!(
                "cursor: {}:{}:{}\n",
                editor.path,
                editor.cursor.line + 1,
                editor.cursor.column + 1
            )),
            None => out.push_str("cursor: no active editor\n"),
        }
        out
    }
}

impl Script {
    /// Reads a script from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read script {}", path.display()))?;
        Self::parse(&contents).with_context(|| format!("Invalid script {}", path.display()))
    }

    /// Parses a script from JSON text.
    pub fn parse(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Runs every step against a fresh surface and returns the final state.
    ///
    /// Stops at the first failing step.
    pub async fn run(&self, config: &Config) -> Result<Outcome> {
        let mut surface = MemorySurface::new();
        if let Some(height) = self.viewport_height {
            surface = surface.with_viewport_height(height);
        }
        for (path, text) in &self.documents {
            surface.add_document(path.clone(), text.clone());
        }

        let mut extension = JumpStackExtension::activate(surface, config);
        for (index, step) in self.steps.iter().enumerate() {
            debug!(index, ?step, "replaying step");
            run_step(&mut extension, step)
                .await
                .with_context(|| format!("step {} failed", index + 1))?;
        }

        let jump_stack = extension.jump_stack();
        let outcome = Outcome {
            positions: jump_stack.positions().cloned().collect(),
            active: jump_stack.surface().active_editor(),
        };
        extension.deactivate();
        Ok(outcome)
    }
}

async fn run_step(extension: &mut JumpStackExtension<MemorySurface>, step: &Step) -> Result<()> {
    match step {
        Step::Open { path, pane } => {
            let pane = match pane {
                Some(0) | None => Pane::Active,
                Some(column) => Pane::Column(*column),
            };
            extension.jump_stack_mut().surface_mut().open(path, pane)?;
        }
        Step::Cursor(cursor) => {
            extension.jump_stack_mut().surface_mut().move_cursor(*cursor)?;
        }
        Step::Edit {
            path,
            start,
            end,
            text,
        } => {
            let event = extension.jump_stack_mut().surface_mut().edit(
                path,
                LineRange::new(*start, *end),
                text,
            )?;
            extension.on_did_change_text_document(&event);
        }
        Step::Command { id, args } if is_jump_stack_command(id) => {
            extension.execute(id, args.as_ref()).await?;
        }
        Step::Command { id, args } => {
            let args: Vec<CommandArg> = match args {
                Some(value) if !value.is_null() => Vec::deserialize(value)
                    .with_context(|| format!("arguments of '{id}' must be a list of key/val pairs"))?,
                _ => Vec::new(),
            };
            extension
                .jump_stack_mut()
                .surface_mut()
                .execute_command(id, &args)
                .await?;
        }
        Step::Close => extension.jump_stack_mut().surface_mut().close_all(),
    }
    Ok(())
}
