//! The editing surface the jump stack talks to.
//!
//! The jump stack never owns documents or editors. It reads the active
//! editor, asks the surface to show documents and move the cursor, and runs
//! named commands through [`EditorSurface`]. Document edits arrive the other
//! way, as [`ChangeEvent`]s forwarded by the host.
//!
//! # Modules
//!
//! - `memory`: an in-memory surface used by the replay CLI and the tests

pub mod memory;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A zero-based (line, column) coordinate in a document.
///
/// Columns count UTF-16 code units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cursor {
    pub line: u32,
    #[serde(default)]
    pub column: u32,
}

impl Cursor {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

/// A split region of the editing surface (a view column).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Pane {
    /// No preference: whichever pane is currently active.
    #[default]
    Active,
    /// A numbered pane, starting at 1.
    Column(u32),
}

/// The editor that currently has focus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveEditor {
    pub path: String,
    /// `None` when the surface cannot tell which pane hosts the editor
    pub pane: Option<Pane>,
    pub cursor: Cursor,
}

/// A document currently shown in some pane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibleEditor {
    pub path: String,
    pub pane: Option<Pane>,
}

/// One `key = val` argument passed opaquely to an editor command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandArg {
    pub key: String,
    pub val: String,
}

impl CommandArg {
    pub fn new(key: impl Into<String>, val: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            val: val.into(),
        }
    }
}

/// The span of a document replaced by an edit, `end` exclusive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineRange {
    pub start: Cursor,
    pub end: Cursor,
}

impl LineRange {
    pub fn new(start: Cursor, end: Cursor) -> Self {
        Self { start, end }
    }
}

/// A single replacement inside a [`ChangeEvent`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentChange {
    pub range: LineRange,
    pub text: String,
}

impl ContentChange {
    pub fn new(range: LineRange, text: impl Into<String>) -> Self {
        Self {
            range,
            text: text.into(),
        }
    }

    /// Net number of lines this change adds (positive) or removes (negative).
    ///
    /// Compares the lines spanned by the replacement text with the lines
    /// spanned by the replaced range, both counted inclusively.
    pub fn line_delta(&self) -> i64 {
        let new_lines = self.text.matches('\n').count() as i64 + 1;
        let old_lines =
            i64::from(self.range.end.line) - i64::from(self.range.start.line) + 1;
        new_lines - old_lines
    }
}

/// Notification that a document's text changed.
///
/// Changes are listed in the order the surface reported them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    pub path: String,
    pub changes: Vec<ContentChange>,
}

/// Capabilities the jump stack needs from the host editor.
#[async_trait]
pub trait EditorSurface: Send {
    /// The focused editor, or `None` when nothing is open.
    fn active_editor(&self) -> Option<ActiveEditor>;

    /// Every (document, pane) pair currently on screen.
    fn visible_editors(&self) -> Vec<VisibleEditor>;

    /// Opens `path` and shows it in `pane`, returning the now-active editor.
    ///
    /// Fails if the document cannot be opened.
    async fn show_document(&mut self, path: &str, pane: Pane) -> Result<ActiveEditor>;

    /// Moves the active editor's cursor to `cursor`, scrolling it into the
    /// center of the view if it is outside the visible lines.
    fn reveal_cursor(&mut self, cursor: Cursor) -> Result<()>;

    /// Runs the named editor command to completion.
    async fn execute_command(&mut self, command: &str, args: &[CommandArg]) -> Result<()>;
}
