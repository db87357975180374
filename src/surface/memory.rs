//! In-memory editing surface.
//!
//! `MemorySurface` keeps documents as plain strings and one editor per pane.
//! It backs the replay CLI and stands in for a real editor in tests, so it
//! implements just enough behavior to make jumps observable: focus, cursor
//! placement with viewport scrolling, text edits that produce change events,
//! and a handful of built-in cursor commands.

use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use indexmap::IndexMap;
use tracing::debug;

use super::{
    ActiveEditor, ChangeEvent, CommandArg, ContentChange, Cursor, EditorSurface, LineRange, Pane,
    VisibleEditor,
};

/// Number of lines visible in each pane unless configured otherwise.
pub const DEFAULT_VIEWPORT_HEIGHT: u32 = 40;

/// A command run through [`EditorSurface::execute_command`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutedCommand {
    pub command: String,
    pub args: Vec<CommandArg>,
}

#[derive(Debug, Clone)]
struct EditorView {
    path: String,
    column: u32,
    cursor: Cursor,
    /// First visible line
    top_line: u32,
}

/// Editing surface that lives entirely in memory.
#[derive(Debug, Clone)]
pub struct MemorySurface {
    documents: IndexMap<String, String>,
    editors: Vec<EditorView>,
    active: Option<usize>,
    viewport_height: u32,
    executed: Vec<ExecutedCommand>,
}

impl MemorySurface {
    /// Creates a surface with no documents and no open editors.
    pub fn new() -> Self {
        Self {
            documents: IndexMap::new(),
            editors: Vec::new(),
            active: None,
            viewport_height: DEFAULT_VIEWPORT_HEIGHT,
            executed: Vec::new(),
        }
    }

    /// Sets how many lines each pane shows at once.
    pub fn with_viewport_height(mut self, height: u32) -> Self {
        self.viewport_height = height.max(1);
        self
    }

    /// Registers a document so it can be opened later.
    pub fn add_document(&mut self, path: impl Into<String>, text: impl Into<String>) {
        self.documents.insert(path.into(), text.into());
    }

    /// Forgets a document, as if it was deleted from disk.
    ///
    /// Editors already showing it stay open; reopening it fails.
    pub fn remove_document(&mut self, path: &str) -> Option<String> {
        self.documents.shift_remove(path)
    }

    /// Returns the text of a document.
    pub fn text(&self, path: &str) -> Option<&str> {
        self.documents.get(path).map(String::as_str)
    }

    /// Returns the number of lines in a document.
    pub fn line_count(&self, path: &str) -> Option<u32> {
        self.text(path).map(line_count)
    }

    /// Cursor of the active editor.
    pub fn cursor(&self) -> Option<Cursor> {
        self.active_view().map(|view| view.cursor)
    }

    /// First visible line of the active editor.
    pub fn top_line(&self) -> Option<u32> {
        self.active_view().map(|view| view.top_line)
    }

    /// Every command executed so far, oldest first.
    pub fn executed_commands(&self) -> &[ExecutedCommand] {
        &self.executed
    }

    /// Shows `path` in `pane` and focuses it.
    ///
    /// A pane that already shows `path` keeps its cursor. A pane showing
    /// another document switches to `path` with the cursor at the start.
    pub fn open(&mut self, path: &str, pane: Pane) -> Result<ActiveEditor> {
        if !self.documents.contains_key(path) {
            bail!("cannot open '{path}': no such document");
        }

        let column = self.resolve_column(pane);
        let index = match self.editors.iter().position(|view| view.column == column) {
            Some(index) => {
                let view = &mut self.editors[index];
                if view.path != path {
                    view.path = path.to_string();
                    view.cursor = Cursor::default();
                    view.top_line = 0;
                }
                index
            }
            None => {
                self.editors.push(EditorView {
                    path: path.to_string(),
                    column,
                    cursor: Cursor::default(),
                    top_line: 0,
                });
                self.editors.len() - 1
            }
        };

        self.active = Some(index);
        debug!(path, column, "showing document");
        self.active_editor()
            .ok_or_else(|| anyhow!("editor for '{path}' vanished after opening"))
    }

    /// Moves the active cursor, clamped to the document, and scrolls it into view.
    pub fn move_cursor(&mut self, cursor: Cursor) -> Result<()> {
        let index = self.active.context("no active editor")?;
        let height = self.viewport_height;
        let clamped = {
            let view = &self.editors[index];
            self.clamp(&view.path, cursor)
        };

        let view = &mut self.editors[index];
        view.cursor = clamped;
        if clamped.line < view.top_line || clamped.line >= view.top_line + height {
            view.top_line = clamped.line.saturating_sub(height / 2);
        }
        Ok(())
    }

    /// Replaces `range` of `path` with `text`.
    ///
    /// Returns the change notification the host must forward to the jump
    /// stack. Cursors of editors showing `path` are clamped to the new text.
    pub fn edit(&mut self, path: &str, range: LineRange, text: &str) -> Result<ChangeEvent> {
        let document = self
            .documents
            .get_mut(path)
            .with_context(|| format!("cannot edit '{path}': no such document"))?;

        let start = byte_offset(document, range.start)
            .with_context(|| format!("edit start {:?} is outside '{path}'", range.start))?;
        let end = byte_offset(document, range.end)
            .with_context(|| format!("edit end {:?} is outside '{path}'", range.end))?;
        if start > end {
            bail!("edit range {range:?} is reversed");
        }
        document.replace_range(start..end, text);

        for index in 0..self.editors.len() {
            if self.editors[index].path == path {
                let clamped = self.clamp(path, self.editors[index].cursor);
                self.editors[index].cursor = clamped;
            }
        }

        Ok(ChangeEvent {
            path: path.to_string(),
            changes: vec![ContentChange::new(range, text)],
        })
    }

    /// Closes every editor.
    pub fn close_all(&mut self) {
        self.editors.clear();
        self.active = None;
    }

    fn active_view(&self) -> Option<&EditorView> {
        self.active.and_then(|index| self.editors.get(index))
    }

    fn resolve_column(&self, pane: Pane) -> u32 {
        match pane {
            Pane::Column(column) => column,
            Pane::Active => self.active_view().map_or(1, |view| view.column),
        }
    }

    fn clamp(&self, path: &str, cursor: Cursor) -> Cursor {
        let Some(text) = self.text(path) else {
            return cursor;
        };
        let last_line = line_count(text) - 1;
        let line = cursor.line.min(last_line);
        let width = text
            .split('\n')
            .nth(line as usize)
            .map_or(0, |l| l.trim_end_matches('\r').encode_utf16().count() as u32);
        Cursor::new(line, cursor.column.min(width))
    }

    fn step_lines(&mut self, delta: i64) -> Result<()> {
        let Some(cursor) = self.cursor() else {
            return Ok(());
        };
        let line = (i64::from(cursor.line) + delta).max(0);
        self.move_cursor(Cursor::new(u32::try_from(line).unwrap_or(u32::MAX), cursor.column))
    }

    fn reveal_line(&mut self, line: u32) {
        let height = self.viewport_height;
        if let Some(view) = self.active.and_then(|index| self.editors.get_mut(index)) {
            view.top_line = line.saturating_sub(height / 2);
        }
    }
}

impl Default for MemorySurface {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EditorSurface for MemorySurface {
    fn active_editor(&self) -> Option<ActiveEditor> {
        self.active_view().map(|view| ActiveEditor {
            path: view.path.clone(),
            pane: Some(Pane::Column(view.column)),
            cursor: view.cursor,
        })
    }

    fn visible_editors(&self) -> Vec<VisibleEditor> {
        self.editors
            .iter()
            .map(|view| VisibleEditor {
                path: view.path.clone(),
                pane: Some(Pane::Column(view.column)),
            })
            .collect()
    }

    async fn show_document(&mut self, path: &str, pane: Pane) -> Result<ActiveEditor> {
        self.open(path, pane)
    }

    fn reveal_cursor(&mut self, cursor: Cursor) -> Result<()> {
        self.move_cursor(cursor)
    }

    async fn execute_command(&mut self, command: &str, args: &[CommandArg]) -> Result<()> {
        self.executed.push(ExecutedCommand {
            command: command.to_string(),
            args: args.to_vec(),
        });

        match command {
            "noop" => {}
            "cursorTop" => {
                if self.active.is_some() {
                    self.move_cursor(Cursor::default())?;
                }
            }
            "cursorBottom" => {
                let lines = self
                    .active_view()
                    .and_then(|view| self.line_count(&view.path));
                if let Some(lines) = lines {
                    self.move_cursor(Cursor::new(lines - 1, 0))?;
                }
            }
            "cursorUp" => self.step_lines(-1)?,
            "cursorDown" => self.step_lines(1)?,
            "cursorMove" => {
                let count = match find_arg(args, "value") {
                    Some(value) => i64::from(parse_number(value, "value")?),
                    None => 1,
                };
                match find_arg(args, "to") {
                    Some("up") => self.step_lines(-count)?,
                    Some("down") => self.step_lines(count)?,
                    Some(other) => bail!("cursorMove: unsupported direction '{other}'"),
                    None => bail!("cursorMove: missing 'to' argument"),
                }
            }
            "revealLine" => {
                let line = find_arg(args, "lineNumber")
                    .context("revealLine: missing 'lineNumber' argument")?;
                self.reveal_line(parse_number(line, "lineNumber")?);
            }
            "workbench.action.focusFirstEditorGroup" => {
                if let Some(index) = self.editors.iter().position(|view| view.column == 1) {
                    self.active = Some(index);
                }
            }
            _ => bail!("command '{command}' not found"),
        }
        Ok(())
    }
}

fn line_count(text: &str) -> u32 {
    u32::try_from(text.matches('\n').count() + 1).unwrap_or(u32::MAX)
}

fn find_arg<'a>(args: &'a [CommandArg], key: &str) -> Option<&'a str> {
    args.iter()
        .find(|arg| arg.key == key)
        .map(|arg| arg.val.as_str())
}

fn parse_number(value: &str, key: &str) -> Result<u32> {
    value
        .trim()
        .parse()
        .with_context(|| format!("argument '{key}' is not a line number: '{value}'"))
}

/// Byte offset of `cursor` in `text`; columns past the line end clamp to it.
fn byte_offset(text: &str, cursor: Cursor) -> Option<usize> {
    let mut line_start = 0;
    for _ in 0..cursor.line {
        let newline = text[line_start..].find('\n')?;
        line_start += newline + 1;
    }

    let line = text[line_start..].split('\n').next().unwrap_or_default();
    let mut units = 0;
    for (index, ch) in line.char_indices() {
        if units >= cursor.column {
            return Some(line_start + index);
        }
        units += ch.len_utf16() as u32;
    }
    Some(line_start + line.len())
}
