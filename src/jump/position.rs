//! Remembered cursor positions.

use anyhow::Result;
use tracing::debug;

use crate::surface::{ActiveEditor, Cursor, EditorSurface, Pane, VisibleEditor};

/// Where the user was: a document, the pane showing it, and the cursor.
///
/// Two positions are the same spot when all three fields are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Position {
    pub path: String,
    pub pane: Pane,
    pub cursor: Cursor,
}

impl Position {
    pub fn new(path: impl Into<String>, pane: Pane, cursor: Cursor) -> Self {
        Self {
            path: path.into(),
            pane,
            cursor,
        }
    }

    /// Captures the position of `editor`.
    ///
    /// An editor without a known pane is recorded against the active pane.
    pub fn capture(editor: &ActiveEditor) -> Self {
        Self {
            path: editor.path.clone(),
            pane: editor.pane.unwrap_or(Pane::Active),
            cursor: editor.cursor,
        }
    }

    /// Returns true if `editor` sits exactly on this position.
    pub fn matches(&self, editor: &ActiveEditor) -> bool {
        *self == Self::capture(editor)
    }

    /// Picks the pane to reopen this position in.
    ///
    /// Among the visible editors showing this document, prefers the one in
    /// the recorded pane, then any of them, and otherwise the active pane.
    pub fn target_pane(&self, visible: &[VisibleEditor]) -> Pane {
        let mut fallback = None;
        for editor in visible.iter().filter(|editor| editor.path == self.path) {
            let pane = editor.pane.unwrap_or(Pane::Active);
            if pane == self.pane {
                return pane;
            }
            fallback.get_or_insert(pane);
        }
        fallback.unwrap_or(Pane::Active)
    }

    /// Shifts the cursor line by `delta`, never above `floor`.
    pub fn shift_lines(&mut self, delta: i64, floor: u32) {
        let line = (i64::from(self.cursor.line) + delta).max(i64::from(floor));
        self.cursor.line = u32::try_from(line).unwrap_or(u32::MAX);
    }

    /// Makes this position the active one on `surface`.
    ///
    /// Reuses the active editor when it already shows this document in the
    /// recorded pane; otherwise opens the document in the pane chosen by
    /// [`target_pane`](Self::target_pane). Open failures propagate.
    pub async fn jump<S: EditorSurface + ?Sized>(&self, surface: &mut S) -> Result<()> {
        let reuse = surface
            .active_editor()
            .is_some_and(|editor| editor.path == self.path && editor.pane == Some(self.pane));

        if !reuse {
            let pane = self.target_pane(&surface.visible_editors());
            debug!(path = %self.path, ?pane, "opening document for jump");
            surface.show_document(&self.path, pane).await?;
        }
        surface.reveal_cursor(self.cursor)
    }
}
