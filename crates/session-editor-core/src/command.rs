//! Command model.
//!
//! A [`Command`] is one executed edit with enough bound state to be undone or replayed:
//! the buffer as it was right before the command ran, the range it acted on, and for Paste
//! the inserted text. Undo and Redo are meta-commands that only point at the recorded command
//! they reverse or reapply.
//!
//! Back-references ([`EditState::previous`], [`Command::Undo`] / [`Command::Redo`] targets) are
//! indices into the owning session's history, so truncating the history can never leave a
//! dangling reference: an index past the new length is simply invalid.

use crate::clipboard::Clipboard;
use crate::text::{self, CharRange};
use std::fmt;

/// Command kind tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    /// Copy a range into the clipboard; the buffer is left unchanged.
    Copy,
    /// Insert at an offset, or replace a range.
    Paste,
    /// Copy a range into the clipboard, then delete it.
    Cut,
    /// Delete a range.
    Delete,
    /// Reverse the command at the history cursor.
    Undo,
    /// Reapply the command right after the history cursor.
    Redo,
}

impl CommandKind {
    /// All kinds, in declaration order.
    pub const ALL: [CommandKind; 6] = [
        CommandKind::Copy,
        CommandKind::Paste,
        CommandKind::Cut,
        CommandKind::Delete,
        CommandKind::Undo,
        CommandKind::Redo,
    ];

    /// Undo and Redo act on the history rather than on the buffer.
    pub fn is_meta(self) -> bool {
        matches!(self, CommandKind::Undo | CommandKind::Redo)
    }

    /// Whether executed commands of this kind are appended to the history.
    ///
    /// Copy never mutates the buffer, so it is executed but not recorded.
    pub fn is_recorded(self) -> bool {
        matches!(
            self,
            CommandKind::Paste | CommandKind::Cut | CommandKind::Delete
        )
    }

    /// Stable textual tag.
    pub fn tag(self) -> &'static str {
        match self {
            CommandKind::Copy => "CopyCommand",
            CommandKind::Paste => "PasteCommand",
            CommandKind::Cut => "CutCommand",
            CommandKind::Delete => "DeleteCommand",
            CommandKind::Undo => "UndoCommand",
            CommandKind::Redo => "RedoCommand",
        }
    }

    /// Parse a tag produced by [`CommandKind::tag`].
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.tag() == tag)
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CommandKind::Copy => "Copy",
            CommandKind::Paste => "Paste",
            CommandKind::Cut => "Cut",
            CommandKind::Delete => "Delete",
            CommandKind::Undo => "Undo",
            CommandKind::Redo => "Redo",
        };
        f.write_str(name)
    }
}

/// An edit as requested by the caller, before it is bound to a buffer.
///
/// Offsets are inclusive character offsets and may be given in either order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditRequest {
    /// Copy `[start, end]` into the clipboard.
    Copy {
        /// First offset.
        start: usize,
        /// Last offset.
        end: usize,
    },
    /// Paste `text` at `start` (when `start == end`) or over `[start, end]`.
    Paste {
        /// First offset.
        start: usize,
        /// Last offset.
        end: usize,
        /// Text to paste.
        text: String,
    },
    /// Cut `[start, end]` into the clipboard.
    Cut {
        /// First offset.
        start: usize,
        /// Last offset.
        end: usize,
    },
    /// Delete `[start, end]`.
    Delete {
        /// First offset.
        start: usize,
        /// Last offset.
        end: usize,
    },
    /// Undo the command at the cursor.
    Undo,
    /// Redo the command after the cursor.
    Redo,
}

impl EditRequest {
    /// Build a request from a kind and raw parameters.
    ///
    /// `paste_text` is ignored for every kind but Paste, and the offsets are ignored for
    /// Undo/Redo.
    pub fn from_parts(kind: CommandKind, start: usize, end: usize, paste_text: &str) -> Self {
        match kind {
            CommandKind::Copy => EditRequest::Copy { start, end },
            CommandKind::Paste => EditRequest::Paste {
                start,
                end,
                text: paste_text.to_string(),
            },
            CommandKind::Cut => EditRequest::Cut { start, end },
            CommandKind::Delete => EditRequest::Delete { start, end },
            CommandKind::Undo => EditRequest::Undo,
            CommandKind::Redo => EditRequest::Redo,
        }
    }

    /// Kind of command this request produces.
    pub fn kind(&self) -> CommandKind {
        match self {
            EditRequest::Copy { .. } => CommandKind::Copy,
            EditRequest::Paste { .. } => CommandKind::Paste,
            EditRequest::Cut { .. } => CommandKind::Cut,
            EditRequest::Delete { .. } => CommandKind::Delete,
            EditRequest::Undo => CommandKind::Undo,
            EditRequest::Redo => CommandKind::Redo,
        }
    }

    /// Normalized range, for every kind but Undo/Redo.
    pub fn range(&self) -> Option<CharRange> {
        match *self {
            EditRequest::Copy { start, end }
            | EditRequest::Paste { start, end, .. }
            | EditRequest::Cut { start, end }
            | EditRequest::Delete { start, end } => Some(CharRange::new(start, end)),
            EditRequest::Undo | EditRequest::Redo => None,
        }
    }
}

/// State bound to a buffer-level command when it is dispatched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditState {
    /// Full buffer content immediately before the command executed.
    pub snapshot: String,
    /// Range the command acted on.
    pub range: CharRange,
    /// History index of the command executed just before this one, if any.
    pub previous: Option<usize>,
}

/// An executed (or executable) command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Copy of [`EditState::range`].
    Copy(EditState),
    /// Paste of `text` at / over [`EditState::range`].
    Paste {
        /// Bound edit state.
        state: EditState,
        /// Inserted text.
        text: String,
    },
    /// Cut of [`EditState::range`].
    Cut(EditState),
    /// Deletion of [`EditState::range`].
    Delete(EditState),
    /// Undo of the recorded command at `target`.
    Undo {
        /// History index of the command being undone.
        target: usize,
    },
    /// Redo of the recorded command at `target`.
    Redo {
        /// History index of the command being reapplied.
        target: usize,
    },
}

impl Command {
    /// Bind a buffer-level request to the buffer it will run against.
    ///
    /// Returns `None` for Undo/Redo, which are bound by the history instead.
    pub fn bind(request: EditRequest, snapshot: &str, previous: Option<usize>) -> Option<Self> {
        let range = request.range()?;
        let state = EditState {
            snapshot: snapshot.to_string(),
            range,
            previous,
        };
        let command = match request {
            EditRequest::Copy { .. } => Command::Copy(state),
            EditRequest::Paste { text, .. } => Command::Paste { state, text },
            EditRequest::Cut { .. } => Command::Cut(state),
            EditRequest::Delete { .. } => Command::Delete(state),
            EditRequest::Undo | EditRequest::Redo => return None,
        };
        Some(command)
    }

    /// Kind tag.
    pub fn kind(&self) -> CommandKind {
        match self {
            Command::Copy(_) => CommandKind::Copy,
            Command::Paste { .. } => CommandKind::Paste,
            Command::Cut(_) => CommandKind::Cut,
            Command::Delete(_) => CommandKind::Delete,
            Command::Undo { .. } => CommandKind::Undo,
            Command::Redo { .. } => CommandKind::Redo,
        }
    }

    /// Bound state; `None` for Undo/Redo.
    pub fn state(&self) -> Option<&EditState> {
        match self {
            Command::Copy(state)
            | Command::Paste { state, .. }
            | Command::Cut(state)
            | Command::Delete(state) => Some(state),
            Command::Undo { .. } | Command::Redo { .. } => None,
        }
    }

    pub(crate) fn state_mut(&mut self) -> Option<&mut EditState> {
        match self {
            Command::Copy(state)
            | Command::Paste { state, .. }
            | Command::Cut(state)
            | Command::Delete(state) => Some(state),
            Command::Undo { .. } | Command::Redo { .. } => None,
        }
    }

    /// Buffer content before execution (empty for Undo/Redo).
    pub fn snapshot(&self) -> &str {
        self.state().map_or("", |state| state.snapshot.as_str())
    }

    /// Inserted text (empty for every kind but Paste).
    pub fn paste_text(&self) -> &str {
        match self {
            Command::Paste { text, .. } => text,
            _ => "",
        }
    }

    /// Range acted on; `(0, 0)` for Undo/Redo.
    pub fn range(&self) -> CharRange {
        self.state().map_or(CharRange::new(0, 0), |state| state.range)
    }

    /// History index of the preceding command.
    pub fn previous(&self) -> Option<usize> {
        self.state().and_then(|state| state.previous)
    }

    /// History index targeted by Undo/Redo.
    pub fn target(&self) -> Option<usize> {
        match *self {
            Command::Undo { target } | Command::Redo { target } => Some(target),
            _ => None,
        }
    }

    /// Run the command and return the new buffer content.
    ///
    /// Copy and Cut append the covered text to `clipboard`. Undo/Redo resolve their target in
    /// `history`; the target index must be valid for it.
    pub fn execute(&self, history: &[Command], clipboard: &mut Clipboard) -> String {
        match self {
            Command::Copy(state) | Command::Cut(state) => {
                clipboard.push(text::slice(&state.snapshot, state.range));
                self.post_state()
            }
            Command::Paste { .. } | Command::Delete(_) => self.post_state(),
            Command::Undo { target } => history[*target].undo(),
            Command::Redo { target } => history[*target].post_state(),
        }
    }

    /// Buffer content right after this command executed, recomputed from the snapshot.
    ///
    /// Never touches a clipboard, so redoing a Cut does not copy the fragment a second time.
    pub fn post_state(&self) -> String {
        match self {
            Command::Copy(state) => state.snapshot.clone(),
            Command::Paste { state, text } => text::paste(&state.snapshot, state.range, text),
            Command::Cut(state) | Command::Delete(state) => {
                text::remove(&state.snapshot, state.range)
            }
            Command::Undo { .. } | Command::Redo { .. } => String::new(),
        }
    }

    /// Buffer content once this command is reversed.
    ///
    /// Copy is recorded as inert: reversing it yields the buffer it ran on, which it never
    /// changed.
    pub fn undo(&self) -> String {
        self.snapshot().to_string()
    }

    /// Independent copy for storing in history; `None` for kinds that are never recorded.
    pub fn duplicate(&self) -> Option<Command> {
        self.kind().is_recorded().then(|| self.clone())
    }
}
