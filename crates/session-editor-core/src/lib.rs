#![warn(missing_docs)]
//! Session Editor Core - Headless Command-History Engine
//!
//! # Overview
//!
//! `session-editor-core` models copy, cut, paste and delete on an in-memory text buffer as
//! replayable, reversible commands with unlimited linear undo/redo. Editing happens inside
//! independently named sessions, each owning its own buffer, history and clipboard.
//! It performs no I/O; persistence lives in `session-editor-store`.
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  Engine (dispatch / create / delete / list) │  ← Public API
//! ├─────────────────────────────────────────────┤
//! │  SessionRegistry                            │  ← Ordered sessions, stable ids
//! ├─────────────────────────────────────────────┤
//! │  Session (buffer + history + clipboard)     │
//! ├─────────────────────────────────────────────┤
//! │  CommandHistory (cursor state machine)      │  ← Undo / redo / truncation
//! ├─────────────────────────────────────────────┤
//! │  Command variants + Clipboard               │
//! ├─────────────────────────────────────────────┤
//! │  Char-offset splicing (Rope)                │  ← Text edits
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use session_editor_core::{EditRequest, Engine};
//!
//! let mut engine = Engine::new();
//! let id = engine.create_session("notes").unwrap();
//!
//! let text = engine
//!     .dispatch(id, EditRequest::Paste { start: 0, end: 0, text: "AB".to_string() })
//!     .unwrap();
//! assert_eq!(text, "AB");
//!
//! assert_eq!(engine.dispatch(id, EditRequest::Undo).unwrap(), "");
//! assert_eq!(engine.dispatch(id, EditRequest::Redo).unwrap(), "AB");
//! assert_eq!(engine.list_sessions(), ["notes.txt"]);
//! ```
//!
//! # Module Description
//!
//! - [`text`] - inclusive char ranges and buffer splicing
//! - [`clipboard`] - per-session fragment log
//! - [`command`] - command kinds, requests and bound commands
//! - [`history`] - recorded commands and the undo/redo cursor
//! - [`session`] - named sessions and name validation
//! - [`registry`] - ordered session collection
//! - [`engine`] - the facade used by the UI layer

pub mod clipboard;
pub mod command;
pub mod engine;
mod error;
pub mod history;
pub mod registry;
pub mod session;
pub mod text;

pub use clipboard::Clipboard;
pub use command::{Command, CommandKind, EditRequest, EditState};
pub use engine::Engine;
pub use error::EngineError;
pub use history::CommandHistory;
pub use registry::{SessionId, SessionRegistry};
pub use session::{FORBIDDEN_NAME_CHARS, SESSION_FILE_SUFFIX, Session, session_file_name};
pub use text::CharRange;
