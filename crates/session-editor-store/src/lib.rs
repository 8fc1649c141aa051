#![warn(missing_docs)]
//! Persistence for `session-editor-core`.
//!
//! - [`codec`] - pure line-oriented encoding of history and clipboard
//! - [`config`] - on-disk layout, optionally read from `session-editor.json`
//! - [`store`] - filesystem store: save / load / reconcile, buffer content files
//!
//! ```rust
//! use session_editor_core::{EditRequest, Engine};
//! use session_editor_store::SessionStore;
//!
//! # let dir = std::env::temp_dir().join(format!("session-editor-doc-{}", std::process::id()));
//! # let _ = std::fs::remove_dir_all(&dir);
//! let store = SessionStore::open(&dir).unwrap();
//! let mut engine = Engine::with_registry(store.load_all().unwrap());
//!
//! let id = engine.create_session("notes").unwrap();
//! store.write_content(engine.session(id).unwrap()).unwrap();
//! engine
//!     .dispatch(id, EditRequest::Paste { start: 0, end: 0, text: "hello".to_string() })
//!     .unwrap();
//! store.write_content(engine.session(id).unwrap()).unwrap();
//!
//! let report = store.save_all(engine.registry());
//! assert!(report.is_complete());
//! assert_eq!(store.load_all().unwrap(), *engine.registry());
//! # std::fs::remove_dir_all(&dir).unwrap();
//! ```

pub mod codec;
pub mod config;
mod error;
pub mod store;

pub use codec::{
    DELIMITER, DecodedHistory, decode_clipboard, decode_history, encode_clipboard, encode_history,
};
pub use config::{CONFIG_FILE_NAME, StoreConfig, StoreLayout};
pub use error::{CodecError, StoreError};
pub use store::{SaveReport, SessionStore, overwrite_file, read_whole_file};
