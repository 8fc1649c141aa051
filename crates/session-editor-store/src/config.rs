//! On-disk layout configuration.
//!
//! Every path is relative to the store root. With the defaults the tree looks like:
//!
//! ```text
//! <root>/
//! ├── Metadata/
//! │   ├── Available_Sessions.txt   session index, one file name per line
//! │   ├── Sessions/<name>.txt      history metadata
//! │   └── Clipboard/<name>.txt     clipboard fragments
//! └── Sessions/<name>.txt          buffer content
//! ```

use crate::error::StoreError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// File name of the optional JSON configuration inside the store root.
pub const CONFIG_FILE_NAME: &str = "session-editor.json";

/// Directory and file names used by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    /// Metadata root, relative to the store root.
    pub metadata_dir: PathBuf,
    /// History metadata directory, relative to the metadata root.
    pub history_dir: PathBuf,
    /// Clipboard directory, relative to the metadata root.
    pub clipboard_dir: PathBuf,
    /// Session index file, relative to the metadata root.
    pub index_file: PathBuf,
    /// Buffer content directory, relative to the store root.
    pub content_dir: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            metadata_dir: PathBuf::from("Metadata"),
            history_dir: PathBuf::from("Sessions"),
            clipboard_dir: PathBuf::from("Clipboard"),
            index_file: PathBuf::from("Available_Sessions.txt"),
            content_dir: PathBuf::from("Sessions"),
        }
    }
}

impl StoreConfig {
    /// Parse a JSON configuration; missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, StoreError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a JSON configuration file, falling back to the defaults when it does not exist.
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        match fs::read_to_string(path) {
            Ok(json) => Self::from_json_str(&json),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(StoreError::read(path, err)),
        }
    }

    /// Resolve the configured names against `root`.
    pub fn layout(&self, root: &Path) -> StoreLayout {
        let metadata = root.join(&self.metadata_dir);
        StoreLayout {
            history_dir: metadata.join(&self.history_dir),
            clipboard_dir: metadata.join(&self.clipboard_dir),
            index_path: metadata.join(&self.index_file),
            content_dir: root.join(&self.content_dir),
        }
    }
}

/// Absolute (root-resolved) store paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreLayout {
    /// Directory holding one history metadata file per session.
    pub history_dir: PathBuf,
    /// Directory holding one clipboard file per session.
    pub clipboard_dir: PathBuf,
    /// Session index file.
    pub index_path: PathBuf,
    /// Directory holding one buffer content file per session.
    pub content_dir: PathBuf,
}

impl StoreLayout {
    /// History metadata file of a session.
    pub fn history_path(&self, file_name: &str) -> PathBuf {
        self.history_dir.join(file_name)
    }

    /// Clipboard file of a session.
    pub fn clipboard_path(&self, file_name: &str) -> PathBuf {
        self.clipboard_dir.join(file_name)
    }

    /// Buffer content file of a session.
    pub fn content_path(&self, file_name: &str) -> PathBuf {
        self.content_dir.join(file_name)
    }
}
