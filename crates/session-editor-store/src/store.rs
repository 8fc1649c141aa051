//! Filesystem-backed session store.
//!
//! [`SessionStore`] maps sessions onto the layout described in [`crate::config`]. Loading is
//! tolerant: a missing index means "no sessions yet", and a session whose files cannot be read
//! or decoded is logged and skipped. Saving is best-effort: one session failing to write does
//! not stop the others.

use crate::codec;
use crate::config::{CONFIG_FILE_NAME, StoreConfig, StoreLayout};
use crate::error::{CodecError, StoreError};
use session_editor_core::{Clipboard, Session, SessionRegistry};
use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Read a whole text file.
pub fn read_whole_file(path: &Path) -> Result<String, StoreError> {
    fs::read_to_string(path).map_err(|err| StoreError::read(path, err))
}

/// Replace the contents of a file (creating it if needed) with exactly `text`.
pub fn overwrite_file(path: &Path, text: &str) -> Result<(), StoreError> {
    fs::write(path, text).map_err(|err| StoreError::write(path, err))
}

fn read_if_exists(path: &Path) -> Result<Option<String>, StoreError> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(StoreError::read(path, err)),
    }
}

fn ensure_dir(dir: &Path) -> Result<(), StoreError> {
    fs::create_dir_all(dir).map_err(|err| StoreError::write(dir, err))
}

/// Outcome of [`SessionStore::save_all`].
#[derive(Debug, Default)]
pub struct SaveReport {
    /// Sessions whose metadata was written.
    pub saved: Vec<String>,
    /// Sessions (or the index, under its path) that failed to write, with the cause.
    pub failed: Vec<(String, StoreError)>,
    /// Orphaned metadata files removed by reconciliation.
    pub removed: Vec<PathBuf>,
}

impl SaveReport {
    /// Whether every write succeeded.
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Persists sessions under a root directory.
#[derive(Debug, Clone)]
pub struct SessionStore {
    layout: StoreLayout,
}

impl SessionStore {
    /// Create a store with an explicit configuration.
    pub fn new(root: &Path, config: &StoreConfig) -> Self {
        Self {
            layout: config.layout(root),
        }
    }

    /// Create a store, reading `session-editor.json` from `root` when present.
    pub fn open(root: &Path) -> Result<Self, StoreError> {
        let config = StoreConfig::load(&root.join(CONFIG_FILE_NAME))?;
        Ok(Self::new(root, &config))
    }

    /// Resolved paths.
    pub fn layout(&self) -> &StoreLayout {
        &self.layout
    }

    /// Write a session's history and clipboard files.
    ///
    /// The encoding is deterministic, so saving an unchanged session rewrites identical bytes.
    pub fn save(&self, session: &Session) -> Result<(), StoreError> {
        let name = session.file_name();
        ensure_dir(&self.layout.history_dir)?;
        ensure_dir(&self.layout.clipboard_dir)?;
        overwrite_file(
            &self.layout.history_path(name),
            &codec::encode_history(session),
        )?;
        overwrite_file(
            &self.layout.clipboard_path(name),
            &codec::encode_clipboard(session.clipboard()),
        )?;
        debug!(session = name, commands = session.history().len(), "saved session metadata");
        Ok(())
    }

    /// Rewrite the session index with the registry's file names.
    pub fn write_index(&self, registry: &SessionRegistry) -> Result<(), StoreError> {
        if let Some(dir) = self.layout.index_path.parent() {
            ensure_dir(dir)?;
        }
        let mut index = String::new();
        for name in registry.names() {
            index.push_str(&name);
            index.push('\n');
        }
        overwrite_file(&self.layout.index_path, &index)
    }

    /// Save everything on shutdown: index, every session, then drop orphaned files.
    pub fn save_all(&self, registry: &SessionRegistry) -> SaveReport {
        let mut report = SaveReport::default();

        if let Err(err) = self.write_index(registry) {
            warn!(error = %err, "failed to write session index");
            report
                .failed
                .push((self.layout.index_path.display().to_string(), err));
        }

        for (_, session) in registry.iter() {
            match self.save(session) {
                Ok(()) => report.saved.push(session.file_name().to_string()),
                Err(err) => {
                    warn!(session = session.file_name(), error = %err, "failed to save session");
                    report.failed.push((session.file_name().to_string(), err));
                }
            }
        }

        match self.reconcile(registry) {
            Ok(removed) => report.removed = removed,
            Err(err) => {
                warn!(error = %err, "failed to reconcile metadata");
                report
                    .failed
                    .push((self.layout.history_dir.display().to_string(), err));
            }
        }

        info!(
            saved = report.saved.len(),
            failed = report.failed.len(),
            removed = report.removed.len(),
            "saved sessions"
        );
        report
    }

    /// Load every session listed in the index.
    ///
    /// A missing index yields an empty registry. Sessions that fail to load are skipped.
    pub fn load_all(&self) -> Result<SessionRegistry, StoreError> {
        let mut registry = SessionRegistry::new();
        let Some(index) = read_if_exists(&self.layout.index_path)? else {
            info!(index = %self.layout.index_path.display(), "no session index, starting empty");
            return Ok(registry);
        };

        let mut skipped = 0usize;
        for name in index.lines().map(str::trim).filter(|name| !name.is_empty()) {
            let loaded = self.load_session(name).and_then(|session| {
                registry.insert(session).map_err(|err| StoreError::Corrupt {
                    path: self.layout.history_path(name),
                    source: err.into(),
                })
            });
            if let Err(err) = loaded {
                warn!(session = name, error = %err, "skipping unrecoverable session");
                skipped += 1;
            }
        }

        info!(loaded = registry.len(), skipped, "loaded sessions");
        Ok(registry)
    }

    /// Load one session by file name.
    ///
    /// The name recorded inside the history file must match `file_name`.
    /// A missing clipboard file means an empty clipboard; a missing content file means the
    /// buffer is rebuilt from the history.
    pub fn load_session(&self, file_name: &str) -> Result<Session, StoreError> {
        let history_path = self.layout.history_path(file_name);
        let decoded = codec::decode_history(&read_whole_file(&history_path)?).map_err(|source| {
            StoreError::Corrupt {
                path: history_path.clone(),
                source,
            }
        })?;
        if decoded.file_name != file_name {
            return Err(StoreError::Corrupt {
                path: history_path,
                source: CodecError::NameMismatch {
                    expected: file_name.to_string(),
                    found: decoded.file_name,
                },
            });
        }

        let clipboard_path = self.layout.clipboard_path(file_name);
        let clipboard = match read_if_exists(&clipboard_path)? {
            Some(text) => codec::decode_clipboard(&text).map_err(|source| StoreError::Corrupt {
                path: clipboard_path,
                source,
            })?,
            None => Clipboard::new(),
        };

        let text = read_if_exists(&self.layout.content_path(file_name))?;
        decoded
            .into_session(clipboard, text)
            .map_err(|source| StoreError::Corrupt {
                path: history_path,
                source,
            })
    }

    /// Delete metadata files of sessions no longer in `registry`.
    ///
    /// Returns the removed paths. A file that cannot be removed is logged and left behind.
    pub fn reconcile(&self, registry: &SessionRegistry) -> Result<Vec<PathBuf>, StoreError> {
        let live: HashSet<String> = registry.names().into_iter().collect();
        let mut removed = Vec::new();
        for dir in [&self.layout.history_dir, &self.layout.clipboard_dir] {
            removed.extend(remove_orphans(dir, &live)?);
        }
        if !removed.is_empty() {
            info!(removed = removed.len(), "removed orphaned session metadata");
        }
        Ok(removed)
    }

    /// Write a session's buffer to its content file, creating the directory if needed.
    ///
    /// Called right after a session is created (empty buffer) and after every dispatch.
    pub fn write_content(&self, session: &Session) -> Result<PathBuf, StoreError> {
        ensure_dir(&self.layout.content_dir)?;
        let path = self.layout.content_path(session.file_name());
        overwrite_file(&path, session.text())?;
        Ok(path)
    }

    /// Remove the content file freed by a deleted session. A file that is already gone is fine.
    pub fn delete_content_file(&self, file_name: &str) -> Result<PathBuf, StoreError> {
        let path = self.layout.content_path(file_name);
        match fs::remove_file(&path) {
            Ok(()) => {}
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(err) => return Err(StoreError::write(path, err)),
        }
        debug!(path = %path.display(), "deleted session content");
        Ok(path)
    }
}

fn remove_orphans(dir: &Path, live: &HashSet<String>) -> Result<Vec<PathBuf>, StoreError> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(err) => return Err(StoreError::read(dir, err)),
    };

    let mut removed = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|err| StoreError::read(dir, err))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let is_live = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| live.contains(name));
        if is_live {
            continue;
        }
        match fs::remove_file(&path) {
            Ok(()) => removed.push(path),
            Err(err) => warn!(path = %path.display(), error = %err, "failed to remove orphan"),
        }
    }
    removed.sort();
    Ok(removed)
}
