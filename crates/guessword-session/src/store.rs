//! Storage backends for the session unit.
//!
//! A [`SessionStore`] holds one [`StoredSession`] and offers only whole-unit
//! operations: load it, replace it, clear it. There is no per-field write,
//! so a reader can never observe an identity with a token but no username,
//! or a logout that removed the token but left the game id behind.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use crate::{SessionError, StoredSession};

/// Durable home of the session unit.
///
/// Methods take `&self` so one store can be shared (via `Arc`) between
/// the controller and anything else that needs to read or clear it,
/// including a logout that lands while a guess is still in flight.
pub trait SessionStore: Send + Sync + 'static {
    /// Reads the whole unit. An empty or unreadable store yields
    /// `StoredSession::default()`.
    ///
    /// # Errors
    /// Returns [`SessionError`] only when the backend itself fails.
    fn load(&self) -> Result<StoredSession, SessionError>;

    /// Overwrites the whole unit.
    ///
    /// # Errors
    /// Returns [`SessionError`] when the write fails; the previous unit is
    /// left in place.
    fn replace(&self, session: StoredSession) -> Result<(), SessionError>;

    /// Removes the whole unit.
    ///
    /// # Errors
    /// Returns [`SessionError`] when the backend can't remove it.
    fn clear(&self) -> Result<(), SessionError>;
}

// ---------------------------------------------------------------------------
// MemoryStore
// ---------------------------------------------------------------------------

/// A [`SessionStore`] that lives only as long as the process.
///
/// Used by tests and by callers that don't need to survive a restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<StoredSession>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-loaded with `session`.
    pub fn with_session(session: StoredSession) -> Self {
        Self {
            inner: Mutex::new(session),
        }
    }
}

impl SessionStore for MemoryStore {
    fn load(&self) -> Result<StoredSession, SessionError> {
        // Writes are a single assignment, so even a poisoned lock holds a
        // whole unit.
        let guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(guard.clone())
    }

    fn replace(&self, session: StoredSession) -> Result<(), SessionError> {
        let mut guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        *guard = session;
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        let mut guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        *guard = StoredSession::default();
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// FileStore
// ---------------------------------------------------------------------------

/// A [`SessionStore`] backed by one JSON file.
///
/// Survives process restarts (the terminal client's equivalent of a page
/// reload) but not [`clear`](SessionStore::clear).
///
/// ## Atomicity
///
/// `replace` writes the whole unit to a sibling `*.tmp` file and renames
/// it over the target. On the same filesystem a rename is atomic, so a
/// reader sees either the old unit or the new one.
///
/// A file that fails to parse is treated as empty: a corrupt or partial
/// session is "nothing to do", the same as no session at all.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Creates a store at `path`. The file isn't touched until first use.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn io_error(&self, path: &Path, source: std::io::Error) -> SessionError {
        SessionError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

impl SessionStore for FileStore {
    fn load(&self) -> Result<StoredSession, SessionError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Ok(StoredSession::default());
            }
            Err(e) => return Err(self.io_error(&self.path, e)),
        };

        match serde_json::from_slice(&bytes) {
            Ok(session) => Ok(session),
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "session file unreadable, treating as empty"
                );
                Ok(StoredSession::default())
            }
        }
    }

    fn replace(&self, session: StoredSession) -> Result<(), SessionError> {
        let bytes = serde_json::to_vec_pretty(&session).map_err(SessionError::Encode)?;
        let temp = self.temp_path();

        fs::write(&temp, bytes).map_err(|e| self.io_error(&temp, e))?;
        if let Err(e) = fs::rename(&temp, &self.path) {
            let _ = fs::remove_file(&temp);
            return Err(self.io_error(&self.path, e));
        }
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.io_error(&self.path, e)),
        }
    }
}

// =========================================================================
// Tests
// =========================================================================
