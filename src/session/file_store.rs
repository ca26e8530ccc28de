//! File-persisted session store used by the terminal client.
//!
//! The file holds a single JSON document, `{"state": <Session>, "version": 0}`,
//! the same envelope the browser build keeps under `pina-auth-session`.
//! Reads happen once at open; every mutation writes through via a temp file
//! and rename so a crash never leaves a half-written session behind.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use serde::{Deserialize, Serialize};

use super::store::SessionStore;
use super::types::{Session, SessionData};

const STORAGE_VERSION: u32 = 0;

#[derive(Debug, thiserror::Error)]
pub enum SessionFileError {
    #[error("failed to read session file {path}: {source}")]
    Read { path: PathBuf, source: std::io::Error },
    #[error("failed to write session file {path}: {source}")]
    Write { path: PathBuf, source: std::io::Error },
    #[error("failed to encode session: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Serialize, Deserialize)]
struct Persisted {
    state: Session,
    version: u32,
}

pub struct FileStore {
    path: PathBuf,
    session: RwLock<Session>,
}

impl FileStore {
    /// Open the store at `path`.
    ///
    /// A missing file yields an empty session. A corrupt file is logged and
    /// treated as empty; the next write replaces it.
    ///
    /// # Errors
    ///
    /// Returns an error when the file exists but cannot be read.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, SessionFileError> {
        let path = path.into();
        let session = match std::fs::read_to_string(&path) {
            Ok(raw) => decode(&path, &raw),
            Err(e) if e.kind() == ErrorKind::NotFound => Session::default(),
            Err(source) => return Err(SessionFileError::Read { path, source }),
        };
        Ok(Self { path, session: RwLock::new(session) })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn replace(&self, session: Session) {
        let mut guard = self.session.write().unwrap_or_else(PoisonError::into_inner);
        if let Err(e) = write_atomic(&self.path, &session) {
            tracing::warn!(error = %e, "session not persisted");
        }
        *guard = session;
    }
}

impl SessionStore for FileStore {
    fn snapshot(&self) -> Session {
        self.session.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn set_session(&self, data: SessionData) {
        self.replace(Session::from(data));
    }

    fn clear_session(&self) {
        self.replace(Session::default());
    }
}

fn decode(path: &Path, raw: &str) -> Session {
    match serde_json::from_str::<Persisted>(raw) {
        // A half-populated session on disk is discarded rather than trusted.
        Ok(persisted) if persisted.state.is_authenticated() || persisted.state == Session::default() => {
            persisted.state
        }
        Ok(_) => {
            tracing::warn!(path = %path.display(), "partial session on disk; ignoring");
            Session::default()
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "corrupt session file; ignoring");
            Session::default()
        }
    }
}

fn write_atomic(path: &Path, session: &Session) -> Result<(), SessionFileError> {
    let body = serde_json::to_string_pretty(&Persisted { state: session.clone(), version: STORAGE_VERSION })?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| SessionFileError::Write { path: path.to_path_buf(), source })?;
    }

    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, body).map_err(|source| SessionFileError::Write { path: tmp.clone(), source })?;
    std::fs::rename(&tmp, path).map_err(|source| SessionFileError::Write { path: path.to_path_buf(), source })
}

#[cfg(test)]
#[path = "file_store_test.rs"]
mod tests;
