//! File-backed [`SessionStore`] keeping the session in one JSON document.
//!
//! Writes go to a staging file in the same directory and are renamed over the
//! live file, so a crash mid-write never leaves a half-written session.

use std::io;
use std::path::Path;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs::Dir};
use serde::{Deserialize, Serialize};
use tracing::debug;
use zeroize::Zeroizing;

use crate::domain::ports::{SessionStore, SessionStoreError};
use crate::domain::{AuthenticatedUser, Session};

const SESSION_FILENAME: &str = "session.json";
const STAGING_FILENAME: &str = ".session.json.tmp";

#[derive(Serialize)]
struct StoredSessionRef<'a> {
    user: &'a AuthenticatedUser,
    token: &'a str,
}

#[derive(Deserialize)]
struct StoredSessionDto {
    user: AuthenticatedUser,
    token: String,
}

/// Session store rooted at a directory on disk.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    dir: Utf8PathBuf,
}

impl FileSessionStore {
    /// Store keeping its file under `dir`; the directory is created on first
    /// save.
    pub fn new(dir: impl Into<Utf8PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the session file.
    pub fn dir(&self) -> &Utf8Path {
        &self.dir
    }

    /// Full path of the session file.
    pub fn path(&self) -> Utf8PathBuf {
        self.dir.join(SESSION_FILENAME)
    }

    fn io_error(&self, error: &io::Error) -> SessionStoreError {
        SessionStoreError::io(format!("{}: {error}", self.dir))
    }

    fn open_existing(&self) -> Result<Option<Dir>, SessionStoreError> {
        match Dir::open_ambient_dir(&self.dir, ambient_authority()) {
            Ok(dir) => Ok(Some(dir)),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(error) => Err(self.io_error(&error)),
        }
    }

    fn open_or_create(&self) -> Result<Dir, SessionStoreError> {
        Dir::create_ambient_dir_all(&self.dir, ambient_authority())
            .map_err(|error| self.io_error(&error))?;
        Dir::open_ambient_dir(&self.dir, ambient_authority()).map_err(|error| self.io_error(&error))
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<Session>, SessionStoreError> {
        let Some(dir) = self.open_existing()? else {
            return Ok(None);
        };
        let raw = match dir.read_to_string(SESSION_FILENAME) {
            Ok(raw) => Zeroizing::new(raw),
            Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(error) => return Err(self.io_error(&error)),
        };
        let stored: StoredSessionDto = serde_json::from_str(&raw)
            .map_err(|error| SessionStoreError::corrupt(format!("{}: {error}", self.path())))?;
        debug!(path = %self.path(), "loaded stored session");
        Ok(Some(Session::new(stored.user, stored.token)))
    }

    fn save(&self, session: &Session) -> Result<(), SessionStoreError> {
        let dir = self.open_or_create()?;
        let encoded = serde_json::to_vec(&StoredSessionRef {
            user: session.user(),
            token: session.token(),
        })
        .map(Zeroizing::new)
        .map_err(|error| SessionStoreError::io(format!("encoding session: {error}")))?;

        dir.write(STAGING_FILENAME, encoded.as_slice())
            .map_err(|error| self.io_error(&error))?;
        replace_file(&dir, Path::new(STAGING_FILENAME), Path::new(SESSION_FILENAME))
            .map_err(|error| self.io_error(&error))?;
        debug!(path = %self.path(), "saved session");
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionStoreError> {
        let Some(dir) = self.open_existing()? else {
            return Ok(());
        };
        remove_file_if_exists(&dir, Path::new(SESSION_FILENAME))
            .map_err(|error| self.io_error(&error))?;
        debug!(path = %self.path(), "cleared stored session");
        Ok(())
    }
}

fn replace_file(directory: &Dir, from: &Path, to: &Path) -> io::Result<()> {
    remove_file_if_exists(directory, to)?;
    directory.rename(from, directory, to)
}

fn remove_file_if_exists(directory: &Dir, path: &Path) -> io::Result<()> {
    match directory.remove_file(path) {
        Ok(()) => Ok(()),
        Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(error) => Err(error),
    }
}
