//! File-backed session record store.
//!
//! The record lives in `<dir>/recipehub_user.json`. All access goes through
//! a `cap_std` directory handle opened once, so the adapter cannot touch
//! anything outside the configured directory.

use std::io;
use std::path::{Path, PathBuf};

use cap_std::{ambient_authority, fs::Dir};
use tracing::debug;

use crate::domain::User;
use crate::domain::ports::{SESSION_RECORD_KEY, SessionRecordError, SessionRecordStore};

/// [`SessionRecordStore`] writing the record to a JSON file.
#[derive(Debug)]
pub struct FileSessionRecordStore {
    dir: Dir,
    file_name: PathBuf,
}

impl FileSessionRecordStore {
    /// Open (creating if needed) the directory that holds the record.
    ///
    /// # Errors
    /// Returns [`SessionRecordError::Io`] when the directory cannot be
    /// created or opened.
    pub fn open(path: &Path) -> Result<Self, SessionRecordError> {
        Dir::create_ambient_dir_all(path, ambient_authority()).map_err(|err| {
            SessionRecordError::io(format!("create {}: {err}", path.display()))
        })?;
        let dir = Dir::open_ambient_dir(path, ambient_authority())
            .map_err(|err| SessionRecordError::io(format!("open {}: {err}", path.display())))?;
        Ok(Self {
            dir,
            file_name: Self::record_file_name(),
        })
    }

    /// File name used for the record.
    pub fn record_file_name() -> PathBuf {
        PathBuf::from(format!("{SESSION_RECORD_KEY}.json"))
    }
}

impl SessionRecordStore for FileSessionRecordStore {
    fn load(&self) -> Result<Option<User>, SessionRecordError> {
        let raw = match self.dir.read_to_string(&self.file_name) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(SessionRecordError::io(err.to_string())),
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|err| SessionRecordError::malformed(err.to_string()))
    }

    fn save(&self, user: &User) -> Result<(), SessionRecordError> {
        let raw = serde_json::to_vec_pretty(user)
            .map_err(|err| SessionRecordError::io(err.to_string()))?;
        self.dir
            .write(&self.file_name, raw)
            .map_err(|err| SessionRecordError::io(err.to_string()))?;
        debug!(user_id = %user.id(), "session record written");
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionRecordError> {
        match self.dir.remove_file(&self.file_name) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(SessionRecordError::io(err.to_string())),
        }
    }
}
