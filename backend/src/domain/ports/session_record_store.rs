//! Driven port for the persisted session record.
//!
//! The record is the serialised [`User`] of the signed-in identity, kept
//! under a single well-known key. Adapters store it wherever suits the
//! host: a file, browser storage, or memory in tests.

use std::sync::Mutex;

use crate::domain::User;

use super::define_port_error;

/// Fixed key the session record is stored under.
pub const SESSION_RECORD_KEY: &str = "recipehub_user";

define_port_error! {
    /// Errors raised by session record adapters.
    pub enum SessionRecordError {
        /// The backing storage could not be read or written.
        Io { message: String } => "session record storage failed: {message}",
        /// A record exists but is not a valid user.
        Malformed { message: String } => "session record is malformed: {message}",
    }
}

/// Port for loading, saving and clearing the persisted session record.
#[cfg_attr(test, mockall::automock)]
pub trait SessionRecordStore: Send + Sync {
    /// Read the stored user, `Ok(None)` when nothing is stored.
    fn load(&self) -> Result<Option<User>, SessionRecordError>;

    /// Replace the stored record with `user`.
    fn save(&self, user: &User) -> Result<(), SessionRecordError>;

    /// Remove the stored record. Clearing an empty store succeeds.
    fn clear(&self) -> Result<(), SessionRecordError>;
}

/// In-memory session record store holding the raw serialised record.
///
/// Keeping the raw text rather than a `User` lets tests seed malformed
/// records with [`FixtureSessionRecordStore::from_raw`].
#[derive(Debug, Default)]
pub struct FixtureSessionRecordStore {
    raw: Mutex<Option<String>>,
}

impl FixtureSessionRecordStore {
    /// Create a store whose record is the given raw text.
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self {
            raw: Mutex::new(Some(raw.into())),
        }
    }

    /// Raw stored record, if any.
    pub fn raw(&self) -> Result<Option<String>, SessionRecordError> {
        Ok(self.lock()?.clone())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Option<String>>, SessionRecordError> {
        self.raw
            .lock()
            .map_err(|err| SessionRecordError::io(format!("fixture store poisoned: {err}")))
    }
}

impl SessionRecordStore for FixtureSessionRecordStore {
    fn load(&self) -> Result<Option<User>, SessionRecordError> {
        let guard = self.lock()?;
        guard
            .as_deref()
            .map(|raw| {
                serde_json::from_str(raw)
                    .map_err(|err| SessionRecordError::malformed(err.to_string()))
            })
            .transpose()
    }

    fn save(&self, user: &User) -> Result<(), SessionRecordError> {
        let raw = serde_json::to_string(user)
            .map_err(|err| SessionRecordError::io(err.to_string()))?;
        *self.lock()? = Some(raw);
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionRecordError> {
        *self.lock()? = None;
        Ok(())
    }
}
