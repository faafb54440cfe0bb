//! Session lifecycle: login, logout and restoring a persisted identity.
//!
//! The store holds exactly one of two states, anonymous or authenticated as
//! a user. Authentication is delegated to a [`LoginService`]; the signed-in
//! identity is mirrored into a [`SessionRecordStore`] so a later process can
//! pick it up again with [`SessionStore::restore_session`].

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::ports::{LoginService, SessionRecordError, SessionRecordStore};
use super::{Capability, DomainError, LoginCredentials, Recipe, User, can_perform};

/// Current authentication state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionState {
    /// Nobody is signed in.
    #[default]
    Anonymous,
    /// Signed in as the contained user.
    Authenticated(User),
}

impl SessionState {
    /// The signed-in user, if any.
    pub fn user(&self) -> Option<&User> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated(user) => Some(user),
        }
    }
}

/// Holder of the current session.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use recipehub::domain::LoginCredentials;
/// use recipehub::domain::SessionStore;
/// use recipehub::domain::ports::{FixtureLoginService, FixtureSessionRecordStore};
///
/// # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
/// let mut session = SessionStore::new(
///     Arc::new(FixtureLoginService),
///     Arc::new(FixtureSessionRecordStore::default()),
/// );
/// let creds = LoginCredentials::try_from_parts("jamie@example.com", "pw").unwrap();
/// session.login(&creds).await.unwrap();
/// assert!(session.is_authenticated());
/// # });
/// ```
pub struct SessionStore<L: ?Sized, S: ?Sized> {
    login_service: Arc<L>,
    records: Arc<S>,
    state: SessionState,
}

impl<L, S> SessionStore<L, S>
where
    L: LoginService + ?Sized,
    S: SessionRecordStore + ?Sized,
{
    /// Create an anonymous session.
    pub fn new(login_service: Arc<L>, records: Arc<S>) -> Self {
        Self {
            login_service,
            records,
            state: SessionState::Anonymous,
        }
    }

    /// Authenticate and persist the resulting identity.
    ///
    /// Failing to persist the record is logged and does not undo the login.
    ///
    /// # Errors
    /// Returns the login service's error when authentication fails; the
    /// session is left unchanged in that case.
    pub async fn login(&mut self, credentials: &LoginCredentials) -> Result<&User, DomainError> {
        let user = self.login_service.login(credentials).await?;
        if let Err(error) = self.records.save(&user) {
            warn!(%error, user_id = %user.id(), "failed to persist session record");
        }
        info!(user_id = %user.id(), "user logged in");
        self.state = SessionState::Authenticated(user);
        self.state
            .user()
            .ok_or_else(|| DomainError::internal("session lost its user after login"))
    }

    /// Sign out and forget the persisted record.
    pub fn logout(&mut self) {
        if let SessionState::Authenticated(user) = &self.state {
            info!(user_id = %user.id(), "user logged out");
        }
        self.state = SessionState::Anonymous;
        if let Err(error) = self.records.clear() {
            warn!(%error, "failed to clear session record");
        }
    }

    /// Re-establish the session from the persisted record.
    ///
    /// A missing, unreadable or malformed record leaves the session
    /// anonymous. When already signed in, the current user is returned and
    /// the record is not consulted.
    pub fn restore_session(&mut self) -> Option<&User> {
        if self.state.user().is_none() {
            match self.records.load() {
                Ok(Some(user)) => {
                    debug!(user_id = %user.id(), "session restored");
                    self.state = SessionState::Authenticated(user);
                }
                Ok(None) => debug!("no session record to restore"),
                Err(error @ SessionRecordError::Malformed { .. }) => {
                    warn!(%error, "ignoring malformed session record");
                }
                Err(error) => warn!(%error, "failed to read session record"),
            }
        }
        self.state.user()
    }

    /// The signed-in user, if any.
    pub fn current_user(&self) -> Option<&User> {
        self.state.user()
    }

    /// Whether somebody is signed in.
    pub fn is_authenticated(&self) -> bool {
        self.state.user().is_some()
    }

    /// Current state.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Evaluate `capability` for the signed-in user.
    pub fn can_perform(&self, recipe: Option<&Recipe>, capability: Capability) -> bool {
        can_perform(self.current_user(), recipe, capability)
    }
}
