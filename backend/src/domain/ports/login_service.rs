//! Driving port for login/authentication use-cases.
//!
//! The session store calls this port to turn credentials into a user
//! identity without knowing how (or whether) they are checked.

use async_trait::async_trait;

use crate::domain::{DomainError, LoginCredentials, User, UserRole};

/// Identifier of the demo identity returned by [`FixtureLoginService`].
pub const DEMO_USER_ID: &str = "user-1";

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the authenticated user.
    async fn login(&self, credentials: &LoginCredentials) -> Result<User, DomainError>;
}

/// Demo identity used while no real authentication backend exists.
///
/// # Examples
/// ```
/// use recipehub::domain::ports::demo_user;
///
/// let user = demo_user().unwrap();
/// assert_eq!(user.id().as_str(), "user-1");
/// assert_eq!(user.name().as_ref(), "Jamie Oliver");
/// ```
pub fn demo_user() -> Result<User, DomainError> {
    User::try_from_strings(DEMO_USER_ID, "Jamie Oliver", "jamie@example.com")
        .map(|user| user.with_role(UserRole::LoggedIn))
        .map_err(|err| DomainError::internal(format!("invalid demo user: {err}")))
}

/// In-memory authenticator that accepts any well-formed credentials.
///
/// Every login yields [`demo_user`], whatever email was entered.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureLoginService;

#[async_trait]
impl LoginService for FixtureLoginService {
    async fn login(&self, credentials: &LoginCredentials) -> Result<User, DomainError> {
        tracing::debug!(email = credentials.email(), "fixture login");
        demo_user()
    }
}
