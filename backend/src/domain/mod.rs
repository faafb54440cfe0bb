//! Domain primitives, aggregates and services.
//!
//! Purpose: Define strongly typed recipe and user entities, the capability
//! rules that govern them, and the in-memory stores the application drives.
//! Keep types immutable where possible and document invariants and
//! serialisation contracts (serde) in each type's Rustdoc.
//!
//! Public surface:
//! - DomainError / ErrorCode: failure payload and stable identifier.
//! - User, Recipe and their value types.
//! - Capability / can_perform: the permission evaluator.
//! - RecipeStore and SessionStore: the application's state holders.
//! - ServingsMultiplier and CookSession: read-side helpers for viewing and
//!   cooking a recipe.

pub mod auth;
pub mod cook_mode;
pub mod error;
pub mod identifier;
pub mod permissions;
pub mod ports;
pub mod recipe;
pub mod recipe_access;
pub mod recipe_store;
pub mod scaling;
pub mod session;
pub mod user;

pub use self::auth::{
    LoginCredentials, LoginValidationError, SignupField, SignupForm, SignupValidationError,
};
pub use self::cook_mode::{CookSession, TimerTick, format_countdown};
pub use self::error::{DomainError, DomainErrorValidationError, ErrorCode};
pub use self::identifier::IdentifierValidationError;
pub use self::permissions::{Capability, UnknownCapability, can_edit, can_perform};
pub use self::recipe::{
    Collaborator, CollaboratorInvite, CollaboratorRole, DEFAULT_SERVINGS, Ingredient,
    IngredientId, Quantity, Recipe, RecipeDraft, RecipeId, RecipeOwner, RecipeValidationError,
    Servings, Step, StepId, normalize_tags,
};
pub use self::recipe_access::{authorize_edit, authorize_invite, find_recipe};
pub use self::recipe_store::RecipeStore;
pub use self::scaling::{ScalingError, ServingsMultiplier, scale, scaled_servings};
pub use self::session::{SessionState, SessionStore};
pub use self::user::{
    DISPLAY_NAME_MAX, DisplayName, EmailAddress, User, UserId, UserRole, UserValidationError,
};

/// Convenient domain result alias.
///
/// # Examples
/// ```
/// use recipehub::domain::{DomainError, DomainResult};
///
/// fn guard() -> DomainResult<()> {
///     Err(DomainError::forbidden("nope"))
/// }
/// assert!(guard().is_err());
/// ```
pub type DomainResult<T> = Result<T, DomainError>;
