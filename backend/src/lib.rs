//! Recipe authoring, sharing and permission core.
//!
//! The crate follows a hexagonal layout: [`domain`] holds the recipe model,
//! the permission evaluator, the session and recipe stores, and the ports
//! they talk through; [`outbound`] provides the driven adapters; the
//! `recipehub` binary is a thin inbound adapter over both.

pub mod domain;
pub mod example_data;
pub mod outbound;
pub mod settings;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use domain::{
    Capability, DomainError, ErrorCode, Recipe, RecipeStore, SessionStore, User, can_perform,
};
