//! Guards that turn a missing recipe or a denied capability into a
//! [`DomainError`].
//!
//! [`can_perform`] only answers yes or no, and store lookups only answer
//! `Some` or `None`. Callers that need to report why an action was refused
//! use these helpers instead: an unknown recipe maps to
//! [`ErrorCode::NotFound`], no signed-in user maps to
//! [`ErrorCode::Unauthorized`], a signed-in user lacking the right maps to
//! [`ErrorCode::Forbidden`].
//!
//! [`ErrorCode::NotFound`]: super::ErrorCode::NotFound
//! [`ErrorCode::Unauthorized`]: super::ErrorCode::Unauthorized
//! [`ErrorCode::Forbidden`]: super::ErrorCode::Forbidden

use serde_json::json;

use super::{
    Capability, DomainError, Recipe, RecipeId, RecipeStore, User, can_edit, can_perform,
};

/// Look up a recipe, reporting an unknown id as not found.
pub fn find_recipe<'a>(store: &'a RecipeStore, id: &RecipeId) -> Result<&'a Recipe, DomainError> {
    store.get_recipe_by_id(id).ok_or_else(|| {
        DomainError::not_found(format!("recipe {id} not found"))
            .with_details(json!({ "recipeId": id.as_str() }))
    })
}

/// Require that `user` may edit `recipe`, as owner or invited collaborator.
pub fn authorize_edit(user: Option<&User>, recipe: &Recipe) -> Result<(), DomainError> {
    let user = require_user(user)?;
    if can_edit(Some(user), Some(recipe)) {
        return Ok(());
    }
    Err(denied(user, recipe, "you do not have permission to edit this recipe"))
}

/// Require that `user` may manage collaborators on `recipe`.
pub fn authorize_invite(user: Option<&User>, recipe: &Recipe) -> Result<(), DomainError> {
    let user = require_user(user)?;
    if can_perform(Some(user), Some(recipe), Capability::InviteCollaborators) {
        return Ok(());
    }
    Err(denied(
        user,
        recipe,
        "only the recipe owner can manage collaborators",
    ))
}

fn require_user(user: Option<&User>) -> Result<&User, DomainError> {
    user.ok_or_else(|| DomainError::unauthorized("login required"))
}

fn denied(user: &User, recipe: &Recipe, message: &str) -> DomainError {
    DomainError::forbidden(message).with_details(json!({
        "recipeId": recipe.id.as_str(),
        "userId": user.id().as_str(),
    }))
}
