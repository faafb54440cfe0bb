//! Capability evaluation for recipes.
//!
//! [`can_perform`] is a pure function of the current user, an optional
//! recipe and the requested [`Capability`]. Denial is not an error: callers
//! decide whether to hide functionality, redirect, or use the guards in
//! [`crate::domain::recipe_access`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{Recipe, User};

/// Something a user may ask to do with a recipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Browse public recipes.
    ViewPublic,
    /// Author a new recipe.
    CreateRecipe,
    /// Edit a recipe the user owns.
    EditOwn,
    /// Edit a recipe the user was invited to.
    EditIfInvited,
    /// Add or remove collaborators.
    InviteCollaborators,
}

impl Capability {
    /// Every capability, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::ViewPublic,
        Self::CreateRecipe,
        Self::EditOwn,
        Self::EditIfInvited,
        Self::InviteCollaborators,
    ];

    /// Stable snake_case name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ViewPublic => "view_public",
            Self::CreateRecipe => "create_recipe",
            Self::EditOwn => "edit_own",
            Self::EditIfInvited => "edit_if_invited",
            Self::InviteCollaborators => "invite_collaborators",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when parsing a capability name that is not one of
/// [`Capability::ALL`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown capability: {0}")]
pub struct UnknownCapability(pub String);

impl FromStr for Capability {
    type Err = UnknownCapability;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|capability| capability.as_str() == value)
            .ok_or_else(|| UnknownCapability(value.to_owned()))
    }
}

/// Decide whether `current_user` may exercise `capability` on `recipe`.
///
/// - Anonymous callers may only [`Capability::ViewPublic`].
/// - Authenticated callers may always view public recipes and create new
///   ones.
/// - [`Capability::EditOwn`] and [`Capability::InviteCollaborators`] require
///   ownership. Co-owner collaborators do not gain invite rights.
/// - [`Capability::EditIfInvited`] requires membership in the recipe's
///   collaborators, in any role.
///
/// Ownership-dependent capabilities are denied when `recipe` is `None`.
///
/// # Examples
/// ```
/// use recipehub::domain::{Capability, can_perform};
///
/// assert!(can_perform(None, None, Capability::ViewPublic));
/// assert!(!can_perform(None, None, Capability::CreateRecipe));
/// ```
pub fn can_perform(
    current_user: Option<&User>,
    recipe: Option<&Recipe>,
    capability: Capability,
) -> bool {
    let Some(user) = current_user else {
        return capability == Capability::ViewPublic;
    };

    match capability {
        Capability::ViewPublic | Capability::CreateRecipe => true,
        Capability::EditOwn | Capability::InviteCollaborators => {
            recipe.is_some_and(|recipe| recipe.is_owned_by(user.id()))
        }
        Capability::EditIfInvited => recipe.is_some_and(|recipe| recipe.has_collaborator(user.id())),
    }
}

/// Whether the user may open the recipe editor: owner or invited.
pub fn can_edit(current_user: Option<&User>, recipe: Option<&Recipe>) -> bool {
    can_perform(current_user, recipe, Capability::EditOwn)
        || can_perform(current_user, recipe, Capability::EditIfInvited)
}
