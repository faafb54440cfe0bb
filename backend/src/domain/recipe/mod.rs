//! Recipe aggregate: ingredients, steps, owner snapshot and collaborators.
//!
//! Fields are public in the same way as other plain domain records; the
//! value types they are made of ([`Servings`], [`Quantity`], identifiers)
//! carry the invariants, so a `Recipe` cannot hold a negative quantity or a
//! zero serving count. Deserialization also rejects a blank title and
//! `updated_at < created_at`; the store upholds the remaining ownership
//! rules (the owner never changes).

use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::identifier::define_identifier;
use super::user::{DisplayName, EmailAddress, User, UserId};

#[cfg(test)]
mod tests;

define_identifier! {
    /// Stable recipe identifier.
    pub struct RecipeId;
    prefix = "recipe";
}

define_identifier! {
    /// Identifier of an ingredient line within a recipe.
    pub struct IngredientId;
    prefix = "ingredient";
}

define_identifier! {
    /// Identifier of a step within a recipe.
    pub struct StepId;
    prefix = "step";
}

/// Validation errors raised by recipe value types and drafts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecipeValidationError {
    /// Title was blank once trimmed.
    EmptyTitle,
    /// Serving count was zero.
    ZeroServings,
    /// Quantity was below zero.
    NegativeQuantity,
    /// Quantity was NaN or infinite.
    NonFiniteQuantity,
    /// Last update time precedes creation time.
    UpdatedBeforeCreated,
}

impl fmt::Display for RecipeValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "recipe title must not be empty"),
            Self::ZeroServings => write!(f, "servings must be a positive number"),
            Self::NegativeQuantity => write!(f, "ingredient quantity must not be negative"),
            Self::NonFiniteQuantity => write!(f, "ingredient quantity must be a finite number"),
            Self::UpdatedBeforeCreated => {
                write!(f, "recipe must not be updated before it was created")
            }
        }
    }
}

impl std::error::Error for RecipeValidationError {}

/// Default serving count for a new recipe.
pub const DEFAULT_SERVINGS: u32 = 4;

/// Positive number of servings a recipe yields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Servings(u32);

impl Servings {
    /// Validate a serving count.
    pub fn new(count: u32) -> Result<Self, RecipeValidationError> {
        if count == 0 {
            return Err(RecipeValidationError::ZeroServings);
        }
        Ok(Self(count))
    }

    /// Raw serving count.
    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for Servings {
    fn default() -> Self {
        Self(DEFAULT_SERVINGS)
    }
}

impl TryFrom<u32> for Servings {
    type Error = RecipeValidationError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Servings> for u32 {
    fn from(value: Servings) -> Self {
        value.0
    }
}

/// Non-negative, finite ingredient amount. May be fractional.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Quantity(f64);

impl Quantity {
    /// Validate an amount.
    pub fn new(amount: f64) -> Result<Self, RecipeValidationError> {
        if !amount.is_finite() {
            return Err(RecipeValidationError::NonFiniteQuantity);
        }
        if amount < 0.0 {
            return Err(RecipeValidationError::NegativeQuantity);
        }
        Ok(Self(amount))
    }

    /// Raw amount.
    pub fn get(self) -> f64 {
        self.0
    }

    /// Multiply by `factor`, saturating at `f64::MAX` and flooring at zero.
    ///
    /// A NaN factor leaves the amount unchanged.
    #[must_use]
    pub fn saturating_mul(self, factor: f64) -> Self {
        let product = self.0 * factor;
        if product.is_nan() {
            return self;
        }
        Self(product.clamp(0.0, f64::MAX))
    }
}

impl TryFrom<f64> for Quantity {
    type Error = RecipeValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Quantity> for f64 {
    fn from(value: Quantity) -> Self {
        value.0
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One ingredient line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct Ingredient {
    /// Line identifier.
    pub id: IngredientId,
    /// Ingredient name.
    pub name: String,
    /// Amount in `unit`.
    pub quantity: Quantity,
    /// Unit of measure; empty for countable items ("2 eggs").
    #[serde(default)]
    pub unit: String,
}

impl Ingredient {
    /// Create an ingredient line with a fresh identifier.
    pub fn new(name: impl Into<String>, quantity: Quantity, unit: impl Into<String>) -> Self {
        Self {
            id: IngredientId::random(),
            name: name.into(),
            quantity,
            unit: unit.into(),
        }
    }
}

/// One preparation step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct Step {
    /// Step identifier.
    pub id: StepId,
    /// What to do.
    pub description: String,
    /// Optional countdown for this step, in whole minutes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timer_minutes: Option<u32>,
}

impl Step {
    /// Create a step with a fresh identifier and no timer.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            id: StepId::random(),
            description: description.into(),
            timer_minutes: None,
        }
    }

    /// Attach a countdown timer to the step.
    #[must_use]
    pub fn with_timer(mut self, minutes: u32) -> Self {
        self.timer_minutes = Some(minutes);
        self
    }

    /// Timer length in seconds when the step has a positive timer.
    pub fn timer_seconds(&self) -> Option<u32> {
        self.timer_minutes
            .filter(|minutes| *minutes > 0)
            .map(|minutes| minutes.saturating_mul(60))
    }
}

/// Role of a collaborator on a recipe.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollaboratorRole {
    /// Co-owner. Does not confer invite rights.
    Owner,
    /// Editor.
    #[default]
    Editor,
}

impl fmt::Display for CollaboratorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Owner => write!(f, "Co-owner"),
            Self::Editor => write!(f, "Editor"),
        }
    }
}

/// A user invited to work on a recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct Collaborator {
    /// Collaborator identifier, in the same space as [`UserId`].
    pub id: UserId,
    /// Display name.
    pub name: DisplayName,
    /// Contact email.
    pub email: EmailAddress,
    /// Role on this recipe.
    pub role: CollaboratorRole,
    /// Optional avatar reference (usually a URL).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// Collaborator input: everything but the identifier, which the store
/// assigns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollaboratorInvite {
    /// Display name.
    pub name: DisplayName,
    /// Contact email.
    pub email: EmailAddress,
    /// Role on the recipe.
    pub role: CollaboratorRole,
    /// Optional avatar reference.
    pub avatar: Option<String>,
}

impl CollaboratorInvite {
    /// Build an invite whose display name is the email's local part.
    ///
    /// # Examples
    /// ```
    /// use recipehub::domain::{CollaboratorInvite, CollaboratorRole, EmailAddress};
    ///
    /// let email = EmailAddress::new("gordon@example.com").unwrap();
    /// let invite = CollaboratorInvite::from_email(email, CollaboratorRole::Editor).unwrap();
    /// assert_eq!(invite.name.as_ref(), "gordon");
    /// ```
    pub fn from_email(
        email: EmailAddress,
        role: CollaboratorRole,
    ) -> Result<Self, super::user::UserValidationError> {
        let name = DisplayName::new(email.local_part())?;
        Ok(Self {
            name,
            email,
            role,
            avatar: None,
        })
    }

    pub(crate) fn into_collaborator(self, id: UserId) -> Collaborator {
        let Self {
            name,
            email,
            role,
            avatar,
        } = self;
        Collaborator {
            id,
            name,
            email,
            role,
            avatar,
        }
    }
}

/// Snapshot of the owning user taken when the recipe was created.
///
/// Later changes to the user's name are not reflected here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RecipeOwner {
    /// Owner identifier.
    pub id: UserId,
    /// Owner name at creation time.
    pub name: DisplayName,
}

impl From<&User> for RecipeOwner {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().clone(),
            name: user.name().clone(),
        }
    }
}

/// A recipe with its owner snapshot and collaborators.
///
/// Deserialization rejects a blank title and an `updatedAt` earlier than
/// `createdAt`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RecipeDto", into = "RecipeDto")]
pub struct Recipe {
    /// Recipe identifier.
    pub id: RecipeId,
    /// Title.
    pub title: String,
    /// Free-text description.
    pub description: String,
    /// Default serving count.
    pub servings: Servings,
    /// Ingredient lines in display order.
    pub ingredients: Vec<Ingredient>,
    /// Steps in cooking order.
    pub steps: Vec<Step>,
    /// Tags.
    pub tags: BTreeSet<String>,
    /// Whether anyone, including anonymous visitors, may browse it.
    pub is_public: bool,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time; never earlier than `created_at`.
    pub updated_at: DateTime<Utc>,
    /// Owner snapshot.
    pub owner: RecipeOwner,
    /// Invited collaborators in invitation order.
    pub collaborators: Vec<Collaborator>,
}

impl Recipe {
    /// Whether `user_id` owns this recipe.
    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        &self.owner.id == user_id
    }

    /// Whether `user_id` appears among the collaborators, in any role.
    pub fn has_collaborator(&self, user_id: &UserId) -> bool {
        self.collaborators
            .iter()
            .any(|collaborator| &collaborator.id == user_id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
struct RecipeDto {
    id: RecipeId,
    title: String,
    #[serde(default)]
    description: String,
    servings: Servings,
    #[serde(default)]
    ingredients: Vec<Ingredient>,
    #[serde(default)]
    steps: Vec<Step>,
    #[serde(default)]
    tags: BTreeSet<String>,
    is_public: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    owner: RecipeOwner,
    #[serde(default)]
    collaborators: Vec<Collaborator>,
}

impl From<Recipe> for RecipeDto {
    fn from(value: Recipe) -> Self {
        let Recipe {
            id,
            title,
            description,
            servings,
            ingredients,
            steps,
            tags,
            is_public,
            created_at,
            updated_at,
            owner,
            collaborators,
        } = value;
        Self {
            id,
            title,
            description,
            servings,
            ingredients,
            steps,
            tags,
            is_public,
            created_at,
            updated_at,
            owner,
            collaborators,
        }
    }
}

impl TryFrom<RecipeDto> for Recipe {
    type Error = RecipeValidationError;

    fn try_from(value: RecipeDto) -> Result<Self, Self::Error> {
        if value.title.trim().is_empty() {
            return Err(RecipeValidationError::EmptyTitle);
        }
        if value.updated_at < value.created_at {
            return Err(RecipeValidationError::UpdatedBeforeCreated);
        }
        Ok(Self {
            id: value.id,
            title: value.title,
            description: value.description,
            servings: value.servings,
            ingredients: value.ingredients,
            steps: value.steps,
            tags: value.tags,
            is_public: value.is_public,
            created_at: value.created_at,
            updated_at: value.updated_at,
            owner: value.owner,
            collaborators: value.collaborators,
        })
    }
}

/// Creation input for a recipe: everything the author fills in.
///
/// # Examples
/// ```
/// use recipehub::domain::{RecipeDraft, Step};
///
/// let draft = RecipeDraft::new("Avocado Toast")
///     .unwrap()
///     .with_tags(["breakfast", " quick ", ""])
///     .with_step(Step::new("Toast bread").with_timer(3));
/// assert_eq!(draft.tags.len(), 2);
/// assert_eq!(draft.servings.get(), 4);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeDraft {
    /// Title; non-empty once trimmed.
    pub title: String,
    /// Description.
    pub description: String,
    /// Default serving count.
    pub servings: Servings,
    /// Ingredient lines.
    pub ingredients: Vec<Ingredient>,
    /// Steps.
    pub steps: Vec<Step>,
    /// Tags.
    pub tags: BTreeSet<String>,
    /// Visibility flag.
    pub is_public: bool,
}

impl RecipeDraft {
    /// Start a private draft with default servings.
    pub fn new(title: impl Into<String>) -> Result<Self, RecipeValidationError> {
        let title = title.into();
        let trimmed = title.trim();
        if trimmed.is_empty() {
            return Err(RecipeValidationError::EmptyTitle);
        }
        Ok(Self {
            title: trimmed.to_owned(),
            description: String::new(),
            servings: Servings::default(),
            ingredients: Vec::new(),
            steps: Vec::new(),
            tags: BTreeSet::new(),
            is_public: false,
        })
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the default serving count.
    #[must_use]
    pub fn with_servings(mut self, servings: Servings) -> Self {
        self.servings = servings;
        self
    }

    /// Append an ingredient line.
    #[must_use]
    pub fn with_ingredient(mut self, ingredient: Ingredient) -> Self {
        self.ingredients.push(ingredient);
        self
    }

    /// Append a step.
    #[must_use]
    pub fn with_step(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }

    /// Add tags; blank entries are dropped and the rest trimmed.
    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.tags.extend(normalize_tags(tags));
        self
    }

    /// Set the visibility flag.
    #[must_use]
    pub fn public(mut self, is_public: bool) -> Self {
        self.is_public = is_public;
        self
    }

    pub(crate) fn into_recipe(self, id: RecipeId, owner: RecipeOwner, now: DateTime<Utc>) -> Recipe {
        let Self {
            title,
            description,
            servings,
            ingredients,
            steps,
            tags,
            is_public,
        } = self;
        Recipe {
            id,
            title,
            description,
            servings,
            ingredients,
            steps,
            tags,
            is_public,
            created_at: now,
            updated_at: now,
            owner,
            collaborators: Vec::new(),
        }
    }
}

/// Trim tags and drop blank ones.
pub fn normalize_tags<I, S>(tags: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tags.into_iter()
        .map(|tag| tag.as_ref().trim().to_owned())
        .filter(|tag| !tag.is_empty())
        .collect()
}
