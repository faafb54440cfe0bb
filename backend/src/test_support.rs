//! Test utilities for the recipehub crate.
//!
//! Shared by unit tests (in `src/`) and integration tests (in `tests/`,
//! through the `test-support` feature). Nothing here is compiled into
//! release builds.

use std::sync::Mutex;
use std::time::Duration;

use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use mockable::Clock;
use tempfile::TempDir;

use crate::domain::{
    Collaborator, CollaboratorRole, Ingredient, Recipe, RecipeId, RecipeOwner, Servings, Step,
    User,
};

/// Clock whose time only moves when told to.
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    /// Start the clock at `now`.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    /// Move the clock forward.
    pub fn advance(&self, delta: Duration) {
        let delta = match TimeDelta::from_std(delta) {
            Ok(delta) => delta,
            Err(error) => {
                panic!("failed to convert Duration to TimeDelta: {error}; delta={delta:?}",)
            }
        };
        *self.lock_clock() += delta;
    }

    /// Set the clock to an arbitrary instant, including one in the past.
    pub fn set(&self, now: DateTime<Utc>) {
        *self.lock_clock() = now;
    }

    fn lock_clock(&self) -> std::sync::MutexGuard<'_, DateTime<Utc>> {
        match self.0.lock() {
            Ok(guard) => guard,
            Err(_) => panic!("clock mutex"),
        }
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.lock_clock()
    }
}

/// Fixed instant used as the default creation time of fixture recipes.
pub fn fixture_time() -> DateTime<Utc> {
    match Utc.with_ymd_and_hms(2023, 5, 10, 12, 0, 0).single() {
        Some(time) => time,
        None => panic!("fixture timestamp is valid"),
    }
}

/// Build a user whose email is `<id>@example.com`.
pub fn user(id: &str, name: &str) -> User {
    match User::try_from_strings(id, name, format!("{id}@example.com")) {
        Ok(user) => user,
        Err(error) => panic!("fixture user {id} is invalid: {error}"),
    }
}

/// Builder for recipes in known states, bypassing the store.
///
/// # Examples
/// ```
/// use recipehub::domain::CollaboratorRole;
/// use recipehub::test_support::{RecipeFixture, user};
///
/// let owner = user("user-1", "Jamie Oliver");
/// let editor = user("user-2", "Gordon Ramsay");
/// let recipe = RecipeFixture::new("1", &owner)
///     .collaborator(&editor, CollaboratorRole::Editor)
///     .build();
/// assert!(recipe.has_collaborator(editor.id()));
/// ```
#[derive(Debug, Clone)]
pub struct RecipeFixture {
    recipe: Recipe,
}

impl RecipeFixture {
    /// Private recipe with no steps, owned by `owner`.
    pub fn new(id: &str, owner: &User) -> Self {
        let id = match RecipeId::new(id) {
            Ok(id) => id,
            Err(error) => panic!("fixture recipe id {id:?} is invalid: {error}"),
        };
        Self {
            recipe: Recipe {
                title: format!("Recipe {id}"),
                id,
                description: String::new(),
                servings: Servings::default(),
                ingredients: Vec::new(),
                steps: Vec::new(),
                tags: std::collections::BTreeSet::new(),
                is_public: false,
                created_at: fixture_time(),
                updated_at: fixture_time(),
                owner: RecipeOwner::from(owner),
                collaborators: Vec::new(),
            },
        }
    }

    /// Set the title.
    #[must_use]
    pub fn title(mut self, title: &str) -> Self {
        title.clone_into(&mut self.recipe.title);
        self
    }

    /// Set both timestamps.
    #[must_use]
    pub fn created_at(mut self, at: DateTime<Utc>) -> Self {
        self.recipe.created_at = at;
        self.recipe.updated_at = at;
        self
    }

    /// Set the visibility flag.
    #[must_use]
    pub fn public(mut self, is_public: bool) -> Self {
        self.recipe.is_public = is_public;
        self
    }

    /// Invite `user` with `role`, reusing the user's own id.
    #[must_use]
    pub fn collaborator(mut self, user: &User, role: CollaboratorRole) -> Self {
        self.recipe.collaborators.push(Collaborator {
            id: user.id().clone(),
            name: user.name().clone(),
            email: user.email().clone(),
            role,
            avatar: None,
        });
        self
    }

    /// Append a step.
    #[must_use]
    pub fn step(mut self, step: Step) -> Self {
        self.recipe.steps.push(step);
        self
    }

    /// Append an ingredient.
    #[must_use]
    pub fn ingredient(mut self, ingredient: Ingredient) -> Self {
        self.recipe.ingredients.push(ingredient);
        self
    }

    /// Finish building.
    pub fn build(self) -> Recipe {
        self.recipe
    }
}

/// Fresh temporary directory for file-backed adapters.
pub fn temp_session_dir() -> TempDir {
    match tempfile::tempdir() {
        Ok(dir) => dir,
        Err(error) => panic!("create temp session dir: {error}"),
    }
}
