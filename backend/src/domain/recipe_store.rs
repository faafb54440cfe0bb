//! In-memory recipe collection and its derived views.
//!
//! The store exclusively owns an insertion-ordered list of recipes. Lookups
//! that miss are not errors: mutations on an unknown id leave the collection
//! untouched and report the miss through their return value.

use std::sync::Arc;

use mockable::Clock;
use tracing::debug;

use super::{
    Collaborator, CollaboratorInvite, Recipe, RecipeDraft, RecipeId, RecipeOwner, User, UserId,
};

/// Recipe collection with time supplied by an injected clock.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use mockable::DefaultClock;
/// use recipehub::domain::{RecipeDraft, RecipeStore, User};
///
/// let mut store = RecipeStore::new(Arc::new(DefaultClock));
/// let owner = User::try_from_strings("user-1", "Jamie Oliver", "jamie@example.com").unwrap();
/// let created = store
///     .create_recipe(RecipeDraft::new("Soup").unwrap(), Some(&owner))
///     .map(|recipe| recipe.id.clone())
///     .unwrap();
/// assert_eq!(store.owned_recipes(Some(&owner))[0].id, created);
/// ```
pub struct RecipeStore {
    recipes: Vec<Recipe>,
    clock: Arc<dyn Clock>,
}

impl RecipeStore {
    /// Create an empty store.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self::with_recipes(Vec::new(), clock)
    }

    /// Create a store seeded with `recipes`, kept in the given order.
    pub fn with_recipes(recipes: Vec<Recipe>, clock: Arc<dyn Clock>) -> Self {
        Self { recipes, clock }
    }

    /// All recipes in insertion order.
    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    /// Number of recipes held.
    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    /// Whether the store holds no recipes.
    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// Create a recipe owned by `owner`.
    ///
    /// Assigns a fresh identifier, stamps both timestamps with the current
    /// time, snapshots the owner and starts with no collaborators. Returns
    /// `None` without touching the collection when there is no owner.
    pub fn create_recipe(&mut self, draft: RecipeDraft, owner: Option<&User>) -> Option<&Recipe> {
        let Some(owner) = owner else {
            debug!("create_recipe ignored without an authenticated owner");
            return None;
        };
        let recipe = draft.into_recipe(RecipeId::random(), RecipeOwner::from(owner), self.clock.utc());
        debug!(recipe_id = %recipe.id, owner_id = %owner.id(), "recipe created");
        self.recipes.push(recipe);
        self.recipes.last()
    }

    /// Replace the stored recipe that has the same id as `recipe`.
    ///
    /// The stored owner and creation time are kept; `updated_at` becomes the
    /// current time, never earlier than `created_at`. Returns `false` and
    /// changes nothing when no recipe has that id.
    pub fn update_recipe(&mut self, recipe: Recipe) -> bool {
        let now = self.clock.utc();
        let Some(stored) = self.recipes.iter_mut().find(|stored| stored.id == recipe.id) else {
            debug!(recipe_id = %recipe.id, "update_recipe ignored for unknown recipe");
            return false;
        };
        let owner = stored.owner.clone();
        let created_at = stored.created_at;
        *stored = Recipe {
            owner,
            created_at,
            updated_at: now.max(created_at),
            ..recipe
        };
        debug!(recipe_id = %stored.id, "recipe updated");
        true
    }

    /// Remove a recipe, returning it when it existed.
    pub fn delete_recipe(&mut self, id: &RecipeId) -> Option<Recipe> {
        let position = self.position(id)?;
        debug!(recipe_id = %id, "recipe deleted");
        Some(self.recipes.remove(position))
    }

    /// Exact id lookup.
    pub fn get_recipe_by_id(&self, id: &RecipeId) -> Option<&Recipe> {
        self.recipes.iter().find(|recipe| &recipe.id == id)
    }

    /// Append a collaborator built from `invite` with a freshly generated id.
    ///
    /// Invites are not deduplicated: inviting the same email twice adds two
    /// entries. Returns the new collaborator id, or `None` when the recipe
    /// does not exist.
    pub fn add_collaborator(
        &mut self,
        recipe_id: &RecipeId,
        invite: CollaboratorInvite,
    ) -> Option<UserId> {
        let position = self.position(recipe_id)?;
        let id = UserId::random();
        debug!(recipe_id = %recipe_id, collaborator_id = %id, "collaborator added");
        self.recipes[position]
            .collaborators
            .push(invite.into_collaborator(id.clone()));
        Some(id)
    }

    /// Remove the collaborator with `collaborator_id` from a recipe.
    pub fn remove_collaborator(
        &mut self,
        recipe_id: &RecipeId,
        collaborator_id: &UserId,
    ) -> Option<Collaborator> {
        let recipe = self.recipes.iter_mut().find(|recipe| &recipe.id == recipe_id)?;
        let position = recipe
            .collaborators
            .iter()
            .position(|collaborator| &collaborator.id == collaborator_id)?;
        debug!(recipe_id = %recipe_id, collaborator_id = %collaborator_id, "collaborator removed");
        Some(recipe.collaborators.remove(position))
    }

    /// Recipes owned by `current_user`; empty when nobody is signed in.
    pub fn owned_recipes(&self, current_user: Option<&User>) -> Vec<&Recipe> {
        let Some(user) = current_user else {
            return Vec::new();
        };
        self.recipes
            .iter()
            .filter(|recipe| recipe.is_owned_by(user.id()))
            .collect()
    }

    /// Recipes `current_user` was invited to; empty when nobody is signed in.
    pub fn shared_recipes(&self, current_user: Option<&User>) -> Vec<&Recipe> {
        let Some(user) = current_user else {
            return Vec::new();
        };
        self.recipes
            .iter()
            .filter(|recipe| recipe.has_collaborator(user.id()))
            .collect()
    }

    /// Public recipes, whoever is looking.
    pub fn public_recipes(&self) -> Vec<&Recipe> {
        self.recipes.iter().filter(|recipe| recipe.is_public).collect()
    }

    fn position(&self, id: &RecipeId) -> Option<usize> {
        self.recipes.iter().position(|recipe| &recipe.id == id)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use std::time::Duration;

    use chrono::{DateTime, TimeZone, Utc};
    use rstest::{fixture, rstest};

    use super::*;
    use crate::domain::{CollaboratorRole, EmailAddress, Ingredient, Quantity};
    use crate::test_support::{MutableClock, RecipeFixture, user};

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0)
            .single()
            .expect("valid timestamp")
    }

    #[fixture]
    fn clock() -> Arc<MutableClock> {
        Arc::new(MutableClock::new(start()))
    }

    #[fixture]
    fn owner() -> User {
        user("user-1", "Jamie Oliver")
    }

    fn invite(email: &str) -> CollaboratorInvite {
        let email = EmailAddress::new(email).expect("valid email");
        CollaboratorInvite::from_email(email, CollaboratorRole::Editor).expect("valid invite")
    }

    #[rstest]
    fn create_stamps_owner_and_times(clock: Arc<MutableClock>, owner: User) {
        let mut store = RecipeStore::new(clock.clone());
        let draft = RecipeDraft::new("Soup")
            .expect("title")
            .with_ingredient(Ingredient::new(
                "Water",
                Quantity::new(1.0).expect("qty"),
                "l",
            ));

        let recipe = store
            .create_recipe(draft, Some(&owner))
            .expect("owner present")
            .clone();

        assert!(recipe.id.as_str().starts_with("recipe-"));
        assert_eq!(recipe.owner, RecipeOwner::from(&owner));
        assert_eq!(recipe.created_at, start());
        assert_eq!(recipe.updated_at, start());
        assert!(recipe.collaborators.is_empty());
        assert_eq!(store.len(), 1);
    }

    #[rstest]
    fn create_without_owner_is_a_no_op(clock: Arc<MutableClock>) {
        let mut store = RecipeStore::new(clock);
        let draft = RecipeDraft::new("Soup").expect("title");
        assert!(store.create_recipe(draft, None).is_none());
        assert!(store.is_empty());
    }

    #[rstest]
    fn created_ids_are_unique(clock: Arc<MutableClock>, owner: User) {
        let mut store = RecipeStore::new(clock);
        for title in ["One", "Two", "Three"] {
            let draft = RecipeDraft::new(title).expect("title");
            store.create_recipe(draft, Some(&owner));
        }
        let mut ids: Vec<_> = store.recipes().iter().map(|recipe| recipe.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 3);
    }

    #[rstest]
    fn update_keeps_owner_and_creation_time(clock: Arc<MutableClock>, owner: User) {
        let seeded = RecipeFixture::new("1", &owner).created_at(start()).build();
        let mut store = RecipeStore::with_recipes(vec![seeded.clone()], clock.clone());
        clock.advance(Duration::from_secs(90));

        let intruder = user("user-9", "Someone Else");
        let mut edited = seeded;
        edited.title = "Renamed".to_owned();
        edited.owner = RecipeOwner::from(&intruder);
        edited.created_at = start() + chrono::TimeDelta::days(1);

        assert!(store.update_recipe(edited));
        let stored = store
            .get_recipe_by_id(&RecipeId::new("1").expect("id"))
            .expect("recipe present");
        assert_eq!(stored.title, "Renamed");
        assert_eq!(stored.owner, RecipeOwner::from(&owner));
        assert_eq!(stored.created_at, start());
        assert_eq!(stored.updated_at, start() + chrono::TimeDelta::seconds(90));
    }

    #[rstest]
    fn update_never_moves_updated_at_before_creation(owner: User) {
        let created = start() + chrono::TimeDelta::hours(1);
        let seeded = RecipeFixture::new("1", &owner).created_at(created).build();
        let mut store =
            RecipeStore::with_recipes(vec![seeded.clone()], Arc::new(MutableClock::new(start())));

        assert!(store.update_recipe(seeded));
        assert_eq!(store.recipes()[0].updated_at, created);
    }

    #[rstest]
    fn update_of_unknown_recipe_changes_nothing(clock: Arc<MutableClock>, owner: User) {
        let seeded = RecipeFixture::new("1", &owner).build();
        let mut store = RecipeStore::with_recipes(vec![seeded.clone()], clock);
        let before = store.recipes().to_vec();

        let stranger = RecipeFixture::new("404", &owner).title("Ghost").build();
        assert!(!store.update_recipe(stranger));
        assert_eq!(store.recipes(), before.as_slice());
    }

    #[rstest]
    fn delete_returns_removed_recipe(clock: Arc<MutableClock>, owner: User) {
        let first = RecipeFixture::new("1", &owner).build();
        let second = RecipeFixture::new("2", &owner).build();
        let mut store = RecipeStore::with_recipes(vec![first.clone(), second], clock);

        assert_eq!(store.delete_recipe(&first.id), Some(first.clone()));
        assert_eq!(store.delete_recipe(&first.id), None);
        assert_eq!(store.len(), 1);
    }

    #[rstest]
    fn collaborators_are_appended_with_fresh_ids(clock: Arc<MutableClock>, owner: User) {
        let recipe = RecipeFixture::new("1", &owner).build();
        let mut store = RecipeStore::with_recipes(vec![recipe.clone()], clock);

        let first = store
            .add_collaborator(&recipe.id, invite("u2@x.com"))
            .expect("recipe exists");
        let second = store
            .add_collaborator(&recipe.id, invite("u2@x.com"))
            .expect("recipe exists");

        assert_ne!(first, second);
        let stored = store.get_recipe_by_id(&recipe.id).expect("recipe present");
        assert_eq!(stored.collaborators.len(), 2);
        assert_eq!(stored.collaborators[0].id, first);
        assert_eq!(stored.collaborators[0].name.as_ref(), "u2");
    }

    #[rstest]
    fn collaborator_mutations_on_unknown_ids_are_no_ops(clock: Arc<MutableClock>, owner: User) {
        let recipe = RecipeFixture::new("1", &owner).build();
        let mut store = RecipeStore::with_recipes(vec![recipe.clone()], clock);
        let missing_recipe = RecipeId::new("404").expect("id");
        let missing_user = UserId::new("user-404").expect("id");

        assert_eq!(store.add_collaborator(&missing_recipe, invite("a@b.c")), None);
        assert_eq!(store.remove_collaborator(&missing_recipe, owner.id()), None);
        assert_eq!(store.remove_collaborator(&recipe.id, &missing_user), None);
        assert_eq!(store.recipes(), [recipe].as_slice());
    }

    #[rstest]
    fn views_follow_the_current_user(clock: Arc<MutableClock>, owner: User) {
        let editor = user("user-2", "Gordon Ramsay");
        let mine = RecipeFixture::new("1", &owner).public(true).build();
        let shared = RecipeFixture::new("2", &editor)
            .collaborator(&owner, CollaboratorRole::Editor)
            .build();
        let store = RecipeStore::with_recipes(vec![mine, shared], clock);

        let ids = |recipes: Vec<&Recipe>| {
            recipes
                .into_iter()
                .map(|recipe| recipe.id.as_str().to_owned())
                .collect::<Vec<_>>()
        };
        assert_eq!(ids(store.owned_recipes(Some(&owner))), ["1"]);
        assert_eq!(ids(store.shared_recipes(Some(&owner))), ["2"]);
        assert_eq!(ids(store.owned_recipes(Some(&editor))), ["2"]);
        assert!(store.shared_recipes(Some(&editor)).is_empty());
        assert!(store.owned_recipes(None).is_empty());
        assert!(store.shared_recipes(None).is_empty());
        assert_eq!(ids(store.public_recipes()), ["1"]);
    }
}
