//! Behavioural tests for inviting collaborators and the rights they gain.

use std::collections::HashMap;
use std::sync::Arc;

use recipehub::domain::{
    Capability, CollaboratorInvite, CollaboratorRole, EmailAddress, RecipeId, RecipeStore, User,
    UserId, can_perform,
};
use recipehub::test_support::{MutableClock, RecipeFixture, fixture_time, user};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

struct CollaborationWorld {
    clock: Arc<MutableClock>,
    store: RecipeStore,
    users: HashMap<String, User>,
    current_user: Option<User>,
    last_collaborator: Option<UserId>,
}

impl CollaborationWorld {
    fn known_user(&mut self, label: &str) -> User {
        self.users
            .entry(label.to_owned())
            .or_insert_with(|| user(label, label))
            .clone()
    }

    fn seed(&mut self, recipe_id: &str, owner_label: &str, is_public: bool) {
        let owner = self.known_user(owner_label);
        let recipe = RecipeFixture::new(recipe_id, &owner)
            .public(is_public)
            .build();
        let mut recipes = self.store.recipes().to_vec();
        recipes.push(recipe);
        self.store = RecipeStore::with_recipes(recipes, self.clock.clone());
    }

    fn recipe_id(raw: &str) -> RecipeId {
        RecipeId::new(raw).expect("valid recipe id")
    }

    fn allowed(&self, recipe_id: &str, capability: Capability) -> bool {
        let recipe = self
            .store
            .get_recipe_by_id(&Self::recipe_id(recipe_id))
            .expect("recipe exists");
        can_perform(self.current_user.as_ref(), Some(recipe), capability)
    }
}

#[fixture]
fn world() -> CollaborationWorld {
    let clock = Arc::new(MutableClock::new(fixture_time()));
    CollaborationWorld {
        store: RecipeStore::new(clock.clone()),
        clock,
        users: HashMap::new(),
        current_user: None,
        last_collaborator: None,
    }
}

// -----------------------------------------------------------------------------
// Given Steps
// -----------------------------------------------------------------------------

#[given("a private recipe {recipe_id} owned by {owner}")]
fn a_private_recipe(world: &mut CollaborationWorld, recipe_id: String, owner: String) {
    world.seed(&recipe_id, &owner, false);
}

#[given("a public recipe {recipe_id} owned by {owner}")]
fn a_public_recipe(world: &mut CollaborationWorld, recipe_id: String, owner: String) {
    world.seed(&recipe_id, &owner, true);
}

#[given("a signed-in user {label}")]
fn a_signed_in_user(world: &mut CollaborationWorld, label: String) {
    let signed_in = world.known_user(&label);
    world.current_user = Some(signed_in);
}

// -----------------------------------------------------------------------------
// When Steps
// -----------------------------------------------------------------------------

#[when("the owner invites {email} as {role} to recipe {recipe_id}")]
fn the_owner_invites(world: &mut CollaborationWorld, email: String, role: String, recipe_id: String) {
    let role = match role.as_str() {
        "owner" => CollaboratorRole::Owner,
        "editor" => CollaboratorRole::Editor,
        other => panic!("unknown collaborator role: {other}"),
    };
    let email = EmailAddress::new(email).expect("valid email");
    let invite = CollaboratorInvite::from_email(email, role).expect("valid invite");
    let id = world
        .store
        .add_collaborator(&CollaborationWorld::recipe_id(&recipe_id), invite)
        .expect("recipe exists");
    world.last_collaborator = Some(id);
}

#[when("{label} takes the generated collaborator id")]
fn takes_the_generated_id(world: &mut CollaborationWorld, label: String) {
    let id = world
        .last_collaborator
        .clone()
        .expect("a collaborator was invited");
    let invited = user(id.as_str(), &label);
    world.users.insert(label, invited.clone());
    world.current_user = Some(invited);
}

#[when("the owner removes that collaborator from recipe {recipe_id}")]
fn the_owner_removes_that_collaborator(world: &mut CollaborationWorld, recipe_id: String) {
    let id = world
        .last_collaborator
        .clone()
        .expect("a collaborator was invited");
    let removed = world
        .store
        .remove_collaborator(&CollaborationWorld::recipe_id(&recipe_id), &id);
    assert!(removed.is_some(), "collaborator should have been removed");
}

// -----------------------------------------------------------------------------
// Then Steps
// -----------------------------------------------------------------------------

#[then("{label} can edit recipe {recipe_id} as an invitee")]
fn can_edit_as_invitee(world: &mut CollaborationWorld, label: String, recipe_id: String) {
    assert!(
        world.allowed(&recipe_id, Capability::EditIfInvited),
        "{label} should be able to edit recipe {recipe_id}"
    );
}

#[then("{label} cannot edit recipe {recipe_id} as an invitee")]
fn cannot_edit_as_invitee(world: &mut CollaborationWorld, label: String, recipe_id: String) {
    assert!(
        !world.allowed(&recipe_id, Capability::EditIfInvited),
        "{label} should not be able to edit recipe {recipe_id}"
    );
}

#[then("{label} cannot invite collaborators to recipe {recipe_id}")]
fn cannot_invite(world: &mut CollaborationWorld, label: String, recipe_id: String) {
    assert!(
        !world.allowed(&recipe_id, Capability::InviteCollaborators),
        "{label} should not be able to invite to recipe {recipe_id}"
    );
}

#[then("recipe {recipe_id} has {count} collaborators")]
fn recipe_has_collaborators(world: &mut CollaborationWorld, recipe_id: String, count: usize) {
    let recipe = world
        .store
        .get_recipe_by_id(&CollaborationWorld::recipe_id(&recipe_id))
        .expect("recipe exists");
    assert_eq!(recipe.collaborators.len(), count);
}

#[then("the public listing contains only recipe {recipe_id}")]
fn public_listing_contains_only(world: &mut CollaborationWorld, recipe_id: String) {
    let ids: Vec<_> = world
        .store
        .public_recipes()
        .into_iter()
        .map(|recipe| recipe.id.as_str().to_owned())
        .collect();
    assert_eq!(ids, [recipe_id]);
}

#[then("an anonymous visitor may only view public recipes")]
fn anonymous_visitor_may_only_view(world: &mut CollaborationWorld) {
    world.current_user = None;
    for recipe in world.store.recipes() {
        for capability in Capability::ALL {
            assert_eq!(
                can_perform(None, Some(recipe), capability),
                capability == Capability::ViewPublic,
                "anonymous {capability} on recipe {}",
                recipe.id
            );
        }
    }
}

// -----------------------------------------------------------------------------
// Scenario Bindings
// -----------------------------------------------------------------------------

#[scenario(
    path = "tests/features/recipe_collaboration.feature",
    name = "An invited editor gains edit rights"
)]
fn an_invited_editor_gains_edit_rights(world: CollaborationWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/recipe_collaboration.feature",
    name = "Removing a collaborator revokes edit rights"
)]
fn removing_a_collaborator_revokes_edit_rights(world: CollaborationWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/recipe_collaboration.feature",
    name = "Co-owners still cannot invite"
)]
fn co_owners_still_cannot_invite(world: CollaborationWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/recipe_collaboration.feature",
    name = "Anonymous visitors only browse public recipes"
)]
fn anonymous_visitors_only_browse_public_recipes(world: CollaborationWorld) {
    drop(world);
}
