//! Tests for the recipe aggregate and its value types.

use super::*;
use rstest::{fixture, rstest};
use serde_json::json;

#[fixture]
fn pasta_json() -> serde_json::Value {
    json!({
        "id": "1",
        "title": "Garlic Butter Shrimp Pasta",
        "description": "A delicious pasta dish with garlic butter shrimp",
        "servings": 4,
        "ingredients": [
            { "id": "i1", "name": "Spaghetti", "quantity": 400, "unit": "g" },
            { "id": "i8", "name": "Salt", "quantity": 0.5, "unit": "tsp" }
        ],
        "steps": [
            { "id": "s1", "description": "Boil pasta until al dente", "timerMinutes": 8 },
            { "id": "s2", "description": "Melt butter" }
        ],
        "tags": ["pasta", "dinner"],
        "isPublic": true,
        "createdAt": "2023-05-10T12:00:00Z",
        "updatedAt": "2023-05-10T14:30:00Z",
        "owner": { "id": "user-1", "name": "Jamie Oliver" },
        "collaborators": [{
            "id": "user-2",
            "name": "Gordon Ramsay",
            "email": "gordon@example.com",
            "role": "editor",
            "avatar": "https://i.pravatar.cc/150?img=67"
        }]
    })
}

#[rstest]
fn parses_camel_case_recipe(pasta_json: serde_json::Value) {
    let recipe: Recipe = serde_json::from_value(pasta_json).expect("valid recipe");
    assert_eq!(recipe.id.as_str(), "1");
    assert_eq!(recipe.servings.get(), 4);
    assert_eq!(recipe.ingredients.len(), 2);
    assert!((recipe.ingredients[1].quantity.get() - 0.5).abs() < f64::EPSILON);
    assert_eq!(recipe.steps[0].timer_minutes, Some(8));
    assert_eq!(recipe.steps[1].timer_minutes, None);
    assert!(recipe.is_public);
    assert!(recipe.updated_at >= recipe.created_at);
    assert_eq!(recipe.collaborators[0].role, CollaboratorRole::Editor);
}

#[rstest]
fn serialisation_omits_absent_timers_and_avatars(pasta_json: serde_json::Value) {
    let mut recipe: Recipe = serde_json::from_value(pasta_json).expect("valid recipe");
    recipe.collaborators[0].avatar = None;
    let value = serde_json::to_value(&recipe).expect("serialise recipe");

    let second_step = &value["steps"][1];
    assert!(second_step.get("timerMinutes").is_none());
    assert!(value["collaborators"][0].get("avatar").is_none());
    assert_eq!(value["isPublic"], json!(true));
    assert_eq!(value["owner"], json!({ "id": "user-1", "name": "Jamie Oliver" }));
}

#[rstest]
#[case("/servings", json!(0))]
#[case("/ingredients/0/quantity", json!(-1))]
#[case("/steps/0/timerMinutes", json!(-5))]
#[case("/collaborators/0/role", json!("admin"))]
#[case("/owner/id", json!(""))]
#[case("/title", json!("   "))]
#[case("/updatedAt", json!("2023-01-01T00:00:00Z"))]
fn rejects_invariant_violations(
    pasta_json: serde_json::Value,
    #[case] pointer: &str,
    #[case] replacement: serde_json::Value,
) {
    let mut value = pasta_json;
    let slot = value.pointer_mut(pointer).expect("pointer exists in fixture");
    *slot = replacement;
    assert!(serde_json::from_value::<Recipe>(value).is_err());
}

#[rstest]
fn blank_title_and_backdated_update_are_reported(pasta_json: serde_json::Value) {
    let mut blank = pasta_json.clone();
    blank["title"] = json!("   ");
    let err = serde_json::from_value::<Recipe>(blank).expect_err("blank title rejected");
    assert!(err.to_string().contains("title must not be empty"));

    let mut backdated = pasta_json;
    backdated["createdAt"] = json!("2024-01-02T00:00:00Z");
    backdated["updatedAt"] = json!("2023-01-01T00:00:00Z");
    let err = serde_json::from_value::<Recipe>(backdated).expect_err("backdated update rejected");
    assert!(err.to_string().contains("updated before it was created"));
}

#[rstest]
fn update_at_creation_time_is_accepted(pasta_json: serde_json::Value) {
    let mut value = pasta_json;
    value["updatedAt"] = value["createdAt"].clone();
    let recipe: Recipe = serde_json::from_value(value).expect("same instant is allowed");
    assert_eq!(recipe.updated_at, recipe.created_at);
}

#[rstest]
#[case(0, Err(RecipeValidationError::ZeroServings))]
#[case(1, Ok(1))]
#[case(24, Ok(24))]
fn servings_must_be_positive(#[case] raw: u32, #[case] expected: Result<u32, RecipeValidationError>) {
    assert_eq!(Servings::new(raw).map(Servings::get), expected);
}

#[rstest]
#[case(-0.25, RecipeValidationError::NegativeQuantity)]
#[case(f64::NAN, RecipeValidationError::NonFiniteQuantity)]
#[case(f64::INFINITY, RecipeValidationError::NonFiniteQuantity)]
fn quantity_rejects_invalid_amounts(#[case] raw: f64, #[case] expected: RecipeValidationError) {
    assert_eq!(Quantity::new(raw), Err(expected));
}

#[rstest]
#[case(2.0, 1.5, 3.0)]
#[case(f64::MAX / 2.0, 4.0, f64::MAX)]
#[case(3.0, f64::NAN, 3.0)]
#[case(3.0, -1.0, 0.0)]
fn quantity_multiplication_saturates(#[case] amount: f64, #[case] factor: f64, #[case] expected: f64) {
    let quantity = Quantity::new(amount).expect("valid quantity");
    assert_eq!(quantity.saturating_mul(factor).get(), expected);
}

#[rstest]
fn quantity_accepts_zero_and_fractions() {
    assert!(Quantity::new(0.0).is_ok());
    assert!(Quantity::new(0.25).is_ok());
}

#[rstest]
fn step_timer_seconds_ignores_zero_minute_timers() {
    assert_eq!(Step::new("Rest").with_timer(0).timer_seconds(), None);
    assert_eq!(Step::new("Bake").with_timer(9).timer_seconds(), Some(540));
    assert_eq!(Step::new("Serve").timer_seconds(), None);
}

#[rstest]
#[case("")]
#[case("   ")]
fn draft_requires_title(#[case] title: &str) {
    assert_eq!(
        RecipeDraft::new(title),
        Err(RecipeValidationError::EmptyTitle)
    );
}

#[rstest]
fn draft_defaults_to_private_with_four_servings() {
    let draft = RecipeDraft::new("  Soup ").expect("valid title");
    assert_eq!(draft.title, "Soup");
    assert_eq!(draft.servings.get(), DEFAULT_SERVINGS);
    assert!(!draft.is_public);
}

#[rstest]
fn tags_are_trimmed_deduplicated_and_non_blank() {
    let tags = normalize_tags(["quick", " quick", "", "  ", "dinner"]);
    assert_eq!(
        tags.into_iter().collect::<Vec<_>>(),
        vec!["dinner".to_owned(), "quick".to_owned()]
    );
}

#[rstest]
fn membership_helpers_match_on_identifier(pasta_json: serde_json::Value) {
    let recipe: Recipe = serde_json::from_value(pasta_json).expect("valid recipe");
    let owner = UserId::new("user-1").expect("valid id");
    let editor = UserId::new("user-2").expect("valid id");
    let stranger = UserId::new("user-3").expect("valid id");

    assert!(recipe.is_owned_by(&owner));
    assert!(!recipe.is_owned_by(&editor));
    assert!(recipe.has_collaborator(&editor));
    assert!(!recipe.has_collaborator(&owner));
    assert!(!recipe.has_collaborator(&stranger));
}

#[rstest]
fn invite_from_email_uses_local_part_as_name() {
    let email = EmailAddress::new("u2@x.com").expect("valid email");
    let invite =
        CollaboratorInvite::from_email(email, CollaboratorRole::Owner).expect("valid invite");
    assert_eq!(invite.name.as_ref(), "u2");
    assert_eq!(invite.role, CollaboratorRole::Owner);
    assert_eq!(invite.avatar, None);
}

#[rstest]
fn collaborator_roles_display_as_labels() {
    assert_eq!(CollaboratorRole::Owner.to_string(), "Co-owner");
    assert_eq!(CollaboratorRole::Editor.to_string(), "Editor");
}
