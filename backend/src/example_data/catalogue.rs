//! Sample recipes shipped with the crate.

use thiserror::Error;

use crate::domain::{Recipe, RecipeId};

const SAMPLE_RECIPES_JSON: &str = include_str!("../../fixtures/sample-recipes.json");

/// Errors raised while loading the bundled catalogue.
#[derive(Debug, Error)]
pub enum ExampleDataError {
    /// The catalogue is not a valid list of recipes.
    #[error("sample catalogue parse error: {0}")]
    Parse(#[from] serde_json::Error),
    /// Two recipes share an identifier.
    #[error("sample recipe id {recipe_id} is used more than once")]
    DuplicateId {
        /// Repeated identifier.
        recipe_id: RecipeId,
    },
}

/// Parse the bundled sample catalogue.
///
/// The catalogue holds three public recipes: two owned by `user-1` (one of
/// them shared with editor `user-2`) and one owned by `user-3`.
///
/// # Errors
/// Returns [`ExampleDataError`] when the fixture fails to parse, including
/// when a recipe breaks its own invariants, or repeats an identifier.
///
/// # Examples
/// ```
/// use recipehub::example_data::sample_recipes;
///
/// let recipes = sample_recipes().unwrap();
/// assert_eq!(recipes.len(), 3);
/// assert_eq!(recipes[0].title, "Garlic Butter Shrimp Pasta");
/// ```
pub fn sample_recipes() -> Result<Vec<Recipe>, ExampleDataError> {
    let recipes: Vec<Recipe> = serde_json::from_str(SAMPLE_RECIPES_JSON)?;
    let mut seen = std::collections::HashSet::new();
    for recipe in &recipes {
        if !seen.insert(&recipe.id) {
            return Err(ExampleDataError::DuplicateId {
                recipe_id: recipe.id.clone(),
            });
        }
    }
    Ok(recipes)
}
