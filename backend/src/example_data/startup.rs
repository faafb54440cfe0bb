//! Startup seeding of the in-memory recipe store.

use std::sync::Arc;

use mockable::Clock;
use tracing::{info, warn};

use crate::domain::RecipeStore;
use crate::example_data::catalogue::sample_recipes;
use crate::settings::AppSettings;

/// Build the recipe store, seeded with the sample catalogue when enabled.
///
/// A catalogue that fails to load is logged and yields an empty store.
pub fn seed_recipe_store(settings: &AppSettings, clock: Arc<dyn Clock>) -> RecipeStore {
    if !settings.sample_data() {
        info!(reason = "disabled", "sample recipe seeding skipped");
        return RecipeStore::new(clock);
    }

    match sample_recipes() {
        Ok(recipes) => {
            info!(count = recipes.len(), "sample recipes seeded");
            RecipeStore::with_recipes(recipes, clock)
        }
        Err(error) => {
            warn!(%error, "sample recipes failed to load; starting empty");
            RecipeStore::new(clock)
        }
    }
}
