//! Bundled sample catalogue and startup seeding of the recipe store.

mod catalogue;
mod startup;

pub use catalogue::{ExampleDataError, sample_recipes};
pub use startup::seed_recipe_store;
