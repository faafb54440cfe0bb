//! Serving multiplier and ingredient scaling.

use std::fmt;
use std::num::NonZeroU32;

use super::{Ingredient, Servings};

const QUARTERS_PER_UNIT: u32 = 4;

/// Errors raised when building a multiplier from a raw number.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScalingError {
    /// Not a positive multiple of 0.25.
    #[error("multiplier must be a positive multiple of 0.25, got {0}")]
    InvalidMultiplier(String),
}

/// Positive multiple of 0.25 used to scale a recipe's ingredients.
///
/// Held as a count of quarters so stepping up and down is exact.
///
/// # Examples
/// ```
/// use recipehub::domain::ServingsMultiplier;
///
/// let mut multiplier = ServingsMultiplier::default();
/// multiplier.decrement();
/// multiplier.decrement();
/// multiplier.decrement();
/// multiplier.decrement();
/// assert_eq!(multiplier.value(), 0.25);
/// multiplier.increment();
/// assert_eq!(multiplier.to_string(), "0.5");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ServingsMultiplier(NonZeroU32);

impl ServingsMultiplier {
    /// Smallest multiplier: a quarter of the recipe.
    pub const MIN: Self = Self(NonZeroU32::MIN);

    /// Multiplier from a count of quarters.
    pub fn from_quarters(quarters: NonZeroU32) -> Self {
        Self(quarters)
    }

    /// Parse a raw multiplier such as `1.5`.
    pub fn try_from_f64(value: f64) -> Result<Self, ScalingError> {
        let invalid = || ScalingError::InvalidMultiplier(value.to_string());
        if !value.is_finite() || value <= 0.0 {
            return Err(invalid());
        }
        let quarters = value * f64::from(QUARTERS_PER_UNIT);
        if quarters.fract() != 0.0 || quarters > f64::from(u32::MAX) {
            return Err(invalid());
        }
        NonZeroU32::new(quarters as u32)
            .map(Self)
            .ok_or_else(invalid)
    }

    /// Add a quarter.
    pub fn increment(&mut self) {
        self.0 = self.0.saturating_add(1);
    }

    /// Remove a quarter, stopping at [`ServingsMultiplier::MIN`].
    pub fn decrement(&mut self) {
        self.0 = NonZeroU32::new(self.0.get() - 1).unwrap_or(NonZeroU32::MIN);
    }

    /// Number of quarters.
    pub fn quarters(self) -> u32 {
        self.0.get()
    }

    /// Multiplier as a float.
    pub fn value(self) -> f64 {
        f64::from(self.0.get()) / f64::from(QUARTERS_PER_UNIT)
    }
}

impl Default for ServingsMultiplier {
    fn default() -> Self {
        Self(NonZeroU32::new(QUARTERS_PER_UNIT).unwrap_or(NonZeroU32::MIN))
    }
}

impl fmt::Display for ServingsMultiplier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

impl std::str::FromStr for ServingsMultiplier {
    type Err = ScalingError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let parsed = value
            .trim()
            .parse::<f64>()
            .map_err(|_| ScalingError::InvalidMultiplier(value.to_owned()))?;
        Self::try_from_f64(parsed)
    }
}

/// Scale every ingredient quantity by `multiplier`.
///
/// Names, units and identifiers are unchanged. A product too large for an
/// `f64` saturates at `f64::MAX`.
pub fn scale(ingredients: &[Ingredient], multiplier: ServingsMultiplier) -> Vec<Ingredient> {
    ingredients
        .iter()
        .map(|ingredient| Ingredient {
            quantity: ingredient.quantity.saturating_mul(multiplier.value()),
            ..ingredient.clone()
        })
        .collect()
}

/// Servings yielded after scaling.
pub fn scaled_servings(servings: Servings, multiplier: ServingsMultiplier) -> f64 {
    f64::from(servings.get()) * multiplier.value()
}
