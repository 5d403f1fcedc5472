//! Ability system: rarity-derived ability definitions and magnitudes.

mod ability;
mod resolver;

pub use ability::{Ability, AbilityKind, TargetScope};
pub use resolver::{effect_of, AbilityEffect};
