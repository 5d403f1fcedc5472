//! Ability magnitude computation.
//!
//! Pure functions from (kind, source OVR, target OVR, config) to the
//! numeric deltas an ability applies. The state machine owns application;
//! this module owns arithmetic, so every magnitude is testable without a
//! battle.

use serde::{Deserialize, Serialize};

use crate::core::EngineConfig;

use super::ability::AbilityKind;

/// The computed numeric outcome of one primitive ability activation.
///
/// Deltas are signed: a negative `enemy_life_delta` is damage, a positive
/// `own_life_delta` is a heal. All fields default to "no effect".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityEffect {
    /// Applied to the target card's power modifier.
    pub target_power_delta: i64,

    /// Applied to the source card's power modifier.
    pub source_power_delta: i64,

    /// Applied to the owning side's life total.
    pub own_life_delta: i64,

    /// Applied to the opposing side's life total.
    pub enemy_life_delta: i64,

    /// Whether the target card becomes locked.
    pub lock_target: bool,
}

/// Floor of `value * percent / 100`.
fn percent_of(value: i64, percent: u32) -> i64 {
    value * i64::from(percent) / 100
}

/// Compute the effect of a primitive ability.
///
/// `target_ovr` must be `Some` for the target-scoped kinds (`Weaken`,
/// `IncreasePower`, `Lock`); those fizzle to no effect without it.
/// `Limited` is composite - the state machine rolls two primitive kinds
/// and computes each through this function - so it yields no effect here.
#[must_use]
pub fn effect_of(
    kind: AbilityKind,
    source_ovr: i64,
    target_ovr: Option<i64>,
    config: &EngineConfig,
) -> AbilityEffect {
    match kind {
        AbilityKind::Weaken => match target_ovr {
            Some(ovr) => AbilityEffect {
                target_power_delta: -percent_of(ovr, config.weaken_percent),
                ..AbilityEffect::default()
            },
            None => AbilityEffect::default(),
        },

        AbilityKind::PowerToHealth => AbilityEffect {
            own_life_delta: percent_of(source_ovr, config.power_to_health_percent),
            ..AbilityEffect::default()
        },

        AbilityKind::DirectDamage => AbilityEffect {
            enemy_life_delta: -percent_of(source_ovr, config.direct_damage_percent),
            ..AbilityEffect::default()
        },

        AbilityKind::IncreasePower => match target_ovr {
            Some(ovr) => AbilityEffect {
                target_power_delta: percent_of(ovr, config.increase_power_percent),
                ..AbilityEffect::default()
            },
            None => AbilityEffect::default(),
        },

        AbilityKind::Lock => match target_ovr {
            Some(ovr) => AbilityEffect {
                lock_target: true,
                source_power_delta: -ovr,
                ..AbilityEffect::default()
            },
            None => AbilityEffect::default(),
        },

        AbilityKind::Limited => AbilityEffect::default(),
    }
}
