//! Combat damage resolution.
//!
//! Pure functions over card snapshots: sector matchup classification,
//! attack damage, and direct-damage eligibility. The state machine applies
//! the results; nothing here mutates.
//!
//! Matchup factors are integer percents (x100) from `EngineConfig`:
//! advantage > 100, disadvantage < 100, neutral exactly 100.

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::core::EngineConfig;

/// Sector matchup classification for an attack.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Matchup {
    /// Defender's sector is the attacker's strong matchup.
    Advantage,
    /// Defender's sector is the attacker's resisted matchup.
    Disadvantage,
    /// No sector relation applies.
    Neutral,
}

impl Matchup {
    /// Narration label for the presentation layer.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Matchup::Advantage => "advantage",
            Matchup::Disadvantage => "disadvantage",
            Matchup::Neutral => "neutral",
        }
    }
}

/// Matchup plus the damage percent it carries, for combat narration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatPreview {
    pub matchup: Matchup,
    /// Damage multiplier, x100.
    pub percent: u32,
}

/// Classify the sector matchup between attacker and defender.
///
/// Advantage wins when both relations would apply (a card that is strong
/// against and resistant to the same sector attacks it at advantage).
#[must_use]
pub fn matchup(attacker: &Card, defender: &Card) -> Matchup {
    if attacker.strong_against.as_ref() == Some(&defender.sector) {
        Matchup::Advantage
    } else if attacker.resistant_to.as_ref() == Some(&defender.sector) {
        Matchup::Disadvantage
    } else {
        Matchup::Neutral
    }
}

/// The damage percent a matchup carries.
#[must_use]
pub fn matchup_percent(matchup: Matchup, config: &EngineConfig) -> u32 {
    match matchup {
        Matchup::Advantage => config.advantage_percent,
        Matchup::Disadvantage => config.disadvantage_percent,
        Matchup::Neutral => 100,
    }
}

/// Matchup and factor for an attack, for narration.
#[must_use]
pub fn combat_preview(attacker: &Card, defender: &Card, config: &EngineConfig) -> CombatPreview {
    let matchup = matchup(attacker, defender);
    CombatPreview {
        matchup,
        percent: matchup_percent(matchup, config),
    }
}

/// Attack damage from one card against another.
///
/// Base is the attacker's effective power, scaled by the matchup percent,
/// rounded to nearest and clamped at 0.
#[must_use]
pub fn calculate_damage(attacker: &Card, defender: &Card, config: &EngineConfig) -> i64 {
    let base = attacker.effective_power();
    let percent = i64::from(matchup_percent(matchup(attacker, defender), config));
    ((base * percent + 50) / 100).max(0)
}

/// Damage of a direct attack against a life total.
///
/// Raw effective power; sector matchups never apply to life totals.
#[must_use]
pub fn direct_attack_damage(attacker: &Card) -> i64 {
    attacker.effective_power()
}

/// Whether the defending life total can be attacked directly.
///
/// True when the defending field has no unlocked card: locked cards stay
/// attackable but never serve as voluntary blockers.
#[must_use]
pub fn can_apply_direct_damage<'a>(defending_field: impl IntoIterator<Item = &'a Card>) -> bool {
    defending_field.into_iter().all(|card| card.locked)
}
