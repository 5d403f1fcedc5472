//! Ability definitions.
//!
//! Abilities are not persisted per card: each rarity maps 1:1 to one
//! ability, modeled as a closed enum so the resolver can match
//! exhaustively.

use serde::{Deserialize, Serialize};

use crate::cards::Rarity;
use crate::core::GameRng;

/// The six ability kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AbilityKind {
    /// Reduce an enemy card's effective power.
    Weaken,
    /// Convert the source's power into life for its owner.
    PowerToHealth,
    /// Damage the opposing life total directly, bypassing any card.
    DirectDamage,
    /// Raise an ally card's effective power.
    IncreasePower,
    /// Lock an enemy card; the source pays power equal to the target's OVR.
    Lock,
    /// Two random effects drawn from the other five kinds, auto-targeted.
    Limited,
}

impl AbilityKind {
    /// The five primitive kinds a Limited card can roll.
    pub const PRIMITIVES: [AbilityKind; 5] = [
        AbilityKind::Weaken,
        AbilityKind::PowerToHealth,
        AbilityKind::DirectDamage,
        AbilityKind::IncreasePower,
        AbilityKind::Lock,
    ];

    /// Draw two independent primitive kinds for a Limited activation.
    pub fn roll_limited(rng: &mut GameRng) -> [AbilityKind; 2] {
        let first = *rng
            .choose(&Self::PRIMITIVES)
            .unwrap_or(&AbilityKind::DirectDamage);
        let second = *rng
            .choose(&Self::PRIMITIVES)
            .unwrap_or(&AbilityKind::DirectDamage);
        [first, second]
    }
}

/// Who an ability targets.
///
/// `Source` and `None` resolve automatically when the card is played;
/// `Ally` and `Enemy` require a manual targeting request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetScope {
    /// The source card itself.
    Source,
    /// A friendly field card other than the source.
    Ally,
    /// An enemy field card.
    Enemy,
    /// No card target (life totals or composite effects).
    None,
}

impl TargetScope {
    /// Whether this scope needs a manual target selection.
    #[must_use]
    pub const fn is_manual(self) -> bool {
        matches!(self, TargetScope::Ally | TargetScope::Enemy)
    }
}

/// An ability: kind plus targeting discipline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ability {
    pub kind: AbilityKind,
    pub scope: TargetScope,
}

impl Ability {
    /// The ability a rarity grants.
    #[must_use]
    pub const fn for_rarity(rarity: Rarity) -> Ability {
        match rarity {
            Rarity::Common => Ability {
                kind: AbilityKind::Weaken,
                scope: TargetScope::Enemy,
            },
            Rarity::Uncommon => Ability {
                kind: AbilityKind::PowerToHealth,
                scope: TargetScope::Source,
            },
            Rarity::Rare => Ability {
                kind: AbilityKind::DirectDamage,
                scope: TargetScope::None,
            },
            Rarity::Epic => Ability {
                kind: AbilityKind::IncreasePower,
                scope: TargetScope::Ally,
            },
            Rarity::Legendary => Ability {
                kind: AbilityKind::Lock,
                scope: TargetScope::Enemy,
            },
            Rarity::Limited => Ability {
                kind: AbilityKind::Limited,
                scope: TargetScope::None,
            },
        }
    }

    /// The auto-targeting scope a primitive kind uses inside a Limited roll.
    #[must_use]
    pub const fn auto_scope(kind: AbilityKind) -> TargetScope {
        match kind {
            AbilityKind::Weaken | AbilityKind::Lock => TargetScope::Enemy,
            AbilityKind::IncreasePower => TargetScope::Ally,
            AbilityKind::PowerToHealth => TargetScope::Source,
            AbilityKind::DirectDamage | AbilityKind::Limited => TargetScope::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rarity_ability_table() {
        let weaken = Ability::for_rarity(Rarity::Common);
        assert_eq!(weaken.kind, AbilityKind::Weaken);
        assert_eq!(weaken.scope, TargetScope::Enemy);

        let heal = Ability::for_rarity(Rarity::Uncommon);
        assert_eq!(heal.kind, AbilityKind::PowerToHealth);
        assert_eq!(heal.scope, TargetScope::Source);

        let burn = Ability::for_rarity(Rarity::Rare);
        assert_eq!(burn.kind, AbilityKind::DirectDamage);
        assert_eq!(burn.scope, TargetScope::None);

        let pump = Ability::for_rarity(Rarity::Epic);
        assert_eq!(pump.kind, AbilityKind::IncreasePower);
        assert_eq!(pump.scope, TargetScope::Ally);

        let lock = Ability::for_rarity(Rarity::Legendary);
        assert_eq!(lock.kind, AbilityKind::Lock);
        assert_eq!(lock.scope, TargetScope::Enemy);

        let limited = Ability::for_rarity(Rarity::Limited);
        assert_eq!(limited.kind, AbilityKind::Limited);
        assert_eq!(limited.scope, TargetScope::None);
    }

    #[test]
    fn test_manual_scopes() {
        assert!(TargetScope::Ally.is_manual());
        assert!(TargetScope::Enemy.is_manual());
        assert!(!TargetScope::Source.is_manual());
        assert!(!TargetScope::None.is_manual());
    }

    #[test]
    fn test_roll_limited_draws_primitives() {
        let mut rng = GameRng::new(42);

        for _ in 0..50 {
            let [a, b] = AbilityKind::roll_limited(&mut rng);
            assert!(AbilityKind::PRIMITIVES.contains(&a));
            assert!(AbilityKind::PRIMITIVES.contains(&b));
        }
    }

    #[test]
    fn test_roll_limited_is_deterministic() {
        let mut rng1 = GameRng::new(7);
        let mut rng2 = GameRng::new(7);

        for _ in 0..20 {
            assert_eq!(
                AbilityKind::roll_limited(&mut rng1),
                AbilityKind::roll_limited(&mut rng2)
            );
        }
    }
}
