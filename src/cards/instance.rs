//! Card instances - per-battle mutable card state.
//!
//! A `Card` is a specific dealt copy of a template at a specific moment:
//! it tracks current health, the signed power modifier applied by
//! abilities, and the lock flag. Effective power is always
//! `ovr + power_modifier`, floored at 0.

use serde::{Deserialize, Serialize};

use crate::core::EngineConfig;

use super::template::{CardId, CardTemplate, Rarity, Sector};

/// A card instance in a battle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Unique id for this instance.
    pub id: CardId,

    /// Card name (from the template).
    pub name: String,

    /// The card's sector.
    pub sector: Sector,

    /// Overall power rating; also the play cost.
    pub ovr: i64,

    /// Rarity; determines the card's ability.
    pub rarity: Rarity,

    /// Sector this card attacks with advantage, if any.
    pub strong_against: Option<Sector>,

    /// Sector this card attacks with disadvantage, if any.
    pub resistant_to: Option<Sector>,

    /// Remaining health. The card leaves the field when this hits 0.
    pub current_health: i64,

    /// Signed delta applied on top of OVR by abilities.
    pub power_modifier: i64,

    /// Locked cards cannot serve as voluntary blockers. They can still
    /// be attacked.
    pub locked: bool,
}

impl Card {
    /// Instantiate a template as a battle card.
    #[must_use]
    pub fn from_template(id: CardId, template: &CardTemplate, config: &EngineConfig) -> Self {
        Self {
            id,
            name: template.name.clone(),
            sector: template.sector.clone(),
            ovr: template.ovr,
            rarity: template.rarity,
            strong_against: template.strong_against.clone(),
            resistant_to: template.resistant_to.clone(),
            current_health: template.ovr * config.health_per_ovr,
            power_modifier: 0,
            locked: false,
        }
    }

    /// Effective power: `ovr + power_modifier`, floored at 0.
    #[must_use]
    pub fn effective_power(&self) -> i64 {
        (self.ovr + self.power_modifier).max(0)
    }

    /// The credit cost to play this card.
    #[must_use]
    pub fn cost(&self) -> i64 {
        self.ovr
    }

    /// Whether the card is still alive.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.current_health > 0
    }

    /// Apply damage, clamping health at 0.
    ///
    /// Returns true if the card died.
    pub fn take_damage(&mut self, amount: i64) -> bool {
        self.current_health = (self.current_health - amount.max(0)).max(0);
        self.current_health == 0
    }

    /// Shift the power modifier by `delta` (either sign).
    pub fn modify_power(&mut self, delta: i64) {
        self.power_modifier += delta;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_card(ovr: i64) -> Card {
        let config = EngineConfig::default();
        CardTemplate::new("Test", "Tech", ovr, Rarity::Common).deal(CardId::new(1), &config)
    }

    #[test]
    fn test_effective_power() {
        let mut card = test_card(50);
        assert_eq!(card.effective_power(), 50);

        card.modify_power(10);
        assert_eq!(card.effective_power(), 60);

        card.modify_power(-25);
        assert_eq!(card.effective_power(), 35);
    }

    #[test]
    fn test_effective_power_floors_at_zero() {
        let mut card = test_card(20);
        card.modify_power(-100);

        assert_eq!(card.effective_power(), 0);
        // The raw modifier is preserved; only the derived power clamps.
        assert_eq!(card.power_modifier, -100);
    }

    #[test]
    fn test_take_damage_clamps() {
        let mut card = test_card(10); // 20 health at default config

        assert!(!card.take_damage(15));
        assert_eq!(card.current_health, 5);

        assert!(card.take_damage(50));
        assert_eq!(card.current_health, 0);
        assert!(!card.is_alive());
    }

    #[test]
    fn test_take_damage_ignores_negative() {
        let mut card = test_card(10);
        let before = card.current_health;

        card.take_damage(-5);
        assert_eq!(card.current_health, before);
    }

    #[test]
    fn test_cost_is_ovr() {
        let card = test_card(35);
        assert_eq!(card.cost(), 35);
    }

    #[test]
    fn test_card_serialization() {
        let card = test_card(25);

        let json = serde_json::to_string(&card).unwrap();
        let deserialized: Card = serde_json::from_str(&json).unwrap();

        assert_eq!(card, deserialized);
    }
}
