//! Engine configuration.
//!
//! Balance constants are tunable configuration, not protocol: the state
//! machine and resolvers read everything numeric from `EngineConfig` so
//! a rebalance never touches engine code. The defaults here are the
//! shipped tuning.

use serde::{Deserialize, Serialize};

/// Tunable battle constants.
///
/// ## Example
///
/// ```
/// use stock_wars::core::EngineConfig;
///
/// let config = EngineConfig::default().with_starting_life(50);
/// assert_eq!(config.starting_life, 50);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Life total each side starts with.
    pub starting_life: i64,

    /// Credits the acting side has available each of its turns.
    pub credits_per_turn: i64,

    /// Maximum cards on one side's field.
    pub field_capacity: usize,

    /// Instance health dealt into a battle is `ovr * health_per_ovr`.
    pub health_per_ovr: i64,

    /// Damage multiplier (x100) when the defender's sector is the
    /// attacker's strong matchup.
    pub advantage_percent: u32,

    /// Damage multiplier (x100) when the defender's sector is the
    /// attacker's resisted matchup.
    pub disadvantage_percent: u32,

    /// Weaken ability: percent of the target's OVR removed from its
    /// power modifier.
    pub weaken_percent: u32,

    /// Power-to-health ability: percent of the source's OVR added to the
    /// owning side's life total.
    pub power_to_health_percent: u32,

    /// Direct-damage ability: percent of the source's OVR dealt to the
    /// opposing life total.
    pub direct_damage_percent: u32,

    /// Increase-power ability: percent of the target's OVR added to its
    /// power modifier.
    pub increase_power_percent: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            starting_life: 100,
            credits_per_turn: 100,
            field_capacity: 5,
            health_per_ovr: 2,
            advantage_percent: 150,
            disadvantage_percent: 67,
            weaken_percent: 25,
            power_to_health_percent: 50,
            direct_damage_percent: 20,
            increase_power_percent: 50,
        }
    }
}

impl EngineConfig {
    /// Set the starting life total (builder pattern).
    #[must_use]
    pub fn with_starting_life(mut self, life: i64) -> Self {
        self.starting_life = life;
        self
    }

    /// Set the per-turn credit allowance (builder pattern).
    #[must_use]
    pub fn with_credits_per_turn(mut self, credits: i64) -> Self {
        self.credits_per_turn = credits;
        self
    }

    /// Set the field capacity (builder pattern).
    #[must_use]
    pub fn with_field_capacity(mut self, capacity: usize) -> Self {
        self.field_capacity = capacity;
        self
    }

    /// Set the sector matchup multipliers, x100 (builder pattern).
    #[must_use]
    pub fn with_matchup_percents(mut self, advantage: u32, disadvantage: u32) -> Self {
        self.advantage_percent = advantage;
        self.disadvantage_percent = disadvantage;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();

        assert_eq!(config.field_capacity, 5);
        assert!(config.advantage_percent > 100);
        assert!(config.disadvantage_percent < 100);
    }

    #[test]
    fn test_builder() {
        let config = EngineConfig::default()
            .with_starting_life(60)
            .with_credits_per_turn(80)
            .with_field_capacity(3)
            .with_matchup_percents(200, 50);

        assert_eq!(config.starting_life, 60);
        assert_eq!(config.credits_per_turn, 80);
        assert_eq!(config.field_capacity, 3);
        assert_eq!(config.advantage_percent, 200);
        assert_eq!(config.disadvantage_percent, 50);
    }

    #[test]
    fn test_config_serialization() {
        let config = EngineConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: EngineConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
