//! Combat damage resolution.

mod resolver;

pub use resolver::{
    calculate_damage, can_apply_direct_damage, combat_preview, direct_attack_damage, matchup,
    matchup_percent, CombatPreview, Matchup,
};
