//! Stock Wars battle engine.
//!
//! A deterministic engine for a two-sided collectible-card battle:
//! turn and phase state machine, credit-budgeted play actions,
//! sector-matchup combat, rarity-keyed abilities with a manual
//! targeting protocol, and a fixed-strategy automated opponent.
//!
//! The engine is presentation-agnostic: it holds no timers, animation
//! state, or narration. All mutation goes through [`BattleEngine`];
//! rule violations report `false` and leave the state untouched, and
//! [`GameState`] snapshots are O(1) persistent-structure clones so
//! "untouched" is checkable by deep equality.
//!
//! # Modules
//!
//! - [`core`]: sides, config, seeded RNG
//! - [`cards`]: templates, instances, rarity, sectors
//! - [`abilities`]: rarity-keyed ability table and effect math
//! - [`combat`]: sector matchup and damage resolution
//! - [`state`]: the game state aggregate and the battle engine
//! - [`policy`]: reified engine calls, the automated opponent, and the
//!   call scheduler
//!
//! # Example
//!
//! ```
//! use stock_wars::{BattleEngine, CardTemplate, EngineConfig, Rarity, Side};
//!
//! let mut engine = BattleEngine::new(EngineConfig::default(), 42);
//! let id = engine
//!     .deal(Side::Player, &CardTemplate::new("Nimbus Cloud", "Tech", 30, Rarity::Rare))
//!     .unwrap();
//!
//! engine.next_phase(); // draw -> main
//! assert!(engine.play_cards(&[id], Side::Player));
//! assert_eq!(engine.state().credits[Side::Player], 70);
//! ```

pub mod abilities;
pub mod cards;
pub mod combat;
pub mod core;
pub mod policy;
pub mod state;

pub use abilities::{Ability, AbilityKind, TargetScope};
pub use cards::{Card, CardId, CardTemplate, Rarity, Sector};
pub use combat::{calculate_damage, combat_preview, CombatPreview, Matchup};
pub use self::core::{EngineConfig, GameRng, Side, SideMap};
pub use policy::{AttackTarget, AutoOpponent, CallScheduler, EngineCall, TurnPolicy};
pub use state::{AvailableActions, BattleEngine, BattleEvent, GameState, PendingAbility, TurnPhase};
