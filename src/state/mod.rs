//! Battle state, phases, events, and the engine that mutates them.

mod engine;
mod events;
mod game_state;
mod phase;

pub use engine::{AvailableActions, BattleEngine};
pub use events::BattleEvent;
pub use game_state::{GameState, PendingAbility};
pub use phase::{BattlePhase, TurnPhase};
