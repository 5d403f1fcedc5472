//! Structured battle events.
//!
//! The engine records what happened as data; narration text belongs to
//! the presentation layer. The event log lives on `BattleEngine`, not on
//! `GameState`, so snapshot comparisons of game state are unaffected by
//! logging.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::abilities::AbilityKind;
use crate::cards::CardId;
use crate::core::Side;

use super::phase::TurnPhase;

/// One observable engine event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleEvent {
    /// A card entered a hand.
    CardDealt { side: Side, card: CardId },

    /// A play action moved cards to the field and debited credits.
    CardsPlayed {
        side: Side,
        cards: SmallVec<[CardId; 5]>,
        cost: i64,
    },

    /// The turn phase advanced.
    PhaseAdvanced { phase: TurnPhase },

    /// Combat was skipped under the turn-1 empty-field rule.
    CombatSkipped,

    /// End-of-turn bookkeeping ran.
    TurnEnded { next_side: Side, turn: u32 },

    /// A field card took damage.
    CardDamaged { card: CardId, amount: i64 },

    /// A field card's health reached 0 and it left the field.
    CardDestroyed { side: Side, card: CardId },

    /// A life total took damage.
    PlayerDamaged { side: Side, amount: i64 },

    /// An ability resolved.
    AbilityApplied {
        source: CardId,
        kind: AbilityKind,
        target: Option<CardId>,
    },

    /// An ability found no legal target and produced no effect.
    AbilityFizzled { source: CardId, kind: AbilityKind },

    /// A card was recorded as having attacked this combat phase.
    AttackMarked { card: CardId },

    /// A life total reached 0.
    GameOver { winner: Side },
}
