//! The shared battle state aggregate.
//!
//! One `GameState` exists per battle. It is mutated exclusively through
//! `BattleEngine` operations; everything else reads snapshots. Hands and
//! fields use `im` persistent vectors so snapshots are O(1) clones and
//! deep equality is cheap - failed operations are verified to leave the
//! state untouched by comparing snapshots.

use im::Vector;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::abilities::{AbilityKind, TargetScope};
use crate::cards::{Card, CardId};
use crate::core::{EngineConfig, Side, SideMap};

use super::phase::{BattlePhase, TurnPhase};

/// An open ability-targeting request awaiting a manual selection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingAbility {
    /// The card whose ability is targeting.
    pub source: CardId,

    /// The ability kind being resolved.
    pub kind: AbilityKind,

    /// Ally or enemy scope (automatic scopes never create a request).
    pub scope: TargetScope,

    /// Field cards the selection may name. Never empty: a request with no
    /// valid targets fizzles instead of being stored.
    pub valid_targets: SmallVec<[CardId; 5]>,
}

/// The single shared battle state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// Turn counter, starting at 1.
    pub turn_number: u32,

    /// Phase within the current turn.
    pub turn_phase: TurnPhase,

    /// Playing or game over.
    pub battle_phase: BattlePhase,

    /// Whose turn it is. Only this side may issue mutating calls.
    pub active_side: Side,

    /// Life totals, clamped at 0.
    pub life: SideMap<i64>,

    /// Spendable credits for each side's play actions.
    pub credits: SideMap<i64>,

    /// Cards held, per side.
    hands: SideMap<Vector<Card>>,

    /// Cards in play, per side. Capacity-bounded by the engine config.
    fields: SideMap<Vector<Card>>,

    /// Cards that have already attacked this combat phase. Cleared on
    /// every transition into combat and at end of turn; ids of cards
    /// leaving a field are dropped in the same transaction.
    pub attacked_this_combat: FxHashSet<CardId>,

    /// Open targeting request, if any. Blocks phase advancement past main.
    pub pending_ability: Option<PendingAbility>,

    /// UI selection memo for the pending request; cleared alongside it.
    pub selected_target: Option<CardId>,

    /// Set exactly when `battle_phase` becomes `GameOver`.
    pub winner: Option<Side>,
}

impl GameState {
    /// Fresh battle state: turn 1, draw phase, player active, life and
    /// credits from the config, empty hands and fields.
    #[must_use]
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            turn_number: 1,
            turn_phase: TurnPhase::Draw,
            battle_phase: BattlePhase::Playing,
            active_side: Side::Player,
            life: SideMap::with_value(config.starting_life),
            credits: SideMap::with_value(config.credits_per_turn),
            hands: SideMap::new(|_| Vector::new()),
            fields: SideMap::new(|_| Vector::new()),
            attacked_this_combat: FxHashSet::default(),
            pending_ability: None,
            selected_target: None,
            winner: None,
        }
    }

    /// Whether the battle has ended.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.battle_phase == BattlePhase::GameOver
    }

    // === Hands ===

    /// A side's hand.
    #[must_use]
    pub fn hand(&self, side: Side) -> &Vector<Card> {
        &self.hands[side]
    }

    pub(crate) fn hand_mut(&mut self, side: Side) -> &mut Vector<Card> {
        &mut self.hands[side]
    }

    /// Find a card in a side's hand.
    #[must_use]
    pub fn hand_card(&self, side: Side, id: CardId) -> Option<&Card> {
        self.hands[side].iter().find(|c| c.id == id)
    }

    // === Fields ===

    /// A side's field.
    #[must_use]
    pub fn field(&self, side: Side) -> &Vector<Card> {
        &self.fields[side]
    }

    pub(crate) fn field_mut(&mut self, side: Side) -> &mut Vector<Card> {
        &mut self.fields[side]
    }

    /// Which side's field holds a card, if any.
    #[must_use]
    pub fn side_of_field_card(&self, id: CardId) -> Option<Side> {
        Side::both().find(|&side| self.fields[side].iter().any(|c| c.id == id))
    }

    /// Find a card on either field.
    #[must_use]
    pub fn field_card(&self, id: CardId) -> Option<&Card> {
        Side::both().find_map(|side| self.fields[side].iter().find(|c| c.id == id))
    }

    pub(crate) fn field_card_mut(&mut self, id: CardId) -> Option<&mut Card> {
        for side in Side::both() {
            if let Some(pos) = self.fields[side].iter().position(|c| c.id == id) {
                return self.fields[side].get_mut(pos);
            }
        }
        None
    }

    /// Whether any card id exists anywhere in the battle.
    #[must_use]
    pub fn contains_card(&self, id: CardId) -> bool {
        Side::both().any(|side| {
            self.hands[side].iter().any(|c| c.id == id)
                || self.fields[side].iter().any(|c| c.id == id)
        })
    }
}
