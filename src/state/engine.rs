//! The battle state machine.
//!
//! `BattleEngine` owns the single shared `GameState` and is the only
//! mutation surface. Every operation is synchronous and atomic: it either
//! commits a validated transition or returns failure with the state
//! untouched. Expected rule violations (insufficient credits, full field,
//! wrong phase, wrong owner, invalid target) report `false`; they are
//! never panics. Once a life total reaches 0 the battle is over and every
//! mutating operation becomes a no-op.

use im::Vector;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::abilities::{effect_of, Ability, AbilityKind, TargetScope};
use crate::cards::{CardId, CardTemplate};
use crate::core::{EngineConfig, GameRng, Side};

use super::events::BattleEvent;
use super::game_state::{GameState, PendingAbility};
use super::phase::TurnPhase;

/// Derived read-only flags for a side, for UI enablement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailableActions {
    /// The side may submit a play action right now.
    pub can_play_cards: bool,
    /// The side may advance the phase right now.
    pub can_advance_phase: bool,
}

/// The battle engine: config, state, RNG, and the event log.
#[derive(Clone, Debug)]
pub struct BattleEngine {
    config: EngineConfig,
    state: GameState,
    rng: GameRng,
    events: Vector<BattleEvent>,
    next_card_id: u32,
}

impl BattleEngine {
    /// Create a new battle with the given config and RNG seed.
    #[must_use]
    pub fn new(config: EngineConfig, seed: u64) -> Self {
        let state = GameState::new(&config);
        Self {
            config,
            state,
            rng: GameRng::new(seed),
            events: Vector::new(),
            next_card_id: 1,
        }
    }

    /// The engine configuration.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Read the current state.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// O(1) snapshot of the current state.
    #[must_use]
    pub fn snapshot(&self) -> GameState {
        self.state.clone()
    }

    /// The event log since creation or the last `reset`.
    #[must_use]
    pub fn events(&self) -> &Vector<BattleEvent> {
        &self.events
    }

    /// Discard the battle and start fresh from the same config.
    pub fn reset(&mut self) {
        self.state = GameState::new(&self.config);
        self.events.clear();
        self.next_card_id = 1;
    }

    fn record(&mut self, event: BattleEvent) {
        self.events.push_back(event);
    }

    // === Card lifecycle ===

    /// Deal a template into a side's hand, allocating the instance id.
    ///
    /// Deck composition and draw order are presentation concerns; this is
    /// the seeding hook. Returns `None` once the battle is over.
    pub fn deal(&mut self, side: Side, template: &CardTemplate) -> Option<CardId> {
        if self.state.is_game_over() {
            return None;
        }

        let id = CardId::new(self.next_card_id);
        self.next_card_id += 1;

        let card = template.deal(id, &self.config);
        self.state.hand_mut(side).push_back(card);
        self.record(BattleEvent::CardDealt { side, card: id });
        Some(id)
    }

    // === Play action ===

    /// Move cards from the acting side's hand to its field, debiting
    /// credits by the summed OVR.
    ///
    /// Fails without any state change if it is not the side's main phase,
    /// any id is not in the side's hand, the summed cost exceeds the
    /// side's credits, or the field lacks capacity. On success, automatic
    /// abilities (self/none scope, including Limited rolls) resolve inside
    /// the same transaction; manually-targeted abilities wait for a
    /// targeting request.
    pub fn play_cards(&mut self, ids: &[CardId], side: Side) -> bool {
        if self.state.is_game_over() || ids.is_empty() {
            return false;
        }
        if side != self.state.active_side || self.state.turn_phase != TurnPhase::Main {
            return false;
        }
        if self.state.pending_ability.is_some() {
            return false;
        }

        let mut seen = FxHashSet::default();
        if !ids.iter().all(|id| seen.insert(*id)) {
            return false;
        }

        let mut cost = 0;
        for id in ids {
            match self.state.hand_card(side, *id) {
                Some(card) => cost += card.cost(),
                None => return false,
            }
        }
        if cost > self.state.credits[side] {
            return false;
        }
        if self.state.field(side).len() + ids.len() > self.config.field_capacity {
            return false;
        }

        // Validated; commit.
        for id in ids {
            if let Some(pos) = self.state.hand_mut(side).iter().position(|c| c.id == *id) {
                let card = self.state.hand_mut(side).remove(pos);
                self.state.field_mut(side).push_back(card);
            }
        }
        self.state.credits[side] -= cost;
        self.record(BattleEvent::CardsPlayed {
            side,
            cards: SmallVec::from_slice(ids),
            cost,
        });

        for id in ids {
            self.auto_resolve_on_play(*id, side);
        }

        true
    }

    /// Resolve the automatic part of a just-played card's ability.
    fn auto_resolve_on_play(&mut self, source: CardId, side: Side) {
        if self.state.is_game_over() {
            return;
        }
        let Some(card) = self.state.field_card(source) else {
            return;
        };
        let ability = Ability::for_rarity(card.rarity);

        match ability.kind {
            AbilityKind::Limited => {
                let kinds = AbilityKind::roll_limited(&mut self.rng);
                for kind in kinds {
                    self.auto_apply(source, side, kind);
                }
            }
            _ if !ability.scope.is_manual() => {
                self.apply_ability(source, side, ability.kind, None);
            }
            // Ally/enemy scopes wait for a targeting request.
            _ => {}
        }
    }

    /// Apply one primitive kind with automatic target resolution.
    fn auto_apply(&mut self, source: CardId, side: Side, kind: AbilityKind) {
        if self.state.is_game_over() {
            return;
        }
        match Ability::auto_scope(kind) {
            TargetScope::Source | TargetScope::None => {
                self.apply_ability(source, side, kind, None);
            }
            scope @ (TargetScope::Ally | TargetScope::Enemy) => {
                let candidates = self.targets_for(source, side, scope);
                match self.rng.choose(&candidates).copied() {
                    Some(target) => self.apply_ability(source, side, kind, Some(target)),
                    None => self.record(BattleEvent::AbilityFizzled { source, kind }),
                }
            }
        }
    }

    /// Legal field targets for a scope, excluding the source for allies.
    fn targets_for(&self, source: CardId, side: Side, scope: TargetScope) -> Vec<CardId> {
        let target_side = match scope {
            TargetScope::Ally => side,
            _ => side.other(),
        };
        self.state
            .field(target_side)
            .iter()
            .filter(|c| !(scope == TargetScope::Ally && c.id == source))
            .map(|c| c.id)
            .collect()
    }

    /// Apply a primitive ability's computed effect.
    fn apply_ability(
        &mut self,
        source: CardId,
        source_side: Side,
        kind: AbilityKind,
        target: Option<CardId>,
    ) {
        let Some(source_ovr) = self.state.field_card(source).map(|c| c.ovr) else {
            return;
        };
        let target_ovr = target.and_then(|t| self.state.field_card(t)).map(|c| c.ovr);
        let effect = effect_of(kind, source_ovr, target_ovr, &self.config);

        if effect.source_power_delta != 0 {
            if let Some(card) = self.state.field_card_mut(source) {
                card.modify_power(effect.source_power_delta);
            }
        }
        if let Some(target_id) = target {
            if let Some(card) = self.state.field_card_mut(target_id) {
                if effect.target_power_delta != 0 {
                    card.modify_power(effect.target_power_delta);
                }
                if effect.lock_target {
                    card.locked = true;
                }
            }
        }
        if effect.own_life_delta != 0 {
            self.state.life[source_side] =
                (self.state.life[source_side] + effect.own_life_delta).max(0);
        }
        if effect.enemy_life_delta < 0 {
            self.record(BattleEvent::AbilityApplied { source, kind, target });
            self.damage_player(-effect.enemy_life_delta, source_side.other());
            return;
        }

        self.record(BattleEvent::AbilityApplied { source, kind, target });
    }

    // === Phase machine ===

    /// Advance the turn phase: draw, main, combat, end.
    ///
    /// No-op while a targeting request is open or after game over.
    /// Entering combat clears the attacked-this-combat set; entering end
    /// runs end-of-turn bookkeeping without a separate call. On turn 1,
    /// leaving main with both fields empty skips combat entirely.
    pub fn next_phase(&mut self) {
        if self.state.is_game_over() || self.state.pending_ability.is_some() {
            return;
        }

        match self.state.turn_phase {
            TurnPhase::Draw => {
                self.state.turn_phase = TurnPhase::Main;
                self.record(BattleEvent::PhaseAdvanced {
                    phase: TurnPhase::Main,
                });
            }
            TurnPhase::Main => {
                let fields_empty = Side::both().all(|s| self.state.field(s).is_empty());
                if self.state.turn_number == 1 && fields_empty {
                    self.record(BattleEvent::CombatSkipped);
                    self.end_turn();
                } else {
                    self.state.attacked_this_combat.clear();
                    self.state.turn_phase = TurnPhase::Combat;
                    self.record(BattleEvent::PhaseAdvanced {
                        phase: TurnPhase::Combat,
                    });
                }
            }
            TurnPhase::Combat | TurnPhase::End => {
                self.end_turn();
            }
        }
    }

    /// End the turn immediately, regardless of current phase.
    ///
    /// Swaps the active side, increments the turn counter, refills the
    /// incoming side's credits, clears attack tracking, and returns the
    /// phase to draw.
    pub fn end_turn(&mut self) {
        if self.state.is_game_over() || self.state.pending_ability.is_some() {
            return;
        }

        let next = self.state.active_side.other();
        self.state.active_side = next;
        self.state.turn_number += 1;
        self.state.credits[next] = self.config.credits_per_turn;
        self.state.attacked_this_combat.clear();
        self.state.selected_target = None;
        self.state.turn_phase = TurnPhase::Draw;
        self.record(BattleEvent::TurnEnded {
            next_side: next,
            turn: self.state.turn_number,
        });
    }

    // === Damage ===

    /// Subtract health from a card on `side`'s field, clamped at 0.
    ///
    /// A card whose health reaches 0 leaves the field, the attack
    /// tracking set, and any open targeting request in the same call.
    pub fn damage_card(&mut self, id: CardId, amount: i64, side: Side) {
        if self.state.is_game_over() {
            return;
        }
        let Some(pos) = self.state.field(side).iter().position(|c| c.id == id) else {
            return;
        };

        let died = match self.state.field_mut(side).get_mut(pos) {
            Some(card) => card.take_damage(amount),
            None => return,
        };
        self.record(BattleEvent::CardDamaged { card: id, amount });

        if died {
            self.state.field_mut(side).remove(pos);
            self.state.attacked_this_combat.remove(&id);
            self.prune_pending_after_removal(id);
            self.record(BattleEvent::CardDestroyed { side, card: id });
        }
    }

    /// Subtract from a side's life total, clamped at 0.
    ///
    /// Reaching 0 ends the battle and sets the winner.
    pub fn damage_player(&mut self, amount: i64, target: Side) {
        if self.state.is_game_over() {
            return;
        }
        let amount = amount.max(0);
        self.state.life[target] = (self.state.life[target] - amount).max(0);
        self.record(BattleEvent::PlayerDamaged {
            side: target,
            amount,
        });

        if self.state.life[target] == 0 {
            let winner = target.other();
            self.state.battle_phase = super::phase::BattlePhase::GameOver;
            self.state.winner = Some(winner);
            self.state.pending_ability = None;
            self.state.selected_target = None;
            self.record(BattleEvent::GameOver { winner });
        }
    }

    /// Drop a removed card from the open targeting request, fizzling the
    /// request if it loses its source or its last valid target.
    fn prune_pending_after_removal(&mut self, removed: CardId) {
        let Some(pending) = self.state.pending_ability.as_mut() else {
            return;
        };
        if pending.source == removed {
            self.state.pending_ability = None;
            self.state.selected_target = None;
            return;
        }
        pending.valid_targets.retain(|id| *id != removed);
        if pending.valid_targets.is_empty() {
            let (source, kind) = (pending.source, pending.kind);
            self.state.pending_ability = None;
            self.state.selected_target = None;
            self.record(BattleEvent::AbilityFizzled { source, kind });
        }
    }

    // === Attack tracking ===

    /// Record that a field card has attacked this combat phase.
    ///
    /// Callers must reject repeat attacks via `has_attacked` before
    /// resolving combat.
    pub fn mark_attacked(&mut self, id: CardId) {
        if self.state.is_game_over() {
            return;
        }
        if self.state.side_of_field_card(id).is_some() {
            self.state.attacked_this_combat.insert(id);
            self.record(BattleEvent::AttackMarked { card: id });
        }
    }

    /// Whether a card has already attacked this combat phase.
    #[must_use]
    pub fn has_attacked(&self, id: CardId) -> bool {
        self.state.attacked_this_combat.contains(&id)
    }

    // === Ability targeting protocol ===

    /// Open a manual targeting request for an ally- or enemy-scoped
    /// ability.
    ///
    /// Valid targets are the implied side's field cards, excluding the
    /// source itself for ally scope. With no valid target the ability
    /// fizzles: `false`, and no request is stored.
    pub fn start_ability_targeting(
        &mut self,
        source: CardId,
        kind: AbilityKind,
        scope: TargetScope,
    ) -> bool {
        if self.state.is_game_over() || self.state.pending_ability.is_some() {
            return false;
        }
        if !scope.is_manual() {
            return false;
        }
        let Some(source_side) = self.state.side_of_field_card(source) else {
            return false;
        };

        let valid_targets: SmallVec<[CardId; 5]> = self
            .targets_for(source, source_side, scope)
            .into_iter()
            .collect();
        if valid_targets.is_empty() {
            self.record(BattleEvent::AbilityFizzled { source, kind });
            return false;
        }

        self.state.pending_ability = Some(PendingAbility {
            source,
            kind,
            scope,
            valid_targets,
        });
        true
    }

    /// Resolve the open targeting request against a selected target.
    ///
    /// Valid only while a request is open and the target is one of its
    /// valid targets; applies the ability and clears the request.
    pub fn select_ability_target(&mut self, target: CardId) -> bool {
        if self.state.is_game_over() {
            return false;
        }
        let Some(pending) = self.state.pending_ability.as_ref() else {
            return false;
        };
        if !pending.valid_targets.contains(&target) {
            return false;
        }
        let (source, kind) = (pending.source, pending.kind);
        let Some(source_side) = self.state.side_of_field_card(source) else {
            return false;
        };

        self.state.pending_ability = None;
        self.state.selected_target = None;
        self.apply_ability(source, source_side, kind, Some(target));
        true
    }

    /// Drop the open targeting request with no state effect.
    ///
    /// Used on explicit cancel or timeout; leaves the state equal to its
    /// pre-request value.
    pub fn cancel_ability_targeting(&mut self) {
        self.state.pending_ability = None;
        self.state.selected_target = None;
    }

    /// Remember a provisional target selection for the UI.
    pub fn set_selected_target(&mut self, target: CardId) {
        self.state.selected_target = Some(target);
    }

    /// Clear the provisional target selection.
    pub fn reset_selected_target(&mut self) {
        self.state.selected_target = None;
    }

    // === Derived flags ===

    /// Read-only action flags for a side.
    #[must_use]
    pub fn available_actions(&self, side: Side) -> AvailableActions {
        let state = &self.state;
        let my_turn = !state.is_game_over() && side == state.active_side;
        let unblocked = my_turn && state.pending_ability.is_none();

        let can_play_cards = unblocked
            && state.turn_phase == TurnPhase::Main
            && state.field(side).len() < self.config.field_capacity
            && state
                .hand(side)
                .iter()
                .any(|c| c.cost() <= state.credits[side]);

        AvailableActions {
            can_play_cards,
            can_advance_phase: unblocked,
        }
    }
}
