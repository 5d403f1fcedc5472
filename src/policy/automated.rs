//! The automated opponent.
//!
//! A deliberately simple fixed policy: advance through draw, play the
//! cheapest affordable cards one at a time, resolve any manual targeting
//! with a random legal target, attack with every able card, and end the
//! turn. It proposes exactly one call per `decide`, so a scheduler can
//! pace its turn into observable steps.

use std::collections::VecDeque;

use crate::abilities::Ability;
use crate::cards::CardId;
use crate::core::{GameRng, Side};
use crate::state::{BattleEngine, TurnPhase};

use super::{AttackTarget, EngineCall, TurnPolicy};

/// Fixed-strategy policy for one side.
#[derive(Clone, Debug)]
pub struct AutoOpponent {
    side: Side,
    rng: GameRng,
    /// Cards played whose ability still needs a targeting request.
    needs_targeting: VecDeque<CardId>,
}

impl AutoOpponent {
    /// A policy acting for `side`, with its own deterministic RNG.
    #[must_use]
    pub fn new(side: Side, seed: u64) -> Self {
        Self {
            side,
            rng: GameRng::new(seed),
            needs_targeting: VecDeque::new(),
        }
    }

    /// Cheapest hand card that fits the current credits and field room.
    fn cheapest_playable(&self, engine: &BattleEngine) -> Option<CardId> {
        let state = engine.state();
        if state.field(self.side).len() >= engine.config().field_capacity {
            return None;
        }
        state
            .hand(self.side)
            .iter()
            .filter(|c| c.cost() <= state.credits[self.side])
            .min_by_key(|c| c.ovr)
            .map(|c| c.id)
    }

    fn decide_combat(&mut self, engine: &BattleEngine) -> Option<EngineCall> {
        let state = engine.state();
        let attacker = state
            .field(self.side)
            .iter()
            .find(|c| !engine.has_attacked(c.id))?
            .id;

        // Locked cards are still attackable; the lock flag matters only
        // for blocking.
        let enemy_cards: Vec<CardId> = state
            .field(self.side.other())
            .iter()
            .map(|c| c.id)
            .collect();

        let target = match self.rng.choose(&enemy_cards).copied() {
            Some(card) => AttackTarget::Card(card),
            None => AttackTarget::Life,
        };
        Some(EngineCall::Attack { attacker, target })
    }
}

impl TurnPolicy for AutoOpponent {
    fn side(&self) -> Side {
        self.side
    }

    fn decide(&mut self, engine: &BattleEngine) -> Option<EngineCall> {
        let state = engine.state();
        if state.is_game_over() || state.active_side != self.side {
            return None;
        }

        // An open targeting request always resolves first.
        if let Some(pending) = &state.pending_ability {
            let target = self.rng.choose(pending.valid_targets.as_slice()).copied()?;
            return Some(EngineCall::SelectTarget { target });
        }

        match state.turn_phase {
            TurnPhase::Draw | TurnPhase::End => Some(EngineCall::NextPhase),
            TurnPhase::Main => {
                // Open targeting for cards played earlier this turn whose
                // ability wants a manual target.
                while let Some(source) = self.needs_targeting.pop_front() {
                    if let Some(card) = state.field_card(source) {
                        let ability = Ability::for_rarity(card.rarity);
                        if ability.scope.is_manual() {
                            return Some(EngineCall::StartTargeting {
                                source,
                                kind: ability.kind,
                                scope: ability.scope,
                            });
                        }
                    }
                }

                if let Some(id) = self.cheapest_playable(engine) {
                    if let Some(card) = state.hand_card(self.side, id) {
                        if Ability::for_rarity(card.rarity).scope.is_manual() {
                            self.needs_targeting.push_back(id);
                        }
                    }
                    return Some(EngineCall::PlayCards {
                        side: self.side,
                        cards: smallvec::smallvec![id],
                    });
                }
                Some(EngineCall::NextPhase)
            }
            TurnPhase::Combat => self
                .decide_combat(engine)
                .or(Some(EngineCall::NextPhase)),
        }
    }
}
