//! Turn policies: reified engine calls and the automated opponent.
//!
//! A `TurnPolicy` looks at the battle and proposes at most one
//! `EngineCall` at a time. Calls are plain data so they can be queued,
//! paced by a [`CallScheduler`], logged, or serialized for replay.

mod automated;
mod scheduler;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::abilities::{AbilityKind, TargetScope};
use crate::cards::CardId;
use crate::combat::{calculate_damage, can_apply_direct_damage, direct_attack_damage};
use crate::core::Side;
use crate::state::{BattleEngine, TurnPhase};

pub use automated::AutoOpponent;
pub use scheduler::CallScheduler;

/// What an attack is aimed at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttackTarget {
    /// A card on the defending field.
    Card(CardId),
    /// The defending life total directly.
    Life,
}

/// One engine mutation, reified as data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineCall {
    /// Play cards from a side's hand.
    PlayCards {
        side: Side,
        cards: SmallVec<[CardId; 5]>,
    },
    /// Advance the turn phase.
    NextPhase,
    /// End the turn immediately.
    EndTurn,
    /// Resolve one attack during combat.
    Attack {
        attacker: CardId,
        target: AttackTarget,
    },
    /// Open a manual targeting request.
    StartTargeting {
        source: CardId,
        kind: AbilityKind,
        scope: TargetScope,
    },
    /// Resolve the open targeting request.
    SelectTarget { target: CardId },
    /// Drop the open targeting request.
    CancelTargeting,
}

/// A policy that proposes engine calls for one side.
pub trait TurnPolicy {
    /// The side this policy acts for.
    fn side(&self) -> Side;

    /// Propose the next call, or `None` when there is nothing to do
    /// (not this side's turn, or the battle is over).
    fn decide(&mut self, engine: &BattleEngine) -> Option<EngineCall>;
}

/// Apply one reified call to the engine. Returns whether it took effect.
pub fn dispatch(engine: &mut BattleEngine, call: &EngineCall) -> bool {
    match call {
        EngineCall::PlayCards { side, cards } => engine.play_cards(cards, *side),
        EngineCall::NextPhase => {
            engine.next_phase();
            true
        }
        EngineCall::EndTurn => {
            engine.end_turn();
            true
        }
        EngineCall::Attack { attacker, target } => perform_attack(engine, *attacker, *target),
        EngineCall::StartTargeting {
            source,
            kind,
            scope,
        } => engine.start_ability_targeting(*source, *kind, *scope),
        EngineCall::SelectTarget { target } => engine.select_ability_target(*target),
        EngineCall::CancelTargeting => {
            engine.cancel_ability_targeting();
            true
        }
    }
}

/// Resolve one attack: matchup damage against a card, or raw effective
/// power against the life total when the defending field cannot block.
///
/// Rejected without effect when it is not the attacker's combat phase,
/// the attacker has already attacked, or the target is not legal (life
/// may only be struck while the defending field is empty or fully
/// locked). The lock flag never restricts attacking, only blocking.
pub fn perform_attack(engine: &mut BattleEngine, attacker: CardId, target: AttackTarget) -> bool {
    let state = engine.state();
    if state.is_game_over() || state.turn_phase != TurnPhase::Combat {
        return false;
    }
    let attacking_side = state.active_side;
    let Some(attacker_card) = state.field_card(attacker) else {
        return false;
    };
    if state.side_of_field_card(attacker) != Some(attacking_side) {
        return false;
    }
    if engine.has_attacked(attacker) {
        return false;
    }

    let defending_side = attacking_side.other();
    match target {
        AttackTarget::Card(defender) => {
            if state.side_of_field_card(defender) != Some(defending_side) {
                return false;
            }
            let Some(defender_card) = state.field_card(defender) else {
                return false;
            };
            let damage = calculate_damage(attacker_card, defender_card, engine.config());
            engine.mark_attacked(attacker);
            engine.damage_card(defender, damage, defending_side);
            true
        }
        AttackTarget::Life => {
            if !can_apply_direct_damage(engine.state().field(defending_side)) {
                return false;
            }
            let damage = direct_attack_damage(attacker_card);
            engine.mark_attacked(attacker);
            engine.damage_player(damage, defending_side);
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardTemplate, Rarity};
    use crate::core::EngineConfig;

    fn template(name: &str, sector: &str, ovr: i64) -> CardTemplate {
        CardTemplate::new(name, sector, ovr, Rarity::Common)
    }

    /// Player has `player_ovrs` on field, opponent has `opponent_ovrs`,
    /// player is in combat phase.
    fn combat_setup(
        player_ovrs: &[i64],
        opponent_ovrs: &[i64],
    ) -> (BattleEngine, Vec<CardId>, Vec<CardId>) {
        let mut engine = BattleEngine::new(EngineConfig::default(), 7);

        let player_ids: Vec<_> = player_ovrs
            .iter()
            .map(|&ovr| {
                engine
                    .deal(Side::Player, &template("P", "Tech", ovr))
                    .unwrap()
            })
            .collect();
        let opponent_ids: Vec<_> = opponent_ovrs
            .iter()
            .map(|&ovr| {
                engine
                    .deal(Side::Opponent, &template("O", "Finance", ovr))
                    .unwrap()
            })
            .collect();

        engine.next_phase(); // player draw -> main
        if !player_ids.is_empty() {
            assert!(engine.play_cards(&player_ids, Side::Player));
        }
        engine.end_turn();
        engine.next_phase(); // opponent draw -> main
        if !opponent_ids.is_empty() {
            assert!(engine.play_cards(&opponent_ids, Side::Opponent));
        }
        engine.end_turn();
        engine.next_phase(); // player draw -> main
        engine.next_phase(); // player main -> combat

        assert_eq!(engine.state().turn_phase, TurnPhase::Combat);
        (engine, player_ids, opponent_ids)
    }

    #[test]
    fn test_attack_card_applies_damage() {
        let (mut engine, players, opponents) = combat_setup(&[30], &[40]);

        assert!(perform_attack(
            &mut engine,
            players[0],
            AttackTarget::Card(opponents[0]),
        ));

        // Neutral matchup: full effective power. Health was 40 * 2.
        assert_eq!(
            engine.state().field_card(opponents[0]).map(|c| c.current_health),
            Some(50)
        );
        assert!(engine.has_attacked(players[0]));
    }

    #[test]
    fn test_attack_twice_rejected() {
        let (mut engine, players, opponents) = combat_setup(&[30], &[40]);

        assert!(perform_attack(
            &mut engine,
            players[0],
            AttackTarget::Card(opponents[0]),
        ));
        assert!(!perform_attack(
            &mut engine,
            players[0],
            AttackTarget::Card(opponents[0]),
        ));
    }

    #[test]
    fn test_attack_outside_combat_rejected() {
        let (mut engine, players, opponents) = combat_setup(&[30], &[40]);
        engine.next_phase(); // combat -> end -> next turn

        assert!(!perform_attack(
            &mut engine,
            players[0],
            AttackTarget::Card(opponents[0]),
        ));
    }

    #[test]
    fn test_life_attack_blocked_by_defenders() {
        let (mut engine, players, _) = combat_setup(&[30], &[40]);

        assert!(!perform_attack(&mut engine, players[0], AttackTarget::Life));
        assert_eq!(engine.state().life[Side::Opponent], 100);
    }

    #[test]
    fn test_life_attack_with_empty_field() {
        let (mut engine, players, _) = combat_setup(&[30], &[]);

        assert!(perform_attack(&mut engine, players[0], AttackTarget::Life));
        assert_eq!(engine.state().life[Side::Opponent], 70);
    }

    #[test]
    fn test_locked_attacker_still_attacks() {
        let mut engine = BattleEngine::new(EngineConfig::default(), 7);
        let striker = engine
            .deal(Side::Player, &template("P", "Tech", 30))
            .unwrap();
        let locker = engine
            .deal(
                Side::Opponent,
                &CardTemplate::new("L", "Finance", 60, Rarity::Legendary),
            )
            .unwrap();

        engine.next_phase();
        assert!(engine.play_cards(&[striker], Side::Player));
        engine.end_turn();

        // Opponent locks the player's card.
        engine.next_phase();
        assert!(engine.play_cards(&[locker], Side::Opponent));
        assert!(engine.start_ability_targeting(locker, AbilityKind::Lock, TargetScope::Enemy));
        assert!(engine.select_ability_target(striker));
        engine.end_turn();

        engine.next_phase(); // player draw -> main
        engine.next_phase(); // main -> combat
        assert!(engine.state().field_card(striker).map(|c| c.locked).unwrap());

        // Lock removes the card as a blocker, not as an attacker.
        assert!(perform_attack(
            &mut engine,
            striker,
            AttackTarget::Card(locker),
        ));
        assert!(engine.has_attacked(striker));
        assert_eq!(
            engine.state().field_card(locker).map(|c| c.current_health),
            Some(90)
        );
    }

    #[test]
    fn test_attack_rejects_enemy_attacker() {
        let (mut engine, _, opponents) = combat_setup(&[30], &[40]);

        // The opponent's card cannot attack during the player's combat.
        assert!(!perform_attack(&mut engine, opponents[0], AttackTarget::Life));
    }

    #[test]
    fn test_dispatch_play_and_advance() {
        let mut engine = BattleEngine::new(EngineConfig::default(), 7);
        let id = engine
            .deal(Side::Player, &template("P", "Tech", 20))
            .unwrap();

        assert!(dispatch(&mut engine, &EngineCall::NextPhase));
        assert!(dispatch(
            &mut engine,
            &EngineCall::PlayCards {
                side: Side::Player,
                cards: SmallVec::from_slice(&[id]),
            },
        ));

        assert_eq!(engine.state().field(Side::Player).len(), 1);
    }

    #[test]
    fn test_calls_serialize() {
        let call = EngineCall::Attack {
            attacker: CardId::new(3),
            target: AttackTarget::Life,
        };

        let json = serde_json::to_string(&call).unwrap();
        let back: EngineCall = serde_json::from_str(&json).unwrap();
        assert_eq!(call, back);
    }
}
