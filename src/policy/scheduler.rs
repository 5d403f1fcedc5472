//! Paced application of queued engine calls.
//!
//! Presentation layers want the automated turn to unfold in visible
//! steps rather than one synchronous burst. The scheduler holds calls
//! with tick delays and applies at most one mutation per `tick`, so two
//! calls can never land in the same frame.

use std::collections::VecDeque;

use crate::state::BattleEngine;

use super::{dispatch, EngineCall};

/// A queue of delayed engine calls, applied one per tick.
#[derive(Clone, Debug, Default)]
pub struct CallScheduler {
    queue: VecDeque<(u32, EngineCall)>,
}

impl CallScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a call to run after `delay_ticks` ticks reach the front of
    /// the queue.
    pub fn schedule(&mut self, delay_ticks: u32, call: EngineCall) {
        self.queue.push_back((delay_ticks, call));
    }

    /// Queue a call for the next tick.
    pub fn schedule_now(&mut self, call: EngineCall) {
        self.schedule(0, call);
    }

    /// Drop every queued call without applying it.
    pub fn clear(&mut self) {
        self.queue.clear();
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Advance one tick. Applies the front call if its delay has
    /// elapsed; never applies more than one call.
    ///
    /// Returns the call that ran, if any.
    pub fn tick(&mut self, engine: &mut BattleEngine) -> Option<EngineCall> {
        let front = self.queue.front_mut()?;
        if front.0 > 0 {
            front.0 -= 1;
            return None;
        }
        let (_, call) = self.queue.pop_front()?;
        dispatch(engine, &call);
        Some(call)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardId, CardTemplate, Rarity};
    use crate::core::{EngineConfig, Side};
    use crate::policy::AttackTarget;

    #[test]
    fn test_tick_applies_one_call() {
        let mut engine = BattleEngine::new(EngineConfig::default(), 9);
        let id = engine
            .deal(Side::Player, &CardTemplate::new("A", "Tech", 10, Rarity::Common))
            .unwrap();

        let mut scheduler = CallScheduler::new();
        scheduler.schedule_now(EngineCall::NextPhase);
        scheduler.schedule_now(EngineCall::PlayCards {
            side: Side::Player,
            cards: smallvec::smallvec![id],
        });

        assert_eq!(scheduler.tick(&mut engine), Some(EngineCall::NextPhase));
        // Second call waits for the next tick.
        assert_eq!(engine.state().field(Side::Player).len(), 0);

        scheduler.tick(&mut engine);
        assert_eq!(engine.state().field(Side::Player).len(), 1);
        assert!(scheduler.is_empty());
    }

    #[test]
    fn test_delay_counts_ticks() {
        let mut engine = BattleEngine::new(EngineConfig::default(), 9);
        let mut scheduler = CallScheduler::new();
        scheduler.schedule(2, EngineCall::NextPhase);

        assert_eq!(scheduler.tick(&mut engine), None);
        assert_eq!(scheduler.tick(&mut engine), None);
        assert_eq!(scheduler.tick(&mut engine), Some(EngineCall::NextPhase));
    }

    #[test]
    fn test_clear_drops_pending_calls() {
        let mut engine = BattleEngine::new(EngineConfig::default(), 9);
        let mut scheduler = CallScheduler::new();
        scheduler.schedule_now(EngineCall::Attack {
            attacker: CardId::new(1),
            target: AttackTarget::Life,
        });

        scheduler.clear();
        assert_eq!(scheduler.tick(&mut engine), None);
    }
}
