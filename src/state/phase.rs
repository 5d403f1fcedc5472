//! Turn and battle phase enums.

use serde::{Deserialize, Serialize};

/// Phase within one side's turn.
///
/// Advances linearly: draw, main, combat, end. There are no cross-edges;
/// combat can only be skipped under the turn-1 empty-field rule in the
/// state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnPhase {
    Draw,
    Main,
    Combat,
    End,
}

impl TurnPhase {
    /// The next phase in the cycle.
    #[must_use]
    pub const fn next(self) -> TurnPhase {
        match self {
            TurnPhase::Draw => TurnPhase::Main,
            TurnPhase::Main => TurnPhase::Combat,
            TurnPhase::Combat => TurnPhase::End,
            TurnPhase::End => TurnPhase::Draw,
        }
    }
}

impl std::fmt::Display for TurnPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TurnPhase::Draw => "draw",
            TurnPhase::Main => "main",
            TurnPhase::Combat => "combat",
            TurnPhase::End => "end",
        };
        write!(f, "{name}")
    }
}

/// Whole-battle phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BattlePhase {
    /// The battle is in progress.
    Playing,
    /// A life total reached 0; all mutating operations are no-ops.
    GameOver,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_cycle() {
        assert_eq!(TurnPhase::Draw.next(), TurnPhase::Main);
        assert_eq!(TurnPhase::Main.next(), TurnPhase::Combat);
        assert_eq!(TurnPhase::Combat.next(), TurnPhase::End);
        assert_eq!(TurnPhase::End.next(), TurnPhase::Draw);
    }

    #[test]
    fn test_phase_display() {
        assert_eq!(format!("{}", TurnPhase::Main), "main");
        assert_eq!(format!("{}", TurnPhase::Combat), "combat");
    }
}
