//! Observable game state: phase, result and snapshots.
//!
//! ## GamePhase
//!
//! Which kind of action the engine expects next.
//!
//! ## GameSnapshot
//!
//! A read-only copy of everything a renderer needs: occupancy, players,
//! current player, phase and turn number.
//!
//! ## ActionOutcome
//!
//! What `submit_action` reports after an accepted action.

use serde::{Deserialize, Serialize};

use super::action::{Action, ActionKind};
use super::player::{Player, PlayerId, PlayerMap};
use crate::board::{BoardManager, Position};

/// Result of a completed game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameResult {
    /// Single winner.
    Winner(PlayerId),
    /// Draw (no winner).
    Draw,
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        matches!(self, GameResult::Winner(p) if *p == player)
    }

    /// Get the winner, if there is one.
    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        match self {
            GameResult::Winner(p) => Some(*p),
            GameResult::Draw => None,
        }
    }
}

impl std::fmt::Display for GameResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameResult::Winner(player) => write!(f, "{} wins", player),
            GameResult::Draw => write!(f, "draw"),
        }
    }
}

/// Phase of the referee state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    /// Stones are entering from hand.
    Placing,
    /// All stones placed; stones move (or fly with exactly three).
    MovingOrFlying,
    /// The player to move formed a mill and must capture.
    RemovalPending,
    /// Terminal.
    GameOver(GameResult),
}

impl GamePhase {
    /// The action kind this phase accepts, `None` once the game is over.
    #[must_use]
    pub fn expected_action(&self) -> Option<ActionKind> {
        match self {
            GamePhase::Placing => Some(ActionKind::Place),
            GamePhase::MovingOrFlying => Some(ActionKind::Move),
            GamePhase::RemovalPending => Some(ActionKind::Remove),
            GamePhase::GameOver(_) => None,
        }
    }

    /// Check if the game has ended.
    #[must_use]
    pub fn is_over(&self) -> bool {
        matches!(self, GamePhase::GameOver(_))
    }

    /// Get the result if the game has ended.
    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        match self {
            GamePhase::GameOver(result) => Some(*result),
            _ => None,
        }
    }
}

/// Read-only copy of the full game state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// Occupancy of every point.
    pub board: BoardManager,

    /// Both players with their counters.
    pub players: PlayerMap<Player>,

    /// Player to act (the capturer while a removal is pending).
    pub current_player: PlayerId,

    /// Current phase.
    pub phase: GamePhase,

    /// Turn number (starts at 1, advances when the move passes).
    pub turn: u32,
}

impl GameSnapshot {
    /// The player to act.
    #[must_use]
    pub fn current(&self) -> &Player {
        &self.players[self.current_player]
    }

    /// The player not to act.
    #[must_use]
    pub fn opponent(&self) -> &Player {
        &self.players[self.current_player.opponent()]
    }
}

/// Report of an accepted action.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionOutcome {
    /// Who acted.
    pub player: PlayerId,

    /// What was applied.
    pub action: Action,

    /// The action completed at least one new mill. A removal is owed
    /// unless the opponent had no stones on the board.
    pub mill_formed: bool,

    /// Point a stone was captured from, for removal actions.
    pub captured: Option<Position>,

    /// Set when this action ended the game.
    pub result: Option<GameResult>,

    /// State after the action.
    pub snapshot: GameSnapshot,
}

impl ActionOutcome {
    /// The phase after the action.
    #[must_use]
    pub fn phase(&self) -> GamePhase {
        self.snapshot.phase
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_result_is_winner() {
        let result = GameResult::Winner(PlayerId::SECOND);
        assert!(!result.is_winner(PlayerId::FIRST));
        assert!(result.is_winner(PlayerId::SECOND));
        assert_eq!(result.winner(), Some(PlayerId::SECOND));

        let draw = GameResult::Draw;
        assert!(!draw.is_winner(PlayerId::FIRST));
        assert_eq!(draw.winner(), None);
    }

    #[test]
    fn test_phase_expected_action() {
        assert_eq!(GamePhase::Placing.expected_action(), Some(ActionKind::Place));
        assert_eq!(GamePhase::MovingOrFlying.expected_action(), Some(ActionKind::Move));
        assert_eq!(GamePhase::RemovalPending.expected_action(), Some(ActionKind::Remove));

        let over = GamePhase::GameOver(GameResult::Draw);
        assert_eq!(over.expected_action(), None);
        assert!(over.is_over());
        assert_eq!(over.result(), Some(GameResult::Draw));
    }

    #[test]
    fn test_phase_serialization() {
        let phase = GamePhase::GameOver(GameResult::Winner(PlayerId::FIRST));
        let json = serde_json::to_string(&phase).unwrap();
        let deserialized: GamePhase = serde_json::from_str(&json).unwrap();
        assert_eq!(phase, deserialized);
    }
}
