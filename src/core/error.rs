//! Error types for the board manager and the engine.
//!
//! Every error is local and recoverable: the operation that produced it
//! performed no mutation, and the caller may simply try again.

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};

use super::action::ActionKind;
use super::state::GameResult;
use crate::board::Position;

/// Why a move was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum MoveRejection {
    /// The origin does not hold one of the mover's stones.
    #[display("origin is not one of your stones")]
    NotYourStone,
    /// The destination already holds a stone.
    #[display("destination is occupied")]
    DestinationOccupied,
    /// The destination is not adjacent and the mover cannot fly.
    #[display("destination is not adjacent")]
    NotAdjacent,
}

/// Why a removal was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum RemovalRejection {
    /// The target point is empty.
    #[display("point is empty")]
    Empty,
    /// The target is one of the remover's own stones.
    #[display("stone is your own")]
    OwnStone,
    /// The target sits in a mill and the opponent has stones outside mills.
    #[display("stone is protected by a mill")]
    ProtectedMill,
}

/// Positional misuse of the board manager.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, Error)]
pub enum BoardError {
    /// The point already holds a stone.
    #[display("position {position} is occupied")]
    Occupied { position: Position },
    /// The point holds no stone.
    #[display("position {position} is empty")]
    Empty { position: Position },
}

/// Any rejection reported by the engine.
#[derive(Clone, Debug, PartialEq, Eq, Display, Error)]
pub enum EngineError {
    /// Placement onto an occupied point.
    #[display("position {position} is occupied")]
    Occupied { position: Position },

    /// Operation on an empty point that needs a stone.
    #[display("position {position} is empty")]
    Empty { position: Position },

    /// Move breaks the adjacency/flying or ownership rules.
    #[display("illegal move {from} -> {to}: {reason}")]
    IllegalMove {
        from: Position,
        to: Position,
        reason: MoveRejection,
    },

    /// Removal target is not a capturable opponent stone.
    #[display("illegal removal at {position}: {reason}")]
    IllegalRemoval {
        position: Position,
        reason: RemovalRejection,
    },

    /// The submitted action kind does not fit the current phase.
    #[display("expected a {expected} action, got {got}")]
    WrongActionForPhase { expected: ActionKind, got: ActionKind },

    /// The game has already ended.
    #[display("game is already over ({result})")]
    GameAlreadyOver { result: GameResult },

    /// An internal consistency check failed. Indicates an engine bug.
    #[display("invariant violation: {message}")]
    InvariantViolation { message: String },

    /// A raw index does not name a board point.
    #[display("{index} is not a board position (0-23)")]
    InvalidPosition { index: u8 },

    /// A custom starting position is inconsistent.
    #[display("invalid setup: {message}")]
    InvalidSetup { message: String },

    /// Game configuration is unusable.
    #[display("invalid config: {message}")]
    InvalidConfig { message: String },
}

impl EngineError {
    pub(crate) fn invariant(message: impl Into<String>) -> Self {
        Self::InvariantViolation {
            message: message.into(),
        }
    }

    pub(crate) fn setup(message: impl Into<String>) -> Self {
        Self::InvalidSetup {
            message: message.into(),
        }
    }

    pub(crate) fn config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}

impl From<BoardError> for EngineError {
    fn from(err: BoardError) -> Self {
        match err {
            BoardError::Occupied { position } => EngineError::Occupied { position },
            BoardError::Empty { position } => EngineError::Empty { position },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::player::PlayerId;

    fn pos(i: u8) -> Position {
        Position::new(i).unwrap()
    }

    #[test]
    fn test_board_error_converts() {
        let err: EngineError = BoardError::Occupied { position: pos(3) }.into();
        assert_eq!(err, EngineError::Occupied { position: pos(3) });

        let err: EngineError = BoardError::Empty { position: pos(4) }.into();
        assert_eq!(err, EngineError::Empty { position: pos(4) });
    }

    #[test]
    fn test_display_messages() {
        let err = EngineError::IllegalMove {
            from: pos(0),
            to: pos(23),
            reason: MoveRejection::NotAdjacent,
        };
        assert_eq!(err.to_string(), "illegal move 0 -> 23: destination is not adjacent");

        let err = EngineError::WrongActionForPhase {
            expected: ActionKind::Remove,
            got: ActionKind::Place,
        };
        assert_eq!(err.to_string(), "expected a remove action, got place");

        let err = EngineError::GameAlreadyOver {
            result: GameResult::Winner(PlayerId::SECOND),
        };
        assert_eq!(err.to_string(), "game is already over (Player 2 wins)");
    }

    #[test]
    fn test_is_std_error() {
        fn assert_error<E: std::error::Error + Send + Sync + 'static>() {}
        assert_error::<BoardError>();
        assert_error::<EngineError>();
    }
}
