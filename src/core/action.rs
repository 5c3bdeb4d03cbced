//! Action representation and history records.
//!
//! An action is what the caller asks the engine to do on behalf of the
//! player to move. The caller tags the kind; the engine re-checks that the
//! kind fits the current phase before looking at the positions.

use serde::{Deserialize, Serialize};

use super::player::PlayerId;
use crate::board::Position;

/// The three action kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum ActionKind {
    /// Put a stone from hand on the board.
    #[display("place")]
    Place,
    /// Move a stone already on the board.
    #[display("move")]
    Move,
    /// Capture an opponent stone after forming a mill.
    #[display("remove")]
    Remove,
}

/// A complete game action.
///
/// ## Example
///
/// ```
/// use morris_engine::board::Position;
/// use morris_engine::core::{Action, ActionKind};
///
/// let a = Position::new(0).unwrap();
/// let b = Position::new(1).unwrap();
///
/// assert_eq!(Action::place(a).kind(), ActionKind::Place);
/// assert_eq!(Action::move_stone(a, b).kind(), ActionKind::Move);
/// assert_eq!(Action::remove(b).kind(), ActionKind::Remove);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Action {
    /// Place a stone from hand.
    Place { position: Position },
    /// Move (or fly) a stone.
    Move { from: Position, to: Position },
    /// Remove an opponent stone.
    Remove { position: Position },
}

impl Action {
    /// Create a place action.
    #[must_use]
    pub const fn place(position: Position) -> Self {
        Action::Place { position }
    }

    /// Create a move action.
    #[must_use]
    pub const fn move_stone(from: Position, to: Position) -> Self {
        Action::Move { from, to }
    }

    /// Create a remove action.
    #[must_use]
    pub const fn remove(position: Position) -> Self {
        Action::Remove { position }
    }

    /// Get the action's kind.
    #[must_use]
    pub const fn kind(&self) -> ActionKind {
        match self {
            Action::Place { .. } => ActionKind::Place,
            Action::Move { .. } => ActionKind::Move,
            Action::Remove { .. } => ActionKind::Remove,
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Place { position } => write!(f, "place {}", position),
            Action::Move { from, to } => write!(f, "move {} -> {}", from, to),
            Action::Remove { position } => write!(f, "remove {}", position),
        }
    }
}

/// A recorded action with metadata for history tracking.
///
/// Used for:
/// - Replay/debugging
/// - Draw detection by callers that want their own rules
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The player who took this action.
    pub player: PlayerId,

    /// The action taken.
    pub action: Action,

    /// Turn number when action was taken.
    pub turn: u32,

    /// Sequence number within the turn (a removal follows its mill-forming
    /// action in the same turn).
    pub sequence: u32,
}

impl ActionRecord {
    /// Create a new action record.
    #[must_use]
    pub fn new(player: PlayerId, action: Action, turn: u32, sequence: u32) -> Self {
        Self {
            player,
            action,
            turn,
            sequence,
        }
    }
}
