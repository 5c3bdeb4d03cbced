//! Board manager: mechanical occupancy over the fixed topology.
//!
//! The `BoardManager` knows which player (if any) holds each point and
//! performs the three primitive mutations (place, remove, move). It only
//! validates positionally: a place needs an empty point, a remove needs an
//! occupied one. Adjacency, turn order and mills are rule concerns and are
//! checked by the engine before these primitives are called.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::trace;

use super::topology::{neighbors, Position, POSITION_COUNT};
use crate::core::error::BoardError;
use crate::core::player::PlayerId;

/// Content of a single point.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Occupant {
    /// No stone.
    #[default]
    Empty,
    /// A stone owned by a player.
    Stone(PlayerId),
}

impl Occupant {
    /// Get the owning player, if any.
    #[must_use]
    pub fn player(self) -> Option<PlayerId> {
        match self {
            Occupant::Empty => None,
            Occupant::Stone(player) => Some(player),
        }
    }

    /// Check if the point is empty.
    #[must_use]
    pub fn is_empty(self) -> bool {
        matches!(self, Occupant::Empty)
    }
}

/// Occupancy of all 24 points.
///
/// ## Usage
///
/// ```
/// use morris_engine::board::{BoardManager, Occupant, Position};
/// use morris_engine::core::PlayerId;
///
/// let mut board = BoardManager::new();
/// let a = Position::new(0).unwrap();
/// let b = Position::new(1).unwrap();
///
/// board.place(a, PlayerId::FIRST).unwrap();
/// board.move_stone(a, b).unwrap();
///
/// assert!(board.is_empty(a));
/// assert_eq!(board.occupant_at(b), Occupant::Stone(PlayerId::FIRST));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardManager {
    cells: [Occupant; POSITION_COUNT],
}

impl BoardManager {
    /// Create an empty board.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // === Queries ===

    /// Get the content of a point.
    #[must_use]
    pub fn occupant_at(&self, position: Position) -> Occupant {
        self.cells[position.index()]
    }

    /// Check if a point is empty.
    #[must_use]
    pub fn is_empty(&self, position: Position) -> bool {
        self.occupant_at(position).is_empty()
    }

    /// Check if a point holds one of `player`'s stones.
    #[must_use]
    pub fn is_owned_by(&self, position: Position, player: PlayerId) -> bool {
        self.occupant_at(position) == Occupant::Stone(player)
    }

    /// Count `player`'s stones on the board.
    #[must_use]
    pub fn count_on_board(&self, player: PlayerId) -> usize {
        self.positions_of(player).count()
    }

    /// Count all occupied points.
    #[must_use]
    pub fn count_occupied(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_empty()).count()
    }

    /// Iterate over the points holding `player`'s stones.
    pub fn positions_of(&self, player: PlayerId) -> impl Iterator<Item = Position> + '_ {
        Position::all().filter(move |&p| self.is_owned_by(p, player))
    }

    /// Iterate over all empty points.
    pub fn empty_positions(&self) -> impl Iterator<Item = Position> + '_ {
        Position::all().filter(move |&p| self.is_empty(p))
    }

    /// Empty points adjacent to `position`.
    #[must_use]
    pub fn empty_neighbors(&self, position: Position) -> SmallVec<[Position; 4]> {
        neighbors(position)
            .iter()
            .copied()
            .filter(|&n| self.is_empty(n))
            .collect()
    }

    /// Raw view of all points in index order.
    #[must_use]
    pub fn cells(&self) -> &[Occupant; POSITION_COUNT] {
        &self.cells
    }

    // === Mutation ===

    /// Put a stone for `player` on an empty point.
    pub fn place(&mut self, position: Position, player: PlayerId) -> Result<(), BoardError> {
        if !self.is_empty(position) {
            return Err(BoardError::Occupied { position });
        }

        self.cells[position.index()] = Occupant::Stone(player);
        trace!(%position, %player, "stone placed");
        Ok(())
    }

    /// Clear an occupied point.
    ///
    /// Returns the owner of the removed stone.
    pub fn remove(&mut self, position: Position) -> Result<PlayerId, BoardError> {
        let owner = self
            .occupant_at(position)
            .player()
            .ok_or(BoardError::Empty { position })?;

        self.cells[position.index()] = Occupant::Empty;
        trace!(%position, player = %owner, "stone removed");
        Ok(owner)
    }

    /// Move a stone from `from` to `to` without any adjacency check.
    ///
    /// Both points are validated before either is written.
    /// Returns the owner of the moved stone.
    pub fn move_stone(&mut self, from: Position, to: Position) -> Result<PlayerId, BoardError> {
        let owner = self
            .occupant_at(from)
            .player()
            .ok_or(BoardError::Empty { position: from })?;

        if !self.is_empty(to) {
            return Err(BoardError::Occupied { position: to });
        }

        self.cells[from.index()] = Occupant::Empty;
        self.cells[to.index()] = Occupant::Stone(owner);
        trace!(%from, %to, player = %owner, "stone moved");
        Ok(owner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(i: u8) -> Position {
        Position::new(i).unwrap()
    }

    #[test]
    fn test_new_board_is_empty() {
        let board = BoardManager::new();

        assert_eq!(board.count_occupied(), 0);
        assert_eq!(board.empty_positions().count(), POSITION_COUNT);
        assert_eq!(board.count_on_board(PlayerId::FIRST), 0);
    }

    #[test]
    fn test_place() {
        let mut board = BoardManager::new();

        board.place(pos(5), PlayerId::FIRST).unwrap();
        assert_eq!(board.occupant_at(pos(5)), Occupant::Stone(PlayerId::FIRST));
        assert_eq!(board.count_on_board(PlayerId::FIRST), 1);
        assert_eq!(board.count_on_board(PlayerId::SECOND), 0);
    }

    #[test]
    fn test_place_on_occupied_fails() {
        let mut board = BoardManager::new();
        board.place(pos(5), PlayerId::FIRST).unwrap();

        let before = board.clone();
        assert_eq!(
            board.place(pos(5), PlayerId::SECOND),
            Err(BoardError::Occupied { position: pos(5) })
        );
        assert_eq!(board, before);
    }

    #[test]
    fn test_remove() {
        let mut board = BoardManager::new();
        board.place(pos(7), PlayerId::SECOND).unwrap();

        assert_eq!(board.remove(pos(7)), Ok(PlayerId::SECOND));
        assert!(board.is_empty(pos(7)));
        assert_eq!(board.remove(pos(7)), Err(BoardError::Empty { position: pos(7) }));
    }

    #[test]
    fn test_move_ignores_adjacency() {
        let mut board = BoardManager::new();
        board.place(pos(0), PlayerId::FIRST).unwrap();

        // 0 and 23 are opposite corners.
        assert_eq!(board.move_stone(pos(0), pos(23)), Ok(PlayerId::FIRST));
        assert!(board.is_empty(pos(0)));
        assert!(board.is_owned_by(pos(23), PlayerId::FIRST));
    }

    #[test]
    fn test_move_failures_leave_board_unchanged() {
        let mut board = BoardManager::new();
        board.place(pos(0), PlayerId::FIRST).unwrap();
        board.place(pos(1), PlayerId::SECOND).unwrap();
        let before = board.clone();

        assert_eq!(board.move_stone(pos(2), pos(3)), Err(BoardError::Empty { position: pos(2) }));
        assert_eq!(
            board.move_stone(pos(0), pos(1)),
            Err(BoardError::Occupied { position: pos(1) })
        );
        assert_eq!(board, before);
    }

    #[test]
    fn test_empty_neighbors() {
        let mut board = BoardManager::new();
        board.place(pos(1), PlayerId::FIRST).unwrap();
        board.place(pos(4), PlayerId::SECOND).unwrap();

        let empty = board.empty_neighbors(pos(1));
        assert_eq!(empty.as_slice(), &[pos(0), pos(2)]);

        let empty = board.empty_neighbors(pos(4));
        assert_eq!(empty.as_slice(), &[pos(3), pos(5), pos(7)]);
    }

    #[test]
    fn test_positions_of() {
        let mut board = BoardManager::new();
        for i in [3, 9, 20] {
            board.place(pos(i), PlayerId::SECOND).unwrap();
        }
        board.place(pos(10), PlayerId::FIRST).unwrap();

        let owned: Vec<_> = board.positions_of(PlayerId::SECOND).collect();
        assert_eq!(owned, vec![pos(3), pos(9), pos(20)]);
        assert_eq!(board.count_occupied(), 4);
    }

    #[test]
    fn test_board_serialization() {
        let mut board = BoardManager::new();
        board.place(pos(12), PlayerId::FIRST).unwrap();

        let json = serde_json::to_string(&board).unwrap();
        let back: BoardManager = serde_json::from_str(&json).unwrap();
        assert_eq!(board, back);
    }
}
