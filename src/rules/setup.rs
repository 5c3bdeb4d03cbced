//! Custom starting positions.
//!
//! A `Setup` describes a legal mid-game position: which stones are where,
//! how many each player still holds, and who moves next. The engine starts
//! from it exactly as if the game had reached it through play.

use tracing::instrument;

use crate::board::{BoardManager, Position};
use crate::core::config::GameConfig;
use crate::core::error::{BoardError, EngineError};
use crate::core::player::{Player, PlayerId, PlayerMap};

/// A starting position for a game.
///
/// ## Example
///
/// ```
/// use morris_engine::board::Position;
/// use morris_engine::core::PlayerId;
/// use morris_engine::rules::Setup;
///
/// let at = |i| Position::new(i).unwrap();
///
/// // Moving phase, three stones each, second player to move.
/// let setup = Setup::new(PlayerId::SECOND)
///     .with_stones(PlayerId::FIRST, [at(0), at(1), at(9)])
///     .with_stones(PlayerId::SECOND, [at(21), at(22), at(16)]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Setup {
    stones: Vec<(Position, PlayerId)>,
    in_hand: PlayerMap<u8>,
    to_move: PlayerId,
}

impl Setup {
    /// Empty board, empty hands, `to_move` to act.
    #[must_use]
    pub fn new(to_move: PlayerId) -> Self {
        Self {
            stones: Vec::new(),
            in_hand: PlayerMap::with_value(0),
            to_move,
        }
    }

    /// Add stones for `player`.
    #[must_use]
    pub fn with_stones(
        mut self,
        player: PlayerId,
        positions: impl IntoIterator<Item = Position>,
    ) -> Self {
        self.stones
            .extend(positions.into_iter().map(|position| (position, player)));
        self
    }

    /// Set how many stones `player` still has in hand.
    #[must_use]
    pub fn with_in_hand(mut self, player: PlayerId, count: u8) -> Self {
        self.in_hand[player] = count;
        self
    }

    /// Player to act first.
    #[must_use]
    pub fn to_move(&self) -> PlayerId {
        self.to_move
    }

    /// Build the board and players, validating the position.
    #[instrument(level = "debug", skip(config))]
    pub(crate) fn realize(
        &self,
        config: &GameConfig,
    ) -> Result<(BoardManager, PlayerMap<Player>), EngineError> {
        let mut board = BoardManager::new();
        for &(position, player) in &self.stones {
            board.place(position, player).map_err(|err| match err {
                BoardError::Occupied { position } | BoardError::Empty { position } => {
                    EngineError::setup(format!("position {} is listed twice", position))
                }
            })?;
        }

        let mut players = PlayerMap::new(|p| config.players[p].to_player());
        for (player, seat) in players.iter_mut() {
            let on_board = board.count_on_board(player) as u8;
            *seat = seat.clone().with_counts(self.in_hand[player], on_board)?;
        }

        let mover = self.in_hand[self.to_move];
        let other = self.in_hand[self.to_move.opponent()];
        let placing = mover > 0 || other > 0;
        if placing && !(mover == other || mover == other + 1) {
            return Err(EngineError::setup(format!(
                "{} to move with {} in hand against {}; placements must alternate",
                self.to_move, mover, other
            )));
        }

        Ok((board, players))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(i: u8) -> Position {
        Position::new(i).unwrap()
    }

    #[test]
    fn test_realize_counts() {
        let setup = Setup::new(PlayerId::FIRST)
            .with_stones(PlayerId::FIRST, [pos(0), pos(1)])
            .with_stones(PlayerId::SECOND, [pos(5)])
            .with_in_hand(PlayerId::FIRST, 4)
            .with_in_hand(PlayerId::SECOND, 4);

        let (board, players) = setup.realize(&GameConfig::default()).unwrap();

        assert_eq!(board.count_occupied(), 3);
        assert_eq!(players[PlayerId::FIRST].stones_on_board(), 2);
        assert_eq!(players[PlayerId::FIRST].stones_lost(), 3);
        assert_eq!(players[PlayerId::SECOND].stones_on_board(), 1);
        assert_eq!(players[PlayerId::SECOND].stones_lost(), 4);
    }

    #[test]
    fn test_duplicate_position_rejected() {
        let setup = Setup::new(PlayerId::FIRST)
            .with_stones(PlayerId::FIRST, [pos(3)])
            .with_stones(PlayerId::SECOND, [pos(3)]);

        assert!(matches!(
            setup.realize(&GameConfig::default()),
            Err(EngineError::InvalidSetup { .. })
        ));
    }

    #[test]
    fn test_too_many_stones_rejected() {
        let setup = Setup::new(PlayerId::FIRST)
            .with_stones(PlayerId::FIRST, (0..5).map(pos))
            .with_in_hand(PlayerId::FIRST, 5)
            .with_in_hand(PlayerId::SECOND, 5);

        assert!(matches!(
            setup.realize(&GameConfig::default()),
            Err(EngineError::InvalidSetup { .. })
        ));
    }

    #[test]
    fn test_hands_must_alternate() {
        let setup = Setup::new(PlayerId::FIRST)
            .with_in_hand(PlayerId::FIRST, 2)
            .with_in_hand(PlayerId::SECOND, 0);

        assert!(matches!(
            setup.realize(&GameConfig::default()),
            Err(EngineError::InvalidSetup { .. })
        ));

        let setup = Setup::new(PlayerId::SECOND)
            .with_in_hand(PlayerId::FIRST, 3)
            .with_in_hand(PlayerId::SECOND, 4);
        assert!(setup.realize(&GameConfig::default()).is_ok());
    }
}
