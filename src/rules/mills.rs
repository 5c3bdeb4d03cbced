//! Mill detection and capture eligibility.
//!
//! Pure functions over a `BoardManager`. Nothing is cached: every answer is
//! computed from the occupancy at the time of the call.

use smallvec::SmallVec;
use tracing::instrument;

use crate::board::{mills_containing, BoardManager, MillLine, Position};
use crate::core::error::RemovalRejection;
use crate::core::player::PlayerId;

/// Mill lines through `position` whose three points all hold the stone
/// owner's color.
///
/// Empty for an empty point. After a place or a move onto `position`, any
/// line returned here was completed by that action, because `position`
/// was empty before it.
#[must_use]
pub fn completed_mills_through(
    board: &BoardManager,
    position: Position,
) -> SmallVec<[MillLine; 2]> {
    let Some(owner) = board.occupant_at(position).player() else {
        return SmallVec::new();
    };

    mills_containing(position)
        .into_iter()
        .filter(|line| line.positions().iter().all(|&p| board.is_owned_by(p, owner)))
        .collect()
}

/// Check whether the stone at `position` is part of a complete mill.
#[must_use]
pub fn is_in_mill(board: &BoardManager, position: Position) -> bool {
    !completed_mills_through(board, position).is_empty()
}

/// Check whether every stone `player` has on the board is in some mill.
///
/// Vacuously true for a player with no stones.
#[must_use]
pub fn all_stones_in_mills(board: &BoardManager, player: PlayerId) -> bool {
    board.positions_of(player).all(|p| is_in_mill(board, p))
}

/// Stones of `victim` that may be captured right now.
///
/// Stones outside mills if there are any, otherwise every stone.
#[instrument(level = "trace", skip(board))]
pub fn capturable_stones(board: &BoardManager, victim: PlayerId) -> Vec<Position> {
    let outside: Vec<Position> = board
        .positions_of(victim)
        .filter(|&p| !is_in_mill(board, p))
        .collect();

    if outside.is_empty() {
        board.positions_of(victim).collect()
    } else {
        outside
    }
}

/// Why `capturer` may not take the stone at `target`, or `None` if they may.
#[must_use]
pub fn removal_rejection(
    board: &BoardManager,
    capturer: PlayerId,
    target: Position,
) -> Option<RemovalRejection> {
    let victim = match board.occupant_at(target).player() {
        None => return Some(RemovalRejection::Empty),
        Some(owner) if owner == capturer => return Some(RemovalRejection::OwnStone),
        Some(owner) => owner,
    };

    if is_in_mill(board, target) && !all_stones_in_mills(board, victim) {
        return Some(RemovalRejection::ProtectedMill);
    }

    None
}
