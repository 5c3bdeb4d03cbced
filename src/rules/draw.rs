//! Pluggable draw detection.
//!
//! The base rules have no automatic draw. Games that want one pick a
//! detector when building the engine; the engine consults it once per
//! completed turn in the moving phase, after the move has passed to the
//! next player.
//!
//! ## Provided detectors
//!
//! - `NoDraw`: never draws (default)
//! - `MoveLimit`: draws after a number of consecutive turns without a capture
//! - `Repetition`: draws when the same position recurs a number of times

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::board::BoardManager;
use crate::core::player::PlayerId;

/// What a detector sees after each completed moving-phase turn.
#[derive(Clone, Copy, Debug)]
pub struct TurnSummary<'a> {
    /// Occupancy after the turn.
    pub board: &'a BoardManager,

    /// Player whose turn it now is.
    pub to_move: PlayerId,

    /// The turn ended with a capture.
    pub captured: bool,
}

/// Decides whether the game should be declared drawn.
pub trait DrawDetector {
    /// Observe a completed turn. Returns `true` if the game is now drawn.
    fn observe(&mut self, turn: &TurnSummary<'_>) -> bool;
}

/// Never declares a draw.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NoDraw;

impl DrawDetector for NoDraw {
    fn observe(&mut self, _turn: &TurnSummary<'_>) -> bool {
        false
    }
}

/// Draws after `limit` consecutive moving-phase turns with no capture.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveLimit {
    limit: u32,
    quiet_turns: u32,
}

impl MoveLimit {
    /// Create a detector that draws after `limit` quiet turns.
    ///
    /// A `limit` of zero is treated as one.
    #[must_use]
    pub fn new(limit: u32) -> Self {
        Self {
            limit: limit.max(1),
            quiet_turns: 0,
        }
    }

    /// Quiet turns counted so far.
    #[must_use]
    pub fn quiet_turns(&self) -> u32 {
        self.quiet_turns
    }
}

impl DrawDetector for MoveLimit {
    fn observe(&mut self, turn: &TurnSummary<'_>) -> bool {
        if turn.captured {
            self.quiet_turns = 0;
            return false;
        }

        self.quiet_turns += 1;
        if self.quiet_turns >= self.limit {
            debug!(limit = self.limit, "move limit reached");
            return true;
        }
        false
    }
}

/// Draws when the same board with the same player to move has been seen
/// `threshold` times.
///
/// A capture makes every earlier position unreachable, so the table is
/// cleared on captures.
#[derive(Clone, Debug)]
pub struct Repetition {
    threshold: u32,
    seen: FxHashMap<(BoardManager, PlayerId), u32>,
}

impl Repetition {
    /// Create a detector that draws on the `threshold`-th occurrence.
    ///
    /// A `threshold` below two is treated as two.
    #[must_use]
    pub fn new(threshold: u32) -> Self {
        Self {
            threshold: threshold.max(2),
            seen: FxHashMap::default(),
        }
    }

    /// Number of times this exact position has been observed.
    #[must_use]
    pub fn occurrences(&self, board: &BoardManager, to_move: PlayerId) -> u32 {
        self.seen
            .get(&(board.clone(), to_move))
            .copied()
            .unwrap_or(0)
    }
}

impl DrawDetector for Repetition {
    fn observe(&mut self, turn: &TurnSummary<'_>) -> bool {
        if turn.captured {
            self.seen.clear();
        }

        let count = self
            .seen
            .entry((turn.board.clone(), turn.to_move))
            .or_insert(0);
        *count += 1;

        if *count >= self.threshold {
            debug!(threshold = self.threshold, "position repeated");
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Position;

    fn summary(board: &BoardManager, to_move: PlayerId, captured: bool) -> TurnSummary<'_> {
        TurnSummary {
            board,
            to_move,
            captured,
        }
    }

    #[test]
    fn test_no_draw() {
        let board = BoardManager::new();
        let mut detector = NoDraw;
        for _ in 0..100 {
            assert!(!detector.observe(&summary(&board, PlayerId::FIRST, false)));
        }
    }

    #[test]
    fn test_move_limit() {
        let board = BoardManager::new();
        let mut detector = MoveLimit::new(3);

        assert!(!detector.observe(&summary(&board, PlayerId::SECOND, false)));
        assert!(!detector.observe(&summary(&board, PlayerId::FIRST, false)));
        assert_eq!(detector.quiet_turns(), 2);

        // A capture resets the count.
        assert!(!detector.observe(&summary(&board, PlayerId::SECOND, true)));
        assert_eq!(detector.quiet_turns(), 0);

        assert!(!detector.observe(&summary(&board, PlayerId::FIRST, false)));
        assert!(!detector.observe(&summary(&board, PlayerId::SECOND, false)));
        assert!(detector.observe(&summary(&board, PlayerId::FIRST, false)));
    }

    #[test]
    fn test_repetition_counts_side_to_move() {
        let mut board = BoardManager::new();
        board.place(Position::new(0).unwrap(), PlayerId::FIRST).unwrap();
        let mut detector = Repetition::new(3);

        assert!(!detector.observe(&summary(&board, PlayerId::FIRST, false)));
        assert!(!detector.observe(&summary(&board, PlayerId::SECOND, false)));
        assert!(!detector.observe(&summary(&board, PlayerId::FIRST, false)));
        assert_eq!(detector.occurrences(&board, PlayerId::FIRST), 2);
        assert_eq!(detector.occurrences(&board, PlayerId::SECOND), 1);

        assert!(detector.observe(&summary(&board, PlayerId::FIRST, false)));
    }

    #[test]
    fn test_repetition_cleared_by_capture() {
        let board = BoardManager::new();
        let mut detector = Repetition::new(2);

        assert!(!detector.observe(&summary(&board, PlayerId::FIRST, false)));
        assert!(!detector.observe(&summary(&board, PlayerId::FIRST, true)));
        assert_eq!(detector.occurrences(&board, PlayerId::FIRST), 1);
    }
}
