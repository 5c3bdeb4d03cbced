//! Fixed board topology: positions, adjacency and mill lines.
//!
//! The board is the classical 24-point graph of three concentric squares
//! joined at their midpoints. Positions are numbered ring by ring:
//!
//! ```text
//! 0 ----------- 1 ----------- 2
//! |             |             |
//! |   3 ------- 4 ------- 5   |
//! |   |         |         |   |
//! |   |   6 --- 7 --- 8   |   |
//! |   |   |           |   |   |
//! 9 - 10- 11          12- 13- 14
//! |   |   |           |   |   |
//! |   |   15--- 16--- 17  |   |
//! |   |         |         |   |
//! |   18 ------ 19 ------ 20  |
//! |             |             |
//! 21 ---------- 22 ---------- 23
//! ```
//!
//! All tables are `const` and shared by every game in the process.

use serde::{Deserialize, Serialize};

use crate::core::error::EngineError;

/// Number of points on the board.
pub const POSITION_COUNT: usize = 24;

/// Number of mill lines on the board.
pub const MILL_COUNT: usize = 16;

/// A point on the board, always in `0..24`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Position(u8);

impl Position {
    /// Create a position, returning `None` if `index` is off the board.
    ///
    /// ```
    /// use morris_engine::board::Position;
    ///
    /// assert!(Position::new(23).is_some());
    /// assert!(Position::new(24).is_none());
    /// ```
    #[must_use]
    pub const fn new(index: u8) -> Option<Self> {
        if (index as usize) < POSITION_COUNT {
            Some(Self(index))
        } else {
            None
        }
    }

    /// Only for indices already known to be on the board.
    const fn at(index: u8) -> Self {
        Self(index)
    }

    /// Get the raw index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all 24 positions in index order.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..POSITION_COUNT as u8).map(Position)
    }

    /// Positions adjacent to this one (2 to 4 of them).
    #[must_use]
    pub fn neighbors(self) -> &'static [Position] {
        neighbors(self)
    }

    /// Check whether `other` is adjacent to this position.
    #[must_use]
    pub fn is_adjacent(self, other: Position) -> bool {
        neighbors(self).contains(&other)
    }

    /// The two mill lines through this position.
    #[must_use]
    pub fn mills(self) -> [MillLine; 2] {
        mills_containing(self)
    }
}

impl TryFrom<u8> for Position {
    type Error = EngineError;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Position::new(index).ok_or(EngineError::InvalidPosition { index })
    }
}

impl From<Position> for u8 {
    fn from(position: Position) -> Self {
        position.0
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One of the 16 straight lines of three points.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct MillLine(u8);

impl MillLine {
    /// Get the line's index into `all_mill_lines()`.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The three positions on this line.
    #[must_use]
    pub const fn positions(self) -> [Position; 3] {
        MILL_LINES[self.0 as usize]
    }

    /// Check whether this line passes through `position`.
    #[must_use]
    pub fn contains(self, position: Position) -> bool {
        self.positions().contains(&position)
    }
}

const fn p(index: u8) -> Position {
    Position::at(index)
}

const MILL_LINES: [[Position; 3]; MILL_COUNT] = [
    // Horizontal
    [p(0), p(1), p(2)],
    [p(3), p(4), p(5)],
    [p(6), p(7), p(8)],
    [p(9), p(10), p(11)],
    [p(12), p(13), p(14)],
    [p(15), p(16), p(17)],
    [p(18), p(19), p(20)],
    [p(21), p(22), p(23)],
    // Vertical
    [p(0), p(9), p(21)],
    [p(3), p(10), p(18)],
    [p(6), p(11), p(15)],
    [p(1), p(4), p(7)],
    [p(16), p(19), p(22)],
    [p(8), p(12), p(17)],
    [p(5), p(13), p(20)],
    [p(2), p(14), p(23)],
];

const ADJACENCY: [&[Position]; POSITION_COUNT] = [
    &[p(1), p(9)],
    &[p(0), p(2), p(4)],
    &[p(1), p(14)],
    &[p(4), p(10)],
    &[p(1), p(3), p(5), p(7)],
    &[p(4), p(13)],
    &[p(7), p(11)],
    &[p(4), p(6), p(8)],
    &[p(7), p(12)],
    &[p(0), p(10), p(21)],
    &[p(3), p(9), p(11), p(18)],
    &[p(6), p(10), p(15)],
    &[p(8), p(13), p(17)],
    &[p(5), p(12), p(14), p(20)],
    &[p(2), p(13), p(23)],
    &[p(11), p(16)],
    &[p(15), p(17), p(19)],
    &[p(12), p(16)],
    &[p(10), p(19)],
    &[p(16), p(18), p(20), p(22)],
    &[p(13), p(19)],
    &[p(9), p(22)],
    &[p(19), p(21), p(23)],
    &[p(14), p(22)],
];

/// Per-position mill index, built at compile time.
///
/// Indexing panics during const evaluation if any position sits on more
/// than two lines, and the final loop rejects positions on fewer.
const MILLS_BY_POSITION: [[MillLine; 2]; POSITION_COUNT] = {
    let mut index = [[MillLine(0); 2]; POSITION_COUNT];
    let mut filled = [0usize; POSITION_COUNT];

    let mut line = 0;
    while line < MILL_COUNT {
        let mut k = 0;
        while k < 3 {
            let pos = MILL_LINES[line][k].0 as usize;
            index[pos][filled[pos]] = MillLine(line as u8);
            filled[pos] += 1;
            k += 1;
        }
        line += 1;
    }

    let mut pos = 0;
    while pos < POSITION_COUNT {
        assert!(filled[pos] == 2, "every position must lie on exactly two mill lines");
        pos += 1;
    }

    index
};

/// Fixed adjacency set for `position`.
#[must_use]
pub fn neighbors(position: Position) -> &'static [Position] {
    ADJACENCY[position.index()]
}

/// The two mill lines passing through `position`.
#[must_use]
pub fn mills_containing(position: Position) -> [MillLine; 2] {
    MILLS_BY_POSITION[position.index()]
}

/// All 16 mill lines in a fixed order.
pub fn all_mill_lines() -> impl Iterator<Item = MillLine> {
    (0..MILL_COUNT as u8).map(MillLine)
}
