//! Player identification, per-player storage and stone counters.
//!
//! ## PlayerId
//!
//! Type-safe identifier for one of the two seats.
//!
//! ## PlayerMap
//!
//! Per-player data storage backed by a two-element array, indexed by
//! `PlayerId`.
//!
//! ## Player
//!
//! Identity (name, symbol, kind) plus the stone counters the engine
//! mutates. Counter helpers never let a count go negative.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

use super::error::EngineError;

/// Stones each player starts with in hand.
pub const STONES_PER_PLAYER: u8 = 9;

/// A player with exactly this many stones on the board may fly.
pub const FLYING_THRESHOLD: u8 = 3;

/// Below this many stones on the board (after placing) a player is eliminated.
pub const MIN_STONES_ON_BOARD: u8 = 3;

/// Player identifier: one of exactly two seats.
///
/// Player indices are 0-based: the first player is `PlayerId::FIRST`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct PlayerId(u8);

impl PlayerId {
    /// The first seat (moves first by default).
    pub const FIRST: PlayerId = PlayerId(0);

    /// The second seat.
    pub const SECOND: PlayerId = PlayerId(1);

    /// Create a player ID from a 0-based index, `None` unless 0 or 1.
    #[must_use]
    pub const fn new(index: u8) -> Option<Self> {
        match index {
            0 | 1 => Some(Self(index)),
            _ => None,
        }
    }

    /// Get the raw player index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The other seat.
    #[must_use]
    pub const fn opponent(self) -> Self {
        Self(1 - self.0)
    }

    /// Iterate over both player IDs.
    ///
    /// ```
    /// use morris_engine::core::PlayerId;
    ///
    /// let players: Vec<_> = PlayerId::both().collect();
    /// assert_eq!(players, vec![PlayerId::FIRST, PlayerId::SECOND]);
    /// ```
    pub fn both() -> impl Iterator<Item = PlayerId> {
        [PlayerId::FIRST, PlayerId::SECOND].into_iter()
    }
}

impl TryFrom<u8> for PlayerId {
    type Error = EngineError;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        PlayerId::new(index)
            .ok_or_else(|| EngineError::config(format!("no player with index {}", index)))
    }
}

impl From<PlayerId> for u8 {
    fn from(player: PlayerId) -> Self {
        player.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0 + 1)
    }
}

/// Per-player data storage with O(1) access.
///
/// ## Example
///
/// ```
/// use morris_engine::core::{PlayerId, PlayerMap};
///
/// let mut captured: PlayerMap<u8> = PlayerMap::with_value(0);
/// captured[PlayerId::SECOND] += 1;
///
/// assert_eq!(captured[PlayerId::FIRST], 0);
/// assert_eq!(captured[PlayerId::SECOND], 1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: [T; 2],
}

impl<T> PlayerMap<T> {
    /// Create a new PlayerMap with values from a factory function.
    pub fn new(factory: impl Fn(PlayerId) -> T) -> Self {
        Self {
            data: [factory(PlayerId::FIRST), factory(PlayerId::SECOND)],
        }
    }

    /// Create a new PlayerMap with both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(|_| value.clone())
    }

    /// Create from an array ordered by player index.
    pub fn from_array(data: [T; 2]) -> Self {
        Self { data }
    }

    /// Get a reference to a player's data.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.data[player.index()]
    }

    /// Get a mutable reference to a player's data.
    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        PlayerId::both().zip(self.data.iter())
    }

    /// Iterate over (PlayerId, &mut T) pairs.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PlayerId, &mut T)> {
        PlayerId::both().zip(self.data.iter_mut())
    }

    /// Iterate over the stored values in player order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }
}

impl<T: Default> Default for PlayerMap<T> {
    fn default() -> Self {
        Self::new(|_| T::default())
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        self.get_mut(player)
    }
}

/// Who supplies a player's actions.
///
/// The engine treats both kinds identically; the tag is for the caller.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerKind {
    /// Actions come from a person.
    #[default]
    Human,
    /// Actions come from an external program.
    Ai,
}

/// A seated player: identity and stone counters.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Player {
    /// Display name.
    pub name: String,

    /// Token used when rendering this player's stones.
    pub symbol: char,

    /// Human or AI.
    pub kind: PlayerKind,

    stones_in_hand: u8,
    stones_on_board: u8,
    stones_lost: u8,
}

impl Player {
    /// Create a player with a full hand and no stones on the board.
    #[must_use]
    pub fn new(name: impl Into<String>, symbol: char, kind: PlayerKind) -> Self {
        Self {
            name: name.into(),
            symbol,
            kind,
            stones_in_hand: STONES_PER_PLAYER,
            stones_on_board: 0,
            stones_lost: 0,
        }
    }

    /// Override counters (used when starting from a custom setup).
    pub(crate) fn with_counts(mut self, in_hand: u8, on_board: u8) -> Result<Self, EngineError> {
        let lost = STONES_PER_PLAYER
            .checked_sub(in_hand)
            .and_then(|rest| rest.checked_sub(on_board))
            .ok_or_else(|| {
                EngineError::setup(format!(
                    "{} has {} in hand and {} on board, more than {}",
                    self.name, in_hand, on_board, STONES_PER_PLAYER
                ))
            })?;

        self.stones_in_hand = in_hand;
        self.stones_on_board = on_board;
        self.stones_lost = lost;
        Ok(self)
    }

    /// Stones not yet placed.
    #[must_use]
    pub fn stones_in_hand(&self) -> u8 {
        self.stones_in_hand
    }

    /// Stones currently on the board.
    #[must_use]
    pub fn stones_on_board(&self) -> u8 {
        self.stones_on_board
    }

    /// Stones captured by the opponent. They never come back.
    #[must_use]
    pub fn stones_lost(&self) -> u8 {
        self.stones_lost
    }

    /// Check whether this player may fly (move to any empty point).
    #[must_use]
    pub fn can_fly(&self) -> bool {
        self.stones_in_hand == 0 && self.stones_on_board == FLYING_THRESHOLD
    }

    /// Check whether this player is out of the game.
    ///
    /// Only meaningful once the placing phase is over.
    #[must_use]
    pub fn is_eliminated(&self) -> bool {
        self.stones_in_hand == 0 && self.stones_on_board < MIN_STONES_ON_BOARD
    }

    /// Take one stone out of hand.
    pub(crate) fn decrement_in_hand(&mut self) -> Result<(), EngineError> {
        self.stones_in_hand = self.stones_in_hand.checked_sub(1).ok_or_else(|| {
            EngineError::invariant(format!("{} has no stones in hand", self.name))
        })?;
        Ok(())
    }

    /// Record one more stone on the board.
    pub(crate) fn increment_on_board(&mut self) -> Result<(), EngineError> {
        if self.stones_in_hand + self.stones_on_board + self.stones_lost >= STONES_PER_PLAYER {
            return Err(EngineError::invariant(format!(
                "{} would exceed {} stones",
                self.name, STONES_PER_PLAYER
            )));
        }
        self.stones_on_board += 1;
        Ok(())
    }

    /// Record one of this player's stones being captured.
    pub(crate) fn decrement_on_board(&mut self) -> Result<(), EngineError> {
        self.stones_on_board = self.stones_on_board.checked_sub(1).ok_or_else(|| {
            EngineError::invariant(format!("{} has no stones on board", self.name))
        })?;
        self.stones_lost += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_id_basics() {
        assert_eq!(PlayerId::FIRST.index(), 0);
        assert_eq!(PlayerId::SECOND.index(), 1);
        assert_eq!(PlayerId::FIRST.opponent(), PlayerId::SECOND);
        assert_eq!(PlayerId::SECOND.opponent(), PlayerId::FIRST);
        assert_eq!(PlayerId::new(2), None);
        assert_eq!(format!("{}", PlayerId::FIRST), "Player 1");
    }

    #[test]
    fn test_player_map_new() {
        let map: PlayerMap<i32> = PlayerMap::new(|p| p.index() as i32 * 10);

        assert_eq!(map[PlayerId::FIRST], 0);
        assert_eq!(map[PlayerId::SECOND], 10);
    }

    #[test]
    fn test_player_map_mutation_and_iter() {
        let mut map: PlayerMap<i32> = PlayerMap::default();

        map[PlayerId::FIRST] = 10;
        *map.get_mut(PlayerId::SECOND) = 20;

        let pairs: Vec<_> = map.iter().collect();
        assert_eq!(pairs, vec![(PlayerId::FIRST, &10), (PlayerId::SECOND, &20)]);
    }

    #[test]
    fn test_player_starts_with_full_hand() {
        let player = Player::new("Ada", 'X', PlayerKind::Human);

        assert_eq!(player.stones_in_hand(), STONES_PER_PLAYER);
        assert_eq!(player.stones_on_board(), 0);
        assert_eq!(player.stones_lost(), 0);
        assert!(!player.can_fly());
        assert!(!player.is_eliminated());
    }

    #[test]
    fn test_counter_helpers() {
        let mut player = Player::new("Ada", 'X', PlayerKind::Human);

        player.decrement_in_hand().unwrap();
        player.increment_on_board().unwrap();
        assert_eq!(player.stones_in_hand(), 8);
        assert_eq!(player.stones_on_board(), 1);

        player.decrement_on_board().unwrap();
        assert_eq!(player.stones_on_board(), 0);
        assert_eq!(player.stones_lost(), 1);
    }

    #[test]
    fn test_counters_never_go_negative() {
        let mut player = Player::new("Ada", 'X', PlayerKind::Ai);

        assert!(matches!(
            player.decrement_on_board(),
            Err(EngineError::InvariantViolation { .. })
        ));
        // Full hand: one more stone on board would make ten.
        assert!(matches!(
            player.increment_on_board(),
            Err(EngineError::InvariantViolation { .. })
        ));

        let mut empty = player.clone().with_counts(0, 0).unwrap();
        assert!(matches!(
            empty.decrement_in_hand(),
            Err(EngineError::InvariantViolation { .. })
        ));
    }

    #[test]
    fn test_flying_and_elimination() {
        let player = Player::new("Ada", 'X', PlayerKind::Human);

        assert!(player.clone().with_counts(0, 3).unwrap().can_fly());
        assert!(!player.clone().with_counts(1, 3).unwrap().can_fly());
        assert!(!player.clone().with_counts(0, 4).unwrap().can_fly());

        assert!(player.clone().with_counts(0, 2).unwrap().is_eliminated());
        assert!(!player.clone().with_counts(3, 2).unwrap().is_eliminated());
    }

    #[test]
    fn test_with_counts_rejects_overflow() {
        let player = Player::new("Ada", 'X', PlayerKind::Human);

        assert!(matches!(
            player.with_counts(5, 5),
            Err(EngineError::InvalidSetup { .. })
        ));
    }

    #[test]
    fn test_player_serialization() {
        let player = Player::new("Bob", 'O', PlayerKind::Ai);
        let json = serde_json::to_string(&player).unwrap();
        let deserialized: Player = serde_json::from_str(&json).unwrap();
        assert_eq!(player, deserialized);
    }
}
