//! Game configuration types.
//!
//! Callers configure a game at startup by providing:
//! - `PlayerConfig`: name, rendering symbol and kind of each seat
//! - `GameConfig`: both seats plus who moves first
//!
//! The board itself is not configurable.

use serde::{Deserialize, Serialize};

use super::error::EngineError;
use super::player::{Player, PlayerId, PlayerKind, PlayerMap};

/// Configuration for a single seat.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// Display name.
    pub name: String,

    /// Rendering token. Must differ between the two seats.
    pub symbol: char,

    /// Human or AI.
    pub kind: PlayerKind,
}

impl PlayerConfig {
    /// Create a human seat.
    pub fn new(name: impl Into<String>, symbol: char) -> Self {
        Self {
            name: name.into(),
            symbol,
            kind: PlayerKind::Human,
        }
    }

    /// Set the player kind.
    #[must_use]
    pub fn with_kind(mut self, kind: PlayerKind) -> Self {
        self.kind = kind;
        self
    }

    /// Build the player with a full hand.
    #[must_use]
    pub fn to_player(&self) -> Player {
        Player::new(self.name.clone(), self.symbol, self.kind)
    }
}

/// Complete game configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Seats, indexed by `PlayerId`.
    pub players: PlayerMap<PlayerConfig>,

    /// Who makes the first placement.
    pub first_player: PlayerId,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            players: PlayerMap::from_array([
                PlayerConfig::new("Player 1", 'X'),
                PlayerConfig::new("Player 2", 'O'),
            ]),
            first_player: PlayerId::FIRST,
        }
    }
}

impl GameConfig {
    /// Set a seat's name.
    #[must_use]
    pub fn with_name(mut self, player: PlayerId, name: impl Into<String>) -> Self {
        self.players[player].name = name.into();
        self
    }

    /// Set a seat's symbol.
    #[must_use]
    pub fn with_symbol(mut self, player: PlayerId, symbol: char) -> Self {
        self.players[player].symbol = symbol;
        self
    }

    /// Set a seat's kind.
    #[must_use]
    pub fn with_kind(mut self, player: PlayerId, kind: PlayerKind) -> Self {
        self.players[player].kind = kind;
        self
    }

    /// Set who moves first.
    #[must_use]
    pub fn with_first_player(mut self, player: PlayerId) -> Self {
        self.first_player = player;
        self
    }

    /// Check the configuration is usable.
    pub fn validate(&self) -> Result<(), EngineError> {
        for (player, seat) in self.players.iter() {
            if seat.name.trim().is_empty() {
                return Err(EngineError::config(format!("{} has an empty name", player)));
            }
            if seat.symbol.is_whitespace() {
                return Err(EngineError::config(format!("{} has a blank symbol", player)));
            }
        }

        let first = &self.players[PlayerId::FIRST];
        let second = &self.players[PlayerId::SECOND];
        if first.symbol == second.symbol {
            return Err(EngineError::config(format!(
                "both players use the symbol '{}'",
                first.symbol
            )));
        }

        Ok(())
    }
}
