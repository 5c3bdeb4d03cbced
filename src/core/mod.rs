//! Core engine types: players, actions, configuration, errors, state.
//!
//! This module holds the shared vocabulary of the engine. It has no rule
//! knowledge; the referee lives in `rules`.

pub mod action;
pub mod config;
pub mod error;
pub mod player;
pub mod state;

pub use action::{Action, ActionKind, ActionRecord};
pub use config::{GameConfig, PlayerConfig};
pub use error::{BoardError, EngineError, MoveRejection, RemovalRejection};
pub use player::{
    Player, PlayerId, PlayerKind, PlayerMap, FLYING_THRESHOLD, MIN_STONES_ON_BOARD,
    STONES_PER_PLAYER,
};
pub use state::{ActionOutcome, GamePhase, GameResult, GameSnapshot};
