//! # morris-engine
//!
//! A rules engine for Nine Men's Morris.
//!
//! ## Design Principles
//!
//! 1. **Referee, not player**: The engine validates and applies actions.
//!    It never chooses one. Humans, scripts and AIs all call the same API.
//!
//! 2. **All or nothing**: A rejected action leaves the game untouched and
//!    reports why through `EngineError`.
//!
//! 3. **Fixed topology**: The 24 points, their adjacency and the 16 mill
//!    lines are compile-time tables. Nothing about the board is configured.
//!
//! ## Architecture
//!
//! - **Phase state machine**: Placing, MovingOrFlying, RemovalPending and
//!   GameOver decide which action kind is accepted next.
//!
//! - **Cheap snapshots**: Action history lives in an `im::Vector`, so
//!   cloning a game to explore a line of play is inexpensive.
//!
//! - **Pluggable draws**: `DrawDetector` is consulted after every moving
//!   turn. The default never declares a draw.
//!
//! ## Modules
//!
//! - `core`: Players, actions, configuration, errors, snapshots
//! - `board`: Topology and the `BoardManager` occupancy store
//! - `rules`: The `Game` referee, mill logic, draw detectors, setups
//!
//! ## Example
//!
//! ```
//! use morris_engine::{new_game, Action, GamePhase, PlayerKind, Position};
//!
//! let mut game = new_game("Ada", "Grace", PlayerKind::Human).unwrap();
//! let at = |i| Position::new(i).unwrap();
//!
//! for i in [0, 9, 1, 10] {
//!     game.submit_action(Action::place(at(i))).unwrap();
//! }
//! let outcome = game.submit_action(Action::place(at(2))).unwrap();
//! assert!(outcome.mill_formed);
//! assert_eq!(game.phase(), GamePhase::RemovalPending);
//! ```

pub mod board;
pub mod core;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{
    Action, ActionKind, ActionOutcome, ActionRecord,
    EngineError, MoveRejection, RemovalRejection,
    GameConfig, PlayerConfig,
    GamePhase, GameResult, GameSnapshot,
    Player, PlayerId, PlayerKind, PlayerMap,
};

pub use crate::board::{BoardManager, MillLine, Occupant, Position};

pub use crate::rules::{
    new_game, Game, GameBuilder, Setup,
    DrawDetector, MoveLimit, NoDraw, Repetition, TurnSummary,
};
