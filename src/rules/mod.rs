//! The referee and the rules it enforces.
//!
//! - `engine`: `Game`, the phase state machine, and its builder
//! - `mills`: mill detection and capture eligibility
//! - `draw`: pluggable draw detection
//! - `setup`: custom starting positions
//!
//! Nothing outside `engine` mutates a game. The other modules are pure
//! queries over a `BoardManager` or inputs to `GameBuilder`.

pub mod draw;
pub mod engine;
pub mod mills;
pub mod setup;

pub use draw::{DrawDetector, MoveLimit, NoDraw, Repetition, TurnSummary};
pub use engine::{new_game, Game, GameBuilder};
pub use mills::{capturable_stones, completed_mills_through, is_in_mill};
pub use setup::Setup;
