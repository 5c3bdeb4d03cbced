//! Board model and board manager.
//!
//! The board is **fixed**: 24 points, a constant adjacency relation and 16
//! mill lines. Nothing here knows about turns, phases or captures.
//!
//! ## Key Types
//!
//! - `Position`: validated point index (0..24)
//! - `MillLine`: one of the 16 lines of three points
//! - `BoardManager`: occupancy and the place/remove/move primitives
//! - `Occupant`: content of a point

pub mod manager;
pub mod topology;

pub use manager::{BoardManager, Occupant};
pub use topology::{
    all_mill_lines, mills_containing, neighbors, MillLine, Position, MILL_COUNT, POSITION_COUNT,
};
