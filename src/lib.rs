//! Rush Hour sliding-block puzzle solver.
//!
//! The crate models a rectangular board of straight-line vehicles, one of
//! which must reach an exit cell at the border, and searches the state
//! space with uniform-cost, greedy best-first or A* search. Heuristics are
//! injected per run; "no solution" is a normal empty-path result.

pub mod board;
pub mod config;
pub mod heuristics;
pub mod moves;
pub mod search;

// Re-export main types
pub use board::{
    BoardError, BoardState, Direction, Grid, Orientation, Position, Vehicle, VehicleId,
};
pub use config::{PuzzleConfig, VehicleSpec};
pub use heuristics::Heuristic;
pub use moves::{Move, Successor};
pub use search::{solve, PathStep, Solution, Strategy};
