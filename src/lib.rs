//! Lights Out puzzle engine.
//!
//! This crate provides an immutable board value type and an exhaustive
//! breadth-first solver that returns a provably shortest move sequence
//! reaching the all-off state, or reports that none exists. Board
//! generation and terminal play live in the CLI binary.

pub mod board;
pub mod solver;

// Re-export main types
pub use board::{Board, BoardError, BoardKey, Move};
pub use solver::{
    solve, solve_with_config, verify_solution, SolutionPath, SolveReport, SolverConfig,
};
