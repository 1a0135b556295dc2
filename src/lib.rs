//! Wave function collapse over arbitrary adjacency graphs
//!
//! Cells are connected by caller-defined relationships rather than fixed grid
//! directions, so the same engine can solve textures, region constraints, and
//! Sudoku-style puzzles. Callers build a wave (cells, neighbors, rules), hand
//! it to a solver, and drive it one observation at a time or to completion.

#![forbid(unsafe_code)]

/// Core algorithm implementation including observation, propagation, and restart handling
pub mod algorithm;
/// Tile sets, rule tables, and the wave of cells with its adjacency arena
pub mod graph;
/// Error handling, configuration defaults, and the demo command line
pub mod io;
/// Mathematical utilities for entropy calculations
pub mod math;

pub use io::error::{Result, WaveError};
