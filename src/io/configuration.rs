//! Solver constants and runtime configuration defaults

/// Amplitude of the random perturbation added to cell entropies
///
/// Large enough to break ties between symmetric cells, small enough never to
/// override a genuine entropy difference of one tile.
pub const ENTROPY_NOISE: f64 = 0.01;

// Default values for configurable parameters
/// Fixed seed for reproducible solving
pub const DEFAULT_SEED: u64 = 42;

/// Default restart budget before a run reports failure
pub const DEFAULT_MAX_RESETS: u64 = 1000;

// Demo grid dimensions
/// Default width of the coastline demo grid
pub const DEFAULT_DEMO_WIDTH: usize = 48;
/// Default height of the coastline demo grid
pub const DEFAULT_DEMO_HEIGHT: usize = 16;

/// Side length of the Sudoku demo grid
pub const SUDOKU_SIZE: usize = 9;
