/// Demo command-line interface
pub mod cli;
/// Solver constants and configuration defaults
pub mod configuration;
/// Error types for construction and solving
pub mod error;
/// Progress display for demo runs
pub mod progress;
