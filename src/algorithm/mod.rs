/// Fixed-size bitsets backing each cell's admissible-tile domain
pub mod bitset;
/// Solver driving observation, propagation, and restart recovery
pub mod executor;
/// Entropy-guided cell selection and weighted collapse
pub mod observation;
/// LIFO task queue and the arc-consistency propagation step
pub mod propagation;
