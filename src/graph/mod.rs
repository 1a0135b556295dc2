/// Compatibility rule table indexed by relationship and tile pair
pub mod rules;
/// Weighted tile sets with cached entropy inputs
pub mod tiles;
/// The wave: cells, domains, and the shared neighbor arena
pub mod wave;
