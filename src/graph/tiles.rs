//! Weighted tile sets
//!
//! A tile is identified by its index in the set; the weight is its relative
//! frequency during collapse. The set is fixed for the lifetime of a wave.

use crate::io::error::{Result, WaveError};
use crate::math::entropy::weight_log_weight;

/// Immutable set of tile weights shared by every cell in a wave
///
/// Caches the full-domain weight sums so that fresh cells (and resets) start
/// with consistent entropy inputs without re-deriving them per cell.
#[derive(Clone, Debug)]
pub struct TileSet {
    weights: Vec<f64>,
    sum_weights: f64,
    weight_log_weight_sum: f64,
}

impl TileSet {
    /// Create a tile set from relative weights
    ///
    /// Tile ids are the indices into the given slice.
    ///
    /// # Errors
    ///
    /// Returns [`WaveError::EmptyTileSet`] for an empty slice and
    /// [`WaveError::InvalidWeight`] for any weight that is not a positive
    /// finite number.
    pub fn new(weights: &[f64]) -> Result<Self> {
        if weights.is_empty() {
            return Err(WaveError::EmptyTileSet);
        }

        for (tile, &weight) in weights.iter().enumerate() {
            if !weight.is_finite() || weight <= 0.0 {
                return Err(WaveError::InvalidWeight { tile, weight });
            }
        }

        let sum_weights = weights.iter().sum();
        let weight_log_weight_sum = weights.iter().copied().map(weight_log_weight).sum();

        Ok(Self {
            weights: weights.to_vec(),
            sum_weights,
            weight_log_weight_sum,
        })
    }

    /// Create a tile set where every tile has weight 1
    ///
    /// # Errors
    ///
    /// Returns [`WaveError::EmptyTileSet`] when `tile_count` is zero.
    pub fn uniform(tile_count: usize) -> Result<Self> {
        Self::new(&vec![1.0; tile_count])
    }

    /// Number of tiles in the set
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Test whether the set contains no tiles
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Weight of a single tile, or 0 for an out-of-range id
    pub fn weight(&self, tile: usize) -> f64 {
        self.weights.get(tile).copied().unwrap_or(0.0)
    }

    /// Sum of all tile weights (full-domain `sumWeights`)
    pub const fn sum_weights(&self) -> f64 {
        self.sum_weights
    }

    /// Sum of `weight * ln(weight)` over all tiles (full-domain cache)
    pub const fn weight_log_weight_sum(&self) -> f64 {
        self.weight_log_weight_sum
    }
}

#[cfg(test)]
mod tests {
    use super::TileSet;
    use crate::io::error::WaveError;

    #[test]
    fn test_rejects_empty_set() {
        assert!(matches!(TileSet::new(&[]), Err(WaveError::EmptyTileSet)));
    }

    #[test]
    fn test_rejects_non_positive_weight() {
        let err = TileSet::new(&[1.0, 0.0]);
        assert!(matches!(
            err,
            Err(WaveError::InvalidWeight { tile: 1, .. })
        ));
        assert!(TileSet::new(&[-2.0]).is_err());
        assert!(TileSet::new(&[f64::NAN]).is_err());
        assert!(TileSet::new(&[f64::INFINITY]).is_err());
    }

    #[test]
    fn test_cached_sums() {
        let tiles = TileSet::new(&[2.0, 3.0]).unwrap();
        assert_eq!(tiles.len(), 2);
        assert!((tiles.sum_weights() - 5.0).abs() < 1e-12);
        let expected = 2.0 * 2.0_f64.ln() + 3.0 * 3.0_f64.ln();
        assert!((tiles.weight_log_weight_sum() - expected).abs() < 1e-12);
    }

    #[test]
    fn test_uniform_weights() {
        let tiles = TileSet::uniform(9).unwrap();
        assert_eq!(tiles.len(), 9);
        assert!((tiles.weight(4) - 1.0).abs() < 1e-12);
        assert!((tiles.sum_weights() - 9.0).abs() < 1e-12);
    }
}
