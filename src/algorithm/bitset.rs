use bitvec::prelude::{BitVec, bitvec};
use std::fmt;

/// Fixed-size bitset holding a cell's admissible tiles
///
/// Tile ids are 0-based indices into the wave's tile set. Provides O(1)
/// membership testing and removal; counting and iteration walk the words.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DomainBitset {
    bits: BitVec,
}

impl DomainBitset {
    /// Create a domain with every tile admissible
    pub fn full(tile_count: usize) -> Self {
        Self {
            bits: bitvec![1; tile_count],
        }
    }

    /// Test tile membership
    pub fn contains(&self, tile: usize) -> bool {
        self.bits.get(tile).as_deref() == Some(&true)
    }

    /// Remove a tile from the domain
    ///
    /// Removing an already-absent or out-of-range tile is a no-op.
    pub fn remove(&mut self, tile: usize) {
        if tile < self.bits.len() {
            self.bits.set(tile, false);
        }
    }

    /// Reduce the domain to a single tile
    pub fn collapse_to(&mut self, tile: usize) {
        self.bits.fill(false);
        if tile < self.bits.len() {
            self.bits.set(tile, true);
        }
    }

    /// Restore every tile to the domain
    pub fn fill(&mut self) {
        self.bits.fill(true);
    }

    /// Test if no tiles are admissible
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Count admissible tiles
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Iterate admissible tile ids in index order
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits.iter_ones()
    }

    /// Extract all admissible tile ids as a vector
    pub fn to_vec(&self) -> Vec<usize> {
        self.bits.iter_ones().collect()
    }
}

impl fmt::Display for DomainBitset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DomainBitset({} tiles: {:?})", self.count(), self.to_vec())
    }
}
