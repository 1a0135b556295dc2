//! Boolean compatibility rules between tile pairs under each relationship

use crate::io::error::{Result, WaveError};
use ndarray::Array3;

/// Rule table stating which tile pairs are compatible under a relationship
///
/// Entry `[relationship, source, dest]` is true when a cell may keep `dest`
/// admissible while a neighbor reached through `relationship` can still hold
/// `source`. The table starts fully disallowed; callers enumerate every
/// permitted pair, in both directions if symmetry is intended.
#[derive(Clone, Debug)]
pub struct RuleTable {
    allowed: Array3<bool>,
}

impl RuleTable {
    /// Create a zeroed rule table for the given dimensions
    pub fn new(relationship_count: usize, tile_count: usize) -> Self {
        Self {
            allowed: Array3::from_elem((relationship_count, tile_count, tile_count), false),
        }
    }

    /// Number of relationship categories
    pub fn relationship_count(&self) -> usize {
        self.allowed.dim().0
    }

    /// Write one rule entry
    ///
    /// # Errors
    ///
    /// Returns [`WaveError::TileOutOfBounds`] or
    /// [`WaveError::RelationshipOutOfBounds`] for indices outside the
    /// dimensions fixed at construction.
    pub fn set(
        &mut self,
        source: usize,
        dest: usize,
        relationship: usize,
        allowed: bool,
    ) -> Result<()> {
        let (relationship_count, tile_count, _) = self.allowed.dim();

        if relationship >= relationship_count {
            return Err(WaveError::RelationshipOutOfBounds {
                relationship,
                relationship_count,
            });
        }

        for index in [source, dest] {
            if index >= tile_count {
                return Err(WaveError::TileOutOfBounds { index, tile_count });
            }
        }

        if let Some(entry) = self.allowed.get_mut((relationship, source, dest)) {
            *entry = allowed;
        }

        Ok(())
    }

    /// O(1) compatibility lookup; out-of-range queries read as disallowed
    pub fn allows(&self, relationship: usize, source: usize, dest: usize) -> bool {
        self.allowed
            .get((relationship, source, dest))
            .copied()
            .unwrap_or(false)
    }
}
