//! The wave: every cell's admissible-tile domain plus the adjacency graph
//!
//! Neighbor lists live in one shared arena of singly-linked entries with
//! stable indices, so graph construction never reallocates per cell.

use crate::algorithm::bitset::DomainBitset;
use crate::graph::rules::RuleTable;
use crate::graph::tiles::TileSet;
use crate::io::error::{Result, WaveError};
use crate::math::entropy::{cell_entropy, weight_log_weight};

/// One directed adjacency entry as seen from a cell
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Neighbor {
    /// Index of the neighboring cell
    pub cell: usize,
    /// Relationship category of the edge
    pub relationship: usize,
}

/// Arena entry: a neighbor reference chained to the owning cell's next entry
#[derive(Clone, Copy, Debug)]
struct NeighborLink {
    cell: u32,
    relationship: u32,
    next: Option<u32>,
}

/// Per-cell solver state
#[derive(Clone, Debug)]
struct Cell {
    domain: DomainBitset,
    domain_size: usize,
    sum_weights: f64,
    weight_log_weight_sum: f64,
    collapsed_tile: Option<usize>,
    pinned_tile: Option<usize>,
    first_link: Option<u32>,
    neighbor_count: usize,
}

/// Outcome of re-checking one cell's domain against a neighbor
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum DomainChange {
    /// No tile was removed
    Unchanged,
    /// Tiles were removed; two or more remain
    Narrowed,
    /// Exactly one tile survived the filter
    CollapsedTo(usize),
    /// Every tile was removed: a contradiction
    Emptied,
}

/// The full collection of cells, their domains, and the rule table
///
/// Constructed incrementally (cells, then neighbors and rules), then handed
/// to a solver. Solving consumes the wave, so graph mutation after a run has
/// started is impossible by construction.
#[derive(Clone, Debug)]
pub struct Wave {
    tiles: TileSet,
    rules: RuleTable,
    cells: Vec<Cell>,
    links: Vec<NeighborLink>,
}

impl Wave {
    /// Create an empty wave over a tile set and a fixed relationship count
    ///
    /// # Errors
    ///
    /// Returns [`WaveError::NoRelationships`] when `relationship_count` is 0.
    pub fn new(tiles: TileSet, relationship_count: usize) -> Result<Self> {
        if relationship_count == 0 {
            return Err(WaveError::NoRelationships);
        }

        let rules = RuleTable::new(relationship_count, tiles.len());
        Ok(Self {
            tiles,
            rules,
            cells: Vec::new(),
            links: Vec::new(),
        })
    }

    /// Append a cell with a full domain and return its index
    ///
    /// Indices are assigned sequentially from 0 and remain stable for the
    /// life of the wave.
    pub fn add_cell(&mut self) -> usize {
        let index = self.cells.len();
        self.cells.push(Cell {
            domain: DomainBitset::full(self.tiles.len()),
            domain_size: self.tiles.len(),
            sum_weights: self.tiles.sum_weights(),
            weight_log_weight_sum: self.tiles.weight_log_weight_sum(),
            collapsed_tile: None,
            pinned_tile: None,
            first_link: None,
            neighbor_count: 0,
        });
        index
    }

    /// Append a one-directional adjacency entry to a cell's neighbor list
    ///
    /// Bidirectional adjacency requires two calls.
    ///
    /// # Errors
    ///
    /// Returns [`WaveError::CellOutOfBounds`] or
    /// [`WaveError::RelationshipOutOfBounds`] for invalid indices.
    pub fn add_neighbor(
        &mut self,
        cell: usize,
        neighbor: usize,
        relationship: usize,
    ) -> Result<()> {
        self.ensure_cell(cell)?;
        self.ensure_cell(neighbor)?;
        self.ensure_relationship(relationship)?;

        let link = self.links.len() as u32;
        let Some(owner) = self.cells.get_mut(cell) else {
            return Err(WaveError::CellOutOfBounds {
                index: cell,
                cell_count: self.cells.len(),
            });
        };

        self.links.push(NeighborLink {
            cell: neighbor as u32,
            relationship: relationship as u32,
            next: owner.first_link,
        });
        owner.first_link = Some(link);
        owner.neighbor_count += 1;
        Ok(())
    }

    /// Rebuild the adjacency graph from a relationship strategy
    ///
    /// Evaluates `relationship` for every unordered cell pair (O(n²)); when
    /// it returns a relationship id, neighbor entries are added on both
    /// sides. Any previously built adjacency is discarded first. Intended
    /// for topologies that are awkward to enumerate edge by edge, such as
    /// full-graph region constraints.
    ///
    /// # Errors
    ///
    /// Returns [`WaveError::RelationshipOutOfBounds`] when the strategy
    /// produces an id outside the count fixed at initialization.
    pub fn calculate_neighbors<F>(&mut self, mut relationship: F) -> Result<()>
    where
        F: FnMut(usize, usize) -> Option<usize>,
    {
        self.links.clear();
        for cell in &mut self.cells {
            cell.first_link = None;
            cell.neighbor_count = 0;
        }

        let cell_count = self.cells.len();
        for first in 0..cell_count {
            for second in first + 1..cell_count {
                if let Some(id) = relationship(first, second) {
                    self.add_neighbor(first, second, id)?;
                    self.add_neighbor(second, first, id)?;
                }
            }
        }

        Ok(())
    }

    /// Write one rule table entry
    ///
    /// # Errors
    ///
    /// Returns [`WaveError::TileOutOfBounds`] or
    /// [`WaveError::RelationshipOutOfBounds`] for invalid indices.
    pub fn set_rule(
        &mut self,
        source: usize,
        dest: usize,
        relationship: usize,
        allowed: bool,
    ) -> Result<()> {
        self.rules.set(source, dest, relationship, allowed)
    }

    /// Number of cells in the wave
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Number of tiles in the tile set
    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    /// Number of relationship categories
    pub fn relationship_count(&self) -> usize {
        self.rules.relationship_count()
    }

    /// The shared tile set
    pub const fn tiles(&self) -> &TileSet {
        &self.tiles
    }

    /// Iterate a cell's neighbors; empty for out-of-range indices
    pub fn neighbors(&self, cell: usize) -> Neighbors<'_> {
        Neighbors {
            links: &self.links,
            cursor: self.cells.get(cell).and_then(|cell| cell.first_link),
        }
    }

    /// Number of adjacency entries owned by a cell
    pub fn neighbor_count(&self, cell: usize) -> usize {
        self.cells.get(cell).map_or(0, |cell| cell.neighbor_count)
    }

    /// Whether a cell has collapsed to a single tile
    pub fn is_collapsed(&self, cell: usize) -> bool {
        self.collapsed_tile(cell).is_some()
    }

    /// The tile a collapsed cell holds, if any
    pub fn collapsed_tile(&self, cell: usize) -> Option<usize> {
        self.cells.get(cell).and_then(|cell| cell.collapsed_tile)
    }

    /// The tile a cell was pinned to, if any
    pub fn pinned_tile(&self, cell: usize) -> Option<usize> {
        self.cells.get(cell).and_then(|cell| cell.pinned_tile)
    }

    /// Admissible tiles of a cell in index order
    pub fn domain(&self, cell: usize) -> Vec<usize> {
        self.cells
            .get(cell)
            .map_or_else(Vec::new, |cell| cell.domain.to_vec())
    }

    /// Number of admissible tiles in a cell's domain
    pub fn domain_size(&self, cell: usize) -> usize {
        self.cells.get(cell).map_or(0, |cell| cell.domain_size)
    }

    /// Test whether a tile is admissible for a cell
    pub fn domain_contains(&self, cell: usize, tile: usize) -> bool {
        self.cells
            .get(cell)
            .is_some_and(|cell| cell.domain.contains(tile))
    }

    /// Cached sum of admissible tile weights
    pub fn sum_weights(&self, cell: usize) -> f64 {
        self.cells.get(cell).map_or(0.0, |cell| cell.sum_weights)
    }

    /// Cached sum of `weight * ln(weight)` over admissible tiles
    pub fn weight_log_weight_sum(&self, cell: usize) -> f64 {
        self.cells
            .get(cell)
            .map_or(0.0, |cell| cell.weight_log_weight_sum)
    }

    /// Entropy of a cell's current domain; 0 for collapsed cells
    pub fn entropy(&self, cell: usize) -> f64 {
        self.cells.get(cell).map_or(0.0, |cell| {
            cell_entropy(cell.sum_weights, cell.weight_log_weight_sum)
        })
    }

    /// Count of collapsed cells
    pub fn collapsed_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|cell| cell.collapsed_tile.is_some())
            .count()
    }

    /// Validate a cell index
    pub(crate) fn ensure_cell(&self, index: usize) -> Result<()> {
        if index >= self.cells.len() {
            return Err(WaveError::CellOutOfBounds {
                index,
                cell_count: self.cells.len(),
            });
        }
        Ok(())
    }

    /// Validate a tile id
    pub(crate) fn ensure_tile(&self, index: usize) -> Result<()> {
        if index >= self.tiles.len() {
            return Err(WaveError::TileOutOfBounds {
                index,
                tile_count: self.tiles.len(),
            });
        }
        Ok(())
    }

    fn ensure_relationship(&self, relationship: usize) -> Result<()> {
        let relationship_count = self.rules.relationship_count();
        if relationship >= relationship_count {
            return Err(WaveError::RelationshipOutOfBounds {
                relationship,
                relationship_count,
            });
        }
        Ok(())
    }

    /// Collapse a cell to a single tile and zero its entropy caches
    pub(crate) fn set_collapsed(&mut self, cell: usize, tile: usize) {
        if let Some(cell) = self.cells.get_mut(cell) {
            cell.domain.collapse_to(tile);
            cell.domain_size = 1;
            cell.sum_weights = 0.0;
            cell.weight_log_weight_sum = 0.0;
            cell.collapsed_tile = Some(tile);
        }
    }

    /// Record a pinned assignment so it survives resets
    pub(crate) fn set_pinned(&mut self, cell: usize, tile: usize) {
        if let Some(cell) = self.cells.get_mut(cell) {
            cell.pinned_tile = Some(tile);
        }
    }

    /// Restore every cell to a full domain, keeping pins and the graph
    pub(crate) fn reset_domains(&mut self) {
        let tile_count = self.tiles.len();
        let sum_weights = self.tiles.sum_weights();
        let weight_log_weight_sum = self.tiles.weight_log_weight_sum();

        for cell in &mut self.cells {
            cell.domain.fill();
            cell.domain_size = tile_count;
            cell.sum_weights = sum_weights;
            cell.weight_log_weight_sum = weight_log_weight_sum;
            cell.collapsed_tile = None;
        }
    }

    /// Remove from `to`'s domain every tile no admissible tile of `from`
    /// allows under `relationship`
    ///
    /// Entropy caches are decremented alongside each removal; they are never
    /// re-derived from scratch mid-propagation.
    pub(crate) fn filter_domain(
        &mut self,
        from: usize,
        to: usize,
        relationship: usize,
    ) -> DomainChange {
        if from == to {
            return DomainChange::Unchanged;
        }

        let Self {
            tiles,
            rules,
            cells,
            ..
        } = self;
        let Some((source, dest)) = split_pair(cells, from, to) else {
            return DomainChange::Unchanged;
        };

        let mut last_kept = None;
        let mut changed = false;

        for dest_tile in 0..tiles.len() {
            if !dest.domain.contains(dest_tile) {
                continue;
            }

            let supported = source
                .domain
                .iter()
                .any(|source_tile| rules.allows(relationship, source_tile, dest_tile));

            if supported {
                last_kept = Some(dest_tile);
            } else {
                dest.domain.remove(dest_tile);
                dest.domain_size -= 1;
                let weight = tiles.weight(dest_tile);
                dest.sum_weights -= weight;
                dest.weight_log_weight_sum -= weight_log_weight(weight);
                changed = true;
            }
        }

        if !changed {
            return DomainChange::Unchanged;
        }

        match (dest.domain_size, last_kept) {
            (0, _) => DomainChange::Emptied,
            (1, Some(tile)) => DomainChange::CollapsedTo(tile),
            _ => DomainChange::Narrowed,
        }
    }
}

/// Disjoint borrows of a source cell (shared) and destination cell (mutable)
fn split_pair(cells: &mut [Cell], from: usize, to: usize) -> Option<(&Cell, &mut Cell)> {
    if from < to {
        let (head, tail) = cells.split_at_mut(to);
        Some((head.get(from)?, tail.first_mut()?))
    } else {
        let (head, tail) = cells.split_at_mut(from);
        Some((tail.first()?, head.get_mut(to)?))
    }
}

/// Iterator over a cell's adjacency entries
pub struct Neighbors<'a> {
    links: &'a [NeighborLink],
    cursor: Option<u32>,
}

impl Iterator for Neighbors<'_> {
    type Item = Neighbor;

    fn next(&mut self) -> Option<Self::Item> {
        let link = self.links.get(self.cursor? as usize)?;
        self.cursor = link.next;
        Some(Neighbor {
            cell: link.cell as usize,
            relationship: link.relationship as usize,
        })
    }
}
