//! Error types for wave construction and solving

use std::fmt;

/// Main error type for all wave operations
#[derive(Debug, Clone, PartialEq)]
pub enum WaveError {
    /// Tile set construction received no tiles
    EmptyTileSet,

    /// Tile weight is not a positive finite number
    InvalidWeight {
        /// Index of the offending tile
        tile: usize,
        /// The rejected weight value
        weight: f64,
    },

    /// A wave needs at least one relationship category
    NoRelationships,

    /// Cell index does not name an existing cell
    CellOutOfBounds {
        /// The invalid cell index
        index: usize,
        /// Number of cells in the wave
        cell_count: usize,
    },

    /// Tile id exceeds the tile set
    TileOutOfBounds {
        /// The invalid tile id
        index: usize,
        /// Number of tiles in the set
        tile_count: usize,
    },

    /// Relationship id exceeds the count fixed at initialization
    RelationshipOutOfBounds {
        /// The invalid relationship id
        relationship: usize,
        /// Number of relationships in the wave
        relationship_count: usize,
    },

    /// A cell already holding a tile was pinned to a different one
    PinConflict {
        /// Cell being pinned
        cell: usize,
        /// Tile the cell already holds
        held: usize,
        /// Tile the caller asked for
        requested: usize,
    },

    /// A pinned tile contradicted the rules or the other pins
    ///
    /// Raised when the requested tile was already eliminated from the pinned
    /// cell's domain, or when applying the pin emptied another cell's domain.
    /// Unlike contradictions during a run, this is not recoverable by
    /// restarting: the pins themselves are inconsistent.
    PinContradiction {
        /// Cell whose domain became empty
        cell: usize,
    },

    /// The pending propagation queue exceeded its configured bound
    PropagationOverflow {
        /// Tasks pending when the push was rejected
        pending: usize,
        /// Configured maximum pending-task count
        limit: usize,
    },

    /// Failed to write demo output to the filesystem
    OutputWrite {
        /// Destination path
        path: std::path::PathBuf,
        /// Description of the underlying I/O failure
        reason: String,
    },
}

impl fmt::Display for WaveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTileSet => {
                write!(f, "Tile set must contain at least one tile")
            }
            Self::InvalidWeight { tile, weight } => {
                write!(
                    f,
                    "Tile {tile} has weight {weight}; weights must be positive and finite"
                )
            }
            Self::NoRelationships => {
                write!(f, "Relationship count must be at least 1")
            }
            Self::CellOutOfBounds { index, cell_count } => {
                write!(f, "Cell index {index} is out of bounds ({cell_count} cells)")
            }
            Self::TileOutOfBounds { index, tile_count } => {
                write!(f, "Tile id {index} is out of bounds ({tile_count} tiles)")
            }
            Self::RelationshipOutOfBounds {
                relationship,
                relationship_count,
            } => {
                write!(
                    f,
                    "Relationship {relationship} is out of bounds ({relationship_count} relationships)"
                )
            }
            Self::PinConflict {
                cell,
                held,
                requested,
            } => {
                write!(
                    f,
                    "Cell {cell} is already collapsed to tile {held}; cannot pin to tile {requested}"
                )
            }
            Self::PinContradiction { cell } => {
                write!(
                    f,
                    "Pinned assignment emptied the domain of cell {cell}; pins are mutually inconsistent"
                )
            }
            Self::PropagationOverflow { pending, limit } => {
                write!(
                    f,
                    "Propagation queue overflow: {pending} tasks pending, limit is {limit}"
                )
            }
            Self::OutputWrite { path, reason } => {
                write!(f, "Failed to write output to '{}': {reason}", path.display())
            }
        }
    }
}

impl std::error::Error for WaveError {}

/// Convenience type alias for wave results
pub type Result<T> = std::result::Result<T, WaveError>;

#[cfg(test)]
mod tests {
    use super::WaveError;

    #[test]
    fn test_display_names_the_offending_indices() {
        let err = WaveError::CellOutOfBounds {
            index: 12,
            cell_count: 9,
        };
        let message = err.to_string();
        assert!(message.contains("12"));
        assert!(message.contains("9"));
    }

    #[test]
    fn test_pin_conflict_display() {
        let err = WaveError::PinConflict {
            cell: 3,
            held: 1,
            requested: 2,
        };
        assert!(err.to_string().contains("Cell 3"));
    }
}
