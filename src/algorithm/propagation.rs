//! LIFO propagation queue and the arc-consistency step
//!
//! Propagation is depth-first: collapsing a cell pushes one task per
//! uncollapsed neighbor, and each popped task may push further tasks for the
//! cells it narrows. The queue is unbounded unless the caller configures a
//! limit, in which case overflow is an error rather than silent task loss.

use crate::graph::wave::{DomainChange, Wave};
use crate::io::error::{Result, WaveError};

/// A queued arc-consistency check
///
/// Means "re-check `to`'s domain given `from`'s current domain under
/// `relationship`".
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PropagationTask {
    /// Cell whose domain changed
    pub from: usize,
    /// Cell to re-check
    pub to: usize,
    /// Relationship of the edge between them
    pub relationship: usize,
}

/// Bounded or unbounded LIFO stack of pending propagation tasks
#[derive(Clone, Debug, Default)]
pub struct PropagationQueue {
    tasks: Vec<PropagationTask>,
    limit: Option<usize>,
}

impl PropagationQueue {
    /// Create a queue with an optional pending-task bound
    pub const fn new(limit: Option<usize>) -> Self {
        Self {
            tasks: Vec::new(),
            limit,
        }
    }

    /// Push a task
    ///
    /// # Errors
    ///
    /// Returns [`WaveError::PropagationOverflow`] when a configured limit
    /// would be exceeded.
    pub fn push(&mut self, task: PropagationTask) -> Result<()> {
        if let Some(limit) = self.limit {
            if self.tasks.len() >= limit {
                return Err(WaveError::PropagationOverflow {
                    pending: self.tasks.len(),
                    limit,
                });
            }
        }

        self.tasks.push(task);
        Ok(())
    }

    /// Pop the most recently pushed task
    pub fn pop(&mut self) -> Option<PropagationTask> {
        self.tasks.pop()
    }

    /// Discard all pending tasks
    pub fn clear(&mut self) {
        self.tasks.clear();
    }

    /// Number of pending tasks
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Test whether no tasks are pending
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

/// Result of processing one propagation task
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum PropagationStatus {
    /// The destination cell kept a non-empty domain
    Consistent,
    /// The destination cell's domain became empty
    Contradiction {
        /// Cell whose domain was emptied
        cell: usize,
    },
}

/// Mark a cell collapsed and queue re-checks for its uncollapsed neighbors
///
/// Shared by observation, pinning, and the cascade inside propagation.
pub(crate) fn collapse_cell(
    wave: &mut Wave,
    queue: &mut PropagationQueue,
    cell: usize,
    tile: usize,
) -> Result<()> {
    wave.set_collapsed(cell, tile);

    for neighbor in wave.neighbors(cell) {
        if wave.is_collapsed(neighbor.cell) {
            continue;
        }
        queue.push(PropagationTask {
            from: cell,
            to: neighbor.cell,
            relationship: neighbor.relationship,
        })?;
    }

    Ok(())
}

/// Process one task: filter the destination domain and fan out
///
/// A destination narrowed to a single tile is collapsed immediately, queueing
/// its neighbors exactly as a normal collapse would. A narrowed-but-plural
/// destination queues every neighbor other than the task's source. An
/// unchanged destination queues nothing.
///
/// # Errors
///
/// Returns [`WaveError::PropagationOverflow`] when fan-out exceeds a
/// configured queue bound.
pub(crate) fn propagate(
    wave: &mut Wave,
    queue: &mut PropagationQueue,
    task: PropagationTask,
) -> Result<PropagationStatus> {
    match wave.filter_domain(task.from, task.to, task.relationship) {
        DomainChange::Unchanged => Ok(PropagationStatus::Consistent),
        DomainChange::Emptied => Ok(PropagationStatus::Contradiction { cell: task.to }),
        DomainChange::CollapsedTo(tile) => {
            collapse_cell(wave, queue, task.to, tile)?;
            Ok(PropagationStatus::Consistent)
        }
        DomainChange::Narrowed => {
            for neighbor in wave.neighbors(task.to) {
                if neighbor.cell == task.from || wave.is_collapsed(neighbor.cell) {
                    continue;
                }
                queue.push(PropagationTask {
                    from: task.to,
                    to: neighbor.cell,
                    relationship: neighbor.relationship,
                })?;
            }
            Ok(PropagationStatus::Consistent)
        }
    }
}
