use crate::{
    algorithm::observation::{RandomSelector, choose_weighted_tile, lowest_entropy_cell},
    algorithm::propagation::{PropagationQueue, PropagationStatus, collapse_cell, propagate},
    graph::wave::Wave,
    io::configuration::{DEFAULT_MAX_RESETS, DEFAULT_SEED},
    io::error::{Result, WaveError},
};

/// Runtime parameters controlling a solver's behavior
#[derive(Clone, Copy, Debug)]
pub struct SolverConfig {
    /// Seed for the solver's random source
    pub seed: u64,
    /// Restart budget; `None` never gives up
    pub max_resets: Option<u64>,
    /// Pending propagation task bound; `None` leaves the queue unbounded
    pub max_pending_tasks: Option<usize>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            max_resets: Some(DEFAULT_MAX_RESETS),
            max_pending_tasks: None,
        }
    }
}

/// Counters accumulated across a run
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Metrics {
    /// Completed solver steps
    pub iterations: u64,
    /// Cells collapsed by observation (pins and cascades excluded)
    pub observations: u64,
    /// Propagation tasks processed
    pub propagations: u64,
    /// Contradiction-triggered restarts
    pub resets: u64,
}

/// Result of a single solver step
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// Every cell is collapsed
    Finished,
    /// Progress was made; more steps are needed
    Continuing,
    /// The restart budget is exhausted
    Failed,
}

/// Result of running to completion
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    /// Every cell is collapsed
    Finished,
    /// The restart budget is exhausted
    Failed,
}

/// Drives a wave to a solution by alternating observation and propagation
///
/// Owns the wave for the duration of solving; construction methods live on
/// [`Wave`], so the graph and rules cannot change once a solver exists. On
/// contradiction the whole wave is restored to its initial state (pins
/// included) rather than backtracked incrementally.
pub struct WaveSolver {
    wave: Wave,
    queue: PropagationQueue,
    selector: RandomSelector,
    config: SolverConfig,
    metrics: Metrics,
    finished: bool,
}

impl WaveSolver {
    /// Create a solver over a fully constructed wave
    pub fn new(wave: Wave, config: SolverConfig) -> Self {
        Self {
            wave,
            queue: PropagationQueue::new(config.max_pending_tasks),
            selector: RandomSelector::new(config.seed),
            config,
            metrics: Metrics::default(),
            finished: false,
        }
    }

    /// Read-only view of the wave being solved
    pub const fn wave(&self) -> &Wave {
        &self.wave
    }

    /// Counters accumulated so far
    pub const fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// The configuration the solver was created with
    pub const fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Whether the last step reported completion
    pub const fn is_finished(&self) -> bool {
        self.finished
    }

    /// Raise or lower the restart budget
    ///
    /// A failed wave is left in its last reset state, so raising the budget
    /// and calling [`Self::run`] again simply continues trying.
    pub const fn set_max_resets(&mut self, max_resets: Option<u64>) {
        self.config.max_resets = max_resets;
    }

    /// Give back the wave, dropping the solver
    pub fn into_wave(self) -> Wave {
        self.wave
    }

    /// Permanently pin a cell to a tile
    ///
    /// Collapses the cell immediately, records the pin so it survives
    /// resets, and synchronously drains all resulting propagation before
    /// returning. Intended for puzzle givens and other externally known
    /// facts, applied during setup or between completed runs.
    ///
    /// # Errors
    ///
    /// Returns [`WaveError::CellOutOfBounds`] or
    /// [`WaveError::TileOutOfBounds`] for invalid indices,
    /// [`WaveError::PinConflict`] when the cell already holds a different
    /// tile, and [`WaveError::PinContradiction`] when the requested tile was
    /// already eliminated from the cell's domain or when applying the pin
    /// empties another cell's domain (restarting cannot fix inconsistent
    /// pins, so this is surfaced instead of recovered).
    pub fn set_tile_to(&mut self, cell: usize, tile: usize) -> Result<()> {
        self.wave.ensure_cell(cell)?;
        self.wave.ensure_tile(tile)?;

        if let Some(held) = self.wave.collapsed_tile(cell) {
            if held != tile {
                return Err(WaveError::PinConflict {
                    cell,
                    held,
                    requested: tile,
                });
            }
            // Already holding the right tile: just make the pin permanent
            self.wave.set_pinned(cell, tile);
            return Ok(());
        }

        if !self.wave.domain_contains(cell, tile) {
            // The tile was already eliminated by rules or earlier pins
            return Err(WaveError::PinContradiction { cell });
        }

        self.wave.set_pinned(cell, tile);
        collapse_cell(&mut self.wave, &mut self.queue, cell, tile)?;

        while let Some(task) = self.queue.pop() {
            self.metrics.propagations += 1;
            match propagate(&mut self.wave, &mut self.queue, task)? {
                PropagationStatus::Consistent => {}
                PropagationStatus::Contradiction { cell } => {
                    self.queue.clear();
                    return Err(WaveError::PinContradiction { cell });
                }
            }
        }

        Ok(())
    }

    /// Perform one observation followed by a full propagation drain
    ///
    /// # Errors
    ///
    /// Returns [`WaveError::PropagationOverflow`] when a configured queue
    /// bound is exceeded; contradictions are handled internally by
    /// restarting and are only visible through the reset counter and the
    /// [`StepOutcome::Failed`] budget outcome.
    pub fn step(&mut self) -> Result<StepOutcome> {
        if self.budget_exhausted() {
            return Ok(StepOutcome::Failed);
        }

        let Some(cell) = lowest_entropy_cell(&self.wave, &mut self.selector) else {
            self.finished = true;
            return Ok(StepOutcome::Finished);
        };

        if let Some(tile) = choose_weighted_tile(&self.wave, cell, &mut self.selector) {
            collapse_cell(&mut self.wave, &mut self.queue, cell, tile)?;
            self.metrics.observations += 1;
        }

        while let Some(task) = self.queue.pop() {
            self.metrics.propagations += 1;
            match propagate(&mut self.wave, &mut self.queue, task)? {
                PropagationStatus::Consistent => {}
                PropagationStatus::Contradiction { .. } => {
                    self.restore_initial_state()?;
                    self.metrics.resets += 1;
                    if self.budget_exhausted() {
                        self.metrics.iterations += 1;
                        return Ok(StepOutcome::Failed);
                    }
                }
            }
        }

        self.metrics.iterations += 1;
        Ok(StepOutcome::Continuing)
    }

    /// Step until the wave is solved or the restart budget runs out
    ///
    /// # Errors
    ///
    /// Propagates the same errors as [`Self::step`].
    pub fn run(&mut self) -> Result<RunOutcome> {
        loop {
            match self.step()? {
                StepOutcome::Continuing => {}
                StepOutcome::Finished => return Ok(RunOutcome::Finished),
                StepOutcome::Failed => return Ok(RunOutcome::Failed),
            }
        }
    }

    /// Restart a finished, failed, or in-progress run
    ///
    /// Restores every domain to fully admissible, re-applies all pins, and
    /// clears the metrics. The graph and rule table are untouched.
    ///
    /// # Errors
    ///
    /// Propagates [`WaveError::PropagationOverflow`] from re-applying pins
    /// under a configured queue bound.
    pub fn reset(&mut self) -> Result<()> {
        self.metrics = Metrics::default();
        self.restore_initial_state()
    }

    /// Restore domains and pins without touching the metrics
    ///
    /// Used on contradiction. Re-applying pins replays propagation that
    /// already succeeded once against a fresh wave, so it cannot contradict;
    /// the queue bound can still overflow, which propagates as an error.
    fn restore_initial_state(&mut self) -> Result<()> {
        self.queue.clear();
        self.wave.reset_domains();
        self.finished = false;

        for cell in 0..self.wave.cell_count() {
            let Some(tile) = self.wave.pinned_tile(cell) else {
                continue;
            };
            if self.wave.is_collapsed(cell) {
                // A pin already re-applied through an earlier pin's cascade
                continue;
            }

            collapse_cell(&mut self.wave, &mut self.queue, cell, tile)?;

            while let Some(task) = self.queue.pop() {
                self.metrics.propagations += 1;
                if let PropagationStatus::Contradiction { cell } =
                    propagate(&mut self.wave, &mut self.queue, task)?
                {
                    self.queue.clear();
                    return Err(WaveError::PinContradiction { cell });
                }
            }
        }

        Ok(())
    }

    fn budget_exhausted(&self) -> bool {
        self.config
            .max_resets
            .is_some_and(|max| self.metrics.resets >= max)
    }
}

#[cfg(test)]
mod tests {
    use super::{RunOutcome, SolverConfig, StepOutcome, WaveSolver};
    use crate::graph::tiles::TileSet;
    use crate::graph::wave::Wave;

    fn solver(wave: Wave) -> WaveSolver {
        WaveSolver::new(wave, SolverConfig::default())
    }

    #[test]
    fn test_isolated_cell_finishes_without_propagation() {
        let mut wave = Wave::new(TileSet::uniform(3).unwrap(), 1).unwrap();
        wave.add_cell();

        let mut solver = solver(wave);
        assert_eq!(solver.step().unwrap(), StepOutcome::Continuing);
        assert_eq!(solver.step().unwrap(), StepOutcome::Finished);
        assert!(solver.is_finished());
        assert_eq!(solver.metrics().observations, 1);
        assert_eq!(solver.metrics().propagations, 0);
    }

    #[test]
    fn test_empty_wave_is_immediately_finished() {
        let wave = Wave::new(TileSet::uniform(2).unwrap(), 1).unwrap();
        let mut solver = solver(wave);
        assert_eq!(solver.run().unwrap(), RunOutcome::Finished);
        assert_eq!(solver.metrics().observations, 0);
    }

    #[test]
    fn test_unsatisfiable_rules_exhaust_budget() {
        // Two mutually adjacent cells with an all-false rule table: the
        // first collapse always empties the neighbor's domain
        let mut wave = Wave::new(TileSet::uniform(2).unwrap(), 1).unwrap();
        let a = wave.add_cell();
        let b = wave.add_cell();
        wave.add_neighbor(a, b, 0).unwrap();
        wave.add_neighbor(b, a, 0).unwrap();

        let mut solver = WaveSolver::new(
            wave,
            SolverConfig {
                max_resets: Some(5),
                ..SolverConfig::default()
            },
        );

        assert_eq!(solver.run().unwrap(), RunOutcome::Failed);
        assert_eq!(solver.metrics().resets, 5);
    }

    #[test]
    fn test_failed_wave_can_continue_with_larger_budget() {
        let mut wave = Wave::new(TileSet::uniform(2).unwrap(), 1).unwrap();
        let a = wave.add_cell();
        let b = wave.add_cell();
        wave.add_neighbor(a, b, 0).unwrap();
        wave.add_neighbor(b, a, 0).unwrap();

        let mut solver = WaveSolver::new(
            wave,
            SolverConfig {
                max_resets: Some(1),
                ..SolverConfig::default()
            },
        );

        assert_eq!(solver.run().unwrap(), RunOutcome::Failed);
        assert_eq!(solver.metrics().resets, 1);

        // Wave sits in its reset state and accepts another attempt
        assert_eq!(solver.wave().collapsed_count(), 0);
        solver.set_max_resets(Some(3));
        assert_eq!(solver.run().unwrap(), RunOutcome::Failed);
        assert_eq!(solver.metrics().resets, 3);
    }
}
