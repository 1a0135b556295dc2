//! Command-line interface for the bundled demo problems

use crate::algorithm::executor::{RunOutcome, SolverConfig, StepOutcome, WaveSolver};
use crate::graph::tiles::TileSet;
use crate::graph::wave::Wave;
use crate::io::configuration::{
    DEFAULT_DEMO_HEIGHT, DEFAULT_DEMO_WIDTH, DEFAULT_MAX_RESETS, DEFAULT_SEED, SUDOKU_SIZE,
};
use crate::io::error::{Result, WaveError};
use crate::io::progress::SolveProgress;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Built-in demo problems
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum Demo {
    /// Solve a fixed 9x9 Sudoku puzzle
    Sudoku,
    /// Generate a random sea/coast/land map
    Coastline,
}

#[derive(Parser)]
#[command(name = "wavegraph")]
#[command(
    author,
    version,
    about = "Solve constraint problems by wave function collapse"
)]
/// Command-line arguments for the demo binary
pub struct Cli {
    /// Demo problem to run
    #[arg(value_enum, value_name = "DEMO")]
    pub demo: Demo,

    /// Random seed for reproducible solving
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Restart budget before giving up
    #[arg(short = 'r', long, default_value_t = DEFAULT_MAX_RESETS)]
    pub max_resets: u64,

    /// Grid width for the coastline demo
    #[arg(short = 'w', long)]
    pub width: Option<usize>,

    /// Grid height for the coastline demo
    #[arg(short = 'H', long)]
    pub height: Option<usize>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Write the rendered result to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }
}

/// Builds the selected demo wave, solves it, and renders the result
pub struct DemoRunner {
    cli: Cli,
}

impl DemoRunner {
    /// Create a runner with the given CLI arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Build, solve, and render the selected demo
    ///
    /// # Errors
    ///
    /// Returns an error if demo construction fails or the rendered result
    /// cannot be written.
    pub fn run(&self) -> Result<()> {
        let config = SolverConfig {
            seed: self.cli.seed,
            max_resets: Some(self.cli.max_resets),
            max_pending_tasks: None,
        };

        let (mut solver, renderer, width) = match self.cli.demo {
            Demo::Sudoku => (
                sudoku_solver(config)?,
                render_sudoku as fn(&Wave, usize) -> String,
                SUDOKU_SIZE,
            ),
            Demo::Coastline => {
                let width = self.cli.width.unwrap_or(DEFAULT_DEMO_WIDTH);
                (
                    coastline_solver(config, width, self.cli.height)?,
                    render_coastline as fn(&Wave, usize) -> String,
                    width,
                )
            }
        };

        let outcome = self.solve(&mut solver)?;

        let mut rendered = renderer(solver.wave(), width);
        if matches!(outcome, RunOutcome::Failed) {
            rendered.push_str(&format!(
                "unsolved after {} resets\n",
                solver.metrics().resets
            ));
        }

        self.emit(&rendered)
    }

    fn solve(&self, solver: &mut WaveSolver) -> Result<RunOutcome> {
        let progress = self
            .cli
            .should_show_progress()
            .then(|| SolveProgress::new(solver.wave().cell_count()));

        let outcome = loop {
            match solver.step()? {
                StepOutcome::Continuing => {
                    if let Some(ref progress) = progress {
                        progress.update(solver.wave().collapsed_count(), solver.metrics().resets);
                    }
                }
                StepOutcome::Finished => break RunOutcome::Finished,
                StepOutcome::Failed => break RunOutcome::Failed,
            }
        };

        if let Some(ref progress) = progress {
            progress.finish();
        }

        Ok(outcome)
    }

    // Allow print for rendering results to the terminal
    #[allow(clippy::print_stdout)]
    fn emit(&self, rendered: &str) -> Result<()> {
        if let Some(ref path) = self.cli.output {
            std::fs::write(path, rendered).map_err(|source| WaveError::OutputWrite {
                path: path.clone(),
                reason: source.to_string(),
            })?;
        } else {
            print!("{rendered}");
        }
        Ok(())
    }
}

/// Relationship ids for the Sudoku demo
///
/// A cell pair sharing a 3x3 box is classed as the box relationship even
/// when it also shares a row or column; the rule table is identical for all
/// three, so the precedence only affects which id a link carries.
const SUDOKU_BOX: usize = 0;
const SUDOKU_COLUMN: usize = 1;
const SUDOKU_ROW: usize = 2;

/// Puzzle givens as (column, row, digit index)
const SUDOKU_GIVENS: [(usize, usize, usize); 19] = [
    (1, 0, 1),
    (3, 1, 5),
    (8, 1, 2),
    (1, 2, 6),
    (2, 2, 3),
    (4, 2, 7),
    (5, 3, 2),
    (8, 3, 1),
    (1, 4, 7),
    (4, 4, 3),
    (7, 4, 0),
    (0, 5, 5),
    (3, 5, 4),
    (4, 6, 0),
    (6, 6, 6),
    (7, 6, 7),
    (0, 7, 4),
    (5, 7, 8),
    (7, 8, 3),
];

/// Build a solver for the fixed Sudoku puzzle
///
/// # Errors
///
/// Returns an error only if construction produces out-of-bounds indices,
/// which cannot happen for the fixed puzzle layout.
pub fn sudoku_solver(config: SolverConfig) -> Result<WaveSolver> {
    let mut wave = Wave::new(TileSet::uniform(SUDOKU_SIZE)?, 3)?;
    for _ in 0..SUDOKU_SIZE * SUDOKU_SIZE {
        wave.add_cell();
    }

    wave.calculate_neighbors(|first, second| {
        let (ax, ay) = (first % SUDOKU_SIZE, first / SUDOKU_SIZE);
        let (bx, by) = (second % SUDOKU_SIZE, second / SUDOKU_SIZE);
        if ax / 3 == bx / 3 && ay / 3 == by / 3 {
            Some(SUDOKU_BOX)
        } else if ax == bx {
            Some(SUDOKU_COLUMN)
        } else if ay == by {
            Some(SUDOKU_ROW)
        } else {
            None
        }
    })?;

    for relationship in [SUDOKU_BOX, SUDOKU_COLUMN, SUDOKU_ROW] {
        for source in 0..SUDOKU_SIZE {
            for dest in 0..SUDOKU_SIZE {
                wave.set_rule(source, dest, relationship, source != dest)?;
            }
        }
    }

    let mut solver = WaveSolver::new(wave, config);
    for (x, y, digit) in SUDOKU_GIVENS {
        solver.set_tile_to(y * SUDOKU_SIZE + x, digit)?;
    }
    Ok(solver)
}

/// Tiles for the coastline demo, in domain order
const SEA: usize = 0;
const COAST: usize = 1;
const LAND: usize = 2;

/// Build a solver for a width x height coastline map
///
/// Sea and land never touch directly; every shoreline passes through a
/// coast tile. Coast is weighted low so it forms thin borders.
///
/// # Errors
///
/// Returns an error only if construction produces out-of-bounds indices,
/// which cannot happen for the fixed tile layout.
pub fn coastline_solver(
    config: SolverConfig,
    width: usize,
    height: Option<usize>,
) -> Result<WaveSolver> {
    let height = height.unwrap_or(DEFAULT_DEMO_HEIGHT);
    let mut wave = Wave::new(TileSet::new(&[4.0, 1.0, 4.0])?, 1)?;
    for _ in 0..width * height {
        wave.add_cell();
    }

    wave.calculate_neighbors(|first, second| {
        let (ax, ay) = (first % width, first / width);
        let (bx, by) = (second % width, second / width);
        let orthogonal = ax.abs_diff(bx) + ay.abs_diff(by) == 1;
        orthogonal.then_some(0)
    })?;

    for (source, dest) in [
        (SEA, SEA),
        (COAST, COAST),
        (LAND, LAND),
        (SEA, COAST),
        (COAST, SEA),
        (COAST, LAND),
        (LAND, COAST),
    ] {
        wave.set_rule(source, dest, 0, true)?;
    }

    Ok(WaveSolver::new(wave, config))
}

fn render_sudoku(wave: &Wave, width: usize) -> String {
    render_grid(wave, width, |tile| {
        char::from_digit(tile as u32 + 1, 10).unwrap_or('?')
    })
}

fn render_coastline(wave: &Wave, width: usize) -> String {
    render_grid(wave, width, |tile| match tile {
        SEA => '~',
        COAST => '+',
        _ => '#',
    })
}

/// Render collapsed cells row by row; uncollapsed cells show as '.'
fn render_grid(wave: &Wave, width: usize, glyph: impl Fn(usize) -> char) -> String {
    let mut out = String::new();
    for cell in 0..wave.cell_count() {
        match wave.collapsed_tile(cell) {
            Some(tile) => out.push(glyph(tile)),
            None => out.push('.'),
        }
        if (cell + 1) % width == 0 {
            out.push('\n');
        }
    }
    out
}
