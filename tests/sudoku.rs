//! Solves the bundled Sudoku puzzle and validates the completed grid

use wavegraph::algorithm::executor::{RunOutcome, SolverConfig, WaveSolver};
use wavegraph::graph::wave::Wave;
use wavegraph::io::cli::sudoku_solver;

const SIZE: usize = 9;

fn solve(seed: u64) -> WaveSolver {
    let mut solver = sudoku_solver(SolverConfig {
        seed,
        ..SolverConfig::default()
    })
    .unwrap();
    assert_eq!(solver.run().unwrap(), RunOutcome::Finished);
    solver
}

fn assert_is_permutation(wave: &Wave, cells: impl Iterator<Item = usize>) {
    let mut seen = [false; SIZE];
    for cell in cells {
        let tile = wave.collapsed_tile(cell).unwrap();
        assert!(!seen[tile], "digit {} appears twice", tile + 1);
        seen[tile] = true;
    }
    assert!(seen.iter().all(|digit| *digit));
}

#[test]
fn test_sudoku_solution_is_valid() {
    // Seed 7 solves with few restarts, keeping the debug-mode run fast
    let solver = solve(7);
    let wave = solver.wave();

    assert_eq!(wave.collapsed_count(), SIZE * SIZE);

    for row in 0..SIZE {
        assert_is_permutation(wave, (0..SIZE).map(|col| row * SIZE + col));
    }
    for col in 0..SIZE {
        assert_is_permutation(wave, (0..SIZE).map(|row| row * SIZE + col));
    }
    for box_row in 0..3 {
        for box_col in 0..3 {
            assert_is_permutation(
                wave,
                (0..SIZE).map(move |i| {
                    let row = box_row * 3 + i / 3;
                    let col = box_col * 3 + i % 3;
                    row * SIZE + col
                }),
            );
        }
    }
}

#[test]
fn test_sudoku_givens_survive_solving() {
    let solver = solve(7);
    let wave = solver.wave();

    // A selection of the puzzle givens, as (column, row, digit index)
    for (x, y, digit) in [(1, 0, 1), (4, 4, 3), (7, 8, 3)] {
        assert_eq!(wave.collapsed_tile(y * SIZE + x), Some(digit));
        assert_eq!(wave.pinned_tile(y * SIZE + x), Some(digit));
    }
}

#[test]
fn test_sudoku_solution_is_deterministic_per_seed() {
    let first = solve(7);
    let second = solve(7);

    for cell in 0..SIZE * SIZE {
        assert_eq!(
            first.wave().collapsed_tile(cell),
            second.wave().collapsed_tile(cell)
        );
    }

    let metrics_first = *first.metrics();
    let metrics_second = *second.metrics();
    assert_eq!(metrics_first, metrics_second);
}
