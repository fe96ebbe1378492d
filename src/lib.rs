//! # Swap Puzzle Library
//!
//! This library solves the swap puzzle: an `m x n` grid holding a permutation
//! of `1..=m*n` must be brought into row-major sorted order by swapping
//! 4-adjacent cells.
//!
//! It is used by three binaries:
//! - `swap_solver`: Loads a grid file (or generates a random grid) and prints
//!   a solution from the chosen solver.
//! - `human_player`: Plays the puzzle interactively on the command line.
//! - `solver_evaluator`: Compares solution lengths of the solvers over seeded
//!   random grids.
//!
//! ## Modules
//! - `grid`: The grid (`GridState`), swap moves (`Move`) and canonical keys.
//! - `heuristics`: Admissible lower bounds used by the heuristic search.
//! - `graph`: The explicit permutation state graph of small grid shapes.
//! - `solver`: The exhaustive (BFS) and heuristic (A*) shortest-path solvers.
//! - `constructive`: A fast solver that always succeeds but is not optimal.
//! - `game`: A play session with undo and hints.
//! - `utils`: Parsing grids from their text format.
//! - `error`: The error kinds shared by everything above.
//!
//! The functions at the crate root are the entry points callers such as a UI
//! are expected to use.

pub mod constructive;
pub mod error;
pub mod game;
pub mod graph;
pub mod grid;
pub mod heuristics;
pub mod solver;
pub mod utils;

pub use crate::error::{PuzzleError, Result};
pub use crate::grid::{GridState, Move};
pub use crate::solver::{Path, SearchLimits};

use crate::solver::{ExhaustiveGraphSolver, HeuristicSearch};

/// Builds a grid from row-major values. See [`GridState::new`].
pub fn new_grid(rows: usize, cols: usize, values: Vec<u32>) -> Result<GridState> {
    GridState::new(rows, cols, values)
}

/// Shortest solution by breadth-first search over the full state graph.
///
/// Grids larger than [`solver::DEFAULT_MAX_EXHAUSTIVE_CELLS`] are refused with
/// `PuzzleError::InstanceTooLarge`.
pub fn solve_exhaustive(grid: &GridState) -> Result<Path> {
    ExhaustiveGraphSolver::new(&SearchLimits::default())
        .solve(grid)
        .map(|solution| solution.moves)
}

/// Shortest solution by best-first search guided by `heuristic`.
///
/// The path is minimal whenever `heuristic` is admissible.
///
/// # Examples
/// ```
/// use swap_puzzle::{new_grid, solve_heuristic};
/// use swap_puzzle::heuristics::manhattan_sum;
///
/// let grid = new_grid(2, 2, vec![1, 3, 4, 2]).unwrap();
/// let path = solve_heuristic(&grid, manhattan_sum).unwrap();
/// assert_eq!(path.len(), 2);
/// ```
pub fn solve_heuristic<H>(grid: &GridState, heuristic: H) -> Result<Path>
where
    H: Fn(&GridState) -> f64,
{
    HeuristicSearch::new(heuristic, &SearchLimits::default())
        .solve(grid)
        .map(|solution| solution.moves)
}

/// Some valid solution, found without searching. See [`constructive`].
pub fn solve_constructive(grid: &GridState) -> Result<Path> {
    constructive::solve_constructive(grid)
}

/// Applies `path` to `grid` in order. See [`GridState::apply_moves`].
pub fn apply_moves(grid: &GridState, path: &[Move]) -> Result<GridState> {
    grid.apply_moves(path)
}

/// Whether `grid` is in row-major sorted order.
pub fn is_sorted(grid: &GridState) -> bool {
    grid.is_sorted()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heuristics::{manhattan_sum, misplaced_count};

    fn solve_all(grid: &GridState) -> Vec<Path> {
        vec![
            solve_exhaustive(grid).unwrap(),
            solve_heuristic(grid, manhattan_sum).unwrap(),
            solve_heuristic(grid, misplaced_count).unwrap(),
            solve_constructive(grid).unwrap(),
        ]
    }

    #[test]
    fn test_sorted_grid_gives_empty_paths() {
        let grid = new_grid(2, 2, vec![1, 2, 3, 4]).unwrap();
        for path in solve_all(&grid) {
            assert!(path.is_empty());
        }
    }

    #[test]
    fn test_every_solver_sorts_the_grid() {
        let grid = new_grid(2, 3, vec![1, 4, 6, 2, 3, 5]).unwrap();
        let paths = solve_all(&grid);
        assert_eq!(paths[0].len(), 5);
        for path in &paths {
            assert!(is_sorted(&apply_moves(&grid, path).unwrap()));
            assert!(path.len() >= paths[0].len());
        }
    }

    #[test]
    fn test_two_by_two_scenario() {
        let grid = new_grid(2, 2, vec![1, 3, 4, 2]).unwrap();
        assert_eq!(solve_exhaustive(&grid).unwrap().len(), 2);
        let constructive = solve_constructive(&grid).unwrap();
        assert!(constructive.len() >= 2);
        assert!(is_sorted(&apply_moves(&grid, &constructive).unwrap()));
    }

    #[test]
    fn test_diagonal_move_is_rejected() {
        let grid = new_grid(2, 2, vec![1, 2, 3, 4]).unwrap();
        let mv = Move::new((0, 0), (1, 1));
        assert_eq!(
            apply_moves(&grid, &[mv]),
            Err(PuzzleError::IllegalMove { mv })
        );
    }

    #[test]
    fn test_duplicate_values_are_rejected() {
        assert!(matches!(
            new_grid(2, 2, vec![1, 1, 3, 4]),
            Err(PuzzleError::InvalidGrid(_))
        ));
    }

    #[test]
    fn test_constructive_handles_grids_beyond_search() {
        let grid = GridState::new_random_with_seed(6, 6, 11).unwrap();
        assert!(matches!(
            solve_exhaustive(&grid),
            Err(PuzzleError::InstanceTooLarge { .. })
        ));
        let path = solve_constructive(&grid).unwrap();
        assert!(is_sorted(&apply_moves(&grid, &path).unwrap()));
    }
}
