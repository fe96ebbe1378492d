//! Deterministic constructive solver.
//!
//! Produces *a* correct swap sequence for any grid size without searching:
//! 1. Row placement: rows are filled top to bottom. Each value missing from
//!    its target row slides horizontally in its current row until it sits
//!    under an intruder (a value not belonging to the target row), then climbs
//!    straight up that column.
//! 2. Row ordering: with every row holding exactly its own values, bubble
//!    passes over all rows fix the order within rows.
//!
//! The result is finite and sorts the grid; it is not minimal.
use crate::error::{PuzzleError, Result};
use crate::grid::{GridState, Move};
use crate::solver::Path;
use std::ops::RangeInclusive;
use tracing::{debug, trace};

/// Solves `grid` constructively. See the module docs for the algorithm.
///
/// # Returns
/// * `Ok(path)` whose application sorts `grid`.
/// * `Err(PuzzleError::InternalInvariant)` only if a phase postcondition is
///   broken, which signals a defect rather than bad input.
///
/// # Examples
/// ```
/// use swap_puzzle::constructive::solve_constructive;
/// use swap_puzzle::grid::GridState;
/// let grid = GridState::new(2, 2, vec![1, 3, 4, 2]).unwrap();
/// let path = solve_constructive(&grid).unwrap();
/// assert!(grid.apply_moves(&path).unwrap().is_sorted());
/// ```
pub fn solve_constructive(grid: &GridState) -> Result<Path> {
    ConstructiveSolver::new(grid).solve()
}

/// Working state of one constructive solve: a private copy of the grid and
/// the swaps applied to it so far.
#[derive(Clone, Debug)]
pub struct ConstructiveSolver {
    work: GridState,
    moves: Path,
}

impl ConstructiveSolver {
    pub fn new(grid: &GridState) -> Self {
        ConstructiveSolver {
            work: grid.clone(),
            moves: Vec::new(),
        }
    }

    /// Runs both phases and returns the recorded swaps.
    pub fn solve(mut self) -> Result<Path> {
        self.place_rows()?;
        let placed = self.moves.len();
        self.order_rows()?;
        debug!(
            rows = self.work.rows(),
            cols = self.work.cols(),
            placement_moves = placed,
            climbs = self.moves[..placed].iter().filter(|mv| !mv.is_horizontal()).count(),
            ordering_moves = self.moves.len() - placed,
            "constructive solve finished"
        );
        Ok(self.moves)
    }

    /// Values that belong on row `r` of the sorted grid.
    fn row_block(&self, r: usize) -> RangeInclusive<u32> {
        let cols = self.work.cols() as u32;
        (r as u32 * cols + 1)..=((r as u32 + 1) * cols)
    }

    /// Applies `mv` to the working grid and records it.
    fn record(&mut self, mv: Move) -> Result<()> {
        self.work.swap_in_place(mv)?;
        self.moves.push(mv);
        Ok(())
    }

    /// Moves the value at `(row, col)` horizontally to column `target`.
    fn slide(&mut self, row: usize, mut col: usize, target: usize) -> Result<()> {
        while col < target {
            self.record(Move::new((row, col), (row, col + 1)))?;
            col += 1;
        }
        while col > target {
            self.record(Move::new((row, col), (row, col - 1)))?;
            col -= 1;
        }
        Ok(())
    }

    /// Phase 1: bring every value onto its target row.
    fn place_rows(&mut self) -> Result<()> {
        for r in 0..self.work.rows() {
            let block = self.row_block(r);
            for value in block.clone() {
                let (mut row, col) = self.work.position_of(value).ok_or_else(|| {
                    PuzzleError::InternalInvariant(format!("value {} missing from grid", value))
                })?;
                if row == r {
                    continue;
                }
                // Rows above r are final, so a missing value can only be below.
                if row < r {
                    return Err(PuzzleError::InternalInvariant(format!(
                        "value {} found on finished row {} while filling row {}",
                        value, row, r
                    )));
                }
                let intruder_col = (0..self.work.cols())
                    .find(|&c| !block.contains(&self.work.get(r, c)))
                    .ok_or_else(|| {
                        PuzzleError::InternalInvariant(format!(
                            "row {} has no intruder although {} is missing",
                            r, value
                        ))
                    })?;
                self.slide(row, col, intruder_col)?;
                while row > r {
                    self.record(Move::new((row, intruder_col), (row - 1, intruder_col)))?;
                    row -= 1;
                }
            }
            trace!(row = r, moves = self.moves.len(), "row placed");
        }
        Ok(())
    }

    /// Checks that each row holds exactly its target values.
    fn check_row_membership(&self) -> Result<()> {
        for r in 0..self.work.rows() {
            let block = self.row_block(r);
            if let Some(&stray) = self.work.row(r).iter().find(|&&v| !block.contains(&v)) {
                return Err(PuzzleError::InternalInvariant(format!(
                    "value {} is still on row {} after placement",
                    stray, r
                )));
            }
        }
        Ok(())
    }

    /// Phase 2: bubble passes within rows until the grid is sorted.
    fn order_rows(&mut self) -> Result<()> {
        let ceiling = 2 * self.work.size();
        self.order_rows_within(ceiling)
    }

    fn order_rows_within(&mut self, max_passes: usize) -> Result<()> {
        self.check_row_membership()?;
        let mut passes = 0;
        while !self.work.is_sorted() {
            if passes >= max_passes {
                return Err(PuzzleError::InternalInvariant(format!(
                    "row ordering did not converge within {} passes",
                    max_passes
                )));
            }
            passes += 1;
            for r in 0..self.work.rows() {
                for c in 0..self.work.cols() - 1 {
                    if self.work.get(r, c) > self.work.get(r, c + 1) {
                        self.record(Move::new((r, c), (r, c + 1)))?;
                    }
                }
            }
            trace!(pass = passes, moves = self.moves.len(), "row ordering pass");
        }
        Ok(())
    }
}
