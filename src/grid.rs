//! Grid and move model for the swap puzzle.
//!
//! This module defines the fundamental components every solver works on:
//! - `GridState`: an immutable `rows x cols` snapshot holding a permutation of
//!   `1..=rows*cols` in row-major order.
//! - `Move`: a swap between two cells, legal only when the cells are 4-adjacent.
//! - `GridKey`: the canonical, collision-free identifier of a grid used by the
//!   visited sets and state graphs of the search solvers.
//! - `Difficulty`: preset shapes and scramble depths for generated puzzles.
use crate::error::{PuzzleError, Result};
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::fmt;

/// A `(row, column)` coordinate, 0-based.
pub type Cell = (usize, usize);

/// A swap of the values held by two cells.
///
/// A move is only legal when the two cells are 4-adjacent (Manhattan distance
/// exactly 1) and both lie inside the grid. Construction never fails; legality
/// is checked when the move is applied, so illegal moves coming from a caller
/// surface as `PuzzleError::IllegalMove` instead of being corrected silently.
///
/// # Examples
/// ```
/// use swap_puzzle::grid::Move;
/// let mv = Move::new((0, 0), (0, 1));
/// assert!(mv.is_adjacent());
/// assert!(!Move::new((0, 0), (1, 1)).is_adjacent());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Move {
    pub from: Cell,
    pub to: Cell,
}

impl Move {
    pub fn new(from: Cell, to: Cell) -> Self {
        Move { from, to }
    }

    /// Returns `true` if the two cells are exactly one row or one column apart.
    pub fn is_adjacent(&self) -> bool {
        self.from.0.abs_diff(self.to.0) + self.from.1.abs_diff(self.to.1) == 1
    }

    /// Returns `true` if the move only touches a single row.
    pub fn is_horizontal(&self) -> bool {
        self.from.0 == self.to.0
    }

    /// The move that undoes this one. A swap undoes itself, so this is the same
    /// coordinate pair.
    pub fn inverse(&self) -> Self {
        *self
    }

    fn fits(&self, rows: usize, cols: usize) -> bool {
        self.from.0 < rows && self.to.0 < rows && self.from.1 < cols && self.to.1 < cols
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}) <-> ({}, {})",
            self.from.0, self.from.1, self.to.0, self.to.1
        )
    }
}

/// Lists every legal move of a `rows x cols` grid.
///
/// Horizontal swaps come first (row by row), then vertical swaps. The set only
/// depends on the shape and holds `2*rows*cols - rows - cols` moves.
pub fn legal_moves(rows: usize, cols: usize) -> Vec<Move> {
    let mut moves = Vec::with_capacity((2 * rows * cols).saturating_sub(rows + cols));
    for r in 0..rows {
        for c in 0..cols.saturating_sub(1) {
            moves.push(Move::new((r, c), (r, c + 1)));
        }
    }
    for r in 0..rows.saturating_sub(1) {
        for c in 0..cols {
            moves.push(Move::new((r, c), (r + 1, c)));
        }
    }
    moves
}

/// Number of cells of a `rows x cols` grid.
///
/// Fails when the count overflows `usize` or the values `1..=rows*cols` would
/// not fit in a `u32` cell.
pub(crate) fn cell_count(rows: usize, cols: usize) -> Result<usize> {
    rows.checked_mul(cols)
        .filter(|&size| u32::try_from(size).is_ok())
        .ok_or_else(|| {
            PuzzleError::InvalidGrid(format!("a {}x{} grid is too large", rows, cols))
        })
}

/// Canonical identifier of a grid: its shape plus the flattened values.
///
/// Two keys are equal exactly when the grids are equal, so it never collides.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridKey {
    rows: usize,
    cells: Box<[u32]>,
}

/// An immutable `rows x cols` grid holding a permutation of `1..=rows*cols`.
///
/// Every constructor validates the permutation invariant, and every operation
/// that changes values (`apply`, `apply_moves`) returns a new grid, leaving the
/// receiver untouched.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GridState {
    rows: usize,
    cols: usize,
    cells: Vec<u32>,
}

impl GridState {
    /// Creates a grid from row-major `values`.
    ///
    /// # Arguments
    /// * `rows`, `cols`: The grid dimensions, both at least 1.
    /// * `values`: Exactly `rows * cols` values forming a permutation of `1..=rows*cols`.
    ///
    /// # Returns
    /// * `Ok(GridState)` on success.
    /// * `Err(PuzzleError::InvalidGrid)` if a dimension is zero, the value count
    ///   is wrong, or a value is out of range or repeated.
    ///
    /// # Examples
    /// ```
    /// use swap_puzzle::grid::GridState;
    /// let grid = GridState::new(2, 2, vec![1, 3, 4, 2]).unwrap();
    /// assert_eq!(grid.get(1, 0), 4);
    /// assert!(GridState::new(2, 2, vec![1, 1, 3, 4]).is_err());
    /// ```
    pub fn new(rows: usize, cols: usize, values: Vec<u32>) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(PuzzleError::InvalidGrid(format!(
                "dimensions must be positive, got {}x{}",
                rows, cols
            )));
        }
        let size = cell_count(rows, cols)?;
        if values.len() != size {
            return Err(PuzzleError::InvalidGrid(format!(
                "expected {} values for a {}x{} grid, found {}",
                size,
                rows,
                cols,
                values.len()
            )));
        }
        let mut seen = vec![false; size];
        for &v in &values {
            let slot = (v as usize).wrapping_sub(1);
            if slot >= size {
                return Err(PuzzleError::InvalidGrid(format!(
                    "value {} is outside 1..={}",
                    v, size
                )));
            }
            if seen[slot] {
                return Err(PuzzleError::InvalidGrid(format!("value {} appears twice", v)));
            }
            seen[slot] = true;
        }
        Ok(GridState { rows, cols, cells: values })
    }

    /// Creates a grid from a list of rows, each of the same length.
    pub fn from_rows(rows: &[Vec<u32>]) -> Result<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        if let Some(bad) = rows.iter().position(|row| row.len() != cols) {
            return Err(PuzzleError::InvalidGrid(format!(
                "row {} has {} values, expected {}",
                bad,
                rows[bad].len(),
                cols
            )));
        }
        Self::new(rows.len(), cols, rows.concat())
    }

    /// Creates the sorted grid `1..=rows*cols` of the given shape.
    pub fn sorted(rows: usize, cols: usize) -> Result<Self> {
        let size = cell_count(rows, cols)?;
        Self::new(rows, cols, (1..=size as u32).collect())
    }

    /// Creates a uniformly shuffled grid, reproducible for a given `seed`.
    pub fn new_random_with_seed(rows: usize, cols: usize, seed: u64) -> Result<Self> {
        let mut grid = Self::sorted(rows, cols)?;
        let mut rng = SmallRng::seed_from_u64(seed);
        grid.cells.shuffle(&mut rng);
        Ok(grid)
    }

    /// Creates a grid by applying `swaps` random legal swaps to the sorted grid.
    ///
    /// The result is at most `swaps` moves away from sorted.
    pub fn scrambled(rows: usize, cols: usize, swaps: usize, seed: u64) -> Result<Self> {
        let mut grid = Self::sorted(rows, cols)?;
        let moves = legal_moves(rows, cols);
        if moves.is_empty() {
            return Ok(grid);
        }
        let mut rng = SmallRng::seed_from_u64(seed);
        for _ in 0..swaps {
            let mv = moves[rng.gen_range(0..moves.len())];
            grid.swap_unchecked(mv);
        }
        Ok(grid)
    }

    /// Wraps cells already known to be a permutation of `1..=rows*cols`.
    pub(crate) fn from_permutation(rows: usize, cols: usize, cells: Vec<u32>) -> Self {
        debug_assert_eq!(cells.len(), rows * cols);
        GridState { rows, cols, cells }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of cells, `rows * cols`.
    pub fn size(&self) -> usize {
        self.cells.len()
    }

    /// The values in row-major order.
    pub fn cells(&self) -> &[u32] {
        &self.cells
    }

    /// Returns the value at row `r`, column `c`.
    ///
    /// # Panics
    /// Panics if `r` or `c` are outside the grid.
    pub fn get(&self, r: usize, c: usize) -> u32 {
        assert!(r < self.rows && c < self.cols, "cell ({}, {}) out of bounds", r, c);
        self.cells[r * self.cols + c]
    }

    /// The values of row `r`.
    pub fn row(&self, r: usize) -> &[u32] {
        &self.cells[r * self.cols..(r + 1) * self.cols]
    }

    /// Returns the current coordinates of `value`, if it is on the grid.
    pub fn position_of(&self, value: u32) -> Option<Cell> {
        self.cells
            .iter()
            .position(|&v| v == value)
            .map(|i| (i / self.cols, i % self.cols))
    }

    /// Returns the coordinates `value` occupies in the sorted grid.
    pub fn target_of(&self, value: u32) -> Cell {
        let i = value as usize - 1;
        (i / self.cols, i % self.cols)
    }

    /// Checks whether the grid is sorted.
    ///
    /// Every row must be non-decreasing left to right, and the last value of
    /// each row must not exceed the first value of the next row.
    pub fn is_sorted(&self) -> bool {
        let rows_ascending = (0..self.rows).all(|r| self.row(r).windows(2).all(|w| w[0] <= w[1]));
        let boundaries_ascending = (1..self.rows)
            .all(|r| self.get(r - 1, self.cols - 1) <= self.get(r, 0));
        rows_ascending && boundaries_ascending
    }

    /// All legal moves for this grid's shape. See [`legal_moves`].
    pub fn legal_moves(&self) -> Vec<Move> {
        legal_moves(self.rows, self.cols)
    }

    /// Returns the canonical key of this grid.
    pub fn canonical_key(&self) -> GridKey {
        GridKey {
            rows: self.rows,
            cells: self.cells.clone().into_boxed_slice(),
        }
    }

    /// Returns a new grid with the values of the two cells of `mv` exchanged.
    ///
    /// # Returns
    /// * `Ok(GridState)` with the swap applied; `self` is unchanged.
    /// * `Err(PuzzleError::IllegalMove)` if the cells are not 4-adjacent or
    ///   either lies outside the grid.
    ///
    /// # Examples
    /// ```
    /// use swap_puzzle::grid::{GridState, Move};
    /// let grid = GridState::new(2, 2, vec![2, 1, 3, 4]).unwrap();
    /// let next = grid.apply(Move::new((0, 0), (0, 1))).unwrap();
    /// assert!(next.is_sorted());
    /// assert!(!grid.is_sorted());
    /// ```
    pub fn apply(&self, mv: Move) -> Result<GridState> {
        let mut next = self.clone();
        next.swap_in_place(mv)?;
        Ok(next)
    }

    /// Applies `path` in order and returns the resulting grid.
    ///
    /// Stops at the first illegal move with `PuzzleError::IllegalMove`.
    pub fn apply_moves(&self, path: &[Move]) -> Result<GridState> {
        let mut next = self.clone();
        for &mv in path {
            next.swap_in_place(mv)?;
        }
        Ok(next)
    }

    /// Swaps the two cells of `mv` in place after validating it.
    ///
    /// Kept crate-private: outside callers only ever see immutable grids.
    pub(crate) fn swap_in_place(&mut self, mv: Move) -> Result<()> {
        if !mv.is_adjacent() || !mv.fits(self.rows, self.cols) {
            return Err(PuzzleError::IllegalMove { mv });
        }
        self.swap_unchecked(mv);
        Ok(())
    }

    fn swap_unchecked(&mut self, mv: Move) {
        let a = mv.from.0 * self.cols + mv.from.1;
        let b = mv.to.0 * self.cols + mv.to.1;
        self.cells.swap(a, b);
    }
}

impl fmt::Display for GridState {
    /// Formats the grid as right-aligned rows, one row per line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.size().to_string().len();
        for r in 0..self.rows {
            let line: Vec<String> = self
                .row(r)
                .iter()
                .map(|v| format!("{:>width$}", v, width = width))
                .collect();
            write!(f, "{}", line.join(" "))?;
            if r + 1 < self.rows {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

/// Preset puzzle sizes, matching the classic easy/medium/hard levels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Difficulty {
    /// 3x3 grid, 5 scramble swaps.
    Easy,
    /// 4x4 grid, 10 scramble swaps.
    Medium,
    /// 5x5 grid, 15 scramble swaps.
    Hard,
}

impl Difficulty {
    /// The `(rows, cols)` shape of the level.
    pub fn shape(&self) -> (usize, usize) {
        match self {
            Difficulty::Easy => (3, 3),
            Difficulty::Medium => (4, 4),
            Difficulty::Hard => (5, 5),
        }
    }

    /// How many random swaps scramble the sorted grid.
    pub fn scramble_swaps(&self) -> usize {
        match self {
            Difficulty::Easy => 5,
            Difficulty::Medium => 10,
            Difficulty::Hard => 15,
        }
    }

    /// Generates a reproducible puzzle for this level.
    pub fn generate(&self, seed: u64) -> Result<GridState> {
        let (rows, cols) = self.shape();
        GridState::scrambled(rows, cols, self.scramble_swaps(), seed)
    }
}
