//! Error types for the swap puzzle engine.

use crate::grid::Move;
use thiserror::Error;

/// Everything that can go wrong while building, moving or solving a grid.
///
/// Each variant is a distinct failure kind so callers can react differently,
/// e.g. reject a malformed puzzle file versus report a stuck search.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PuzzleError {
    /// Dimensions are zero or the values are not a permutation of `1..=rows*cols`.
    #[error("Invalid grid: {0}")]
    InvalidGrid(String),

    /// The two cells of a move are not 4-adjacent, or one lies outside the grid.
    #[error("Illegal move: {mv}")]
    IllegalMove { mv: Move },

    /// A search exhausted its frontier (or its budget) without reaching the sorted grid.
    #[error("No solution found after expanding {explored} states")]
    NoSolution { explored: usize },

    /// A solver postcondition was violated. Signals a defect, not bad input.
    #[error("Internal invariant violated: {0}")]
    InternalInvariant(String),

    /// The exhaustive solver refuses grids whose full state graph would be too large.
    #[error("Grid with {cells} cells exceeds the exhaustive search limit of {limit}")]
    InstanceTooLarge { cells: usize, limit: usize },
}

/// Result type alias for puzzle operations.
pub type Result<T> = std::result::Result<T, PuzzleError>;
