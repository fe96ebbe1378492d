//! Reading grids from their text form.

use crate::error::{PuzzleError, Result};
use crate::grid::{cell_count, GridState};

/// Parses a grid from its text form.
///
/// The first non-empty line holds the dimensions `m n`. The next `m` non-empty
/// lines each hold `n` whitespace-separated integers, the values of one row.
///
/// # Returns
/// * `Ok(GridState)` if parsing succeeds and the values form a permutation of
///   `1..=m*n`.
/// * `Err(PuzzleError::InvalidGrid)` if:
///     - The header is missing or does not hold exactly two integers.
///     - The number of rows, or the length of any row, does not match the header.
///     - A cell is not an integer.
///     - The values are not a permutation.
///
/// # Examples
/// ```
/// use swap_puzzle::utils::grid_from_str;
///
/// let grid = grid_from_str("2 3\n1 4 6\n2 3 5\n").unwrap();
/// assert_eq!(grid.rows(), 2);
/// assert_eq!(grid.get(0, 2), 6);
///
/// assert!(grid_from_str("2 2\n1 2\n3 x\n").is_err());
/// ```
pub fn grid_from_str(s: &str) -> Result<GridState> {
    let mut lines = s.lines().map(str::trim).filter(|line| !line.is_empty());

    let header = lines
        .next()
        .ok_or_else(|| PuzzleError::InvalidGrid("missing \"rows cols\" header".to_string()))?;
    let dims = parse_numbers(header, 0)?;
    let (rows, cols) = match dims.as_slice() {
        &[rows, cols] => (rows as usize, cols as usize),
        _ => {
            return Err(PuzzleError::InvalidGrid(format!(
                "header must hold two integers, found {:?}",
                header
            )))
        }
    };

    // The header alone must describe a grid whose cells can be numbered.
    cell_count(rows, cols)?;

    let mut grid_rows = Vec::new();
    for r in 0..rows {
        let line = lines.next().ok_or_else(|| {
            PuzzleError::InvalidGrid(format!("expected {} rows, found {}", rows, r))
        })?;
        let row = parse_numbers(line, r + 1)?;
        if row.len() != cols {
            return Err(PuzzleError::InvalidGrid(format!(
                "row {} has {} values, expected {}",
                r,
                row.len(),
                cols
            )));
        }
        grid_rows.push(row);
    }
    if lines.next().is_some() {
        return Err(PuzzleError::InvalidGrid(format!(
            "more than {} rows supplied",
            rows
        )));
    }

    GridState::from_rows(&grid_rows)
}

fn parse_numbers(line: &str, line_no: usize) -> Result<Vec<u32>> {
    line.split_whitespace()
        .map(|token| {
            token.parse::<u32>().map_err(|_| {
                PuzzleError::InvalidGrid(format!(
                    "unrecognized value '{}' on line {}",
                    token, line_no
                ))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_from_str_valid() {
        let grid = grid_from_str("2 2\n1 3\n4 2").unwrap();
        assert_eq!(grid.cells(), &[1, 3, 4, 2]);
    }

    #[test]
    fn test_grid_from_str_tolerates_blank_lines_and_padding() {
        let grid = grid_from_str("\n  3 1 \n\n 3\n1\n  2 \n\n").unwrap();
        assert_eq!((grid.rows(), grid.cols()), (3, 1));
        assert_eq!(grid.cells(), &[3, 1, 2]);
    }

    #[test]
    fn test_grid_from_str_bad_header() {
        assert!(grid_from_str("").is_err());
        assert!(grid_from_str("2\n1 2").is_err());
        assert!(grid_from_str("2 2 2\n1 2\n3 4").is_err());
    }

    #[test]
    fn test_grid_from_str_wrong_shape() {
        let err = grid_from_str("2 2\n1 2 3\n4").unwrap_err();
        assert!(err.to_string().contains("row 0 has 3 values"));
        assert!(grid_from_str("2 2\n1 2").is_err());
        assert!(grid_from_str("1 2\n1 2\n3 4").is_err());
    }

    #[test]
    fn test_grid_from_str_oversized_header() {
        let err = grid_from_str("4000000000 4000000000\n1\n").unwrap_err();
        assert!(err.to_string().contains("too large"));
        assert!(matches!(
            grid_from_str("4294967295 2\n1 2\n"),
            Err(PuzzleError::InvalidGrid(_))
        ));
    }

    #[test]
    fn test_grid_from_str_non_integer() {
        let err = grid_from_str("1 2\n1 -2").unwrap_err();
        assert!(err.to_string().contains("unrecognized value '-2'"));
    }

    #[test]
    fn test_grid_from_str_not_a_permutation() {
        assert!(matches!(
            grid_from_str("2 2\n1 1\n3 4"),
            Err(PuzzleError::InvalidGrid(_))
        ));
    }
}
