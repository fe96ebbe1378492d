//! An interactive play session over one grid.

use crate::constructive::solve_constructive;
use crate::error::Result;
use crate::grid::{GridState, Move};

/// Manages the state and progression of a swap puzzle session.
///
/// This struct holds the current grid, the number of swaps played, and a
/// history of earlier grids so moves can be undone.
///
/// # Examples
/// ```
/// use swap_puzzle::game::Game;
/// use swap_puzzle::grid::{GridState, Move};
/// let grid = GridState::new(2, 2, vec![2, 1, 3, 4]).unwrap();
/// let mut game = Game::new(grid);
///
/// game.play(Move::new((0, 0), (0, 1))).unwrap();
/// assert!(game.is_solved());
/// assert_eq!(game.swaps(), 1);
///
/// assert!(game.undo());
/// assert!(!game.is_solved());
/// ```
#[derive(Clone, Debug)]
pub struct Game {
    grid: GridState,
    swaps: u32,
    history: Vec<GridState>,
}

impl Game {
    /// Starts a session on `initial`. No swaps have been played yet.
    pub fn new(initial: GridState) -> Self {
        Game {
            grid: initial,
            swaps: 0,
            history: Vec::new(),
        }
    }

    /// Returns the current grid.
    pub fn grid(&self) -> &GridState {
        &self.grid
    }

    /// Returns how many swaps are currently applied (undone swaps don't count).
    pub fn swaps(&self) -> u32 {
        self.swaps
    }

    /// Plays one swap.
    ///
    /// On `Err(PuzzleError::IllegalMove)` the session is left unchanged.
    pub fn play(&mut self, mv: Move) -> Result<()> {
        let next = self.grid.apply(mv)?;
        self.history.push(std::mem::replace(&mut self.grid, next));
        self.swaps += 1;
        Ok(())
    }

    /// Undoes the last swap.
    ///
    /// # Returns
    /// * `true` if a swap was undone.
    /// * `false` if nothing has been played, meaning there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.history.pop() {
            Some(previous) => {
                self.grid = previous;
                self.swaps -= 1;
                true
            }
            None => false,
        }
    }

    pub fn is_solved(&self) -> bool {
        self.grid.is_sorted()
    }

    /// Suggests the next swap: the first move of a constructive solution
    /// from the current grid, or `None` when already solved.
    pub fn hint(&self) -> Result<Option<Move>> {
        Ok(solve_constructive(&self.grid)?.first().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PuzzleError;

    fn game(values: &[u32]) -> Game {
        Game::new(GridState::new(2, 2, values.to_vec()).unwrap())
    }

    #[test]
    fn test_illegal_move_leaves_game_unchanged() {
        let mut g = game(&[1, 3, 4, 2]);
        let mv = Move::new((0, 0), (1, 1));
        assert_eq!(g.play(mv), Err(PuzzleError::IllegalMove { mv }));
        assert_eq!(g.swaps(), 0);
        assert_eq!(g.grid().cells(), &[1, 3, 4, 2]);
        assert!(!g.undo());
    }

    #[test]
    fn test_undo_restores_each_step() {
        let mut g = game(&[1, 3, 4, 2]);
        g.play(Move::new((0, 1), (1, 1))).unwrap();
        g.play(Move::new((1, 0), (1, 1))).unwrap();
        assert!(g.is_solved());
        assert_eq!(g.swaps(), 2);

        assert!(g.undo());
        assert_eq!(g.grid().cells(), &[1, 2, 4, 3]);
        assert!(g.undo());
        assert_eq!(g.grid().cells(), &[1, 3, 4, 2]);
        assert_eq!(g.swaps(), 0);
        assert!(!g.undo());
    }

    #[test]
    fn test_following_hints_solves_the_grid() {
        let mut g = Game::new(GridState::new_random_with_seed(3, 4, 5).unwrap());
        let mut guard = 0;
        while let Some(mv) = g.hint().unwrap() {
            g.play(mv).unwrap();
            guard += 1;
            assert!(guard < 1000, "hints did not converge");
        }
        assert!(g.is_solved());
    }
}
