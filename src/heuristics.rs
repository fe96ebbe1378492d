//! Admissible lower bounds on the swaps still needed to sort a grid.

use crate::grid::GridState;

/// Lower bound on the remaining swaps: misplaced cells divided by two.
///
/// A cell is misplaced if its value differs from the one the sorted grid holds
/// there. A single swap touches two cells, so it fixes at most two misplaced
/// cells; halving the count keeps the estimate admissible. The result may be
/// fractional and is compared as a real number.
///
/// # Examples
/// ```
/// use swap_puzzle::grid::GridState;
/// use swap_puzzle::heuristics::misplaced_count;
/// let grid = GridState::new(2, 2, vec![1, 3, 4, 2]).unwrap();
/// assert_eq!(misplaced_count(&grid), 1.5);
/// ```
pub fn misplaced_count(grid: &GridState) -> f64 {
    let misplaced = grid
        .cells()
        .iter()
        .enumerate()
        .filter(|&(i, &v)| v as usize != i + 1)
        .count();
    misplaced as f64 / 2.0
}

/// Lower bound on the remaining swaps: total Manhattan distance divided by two.
///
/// For every value, the distance between its current cell and its sorted cell
/// is summed. A swap moves two values by one cell each, so it lowers the sum by
/// at most 2. Never smaller than [`misplaced_count`], since every misplaced
/// value is at least one cell away from home.
pub fn manhattan_sum(grid: &GridState) -> f64 {
    let cols = grid.cols();
    let total: usize = grid
        .cells()
        .iter()
        .enumerate()
        .map(|(i, &v)| {
            let (r, c) = (i / cols, i % cols);
            let (tr, tc) = grid.target_of(v);
            r.abs_diff(tr) + c.abs_diff(tc)
        })
        .sum();
    total as f64 / 2.0
}

/// Always zero. Turns heuristic search into uniform-cost (breadth-first) search.
pub fn zero(_grid: &GridState) -> f64 {
    0.0
}

/// Named selector over the built-in heuristics.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeuristicKind {
    Zero,
    Misplaced,
    Manhattan,
}

impl HeuristicKind {
    pub fn name(&self) -> &'static str {
        match self {
            HeuristicKind::Zero => "zero",
            HeuristicKind::Misplaced => "misplaced",
            HeuristicKind::Manhattan => "manhattan",
        }
    }

    /// The estimator function behind this kind.
    pub fn function(&self) -> fn(&GridState) -> f64 {
        match self {
            HeuristicKind::Zero => zero,
            HeuristicKind::Misplaced => misplaced_count,
            HeuristicKind::Manhattan => manhattan_sum,
        }
    }

    pub fn estimate(&self, grid: &GridState) -> f64 {
        (self.function())(grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::StateGraph;

    #[test]
    fn test_sorted_grid_scores_zero() {
        let g = GridState::sorted(3, 4).unwrap();
        assert_eq!(misplaced_count(&g), 0.0);
        assert_eq!(manhattan_sum(&g), 0.0);
    }

    #[test]
    fn test_known_values() {
        let g = GridState::new(2, 3, vec![1, 4, 6, 2, 3, 5]).unwrap();
        // Misplaced: 4, 6, 2, 3, 5.
        assert_eq!(misplaced_count(&g), 2.5);
        // 4: 2, 6: 1, 2: 2, 3: 2, 5: 1.
        assert_eq!(manhattan_sum(&g), 4.0);
    }

    #[test]
    fn test_single_swap_bound_is_tight() {
        let g = GridState::new(1, 3, vec![2, 1, 3]).unwrap();
        assert_eq!(misplaced_count(&g), 1.0);
        assert_eq!(manhattan_sum(&g), 1.0);
    }

    #[test]
    fn test_heuristic_kind_dispatch() {
        let g = GridState::new(2, 2, vec![4, 3, 2, 1]).unwrap();
        assert_eq!(HeuristicKind::Zero.estimate(&g), 0.0);
        assert_eq!(HeuristicKind::Misplaced.estimate(&g), misplaced_count(&g));
        assert_eq!(HeuristicKind::Manhattan.estimate(&g), manhattan_sum(&g));
        assert_eq!(HeuristicKind::Manhattan.name(), "manhattan");
    }

    /// Checks both bounds against the true BFS distance of every permutation.
    fn assert_admissible_for_shape(rows: usize, cols: usize) {
        let graph = StateGraph::build(rows, cols).unwrap();
        let distances = graph
            .distances_from(&GridState::sorted(rows, cols).unwrap())
            .unwrap();
        for (grid, dist) in graph.nodes().iter().zip(distances) {
            let dist = dist.expect("every permutation is reachable") as f64;
            let misplaced = misplaced_count(grid);
            let manhattan = manhattan_sum(grid);
            assert!(misplaced <= dist, "misplaced {} > {} for\n{}", misplaced, dist, grid);
            assert!(manhattan <= dist, "manhattan {} > {} for\n{}", manhattan, dist, grid);
            assert!(misplaced <= manhattan);
        }
    }

    #[test]
    fn test_admissible_on_all_2x2() {
        assert_admissible_for_shape(2, 2);
    }

    #[test]
    fn test_admissible_on_all_2x3_and_3x2() {
        assert_admissible_for_shape(2, 3);
        assert_admissible_for_shape(3, 2);
    }
}
