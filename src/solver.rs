//! Shortest-path solvers for the swap puzzle.
//!
//! Two searches are provided, both returning a minimum-length swap sequence:
//! - `ExhaustiveGraphSolver` builds the whole permutation graph and runs a
//!   breadth-first search. Ground truth for small grids.
//! - `HeuristicSearch` runs a best-first (A*) search over the implicit graph,
//!   guided by an admissible lower bound from `heuristics`.
use crate::error::{PuzzleError, Result};
use crate::graph::StateGraph;
use crate::grid::{GridKey, GridState, Move};
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};
use tracing::debug;

/// An ordered sequence of swaps. Its length is the number of swaps performed.
pub type Path = Vec<Move>;

/// Largest grid, in cells, the exhaustive solver accepts by default (a 3x3 grid
/// has 362 880 states).
pub const DEFAULT_MAX_EXHAUSTIVE_CELLS: usize = 9;

/// Resource bounds for the search solvers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchLimits {
    /// Maximum number of states the heuristic search may expand. `None` means unbounded.
    pub max_expansions: Option<usize>,
    /// Largest `rows * cols` the exhaustive solver will build a graph for.
    pub max_cells: usize,
}

impl Default for SearchLimits {
    fn default() -> Self {
        SearchLimits {
            max_expansions: None,
            max_cells: DEFAULT_MAX_EXHAUSTIVE_CELLS,
        }
    }
}

/// Represents a solution found by one of the search solvers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Solution {
    /// The swaps, in the order they must be applied.
    pub moves: Path,
    /// States examined: expansions for the heuristic search, graph nodes for
    /// the exhaustive search.
    pub explored: usize,
}

/// Breadth-first search over the explicit state graph.
#[derive(Clone, Copy, Debug)]
pub struct ExhaustiveGraphSolver {
    max_cells: usize,
}

impl ExhaustiveGraphSolver {
    pub fn new(limits: &SearchLimits) -> Self {
        ExhaustiveGraphSolver {
            max_cells: limits.max_cells,
        }
    }

    /// Finds a provably shortest path from `grid` to the sorted grid.
    ///
    /// A fresh `StateGraph` is built for every call.
    ///
    /// # Returns
    /// * `Err(PuzzleError::InstanceTooLarge)` if `grid` has more cells than the limit.
    /// * `Err(PuzzleError::NoSolution)` if BFS exhausts the graph without reaching
    ///   the sorted grid.
    pub fn solve(&self, grid: &GridState) -> Result<Solution> {
        if grid.size() > self.max_cells {
            return Err(PuzzleError::InstanceTooLarge {
                cells: grid.size(),
                limit: self.max_cells,
            });
        }
        let graph = StateGraph::build(grid.rows(), grid.cols())?;
        let goal = GridState::sorted(grid.rows(), grid.cols())?;
        let moves = graph.shortest_path(grid, &goal)?;
        debug!(
            rows = grid.rows(),
            cols = grid.cols(),
            length = moves.len(),
            "exhaustive search finished"
        );
        Ok(Solution {
            moves,
            explored: graph.node_count(),
        })
    }
}

/// Frontier entry of the heuristic search.
struct SearchNode {
    f_score: f64,
    g_score: usize,
    sequence: u64,
    state: GridState,
    path: Path,
}

impl PartialEq for SearchNode {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SearchNode {}

impl PartialOrd for SearchNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Reversed so that `BinaryHeap` pops the lowest `f_score` first, then the
/// lowest `g_score`, then the earliest insertion.
impl Ord for SearchNode {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f_score
            .total_cmp(&self.f_score)
            .then_with(|| other.g_score.cmp(&self.g_score))
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

/// Best-first search keyed by `g + heuristic`.
///
/// The heuristic must never overestimate the remaining number of swaps for the
/// returned path to be minimal; both estimators in `heuristics` satisfy this.
#[derive(Clone, Copy, Debug)]
pub struct HeuristicSearch<H> {
    heuristic: H,
    max_expansions: Option<usize>,
}

impl<H> HeuristicSearch<H>
where
    H: Fn(&GridState) -> f64,
{
    pub fn new(heuristic: H, limits: &SearchLimits) -> Self {
        HeuristicSearch {
            heuristic,
            max_expansions: limits.max_expansions,
        }
    }

    /// Searches for a shortest path from `grid` to the sorted grid.
    ///
    /// A state is re-queued only when a strictly shorter path to it is found.
    /// Exceeding the expansion budget is reported as `PuzzleError::NoSolution`.
    pub fn solve(&self, grid: &GridState) -> Result<Solution> {
        let moves = grid.legal_moves();
        let mut frontier = BinaryHeap::new();
        let mut best_g: HashMap<GridKey, usize> = HashMap::new();
        let mut sequence = 0u64;
        let mut explored = 0usize;

        best_g.insert(grid.canonical_key(), 0);
        frontier.push(SearchNode {
            f_score: (self.heuristic)(grid),
            g_score: 0,
            sequence,
            state: grid.clone(),
            path: Vec::new(),
        });

        while let Some(node) = frontier.pop() {
            let key = node.state.canonical_key();
            if best_g.get(&key).is_some_and(|&g| g < node.g_score) {
                continue;
            }
            if node.state.is_sorted() {
                debug!(
                    rows = grid.rows(),
                    cols = grid.cols(),
                    length = node.path.len(),
                    explored,
                    "heuristic search finished"
                );
                return Ok(Solution {
                    moves: node.path,
                    explored,
                });
            }
            if self.max_expansions.is_some_and(|limit| explored >= limit) {
                debug!(explored, "heuristic search budget exhausted");
                return Err(PuzzleError::NoSolution { explored });
            }
            explored += 1;

            let g_next = node.g_score + 1;
            for &mv in &moves {
                let next = node.state.apply(mv)?;
                let next_key = next.canonical_key();
                if best_g.get(&next_key).is_some_and(|&g| g <= g_next) {
                    continue;
                }
                best_g.insert(next_key, g_next);
                let mut path = node.path.clone();
                path.push(mv);
                sequence += 1;
                frontier.push(SearchNode {
                    f_score: g_next as f64 + (self.heuristic)(&next),
                    g_score: g_next,
                    sequence,
                    state: next,
                    path,
                });
            }
        }

        Err(PuzzleError::NoSolution { explored })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constructive::solve_constructive;
    use crate::heuristics::{manhattan_sum, misplaced_count, zero};

    fn grid(rows: usize, cols: usize, values: &[u32]) -> GridState {
        GridState::new(rows, cols, values.to_vec()).unwrap()
    }

    fn exhaustive() -> ExhaustiveGraphSolver {
        ExhaustiveGraphSolver::new(&SearchLimits::default())
    }

    #[test]
    fn test_sorted_grid_needs_no_moves() {
        let g = GridState::sorted(2, 2).unwrap();
        assert!(exhaustive().solve(&g).unwrap().moves.is_empty());
        let search = HeuristicSearch::new(manhattan_sum, &SearchLimits::default());
        assert!(search.solve(&g).unwrap().moves.is_empty());
    }

    #[test]
    fn test_two_by_two_requires_two_swaps() {
        let g = grid(2, 2, &[1, 3, 4, 2]);
        let solution = exhaustive().solve(&g).unwrap();
        assert_eq!(solution.moves.len(), 2);
        assert!(g.apply_moves(&solution.moves).unwrap().is_sorted());
    }

    #[test]
    fn test_two_by_three_reference_instance() {
        let g = grid(2, 3, &[1, 4, 6, 2, 3, 5]);
        let solution = exhaustive().solve(&g).unwrap();
        assert_eq!(solution.moves.len(), 5);
        assert!(g.apply_moves(&solution.moves).unwrap().is_sorted());

        let search = HeuristicSearch::new(manhattan_sum, &SearchLimits::default());
        assert_eq!(search.solve(&g).unwrap().moves.len(), 5);
    }

    #[test]
    fn test_exhaustive_rejects_large_grids() {
        let g = GridState::sorted(2, 5).unwrap();
        assert_eq!(
            exhaustive().solve(&g),
            Err(PuzzleError::InstanceTooLarge { cells: 10, limit: 9 })
        );
    }

    #[test]
    fn test_budget_exhaustion_is_no_solution() {
        let g = grid(2, 3, &[6, 5, 4, 3, 2, 1]);
        let limits = SearchLimits {
            max_expansions: Some(3),
            ..SearchLimits::default()
        };
        let search = HeuristicSearch::new(manhattan_sum, &limits);
        assert_eq!(search.solve(&g), Err(PuzzleError::NoSolution { explored: 3 }));

        let none = SearchLimits {
            max_expansions: Some(0),
            ..SearchLimits::default()
        };
        let search = HeuristicSearch::new(zero, &none);
        assert_eq!(search.solve(&g), Err(PuzzleError::NoSolution { explored: 0 }));
    }

    #[test]
    fn test_search_is_deterministic() {
        let g = grid(2, 3, &[4, 1, 6, 5, 2, 3]);
        let search = HeuristicSearch::new(misplaced_count, &SearchLimits::default());
        assert_eq!(search.solve(&g).unwrap(), search.solve(&g).unwrap());
    }

    #[test]
    fn test_frontier_order() {
        let node = |f_score: f64, g_score: usize, sequence: u64| SearchNode {
            f_score,
            g_score,
            sequence,
            state: GridState::sorted(1, 1).unwrap(),
            path: Vec::new(),
        };
        let mut heap = BinaryHeap::new();
        heap.push(node(3.0, 1, 0));
        heap.push(node(2.5, 2, 1));
        heap.push(node(2.5, 1, 2));
        heap.push(node(2.5, 1, 3));
        let order: Vec<u64> = std::iter::from_fn(|| heap.pop()).map(|n| n.sequence).collect();
        assert_eq!(order, vec![2, 3, 1, 0]);
    }

    /// Compares every solver against BFS on every permutation of the shape.
    fn assert_solvers_agree_for_shape(rows: usize, cols: usize) {
        let graph = StateGraph::build(rows, cols).unwrap();
        let sorted = GridState::sorted(rows, cols).unwrap();
        let distances = graph.distances_from(&sorted).unwrap();
        let limits = SearchLimits::default();
        let by_manhattan = HeuristicSearch::new(manhattan_sum, &limits);
        let by_misplaced = HeuristicSearch::new(misplaced_count, &limits);

        for (g, dist) in graph.nodes().iter().zip(distances) {
            let optimal = dist.unwrap();
            let manhattan_path = by_manhattan.solve(g).unwrap().moves;
            assert_eq!(manhattan_path.len(), optimal, "manhattan on\n{}", g);
            assert!(g.apply_moves(&manhattan_path).unwrap().is_sorted());

            let misplaced_path = by_misplaced.solve(g).unwrap().moves;
            assert_eq!(misplaced_path.len(), optimal, "misplaced on\n{}", g);

            let constructive = solve_constructive(g).unwrap();
            assert!(constructive.len() >= optimal);
            assert!(g.apply_moves(&constructive).unwrap().is_sorted());
        }
    }

    #[test]
    fn test_optimality_on_all_2x2() {
        assert_solvers_agree_for_shape(2, 2);
    }

    #[test]
    fn test_optimality_on_all_2x3_and_3x2() {
        assert_solvers_agree_for_shape(2, 3);
        assert_solvers_agree_for_shape(3, 2);
    }

    #[test]
    fn test_exhaustive_matches_distance_table() {
        let graph = StateGraph::build(2, 2).unwrap();
        let distances = graph
            .distances_from(&GridState::sorted(2, 2).unwrap())
            .unwrap();
        for (g, dist) in graph.nodes().iter().zip(distances) {
            assert_eq!(Some(exhaustive().solve(g).unwrap().moves.len()), dist);
        }
    }
}
