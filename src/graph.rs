//! Explicit state graph over every permutation of a grid shape.
//!
//! Nodes are all `(rows*cols)!` grids of the shape; each node has one edge per
//! legal move, leading to the grid with that swap applied. Since a swap undoes
//! itself the edge set is symmetric. Only usable for small shapes.
use crate::error::{PuzzleError, Result};
use crate::grid::{legal_moves, GridKey, GridState, Move};
use itertools::Itertools;
use std::collections::{HashMap, VecDeque};
use tracing::debug;

/// The full permutation graph of one grid shape.
///
/// `neighbors[node * moves.len() + k]` is the node reached from `node` by
/// `moves[k]`.
#[derive(Clone, Debug)]
pub struct StateGraph {
    rows: usize,
    cols: usize,
    nodes: Vec<GridState>,
    index: HashMap<GridKey, usize>,
    moves: Vec<Move>,
    neighbors: Vec<usize>,
}

impl StateGraph {
    /// Builds every node and edge of the `rows x cols` permutation graph.
    ///
    /// Cost grows factorially with `rows * cols`; callers are expected to
    /// bound the shape before building (the exhaustive solver does).
    pub fn build(rows: usize, cols: usize) -> Result<Self> {
        let size = GridState::sorted(rows, cols)?.size();
        let moves = legal_moves(rows, cols);

        // Permutations of a sorted range come out in lexicographic order.
        let nodes: Vec<GridState> = (1..=size as u32)
            .permutations(size)
            .map(|cells| GridState::from_permutation(rows, cols, cells))
            .collect();

        let index: HashMap<GridKey, usize> = nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (node.canonical_key(), i))
            .collect();

        let mut neighbors = Vec::with_capacity(nodes.len() * moves.len());
        for node in &nodes {
            for &mv in &moves {
                let next = node.apply(mv)?;
                let target = index.get(&next.canonical_key()).copied().ok_or_else(|| {
                    PuzzleError::InternalInvariant(format!(
                        "swap {} leaves the permutation set",
                        mv
                    ))
                })?;
                neighbors.push(target);
            }
        }

        debug!(
            rows,
            cols,
            nodes = nodes.len(),
            edges = neighbors.len(),
            "built state graph"
        );
        Ok(StateGraph {
            rows,
            cols,
            nodes,
            index,
            moves,
            neighbors,
        })
    }

    /// Every grid of the shape, in lexicographic order of their cells.
    pub fn nodes(&self) -> &[GridState] {
        &self.nodes
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of directed edges; each undirected swap is counted from both ends.
    pub fn edge_count(&self) -> usize {
        self.neighbors.len()
    }

    /// Iterates over every directed edge as `(from, to, move)` node indices.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize, Move)> + '_ {
        let width = self.moves.len();
        self.neighbors
            .iter()
            .enumerate()
            .map(move |(slot, &to)| (slot / width, to, self.moves[slot % width]))
    }

    /// Index of `grid` among the nodes, if it has this graph's shape.
    pub fn node_index(&self, grid: &GridState) -> Option<usize> {
        self.index.get(&grid.canonical_key()).copied()
    }

    fn require_index(&self, grid: &GridState) -> Result<usize> {
        self.node_index(grid).ok_or_else(|| {
            PuzzleError::InvalidGrid(format!(
                "a {}x{} grid is not a node of the {}x{} state graph",
                grid.rows(),
                grid.cols(),
                self.rows,
                self.cols
            ))
        })
    }

    /// Breadth-first search for a shortest swap sequence from `from` to `to`.
    ///
    /// # Returns
    /// * `Ok(path)` with the minimum number of swaps; empty when `from == to`.
    /// * `Err(PuzzleError::NoSolution)` if the frontier empties first.
    /// * `Err(PuzzleError::InvalidGrid)` if either grid has another shape.
    pub fn shortest_path(&self, from: &GridState, to: &GridState) -> Result<Vec<Move>> {
        let start = self.require_index(from)?;
        let goal = self.require_index(to)?;
        let width = self.moves.len();

        // parent[n] = (previous node, index of the move taken)
        let mut parent: Vec<Option<(usize, usize)>> = vec![None; self.nodes.len()];
        let mut seen = vec![false; self.nodes.len()];
        let mut queue = VecDeque::new();
        seen[start] = true;
        queue.push_back(start);
        let mut explored = 0;

        while let Some(node) = queue.pop_front() {
            explored += 1;
            if node == goal {
                let mut path = Vec::new();
                let mut current = node;
                while let Some((prev, k)) = parent[current] {
                    path.push(self.moves[k]);
                    current = prev;
                }
                path.reverse();
                return Ok(path);
            }
            for k in 0..width {
                let next = self.neighbors[node * width + k];
                if !seen[next] {
                    seen[next] = true;
                    parent[next] = Some((node, k));
                    queue.push_back(next);
                }
            }
        }
        Err(PuzzleError::NoSolution { explored })
    }

    /// Breadth-first distances from `origin` to every node, aligned with [`nodes`](Self::nodes).
    ///
    /// `None` marks an unreachable node. Since the edge set is symmetric this is
    /// also the distance from every node back to `origin`.
    pub fn distances_from(&self, origin: &GridState) -> Result<Vec<Option<usize>>> {
        let start = self.require_index(origin)?;
        let width = self.moves.len();
        let mut distances = vec![None; self.nodes.len()];
        let mut queue = VecDeque::new();
        distances[start] = Some(0);
        queue.push_back(start);

        while let Some(node) = queue.pop_front() {
            let d = distances[node].unwrap_or_default();
            for &next in &self.neighbors[node * width..(node + 1) * width] {
                if distances[next].is_none() {
                    distances[next] = Some(d + 1);
                    queue.push_back(next);
                }
            }
        }
        Ok(distances)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_nodes_are_in_lexicographic_order() {
        let graph = StateGraph::build(2, 2).unwrap();
        let nodes = graph.nodes();
        assert!(nodes.windows(2).all(|w| w[0].cells() < w[1].cells()));
        assert!(nodes[0].is_sorted());
        assert_eq!(nodes[nodes.len() - 1].cells(), &[4, 3, 2, 1]);
        assert_eq!(graph.node_index(&nodes[5]), Some(5));
    }

    #[test]
    fn test_node_and_edge_counts() {
        let graph = StateGraph::build(2, 3).unwrap();
        assert_eq!(graph.node_count(), 720);
        assert_eq!(graph.edge_count(), 720 * 7);
        let single = StateGraph::build(1, 1).unwrap();
        assert_eq!(single.node_count(), 1);
        assert_eq!(single.edge_count(), 0);
    }

    #[test]
    fn test_edges_are_symmetric() {
        let graph = StateGraph::build(2, 2).unwrap();
        let edges: HashSet<(usize, usize)> = graph.edges().map(|(a, b, _)| (a, b)).collect();
        for &(a, b) in &edges {
            assert_ne!(a, b);
            assert!(edges.contains(&(b, a)), "missing reverse edge {} -> {}", b, a);
        }
    }

    #[test]
    fn test_edges_apply_their_move() {
        let graph = StateGraph::build(2, 2).unwrap();
        for (from, to, mv) in graph.edges() {
            assert_eq!(graph.nodes()[from].apply(mv).unwrap(), graph.nodes()[to]);
        }
    }

    #[test]
    fn test_shortest_path_known_instance() {
        let graph = StateGraph::build(2, 2).unwrap();
        let start = GridState::new(2, 2, vec![1, 3, 4, 2]).unwrap();
        let goal = GridState::sorted(2, 2).unwrap();
        let path = graph.shortest_path(&start, &goal).unwrap();
        assert_eq!(path.len(), 2);
        assert!(start.apply_moves(&path).unwrap().is_sorted());
    }

    #[test]
    fn test_shape_mismatch_is_invalid_grid() {
        let graph = StateGraph::build(2, 2).unwrap();
        let other = GridState::sorted(1, 4).unwrap();
        assert!(matches!(
            graph.shortest_path(&other, &other),
            Err(PuzzleError::InvalidGrid(_))
        ));
    }

    #[test]
    fn test_distances_agree_with_shortest_path() {
        let graph = StateGraph::build(2, 2).unwrap();
        let sorted = GridState::sorted(2, 2).unwrap();
        let distances = graph.distances_from(&sorted).unwrap();
        assert_eq!(distances.iter().flatten().max(), Some(&4));
        for (node, dist) in graph.nodes().iter().zip(distances) {
            let path = graph.shortest_path(node, &sorted).unwrap();
            assert_eq!(Some(path.len()), dist);
        }
    }
}
