//! Backtracking search for MED decompositions
//!
//! Vertices are processed in a fixed order (DFS preorder by default). At each
//! vertex the assigned slots determine a short list of legal completions.
//! Each completion is placed, checked against the far endpoints of the
//! vertex's edges, and recursed into; the placement is undone before the next
//! one is tried. Leaves of the search run the cycle-parity and double-star
//! checks, which cannot be decided locally.

use super::edge_type::{Decomposition, EdgeType, TypeTally, VertexConfig};
use super::validator::{check_cycles, check_double_stars};
use crate::graph::{CubicGraph, Traversal, Vertex};
use std::time::{Duration, Instant};
use tracing::debug;

/// Whether the search stops at the first decomposition or counts all of them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    Decide,
    Count,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SearchOutcome {
    Found,
    Exhausted,
}

/// Counters collected during one search
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchStatistics {
    pub nodes: u64,
    pub leaves: u64,
    pub solutions: u64,
    pub elapsed: Duration,
}

/// Types for the free slots of a vertex, in slot order
type Completion = Vec<EdgeType>;

struct Search<'g> {
    graph: &'g CubicGraph,
    order: Vec<Vertex>,
    types: Decomposition,
    mode: SearchMode,
    statistics: SearchStatistics,
}

impl<'g> Search<'g> {
    fn new(graph: &'g CubicGraph, traversal: Traversal, mode: SearchMode) -> Self {
        Self {
            graph,
            order: graph.search_order(traversal),
            types: Decomposition::empty(graph.vertex_count()),
            mode,
            statistics: SearchStatistics::default(),
        }
    }

    fn run(mut self) -> (Option<Decomposition>, SearchStatistics) {
        let start = Instant::now();
        let outcome = self.descend(0);
        self.statistics.elapsed = start.elapsed();

        let witness = match outcome {
            SearchOutcome::Found => Some(self.types),
            SearchOutcome::Exhausted => None,
        };
        (witness, self.statistics)
    }

    fn descend(&mut self, index: usize) -> SearchOutcome {
        self.statistics.nodes += 1;

        if index == self.order.len() {
            self.statistics.leaves += 1;
            if check_cycles(self.graph, &self.types) && check_double_stars(self.graph, &self.types) {
                self.statistics.solutions += 1;
                if self.mode == SearchMode::Decide {
                    return SearchOutcome::Found;
                }
            }
            return SearchOutcome::Exhausted;
        }

        let v = self.order[index];
        let free: Vec<usize> = (0..3).filter(|&i| !self.types.get(v, i).is_assigned()).collect();

        for completion in completions(&self.types.tally(v)) {
            for (&slot, &edge_type) in free.iter().zip(&completion) {
                self.types.assign(self.graph, v, slot, edge_type);
            }

            if self.far_sides_fit(v) && self.descend(index + 1) == SearchOutcome::Found {
                return SearchOutcome::Found;
            }

            for &slot in &free {
                self.types.unassign(self.graph, v, slot);
            }
        }

        SearchOutcome::Exhausted
    }

    /// Check every edge at the fully assigned vertex `v` against its far endpoint
    fn far_sides_fit(&self, v: Vertex) -> bool {
        let Some(config) = self.types.tally(v).config() else {
            return false;
        };

        (0..3).all(|i| {
            let far = self.types.tally(self.graph.neighbor(v, i));
            if !far.fits_any() {
                return false;
            }
            match self.types.get(v, i) {
                EdgeType::Matching => far.fits(VertexConfig::Matched),
                EdgeType::StarCenter => far.fits(VertexConfig::Center),
                EdgeType::StarLeaf if config == VertexConfig::Center => far.fits(VertexConfig::Leaf),
                EdgeType::StarLeaf => far.fits(VertexConfig::Center),
                // double-stars must not touch
                EdgeType::Cycle if config == VertexConfig::Leaf => far.fits(VertexConfig::Matched),
                EdgeType::Cycle => true,
                EdgeType::None => false,
            }
        })
    }
}

/// Legal ways to fill the free slots of a vertex given what is already assigned
fn completions(tally: &TypeTally) -> Vec<Completion> {
    use super::edge_type::EdgeType::{Cycle as C, Matching as M, StarCenter as S, StarLeaf as L};

    match (tally.unassigned, tally.matching, tally.cycle, tally.leaf, tally.center) {
        (0, ..) => {
            if tally.config().is_some() {
                vec![Vec::new()]
            } else {
                Vec::new()
            }
        }
        // first vertex of a component: every rotation of every configuration
        (3, ..) => VertexConfig::ALL
            .iter()
            .flat_map(|config| {
                let types = config.edge_types();
                (0..3).map(move |r| vec![types[r], types[(r + 1) % 3], types[(r + 2) % 3]])
            })
            .collect(),
        (2, 1, 0, 0, 0) => vec![vec![C, C]],
        (1, 0, 2, 0, 0) => vec![vec![M], vec![L]],
        (2, 0, 1, 0, 0) => vec![vec![C, M], vec![C, L], vec![M, C], vec![L, C]],
        (u, 0, 0, l, 1) if u + l == 2 => vec![vec![L; u as usize]],
        (1, 0, 0, 2, 0) => vec![vec![S]],
        (2, 0, 0, 1, 0) => vec![vec![C, C], vec![L, S], vec![S, L]],
        (1, 1, 1, 0, 0) | (1, 0, 1, 1, 0) => vec![vec![C]],
        _ => Vec::new(),
    }
}

/// Backtracking engine for one graph.
///
/// Results are computed on first request and cached.
pub struct BacktrackingDecomposer<'g> {
    graph: &'g CubicGraph,
    traversal: Traversal,
    witness: Option<Option<Decomposition>>,
    count: Option<u64>,
    statistics: SearchStatistics,
}

impl<'g> BacktrackingDecomposer<'g> {
    pub fn new(graph: &'g CubicGraph) -> Self {
        Self::with_traversal(graph, Traversal::Dfs)
    }

    pub fn with_traversal(graph: &'g CubicGraph, traversal: Traversal) -> Self {
        Self {
            graph,
            traversal,
            witness: None,
            count: None,
            statistics: SearchStatistics::default(),
        }
    }

    fn decide(&mut self) -> Option<&Decomposition> {
        if self.witness.is_none() {
            let (witness, statistics) = Search::new(self.graph, self.traversal, SearchMode::Decide).run();
            debug!(
                "Backtracking decision: {} nodes, {} leaves, {:.2?}",
                statistics.nodes, statistics.leaves, statistics.elapsed
            );
            self.statistics = statistics;
            self.witness = Some(witness);
        }
        self.witness.as_ref().and_then(|w| w.as_ref())
    }

    pub fn is_decomposable(&mut self) -> bool {
        self.decide().is_some()
    }

    /// The first decomposition found, or an all-`None` table if there is none
    pub fn decomposition(&mut self) -> Decomposition {
        let n = self.graph.vertex_count();
        self.decide().cloned().unwrap_or_else(|| Decomposition::empty(n))
    }

    /// Number of distinct decompositions, by exhaustive search
    pub fn decompositions_count(&mut self) -> u64 {
        if let Some(count) = self.count {
            return count;
        }

        let (_, statistics) = Search::new(self.graph, self.traversal, SearchMode::Count).run();
        debug!(
            "Backtracking count: {} decompositions, {} nodes, {:.2?}",
            statistics.solutions, statistics.nodes, statistics.elapsed
        );
        self.statistics = statistics;
        self.count = Some(statistics.solutions);
        statistics.solutions
    }

    /// Counters from the most recent search
    pub fn statistics(&self) -> SearchStatistics {
        self.statistics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decomposition::validator::DecompositionValidator;
    use crate::graph::catalog;

    #[test]
    fn test_completion_table() {
        use crate::decomposition::edge_type::EdgeType::{Cycle as C, Matching as M, StarCenter as S, StarLeaf as L};
        let of = |types: &[EdgeType]| completions(&TypeTally::of(types));

        assert_eq!(of(&[EdgeType::None; 3]).len(), 9);
        assert_eq!(of(&[M, EdgeType::None, EdgeType::None]), vec![vec![C, C]]);
        assert_eq!(of(&[C, C, EdgeType::None]), vec![vec![M], vec![L]]);
        assert_eq!(of(&[EdgeType::None, C, EdgeType::None]).len(), 4);
        assert_eq!(of(&[S, EdgeType::None, EdgeType::None]), vec![vec![L, L]]);
        assert_eq!(of(&[S, L, EdgeType::None]), vec![vec![L]]);
        assert_eq!(of(&[L, L, EdgeType::None]), vec![vec![S]]);
        assert_eq!(of(&[L, EdgeType::None, EdgeType::None]).len(), 3);
        assert_eq!(of(&[M, C, EdgeType::None]), vec![vec![C]]);
        assert_eq!(of(&[L, C, EdgeType::None]), vec![vec![C]]);
        assert_eq!(of(&[M, C, C]), vec![Vec::<EdgeType>::new()]);
    }

    #[test]
    fn test_contradictions_have_no_completion() {
        use crate::decomposition::edge_type::EdgeType::{Cycle as C, Matching as M, StarCenter as S, StarLeaf as L};
        let of = |types: &[EdgeType]| completions(&TypeTally::of(types));

        assert!(of(&[M, M, EdgeType::None]).is_empty());
        assert!(of(&[C, C, C]).is_empty());
        assert!(of(&[S, S, EdgeType::None]).is_empty());
        assert!(of(&[S, C, EdgeType::None]).is_empty());
        assert!(of(&[M, L, EdgeType::None]).is_empty());
        assert!(of(&[L, L, L]).is_empty());
    }

    #[test]
    fn test_small_graphs() {
        let graph = catalog::k4();
        let mut decomposer = BacktrackingDecomposer::new(&graph);
        assert!(decomposer.is_decomposable());
        assert_eq!(decomposer.decompositions_count(), 3);

        let graph = catalog::k33();
        assert_eq!(BacktrackingDecomposer::new(&graph).decompositions_count(), 6);

        let graph = catalog::prism();
        assert_eq!(BacktrackingDecomposer::new(&graph).decompositions_count(), 3);

        let graph = catalog::cube();
        assert_eq!(BacktrackingDecomposer::new(&graph).decompositions_count(), 9);
    }

    #[test]
    fn test_petersen() {
        let graph = catalog::petersen();
        let mut decomposer = BacktrackingDecomposer::new(&graph);
        assert!(decomposer.is_decomposable());

        let decomposition = decomposer.decomposition();
        let result = DecompositionValidator::new(&graph).validate(&decomposition);
        assert!(result.is_valid, "{}", result);
        assert!(decomposition.count(&graph, EdgeType::StarCenter) > 0);

        assert_eq!(decomposer.decompositions_count(), 15);
        assert_eq!(decomposer.decompositions_count(), 15);
    }

    #[test]
    fn test_bridged_graphs() {
        let graph = catalog::bridged_k4_pair();
        let mut decomposer = BacktrackingDecomposer::new(&graph);
        assert!(decomposer.is_decomposable());
        assert_eq!(decomposer.decompositions_count(), 1);

        let graph = catalog::bridged_twelve();
        let mut decomposer = BacktrackingDecomposer::new(&graph);
        assert!(!decomposer.is_decomposable());
        assert!(decomposer.decomposition().is_unassigned());
        assert_eq!(decomposer.decompositions_count(), 0);
    }

    #[test]
    fn test_traversal_does_not_change_results() {
        for (name, graph) in catalog::all() {
            let mut dfs = BacktrackingDecomposer::with_traversal(&graph, Traversal::Dfs);
            let mut bfs = BacktrackingDecomposer::with_traversal(&graph, Traversal::Bfs);
            assert_eq!(dfs.is_decomposable(), bfs.is_decomposable(), "{}", name);
            assert_eq!(dfs.decompositions_count(), bfs.decompositions_count(), "{}", name);
        }
    }

    #[test]
    fn test_disconnected_graph() {
        let mut rows = catalog::k4().adjacency().to_vec();
        rows.extend(catalog::k4().adjacency().iter().map(|r| [r[0] + 4, r[1] + 4, r[2] + 4]));
        let graph = CubicGraph::new(rows);

        let mut decomposer = BacktrackingDecomposer::new(&graph);
        assert!(decomposer.is_decomposable());
        assert!(decomposer.decomposition().is_complete());
        assert_eq!(decomposer.decompositions_count(), 9);
    }

    #[test]
    fn test_statistics_recorded() {
        let graph = catalog::cube();
        let mut decomposer = BacktrackingDecomposer::new(&graph);
        decomposer.decompositions_count();
        let statistics = decomposer.statistics();
        assert_eq!(statistics.solutions, 9);
        assert!(statistics.leaves >= 9);
        assert!(statistics.nodes > statistics.leaves);
    }
}
