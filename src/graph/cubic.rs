//! Cubic graph representation and traversal utilities

use super::bridges::BridgeDetector;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use std::sync::OnceLock;

/// Vertex identifier, an index into the adjacency table
pub type Vertex = usize;

/// Slot value stored when a neighbor does not list the vertex back
pub const NO_SLOT: usize = usize::MAX;

/// Order in which the backtracking search visits vertices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Traversal {
    Dfs,
    Bfs,
}

/// An undirected edge together with the slot it occupies at each endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub u: Vertex,
    pub v: Vertex,
    pub slot_u: usize,
    pub slot_v: usize,
}

/// A cubic graph stored as a fixed-width adjacency table.
///
/// The constructor trusts its input: rows must be symmetric, in range and
/// free of loops and repeated neighbors. `graph::io` performs that validation
/// for graphs read from text.
#[derive(Debug, Clone)]
pub struct CubicGraph {
    adjacency: Vec<[Vertex; 3]>,
    /// `mirror[v][i]` is the slot of `v` inside the row of `adjacency[v][i]`
    mirror: Vec<[usize; 3]>,
    edges: Vec<Edge>,
    edge_ids: Vec<[usize; 3]>,
    bridge_count: OnceLock<usize>,
    bridgeless: OnceLock<bool>,
}

impl CubicGraph {
    /// Build a graph from a validated adjacency table
    pub fn new(adjacency: Vec<[Vertex; 3]>) -> Self {
        let n = adjacency.len();
        let mut mirror = vec![[NO_SLOT; 3]; n];
        let mut edge_ids = vec![[usize::MAX; 3]; n];
        let mut edges = Vec::with_capacity(n * 3 / 2);

        for v in 0..n {
            for i in 0..3 {
                let u = adjacency[v][i];
                let back = adjacency[u].iter().position(|&w| w == v);
                debug_assert!(back.is_some(), "adjacency is not symmetric between {} and {}", v, u);
                mirror[v][i] = back.unwrap_or(NO_SLOT);
            }
        }

        for v in 0..n {
            for i in 0..3 {
                if edge_ids[v][i] != usize::MAX {
                    continue;
                }
                let u = adjacency[v][i];
                let j = mirror[v][i];
                let id = edges.len();
                edges.push(Edge { u: v, v: u, slot_u: i, slot_v: j });
                edge_ids[v][i] = id;
                edge_ids[u][j] = id;
            }
        }

        Self {
            adjacency,
            mirror,
            edges,
            edge_ids,
            bridge_count: OnceLock::new(),
            bridgeless: OnceLock::new(),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// The three neighbors of `v`, in slot order
    #[inline]
    pub fn neighbors(&self, v: Vertex) -> &[Vertex; 3] {
        &self.adjacency[v]
    }

    #[inline]
    pub fn neighbor(&self, v: Vertex, slot: usize) -> Vertex {
        self.adjacency[v][slot]
    }

    /// Slot of `v` in the row of its neighbor at `slot`
    #[inline]
    pub fn mirror_slot(&self, v: Vertex, slot: usize) -> usize {
        self.mirror[v][slot]
    }

    /// Slot `i` such that `neighbor(v, i) == u`, if the two are adjacent
    pub fn slot_of(&self, v: Vertex, u: Vertex) -> Option<usize> {
        self.adjacency[v].iter().position(|&w| w == u)
    }

    pub fn adjacency(&self) -> &[[Vertex; 3]] {
        &self.adjacency
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn edge(&self, id: usize) -> Edge {
        self.edges[id]
    }

    /// Edge index of the edge at `(v, slot)`
    #[inline]
    pub fn edge_id(&self, v: Vertex, slot: usize) -> usize {
        self.edge_ids[v][slot]
    }

    /// Edge indices of the three edges incident to `v`
    pub fn incident_edges(&self, v: Vertex) -> &[usize; 3] {
        &self.edge_ids[v]
    }

    /// Depth-first preorder of the component containing `start`
    pub fn dfs_order(&self, start: Vertex) -> Vec<Vertex> {
        let mut visited = vec![false; self.vertex_count()];
        let mut order = Vec::new();
        self.dfs_from(start, &mut visited, &mut order);
        order
    }

    /// Breadth-first order of the component containing `start`
    pub fn bfs_order(&self, start: Vertex) -> Vec<Vertex> {
        let mut visited = vec![false; self.vertex_count()];
        let mut order = Vec::new();
        self.bfs_from(start, &mut visited, &mut order);
        order
    }

    /// Visit order covering every component, each restarted from its lowest vertex
    pub fn search_order(&self, traversal: Traversal) -> Vec<Vertex> {
        let n = self.vertex_count();
        let mut visited = vec![false; n];
        let mut order = Vec::with_capacity(n);

        for root in 0..n {
            if visited[root] {
                continue;
            }
            match traversal {
                Traversal::Dfs => self.dfs_from(root, &mut visited, &mut order),
                Traversal::Bfs => self.bfs_from(root, &mut visited, &mut order),
            }
        }

        order
    }

    fn dfs_from(&self, start: Vertex, visited: &mut [bool], order: &mut Vec<Vertex>) {
        // Neighbors are pushed in reverse so the preorder matches the recursive walk
        let mut stack = vec![start];
        while let Some(v) = stack.pop() {
            if visited[v] {
                continue;
            }
            visited[v] = true;
            order.push(v);
            for &u in self.adjacency[v].iter().rev() {
                if !visited[u] {
                    stack.push(u);
                }
            }
        }
    }

    fn bfs_from(&self, start: Vertex, visited: &mut [bool], order: &mut Vec<Vertex>) {
        let mut queue = VecDeque::from([start]);
        visited[start] = true;
        while let Some(v) = queue.pop_front() {
            order.push(v);
            for &u in &self.adjacency[v] {
                if !visited[u] {
                    visited[u] = true;
                    queue.push_back(u);
                }
            }
        }
    }

    /// Number of bridges, computed once with Tarjan's low-link search
    pub fn bridges_count(&self) -> usize {
        *self
            .bridge_count
            .get_or_init(|| BridgeDetector::count_bridges(self, false))
    }

    /// Whether the graph is 2-edge-connected.
    ///
    /// Stops at the first bridge unless a full count is already cached.
    pub fn is_bridgeless(&self) -> bool {
        if let Some(&count) = self.bridge_count.get() {
            return count == 0;
        }
        *self
            .bridgeless
            .get_or_init(|| BridgeDetector::count_bridges(self, true) == 0)
    }
}

impl fmt::Display for CubicGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (v, row) in self.adjacency.iter().enumerate() {
            writeln!(f, "{}: {} {} {}", v, row[0], row[1], row[2])?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::catalog;

    #[test]
    fn test_edge_indexing() {
        let graph = catalog::k4();
        assert_eq!(graph.vertex_count(), 4);
        assert_eq!(graph.edge_count(), 6);

        for (id, edge) in graph.edges().iter().enumerate() {
            assert_eq!(graph.neighbor(edge.u, edge.slot_u), edge.v);
            assert_eq!(graph.neighbor(edge.v, edge.slot_v), edge.u);
            assert_eq!(graph.edge_id(edge.u, edge.slot_u), id);
            assert_eq!(graph.edge_id(edge.v, edge.slot_v), id);
        }
    }

    #[test]
    fn test_mirror_slots() {
        let graph = catalog::petersen();
        for v in 0..graph.vertex_count() {
            for i in 0..3 {
                let u = graph.neighbor(v, i);
                let j = graph.mirror_slot(v, i);
                assert_eq!(graph.neighbor(u, j), v);
                assert_eq!(graph.slot_of(u, v), Some(j));
            }
        }
        assert_eq!(graph.slot_of(0, 9), None);
    }

    #[test]
    fn test_traversal_orders() {
        let graph = catalog::petersen();
        assert_eq!(graph.dfs_order(0), vec![0, 1, 4, 7, 2, 6, 5, 9, 3, 8]);
        assert_eq!(graph.bfs_order(0), vec![0, 1, 2, 3, 4, 5, 6, 7, 8, 9]);

        for traversal in [Traversal::Dfs, Traversal::Bfs] {
            let mut order = graph.search_order(traversal);
            order.sort_unstable();
            assert_eq!(order, (0..10).collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_search_order_covers_components() {
        let mut rows = catalog::k4().adjacency().to_vec();
        rows.extend(catalog::k4().adjacency().iter().map(|r| [r[0] + 4, r[1] + 4, r[2] + 4]));
        let graph = CubicGraph::new(rows);

        assert_eq!(graph.dfs_order(0).len(), 4);
        let order = graph.search_order(Traversal::Dfs);
        assert_eq!(order.len(), 8);
        assert_eq!(order[4], 4);
    }

    #[test]
    fn test_bridge_queries_are_cached() {
        let graph = catalog::bridged_k4_pair();
        assert!(!graph.is_bridgeless());
        assert_eq!(graph.bridges_count(), 1);
        assert!(!graph.is_bridgeless());

        let graph = catalog::cube();
        assert_eq!(graph.bridges_count(), 0);
        assert!(graph.is_bridgeless());
    }

    #[test]
    fn test_display() {
        let graph = catalog::k4();
        let text = graph.to_string();
        assert_eq!(text, "0: 1 2 3\n1: 0 2 3\n2: 0 1 3\n3: 0 1 2\n");
    }
}
