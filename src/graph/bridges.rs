//! Bridge detection for cubic graphs
//!
//! A bridge is an edge whose removal disconnects its endpoints. MED analysis
//! is usually restricted to bridgeless graphs, so the common query is the
//! cheap "is there at least one bridge" form that stops at the first hit.

use super::cubic::{CubicGraph, Vertex};
use std::collections::VecDeque;

/// Per-vertex DFS bookkeeping: discovery time, low-link and tree parent
#[derive(Debug, Clone, Copy, Default)]
struct NodeInfo {
    discovery: usize,
    low: usize,
    parent: Option<Vertex>,
}

impl NodeInfo {
    fn update_low(&mut self, value: usize) {
        self.low = self.low.min(value);
    }
}

/// Tarjan low-link bridge counter
pub struct BridgeDetector<'a> {
    graph: &'a CubicGraph,
    nodes_info: Vec<NodeInfo>,
    time: usize,
    bridges: usize,
    stop_at_first: bool,
}

impl<'a> BridgeDetector<'a> {
    fn new(graph: &'a CubicGraph, stop_at_first: bool) -> Self {
        Self {
            graph,
            nodes_info: vec![NodeInfo::default(); graph.vertex_count()],
            time: 0,
            bridges: 0,
            stop_at_first,
        }
    }

    /// Count the bridges of `graph`.
    ///
    /// With `stop_at_first` the search ends at the first bridge found and the
    /// result is 0 or 1.
    pub fn count_bridges(graph: &CubicGraph, stop_at_first: bool) -> usize {
        let mut search = BridgeDetector::new(graph, stop_at_first);
        search.compute();
        search.bridges
    }

    fn done(&self) -> bool {
        self.stop_at_first && self.bridges > 0
    }

    fn compute(&mut self) {
        for root in 0..self.graph.vertex_count() {
            if self.nodes_info[root].discovery != 0 {
                continue;
            }
            self.compute_node(None, root);
            if self.done() {
                break;
            }
        }
    }

    fn compute_node(&mut self, parent: Option<Vertex>, v: Vertex) -> NodeInfo {
        self.time += 1;
        self.nodes_info[v] = NodeInfo {
            discovery: self.time,
            low: self.time,
            parent,
        };

        for &u in self.graph.neighbors(v) {
            if self.done() {
                break;
            }
            if self.nodes_info[u].discovery == 0 {
                let info_u = self.compute_node(Some(v), u);
                self.nodes_info[v].update_low(info_u.low);

                if info_u.low > self.nodes_info[v].discovery {
                    self.bridges += 1;
                }
            } else if Some(u) != self.nodes_info[v].parent {
                let u_disc = self.nodes_info[u].discovery;
                self.nodes_info[v].update_low(u_disc);
            }
        }

        self.nodes_info[v]
    }

    /// Reference bridge count: drop each edge in turn and test whether its
    /// endpoints remain connected. Quadratic, for cross-checking only.
    pub fn count_bridges_naive(graph: &CubicGraph) -> usize {
        graph
            .edges()
            .iter()
            .filter(|edge| !connected_without(graph, edge.u, edge.v))
            .count()
    }
}

/// Whether `to` is reachable from `from` once the edge `from`-`to` is removed
fn connected_without(graph: &CubicGraph, from: Vertex, to: Vertex) -> bool {
    let mut visited = vec![false; graph.vertex_count()];
    let mut queue = VecDeque::from([from]);
    visited[from] = true;

    while let Some(v) = queue.pop_front() {
        for &u in graph.neighbors(v) {
            if v == from && u == to {
                continue;
            }
            if u == to {
                return true;
            }
            if !visited[u] {
                visited[u] = true;
                queue.push_back(u);
            }
        }
    }

    false
}
