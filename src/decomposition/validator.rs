//! Checks on finished decompositions
//!
//! `check_cycles` and `check_double_stars` are the two global conditions the
//! backtracking search cannot enforce locally and runs at every leaf.
//! `DecompositionValidator` checks everything and reports each violation.

use super::edge_type::{Decomposition, EdgeType, VertexConfig};
use crate::graph::{CubicGraph, Vertex};
use std::fmt;

/// Walk the cycle-edge component containing `start`.
///
/// Returns its vertex count, or `None` when the walk gets stuck or does not
/// return to `start` within `n` steps.
fn walk_cycle(
    graph: &CubicGraph,
    decomposition: &Decomposition,
    start: Vertex,
    visited: &mut [bool],
) -> Option<usize> {
    let n = graph.vertex_count();
    let first = (0..3).find(|&i| decomposition.get(start, i) == EdgeType::Cycle)?;

    visited[start] = true;
    let mut previous = start;
    let mut current = graph.neighbor(start, first);
    let mut length = 1;

    while current != start {
        if length >= n {
            return None;
        }
        visited[current] = true;
        length += 1;

        let next = (0..3)
            .filter(|&i| decomposition.get(current, i) == EdgeType::Cycle)
            .map(|i| graph.neighbor(current, i))
            .find(|&w| w != previous)?;
        previous = current;
        current = next;
    }

    Some(length)
}

fn has_cycle_edge(decomposition: &Decomposition, v: Vertex) -> bool {
    decomposition.row(v).contains(&EdgeType::Cycle)
}

/// Whether every cycle-edge component is a closed cycle of even length
pub fn check_cycles(graph: &CubicGraph, decomposition: &Decomposition) -> bool {
    let mut visited = vec![false; graph.vertex_count()];
    for v in 0..graph.vertex_count() {
        if visited[v] || !has_cycle_edge(decomposition, v) {
            continue;
        }
        match walk_cycle(graph, decomposition, v, &mut visited) {
            Some(length) if length % 2 == 0 => {}
            _ => return false,
        }
    }
    true
}

/// A vertex with a star-leaf edge but no star-center edge
pub fn is_leaf_vertex(decomposition: &Decomposition, v: Vertex) -> bool {
    let row = decomposition.row(v);
    row.contains(&EdgeType::StarLeaf) && !row.contains(&EdgeType::StarCenter)
}

/// Whether no two leaf vertices are adjacent, i.e. double-stars never touch
pub fn check_double_stars(graph: &CubicGraph, decomposition: &Decomposition) -> bool {
    graph
        .edges()
        .iter()
        .all(|e| !(is_leaf_vertex(decomposition, e.u) && is_leaf_vertex(decomposition, e.v)))
}

/// Kind of problem found in a decomposition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationKind {
    AsymmetricEdge,
    UnassignedEdge,
    InvalidConfiguration,
    CenterEdgeEndpoints,
    LeafEdgeEndpoints,
    AdjacentLeaves,
    OddCycle,
    OpenCycle,
}

/// One violation, anchored at a vertex
#[derive(Debug, Clone)]
pub struct Violation {
    pub vertex: Vertex,
    pub kind: ViolationKind,
    pub description: String,
}

/// Result of validating a decomposition
#[derive(Debug, Clone)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub error_message: Option<String>,
    pub violations: Vec<Violation>,
    pub cycle_lengths: Vec<usize>,
}

/// Full checker for complete decompositions
pub struct DecompositionValidator<'g> {
    graph: &'g CubicGraph,
}

impl<'g> DecompositionValidator<'g> {
    pub fn new(graph: &'g CubicGraph) -> Self {
        Self { graph }
    }

    pub fn validate(&self, decomposition: &Decomposition) -> ValidationResult {
        let mut violations = Vec::new();

        if decomposition.vertex_count() != self.graph.vertex_count() {
            violations.push(Violation {
                vertex: 0,
                kind: ViolationKind::InvalidConfiguration,
                description: format!(
                    "Decomposition covers {} vertices, graph has {}",
                    decomposition.vertex_count(),
                    self.graph.vertex_count()
                ),
            });
            return Self::finish(violations, Vec::new());
        }

        self.check_edges(decomposition, &mut violations);
        self.check_vertices(decomposition, &mut violations);
        if !violations.is_empty() {
            return Self::finish(violations, Vec::new());
        }

        self.check_stars(decomposition, &mut violations);
        let cycle_lengths = self.check_cycle_parity(decomposition, &mut violations);

        Self::finish(violations, cycle_lengths)
    }

    fn finish(violations: Vec<Violation>, cycle_lengths: Vec<usize>) -> ValidationResult {
        let is_valid = violations.is_empty();
        let error_message = if is_valid {
            None
        } else {
            Some(generate_error_message(&violations))
        };

        ValidationResult {
            is_valid,
            error_message,
            violations,
            cycle_lengths,
        }
    }

    fn check_edges(&self, decomposition: &Decomposition, violations: &mut Vec<Violation>) {
        for e in self.graph.edges() {
            let a = decomposition.get(e.u, e.slot_u);
            let b = decomposition.get(e.v, e.slot_v);
            if a != b {
                violations.push(Violation {
                    vertex: e.u,
                    kind: ViolationKind::AsymmetricEdge,
                    description: format!("Edge {}-{} is {} at {} but {} at {}", e.u, e.v, a, e.u, b, e.v),
                });
            } else if !a.is_assigned() {
                violations.push(Violation {
                    vertex: e.u,
                    kind: ViolationKind::UnassignedEdge,
                    description: format!("Edge {}-{} has no type", e.u, e.v),
                });
            }
        }
    }

    fn check_vertices(&self, decomposition: &Decomposition, violations: &mut Vec<Violation>) {
        for v in 0..self.graph.vertex_count() {
            let tally = decomposition.tally(v);
            if tally.unassigned == 0 && tally.config().is_none() {
                let row = decomposition.row(v);
                violations.push(Violation {
                    vertex: v,
                    kind: ViolationKind::InvalidConfiguration,
                    description: format!("Vertex {} has edge types {}{}{}", v, row[0], row[1], row[2]),
                });
            }
        }
    }

    fn check_stars(&self, decomposition: &Decomposition, violations: &mut Vec<Violation>) {
        let config = |v: Vertex| decomposition.tally(v).config();

        for e in self.graph.edges() {
            match decomposition.get(e.u, e.slot_u) {
                EdgeType::StarCenter => {
                    if config(e.u) != Some(VertexConfig::Center) || config(e.v) != Some(VertexConfig::Center) {
                        violations.push(Violation {
                            vertex: e.u,
                            kind: ViolationKind::CenterEdgeEndpoints,
                            description: format!("Center edge {}-{} does not join two centers", e.u, e.v),
                        });
                    }
                }
                EdgeType::StarLeaf => {
                    let ends = (config(e.u), config(e.v));
                    let joins_center_to_leaf = matches!(
                        ends,
                        (Some(VertexConfig::Center), Some(VertexConfig::Leaf))
                            | (Some(VertexConfig::Leaf), Some(VertexConfig::Center))
                    );
                    if !joins_center_to_leaf {
                        violations.push(Violation {
                            vertex: e.u,
                            kind: ViolationKind::LeafEdgeEndpoints,
                            description: format!("Leaf edge {}-{} does not join a center to a leaf", e.u, e.v),
                        });
                    }
                }
                _ => {}
            }

            if is_leaf_vertex(decomposition, e.u) && is_leaf_vertex(decomposition, e.v) {
                violations.push(Violation {
                    vertex: e.u,
                    kind: ViolationKind::AdjacentLeaves,
                    description: format!("Leaf vertices {} and {} are adjacent", e.u, e.v),
                });
            }
        }
    }

    fn check_cycle_parity(&self, decomposition: &Decomposition, violations: &mut Vec<Violation>) -> Vec<usize> {
        let mut visited = vec![false; self.graph.vertex_count()];
        let mut lengths = Vec::new();

        for v in 0..self.graph.vertex_count() {
            if visited[v] || !has_cycle_edge(decomposition, v) {
                continue;
            }
            match walk_cycle(self.graph, decomposition, v, &mut visited) {
                Some(length) => {
                    if length % 2 == 1 {
                        violations.push(Violation {
                            vertex: v,
                            kind: ViolationKind::OddCycle,
                            description: format!("Cycle through vertex {} has odd length {}", v, length),
                        });
                    }
                    lengths.push(length);
                }
                None => violations.push(Violation {
                    vertex: v,
                    kind: ViolationKind::OpenCycle,
                    description: format!("Cycle edges through vertex {} do not close into a cycle", v),
                }),
            }
        }

        lengths
    }
}

fn generate_error_message(violations: &[Violation]) -> String {
    let mut message = format!("Found {} violations. ", violations.len());

    for (i, violation) in violations.iter().take(3).enumerate() {
        if i == 0 {
            message.push_str("Examples: ");
        }
        message.push_str(&format!("{}; ", violation.description));
    }

    if violations.len() > 3 {
        message.push_str(&format!("... and {} more", violations.len() - 3));
    }

    message
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Validation Result: {}", if self.is_valid { "VALID" } else { "INVALID" })?;

        if let Some(ref error) = self.error_message {
            writeln!(f, "Error: {}", error)?;
        }

        writeln!(f, "Violations: {}", self.violations.len())?;
        if !self.cycle_lengths.is_empty() {
            let lengths: Vec<String> = self.cycle_lengths.iter().map(|l| l.to_string()).collect();
            writeln!(f, "Cycle lengths: {}", lengths.join(" "))?;
        }

        Ok(())
    }
}
