//! Edge types, vertex configurations and the decomposition table

use crate::graph::{CubicGraph, Vertex};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Role of an edge in a MED decomposition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeType {
    #[default]
    None,
    Matching,
    Cycle,
    StarLeaf,
    StarCenter,
}

impl EdgeType {
    /// Symbol used in coloring output
    pub fn symbol(self) -> char {
        match self {
            EdgeType::None => '-',
            EdgeType::Matching => 'M',
            EdgeType::Cycle => 'C',
            EdgeType::StarLeaf => 'H',
            EdgeType::StarCenter => 'S',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '-' => Some(EdgeType::None),
            'M' => Some(EdgeType::Matching),
            'C' => Some(EdgeType::Cycle),
            'H' => Some(EdgeType::StarLeaf),
            'S' => Some(EdgeType::StarCenter),
            _ => None,
        }
    }

    pub fn is_assigned(self) -> bool {
        self != EdgeType::None
    }
}

impl fmt::Display for EdgeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// The three ways a vertex can sit in a complete decomposition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VertexConfig {
    /// `{M, C, C}`
    Matched,
    /// `{L, C, C}`: endpoint of a double-star
    Leaf,
    /// `{S, L, L}`: endpoint of a double-star's center edge
    Center,
}

impl VertexConfig {
    pub const ALL: [VertexConfig; 3] = [VertexConfig::Matched, VertexConfig::Leaf, VertexConfig::Center];

    pub fn edge_types(self) -> [EdgeType; 3] {
        match self {
            VertexConfig::Matched => [EdgeType::Matching, EdgeType::Cycle, EdgeType::Cycle],
            VertexConfig::Leaf => [EdgeType::StarLeaf, EdgeType::Cycle, EdgeType::Cycle],
            VertexConfig::Center => [EdgeType::StarCenter, EdgeType::StarLeaf, EdgeType::StarLeaf],
        }
    }

    fn tally(self) -> TypeTally {
        TypeTally::of(&self.edge_types())
    }
}

/// Multiset of the types on a vertex's three slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TypeTally {
    pub unassigned: u8,
    pub matching: u8,
    pub cycle: u8,
    pub leaf: u8,
    pub center: u8,
}

impl TypeTally {
    pub fn of(types: &[EdgeType]) -> Self {
        let mut tally = TypeTally::default();
        for &edge_type in types {
            tally.add(edge_type);
        }
        tally
    }

    pub fn add(&mut self, edge_type: EdgeType) {
        match edge_type {
            EdgeType::None => self.unassigned += 1,
            EdgeType::Matching => self.matching += 1,
            EdgeType::Cycle => self.cycle += 1,
            EdgeType::StarLeaf => self.leaf += 1,
            EdgeType::StarCenter => self.center += 1,
        }
    }

    pub fn assigned(&self) -> u8 {
        self.matching + self.cycle + self.leaf + self.center
    }

    /// Whether the assigned types can still be completed to `config`
    pub fn fits(&self, config: VertexConfig) -> bool {
        let target = config.tally();
        self.matching <= target.matching
            && self.cycle <= target.cycle
            && self.leaf <= target.leaf
            && self.center <= target.center
    }

    pub fn fits_any(&self) -> bool {
        VertexConfig::ALL.iter().any(|&config| self.fits(config))
    }

    /// The configuration these types form, if all three slots are assigned
    pub fn config(&self) -> Option<VertexConfig> {
        if self.unassigned != 0 {
            return None;
        }
        VertexConfig::ALL
            .into_iter()
            .find(|&config| config.tally() == *self)
    }
}

/// Edge-type table shaped like the adjacency table.
///
/// `assign`/`unassign` always write both slots of an edge, so the table stays
/// symmetric as long as it is only mutated through them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Decomposition {
    types: Vec<[EdgeType; 3]>,
}

impl Decomposition {
    /// All slots unassigned
    pub fn empty(vertex_count: usize) -> Self {
        Self {
            types: vec![[EdgeType::None; 3]; vertex_count],
        }
    }

    pub fn from_rows(types: Vec<[EdgeType; 3]>) -> Self {
        Self { types }
    }

    pub fn vertex_count(&self) -> usize {
        self.types.len()
    }

    #[inline]
    pub fn get(&self, v: Vertex, slot: usize) -> EdgeType {
        self.types[v][slot]
    }

    pub fn row(&self, v: Vertex) -> &[EdgeType; 3] {
        &self.types[v]
    }

    pub fn rows(&self) -> &[[EdgeType; 3]] {
        &self.types
    }

    /// Set the type of edge `(v, slot)` on both of its endpoints
    #[inline]
    pub fn assign(&mut self, graph: &CubicGraph, v: Vertex, slot: usize, edge_type: EdgeType) {
        let u = graph.neighbor(v, slot);
        let back = graph.mirror_slot(v, slot);
        self.types[v][slot] = edge_type;
        self.types[u][back] = edge_type;
    }

    #[inline]
    pub fn unassign(&mut self, graph: &CubicGraph, v: Vertex, slot: usize) {
        self.assign(graph, v, slot, EdgeType::None);
    }

    #[inline]
    pub fn tally(&self, v: Vertex) -> TypeTally {
        TypeTally::of(&self.types[v])
    }

    pub fn is_complete(&self) -> bool {
        self.types.iter().flatten().all(|t| t.is_assigned())
    }

    /// True when no slot is assigned, the "no decomposition" value
    pub fn is_unassigned(&self) -> bool {
        self.types.iter().flatten().all(|t| !t.is_assigned())
    }

    /// Whether every edge carries the same type on both endpoints
    pub fn is_symmetric(&self, graph: &CubicGraph) -> bool {
        graph
            .edges()
            .iter()
            .all(|e| self.types[e.u][e.slot_u] == self.types[e.v][e.slot_v])
    }

    /// Number of undirected edges of the given type
    pub fn count(&self, graph: &CubicGraph, edge_type: EdgeType) -> usize {
        graph
            .edges()
            .iter()
            .filter(|e| self.types[e.u][e.slot_u] == edge_type)
            .count()
    }
}
