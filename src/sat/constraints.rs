//! Clause generation for the MED SAT encoding

use super::variables::{EdgeVariables, SatEdgeType};
use crate::graph::CubicGraph;
use anyhow::Result;
use itertools::Itertools;

/// Represents a SAT clause (disjunction of literals)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause {
    pub literals: Vec<i32>, // Positive for variable, negative for negation
}

impl Clause {
    /// Create a new clause from literals
    pub fn new(literals: Vec<i32>) -> Self {
        Self { literals }
    }

    /// Create a binary clause (two literals)
    pub fn binary(lit1: i32, lit2: i32) -> Self {
        Self { literals: vec![lit1, lit2] }
    }

    /// Check if clause is empty (unsatisfiable)
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    pub fn len(&self) -> usize {
        self.literals.len()
    }
}

/// Groups of clauses, one per structural rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClauseFamily {
    /// Each edge has exactly one subtype
    ExactlyOneSubtype,
    /// At most one matching edge per vertex
    MatchingExclusion,
    /// At most one even and at most one odd cycle edge per vertex
    CycleParityExclusion,
    /// Cycle edges alternate parity at every vertex
    CycleAlternation,
    /// A center edge is surrounded by leaf edges
    CenterNeighbourhood,
    /// A leaf edge touches a center edge and an even cycle edge
    LeafSupport,
    /// A leaf edge at each end forces the middle edge to be a center
    DoubleStarShape,
}

impl ClauseFamily {
    pub const ALL: [ClauseFamily; 7] = [
        ClauseFamily::ExactlyOneSubtype,
        ClauseFamily::MatchingExclusion,
        ClauseFamily::CycleParityExclusion,
        ClauseFamily::CycleAlternation,
        ClauseFamily::CenterNeighbourhood,
        ClauseFamily::LeafSupport,
        ClauseFamily::DoubleStarShape,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ClauseFamily::ExactlyOneSubtype => "exactly one subtype",
            ClauseFamily::MatchingExclusion => "matching exclusion",
            ClauseFamily::CycleParityExclusion => "cycle parity exclusion",
            ClauseFamily::CycleAlternation => "cycle alternation",
            ClauseFamily::CenterNeighbourhood => "center neighbourhood",
            ClauseFamily::LeafSupport => "leaf support",
            ClauseFamily::DoubleStarShape => "double-star shape",
        }
    }
}

/// The two edges sharing endpoint `u` with an edge, and the two sharing `v`
struct Adjacent {
    at_u: [usize; 2],
    at_v: [usize; 2],
}

impl Adjacent {
    fn all(&self) -> [usize; 4] {
        [self.at_u[0], self.at_u[1], self.at_v[0], self.at_v[1]]
    }
}

/// Generates the clauses of the MED encoding for one graph
pub struct ConstraintGenerator<'g> {
    graph: &'g CubicGraph,
    variables: EdgeVariables,
    family_counts: Vec<(ClauseFamily, usize)>,
}

impl<'g> ConstraintGenerator<'g> {
    pub fn new(graph: &'g CubicGraph) -> Self {
        Self {
            graph,
            variables: EdgeVariables::new(graph.edge_count()),
            family_counts: Vec::new(),
        }
    }

    pub fn variables(&self) -> &EdgeVariables {
        &self.variables
    }

    /// Generate every clause family
    pub fn generate_all_constraints(&mut self) -> Result<Vec<Clause>> {
        let mut clauses = Vec::new();
        self.family_counts.clear();

        for family in ClauseFamily::ALL {
            let generated = self.generate_family(family)?;
            self.family_counts.push((family, generated.len()));
            clauses.extend(generated);
        }

        Ok(clauses)
    }

    /// Generate the clauses of one family
    pub fn generate_family(&self, family: ClauseFamily) -> Result<Vec<Clause>> {
        match family {
            ClauseFamily::ExactlyOneSubtype => self.generate_exactly_one_subtype(),
            ClauseFamily::MatchingExclusion => self.generate_vertex_exclusions(&[SatEdgeType::Matching]),
            ClauseFamily::CycleParityExclusion => {
                self.generate_vertex_exclusions(&[SatEdgeType::CycleEven, SatEdgeType::CycleOdd])
            }
            ClauseFamily::CycleAlternation => self.generate_cycle_alternation(),
            ClauseFamily::CenterNeighbourhood => self.generate_center_neighbourhood(),
            ClauseFamily::LeafSupport => self.generate_leaf_support(),
            ClauseFamily::DoubleStarShape => self.generate_double_star_shape(),
        }
    }

    fn lit(&self, edge: usize, subtype: SatEdgeType) -> Result<i32> {
        self.variables.literal(edge, subtype)
    }

    fn adjacent(&self, edge: usize) -> Adjacent {
        let e = self.graph.edge(edge);
        let at = |v: usize, slot: usize| {
            [
                self.graph.edge_id(v, (slot + 1) % 3),
                self.graph.edge_id(v, (slot + 2) % 3),
            ]
        };
        Adjacent {
            at_u: at(e.u, e.slot_u),
            at_v: at(e.v, e.slot_v),
        }
    }

    /// At-least-one over the five subtypes plus pairwise at-most-one
    fn generate_exactly_one_subtype(&self) -> Result<Vec<Clause>> {
        let mut clauses = Vec::new();

        for edge in 0..self.graph.edge_count() {
            let literals = SatEdgeType::ALL
                .iter()
                .map(|&t| self.lit(edge, t))
                .collect::<Result<Vec<_>>>()?;

            for (a, b) in literals.iter().tuple_combinations() {
                clauses.push(Clause::binary(-a, -b));
            }
            clauses.push(Clause::new(literals));
        }

        Ok(clauses)
    }

    /// For each vertex and each listed subtype, no two incident edges share it
    fn generate_vertex_exclusions(&self, subtypes: &[SatEdgeType]) -> Result<Vec<Clause>> {
        let mut clauses = Vec::new();

        for v in 0..self.graph.vertex_count() {
            for (&p, &q) in self.graph.incident_edges(v).iter().tuple_combinations() {
                for &subtype in subtypes {
                    clauses.push(Clause::binary(-self.lit(p, subtype)?, -self.lit(q, subtype)?));
                }
            }
        }

        Ok(clauses)
    }

    /// A cycle edge of one parity has an edge of the other parity at both ends
    fn generate_cycle_alternation(&self) -> Result<Vec<Clause>> {
        let mut clauses = Vec::new();
        let parities = [
            (SatEdgeType::CycleEven, SatEdgeType::CycleOdd),
            (SatEdgeType::CycleOdd, SatEdgeType::CycleEven),
        ];

        for edge in 0..self.graph.edge_count() {
            let adjacent = self.adjacent(edge);
            for side in [adjacent.at_u, adjacent.at_v] {
                for (own, other) in parities {
                    clauses.push(Clause::new(vec![
                        -self.lit(edge, own)?,
                        self.lit(side[0], other)?,
                        self.lit(side[1], other)?,
                    ]));
                }
            }
        }

        Ok(clauses)
    }

    /// A center edge forces its four adjacent edges to be leaf edges
    fn generate_center_neighbourhood(&self) -> Result<Vec<Clause>> {
        let mut clauses = Vec::new();

        for edge in 0..self.graph.edge_count() {
            let center = self.lit(edge, SatEdgeType::StarCenter)?;
            for neighbour in self.adjacent(edge).all() {
                clauses.push(Clause::binary(-center, self.lit(neighbour, SatEdgeType::StarLeaf)?));
            }
        }

        Ok(clauses)
    }

    /// A leaf edge has an adjacent center edge and an adjacent even cycle edge
    fn generate_leaf_support(&self) -> Result<Vec<Clause>> {
        let mut clauses = Vec::new();

        for edge in 0..self.graph.edge_count() {
            let leaf = self.lit(edge, SatEdgeType::StarLeaf)?;
            let adjacent = self.adjacent(edge).all();

            for support in [SatEdgeType::StarCenter, SatEdgeType::CycleEven] {
                let mut literals = vec![-leaf];
                for &neighbour in &adjacent {
                    literals.push(self.lit(neighbour, support)?);
                }
                clauses.push(Clause::new(literals));
            }
        }

        Ok(clauses)
    }

    /// Leaf edges on both ends of an edge make it the center edge.
    ///
    /// Every (edge, x, y) triple is emitted: the same pair of leaf edges can
    /// meet different middle edges, so no pair may be skipped.
    fn generate_double_star_shape(&self) -> Result<Vec<Clause>> {
        let mut clauses = Vec::new();

        for edge in 0..self.graph.edge_count() {
            let center = self.lit(edge, SatEdgeType::StarCenter)?;
            let adjacent = self.adjacent(edge);
            for (&x, &y) in adjacent.at_u.iter().cartesian_product(adjacent.at_v.iter()) {
                clauses.push(Clause::new(vec![
                    center,
                    -self.lit(x, SatEdgeType::StarLeaf)?,
                    -self.lit(y, SatEdgeType::StarLeaf)?,
                ]));
            }
        }

        Ok(clauses)
    }

    /// Clause counts per family from the last full generation
    pub fn statistics(&self) -> ConstraintStatistics {
        ConstraintStatistics {
            vertices: self.graph.vertex_count(),
            edges: self.graph.edge_count(),
            total_variables: self.variables.variable_count(),
            total_clauses: self.family_counts.iter().map(|(_, count)| count).sum(),
            family_counts: self.family_counts.clone(),
        }
    }
}

/// Statistics about constraint generation
#[derive(Debug, Clone)]
pub struct ConstraintStatistics {
    pub vertices: usize,
    pub edges: usize,
    pub total_variables: usize,
    pub total_clauses: usize,
    pub family_counts: Vec<(ClauseFamily, usize)>,
}

impl std::fmt::Display for ConstraintStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Constraint Generation Statistics:")?;
        writeln!(f, "  Graph size: {} vertices, {} edges", self.vertices, self.edges)?;
        writeln!(f, "  Total variables: {}", self.total_variables)?;
        writeln!(f, "  Total clauses: {}", self.total_clauses)?;
        for (family, count) in &self.family_counts {
            writeln!(f, "    {}: {}", family.name(), count)?;
        }
        Ok(())
    }
}
