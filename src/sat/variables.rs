//! Variable numbering for the SAT encoding
//!
//! One boolean indicator per undirected edge per subtype. Variables are
//! numbered `edge * 5 + subtype` and handed to the solver as `variable + 1`,
//! since DIMACS literals are 1-based and signed.

use crate::decomposition::EdgeType;
use anyhow::Result;

/// Edge subtypes distinguished by the encoding.
///
/// Cycle edges are split by parity so that clauses can force every cycle to
/// alternate between the two, which is only possible for even cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SatEdgeType {
    Matching = 0,
    CycleEven = 1,
    CycleOdd = 2,
    StarLeaf = 3,
    StarCenter = 4,
}

impl SatEdgeType {
    pub const COUNT: usize = 5;

    pub const ALL: [SatEdgeType; 5] = [
        SatEdgeType::Matching,
        SatEdgeType::CycleEven,
        SatEdgeType::CycleOdd,
        SatEdgeType::StarLeaf,
        SatEdgeType::StarCenter,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Decomposition type this subtype decodes to; both parities become `Cycle`
    pub fn edge_type(self) -> EdgeType {
        match self {
            SatEdgeType::Matching => EdgeType::Matching,
            SatEdgeType::CycleEven | SatEdgeType::CycleOdd => EdgeType::Cycle,
            SatEdgeType::StarLeaf => EdgeType::StarLeaf,
            SatEdgeType::StarCenter => EdgeType::StarCenter,
        }
    }
}

/// Bidirectional mapping between `(edge, subtype)` and solver variables
#[derive(Debug, Clone, Copy)]
pub struct EdgeVariables {
    edge_count: usize,
}

impl EdgeVariables {
    pub fn new(edge_count: usize) -> Self {
        Self { edge_count }
    }

    /// Zero-based variable index of `(edge, subtype)`
    pub fn encode(&self, edge: usize, subtype: SatEdgeType) -> Result<usize> {
        self.validate_edge(edge)?;
        Ok(edge * SatEdgeType::COUNT + subtype.index())
    }

    /// Inverse of `encode`
    pub fn decode(&self, variable: usize) -> Option<(usize, SatEdgeType)> {
        let edge = variable / SatEdgeType::COUNT;
        if edge >= self.edge_count {
            return None;
        }
        SatEdgeType::from_index(variable % SatEdgeType::COUNT).map(|subtype| (edge, subtype))
    }

    /// Positive solver literal for `(edge, subtype)`
    pub fn literal(&self, edge: usize, subtype: SatEdgeType) -> Result<i32> {
        let variable = self.encode(edge, subtype)?;
        i32::try_from(variable + 1)
            .map_err(|_| anyhow::anyhow!("Variable {} exceeds the solver's literal range", variable))
    }

    /// Decode a solver literal, ignoring its sign
    pub fn decode_literal(&self, literal: i32) -> Option<(usize, SatEdgeType)> {
        let variable = literal.unsigned_abs().checked_sub(1)?;
        self.decode(variable as usize)
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn variable_count(&self) -> usize {
        self.edge_count * SatEdgeType::COUNT
    }

    fn validate_edge(&self, edge: usize) -> Result<()> {
        if edge >= self.edge_count {
            anyhow::bail!("Edge index {} out of bounds (edges: {})", edge, self.edge_count);
        }
        Ok(())
    }

    pub fn statistics(&self) -> VariableStatistics {
        VariableStatistics {
            total_variables: self.variable_count(),
            edges: self.edge_count,
            subtypes: SatEdgeType::COUNT,
        }
    }
}

/// Statistics about variable usage
#[derive(Debug, Clone)]
pub struct VariableStatistics {
    pub total_variables: usize,
    pub edges: usize,
    pub subtypes: usize,
}

impl std::fmt::Display for VariableStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Variable Statistics:")?;
        writeln!(f, "  Total variables: {}", self.total_variables)?;
        writeln!(f, "  Edges: {} x {} subtypes", self.edges, self.subtypes)?;
        Ok(())
    }
}
