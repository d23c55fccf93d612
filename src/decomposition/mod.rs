//! MED decompositions: edge types, validation and the backtracking engine

pub mod backtrack;
pub mod edge_type;
pub mod validator;

pub use backtrack::{BacktrackingDecomposer, SearchMode, SearchStatistics};
pub use edge_type::{Decomposition, EdgeType, TypeTally, VertexConfig};
pub use validator::{check_cycles, check_double_stars, DecompositionValidator, ValidationResult};
