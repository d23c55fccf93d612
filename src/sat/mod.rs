//! SAT formulation of MED decomposition

pub mod constraints;
pub mod encoder;
pub mod solver;
pub mod variables;

pub use constraints::{Clause, ClauseFamily, ConstraintGenerator, ConstraintStatistics};
pub use encoder::{SatDecomposer, SatOutcome};
pub use solver::{SatSolver, SolverOptions, SolverSolution};
pub use variables::{EdgeVariables, SatEdgeType};
