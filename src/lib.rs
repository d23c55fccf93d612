//! MED Decomposition Tester
//!
//! Decides whether a cubic graph admits a decomposition into a perfect
//! matching, even cycles and double stars, using either a backtracking
//! search or a SAT encoding solved by CaDiCaL.

pub mod analysis;
pub mod config;
pub mod decomposition;
pub mod graph;
pub mod sat;
pub mod utils;

pub use analysis::{AnalysisReport, DecompositionEngine, GraphAnalyser};
pub use config::Settings;
pub use decomposition::{BacktrackingDecomposer, Decomposition, EdgeType};
pub use graph::CubicGraph;
pub use sat::SatDecomposer;

use anyhow::Result;

/// Main entry point: load the configured graphs and analyse them
pub fn analyze_graphs(settings: Settings) -> Result<AnalysisReport> {
    GraphAnalyser::new(settings).run()
}
