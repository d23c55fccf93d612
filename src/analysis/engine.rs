//! Engine selection: one interface over the backtracking and SAT decomposers

use crate::config::{EngineBackend, EngineConfig};
use crate::decomposition::{BacktrackingDecomposer, Decomposition};
use crate::graph::CubicGraph;
use crate::sat::{SatDecomposer, SolverOptions};
use anyhow::Result;

/// A decomposition engine bound to one graph
pub enum DecompositionEngine<'g> {
    Backtracking(BacktrackingDecomposer<'g>),
    Sat(SatDecomposer<'g>),
}

impl<'g> DecompositionEngine<'g> {
    /// Create an engine for `graph` using the configured backend
    pub fn new(backend: EngineBackend, graph: &'g CubicGraph, config: &EngineConfig) -> Self {
        match backend {
            EngineBackend::Backtracking => {
                DecompositionEngine::Backtracking(BacktrackingDecomposer::with_traversal(graph, config.traversal))
            }
            EngineBackend::Sat => {
                let options = SolverOptions {
                    num_threads: Some(config.num_threads),
                };
                DecompositionEngine::Sat(SatDecomposer::with_options(graph, options))
            }
        }
    }

    pub fn is_decomposable(&mut self) -> Result<bool> {
        match self {
            DecompositionEngine::Backtracking(engine) => Ok(engine.is_decomposable()),
            DecompositionEngine::Sat(engine) => engine.is_decomposable(),
        }
    }

    /// First decomposition found; all `None` when the graph has none
    pub fn decomposition(&mut self) -> Result<Decomposition> {
        match self {
            DecompositionEngine::Backtracking(engine) => Ok(engine.decomposition()),
            DecompositionEngine::Sat(engine) => engine.decomposition(),
        }
    }

    /// Exhaustive count; only the backtracking engine enumerates
    pub fn decompositions_count(&mut self) -> Result<u64> {
        match self {
            DecompositionEngine::Backtracking(engine) => Ok(engine.decompositions_count()),
            DecompositionEngine::Sat(_) => {
                anyhow::bail!("The SAT engine cannot count decompositions; use the backtracking engine")
            }
        }
    }

    /// Get the backend type being used
    pub fn backend(&self) -> EngineBackend {
        match self {
            DecompositionEngine::Backtracking(_) => EngineBackend::Backtracking,
            DecompositionEngine::Sat(_) => EngineBackend::Sat,
        }
    }
}
