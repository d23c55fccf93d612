//! SAT-based MED decomposition: build the encoding, solve, decode

use super::constraints::{ConstraintGenerator, ConstraintStatistics};
use super::solver::{SatSolver, SolverOptions, SolverSolution};
use super::variables::EdgeVariables;
use crate::decomposition::{Decomposition, DecompositionValidator};
use crate::graph::CubicGraph;
use anyhow::{Context, Result};
use std::time::Duration;
use tracing::{debug, warn};

/// Outcome of one SAT run
#[derive(Debug, Clone)]
pub struct SatOutcome {
    pub decomposable: bool,
    pub decomposition: Option<Decomposition>,
    pub solve_time: Duration,
    pub statistics: ConstraintStatistics,
}

/// SAT engine for one graph. The encoding is built and solved on first use.
pub struct SatDecomposer<'g> {
    graph: &'g CubicGraph,
    options: SolverOptions,
    outcome: Option<SatOutcome>,
}

impl<'g> SatDecomposer<'g> {
    pub fn new(graph: &'g CubicGraph) -> Self {
        Self::with_options(graph, SolverOptions::default())
    }

    pub fn with_options(graph: &'g CubicGraph, options: SolverOptions) -> Self {
        Self {
            graph,
            options,
            outcome: None,
        }
    }

    /// Encode, solve and decode, caching the outcome
    pub fn solve(&mut self) -> Result<&SatOutcome> {
        if self.outcome.is_none() {
            let outcome = self.run().context("SAT decomposition failed")?;
            self.outcome = Some(outcome);
        }
        self.outcome
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("SAT outcome missing after solve"))
    }

    pub fn is_decomposable(&mut self) -> Result<bool> {
        Ok(self.solve()?.decomposable)
    }

    /// The decoded decomposition, or an all-`None` table when unsatisfiable
    pub fn decomposition(&mut self) -> Result<Decomposition> {
        let n = self.graph.vertex_count();
        Ok(self
            .solve()?
            .decomposition
            .clone()
            .unwrap_or_else(|| Decomposition::empty(n)))
    }

    fn run(&self) -> Result<SatOutcome> {
        let mut generator = ConstraintGenerator::new(self.graph);
        let clauses = generator
            .generate_all_constraints()
            .context("Failed to generate SAT constraints")?;
        let statistics = generator.statistics();
        debug!(
            "Generated {} clauses with {} variables",
            statistics.total_clauses, statistics.total_variables
        );

        let mut solver = SatSolver::new();
        solver.configure(&self.options);
        solver
            .add_clauses(&clauses)
            .context("Failed to add clauses to SAT solver")?;

        let solution = solver.solve().context("SAT solving failed")?;
        let solve_time = solver.statistics().solve_time;

        let decomposition = match solution {
            Some(solution) => {
                let decomposition = self.decode(&solution, generator.variables());
                self.check_witness(&decomposition)?;
                Some(decomposition)
            }
            None => None,
        };

        Ok(SatOutcome {
            decomposable: decomposition.is_some(),
            decomposition,
            solve_time,
            statistics,
        })
    }

    /// Reject a decoded model the validator does not accept
    fn check_witness(&self, decomposition: &Decomposition) -> Result<()> {
        let validation = DecompositionValidator::new(self.graph).validate(decomposition);
        if !validation.is_valid {
            let message = validation.error_message.unwrap_or_default();
            warn!("Decoded SAT model rejected: {}", message);
            anyhow::bail!("Decoded SAT model is not a valid decomposition: {}", message);
        }
        Ok(())
    }

    /// Map each true indicator back to an edge type on both slots of its edge
    fn decode(&self, solution: &SolverSolution, variables: &EdgeVariables) -> Decomposition {
        let mut decomposition = Decomposition::empty(self.graph.vertex_count());

        for literal in solution.true_variables() {
            if let Some((edge, subtype)) = variables.decode_literal(literal) {
                let e = self.graph.edge(edge);
                decomposition.assign(self.graph, e.u, e.slot_u, subtype.edge_type());
            }
        }

        decomposition
    }
}
