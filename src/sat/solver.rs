//! Thin wrapper over CaDiCaL

use super::constraints::Clause;
use anyhow::Result;
use cadical::Solver;
use std::fmt;
use std::time::{Duration, Instant};
use tracing::debug;

/// Where the last `solve` call ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveStatus {
    Pending,
    Sat,
    Unsat,
    Unknown,
}

/// Model of a satisfiable formula; `model[i]` is the value of variable `i + 1`
#[derive(Debug, Clone)]
pub struct SolverSolution {
    model: Vec<bool>,
}

impl SolverSolution {
    pub fn value(&self, variable: i32) -> bool {
        variable > 0 && self.model.get(variable as usize - 1).copied().unwrap_or(false)
    }

    /// Variables assigned true, in increasing order
    pub fn true_variables(&self) -> Vec<i32> {
        self.model
            .iter()
            .enumerate()
            .filter(|(_, &value)| value)
            .map(|(index, _)| index as i32 + 1)
            .collect()
    }
}

/// Configuration forwarded to the solver
#[derive(Debug, Clone, Default)]
pub struct SolverOptions {
    pub num_threads: Option<usize>,
}

#[derive(Debug, Clone, Copy)]
pub struct SolverStatistics {
    pub variable_count: usize,
    pub clause_count: usize,
    pub solve_time: Duration,
    pub status: SolveStatus,
}

impl fmt::Display for SolverStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?}: {} variables, {} clauses, {:.3}s",
            self.status,
            self.variable_count,
            self.clause_count,
            self.solve_time.as_secs_f64()
        )
    }
}

/// One incremental CaDiCaL instance. Clauses use DIMACS literals.
pub struct SatSolver {
    solver: Solver,
    variable_count: usize,
    clause_count: usize,
    solve_time: Duration,
    status: SolveStatus,
}

impl SatSolver {
    pub fn new() -> Self {
        Self {
            solver: Solver::new(),
            variable_count: 0,
            clause_count: 0,
            solve_time: Duration::ZERO,
            status: SolveStatus::Pending,
        }
    }

    pub fn add_clauses(&mut self, clauses: &[Clause]) -> Result<()> {
        clauses.iter().try_for_each(|clause| self.add_clause(clause))
    }

    /// Add one clause. Empty clauses and the literal 0 are rejected.
    pub fn add_clause(&mut self, clause: &Clause) -> Result<()> {
        if clause.is_empty() {
            anyhow::bail!("Cannot add empty clause (unsatisfiable)");
        }
        if clause.literals.contains(&0) {
            anyhow::bail!("Literal 0 is reserved as the DIMACS clause terminator");
        }

        let widest = clause
            .literals
            .iter()
            .map(|literal| literal.unsigned_abs() as usize)
            .max()
            .unwrap_or(0);
        self.variable_count = self.variable_count.max(widest);

        self.solver.add_clause(clause.literals.iter().copied());
        self.clause_count += 1;
        Ok(())
    }

    /// Solve the clauses added so far. `None` means unsatisfiable.
    pub fn solve(&mut self) -> Result<Option<SolverSolution>> {
        let start_time = Instant::now();
        let answer = self.solver.solve();
        self.solve_time = start_time.elapsed();

        self.status = match answer {
            Some(true) => SolveStatus::Sat,
            Some(false) => SolveStatus::Unsat,
            None => SolveStatus::Unknown,
        };
        debug!("CaDiCaL: {}", self.statistics());

        match self.status {
            SolveStatus::Sat => Ok(Some(self.model())),
            SolveStatus::Unknown => anyhow::bail!("SAT solver stopped without an answer"),
            _ => Ok(None),
        }
    }

    fn model(&self) -> SolverSolution {
        let model = (1..=self.variable_count as i32)
            .map(|variable| self.solver.value(variable).unwrap_or(false))
            .collect();
        SolverSolution { model }
    }

    pub fn statistics(&self) -> SolverStatistics {
        SolverStatistics {
            variable_count: self.variable_count,
            clause_count: self.clause_count,
            solve_time: self.solve_time,
            status: self.status,
        }
    }

    pub fn variable_count(&self) -> usize {
        self.variable_count
    }

    pub fn clause_count(&self) -> usize {
        self.clause_count
    }

    pub fn configure(&mut self, options: &SolverOptions) {
        if let Some(threads) = options.num_threads.filter(|&threads| threads > 1) {
            debug!("CaDiCaL is single-threaded; ignoring num_threads = {}", threads);
        }
    }
}

impl Default for SatSolver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_solver() {
        let solver = SatSolver::new();
        assert_eq!(solver.variable_count(), 0);
        assert_eq!(solver.clause_count(), 0);
        assert_eq!(solver.statistics().status, SolveStatus::Pending);
    }

    #[test]
    fn test_forced_model() {
        let mut solver = SatSolver::new();
        // (x1 | x2) & (!x1 | x2) & (!x3)
        solver
            .add_clauses(&[Clause::new(vec![1, 2]), Clause::new(vec![-1, 2]), Clause::new(vec![-3])])
            .unwrap();

        let solution = solver.solve().unwrap().unwrap();
        assert!(solution.value(2));
        assert!(!solution.value(3));
        assert!(!solution.value(0));
        assert!(solution.true_variables().contains(&2));
        assert!(!solution.true_variables().contains(&3));
        assert_eq!(solver.statistics().status, SolveStatus::Sat);
    }

    #[test]
    fn test_contradiction() {
        let mut solver = SatSolver::new();
        solver
            .add_clauses(&[Clause::new(vec![1]), Clause::new(vec![-1])])
            .unwrap();

        assert!(solver.solve().unwrap().is_none());
        assert_eq!(solver.statistics().status, SolveStatus::Unsat);
    }

    #[test]
    fn test_rejected_clauses() {
        let mut solver = SatSolver::new();
        solver.configure(&SolverOptions { num_threads: Some(4) });
        assert!(solver.add_clause(&Clause::new(vec![])).is_err());
        assert!(solver.add_clause(&Clause::new(vec![1, 0])).is_err());
        assert_eq!(solver.clause_count(), 0);
        assert_eq!(solver.variable_count(), 0);
    }

    #[test]
    fn test_variable_count_tracks_widest_literal() {
        let mut solver = SatSolver::new();
        solver.add_clause(&Clause::new(vec![1, -5, 3])).unwrap();
        assert_eq!(solver.variable_count(), 5);
        solver.add_clause(&Clause::new(vec![2, -7])).unwrap();
        assert_eq!(solver.variable_count(), 7);
    }
}
