//! SAT solver integration using CaDiCaL

use super::clause::{Clause, ClauseSet};
use anyhow::Result;
use cadical::{Solver, Timeout};
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// SAT solver wrapper for CaDiCaL
pub struct SatSolver {
    solver: Solver,
    variable_count: usize,
    clause_count: usize,
    /// Set once an empty clause has been added
    trivially_unsat: bool,
    timeout: Option<Duration>,
}

/// A satisfying assignment, one truth value per variable the clauses touch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Model {
    pub assignment: HashMap<i32, bool>,
}

impl Model {
    /// Build a model from signed literals, the way solvers usually report them
    pub fn from_literals<I: IntoIterator<Item = i32>>(literals: I) -> Self {
        let assignment = literals
            .into_iter()
            .filter(|&lit| lit != 0)
            .map(|lit| (lit.abs(), lit > 0))
            .collect();
        Self { assignment }
    }

    /// Whether `var` is assigned true; unassigned variables read as false
    pub fn is_true(&self, var: i32) -> bool {
        self.assignment.get(&var).copied().unwrap_or(false)
    }

    /// All variables assigned true, in ascending order
    pub fn true_variables(&self) -> Vec<i32> {
        let mut vars: Vec<i32> = self
            .assignment
            .iter()
            .filter(|(_, value)| **value)
            .map(|(&var, _)| var)
            .collect();
        vars.sort_unstable();
        vars
    }

    /// The model as signed literals, ascending by variable
    pub fn literals(&self) -> Vec<i32> {
        let mut vars: Vec<i32> = self.assignment.keys().copied().collect();
        vars.sort_unstable();
        vars.into_iter()
            .map(|var| if self.assignment[&var] { var } else { -var })
            .collect()
    }

    /// Check every clause of `clauses` against this model
    pub fn satisfies(&self, clauses: &ClauseSet) -> bool {
        clauses
            .clauses()
            .iter()
            .all(|clause| clause.is_satisfied_by(|var| self.is_true(var)))
    }

    pub fn len(&self) -> usize {
        self.assignment.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignment.is_empty()
    }
}

/// Result of SAT solving
#[derive(Debug, Clone)]
pub struct SolverSolution {
    pub model: Model,
    pub solve_time: Duration,
}

/// The two outcomes a completed solver call can have
#[derive(Debug, Clone)]
pub enum SolveOutcome {
    Satisfiable(SolverSolution),
    Unsatisfiable { solve_time: Duration },
}

impl SolveOutcome {
    pub fn is_satisfiable(&self) -> bool {
        matches!(self, SolveOutcome::Satisfiable(_))
    }

    pub fn solve_time(&self) -> Duration {
        match self {
            SolveOutcome::Satisfiable(solution) => solution.solve_time,
            SolveOutcome::Unsatisfiable { solve_time } => *solve_time,
        }
    }

    /// The model, if there is one
    pub fn into_model(self) -> Option<Model> {
        match self {
            SolveOutcome::Satisfiable(solution) => Some(solution.model),
            SolveOutcome::Unsatisfiable { .. } => None,
        }
    }
}

/// Statistics about the solving process
#[derive(Debug, Clone)]
pub struct SolverStatistics {
    pub variable_count: usize,
    pub clause_count: usize,
}

impl SatSolver {
    /// Create a new SAT solver instance
    pub fn new() -> Self {
        Self {
            solver: Solver::new(),
            variable_count: 0,
            clause_count: 0,
            trivially_unsat: false,
            timeout: None,
        }
    }

    /// Set solving timeout
    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = Some(timeout);
    }

    /// Add every clause of a clause set to the solver
    pub fn add_clause_set(&mut self, clauses: &ClauseSet) {
        self.add_clauses(clauses.clauses());
    }

    /// Add clauses to the solver
    pub fn add_clauses(&mut self, clauses: &[Clause]) {
        for clause in clauses {
            self.add_clause(clause);
        }
    }

    /// Add a single clause to the solver
    pub fn add_clause(&mut self, clause: &Clause) {
        self.clause_count += 1;

        if clause.is_empty() {
            // An empty disjunction can never hold.
            self.trivially_unsat = true;
            return;
        }

        let var = clause.max_variable() as usize;
        if var > self.variable_count {
            self.variable_count = var;
        }

        self.solver.add_clause(clause.literals.iter().copied());
    }

    /// Solve the SAT problem
    ///
    /// Returns an error only when the solver gives up (timeout) without
    /// deciding satisfiability.
    pub fn solve(&mut self) -> Result<SolveOutcome> {
        let start_time = Instant::now();

        if self.trivially_unsat {
            return Ok(SolveOutcome::Unsatisfiable {
                solve_time: start_time.elapsed(),
            });
        }

        if let Some(timeout) = self.timeout {
            self.solver
                .set_callbacks(Some(Timeout::new(timeout.as_secs_f32())));
        }

        let result = self.solver.solve();
        let solve_time = start_time.elapsed();

        match result {
            Some(true) => Ok(SolveOutcome::Satisfiable(SolverSolution {
                model: self.extract_model(),
                solve_time,
            })),
            Some(false) => Ok(SolveOutcome::Unsatisfiable { solve_time }),
            None => anyhow::bail!(
                "SAT solver stopped after {:.3}s without an answer",
                solve_time.as_secs_f64()
            ),
        }
    }

    /// Extract variable assignment from the solver
    fn extract_model(&self) -> Model {
        let mut assignment = HashMap::with_capacity(self.variable_count);

        for var in 1..=self.variable_count as i32 {
            // CaDiCaL leaves variables it never saw unassigned; they are free.
            let value = self.solver.value(var).unwrap_or(false);
            assignment.insert(var, value);
        }

        Model { assignment }
    }

    /// Get solver statistics
    pub fn statistics(&self) -> SolverStatistics {
        SolverStatistics {
            variable_count: self.variable_count,
            clause_count: self.clause_count,
        }
    }

    /// Get the number of variables
    pub fn variable_count(&self) -> usize {
        self.variable_count
    }

    /// Get the number of clauses
    pub fn clause_count(&self) -> usize {
        self.clause_count
    }

    /// Set solver configuration options
    pub fn configure(&mut self, options: &SolverOptions) {
        if let Some(timeout) = options.timeout {
            self.set_timeout(timeout);
        }
    }
}

impl Default for SatSolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Configuration options for the SAT solver
#[derive(Debug, Clone, Default)]
pub struct SolverOptions {
    pub timeout: Option<Duration>,
}

/// One-shot solve of a clause set with a fresh solver
pub fn solve_clause_set(clauses: &ClauseSet, options: &SolverOptions) -> Result<SolveOutcome> {
    let mut solver = SatSolver::new();
    solver.configure(options);
    solver.add_clause_set(clauses);
    log::debug!("{}", solver.statistics());
    solver.solve()
}

impl std::fmt::Display for SolverStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SAT Solver Statistics:")?;
        writeln!(f, "  Variables: {}", self.variable_count)?;
        writeln!(f, "  Clauses: {}", self.clause_count)?;
        Ok(())
    }
}

impl std::fmt::Display for SolverSolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SAT Solution:")?;
        writeln!(f, "  Solve time: {:.3}s", self.solve_time.as_secs_f64())?;
        writeln!(f, "  Variables assigned: {}", self.model.len())?;

        let literals = self.model.literals();
        write!(f, "  Sample assignments: ")?;
        for (i, lit) in literals.iter().take(10).enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}={}", lit.abs(), if *lit > 0 { "T" } else { "F" })?;
        }
        if literals.len() > 10 {
            write!(f, ", ...")?;
        }
        writeln!(f)?;

        Ok(())
    }
}
