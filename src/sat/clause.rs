//! Clause representation and reusable cardinality primitives

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

    /// Create a unit clause (single literal)
    pub fn unit(literal: i32) -> Self {
        Self { literals: vec![literal] }
    }

    /// Create a binary clause (two literals)
    pub fn binary(lit1: i32, lit2: i32) -> Self {
        Self { literals: vec![lit1, lit2] }
    }

    /// Check if clause is empty (unsatisfiable)
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    /// Check if clause is unit
    pub fn is_unit(&self) -> bool {
        self.literals.len() == 1
    }

    /// Largest variable index mentioned in the clause, 0 for the empty clause
    pub fn max_variable(&self) -> i32 {
        self.literals.iter().map(|lit| lit.abs()).max().unwrap_or(0)
    }

    /// Whether the clause holds under a predicate telling which variables are true
    pub fn is_satisfied_by<F: Fn(i32) -> bool>(&self, is_true: F) -> bool {
        self.literals
            .iter()
            .any(|&lit| if lit > 0 { is_true(lit) } else { !is_true(-lit) })
    }
}

/// A conjunction of clauses, tracking the highest variable it touches
#[derive(Debug, Clone, Default)]
pub struct ClauseSet {
    clauses: Vec<Clause>,
    max_variable: i32,
}

impl ClauseSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one clause
    pub fn push(&mut self, clause: Clause) {
        self.max_variable = self.max_variable.max(clause.max_variable());
        self.clauses.push(clause);
    }

    /// Append a clause built from raw literals
    pub fn add(&mut self, literals: Vec<i32>) {
        self.push(Clause::new(literals));
    }

    /// At least one of `vars` is true
    pub fn at_least_one(&mut self, vars: &[i32]) {
        self.push(Clause::new(vars.to_vec()));
    }

    /// No two of `vars` are true together (pairwise encoding)
    pub fn at_most_one(&mut self, vars: &[i32]) {
        for (a, b) in vars.iter().tuple_combinations() {
            self.push(Clause::binary(-a, -b));
        }
    }

    /// Exactly one of `vars` is true
    pub fn exactly_one(&mut self, vars: &[i32]) {
        self.at_least_one(vars);
        self.at_most_one(vars);
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Highest variable index referenced by any clause
    pub fn max_variable(&self) -> i32 {
        self.max_variable
    }
}

impl Extend<Clause> for ClauseSet {
    fn extend<I: IntoIterator<Item = Clause>>(&mut self, iter: I) {
        for clause in iter {
            self.push(clause);
        }
    }
}
