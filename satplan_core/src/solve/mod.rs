//! DPLL satisfiability search: a recursive reference variant and an
//! iterative variant with a branching heuristic and chronological
//! backtracking.

pub mod iterative;
pub mod recursive;

use crate::config::SolverVariant;
use crate::encode::Cnf;
use crate::types::{Clause, VarId};

/// A (necessarily total, on return) assignment of truth values to every
/// variable id from `1` to `num_vars`.
#[derive(Debug, Clone)]
pub struct Model {
    values: Vec<Option<bool>>,
}

impl Model {
    pub fn new(num_vars: usize) -> Self {
        Model {
            values: vec![None; num_vars + 1],
        }
    }

    pub fn get(&self, var: VarId) -> Option<bool> {
        self.values[var as usize]
    }

    pub fn set(&mut self, var: VarId, value: bool) {
        self.values[var as usize] = Some(value);
    }

    pub fn unset(&mut self, var: VarId) {
        self.values[var as usize] = None;
    }

    pub fn is_complete(&self) -> bool {
        self.values[1..].iter().all(|v| v.is_some())
    }

    pub fn num_vars(&self) -> usize {
        self.values.len().saturating_sub(1)
    }
}

/// Runs the DPLL search selected by `variant` over `cnf`'s clauses,
/// deciding among `symbols` (normally every allocated variable id).
pub fn solve(cnf: &Cnf, symbols: &[VarId], num_vars: usize, variant: SolverVariant) -> Option<Model> {
    solve_raw(cnf.clauses(), symbols, num_vars, variant)
}

/// As [`solve`], but over a bare clause slice rather than a [`Cnf`] —
/// useful for tests and callers that already have raw clauses (e.g. a
/// DIMACS file read directly, bypassing the planning encoder).
pub fn solve_raw(
    clauses: &[Clause],
    symbols: &[VarId],
    num_vars: usize,
    variant: SolverVariant,
) -> Option<Model> {
    match variant {
        SolverVariant::Recursive => recursive::solve(clauses, symbols, num_vars),
        SolverVariant::Iterative => iterative::solve(clauses, symbols, num_vars),
    }
}
