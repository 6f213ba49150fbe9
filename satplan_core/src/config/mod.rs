//! Configuration details.
//!
//! Unlike a general-purpose CDCL solver's configuration (VSIDS decay,
//! restart scheduling, clause-database reduction, …) this system is a
//! classical DPLL solver driven by a fixed encoding, so there is very
//! little to tune: which DPLL variant runs the search, and the horizon
//! range the outer retry loop (kept in `satplan_cli`) iterates over.

pub mod defaults;

/// Which DPLL implementation to run over a horizon's CNF encoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SolverVariant {
    /// The recursive DPLL procedure: simple, and the easiest to trust
    /// as a cross-check on the iterative variant.
    Recursive,
    /// The iterative procedure with a frequency heuristic, in-place
    /// clause mutation, and chronological backtracking.
    Iterative,
}

impl Default for SolverVariant {
    fn default() -> Self {
        SolverVariant::Iterative
    }
}

impl std::fmt::Display for SolverVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolverVariant::Recursive => write!(f, "recursive"),
            SolverVariant::Iterative => write!(f, "iterative"),
        }
    }
}

/// Top-level knobs shared by everything downstream of parsing.
#[derive(Clone, Debug)]
pub struct Config {
    /// Smallest horizon the outer retry loop tries.
    pub min_horizon: u32,
    /// Largest horizon the outer retry loop tries before giving up with
    /// [`crate::types::err::HorizonExhausted`].
    pub max_horizon: u32,
    /// Which DPLL implementation to use for each horizon's CNF.
    pub solver: SolverVariant,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            min_horizon: defaults::MIN_HORIZON,
            max_horizon: defaults::MAX_HORIZON,
            solver: SolverVariant::default(),
        }
    }
}
