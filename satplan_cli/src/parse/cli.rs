//! Command-line surface, built with `clap`'s derive macros.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use satplan_core::config::SolverVariant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SolverArg {
    Recursive,
    Iterative,
}

impl From<SolverArg> for SolverVariant {
    fn from(value: SolverArg) -> Self {
        match value {
            SolverArg::Recursive => SolverVariant::Recursive,
            SolverArg::Iterative => SolverVariant::Iterative,
        }
    }
}

/// Solves a STRIPS-style planning problem by reduction to propositional
/// satisfiability.
#[derive(Debug, Parser)]
#[command(name = "satplan", version, about)]
pub struct Cli {
    /// The `.dat` file describing the planning problem.
    pub input: PathBuf,

    /// Smallest horizon to try.
    #[arg(long, value_name = "H")]
    pub horizon_min: Option<u32>,

    /// Largest horizon to try before giving up.
    #[arg(long, value_name = "H")]
    pub horizon_max: Option<u32>,

    /// Which DPLL implementation to run over each horizon's CNF.
    #[arg(long, value_enum, default_value_t = SolverArg::Iterative)]
    pub solver: SolverArg,

    /// Write the DIMACS CNF for the solved (or, on failure, the last
    /// attempted) horizon to this path instead of/as well as solving.
    #[arg(long, value_name = "PATH")]
    pub dimacs: Option<PathBuf>,

    /// Increase log verbosity (repeatable: `-v`, `-vv`, `-vvv`).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
