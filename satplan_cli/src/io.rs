//! Thin wrappers around reading the `.dat` input and writing DIMACS
//! output. Parsing the contents into a [`satplan_core::problem::Problem`]
//! is the core crate's job; this module only does filesystem I/O and
//! formatting.

use std::io::Write;
use std::path::Path;

use satplan_core::encode::Cnf;
use satplan_core::problem::Problem;
use satplan_core::types::err;

/// Reads and parses a `.dat` file into a [`Problem`].
pub fn read_problem(path: &Path) -> std::io::Result<Result<Problem, err::Parse>> {
    let source = std::fs::read_to_string(path)?;
    Ok(Problem::parse(&source))
}

/// Writes `cnf` in standard DIMACS CNF format, with a free-form comment
/// line naming the source file and horizon.
pub fn write_dimacs(
    out: &mut impl Write,
    cnf: &Cnf,
    num_vars: usize,
    source: &Path,
    horizon: u32,
) -> std::io::Result<()> {
    writeln!(out, "c satplan encoding of {}", source.display())?;
    writeln!(out, "c horizon = {horizon}")?;
    writeln!(out, "p cnf {} {}", num_vars, cnf.len())?;
    for clause in cnf.clauses() {
        writeln!(out, "{clause}")?;
    }
    Ok(())
}
