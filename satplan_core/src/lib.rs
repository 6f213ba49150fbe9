//! A library for solving STRIPS-style planning problems by reduction to
//! propositional satisfiability (SATPLAN).
//!
//! # The pipeline
//! A planning problem is read into a [`problem::Problem`], its action
//! schemas are expanded against the problem's constants by the
//! [`problem::ground`] module, the grounded problem and a time horizon are
//! handed to the [`encode`] module to build a [`encode::cnf::Cnf`], the CNF
//! is handed to one of the two [`solve`] variants, and a satisfying model
//! (if any) is turned into an ordered plan by [`plan`].
//!
//! # Design
//! - The encoder and solver are the two subsystems that carry the real
//!   engineering weight; parsing, DIMACS emission, and the outer
//!   horizon-retry loop are thin wrappers kept in the `satplan_cli` crate.
//! - Every identifier handed out by the encoder (atom or action, at any
//!   time step) is a stable, never-reused, append-only integer id. There
//!   is no object graph: literals are signed integers and clauses are
//!   vectors of literals.
//!
//! # A short guide to terminology
//!
//! - **Atom** — a ground predicate application, canonicalised to
//!   whitespace-separated tokens (`at(a,b)` becomes `at a b`).
//! - **Literal** — an atom or its negation, represented as a signed
//!   nonzero integer whose absolute value is a variable id.
//! - **Herbrand base** — the set of ground atom names relevant to a
//!   problem: those appearing in the initial state, the goal, or any
//!   grounded action's preconditions/effects.
//! - **Horizon** — the maximum number of action steps considered; see
//!   [`encode`] for the exact indexing convention used for time steps.

pub mod config;
pub mod encode;
pub mod misc;
pub mod plan;
pub mod problem;
pub mod solve;
pub mod types;
