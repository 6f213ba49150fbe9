//! Grounding: expanding each action schema against the problem's
//! constants until no schema variables remain.

use std::collections::HashSet;

use crate::misc::log::targets;
use crate::problem::{is_variable, ActionSchema, Problem, SignedAtom};

/// A schema with every variable replaced by a constant: preconditions
/// and effects are now ground (variable-free) atoms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroundAction {
    /// Canonical name, e.g. `"move A B"`.
    pub name: String,
    pub preconditions: Vec<SignedAtom>,
    pub effects: Vec<SignedAtom>,
}

impl GroundAction {
    /// The set of (unsigned) atom names this action's effects mention —
    /// used by the frame-axiom group to find atoms *not* touched by an
    /// action.
    pub fn effect_atom_names(&self) -> HashSet<String> {
        self.effects.iter().map(|e| e.canonical_name()).collect()
    }
}

/// All ground actions obtained from a problem's schemas, in grounding
/// order (deterministic: schemas are processed in declaration order, and
/// within a schema, constant combinations are enumerated in the
/// problem's constant order).
#[derive(Debug, Clone, Default)]
pub struct GroundedProblem {
    pub actions: Vec<GroundAction>,
}

/// Expands every schema in `problem` against `problem.constants`,
/// deduplicating by canonical ground-action name.
pub fn ground(problem: &Problem) -> GroundedProblem {
    let mut actions = Vec::new();
    let mut seen = HashSet::new();

    for schema in &problem.schemas {
        for ground_action in ground_schema(schema, &problem.constants) {
            if seen.insert(ground_action.name.clone()) {
                actions.push(ground_action);
            } else {
                log::trace!(
                    target: targets::GROUND,
                    "dropped duplicate ground action {}",
                    ground_action.name
                );
            }
        }
    }

    log::debug!(
        target: targets::GROUND,
        "grounded {} schema(s) into {} ground action(s)",
        problem.schemas.len(),
        actions.len()
    );

    GroundedProblem { actions }
}

/// Expands a single schema against `constants`: substitutes every
/// distinct variable (in [`ActionSchema::variables`] order) with every
/// element of the constant set, one variable at a time, producing the
/// full cartesian product of substitutions. A schema with zero variables
/// yields exactly one (already-ground) action.
fn ground_schema(schema: &ActionSchema, constants: &[String]) -> Vec<GroundAction> {
    let variables = schema.variables();
    if variables.is_empty() {
        return vec![substitute(schema, &std::collections::HashMap::new())];
    }

    let mut results = Vec::new();
    let mut assignment = std::collections::HashMap::new();
    substitute_recursive(schema, &variables, 0, constants, &mut assignment, &mut results);
    results
}

fn substitute_recursive(
    schema: &ActionSchema,
    variables: &[String],
    idx: usize,
    constants: &[String],
    assignment: &mut std::collections::HashMap<String, String>,
    results: &mut Vec<GroundAction>,
) {
    if idx == variables.len() {
        results.push(substitute(schema, assignment));
        return;
    }
    let var = &variables[idx];
    for constant in constants {
        assignment.insert(var.clone(), constant.clone());
        substitute_recursive(schema, variables, idx + 1, constants, assignment, results);
    }
    assignment.remove(var);
}

/// Replaces every occurrence of a variable token with its assigned
/// constant, leaving constant tokens untouched, across the schema's
/// name, parameters, preconditions, and effects.
fn substitute(
    schema: &ActionSchema,
    assignment: &std::collections::HashMap<String, String>,
) -> GroundAction {
    let substituted_params: Vec<String> = schema
        .params
        .iter()
        .map(|p| substitute_token(p, assignment))
        .collect();
    let name = if substituted_params.is_empty() {
        schema.name.clone()
    } else {
        format!("{} {}", schema.name, substituted_params.join(" "))
    };

    let preconditions = schema
        .preconditions
        .iter()
        .map(|lit| substitute_signed_atom(lit, assignment))
        .collect();
    let effects = schema
        .effects
        .iter()
        .map(|lit| substitute_signed_atom(lit, assignment))
        .collect();

    GroundAction {
        name,
        preconditions,
        effects,
    }
}

fn substitute_signed_atom(
    lit: &SignedAtom,
    assignment: &std::collections::HashMap<String, String>,
) -> SignedAtom {
    SignedAtom {
        positive: lit.positive,
        atom: crate::problem::AtomTerm {
            predicate: lit.atom.predicate.clone(),
            args: lit
                .atom
                .args
                .iter()
                .map(|a| substitute_token(a, assignment))
                .collect(),
        },
    }
}

fn substitute_token(token: &str, assignment: &std::collections::HashMap<String, String>) -> String {
    if is_variable(token) {
        assignment
            .get(token)
            .cloned()
            .unwrap_or_else(|| token.to_string())
    } else {
        token.to_string()
    }
}
