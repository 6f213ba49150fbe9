//! The CNF encoder: builds the Herbrand base and variable table, then
//! emits the five clause groups (initial state, goal state, action
//! implications, frame axioms, exactly-one-action-per-step) for a
//! given horizon.

pub mod cnf;
pub mod table;

use std::collections::HashSet;

use crate::misc::log::targets;
use crate::problem::ground::GroundedProblem;
use crate::problem::{Problem, SignedAtom};
use crate::types::{literal_of, Clause};

pub use cnf::Cnf;
pub use table::{VarEntry, VariableTable};

/// Builds the Herbrand base, allocates the variable table, and emits
/// the full CNF encoding of "a plan of length ≤ `horizon` exists".
///
/// Returns the table (needed to interpret a model) alongside the CNF.
pub fn encode(problem: &Problem, grounded: &GroundedProblem, horizon: u32) -> (VariableTable, Cnf) {
    let herbrand = collect_herbrand_base(problem, grounded);

    let mut table = VariableTable::new();
    for name in &herbrand {
        table.ensure_atom(name, horizon);
    }
    for action in &grounded.actions {
        table.ensure_action(&action.name, horizon);
    }

    log::info!(
        target: targets::ENCODE,
        "horizon {horizon}: {} herbrand atom(s), {} ground action(s), {} variable(s)",
        herbrand.len(),
        grounded.actions.len(),
        table.len()
    );

    let mut cnf = Cnf::new();
    encode_initial_state(problem, &herbrand, &table, &mut cnf);
    encode_goal_state(problem, &table, horizon, &mut cnf);
    encode_action_implications(grounded, &table, horizon, &mut cnf);
    encode_frame_axioms(grounded, &herbrand, &table, horizon, &mut cnf);
    encode_exactly_one_action(grounded, &table, horizon, &mut cnf);

    log::debug!(
        target: targets::ENCODE,
        "horizon {horizon}: {} clause(s) after dedup",
        cnf.len()
    );

    (table, cnf)
}

/// The Herbrand base: every ground atom name appearing in the initial
/// state, the goal, or any ground action's preconditions/effects — in
/// that order, deduplicated on first occurrence. Fixing this order is
/// what makes variable allocation, and therefore the whole encoding,
/// deterministic across runs.
fn collect_herbrand_base(problem: &Problem, grounded: &GroundedProblem) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut order = Vec::new();
    let mut note = |name: String, seen: &mut HashSet<String>, order: &mut Vec<String>| {
        if seen.insert(name.clone()) {
            order.push(name);
        }
    };

    for atom in &problem.initial {
        note(atom.canonical_name(), &mut seen, &mut order);
    }
    for atom in &problem.goal {
        note(atom.canonical_name(), &mut seen, &mut order);
    }
    for action in &grounded.actions {
        for atom in &action.preconditions {
            note(atom.canonical_name(), &mut seen, &mut order);
        }
        for atom in &action.effects {
            note(atom.canonical_name(), &mut seen, &mut order);
        }
    }

    order
}

/// Group 1: closed-world initial state at t=0.
fn encode_initial_state(
    problem: &Problem,
    herbrand: &[String],
    table: &VariableTable,
    cnf: &mut Cnf,
) {
    let initial_value: std::collections::HashMap<String, bool> = problem
        .initial
        .iter()
        .map(|atom| (atom.atom.canonical_name(), atom.positive))
        .collect();

    for name in herbrand {
        let id = table.atom_id(name, 0);
        let truth = initial_value.get(name).copied().unwrap_or(false);
        cnf.push(Clause::unit(literal_of(id, truth)));
    }
}

/// Group 2: the goal state at t=H.
fn encode_goal_state(problem: &Problem, table: &VariableTable, horizon: u32, cnf: &mut Cnf) {
    for goal in &problem.goal {
        let id = table.atom_id(&goal.canonical_name(), horizon);
        cnf.push(Clause::unit(literal_of(id, goal.positive)));
    }
}

/// Group 3: for every ground action and every t in 0..H, the action
/// implies each of its preconditions at t and each of its effects at
/// t+1.
fn encode_action_implications(
    grounded: &GroundedProblem,
    table: &VariableTable,
    horizon: u32,
    cnf: &mut Cnf,
) {
    for action in &grounded.actions {
        for t in 0..horizon {
            let act_id = table.action_id(&action.name, t);
            for pre in &action.preconditions {
                let atom_id = table.atom_id(&pre.canonical_name(), t);
                cnf.push_literals([literal_of(act_id, false), literal_of(atom_id, pre.positive)]);
            }
            for eff in &action.effects {
                let atom_id = table.atom_id(&eff.canonical_name(), t + 1);
                cnf.push_literals([literal_of(act_id, false), literal_of(atom_id, eff.positive)]);
            }
        }
    }
}

/// Group 4: classical frame axioms. For every ground action and every
/// atom not among that action's effects, the atom's value at t+1 is
/// forced to equal its value at t whenever the action fires at t
/// (t in 0..H).
fn encode_frame_axioms(
    grounded: &GroundedProblem,
    herbrand: &[String],
    table: &VariableTable,
    horizon: u32,
    cnf: &mut Cnf,
) {
    for action in &grounded.actions {
        let effect_names = action.effect_atom_names();
        for atom_name in herbrand {
            if effect_names.contains(atom_name) {
                continue;
            }
            for t in 0..horizon {
                let act_id = table.action_id(&action.name, t);
                let at_t = table.atom_id(atom_name, t);
                let at_t1 = table.atom_id(atom_name, t + 1);
                cnf.push_literals([
                    literal_of(act_id, false),
                    literal_of(at_t1, false),
                    literal_of(at_t, true),
                ]);
                cnf.push_literals([
                    literal_of(act_id, false),
                    literal_of(at_t1, true),
                    literal_of(at_t, false),
                ]);
            }
        }
    }
}

/// Group 5: exactly one action fires at each of the `horizon` time
/// steps, t in 0..H.
fn encode_exactly_one_action(
    grounded: &GroundedProblem,
    table: &VariableTable,
    horizon: u32,
    cnf: &mut Cnf,
) {
    for t in 0..horizon {
        let ids: Vec<_> = grounded
            .actions
            .iter()
            .map(|a| table.action_id(&a.name, t))
            .collect();

        for i in 0..ids.len() {
            for j in (i + 1)..ids.len() {
                cnf.push_literals([literal_of(ids[i], false), literal_of(ids[j], false)]);
            }
        }

        if !ids.is_empty() {
            cnf.push_literals(ids.iter().map(|&id| literal_of(id, true)));
        }
    }
}

/// Helper re-exported for callers that just want a canonical-name lookup
/// without importing [`SignedAtom`] directly.
pub fn canonical_name(atom: &SignedAtom) -> String {
    atom.canonical_name()
}
