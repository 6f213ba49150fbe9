//! Properties that should hold of any model and encoding this crate
//! produces: soundness, the Herbrand arithmetic invariant,
//! exactly-one-action-per-step, and frame soundness, checked against
//! models returned by both solver variants.

use std::collections::HashSet;

use satplan_core::config::SolverVariant;
use satplan_core::encode::{self, VarEntry};
use satplan_core::problem::ground::ground;
use satplan_core::problem::Problem;
use satplan_core::solve;
use satplan_core::types::{polarity_of, var_of};

const VARIANTS: [SolverVariant; 2] = [SolverVariant::Recursive, SolverVariant::Iterative];

const DOMAIN: &str =
    "I at(A) clear(B)\nG at(B)\nA move(x,y): at(x) clear(y) -> -at(x) at(y) -clear(y) clear(x)\n";

#[test]
fn every_clause_is_satisfied_by_the_returned_model() {
    let problem = Problem::parse(DOMAIN).unwrap();
    let grounded = ground(&problem);
    let (table, cnf) = encode::encode(&problem, &grounded, 2);
    let symbols = table.all_ids();

    for variant in VARIANTS {
        let model = solve::solve(&cnf, &symbols, table.len(), variant).expect("expected SAT");
        for clause in cnf.clauses() {
            let satisfied = clause
                .as_slice()
                .iter()
                .any(|&lit| model.get(var_of(lit)) == Some(polarity_of(lit)));
            assert!(satisfied, "variant {variant}: clause {clause} unsatisfied");
        }
    }
}

#[test]
fn exactly_one_action_fires_at_every_time_step() {
    let problem = Problem::parse(DOMAIN).unwrap();
    let grounded = ground(&problem);
    let (table, cnf) = encode::encode(&problem, &grounded, 2);
    let symbols = table.all_ids();

    for variant in VARIANTS {
        let model = solve::solve(&cnf, &symbols, table.len(), variant).expect("expected SAT");
        let mut true_actions_at: std::collections::HashMap<u32, usize> = std::collections::HashMap::new();
        for id in 1..=(table.len() as u32) {
            if let VarEntry::Action { t, .. } = table.entry(id) {
                if model.get(id) == Some(true) {
                    *true_actions_at.entry(*t).or_insert(0) += 1;
                }
            }
        }
        for t in 0..2u32 {
            assert_eq!(
                true_actions_at.get(&t).copied().unwrap_or(0),
                1,
                "variant {variant}: expected exactly one action at t={t}"
            );
        }
    }
}

#[test]
fn frame_soundness_holds_for_every_action_and_non_effect_atom() {
    let problem = Problem::parse(DOMAIN).unwrap();
    let grounded = ground(&problem);
    let (table, cnf) = encode::encode(&problem, &grounded, 2);
    let symbols = table.all_ids();

    for variant in VARIANTS {
        let model = solve::solve(&cnf, &symbols, table.len(), variant).expect("expected SAT");

        for action in &grounded.actions {
            let effect_names: HashSet<String> = action.effect_atom_names();
            for t in 0..2u32 {
                let act_id = table.action_id(&action.name, t);
                if model.get(act_id) != Some(true) {
                    continue;
                }
                for herbrand_atom in collect_herbrand(&problem, &grounded) {
                    if effect_names.contains(&herbrand_atom) {
                        continue;
                    }
                    let at_t = table.atom_id(&herbrand_atom, t);
                    let at_t1 = table.atom_id(&herbrand_atom, t + 1);
                    assert_eq!(
                        model.get(at_t),
                        model.get(at_t1),
                        "variant {variant}: frame violated for {herbrand_atom} across action {} at t={t}",
                        action.name
                    );
                }
            }
        }
    }
}

#[test]
fn herbrand_arithmetic_invariant_holds_across_horizons() {
    let problem = Problem::parse(DOMAIN).unwrap();
    let grounded = ground(&problem);
    for horizon in 0..=3u32 {
        let (table, _cnf) = encode::encode(&problem, &grounded, horizon);
        for atom in collect_herbrand(&problem, &grounded) {
            for t in 0..horizon {
                let id_t = table.atom_id(&atom, t);
                let id_t1 = table.atom_id(&atom, t + 1);
                assert_eq!(id_t1, id_t + 1, "failed for {atom} at horizon {horizon}, t={t}");
            }
        }
    }
}

#[test]
fn encoding_is_deterministic_across_runs() {
    let problem = Problem::parse(DOMAIN).unwrap();
    let grounded = ground(&problem);
    let (table_a, cnf_a) = encode::encode(&problem, &grounded, 2);
    let (table_b, cnf_b) = encode::encode(&problem, &grounded, 2);
    assert_eq!(table_a.len(), table_b.len());
    assert_eq!(cnf_a.clauses(), cnf_b.clauses());
}

fn collect_herbrand(
    problem: &Problem,
    grounded: &satplan_core::problem::ground::GroundedProblem,
) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut order = Vec::new();
    for atom in &problem.initial {
        if seen.insert(atom.canonical_name()) {
            order.push(atom.canonical_name());
        }
    }
    for atom in &problem.goal {
        if seen.insert(atom.canonical_name()) {
            order.push(atom.canonical_name());
        }
    }
    for action in &grounded.actions {
        for atom in action.preconditions.iter().chain(action.effects.iter()) {
            if seen.insert(atom.canonical_name()) {
                order.push(atom.canonical_name());
            }
        }
    }
    order
}
