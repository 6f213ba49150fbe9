//! Six concrete planning scenarios, run through the full
//! encode → solve → extract pipeline at both solver variants.

use satplan_core::config::SolverVariant;
use satplan_core::problem::ground::ground;
use satplan_core::problem::Problem;
use satplan_core::{encode, plan, solve};

fn run(source: &str, horizon: u32, variant: SolverVariant) -> Option<Vec<plan::PlanStep>> {
    let problem = Problem::parse(source).unwrap();
    let grounded = ground(&problem);
    let (table, cnf) = encode::encode(&problem, &grounded, horizon);
    let symbols = table.all_ids();
    let model = solve::solve(&cnf, &symbols, table.len(), variant)?;
    Some(plan::extract(&table, &model))
}

const VARIANTS: [SolverVariant; 2] = [SolverVariant::Recursive, SolverVariant::Iterative];

#[test]
fn scenario_1_trivial_already_solved() {
    for variant in VARIANTS {
        let plan = run("I p\nG p\n", 0, variant).expect("expected SAT");
        assert!(plan.is_empty(), "variant {variant} expected an empty plan");
    }
}

#[test]
fn scenario_2_one_step() {
    for variant in VARIANTS {
        let plan = run("I p\nG q\nA toggle: p -> -p q\n", 1, variant).expect("expected SAT");
        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].t, 0);
        assert_eq!(plan[0].name, "toggle");
    }
}

#[test]
fn scenario_3_grounding() {
    for variant in VARIANTS {
        let plan = run(
            "I at(A)\nG at(B)\nA move(x,y): at(x) -> -at(x) at(y)\n",
            1,
            variant,
        )
        .expect("expected SAT");
        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].t, 0);
        assert_eq!(plan[0].name, "move A B");
    }
}

#[test]
fn scenario_4_unsat_on_horizon() {
    for variant in VARIANTS {
        let plan = run(
            "I at(A)\nG at(B)\nA move(x,y): at(x) -> -at(x) at(y)\n",
            0,
            variant,
        );
        assert!(plan.is_none(), "variant {variant} expected UNSAT");
    }
}

#[test]
fn scenario_5_two_step_multiple_fluents() {
    for variant in VARIANTS {
        let plan = run(
            "I at(A) clear(B)\nG at(B)\nA move(x,y): at(x) clear(y) -> -at(x) at(y) -clear(y) clear(x)\n",
            2,
            variant,
        )
        .expect("expected SAT");
        assert!(
            plan.iter().any(|step| step.t == 0 && step.name == "move A B"),
            "variant {variant} expected 'move A B' at t=0"
        );
    }
}

#[test]
fn scenario_6_pure_literal_pruning_does_not_change_the_answer() {
    // A variable appearing with only one polarity must still be solved
    // correctly by both variants (the decision-count claim in the
    // distilled spec is an internal invariant of the recursive
    // implementation, exercised directly in `solve::recursive`'s unit
    // tests; here we only check the externally observable outcome).
    use satplan_core::types::Clause;
    let clauses = vec![
        Clause::from_literals([1, 2]),
        Clause::from_literals([1, -2]),
    ];
    for variant in VARIANTS {
        let model = solve::solve_raw(&clauses, &[1, 2], 2, variant).expect("expected SAT");
        assert_eq!(model.get(1), Some(true));
    }
}
