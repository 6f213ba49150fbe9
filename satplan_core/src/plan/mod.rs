//! Plan extraction: scans a satisfying model for ground action ids
//! assigned true and orders them into a plan.

use crate::encode::{VarEntry, VariableTable};
use crate::misc::log::targets;
use crate::solve::Model;
use crate::types::VarId;

/// One step of an extracted plan: a ground action name at a time step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanStep {
    pub t: u32,
    pub name: String,
}

impl std::fmt::Display for PlanStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Extracts the ordered plan from a satisfying `model`: every ground
/// action id assigned `true`, sorted by time step ascending (ties
/// broken by id), with Herbrand-base atoms filtered out entirely.
pub fn extract(table: &VariableTable, model: &Model) -> Vec<PlanStep> {
    let mut steps: Vec<(u32, VarId, String)> = Vec::new();

    for id in 1..=(table.len() as VarId) {
        if let VarEntry::Action { name, t } = table.entry(id) {
            if model.get(id) == Some(true) {
                steps.push((*t, id, name.clone()));
            }
        }
    }

    steps.sort_by_key(|(t, id, _)| (*t, *id));

    log::info!(target: targets::PLAN, "extracted plan with {} step(s)", steps.len());

    steps
        .into_iter()
        .map(|(t, _, name)| PlanStep { t, name })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SolverVariant;
    use crate::problem::ground::ground;
    use crate::problem::Problem;
    use crate::{encode, solve};

    #[test]
    fn extracts_single_step_plan() {
        let problem = Problem::parse("I p\nG q\nA toggle: p -> -p q\n").unwrap();
        let grounded = ground(&problem);
        let (table, cnf) = encode::encode(&problem, &grounded, 1);
        let symbols = table.all_ids();
        let model = solve::solve(&cnf, &symbols, table.len(), SolverVariant::Iterative).unwrap();
        let plan = extract(&table, &model);
        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].t, 0);
        assert_eq!(plan[0].name, "toggle");
    }

    #[test]
    fn extracts_grounded_move_action() {
        let problem = Problem::parse(
            "I at(A)\nG at(B)\nA move(x,y): at(x) -> -at(x) at(y)\n",
        )
        .unwrap();
        let grounded = ground(&problem);
        let (table, cnf) = encode::encode(&problem, &grounded, 1);
        let symbols = table.all_ids();
        let model = solve::solve(&cnf, &symbols, table.len(), SolverVariant::Iterative).unwrap();
        let plan = extract(&table, &model);
        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].name, "move A B");
    }

    #[test]
    fn empty_plan_when_goal_already_holds() {
        let problem = Problem::parse("I p\nG p\n").unwrap();
        let grounded = ground(&problem);
        let (table, cnf) = encode::encode(&problem, &grounded, 0);
        let symbols = table.all_ids();
        let model = solve::solve(&cnf, &symbols, table.len(), SolverVariant::Iterative).unwrap();
        let plan = extract(&table, &model);
        assert!(plan.is_empty());
    }

    #[test]
    fn unsat_on_exhausted_horizon() {
        let problem = Problem::parse(
            "I at(A)\nG at(B)\nA move(x,y): at(x) -> -at(x) at(y)\n",
        )
        .unwrap();
        let grounded = ground(&problem);
        let (table, cnf) = encode::encode(&problem, &grounded, 0);
        let symbols = table.all_ids();
        let model = solve::solve(&cnf, &symbols, table.len(), SolverVariant::Iterative);
        assert!(model.is_none());
    }

    #[test]
    fn two_step_multi_fluent_plan() {
        let problem = Problem::parse(
            "I at(A) clear(B)\nG at(B)\nA move(x,y): at(x) clear(y) -> -at(x) at(y) -clear(y) clear(x)\n",
        )
        .unwrap();
        let grounded = ground(&problem);
        let (table, cnf) = encode::encode(&problem, &grounded, 2);
        let symbols = table.all_ids();
        let model = solve::solve(&cnf, &symbols, table.len(), SolverVariant::Iterative).unwrap();
        let plan = extract(&table, &model);
        assert!(plan.iter().any(|step| step.t == 0 && step.name == "move A B"));
    }

    #[test]
    fn recursive_and_iterative_variants_agree_on_satisfiability() {
        let problem = Problem::parse(
            "I at(A)\nG at(B)\nA move(x,y): at(x) -> -at(x) at(y)\n",
        )
        .unwrap();
        let grounded = ground(&problem);
        let (table, cnf) = encode::encode(&problem, &grounded, 1);
        let symbols = table.all_ids();
        let recursive = solve::solve(&cnf, &symbols, table.len(), SolverVariant::Recursive);
        let iterative = solve::solve(&cnf, &symbols, table.len(), SolverVariant::Iterative);
        assert_eq!(recursive.is_some(), iterative.is_some());
    }
}
