//! The iterative DPLL procedure: a frequency-based branching heuristic,
//! in-place clause mutation with a backtrack trail, and chronological
//! backtracking driven by conflict analysis.
//!
//! The clause set is represented as a slot array (`Vec<Option<Clause>>`)
//! rather than removing clauses outright, so a clause's *position* is a
//! stable identifier usable as a bookkeeping key across the life of the
//! search — see [`Solver::modified`] and [`Solver::first_modifier`].

use std::collections::HashMap;

use crate::misc::log::targets;
use crate::types::{polarity_of, var_of, Clause, VarId};

use super::Model;

/// How an entry on the trail came to be assigned. Only `Decision`s can
/// ever be flipped by conflict analysis; `Pure` and `Unit` assignments
/// are skipped over when searching for a backtrack level, since the
/// implication that forced them is still unsatisfied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AssignKind {
    Pure,
    Unit,
    Decision { tried_both: bool },
}

#[derive(Debug, Clone)]
struct TrailEntry {
    var: VarId,
    value: bool,
    kind: AssignKind,
}

/// Runs the iterative DPLL procedure. Returns `None` for UNSAT.
pub fn solve(clauses: &[Clause], symbols: &[VarId], num_vars: usize) -> Option<Model> {
    log::debug!(
        target: targets::SOLVE,
        "iterative DPLL starting over {} clause(s), {} symbol(s)",
        clauses.len(),
        symbols.len()
    );
    let mut solver = Solver::new(clauses, symbols, num_vars);
    solver.run()
}

struct Solver {
    working: Vec<Option<Clause>>,
    symbols: Vec<VarId>,
    model: Model,
    trail: Vec<TrailEntry>,
    /// `modified[p]` records, for each clause slot first touched while
    /// processing the assignment at trail position `p`, its content
    /// immediately *before* that touch — so backtracking past `p`
    /// restores exactly that slot's pristine state.
    modified: HashMap<usize, Vec<(usize, Clause)>>,
    /// `first_modifier[slot]` is the trail position that holds the
    /// restore snapshot currently valid for `slot`; a slot is only
    /// snapshotted once between restorations.
    first_modifier: HashMap<usize, usize>,
}

enum StepOutcome {
    Sat,
    Conflict,
    Continue,
}

impl Solver {
    fn new(clauses: &[Clause], symbols: &[VarId], num_vars: usize) -> Self {
        Solver {
            working: clauses.iter().cloned().map(Some).collect(),
            symbols: symbols.to_vec(),
            model: Model::new(num_vars),
            trail: Vec::new(),
            modified: HashMap::new(),
            first_modifier: HashMap::new(),
        }
    }

    fn run(&mut self) -> Option<Model> {
        loop {
            if self.is_empty() {
                return Some(self.model.clone());
            }

            let (var, value, kind) = match self.next_assignment() {
                Some(step) => step,
                None => return Some(self.model.clone()),
            };

            match self.assign_and_propagate(var, value, kind) {
                StepOutcome::Sat => return Some(self.model.clone()),
                StepOutcome::Continue => continue,
                StepOutcome::Conflict => loop {
                    match self.find_backtrack_level() {
                        None => {
                            log::debug!(target: targets::BACKTRACK, "no flippable decision remains: UNSAT");
                            return None;
                        }
                        Some(level) => {
                            log::trace!(target: targets::BACKTRACK, "backtracking to level {level}");
                            match self.backtrack(level) {
                                StepOutcome::Sat => return Some(self.model.clone()),
                                StepOutcome::Continue => break,
                                StepOutcome::Conflict => continue,
                            }
                        }
                    }
                },
            }
        }
    }

    fn is_empty(&self) -> bool {
        self.working.iter().all(|c| c.is_none())
    }

    /// Chooses the next assignment: pure literal first, then a forced
    /// unit, and only then the frequency heuristic over the remaining
    /// symbols.
    fn next_assignment(&self) -> Option<(VarId, bool, AssignKind)> {
        if let Some((var, value)) = self.find_pure() {
            return Some((var, value, AssignKind::Pure));
        }
        if let Some((var, value)) = self.find_unit() {
            return Some((var, value, AssignKind::Unit));
        }
        self.choose_heuristic()
            .map(|(var, value)| (var, value, AssignKind::Decision { tried_both: false }))
    }

    /// Every literal remaining in `self.working` is on an unassigned
    /// variable (satisfied clauses are dropped entirely and falsified
    /// literals are stripped as soon as their variable is assigned), so
    /// pure-literal detection is just a polarity count over what's left.
    fn find_pure(&self) -> Option<(VarId, bool)> {
        let mut positive = std::collections::HashSet::new();
        let mut negative = std::collections::HashSet::new();
        for clause in self.working.iter().flatten() {
            for &lit in clause.as_slice() {
                if polarity_of(lit) {
                    positive.insert(var_of(lit));
                } else {
                    negative.insert(var_of(lit));
                }
            }
        }
        for &var in &self.symbols {
            let pos = positive.contains(&var);
            let neg = negative.contains(&var);
            if pos && !neg {
                return Some((var, true));
            }
            if neg && !pos {
                return Some((var, false));
            }
        }
        None
    }

    /// A unit clause in the working set is simply a slot of length 1
    /// (all its other literals were already stripped as falsified).
    fn find_unit(&self) -> Option<(VarId, bool)> {
        for clause in self.working.iter().flatten() {
            if clause.len() == 1 {
                let lit = clause.as_slice()[0];
                return Some((var_of(lit), polarity_of(lit)));
            }
        }
        None
    }

    /// The frequency heuristic: pick the unassigned symbol with the
    /// highest combined positive+negative literal count over the
    /// current working clauses; polarity follows the more frequent
    /// orientation (ties favour `true`).
    fn choose_heuristic(&self) -> Option<(VarId, bool)> {
        let mut counts: HashMap<VarId, (usize, usize)> = HashMap::new();
        for clause in self.working.iter().flatten() {
            for &lit in clause.as_slice() {
                let entry = counts.entry(var_of(lit)).or_insert((0, 0));
                if polarity_of(lit) {
                    entry.0 += 1;
                } else {
                    entry.1 += 1;
                }
            }
        }

        let mut best: Option<(VarId, usize, bool)> = None;
        for &var in &self.symbols {
            let (pos, neg) = counts.get(&var).copied().unwrap_or((0, 0));
            let total = pos + neg;
            let polarity = pos >= neg;
            if best.map(|(_, best_total, _)| total > best_total).unwrap_or(true) {
                best = Some((var, total, polarity));
            }
        }
        best.map(|(var, _, polarity)| (var, polarity))
    }

    /// Applies one assignment, removes/shrinks every working clause
    /// containing its variable, and records enough bookkeeping to undo
    /// it later.
    fn assign_and_propagate(&mut self, var: VarId, value: bool, kind: AssignKind) -> StepOutcome {
        let p = self.trail.len();
        self.trail.push(TrailEntry { var, value, kind });
        if let Some(pos) = self.symbols.iter().position(|&s| s == var) {
            self.symbols.remove(pos);
        }
        self.model.set(var, value);

        let mut conflict = false;
        for slot in 0..self.working.len() {
            let Some(clause) = self.working[slot].clone() else {
                continue;
            };
            if !clause.as_slice().iter().any(|&lit| var_of(lit) == var) {
                continue;
            }

            let satisfied = clause
                .as_slice()
                .iter()
                .any(|&lit| var_of(lit) == var && polarity_of(lit) == value);

            if satisfied {
                self.snapshot(p, slot, &clause);
                self.working[slot] = None;
                continue;
            }

            let shrunk: Vec<_> = clause
                .as_slice()
                .iter()
                .copied()
                .filter(|&lit| var_of(lit) != var)
                .collect();
            self.snapshot(p, slot, &clause);
            if shrunk.is_empty() {
                self.working[slot] = Some(Clause::new());
                conflict = true;
                break;
            }
            self.working[slot] = Some(Clause::from_literals(shrunk));
        }

        if conflict {
            StepOutcome::Conflict
        } else if self.is_empty() {
            StepOutcome::Sat
        } else {
            StepOutcome::Continue
        }
    }

    fn snapshot(&mut self, p: usize, slot: usize, original: &Clause) {
        if self.first_modifier.contains_key(&slot) {
            return;
        }
        self.first_modifier.insert(slot, p);
        self.modified.entry(p).or_default().push((slot, original.clone()));
    }

    fn find_backtrack_level(&self) -> Option<usize> {
        for p in (0..self.trail.len()).rev() {
            if let AssignKind::Decision { tried_both: false } = self.trail[p].kind {
                return Some(p);
            }
        }
        None
    }

    /// Undoes every assignment at or above `level`, then re-decides
    /// `level` with the opposite polarity, marking it as having now
    /// tried both values.
    fn backtrack(&mut self, level: usize) -> StepOutcome {
        let flipped_var = self.trail[level].var;
        let flipped_value = !self.trail[level].value;

        while self.trail.len() > level {
            let p = self.trail.len() - 1;
            let entry = self.trail.pop().unwrap();
            self.symbols.push(entry.var);
            self.model.unset(entry.var);
            if let Some(mods) = self.modified.remove(&p) {
                for (slot, original) in mods {
                    self.working[slot] = Some(original);
                    self.first_modifier.remove(&slot);
                }
            }
        }

        self.assign_and_propagate(
            flipped_var,
            flipped_value,
            AssignKind::Decision { tried_both: true },
        )
    }
}
