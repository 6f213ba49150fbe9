//! The variable table: the append-only map from stable integer ids to
//! (name, time-step) pairs. Ids are handed out consecutively as atoms
//! and actions are first seen, so an atom's id at `t+1` is always one
//! more than its id at `t`.

use std::collections::HashMap;

use crate::types::VarId;

/// What a table entry names: an atom at a time step, or a ground action
/// at a time step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VarEntry {
    Atom { name: String, t: u32 },
    Action { name: String, t: u32 },
}

/// An append-only, order-preserving map from [`VarId`] (the index into
/// `entries`, offset by one since id 0 is reserved) to [`VarEntry`].
///
/// Atoms and actions are allocated a contiguous run of ids — one per
/// time step — the first time [`VariableTable::ensure_atom`] or
/// [`VariableTable::ensure_action`] sees their name, so that
/// `id(name, t+1) = id(name, t) + 1` always holds.
#[derive(Debug, Clone, Default)]
pub struct VariableTable {
    entries: Vec<VarEntry>,
    atom_ids: HashMap<(String, u32), VarId>,
    action_ids: HashMap<(String, u32), VarId>,
}

impl VariableTable {
    pub fn new() -> Self {
        VariableTable::default()
    }

    /// Total number of allocated variables (`num_vars` for DIMACS: ids
    /// run `1..=len()`).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Allocates ids for `name` at every `t` in `0..=horizon` unless
    /// already allocated. Atoms live across every time instant from the
    /// initial state at `t=0` up to the goal state at `t=horizon`.
    pub fn ensure_atom(&mut self, name: &str, horizon: u32) {
        if self.atom_ids.contains_key(&(name.to_string(), 0)) {
            return;
        }
        for t in 0..=horizon {
            let id = (self.entries.len() + 1) as VarId;
            self.entries.push(VarEntry::Atom {
                name: name.to_string(),
                t,
            });
            self.atom_ids.insert((name.to_string(), t), id);
        }
    }

    /// Allocates ids for ground action `name` at every `t` in
    /// `0..horizon` unless already allocated. There are `horizon` action
    /// slots (a plan of length `horizon`), one per transition towards
    /// the goal; the action firing in the last slot, `t = horizon - 1`,
    /// produces effects at `t = horizon`, the goal's time.
    pub fn ensure_action(&mut self, name: &str, horizon: u32) {
        if self.action_ids.contains_key(&(name.to_string(), 0)) {
            return;
        }
        for t in 0..horizon {
            let id = (self.entries.len() + 1) as VarId;
            self.entries.push(VarEntry::Action {
                name: name.to_string(),
                t,
            });
            self.action_ids.insert((name.to_string(), t), id);
        }
    }

    /// Looks up the id for `name` at time `t`. Panics if `name` was
    /// never allocated via [`ensure_atom`](Self::ensure_atom) — an
    /// encoder bug, not an input error; every atom referenced during
    /// encoding is expected to have been added to the Herbrand base
    /// first.
    pub fn atom_id(&self, name: &str, t: u32) -> VarId {
        *self
            .atom_ids
            .get(&(name.to_string(), t))
            .unwrap_or_else(|| panic!("atom '{name}' at t={t} was never allocated"))
    }

    /// Looks up the id for ground action `name` at time `t`. Panics if
    /// never allocated (encoder bug).
    pub fn action_id(&self, name: &str, t: u32) -> VarId {
        *self
            .action_ids
            .get(&(name.to_string(), t))
            .unwrap_or_else(|| panic!("action '{name}' at t={t} was never allocated"))
    }

    /// The entry for a given id (1-indexed). Panics if `id` is out of
    /// range or 0.
    pub fn entry(&self, id: VarId) -> &VarEntry {
        &self.entries[(id - 1) as usize]
    }

    /// All allocated ids, in allocation order — the `symbols` sequence
    /// handed to the solver.
    pub fn all_ids(&self) -> Vec<VarId> {
        (1..=self.entries.len() as VarId).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn atom_ids_are_consecutive_across_time() {
        let mut table = VariableTable::new();
        table.ensure_atom("p", 2);
        let id0 = table.atom_id("p", 0);
        let id1 = table.atom_id("p", 1);
        let id2 = table.atom_id("p", 2);
        assert_eq!(id1, id0 + 1);
        assert_eq!(id2, id1 + 1);
    }

    #[test]
    fn ensure_is_idempotent() {
        let mut table = VariableTable::new();
        table.ensure_atom("p", 2);
        let before = table.len();
        table.ensure_atom("p", 2);
        assert_eq!(table.len(), before);
    }

    #[test]
    fn action_ids_allocated_after_atoms_do_not_collide() {
        let mut table = VariableTable::new();
        table.ensure_atom("p", 1);
        table.ensure_action("move a b", 1);
        let p0 = table.atom_id("p", 0);
        let a0 = table.action_id("move a b", 0);
        assert_ne!(p0, a0);
    }
}
