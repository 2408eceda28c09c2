//! Assignment trail (§4.2) and variable heap (§4.4), combined into one
//! [`Assignment`] value the way the reference codebase keeps trail,
//! per-variable state, and variable selection together under one
//! propagator-facing type.

mod heap;
pub(crate) mod decision;
pub(crate) mod propagate;

use heap::VarHeap;

use crate::types::{DecisionLevel, Lit, Reason, VarId};

/// Activities above this are rescaled back down (global invariant 4).
const RESCALE_THRESHOLD: f64 = 1e100;
const RESCALE_FACTOR: f64 = 1e-100;

pub struct Assignment {
    values: Vec<Option<bool>>,
    levels: Vec<DecisionLevel>,
    reasons: Vec<Reason>,
    phases: Vec<Option<bool>>,
    activities: Vec<f64>,
    heap: VarHeap,

    trail: Vec<Lit>,
    trail_lim: Vec<usize>,
    trail_head: usize,

    var_inc: f64,
    var_decay: f64,
    root_level: DecisionLevel,

    seen: Vec<bool>,
    touched: Vec<VarId>,

    pub(crate) num_conflicts: u64,
    pub(crate) num_decisions: u64,
    pub(crate) num_propagations: u64,
    pub(crate) num_restarts: u64,
}

impl Assignment {
    /// `num_vars_hint` only pre-sizes the backing arrays; variables must
    /// still be introduced one at a time through [`Assignment::new_var`].
    pub fn new(num_vars_hint: usize, var_decay: f64) -> Assignment {
        Assignment {
            values: Vec::with_capacity(num_vars_hint),
            levels: Vec::with_capacity(num_vars_hint),
            reasons: Vec::with_capacity(num_vars_hint),
            phases: Vec::with_capacity(num_vars_hint),
            activities: Vec::with_capacity(num_vars_hint),
            heap: VarHeap::new(0),
            trail: Vec::new(),
            trail_lim: Vec::new(),
            trail_head: 0,
            var_inc: 1.0,
            var_decay,
            root_level: 0,
            seen: Vec::with_capacity(num_vars_hint),
            touched: Vec::new(),
            num_conflicts: 0,
            num_decisions: 0,
            num_propagations: 0,
            num_restarts: 0,
        }
    }

    pub fn new_var(&mut self) -> VarId {
        let vi = self.values.len() as VarId;
        self.values.push(None);
        self.levels.push(0);
        self.reasons.push(Reason::Decision);
        self.phases.push(None);
        self.activities.push(0.0);
        self.heap.add_var_slot(vi, &self.activities);
        self.seen.push(false);
        vi
    }

    pub fn num_vars(&self) -> usize {
        self.values.len()
    }

    pub fn value(&self, l: Lit) -> Option<bool> {
        self.values[l.var() as usize].map(|v| v != l.is_negated())
    }

    pub fn var_value(&self, v: VarId) -> Option<bool> {
        self.values[v as usize]
    }

    pub fn level(&self, v: VarId) -> DecisionLevel {
        self.levels[v as usize]
    }

    pub fn reason(&self, v: VarId) -> Reason {
        self.reasons[v as usize]
    }

    pub fn phase(&self, v: VarId) -> Option<bool> {
        self.phases[v as usize]
    }

    pub fn decision_level(&self) -> DecisionLevel {
        self.trail_lim.len() as DecisionLevel
    }

    pub fn root_level(&self) -> DecisionLevel {
        self.root_level
    }

    pub fn set_root_level(&mut self, level: DecisionLevel) {
        self.root_level = level;
    }

    pub fn trail_len(&self) -> usize {
        self.trail.len()
    }

    pub fn trail_lit(&self, i: usize) -> Lit {
        self.trail[i]
    }

    pub fn is_in_heap(&self, v: VarId) -> bool {
        self.heap.contains(v)
    }

    /// Assigns `l` to `True` with the given justification, appending it to
    /// the trail. Does not touch the propagation frontier: the caller
    /// (BCP or the search driver) decides when `next_unprocessed` should
    /// see it.
    pub fn assign(&mut self, l: Lit, reason: Reason) {
        let v = l.var() as usize;
        debug_assert!(self.values[v].is_none(), "variable assigned twice");
        self.values[v] = Some(!l.is_negated());
        self.phases[v] = self.values[v];
        self.levels[v] = self.decision_level();
        self.reasons[v] = reason;
        self.trail.push(l);
        match reason {
            Reason::Decision => self.num_decisions += 1,
            _ => self.num_propagations += 1,
        }
    }

    pub fn set_marker(&mut self) {
        self.trail_lim.push(self.trail.len());
    }

    /// Pops every trail entry assigned after `level`, restoring each
    /// variable to `Unknown` (its phase cache is left untouched) and
    /// pushing it back into the heap.
    pub fn backtrack(&mut self, level: DecisionLevel) {
        if level >= self.decision_level() {
            return;
        }
        let target = self.trail_lim[level as usize];
        while self.trail.len() > target {
            let l = self.trail.pop().expect("trail longer than target");
            let v = l.var();
            self.values[v as usize] = None;
            self.heap.push(v, &self.activities);
        }
        self.trail_lim.truncate(level as usize);
        self.trail_head = self.trail_head.min(target);
    }

    pub fn next_unprocessed(&mut self) -> Option<Lit> {
        if self.trail_head < self.trail.len() {
            let l = self.trail[self.trail_head];
            self.trail_head += 1;
            Some(l)
        } else {
            None
        }
    }

    /// Pops variables off the activity heap until an unassigned one turns
    /// up (lazy deletion, §9) or the heap is exhausted.
    pub fn pop_decision_var(&mut self) -> Option<VarId> {
        loop {
            let v = self.heap.pop_max(&self.activities)?;
            if self.values[v as usize].is_none() {
                return Some(v);
            }
        }
    }

    pub fn rebuild_heap(&mut self) {
        let unassigned: Vec<VarId> = (0..self.num_vars() as VarId)
            .filter(|&v| self.values[v as usize].is_none())
            .collect();
        self.heap.rebuild(unassigned, &self.activities);
    }

    pub fn watch_list_index_for_decision(&self, v: VarId) -> (Lit, Lit) {
        (Lit::pos(v), Lit::neg(v))
    }

    pub fn activity(&self, v: VarId) -> f64 {
        self.activities[v as usize]
    }

    /// Bumps a variable's activity and rescales every variable's activity
    /// (and the bump increment itself) if the bump would overflow.
    pub fn bump_var_activity(&mut self, v: VarId) {
        self.activities[v as usize] += self.var_inc;
        if self.activities[v as usize] > RESCALE_THRESHOLD {
            for a in self.activities.iter_mut() {
                *a *= RESCALE_FACTOR;
            }
            self.var_inc *= RESCALE_FACTOR;
        }
        self.heap.bump(v, &self.activities);
    }

    pub fn decay_var_activity(&mut self) {
        self.var_inc /= self.var_decay;
    }

    pub fn is_seen(&self, v: VarId) -> bool {
        self.seen[v as usize]
    }

    pub fn mark_seen(&mut self, v: VarId) {
        if !self.seen[v as usize] {
            self.seen[v as usize] = true;
            self.touched.push(v);
        }
    }

    pub fn unmark_seen(&mut self, v: VarId) {
        self.seen[v as usize] = false;
    }

    /// Clears every mark set since the last call, via the touched-variable
    /// queue rather than a full array scan (§4.5's clause minimization
    /// note).
    pub fn clear_seen(&mut self) {
        for v in self.touched.drain(..) {
            self.seen[v as usize] = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Reason;

    fn lit(x: i32) -> Lit {
        Lit::from(x)
    }

    #[test]
    fn assign_then_backtrack_restores_unknown_but_keeps_phase() {
        let mut a = Assignment::new(2, 0.95);
        a.new_var();
        a.new_var();
        a.set_marker();
        a.assign(lit(1), Reason::Decision);
        assert_eq!(a.value(lit(1)), Some(true));
        a.backtrack(0);
        assert_eq!(a.value(lit(1)), None);
        assert_eq!(a.phase(0), Some(true));
    }

    #[test]
    fn decision_level_tracks_markers() {
        let mut a = Assignment::new(3, 0.95);
        for _ in 0..3 {
            a.new_var();
        }
        assert_eq!(a.decision_level(), 0);
        a.set_marker();
        a.assign(lit(1), Reason::Decision);
        assert_eq!(a.decision_level(), 1);
        a.set_marker();
        a.assign(lit(2), Reason::Decision);
        assert_eq!(a.decision_level(), 2);
        a.backtrack(1);
        assert_eq!(a.decision_level(), 1);
        assert_eq!(a.value(lit(2)), None);
    }

    #[test]
    fn next_unprocessed_reads_trail_in_order_and_survives_backtrack() {
        let mut a = Assignment::new(2, 0.95);
        a.new_var();
        a.new_var();
        a.set_marker();
        a.assign(lit(1), Reason::Decision);
        a.assign(lit(2), Reason::Binary(lit(-1)));
        assert_eq!(a.next_unprocessed(), Some(lit(1)));
        assert_eq!(a.next_unprocessed(), Some(lit(2)));
        assert_eq!(a.next_unprocessed(), None);
        a.backtrack(0);
        a.set_marker();
        a.assign(lit(-1), Reason::Decision);
        assert_eq!(a.next_unprocessed(), Some(lit(-1)));
    }
}
