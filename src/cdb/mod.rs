//! Clause store & allocator (§4.1) plus the per-literal watch lists BCP
//! walks (§4.3). A single [`ClauseDb`] owns every clause of length >= 3
//! ever added (input or learned) and the watch lists that reference them;
//! binary clauses never get a `Clause` object, they live purely as
//! [`crate::types::Watcher::Binary`] entries.

mod alloc;
mod clause;
mod watch;

pub use clause::Clause;

use alloc::ClauseAllocator;
use watch::WatchListIf;

use crate::types::{ClauseId, DecisionLevel, Lit, VarId, Watcher};

/// Activities above this are rescaled back down; keeps `f64` bumps from
/// ever overflowing across a long search (global invariant 4).
const RESCALE_THRESHOLD: f64 = 1e100;
const RESCALE_FACTOR: f64 = 1e-100;

pub struct ClauseDb {
    slots: Vec<Option<Clause>>,
    free_slots: Vec<usize>,
    alloc: ClauseAllocator,
    pub(crate) watch_lists: Vec<Vec<Watcher>>,
    clause_inc: f64,
    clause_decay: f64,
    num_learnt: usize,
    num_learnt_literals: usize,
    /// Number of literals across every stored clause (input + learned);
    /// used for `get_stats`.
    num_clause_literals: usize,
}

impl ClauseDb {
    pub fn new(num_vars: usize, clause_decay: f64) -> ClauseDb {
        ClauseDb {
            slots: Vec::new(),
            free_slots: Vec::new(),
            alloc: ClauseAllocator::new(),
            watch_lists: (0..2 * num_vars).map(|_| Vec::new()).collect(),
            clause_inc: 1.0,
            clause_decay,
            num_learnt: 0,
            num_learnt_literals: 0,
            num_clause_literals: 0,
        }
    }

    /// Grows the watch-list table to cover a freshly introduced variable.
    pub(crate) fn add_var_slot(&mut self) {
        self.watch_lists.push(Vec::new());
        self.watch_lists.push(Vec::new());
    }

    pub fn clause(&self, cid: ClauseId) -> &Clause {
        self.slots[cid.index()]
            .as_ref()
            .expect("dangling ClauseId")
    }

    pub(crate) fn clause_mut(&mut self, cid: ClauseId) -> &mut Clause {
        self.slots[cid.index()]
            .as_mut()
            .expect("dangling ClauseId")
    }

    /// Allocates a clause of length >= 3, registering it on its two watched
    /// literals (positions 0 and 1 of `lits`): the clause is looked up
    /// when either becomes `False`.
    pub fn new_clause(&mut self, lits: &[Lit], is_learnt: bool) -> ClauseId {
        debug_assert!(lits.len() >= 3, "binary/unit clauses are not stored");
        let mut buf = self.alloc.take(lits.len());
        buf.extend_from_slice(lits);
        let clause = Clause::new(buf, is_learnt);
        let cid = match self.free_slots.pop() {
            Some(idx) => {
                self.slots[idx] = Some(clause);
                ClauseId::from_index(idx)
            }
            None => {
                self.slots.push(Some(clause));
                ClauseId::from_index(self.slots.len() - 1)
            }
        };
        let (wl0, wl1) = {
            let c = self.clause(cid);
            (c.wl0(), c.wl1())
        };
        self.watch_lists[wl0.code()].register_clause(wl1, cid);
        self.watch_lists[wl1.code()].register_clause(wl0, cid);
        self.num_clause_literals += lits.len();
        if is_learnt {
            self.num_learnt += 1;
            self.num_learnt_literals += lits.len();
        }
        cid
    }

    /// Registers a binary clause as a pair of literal-reason watchers.
    /// No `Clause` object is allocated (§3: binary clauses are not stored).
    pub fn new_binary(&mut self, a: Lit, b: Lit) {
        self.watch_lists[a.code()].register_binary(b);
        self.watch_lists[b.code()].register_binary(a);
    }

    /// Detaches a clause from both watch lists and returns its storage to
    /// the allocator.
    pub fn delete_clause(&mut self, cid: ClauseId) {
        let clause = self.slots[cid.index()].take().expect("double free");
        let wl0 = clause.wl0();
        let wl1 = clause.wl1();
        self.watch_lists[wl0.code()].detach_clause(cid);
        self.watch_lists[wl1.code()].detach_clause(cid);
        self.num_clause_literals -= clause.len();
        if clause.is_learnt() {
            self.num_learnt -= 1;
            self.num_learnt_literals -= clause.len();
        }
        self.alloc.recycle(clause.lits);
        self.free_slots.push(cid.index());
    }

    pub fn num_learnt(&self) -> usize {
        self.num_learnt
    }

    pub fn num_clauses(&self) -> usize {
        self.slots.len() - self.free_slots.len()
    }

    pub fn num_clause_literals(&self) -> usize {
        self.num_clause_literals
    }

    pub fn num_learnt_literals(&self) -> usize {
        self.num_learnt_literals
    }

    fn all_ids(&self) -> impl Iterator<Item = ClauseId> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|_| ClauseId::from_index(i)))
    }

    fn learnt_ids(&self) -> impl Iterator<Item = ClauseId> + '_ {
        self.slots.iter().enumerate().filter_map(|(i, slot)| {
            slot.as_ref()
                .filter(|c| c.is_learnt())
                .map(|_| ClauseId::from_index(i))
        })
    }

    /// Bumps a clause's activity, rescaling every clause's activity (and
    /// the bump increment itself) if the bump would overflow (global
    /// invariant 4).
    pub fn bump_clause_activity(&mut self, cid: ClauseId) {
        let inc = self.clause_inc;
        self.clause_mut(cid).activity += inc;
        if self.clause(cid).activity() > RESCALE_THRESHOLD {
            for slot in self.slots.iter_mut().flatten() {
                slot.activity *= RESCALE_FACTOR;
            }
            self.clause_inc *= RESCALE_FACTOR;
        }
    }

    /// Shrinks the bump increment; the next bump is worth more relative to
    /// older, undecayed activities.
    pub fn decay_clause_activity(&mut self) {
        self.clause_inc /= self.clause_decay;
    }

    /// Literal Block Distance: the number of distinct decision levels
    /// among `lits`.
    pub fn lbd_of(lits: &[Lit], level_of: impl Fn(VarId) -> DecisionLevel) -> u32 {
        let mut levels: Vec<DecisionLevel> = lits.iter().map(|&l| level_of(l.var())).collect();
        levels.sort_unstable();
        levels.dedup();
        levels.len() as u32
    }

    /// Refreshes a clause's stored LBD if the freshly computed value is
    /// lower (§4.3's LBD maintenance clause).
    pub fn refresh_lbd(&mut self, cid: ClauseId, level_of: impl Fn(VarId) -> DecisionLevel) {
        let lbd = Self::lbd_of(self.clause(cid).lits(), level_of);
        let c = self.clause_mut(cid);
        if lbd < c.lbd {
            c.lbd = lbd;
        }
    }

    /// `reduce_db`: evicts the least useful half of non-glue, non-locked
    /// learned clauses, plus any upper-half clause whose activity has
    /// fallen below the current per-clause average.
    pub fn reduce_db(&mut self, glue_lbd: u32, locked: impl Fn(ClauseId) -> bool) -> Vec<ClauseId> {
        let mut candidates: Vec<ClauseId> = self
            .learnt_ids()
            .filter(|&cid| {
                let c = self.clause(cid);
                c.len() > 2 && c.lbd() > glue_lbd && !locked(cid)
            })
            .collect();
        candidates.sort_by(|&a, &b| {
            self.clause(a)
                .activity()
                .partial_cmp(&self.clause(b).activity())
                .expect("clause activity is never NaN")
        });
        let threshold = self.clause_inc / (self.num_learnt.max(1) as f64);
        let half = candidates.len() / 2;
        let doomed: Vec<ClauseId> = candidates
            .into_iter()
            .enumerate()
            .filter(|&(i, cid)| i < half || self.clause(cid).activity() < threshold)
            .map(|(_, cid)| cid)
            .collect();
        for &cid in &doomed {
            self.delete_clause(cid);
        }
        doomed
    }

    /// `reduce_CNF`: drops every stored clause (input or learned)
    /// containing a literal already `True`, i.e. satisfied for good once
    /// the solver is at level 0.
    pub fn remove_satisfied(&mut self, is_true: impl Fn(Lit) -> bool) -> usize {
        let ids: Vec<ClauseId> = self.all_ids().collect();
        let mut removed = 0;
        for cid in ids {
            if self.clause(cid).lits().iter().any(|&l| is_true(l)) {
                self.delete_clause(cid);
                removed += 1;
            }
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lits(xs: &[i32]) -> Vec<Lit> {
        xs.iter().map(|&x| Lit::from(x)).collect()
    }

    #[test]
    fn new_clause_registers_both_watches() {
        let mut cdb = ClauseDb::new(4, 0.999);
        let c = lits(&[1, 2, 3]);
        let cid = cdb.new_clause(&c, false);
        assert_eq!(cdb.watch_lists[(!Lit::from(1)).code()].len(), 1);
        assert_eq!(cdb.watch_lists[(!Lit::from(2)).code()].len(), 1);
        assert_eq!(cdb.num_clauses(), 1);
        cdb.delete_clause(cid);
        assert_eq!(cdb.watch_lists[(!Lit::from(1)).code()].len(), 0);
        assert_eq!(cdb.watch_lists[(!Lit::from(2)).code()].len(), 0);
        assert_eq!(cdb.num_clauses(), 0);
    }

    #[test]
    fn deleted_slot_is_recycled_by_the_next_allocation() {
        let mut cdb = ClauseDb::new(6, 0.999);
        let cid1 = cdb.new_clause(&lits(&[1, 2, 3]), true);
        cdb.delete_clause(cid1);
        let cid2 = cdb.new_clause(&lits(&[4, 5, 6]), true);
        assert_eq!(cid1, cid2);
    }

    #[test]
    fn reduce_db_keeps_glue_and_locked_clauses() {
        let mut cdb = ClauseDb::new(10, 0.999);
        let glue = cdb.new_clause(&lits(&[1, 2, 3]), true);
        cdb.clause_mut(glue).lbd = 2;
        let junk = cdb.new_clause(&lits(&[4, 5, 6]), true);
        cdb.clause_mut(junk).lbd = 10;
        let doomed = cdb.reduce_db(2, |_| false);
        assert!(doomed.contains(&junk));
        assert!(!doomed.contains(&glue));
    }

    #[test]
    fn lbd_counts_distinct_levels() {
        let levels = [0u32, 2, 2, 5];
        let ls = lits(&[1, 2, 3, 4]);
        let lbd = ClauseDb::lbd_of(&ls, |vi| levels[vi as usize]);
        assert_eq!(lbd, 3);
    }
}
