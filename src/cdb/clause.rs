//! The stored-clause type: length >= 3 input and learned clauses. Shorter
//! clauses never reach this type (units are assigned directly; binaries
//! live only as watcher entries, see [`super::watch`]).

use crate::types::Lit;

#[derive(Clone, Debug)]
pub struct Clause {
    /// Positions 0 and 1 are the watched literals `wl0`/`wl1`.
    pub(crate) lits: Vec<Lit>,
    pub(crate) is_learnt: bool,
    pub(crate) activity: f64,
    pub(crate) lbd: u32,
}

impl Clause {
    pub(crate) fn new(lits: Vec<Lit>, is_learnt: bool) -> Clause {
        let lbd = lits.len() as u32;
        Clause {
            lits,
            is_learnt,
            activity: 0.0,
            lbd,
        }
    }

    pub fn lits(&self) -> &[Lit] {
        &self.lits
    }

    pub fn len(&self) -> usize {
        self.lits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lits.is_empty()
    }

    pub fn is_learnt(&self) -> bool {
        self.is_learnt
    }

    pub fn activity(&self) -> f64 {
        self.activity
    }

    pub fn lbd(&self) -> u32 {
        self.lbd
    }

    pub(crate) fn wl0(&self) -> Lit {
        self.lits[0]
    }

    pub(crate) fn wl1(&self) -> Lit {
        self.lits[1]
    }
}
