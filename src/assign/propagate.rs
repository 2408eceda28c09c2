//! Two-watched-literal Boolean Constraint Propagation (§4.3).

use std::mem;

use super::Assignment;
use crate::cdb::ClauseDb;
use crate::types::{ClauseId, Lit, Reason, Watcher};

/// The first conflict BCP ran into: either a synthetic binary clause or a
/// handle to a stored clause, both with every literal `False`.
#[derive(Clone, Copy, Debug)]
pub enum Conflict {
    Binary(Lit, Lit),
    Clause(ClauseId),
}

impl Conflict {
    /// The conflicting clause's literals, materialized as an owned `Vec`
    /// since the binary case has no backing storage to borrow from.
    pub(crate) fn literals(&self, cdb: &ClauseDb) -> Vec<Lit> {
        match *self {
            Conflict::Binary(a, b) => vec![a, b],
            Conflict::Clause(cid) => cdb.clause(cid).lits().to_vec(),
        }
    }
}

/// Drains every unprocessed trail entry, applying unit propagation until
/// either the trail is exhausted (no conflict) or a clause/binary watcher
/// is found with every literal `False`.
pub fn propagate(assign: &mut Assignment, cdb: &mut ClauseDb) -> Option<Conflict> {
    while let Some(p) = assign.next_unprocessed() {
        let false_lit = !p;
        let idx = false_lit.code();
        let mut list = mem::take(&mut cdb.watch_lists[idx]);
        let mut write = 0usize;
        let mut read = 0usize;
        let mut conflict = None;

        while read < list.len() {
            let w = list[read];
            read += 1;
            match w {
                Watcher::Binary(m) => match assign.value(m) {
                    Some(true) => {
                        list[write] = w;
                        write += 1;
                    }
                    None => {
                        assign.assign(m, Reason::Binary(false_lit));
                        list[write] = w;
                        write += 1;
                    }
                    Some(false) => {
                        while read < list.len() {
                            list[write] = list[read];
                            write += 1;
                            read += 1;
                        }
                        conflict = Some(Conflict::Binary(m, false_lit));
                        break;
                    }
                },
                Watcher::Clause { blocker, cid } => {
                    if assign.value(blocker) == Some(true) {
                        list[write] = w;
                        write += 1;
                        continue;
                    }
                    let clause = cdb.clause_mut(cid);
                    if clause.wl0() == false_lit {
                        clause.lits.swap(0, 1);
                    }
                    let wl0 = clause.wl0();
                    if wl0 != blocker && assign.value(wl0) == Some(true) {
                        list[write] = Watcher::Clause { blocker: wl0, cid };
                        write += 1;
                        continue;
                    }
                    let mut new_watch = None;
                    for k in 2..clause.len() {
                        if assign.value(clause.lits[k]) != Some(false) {
                            new_watch = Some(k);
                            break;
                        }
                    }
                    if let Some(k) = new_watch {
                        clause.lits.swap(1, k);
                        let moved_to = clause.wl1();
                        cdb.watch_lists[moved_to.code()].push(Watcher::Clause { blocker: wl0, cid });
                        continue;
                    }
                    match assign.value(wl0) {
                        Some(true) => unreachable!("wl0 true case handled above"),
                        None => {
                            assign.assign(wl0, Reason::Long(cid));
                            cdb.refresh_lbd(cid, |v| assign.level(v));
                            list[write] = w;
                            write += 1;
                        }
                        Some(false) => {
                            while read < list.len() {
                                list[write] = list[read];
                                write += 1;
                                read += 1;
                            }
                            conflict = Some(Conflict::Clause(cid));
                            break;
                        }
                    }
                }
            }
        }
        list.truncate(write);
        cdb.watch_lists[idx] = list;
        if conflict.is_some() {
            return conflict;
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Reason;

    fn lit(x: i32) -> Lit {
        Lit::from(x)
    }

    #[test]
    fn unit_propagates_through_a_long_clause() {
        let mut assign = Assignment::new(3, 0.95);
        for _ in 0..3 {
            assign.new_var();
        }
        let mut cdb = ClauseDb::new(3, 0.999);
        cdb.new_clause(&[lit(1), lit(2), lit(3)], false);
        assign.set_marker();
        assign.assign(lit(-1), Reason::Decision);
        assign.set_marker();
        assign.assign(lit(-2), Reason::Decision);
        assert!(propagate(&mut assign, &mut cdb).is_none());
        assert_eq!(assign.value(lit(3)), Some(true));
    }

    #[test]
    fn conflicting_binary_clause_is_detected() {
        let mut assign = Assignment::new(1, 0.95);
        assign.new_var();
        let mut cdb = ClauseDb::new(1, 0.999);
        cdb.new_binary(lit(1), lit(1)); // degenerate: forces x true as its own reason
        assign.set_marker();
        assign.assign(lit(-1), Reason::Decision);
        let conflict = propagate(&mut assign, &mut cdb);
        assert!(conflict.is_some());
    }

    #[test]
    fn long_clause_conflict_is_detected() {
        let mut assign = Assignment::new(3, 0.95);
        for _ in 0..3 {
            assign.new_var();
        }
        let mut cdb = ClauseDb::new(3, 0.999);
        cdb.new_clause(&[lit(1), lit(2), lit(3)], false);
        assign.set_marker();
        assign.assign(lit(-1), Reason::Decision);
        assign.set_marker();
        assign.assign(lit(-2), Reason::Decision);
        assign.set_marker();
        assign.assign(lit(-3), Reason::Decision);
        let conflict = propagate(&mut assign, &mut cdb);
        assert!(matches!(conflict, Some(Conflict::Clause(_))));
    }
}
