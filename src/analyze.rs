//! Conflict analysis (§4.5): first-UIP learning, clause minimization, and
//! LBD computation for the resulting learned clause.

use crate::assign::propagate::Conflict;
use crate::assign::Assignment;
use crate::cdb::ClauseDb;
use crate::types::{DecisionLevel, Lit, Reason, VarId};

/// The result of analyzing one conflict: the learned clause (position 0 is
/// always the UIP) and the level the driver should backtrack to.
pub struct Analysis {
    pub learnt: Vec<Lit>,
    pub backtrack_level: DecisionLevel,
    pub lbd: u32,
}

/// Returns the literals to scan when resolving away `p`'s reason (or the
/// conflict itself, when `p` is `None`). For a reason, position 0 of the
/// virtual clause is always `p` itself and is skipped by the caller; for
/// the initial conflict there is no such literal and every position is
/// scanned.
fn expand(cdb: &ClauseDb, conflict: &Conflict, p: Option<(Lit, Reason)>) -> (Vec<Lit>, usize) {
    match p {
        None => (conflict.literals(cdb), 0),
        Some((lit, Reason::Binary(cause))) => (vec![lit, cause], 1),
        Some((_, Reason::Long(cid))) => (cdb.clause(cid).lits().to_vec(), 1),
        Some((_, Reason::Decision)) => unreachable!("a decision is never on the reason chain"),
    }
}

/// Runs first-UIP resolution starting from `conflict`, bumping variable and
/// clause activity along the way, then minimizes and reorders the result.
pub fn analyze(assign: &mut Assignment, cdb: &mut ClauseDb, conflict: Conflict) -> Analysis {
    let dl = assign.decision_level();
    let mut learnt: Vec<Lit> = vec![Lit::pos(0)]; // placeholder, position 0 filled in at the end
    let mut path_count: u32 = 0;
    let mut trail_idx = assign.trail_len();
    let mut p: Option<Lit> = None;
    let mut cur = conflict;

    loop {
        if let Conflict::Clause(cid) = cur {
            cdb.bump_clause_activity(cid);
        }
        let (lits, skip) = expand(cdb, &cur, p.map(|l| (l, assign.reason(l.var()))));
        for &q in &lits[skip..] {
            let v = q.var();
            if assign.is_seen(v) {
                continue;
            }
            let level = assign.level(v);
            if level == 0 {
                continue;
            }
            assign.mark_seen(v);
            assign.bump_var_activity(v);
            if level >= dl {
                path_count += 1;
            } else {
                learnt.push(q);
            }
        }

        // Walk the trail backward to the next seen literal at the current
        // decision level.
        let next = loop {
            trail_idx -= 1;
            let lit = assign.trail_lit(trail_idx);
            if assign.is_seen(lit.var()) && assign.level(lit.var()) == dl {
                break lit;
            }
        };
        assign.unmark_seen(next.var());
        path_count -= 1;
        if path_count == 0 {
            p = Some(next);
            break;
        }
        cur = match assign.reason(next.var()) {
            Reason::Binary(cause) => Conflict::Binary(next, cause),
            Reason::Long(cid) => Conflict::Clause(cid),
            Reason::Decision => unreachable!("path_count would be 0 at a decision"),
        };
        p = Some(next);
    }

    learnt[0] = !p.expect("first-UIP loop always assigns p before breaking");
    let lbd = minimize_and_reorder(assign, cdb, &mut learnt, dl);
    assign.clear_seen();
    let backtrack_level = if learnt.len() > 1 { assign.level(learnt[1].var()) } else { 0 };
    Analysis {
        learnt,
        backtrack_level,
        lbd,
    }
}

/// Removes literals whose reason chain is entirely subsumed by the rest of
/// the learned clause (or level 0), then reorders so position 1 holds the
/// literal with the highest decision level among the non-UIP literals.
fn minimize_and_reorder(
    assign: &mut Assignment,
    cdb: &ClauseDb,
    learnt: &mut Vec<Lit>,
    _dl: DecisionLevel,
) -> u32 {
    let levels_present: Vec<DecisionLevel> = learnt.iter().map(|&l| assign.level(l.var())).collect();

    let mut keep = vec![true; learnt.len()];
    for i in 1..learnt.len() {
        let v = learnt[i].var();
        if !is_redundant(assign, cdb, v, &levels_present) {
            continue;
        }
        keep[i] = false;
    }
    let mut i = 1;
    while i < learnt.len() {
        if !keep[i] {
            learnt.swap_remove(i);
            keep.swap_remove(i);
        } else {
            i += 1;
        }
    }

    let lbd = ClauseDb::lbd_of(learnt, |v| assign.level(v));

    if learnt.len() > 1 {
        let (mut best_i, mut best_level) = (1, assign.level(learnt[1].var()));
        for i in 2..learnt.len() {
            let lvl = assign.level(learnt[i].var());
            if lvl > best_level {
                best_level = lvl;
                best_i = i;
            }
        }
        learnt.swap(1, best_i);
    }
    lbd
}

/// A literal (given by its variable, already known to be in `learnt`) is
/// redundant if every literal reachable by following reasons backward from
/// it is either at level 0 or already present in `learnt`.
fn is_redundant(assign: &mut Assignment, cdb: &ClauseDb, v: VarId, levels_present: &[DecisionLevel]) -> bool {
    let mut stack = vec![v];
    let mut locally_marked = Vec::new();
    let result = 'outer: loop {
        let Some(cur) = stack.pop() else {
            break true;
        };
        match assign.reason(cur) {
            Reason::Decision => break false,
            Reason::Binary(cause) => {
                let w = cause.var();
                if !push_if_needed(assign, &mut stack, &mut locally_marked, w, levels_present) {
                    break 'outer false;
                }
            }
            Reason::Long(cid) => {
                for &lit in cdb.clause(cid).lits().iter().skip(1) {
                    let w = lit.var();
                    if !push_if_needed(assign, &mut stack, &mut locally_marked, w, levels_present) {
                        break 'outer false;
                    }
                }
            }
        }
    };
    for w in locally_marked {
        assign.unmark_seen(w);
    }
    result
}

fn push_if_needed(
    assign: &mut Assignment,
    stack: &mut Vec<VarId>,
    locally_marked: &mut Vec<VarId>,
    w: VarId,
    levels_present: &[DecisionLevel],
) -> bool {
    if assign.is_seen(w) {
        return true;
    }
    let level = assign.level(w);
    if level == 0 {
        return true;
    }
    if !levels_present.contains(&level) {
        return false;
    }
    assign.mark_seen(w);
    locally_marked.push(w);
    stack.push(w);
    true
}
