//! The main CDCL loop (§4.6): propagate, analyze conflicts, learn and
//! backtrack, or decide.

use log::debug;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use super::{Certificate, Solver};
use crate::analyze::{self, Analysis};
use crate::assign::decision::choose_polarity;
use crate::assign::propagate::{propagate, Conflict};
use crate::error::Result;
use crate::types::Reason;

/// Repeatedly calls `search` with a Luby-scaled conflict budget (§4.6
/// "Restart policy") until a verdict is reached or the hard
/// `max_conflicts` cap (if any) is exhausted.
pub(super) fn drive(solver: &mut Solver) -> Result<Certificate> {
    let mut rng = SmallRng::seed_from_u64(solver.config.seed);
    loop {
        match search(solver, &mut rng)? {
            Some(cert) => return Ok(cert),
            None => {
                solver.assign.backtrack(solver.assign.root_level());
                solver.report_restart();
            }
        }
    }
}

/// Runs until this restart's conflict budget is exhausted (`Ok(None)`, the
/// caller should restart) or a verdict is reached (`Ok(Some(_))`).
fn search(solver: &mut Solver, rng: &mut impl rand::Rng) -> Result<Option<Certificate>> {
    loop {
        match propagate(&mut solver.assign, &mut solver.cdb) {
            Some(conflict) => {
                solver.assign.num_conflicts += 1;
                if solver.assign.decision_level() <= solver.assign.root_level() {
                    return Ok(Some(Certificate::Unsat));
                }
                handle_conflict(solver, conflict);
                solver.assign.decay_var_activity();
                solver.cdb.decay_clause_activity();
                if solver.config.max_conflicts != 0 && solver.assign.num_conflicts >= solver.config.max_conflicts {
                    return Ok(Some(Certificate::Unknown));
                }
                if solver.restart.conflict() {
                    return Ok(None);
                }
            }
            None => {
                if solver.assign.decision_level() == 0 && solver.config.simplify_at_level_zero && solver.root_level_dirty {
                    simplify(solver);
                }
                if solver.cdb.num_learnt() > solver.reduce_db_threshold as usize {
                    reduce(solver);
                }
                match solver.assign.pop_decision_var() {
                    None => return Ok(Some(extract_model(solver))),
                    Some(v) => {
                        let polarity = choose_polarity(&solver.assign, &solver.cdb, &solver.config, rng, v);
                        let lit = if polarity { crate::types::Lit::pos(v) } else { crate::types::Lit::neg(v) };
                        solver.assign.set_marker();
                        solver.assign.assign(lit, Reason::Decision);
                    }
                }
            }
        }
    }
}

fn handle_conflict(solver: &mut Solver, conflict: Conflict) {
    let Analysis {
        learnt,
        backtrack_level,
        lbd,
    } = analyze::analyze(&mut solver.assign, &mut solver.cdb, conflict);

    let target = backtrack_level.max(solver.assign.root_level());
    solver.assign.backtrack(target);
    debug!("learned clause of size {} (lbd {})", learnt.len(), lbd);

    match learnt.len() {
        1 => {
            solver.assign.assign(learnt[0], Reason::Decision);
        }
        2 => {
            solver.cdb.new_binary(learnt[0], learnt[1]);
            solver.assign.assign(learnt[0], Reason::Binary(learnt[1]));
        }
        _ => {
            let cid = solver.cdb.new_clause(&learnt, true);
            solver.cdb.clause_mut(cid).lbd = lbd;
            solver.cdb.bump_clause_activity(cid);
            solver.assign.assign(learnt[0], Reason::Long(cid));
        }
    }
}

/// `reduce_CNF`: drop root-level-satisfied clauses and, optionally, rebuild
/// the decision heap over the variables that remain unassigned.
fn simplify(solver: &mut Solver) {
    let assign = &solver.assign;
    solver.cdb.remove_satisfied(|l| assign.value(l) == Some(true));
    solver.assign.rebuild_heap();
    solver.root_level_dirty = false;
}

/// `reduce_db`: evict the least useful half of non-glue, non-locked
/// learned clauses and grow the threshold for the next sweep.
fn reduce(solver: &mut Solver) {
    use std::collections::HashSet;

    let glue_lbd = solver.config.glue_lbd;
    // A clause is locked when some assigned variable's reason points at it.
    // Scanning the trail is acceptable since `reduce_db` runs far less
    // often than propagation.
    let locked: HashSet<crate::types::ClauseId> = (0..solver.assign.trail_len())
        .filter_map(|i| {
            let v = solver.assign.trail_lit(i).var();
            match solver.assign.reason(v) {
                Reason::Long(cid) => Some(cid),
                _ => None,
            }
        })
        .collect();
    let doomed = solver.cdb.reduce_db(glue_lbd, |cid| locked.contains(&cid));
    debug!("reduce_db evicted {} clauses", doomed.len());
    solver.reduce_db_threshold *= solver.config.reduce_db_growth;
}

fn extract_model(solver: &Solver) -> Certificate {
    let model = (0..solver.assign.num_vars() as u32)
        .map(|v| solver.assign.var_value(v).unwrap_or(false))
        .collect();
    Certificate::Sat(model)
}
