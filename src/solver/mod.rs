//! The public solver API (§4.7, §6): [`Solver`] owns every other component
//! and is the sole type library callers and the `ymsat` binary interact
//! with.

mod build;
mod search;

use log::info;

use crate::assign::propagate::propagate;
use crate::assign::Assignment;
use crate::cdb::ClauseDb;
use crate::config::Config;
use crate::error::{Result, SolverError};
use crate::restart::RestartPolicy;
use crate::stats::{MessageHandler, NullMessageHandler, Stats};
use crate::types::{Lit, Reason, VarId};

/// The outcome of a [`Solver::solve`] call.
#[derive(Debug, Clone)]
pub enum Certificate {
    /// A full satisfying assignment, indexed by variable.
    Sat(Vec<bool>),
    /// The input (together with any assumptions) is unsatisfiable.
    Unsat,
    /// The conflict budget was exhausted before a verdict was reached; the
    /// solver remains usable for a subsequent `solve` call.
    Unknown,
}

/// A CDCL SAT solver. Owns the clause database, the assignment trail and
/// variable heap, the restart schedule, and solver-wide configuration.
pub struct Solver {
    pub(crate) assign: Assignment,
    pub(crate) cdb: ClauseDb,
    pub(crate) config: Config,
    restart: RestartPolicy,
    handler: Box<dyn MessageHandler>,
    /// Set once an empty clause is derived; sticky for the solver's
    /// lifetime (§7, error kind 2).
    unsat: bool,
    /// Learned-clause count threshold that triggers the next `reduce_db`;
    /// grows by `config.reduce_db_growth` each time it fires.
    reduce_db_threshold: f64,
    /// Whether any root-level assignment has happened since the last
    /// `reduce_CNF` pass (§4.6's "skip if nothing changed" clause).
    root_level_dirty: bool,
}

impl Default for Solver {
    fn default() -> Solver {
        Solver::new(Config::default())
    }
}

impl Solver {
    pub fn new(config: Config) -> Solver {
        let restart = RestartPolicy::new(config.restart_base.max(1));
        let reduce_db_threshold = config.reduce_db_init as f64;
        Solver {
            assign: Assignment::new(0, config.var_decay),
            cdb: ClauseDb::new(0, config.clause_decay),
            config,
            restart,
            handler: Box::new(NullMessageHandler),
            unsat: false,
            reduce_db_threshold,
            root_level_dirty: false,
        }
    }

    /// Introduces a fresh variable, returning its dense handle.
    pub fn new_var(&mut self) -> VarId {
        self.cdb.add_var_slot();
        self.assign.new_var()
    }

    pub fn num_vars(&self) -> usize {
        self.assign.num_vars()
    }

    /// Adds a clause, applying the level-0 simplifications of §4.7:
    /// duplicate removal, tautology/already-satisfied detection, and
    /// dropping literals already `False`. Returns `Ok(())` even when the
    /// clause was silently accepted as satisfied or discarded; an empty
    /// result renders the solver permanently unsatisfiable.
    pub fn add_clause(&mut self, lits: &[Lit]) -> Result<()> {
        if self.assign.decision_level() != 0 {
            return Err(SolverError::NonZeroLevelInput {
                level: self.assign.decision_level(),
            });
        }
        for &l in lits {
            if l.var() as usize >= self.assign.num_vars() {
                return Err(SolverError::UndefinedVariable { var: l.var() });
            }
        }
        if self.unsat {
            return Err(SolverError::Unsat);
        }

        let mut buf: Vec<Lit> = lits.to_vec();
        buf.sort_unstable();
        buf.dedup();

        let mut tautology = false;
        let mut i = 0;
        while i + 1 < buf.len() {
            if buf[i].var() == buf[i + 1].var() {
                tautology = true;
                break;
            }
            i += 1;
        }
        if tautology {
            return Ok(());
        }

        let mut satisfied = false;
        buf.retain(|&l| match self.assign.value(l) {
            Some(true) => {
                satisfied = true;
                true
            }
            Some(false) => false,
            None => true,
        });
        if satisfied {
            return Ok(());
        }

        match buf.len() {
            0 => {
                self.unsat = true;
                Err(SolverError::Unsat)
            }
            1 => {
                self.assign.assign(buf[0], Reason::Decision);
                self.root_level_dirty = true;
                if propagate(&mut self.assign, &mut self.cdb).is_some() {
                    self.unsat = true;
                    return Err(SolverError::Unsat);
                }
                Ok(())
            }
            2 => {
                self.cdb.new_binary(buf[0], buf[1]);
                Ok(())
            }
            _ => {
                self.cdb.new_clause(&buf, false);
                Ok(())
            }
        }
    }

    /// Solves under the given assumptions, each forced `True` in order
    /// before the main search loop begins (§4.6 "Assumptions").
    pub fn solve(&mut self, assumptions: &[Lit]) -> Result<Certificate> {
        if self.unsat {
            return Ok(Certificate::Unsat);
        }
        self.handler.header();
        self.assign.backtrack(0);

        for &a in assumptions {
            match self.assign.value(a) {
                Some(false) => {
                    self.assign.backtrack(0);
                    self.handler.footer(&self.get_stats());
                    return Ok(Certificate::Unsat);
                }
                Some(true) => continue,
                None => {
                    self.assign.set_marker();
                    self.assign.assign(a, Reason::Decision);
                    if propagate(&mut self.assign, &mut self.cdb).is_some() {
                        self.assign.backtrack(0);
                        self.handler.footer(&self.get_stats());
                        return Ok(Certificate::Unsat);
                    }
                }
            }
        }
        self.assign.set_root_level(self.assign.decision_level());

        let result = search::drive(self);
        if let Ok(Certificate::Sat(_)) = &result {
            self.assign.backtrack(self.assign.root_level());
        }
        self.handler.footer(&self.get_stats());
        result
    }

    /// Overrides the conflict budget reported to the caller; returns the
    /// previous value. `0` means unbounded.
    pub fn set_max_conflict(&mut self, n: u64) -> u64 {
        std::mem::replace(&mut self.config.max_conflicts, n)
    }

    pub fn get_stats(&self) -> Stats {
        Stats {
            restarts: self.assign.num_restarts,
            num_vars: self.assign.num_vars(),
            num_clauses: self.cdb.num_clauses() - self.cdb.num_learnt(),
            num_clause_literals: self.cdb.num_clause_literals(),
            num_learnt: self.cdb.num_learnt(),
            num_learnt_literals: self.cdb.num_learnt_literals(),
            conflicts: self.assign.num_conflicts,
            decisions: self.assign.num_decisions,
            propagations: self.assign.num_propagations,
            conflict_limit: self.config.max_conflicts,
        }
    }

    pub fn register_message_handler(&mut self, handler: Box<dyn MessageHandler>) {
        self.handler = handler;
    }

    pub(crate) fn report_restart(&mut self) {
        self.assign.num_restarts += 1;
        let stats = self.get_stats();
        if !self.config.quiet {
            info!(
                "restart #{}: {} conflicts, {} learnt clauses",
                stats.restarts, stats.conflicts, stats.num_learnt
            );
        }
        self.handler.message(&stats);
    }
}
