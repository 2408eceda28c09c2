//! Solver construction from a known problem size, mirroring the reference
//! codebase's `instantiate(config, cnf_description)` pattern: pre-size the
//! trail, heap, and watch lists once instead of growing them one
//! `new_var` call at a time.

use super::Solver;
use crate::assign::Assignment;
use crate::cdb::ClauseDb;
use crate::config::Config;
use crate::types::CNFDescription;

impl Solver {
    /// Builds a solver sized for `cnf.num_of_variables`, then introduces
    /// exactly that many variables. `cnf.num_of_clauses` only pre-sizes an
    /// internal capacity hint; it does not have to match the clauses
    /// actually added afterwards.
    pub fn instantiate(config: Config, cnf: &CNFDescription) -> Solver {
        let mut solver = Solver {
            assign: Assignment::new(cnf.num_of_variables, config.var_decay),
            cdb: ClauseDb::new(0, config.clause_decay),
            ..Solver::new(config)
        };
        for _ in 0..cnf.num_of_variables {
            solver.new_var();
        }
        solver
    }
}
