//! Error kinds reported by the solver core.

use thiserror::Error;

use crate::types::VarId;

/// Everything that can go wrong while building or driving a [`crate::solver::Solver`].
///
/// Only [`SolverError::BudgetExhausted`] is meant to be routinely handled by
/// callers (it surfaces as `solve` returning `Unknown`, not as an `Err`);
/// the others indicate a programming error or a terminal resource failure.
#[derive(Debug, Error)]
pub enum SolverError {
    #[error("add_clause called at decision level {level}, but the solver is only accepting input clauses at level 0")]
    NonZeroLevelInput { level: u32 },

    #[error("literal refers to variable {var} which was never introduced via new_var")]
    UndefinedVariable { var: VarId },

    #[error("the formula is permanently unsatisfiable")]
    Unsat,

    #[error("out of memory while growing solver state")]
    OutOfMemory,

    #[error("search budget of {limit} conflicts exhausted")]
    BudgetExhausted { limit: u64 },
}

pub type Result<T> = std::result::Result<T, SolverError>;
