//! Solver statistics (§4.10) and the [`MessageHandler`] trait used by
//! [`crate::solver::Solver::register_message_handler`] to observe them.

/// A snapshot of a [`crate::solver::Solver`]'s internal counters, handed to
/// registered [`MessageHandler`]s and returned from `get_stats`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Stats {
    pub restarts: u64,
    pub num_vars: usize,
    pub num_clauses: usize,
    pub num_clause_literals: usize,
    pub num_learnt: usize,
    pub num_learnt_literals: usize,
    pub conflicts: u64,
    pub decisions: u64,
    pub propagations: u64,
    pub conflict_limit: u64,
}

/// Receives periodic progress reports during `solve` (§4.10). The driver
/// calls `header` once at the start of a search, `message` once per
/// restart, and `footer` once the search concludes, mirroring the
/// three-callback shape of the reference codebase's progress reporter.
pub trait MessageHandler {
    fn header(&mut self);
    fn message(&mut self, stats: &Stats);
    fn footer(&mut self, stats: &Stats);
}

/// The default handler installed when none is registered: does nothing.
pub struct NullMessageHandler;

impl MessageHandler for NullMessageHandler {
    fn header(&mut self) {}
    fn message(&mut self, _stats: &Stats) {}
    fn footer(&mut self, _stats: &Stats) {}
}
