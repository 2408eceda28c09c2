//! Decision polarity selection (§4.6, "Decision heuristic"). The variable
//! itself comes from [`super::Assignment::pop_decision_var`]; this module
//! only picks which polarity to assign it.

use rand::Rng;

use super::Assignment;
use crate::cdb::ClauseDb;
use crate::config::{Config, DecisionPolarity};
use crate::types::{Lit, VarId};

/// Chooses `True` or `False` for a freshly popped decision variable,
/// consulting (in precedence order) a random draw, the phase cache, and
/// the configured fallback policy.
pub(crate) fn choose_polarity(
    assign: &Assignment,
    cdb: &ClauseDb,
    config: &Config,
    rng: &mut impl Rng,
    v: VarId,
) -> bool {
    if config.random_polarity_rate > 0.0 && rng.gen::<f64>() < config.random_polarity_rate {
        return rng.gen();
    }
    if config.use_phase_cache {
        if let Some(phase) = assign.phase(v) {
            return phase;
        }
    }
    match config.decision_polarity {
        DecisionPolarity::Negative => false,
        DecisionPolarity::Positive => true,
        DecisionPolarity::Random => rng.gen(),
        DecisionPolarity::LargerWatchList => watch_list_len(cdb, Lit::pos(v)) >= watch_list_len(cdb, Lit::neg(v)),
        DecisionPolarity::SmallerWatchList => watch_list_len(cdb, Lit::pos(v)) <= watch_list_len(cdb, Lit::neg(v)),
    }
}

fn watch_list_len(cdb: &ClauseDb, l: Lit) -> usize {
    cdb.watch_lists[l.code()].len()
}
