//! Per-literal watch lists: `Vec<Watcher>` indexed by [`Lit::code`].

use crate::types::{ClauseId, Lit, Watcher};

/// Operations a per-literal watch list supports during BCP and clause
/// attach/detach. Implemented directly on `Vec<Watcher>` so the propagator
/// can index `watch_lists[lit.code()]` and call these without an extra
/// layer of indirection.
pub(crate) trait WatchListIf {
    fn register_binary(&mut self, other: Lit);
    fn register_clause(&mut self, blocker: Lit, cid: ClauseId);
    fn detach_clause(&mut self, cid: ClauseId);
}

impl WatchListIf for Vec<Watcher> {
    fn register_binary(&mut self, other: Lit) {
        self.push(Watcher::Binary(other));
    }

    fn register_clause(&mut self, blocker: Lit, cid: ClauseId) {
        self.push(Watcher::Clause { blocker, cid });
    }

    fn detach_clause(&mut self, cid: ClauseId) {
        self.retain(|w| !matches!(w, Watcher::Clause { cid: c, .. } if *c == cid));
    }
}
