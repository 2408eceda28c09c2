/*!
# ymsat: a CDCL SAT solver for propositional logic in Rust

ymsat is a conflict-driven clause-learning SAT solver built around the
usual pieces of a modern CDCL implementation:

- two-watched-literal Boolean constraint propagation
- first-UIP conflict analysis with recursive clause minimization and LBD
- activity-based (VSIDS-style) variable and clause scoring, with phase
  saving for decision polarity
- a Luby-sequence restart schedule and periodic learned-clause reduction

## Usage

```no_run
use ymsat::config::Config;
use ymsat::solver::{Certificate, Solver};
use ymsat::types::Lit;

let mut solver = Solver::new(Config::default());
let a = solver.new_var();
let b = solver.new_var();
solver.add_clause(&[Lit::pos(a), Lit::pos(b)]).unwrap();
solver.add_clause(&[Lit::neg(a), Lit::pos(b)]).unwrap();
match solver.solve(&[]).unwrap() {
    Certificate::Sat(model) => println!("SAT: {model:?}"),
    Certificate::Unsat => println!("UNSAT"),
    Certificate::Unknown => println!("budget exhausted"),
}
```
*/

/// Conflict analysis: first-UIP resolution, clause minimization, LBD.
pub mod analyze;
/// The assignment trail, variable heap, decision polarity, and BCP.
pub mod assign;
/// The clause store, allocator, and watch lists.
pub mod cdb;
/// Solver-wide tunable configuration, also the CLI argument surface.
pub mod config;
/// A DIMACS CNF file reader that feeds a [`solver::Solver`].
pub mod dimacs;
/// The error kinds a [`solver::Solver`] can report.
pub mod error;
/// The Luby-sequence restart schedule.
pub mod restart;
/// The public solver type and its top-level search loop.
pub mod solver;
/// Solver statistics and the message-handler trait used to observe them.
pub mod stats;
/// Variable/literal encoding and other building blocks shared crate-wide.
pub mod types;
