//! Tunable solver-wide constants, collected in one place instead of being
//! scattered as bare literals through the search driver.

use std::path::PathBuf;

/// Every knob the search driver, analyzer, and heap consult. Built by
/// [`Default`] and overridable field-by-field, or parsed straight off the
/// command line by the `ymsat` binary via `clap`'s derive API.
#[derive(Clone, Debug, clap::Parser)]
#[command(name = "ymsat", about = "A CDCL SAT solver")]
pub struct Config {
    /// DIMACS CNF file to solve. Absent when `Config` is used as a library
    /// default rather than parsed from `std::env::args`.
    #[arg(default_value = "")]
    pub cnf_file: PathBuf,

    /// Hard cap on conflicts across the whole `solve` call; 0 means
    /// unbounded.
    #[arg(long, default_value_t = 0)]
    pub max_conflicts: u64,

    /// Conflict budget of the first restart; later restarts scale this by
    /// the Luby sequence.
    #[arg(long, default_value_t = 100)]
    pub restart_base: u64,

    /// Divisor applied to the variable-activity bump increment after every
    /// conflict (smaller = faster decay towards recently-bumped variables).
    #[arg(long, default_value_t = 0.95)]
    pub var_decay: f64,

    /// Divisor applied to the clause-activity bump increment after every
    /// conflict.
    #[arg(long, default_value_t = 0.999)]
    pub clause_decay: f64,

    /// LBD at or below which a learned clause is treated as "glue" and
    /// protected from `reduce_db`.
    #[arg(long, default_value_t = 2)]
    pub glue_lbd: u32,

    /// Multiplicative growth applied to the learned-clause count threshold
    /// each time `reduce_db` runs.
    #[arg(long, default_value_t = 1.1)]
    pub reduce_db_growth: f64,

    /// Initial learned-clause count threshold that triggers `reduce_db`.
    #[arg(long, default_value_t = 2000)]
    pub reduce_db_init: usize,

    /// Probability (0.0..=1.0) of choosing a uniformly random polarity for
    /// a decision instead of consulting the phase cache / fallback policy.
    #[arg(long, default_value_t = 0.02)]
    pub random_polarity_rate: f64,

    /// Whether to consult each variable's phase cache when deciding
    /// polarity (falls back to `decision_polarity` when unset or disabled).
    #[arg(long, default_value_t = true)]
    pub use_phase_cache: bool,

    /// Polarity fallback used when the phase cache is disabled, stale, or
    /// loses the random-polarity draw.
    #[arg(long, value_enum, default_value_t = DecisionPolarity::Negative)]
    pub decision_polarity: DecisionPolarity,

    /// Whether to run `reduce_CNF` (drop root-level-satisfied clauses)
    /// whenever the search returns to level 0 with no conflict.
    #[arg(long, default_value_t = true)]
    pub simplify_at_level_zero: bool,

    /// Random seed for polarity draws and any other stochastic decisions.
    #[arg(long, default_value_t = 0xdead_beef)]
    pub seed: u64,

    /// Suppress progress lines printed through the message handler.
    #[arg(long)]
    pub quiet: bool,
}

/// Fallback polarity policy consulted when the phase cache does not apply.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum DecisionPolarity {
    /// Always choose `False`.
    Negative,
    /// Always choose `True`.
    Positive,
    /// Prefer the literal whose watch list is currently longer.
    LargerWatchList,
    /// Prefer the literal whose watch list is currently shorter.
    SmallerWatchList,
    /// Flip a coin.
    Random,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            cnf_file: PathBuf::new(),
            max_conflicts: 0,
            restart_base: 100,
            var_decay: 0.95,
            clause_decay: 0.999,
            glue_lbd: 2,
            reduce_db_growth: 1.1,
            reduce_db_init: 2000,
            random_polarity_rate: 0.02,
            use_phase_cache: true,
            decision_polarity: DecisionPolarity::Negative,
            simplify_at_level_zero: true,
            seed: 0xdead_beef,
            quiet: false,
        }
    }
}
