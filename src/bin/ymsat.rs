//! `ymsat <cnf-file>`: a thin CLI collaborator around [`ymsat::solver::Solver`]
//! (§6). Exit code follows the DIMACS convention: 10 for SAT, 20 for UNSAT,
//! 0 for an inconclusive (`Unknown`) result.

use std::fs::File;
use std::io::BufReader;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use log::info;

use ymsat::config::Config;
use ymsat::dimacs;
use ymsat::solver::{Certificate, Solver};
use ymsat::stats::{MessageHandler, Stats};

struct ProgressPrinter {
    quiet: bool,
    start: Instant,
}

impl MessageHandler for ProgressPrinter {
    fn header(&mut self) {
        if !self.quiet {
            eprintln!("searching...");
        }
    }

    fn message(&mut self, stats: &Stats) {
        if !self.quiet {
            eprintln!(
                "restart #{:<5} conflicts {:<8} learnt {:<8} {:>8.2}s",
                stats.restarts,
                stats.conflicts,
                stats.num_learnt,
                self.start.elapsed().as_secs_f64()
            );
        }
    }

    fn footer(&mut self, stats: &Stats) {
        if !self.quiet {
            eprintln!(
                "#vars: {}, #conflicts: {}, #decisions: {}, #propagations: {}, time: {:.2}s",
                stats.num_vars,
                stats.conflicts,
                stats.decisions,
                stats.propagations,
                self.start.elapsed().as_secs_f64()
            );
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let config = Config::parse();
    let quiet = config.quiet;

    let file = match File::open(&config.cnf_file) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("{}: {e}", config.cnf_file.display());
            return ExitCode::FAILURE;
        }
    };

    let mut solver = Solver::new(config);
    if let Err(e) = dimacs::load(&mut solver, BufReader::new(file)) {
        eprintln!("{e}");
        return ExitCode::FAILURE;
    }
    info!("loaded {} variables", solver.num_vars());

    solver.register_message_handler(Box::new(ProgressPrinter {
        quiet,
        start: Instant::now(),
    }));

    match solver.solve(&[]) {
        Ok(Certificate::Sat(model)) => {
            let assignment: Vec<i32> = model
                .iter()
                .enumerate()
                .map(|(v, &b)| if b { v as i32 + 1 } else { -(v as i32 + 1) })
                .collect();
            println!("s SATISFIABLE");
            print!("v");
            for lit in assignment {
                print!(" {lit}");
            }
            println!(" 0");
            ExitCode::from(10)
        }
        Ok(Certificate::Unsat) => {
            println!("s UNSATISFIABLE");
            ExitCode::from(20)
        }
        Ok(Certificate::Unknown) => {
            println!("s UNKNOWN");
            ExitCode::from(0)
        }
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
