//! DIMACS CNF parsing (§6): a thin collaborator that feeds `new_var`/
//! `add_clause` calls to a [`Solver`], external to the solver's own
//! invariants per §4.11.

use std::io::BufRead;

use thiserror::Error;

use crate::solver::Solver;
use crate::types::Lit;

/// Errors from parsing a DIMACS CNF stream. Distinct from [`crate::error::SolverError`]:
/// a malformed file is a problem with the input text, not with the solver.
#[derive(Debug, Error)]
pub enum DimacsError {
    #[error("line {line}: expected 'p cnf <variables> <clauses>' header, found {found:?}")]
    InvalidHeader { line: usize, found: String },

    #[error("line {line}: '{token}' is not a valid integer literal")]
    NotAnInteger { line: usize, token: String },

    #[error("line {line}: clause references variable {var}, but the header declares only {declared}")]
    VariableOutOfRange { line: usize, var: u32, declared: usize },

    #[error("clause list ended without a trailing clause terminated by 0")]
    UnterminatedClause,

    #[error("no 'p cnf' header was found before the first clause")]
    MissingHeader,

    #[error(transparent)]
    Solver(#[from] crate::error::SolverError),

    #[error("I/O error reading DIMACS input: {0}")]
    Io(#[from] std::io::Error),
}

/// Parses `reader` as a DIMACS CNF file, introducing one variable per
/// declared header count and adding every clause via `solver.add_clause`.
/// Lines starting with `c` are comments; the first non-comment line must
/// be a `p cnf <variables> <clauses>` header.
pub fn load(solver: &mut Solver, reader: impl BufRead) -> Result<(), DimacsError> {
    let mut declared_vars = None;
    let mut clause: Vec<Lit> = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('c') {
            continue;
        }
        if trimmed.starts_with('p') {
            let mut fields = trimmed.split_whitespace();
            let (Some("p"), Some("cnf"), Some(nv), Some(_nc)) =
                (fields.next(), fields.next(), fields.next(), fields.next())
            else {
                return Err(DimacsError::InvalidHeader {
                    line: line_no,
                    found: trimmed.to_string(),
                });
            };
            let nv: usize = nv.parse().map_err(|_| DimacsError::InvalidHeader {
                line: line_no,
                found: trimmed.to_string(),
            })?;
            for _ in 0..nv {
                solver.new_var();
            }
            declared_vars = Some(nv);
            continue;
        }

        let declared = declared_vars.ok_or(DimacsError::MissingHeader)?;
        for token in trimmed.split_whitespace() {
            let x: i32 = token.parse().map_err(|_| DimacsError::NotAnInteger {
                line: line_no,
                token: token.to_string(),
            })?;
            if x == 0 {
                solver.add_clause(&clause)?;
                clause.clear();
                continue;
            }
            let lit = Lit::from(x);
            if lit.var() as usize >= declared {
                return Err(DimacsError::VariableOutOfRange {
                    line: line_no,
                    var: lit.var() + 1,
                    declared,
                });
            }
            clause.push(lit);
        }
    }

    if !clause.is_empty() {
        return Err(DimacsError::UnterminatedClause);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::solver::Certificate;

    #[test]
    fn parses_a_small_satisfiable_formula() {
        let dimacs = b"c a trivial formula\np cnf 2 2\n1 2 0\n-1 2 0\n";
        let mut solver = Solver::new(Config::default());
        load(&mut solver, &dimacs[..]).unwrap();
        assert_eq!(solver.num_vars(), 2);
        match solver.solve(&[]).unwrap() {
            Certificate::Sat(model) => assert!(model[1]),
            other => panic!("expected Sat, got {other:?}"),
        }
    }

    #[test]
    fn rejects_a_clause_referencing_an_undeclared_variable() {
        let dimacs = b"p cnf 1 1\n1 2 0\n";
        let mut solver = Solver::new(Config::default());
        assert!(matches!(
            load(&mut solver, &dimacs[..]),
            Err(DimacsError::VariableOutOfRange { .. })
        ));
    }

    #[test]
    fn rejects_a_missing_header() {
        let dimacs = b"1 2 0\n";
        let mut solver = Solver::new(Config::default());
        assert!(matches!(load(&mut solver, &dimacs[..]), Err(DimacsError::MissingHeader)));
    }
}
