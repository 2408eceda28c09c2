// cargo test
use ymsat::config::Config;
use ymsat::solver::{Certificate, Solver};
use ymsat::types::Lit;

macro_rules! mkv {
    ($($x:expr),*) => {
        match &[$($x),*] {
            v => v.iter().map(|x| Lit::from(*x as i32)).collect::<Vec<Lit>>(),
        }
    };
}

fn new_solver() -> Solver {
    Solver::new(Config::default())
}

fn lits(xs: &[i32]) -> Vec<Lit> {
    xs.iter().map(|&x| Lit::from(x)).collect()
}

fn assert_satisfies(model: &[bool], clauses: &[Vec<i32>]) {
    for clause in clauses {
        let satisfied = clause.iter().any(|&x| {
            let v = (x.unsigned_abs() - 1) as usize;
            model[v] == (x > 0)
        });
        assert!(satisfied, "clause {clause:?} not satisfied by {model:?}");
    }
}

#[test]
fn basic_satisfiable_formula() {
    let mut s = new_solver();
    for _ in 0..3 {
        s.new_var();
    }
    let clauses: Vec<Vec<i32>> = vec![vec![1, 2, 3], vec![-1, 2], vec![-2, 3]];
    for c in &clauses {
        s.add_clause(&lits(c)).unwrap();
    }
    match s.solve(&[]).unwrap() {
        Certificate::Sat(model) => assert_satisfies(&model, &clauses),
        other => panic!("expected Sat, got {other:?}"),
    }
}

#[test]
fn basic_unsatisfiable_formula() {
    let mut s = new_solver();
    for _ in 0..1 {
        s.new_var();
    }
    s.add_clause(&mkv![1]).unwrap();
    s.add_clause(&mkv![-1]).unwrap();
    match s.solve(&[]).unwrap() {
        Certificate::Unsat => {}
        other => panic!("expected Unsat, got {other:?}"),
    }
}

#[test]
fn exactly_one_of_three() {
    let mut s = new_solver();
    for _ in 0..3 {
        s.new_var();
    }
    s.add_clause(&mkv![1, 2, 3]).unwrap();
    s.add_clause(&mkv![-1, -2]).unwrap();
    s.add_clause(&mkv![-1, -3]).unwrap();
    s.add_clause(&mkv![-2, -3]).unwrap();
    match s.solve(&[]).unwrap() {
        Certificate::Sat(model) => {
            let count = model.iter().filter(|&&b| b).count();
            assert_eq!(count, 1);
        }
        other => panic!("expected Sat, got {other:?}"),
    }
}

/// Pigeonhole: 3 pigeons into 2 holes is unsatisfiable. Variable `v(p, h)`
/// (pigeon `p` in hole `h`) is `3*p + h + 1`.
#[test]
fn pigeonhole_three_into_two_is_unsat() {
    let mut s = new_solver();
    for _ in 0..6 {
        s.new_var();
    }
    let v = |p: i32, h: i32| 2 * p + h + 1;
    for p in 0..3 {
        s.add_clause(&mkv![v(p, 0), v(p, 1)]).unwrap();
    }
    for h in 0..2 {
        for p1 in 0..3 {
            for p2 in (p1 + 1)..3 {
                s.add_clause(&mkv![-v(p1, h), -v(p2, h)]).unwrap();
            }
        }
    }
    match s.solve(&[]).unwrap() {
        Certificate::Unsat => {}
        other => panic!("expected Unsat, got {other:?}"),
    }
}

#[test]
fn assumptions_are_reusable_across_separate_solve_calls() {
    let mut s = new_solver();
    for _ in 0..2 {
        s.new_var();
    }
    s.add_clause(&mkv![1, 2]).unwrap();

    match s.solve(&mkv![-1]).unwrap() {
        Certificate::Sat(model) => assert!(model[1]),
        other => panic!("expected Sat, got {other:?}"),
    }
    match s.solve(&mkv![-2]).unwrap() {
        Certificate::Sat(model) => assert!(model[0]),
        other => panic!("expected Sat, got {other:?}"),
    }
}

#[test]
fn zero_conflict_budget_yields_unknown() {
    let mut s = new_solver();
    // 8 pigeons into 3 holes: hard enough that the very first restart's
    // conflict budget (Luby(0) * base = base itself) is exhausted before a
    // verdict is reached.
    for _ in 0..24 {
        s.new_var();
    }
    s.set_max_conflict(1);
    let v = |p: i32, h: i32| 3 * p + h + 1;
    for p in 0..8 {
        s.add_clause(&mkv![v(p, 0), v(p, 1), v(p, 2)]).unwrap();
    }
    for h in 0..3 {
        for p1 in 0..8 {
            for p2 in (p1 + 1)..8 {
                s.add_clause(&mkv![-v(p1, h), -v(p2, h)]).unwrap();
            }
        }
    }
    match s.solve(&[]).unwrap() {
        Certificate::Unknown | Certificate::Unsat => {}
        other => panic!("expected Unknown or Unsat with a 1-conflict budget, got {other:?}"),
    }
}

#[test]
fn empty_clause_makes_the_solver_permanently_unsat() {
    let mut s = new_solver();
    s.new_var();
    assert!(s.add_clause(&[]).is_err());
    match s.solve(&[]).unwrap() {
        Certificate::Unsat => {}
        other => panic!("expected Unsat, got {other:?}"),
    }
}

#[test]
fn unit_clauses_propagate_immediately() {
    let mut s = new_solver();
    for _ in 0..2 {
        s.new_var();
    }
    s.add_clause(&mkv![1]).unwrap();
    s.add_clause(&mkv![-1, 2]).unwrap();
    match s.solve(&[]).unwrap() {
        Certificate::Sat(model) => {
            assert!(model[0]);
            assert!(model[1]);
        }
        other => panic!("expected Sat, got {other:?}"),
    }
}

#[test]
fn tautological_clause_is_accepted_and_ignored() {
    let mut s = new_solver();
    s.new_var();
    assert!(s.add_clause(&mkv![1, -1]).is_ok());
    match s.solve(&[]).unwrap() {
        Certificate::Sat(_) => {}
        other => panic!("expected Sat, got {other:?}"),
    }
}

#[test]
fn duplicate_literals_are_collapsed() {
    let mut s = new_solver();
    s.new_var();
    s.new_var();
    assert!(s.add_clause(&mkv![1, 2, 1]).is_ok());
    match s.solve(&[]).unwrap() {
        Certificate::Sat(model) => assert!(model[0] || model[1]),
        other => panic!("expected Sat, got {other:?}"),
    }
}
