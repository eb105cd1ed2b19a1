use crate::codegen::rename::RenameTable;
use crate::drivers::{DriverOptions, SolverKind, evaluate_coefficient, generate, p3p_grunert};
use crate::error::CoeffError;
use strum::IntoEnumIterator;
use tempfile::tempdir;

#[test]
fn test_solver_names_round_trip() {
    let names: Vec<String> = SolverKind::iter().map(|k| k.to_string()).collect();
    assert_eq!(
        names,
        vec!["p3p_grunert", "p3p_finsterwalder", "five_point_nister", "trifocal"]
    );
    for kind in SolverKind::iter() {
        assert_eq!(SolverKind::from_name(kind.as_ref()).unwrap(), kind);
    }
}

#[test]
fn test_unknown_solver_is_rejected() {
    match SolverKind::from_name("p4p") {
        Err(CoeffError::UnknownSolver(name)) => assert_eq!(name, "p4p"),
        other => panic!("expected UnknownSolver, got {:?}", other),
    }
}

#[test]
fn test_generate_grunert_assignments() {
    let file = generate(SolverKind::P3pGrunert, &DriverOptions::for_solver(SolverKind::P3pGrunert))
        .unwrap();
    assert_eq!(file.assignments.len(), 5);
    for (i, a) in file.assignments.iter().enumerate() {
        assert_eq!(a.target, "poly");
        assert_eq!(a.field, "c");
        assert_eq!(a.index, i);
        assert!(!a.expression.is_empty());
        assert!(!a.expression.contains("cos_"), "not renamed: {}", a.expression);
        assert!(!a.expression.contains('^'), "power left: {}", a.expression);
    }
    assert!(file.render().lines().nth(1).unwrap().starts_with("poly.c[0] = "));
}

#[test]
fn test_simplify_does_not_change_values() {
    let plain = DriverOptions {
        simplify: false,
        renames: RenameTable::new(),
    };
    let factored = DriverOptions {
        simplify: true,
        renames: RenameTable::new(),
    };
    let kind = SolverKind::P3pGrunert;
    let a = generate(kind, &plain).unwrap();
    let b = generate(kind, &factored).unwrap();
    let values = [0.9, 1.3, 1.1, 0.7, 0.2, 0.5, -0.3];
    for (x, y) in a.assignments.iter().zip(&b.assignments) {
        let vx = evaluate_coefficient(&x.expression, &p3p_grunert::SYMBOLS, &values).unwrap();
        let vy = evaluate_coefficient(&y.expression, &p3p_grunert::SYMBOLS, &values).unwrap();
        approx::assert_relative_eq!(vx, vy, epsilon = 1e-9, max_relative = 1e-9);
    }
}

#[test]
fn test_zero_slots_are_written_as_zero() {
    let file = generate(
        SolverKind::Trifocal,
        &DriverOptions::for_solver(SolverKind::Trifocal),
    )
    .unwrap();
    assert_eq!(file.assignments.len(), SolverKind::Trifocal.slot_count());
    // [xb]x has a zero diagonal, so some tensor entries never reach some rows
    assert!(file.assignments.iter().any(|a| a.expression == "0"));
    assert!(file.assignments.iter().all(|a| !a.expression.is_empty()));
}

#[test]
fn test_generated_file_written_to_disk() {
    let dir = tempdir().unwrap();
    let kind = SolverKind::P3pFinsterwalder;
    let path = dir.path().join(kind.default_file_name());
    generate(kind, &DriverOptions::for_solver(kind))
        .unwrap()
        .write_to(&path)
        .unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(text.lines().count(), 1 + kind.slot_count());
    assert!(text.contains("poly.c[3] = "));
}
