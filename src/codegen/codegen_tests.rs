//! Whole-toolkit checks: text produced by the extractor and the simplifier is
//! parsed back with the symbolic engine and compared against the polynomial
//! it came from.
use crate::codegen::common_factor::simplify;
use crate::codegen::power_expand::expand_powers;
use crate::codegen::rename::RenameTable;
use crate::codegen::term_extractor::{
    coefficient_of, extract_with_key, extract_without_key, or_zero,
};
use crate::codegen::terms::split_terms;
use crate::symbolic::symbolic_engine::Expr;
use crate::symbolic::symbolic_expand::Polynomial;
use approx::assert_relative_eq;

fn parse_or_zero(text: &str) -> Expr {
    Expr::parse_expression(&or_zero(text)).unwrap()
}

fn sample() -> Polynomial {
    Expr::parse_expression("(a*x + b*y + 1)^2*(x - c) + x^3/4 - 2*y^2*x + 3")
        .unwrap()
        .expand()
        .unwrap()
}

#[test]
fn test_extract_then_multiply_back_restores_polynomial() {
    let poly = sample();
    let text = poly.to_string();
    let mut rebuilt = parse_or_zero(&extract_without_key(&text, &["x"]));
    for e in 1..=poly.degree_in("x") {
        let key = if e == 1 {
            "x".to_string()
        } else {
            format!("x^{}", e)
        };
        let coef = extract_with_key(&text, &key);
        rebuilt = rebuilt + parse_or_zero(&coef) * Expr::var("x").powi(e);
    }
    assert_eq!(rebuilt.expand().unwrap().to_string(), text);
}

#[test]
fn test_monomial_sweep_partitions_polynomial() {
    let poly = sample();
    let text = poly.to_string();
    let mut rebuilt = Expr::Const(0.0);
    let mut matched_terms = 0;
    for i in 0..=poly.degree_in("x") {
        for j in 0..=poly.degree_in("y") {
            let coef = coefficient_of(&text, &[("x", i), ("y", j)]);
            if coef.is_empty() {
                continue;
            }
            matched_terms += split_terms(&coef).len();
            rebuilt =
                rebuilt + parse_or_zero(&coef) * Expr::var("x").powi(i) * Expr::var("y").powi(j);
        }
    }
    assert_eq!(matched_terms, split_terms(&text).len());
    assert_eq!(rebuilt.expand().unwrap().to_string(), text);
}

#[test]
fn test_simplified_coefficients_expand_back() {
    let poly = sample();
    let text = poly.to_string();
    for key in ["x", "x^2", "x^3", "y", "y^2"] {
        let coef = extract_with_key(&text, key);
        if coef.is_empty() {
            continue;
        }
        let factored = simplify(&coef);
        let before = Expr::parse_expression(&coef).unwrap().expand().unwrap();
        let after = Expr::parse_expression(&factored).unwrap().expand().unwrap();
        assert_eq!(after.to_string(), before.to_string(), "key {}", key);
    }
}

#[test]
fn test_power_expansion_preserves_value() {
    let vars = ["a", "b", "c"];
    let values = [1.3, -0.7, 2.1];
    for term in ["a^2*b^3", "-c^4", "3*a^2/2", "-a^2*b/4"] {
        let original = Expr::parse_expression(term).unwrap();
        let expanded = Expr::parse_expression(&expand_powers(term)).unwrap();
        assert_relative_eq!(
            original.eval_expression(vars.to_vec(), &values),
            expanded.eval_expression(vars.to_vec(), &values),
            epsilon = 1e-12
        );
    }
}

#[test]
fn test_pipeline_extract_simplify_rename() {
    let poly = Expr::parse_expression("(xa0*xb1 + xa0*xb0)*v^2 + xb1*v - xa0")
        .unwrap()
        .expand()
        .unwrap();
    let text = poly.to_string();
    let table = RenameTable::from_pairs(&[("xa0", "p1.x"), ("xb0", "p2.x"), ("xb1", "p2.y")]);

    let c2 = table.apply(&simplify(&extract_with_key(&text, "v^2")));
    assert_eq!(c2, "p1.x*( p2.x + p2.y )");
    let c1 = table.apply(&simplify(&extract_with_key(&text, "v")));
    assert_eq!(c1, "p2.y");
    let c0 = table.apply(&simplify(&extract_without_key(&text, &["v"])));
    assert_eq!(c0, "-p1.x");
    assert_eq!(or_zero(&extract_with_key(&text, "v^3")), "0");
}
