//! P3P after Grunert.
//!
//! Three world points at distances `s1, s2, s3` from the camera centre are seen
//! along unit rays with pairwise cosines `cos_a` (rays 2,3), `cos_b` (rays 1,3)
//! and `cos_c` (rays 1,2). The sides of the world triangle are `a` (points 2,3),
//! `b` (1,3) and `c` (1,2). With `u = s2/s1` and `v = s3/s1` the law of cosines
//! gives
//!
//! ```text
//! b^2 (1 + u^2 - 2 u cos_c) = c^2 (1 + v^2 - 2 v cos_b)
//! b^2 (u^2 + v^2 - 2 u v cos_a) = a^2 (1 + v^2 - 2 v cos_b)
//! ```
//!
//! Subtracting the two removes `u^2`, leaving `u = N / D`. Substituting back and
//! clearing `D^2` yields a quartic in `v`; slot `c[i]` is its coefficient of `v^i`.
use crate::codegen::rename::RenameTable;
use crate::codegen::term_extractor::coefficient_of;
use crate::error::Result;
use crate::symbolic::symbolic_engine::Expr;
use crate::symbolic::symbolic_expand::Polynomial;
use crate::symbols;
use log::debug;

pub const SLOTS: usize = 5;

/// Symbols the quartic is written in, unknown first.
pub const SYMBOLS: [&str; 7] = ["v", "a", "b", "c", "cos_a", "cos_b", "cos_c"];

fn c(value: f64) -> Expr {
    Expr::Const(value)
}

/// Numerator and denominator of `u = N / D`.
pub fn depth_ratio_u() -> (Expr, Expr) {
    let (v, a, b, c_side, cos_a, cos_b, cos_c) = symbols!(v, a, b, c, cos_a, cos_b, cos_c);
    let b2 = b.powi(2);
    let k_b = c(1.0) + v.clone().powi(2) - c(2.0) * v.clone() * cos_b;
    let n = b2.clone() * (v.clone().powi(2) - c(1.0)) - (a.powi(2) - c_side.powi(2)) * k_b;
    let d = c(2.0) * b2 * (v * cos_a - cos_c);
    (n, d)
}

/// The quartic `b^2 (N^2 + D^2 - 2 N D cos_c) - c^2 (1 + v^2 - 2 v cos_b) D^2`.
pub fn build_system() -> Result<Polynomial> {
    let (v, b, c_side, cos_b, cos_c) = symbols!(v, b, c, cos_b, cos_c);
    let (n, d) = depth_ratio_u();
    let k_b = c(1.0) + v.clone().powi(2) - c(2.0) * v * cos_b;
    let quartic = b.powi(2)
        * (n.clone().powi(2) + d.clone().powi(2) - c(2.0) * n * d.clone() * cos_c)
        - c_side.powi(2) * k_b * d.powi(2);
    let poly = quartic.expand()?;
    debug!(
        "grunert quartic: {} terms, degree {} in v",
        poly.len(),
        poly.degree_in("v")
    );
    Ok(poly)
}

pub fn coefficients() -> Result<Vec<String>> {
    let text = build_system()?.to_string();
    Ok((0..SLOTS as u32)
        .map(|i| coefficient_of(&text, &[("v", i)]))
        .collect())
}

pub fn default_renames() -> RenameTable {
    RenameTable::from_pairs(&[("cos_a", "cos23"), ("cos_b", "cos13"), ("cos_c", "cos12")])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drivers::evaluate_coefficient;
    use nalgebra::Vector3;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn random_point(rng: &mut StdRng) -> Vector3<f64> {
        Vector3::new(
            rng.random_range(-1.0..1.0),
            rng.random_range(-1.0..1.0),
            rng.random_range(2.0..6.0),
        )
    }

    #[test]
    fn test_quartic_degree() {
        let poly = build_system().unwrap();
        assert_eq!(poly.degree_in("v"), 4);
        let coefficients = coefficients().unwrap();
        assert_eq!(coefficients.len(), SLOTS);
        assert!(coefficients.iter().all(|c| !c.is_empty()));
    }

    #[test]
    fn test_true_depth_ratio_is_root() {
        let mut rng = StdRng::seed_from_u64(7);
        let coefficients = coefficients().unwrap();
        for _ in 0..5 {
            let (p1, p2, p3) = (
                random_point(&mut rng),
                random_point(&mut rng),
                random_point(&mut rng),
            );
            let (r1, r2, r3) = (p1.normalize(), p2.normalize(), p3.normalize());
            let values = [
                0.0,
                (p2 - p3).norm(),
                (p1 - p3).norm(),
                (p1 - p2).norm(),
                r2.dot(&r3),
                r1.dot(&r3),
                r1.dot(&r2),
            ];
            let v = p3.norm() / p1.norm();
            let mut residual = 0.0;
            let mut scale = 0.0;
            for (i, coef) in coefficients.iter().enumerate() {
                let ci = evaluate_coefficient(coef, &SYMBOLS, &values).unwrap();
                residual += ci * v.powi(i as i32);
                scale += (ci * v.powi(i as i32)).abs();
            }
            assert!(
                residual.abs() <= 1e-9 * scale,
                "residual {} scale {}",
                residual,
                scale
            );
        }
    }

    #[test]
    fn test_u_recovers_from_v() {
        let p1 = Vector3::new(0.3, -0.2, 3.0);
        let p2 = Vector3::new(-0.5, 0.4, 4.0);
        let p3 = Vector3::new(0.7, 0.6, 2.5);
        let (r1, r2, r3) = (p1.normalize(), p2.normalize(), p3.normalize());
        let values = [
            p3.norm() / p1.norm(),
            (p2 - p3).norm(),
            (p1 - p3).norm(),
            (p1 - p2).norm(),
            r2.dot(&r3),
            r1.dot(&r3),
            r1.dot(&r2),
        ];
        let (n, d) = depth_ratio_u();
        let u = n.eval_expression(SYMBOLS.to_vec(), &values)
            / d.eval_expression(SYMBOLS.to_vec(), &values);
        approx::assert_relative_eq!(u, p2.norm() / p1.norm(), epsilon = 1e-9);
    }
}
