//! P3P after Finsterwalder.
//!
//! The two Grunert equations are quadratic forms `w^T A w = 0`, `w^T B w = 0`
//! in `w = (u, v, 1)`. Some member of the pencil `A + L*B` is degenerate, so `L`
//! is a root of the cubic `det(A + L*B)`; slot `c[i]` is its coefficient of `L^i`.
use crate::codegen::rename::RenameTable;
use crate::codegen::term_extractor::coefficient_of;
use crate::error::Result;
use crate::symbolic::symbolic_engine::Expr;
use crate::symbolic::symbolic_expand::Polynomial;
use crate::symbolic::symbolic_vectors::ExprMatrix;
use crate::symbols;
use log::debug;

pub const SLOTS: usize = 4;

pub const SYMBOLS: [&str; 7] = ["L", "a", "b", "c", "cos_a", "cos_b", "cos_c"];

/// `(A, B)` of the pencil, built from the law-of-cosines quadrics
///
/// ```text
/// Q_a: u^2 + v^2 - 2 u v cos_a
/// Q_b: 1 + v^2 - 2 v cos_b
/// Q_c: 1 + u^2 - 2 u cos_c
/// A = b^2 Q_a - a^2 Q_b,  B = b^2 Q_c - c^2 Q_b
/// ```
pub fn pencil() -> (ExprMatrix, ExprMatrix) {
    let (a, b, c, cos_a, cos_b, cos_c) = symbols!(a, b, c, cos_a, cos_b, cos_c);
    let zero = || Expr::Const(0.0);
    let one = || Expr::Const(1.0);
    let q_a = ExprMatrix::symmetric(3, vec![one(), -cos_a, zero(), one(), zero(), zero()]);
    let q_b = ExprMatrix::symmetric(3, vec![zero(), zero(), zero(), one(), -cos_b, one()]);
    let q_c = ExprMatrix::symmetric(3, vec![one(), zero(), -cos_c, zero(), zero(), one()]);
    let b2 = b.powi(2);
    let m_a = b2.clone() * q_a - a.powi(2) * q_b.clone();
    let m_b = b2 * q_c - c.powi(2) * q_b;
    (m_a, m_b)
}

pub fn build_system() -> Result<Polynomial> {
    let (m_a, m_b) = pencil();
    let det = (m_a + Expr::var("L") * m_b).determinant();
    let poly = det.expand()?;
    debug!(
        "finsterwalder cubic: {} terms, degree {} in L",
        poly.len(),
        poly.degree_in("L")
    );
    Ok(poly)
}

pub fn coefficients() -> Result<Vec<String>> {
    let text = build_system()?.to_string();
    Ok((0..SLOTS as u32)
        .map(|i| coefficient_of(&text, &[("L", i)]))
        .collect())
}

pub fn default_renames() -> RenameTable {
    RenameTable::from_pairs(&[("cos_a", "cos23"), ("cos_b", "cos13"), ("cos_c", "cos12")])
}
