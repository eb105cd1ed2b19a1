//! Trifocal tensor from point-point-point correspondences.
//!
//! A point seen in three views as `xa`, `xb`, `xc` (homogeneous, last
//! coordinate 1) satisfies
//!
//! ```text
//! [xb]x ( sum_i xa_i T_i ) [xc]x = 0
//! ```
//!
//! which is linear in the 27 tensor entries `t{i}_{jk}`. Every entry of the
//! 3x3 product is one row of the linear system, every tensor entry one column:
//! `A.data[row*27 + col]` with `row` the product entry in row-major order and
//! `col = 9*i + 3*j + k`.
use crate::codegen::rename::RenameTable;
use crate::codegen::term_extractor::extract_with_key;
use crate::error::Result;
use crate::symbolic::symbolic_engine::Expr;
use crate::symbolic::symbolic_expand::Polynomial;
use crate::symbolic::symbolic_vectors::{ExprMatrix, ExprVector};
use log::debug;

pub const ROWS: usize = 9;
pub const COLS: usize = 27;
pub const SLOTS: usize = ROWS * COLS;

/// Name of tensor entry `T_i(j, k)`.
pub fn tensor_symbol(i: usize, j: usize, k: usize) -> String {
    format!("t{}_{}{}", i, j, k)
}

fn tensor_slice(i: usize) -> ExprMatrix {
    ExprMatrix::new(
        (0..3)
            .map(|j| (0..3).map(|k| Expr::Var(tensor_symbol(i, j, k))).collect())
            .collect(),
    )
}

/// The nine entries of `[xb]x (sum_i xa_i T_i) [xc]x`, row-major.
pub fn build_system() -> Result<Vec<Polynomial>> {
    let xa = ExprVector::homogeneous_point("xa");
    let xb = ExprVector::homogeneous_point("xb");
    let xc = ExprVector::homogeneous_point("xc");
    let contracted = (0..3)
        .map(|i| xa[i].clone() * tensor_slice(i))
        .reduce(|acc, m| acc + m)
        .unwrap_or_else(|| ExprMatrix::zeros(3, 3));
    let constraint = xb.skew() * contracted * xc.skew();
    let rows = constraint.expand_entries()?;
    debug!(
        "trifocal system: {} rows, {} terms in total",
        rows.len(),
        rows.iter().map(Polynomial::len).sum::<usize>()
    );
    Ok(rows)
}

pub fn coefficients() -> Result<Vec<String>> {
    let rows = build_system()?;
    let keys: Vec<String> = (0..3)
        .flat_map(|i| (0..3).flat_map(move |j| (0..3).map(move |k| tensor_symbol(i, j, k))))
        .collect();
    let mut out = Vec::with_capacity(SLOTS);
    for row in &rows {
        let text = row.to_string();
        out.extend(keys.iter().map(|key| extract_with_key(&text, key)));
    }
    Ok(out)
}

/// Point coordinates to the normalized observation fields of the target code.
pub fn default_renames() -> RenameTable {
    RenameTable::from_pairs(&[
        ("xa0", "p1_norm.x"),
        ("xa1", "p1_norm.y"),
        ("xb0", "p2_norm.x"),
        ("xb1", "p2_norm.y"),
        ("xc0", "p3_norm.x"),
        ("xc1", "p3_norm.y"),
    ])
}
