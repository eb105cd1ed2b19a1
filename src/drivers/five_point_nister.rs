//! Five-point relative pose after Nister.
//!
//! The essential matrix is sought in the span of the four null-space basis
//! matrices of the linear epipolar constraints: `E = x*X + y*Y + z*Z + W`.
//! It must satisfy `det(E) = 0` and the nine trace constraints
//! `2 E E^T E - trace(E E^T) E = 0`. Each of those ten equations is a cubic in
//! `(x, y, z)`; their coefficients over the twenty monomials of [`MONOMIALS`]
//! form the 10x20 matrix `A`, written row-major to `A.data[row*20 + col]`.
//!
//! Row 0 is the determinant, rows 1-9 the trace constraint entries in
//! row-major order.
use crate::codegen::rename::RenameTable;
use crate::codegen::term_extractor::coefficient_of;
use crate::error::Result;
use crate::symbolic::symbolic_engine::Expr;
use crate::symbolic::symbolic_expand::Polynomial;
use crate::symbolic::symbolic_vectors::ExprMatrix;
use log::debug;

pub const ROWS: usize = 10;
pub const COLS: usize = 20;
pub const SLOTS: usize = ROWS * COLS;

/// Basis matrices, their entries named `X00 ... W22`.
pub const BASIS: [&str; 4] = ["X", "Y", "Z", "W"];

/// Exponents of `(x, y, z)` per column:
/// `x^3 y^3 x^2y xy^2 x^2z x^2 y^2z y^2 xyz xy xz^2 xz x yz^2 yz y z^3 z^2 z 1`.
pub const MONOMIALS: [(u32, u32, u32); COLS] = [
    (3, 0, 0),
    (0, 3, 0),
    (2, 1, 0),
    (1, 2, 0),
    (2, 0, 1),
    (2, 0, 0),
    (0, 2, 1),
    (0, 2, 0),
    (1, 1, 1),
    (1, 1, 0),
    (1, 0, 2),
    (1, 0, 1),
    (1, 0, 0),
    (0, 1, 2),
    (0, 1, 1),
    (0, 1, 0),
    (0, 0, 3),
    (0, 0, 2),
    (0, 0, 1),
    (0, 0, 0),
];

/// `E = x*X + y*Y + z*Z + W`.
pub fn essential_matrix() -> ExprMatrix {
    let [x, y, z] = ["x", "y", "z"].map(Expr::var);
    let [bx, by, bz, bw] = BASIS.map(|name| ExprMatrix::from_variables(3, 3, name));
    x * bx + y * by + z * bz + bw
}

/// The ten constraint polynomials, determinant first.
pub fn build_system() -> Result<Vec<Polynomial>> {
    let e = essential_matrix();
    let eet = e.clone() * e.transpose();
    let trace = eet.trace();
    let constraint = Expr::Const(2.0) * (eet * e.clone()) - trace * e.clone();

    let mut rows = Vec::with_capacity(ROWS);
    rows.push(e.determinant().expand()?);
    rows.extend(constraint.expand_entries()?);
    debug!(
        "nister system: {} rows, {} terms in total",
        rows.len(),
        rows.iter().map(Polynomial::len).sum::<usize>()
    );
    Ok(rows)
}

pub fn coefficients() -> Result<Vec<String>> {
    let rows = build_system()?;
    let mut out = Vec::with_capacity(SLOTS);
    for row in &rows {
        let text = row.to_string();
        for &(i, j, k) in MONOMIALS.iter() {
            out.push(coefficient_of(&text, &[("x", i), ("y", j), ("z", k)]));
        }
    }
    Ok(out)
}

/// `X01` -> `X.data[1]`, row-major within each basis matrix.
pub fn default_renames() -> RenameTable {
    let mut table = RenameTable::new();
    for name in BASIS {
        for r in 0..3 {
            for c in 0..3 {
                table.push(
                    &format!("{}{}{}", name, r, c),
                    &format!("{}.data[{}]", name, 3 * r + c),
                );
            }
        }
    }
    table
}

/// Symbols of the basis matrices, `X00 ... W22`, in the order [`default_renames`] uses.
pub fn basis_symbols() -> Vec<String> {
    BASIS
        .iter()
        .flat_map(|name| {
            (0..3).flat_map(move |r| (0..3).map(move |c| format!("{}{}{}", name, r, c)))
        })
        .collect()
}
