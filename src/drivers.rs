//! # Solver drivers
//!
//! One driver per minimal solver. Every driver follows the same recipe:
//!
//! 1) build the symbols and the polynomial system with the symbolic engine
//! 2) expand it into the textual sum-of-products form
//! 3) pull the coefficient of every slot of the numerical solver, in the order
//!    the solver expects them, with the term extractor
//! 4) optionally factor each coefficient, rename symbols into the target code's
//!    identifiers and emit one assignment per slot
//!
//! Steps 1-3 are solver specific and live in the submodules; step 4 is shared
//! and lives in [`generate`].
//!
//! | solver              | unknowns  | slots            |
//! |---------------------|-----------|------------------|
//! | `p3p_grunert`       | v         | `poly.c[0..5]`   |
//! | `p3p_finsterwalder` | L         | `poly.c[0..4]`   |
//! | `five_point_nister` | x, y, z   | `A.data[0..200]` |
//! | `trifocal`          | T (27)    | `A.data[0..243]` |
use crate::codegen::common_factor::simplify;
use crate::codegen::rename::RenameTable;
use crate::codegen::term_extractor::or_zero;
use crate::codegen::writer::{Assignment, GeneratedFile};
use crate::error::{CoeffError, Result};
use crate::symbolic::symbolic_engine::Expr;
use log::{debug, info};
use std::time::Instant;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

pub mod five_point_nister;
pub mod p3p_finsterwalder;
pub mod p3p_grunert;
pub mod trifocal;
#[cfg(test)]
mod drivers_tests;

/// The solvers coefficient code can be generated for.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    EnumIter,
    EnumString,
    Display,
    AsRefStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum SolverKind {
    P3pGrunert,
    P3pFinsterwalder,
    FivePointNister,
    Trifocal,
}

impl SolverKind {
    /// Looks a solver up by its snake_case name (`"p3p_grunert"`).
    pub fn from_name(name: &str) -> Result<Self> {
        name.parse()
            .map_err(|_| CoeffError::UnknownSolver(name.to_string()))
    }

    pub fn description(&self) -> &'static str {
        match self {
            SolverKind::P3pGrunert => "P3P, Grunert quartic in the depth ratio v",
            SolverKind::P3pFinsterwalder => "P3P, Finsterwalder cubic det(A + L*B)",
            SolverKind::FivePointNister => "relative pose, Nister 10x20 constraint matrix",
            SolverKind::Trifocal => "trifocal tensor, point-point-point linear constraints",
        }
    }

    /// `(target, field)` of the emitted assignments.
    pub fn target(&self) -> (&'static str, &'static str) {
        match self {
            SolverKind::P3pGrunert | SolverKind::P3pFinsterwalder => ("poly", "c"),
            SolverKind::FivePointNister | SolverKind::Trifocal => ("A", "data"),
        }
    }

    pub fn slot_count(&self) -> usize {
        match self {
            SolverKind::P3pGrunert => p3p_grunert::SLOTS,
            SolverKind::P3pFinsterwalder => p3p_finsterwalder::SLOTS,
            SolverKind::FivePointNister => five_point_nister::SLOTS,
            SolverKind::Trifocal => trifocal::SLOTS,
        }
    }

    pub fn default_renames(&self) -> RenameTable {
        match self {
            SolverKind::P3pGrunert => p3p_grunert::default_renames(),
            SolverKind::P3pFinsterwalder => p3p_finsterwalder::default_renames(),
            SolverKind::FivePointNister => five_point_nister::default_renames(),
            SolverKind::Trifocal => trifocal::default_renames(),
        }
    }

    /// Raw coefficient of every slot, in slot order. Empty means zero.
    pub fn coefficients(&self) -> Result<Vec<String>> {
        match self {
            SolverKind::P3pGrunert => p3p_grunert::coefficients(),
            SolverKind::P3pFinsterwalder => p3p_finsterwalder::coefficients(),
            SolverKind::FivePointNister => five_point_nister::coefficients(),
            SolverKind::Trifocal => trifocal::coefficients(),
        }
    }

    /// Default output file name, `<name>.txt`.
    pub fn default_file_name(&self) -> String {
        format!("{}.txt", self.as_ref())
    }
}

/// Per-run knobs of [`generate`].
#[derive(Debug, Clone, PartialEq)]
pub struct DriverOptions {
    pub simplify: bool,
    pub renames: RenameTable,
}

impl DriverOptions {
    /// Factoring on, the solver's own rename table.
    pub fn for_solver(kind: SolverKind) -> Self {
        Self {
            simplify: true,
            renames: kind.default_renames(),
        }
    }
}

/// Runs the whole pipeline for one solver.
///
/// # Errors
/// Propagates engine errors; [`CoeffError::DimensionMismatch`] when a driver
/// produced a different number of coefficients than the solver has slots.
pub fn generate(kind: SolverKind, options: &DriverOptions) -> Result<GeneratedFile> {
    let start = Instant::now();
    info!("generating coefficients for {}", kind);
    let coefficients = kind.coefficients()?;
    if coefficients.len() != kind.slot_count() {
        return Err(CoeffError::DimensionMismatch {
            expected: format!("{} slots", kind.slot_count()),
            found: format!("{} coefficients", coefficients.len()),
        });
    }
    let zero_slots = coefficients.iter().filter(|c| c.is_empty()).count();
    let (target, field) = kind.target();
    let assignments: Vec<Assignment> = coefficients
        .iter()
        .enumerate()
        .map(|(index, coefficient)| {
            let body = if options.simplify {
                simplify(coefficient)
            } else {
                coefficient.clone()
            };
            Assignment::new(target, field, index, options.renames.apply(&or_zero(&body)))
        })
        .collect();
    debug!(
        "{}: {} slots, {} of them zero",
        kind,
        assignments.len(),
        zero_slots
    );
    info!("{} done in {:?}", kind, start.elapsed());
    Ok(GeneratedFile::new(kind.as_ref(), assignments))
}

/// Numerical value of a generated coefficient expression, empty meaning zero.
pub fn evaluate_coefficient(expression: &str, vars: &[&str], values: &[f64]) -> Result<f64> {
    let expr = Expr::parse_expression(&or_zero(expression))?;
    Ok(expr.eval_expression(vars.to_vec(), values))
}
