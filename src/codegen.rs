//! # Coefficient code generation toolkit
//!
//! String-level operations on the expanded polynomials printed by
//! [`crate::symbolic::symbolic_expand::Polynomial`]:
//!
//! 1) [`term_extractor`]: coefficient of a monomial key, or of the terms free of
//!    a set of symbols
//! 2) [`power_expand`]: `x^3` -> `x*x*x`
//! 3) [`common_factor`]: greedy common-factor extraction
//! 4) [`rename`]: ordered substring renaming into target identifiers
//! 5) [`writer`]: assignment statements and output files
//!
//! # Example
//! ```
//! use SolverCoeffs::codegen::{common_factor::simplify, rename::RenameTable,
//!     term_extractor::extract_with_key};
//! let poly = "a*b*x^2 + a*c*x^2 - a*d*x^2 + y";
//! let coef = extract_with_key(poly, "x^2");
//! assert_eq!(coef, "a*b + a*c - a*d");
//! let factored = simplify(&coef);
//! assert_eq!(factored, "a*( b + c - d )");
//! let renamed = RenameTable::from_pairs(&[("a", "s.a")]).apply(&factored);
//! assert_eq!(renamed, "s.a*( b + c - d )");
//! ```
pub mod common_factor;
pub mod power_expand;
pub mod rename;
pub mod term_extractor;
pub mod terms;
pub mod writer;
#[cfg(test)]
mod codegen_tests;
