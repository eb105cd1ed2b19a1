// Copyright (c)  by Gleb E. Zaslavkiy
//MIT License
#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
//! # SolverCoeffs
//!
//! Offline generator of the coefficient code of polynomial minimal solvers
//! (P3P Grunert and Finsterwalder, five-point Nister, trifocal tensor).
//!
//! A driver builds its polynomial system with the [`symbolic`] engine, expands
//! it into a sum of monomials, pulls the coefficient of every solver slot out
//! with the [`codegen`] toolkit, factors and renames it, and writes one
//! assignment statement per slot.
//!
//! ```
//! use SolverCoeffs::drivers::{generate, DriverOptions, SolverKind};
//! let kind = SolverKind::P3pFinsterwalder;
//! let file = generate(kind, &DriverOptions::for_solver(kind)).unwrap();
//! assert_eq!(file.assignments.len(), 4);
//! assert!(file.assignments[3].to_string().starts_with("poly.c[3] = "));
//! ```
pub mod Utils;
pub mod codegen;
pub mod drivers;
pub mod error;
pub mod symbolic;
