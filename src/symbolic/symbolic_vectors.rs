//! Symbolic vectors and matrices.
//!
//! Entries are plain [`Expr`] trees; nothing is simplified while building, the
//! driver expands the entries it needs once the system is assembled.
use crate::error::Result;
use crate::symbolic::symbolic_engine::Expr;
use crate::symbolic::symbolic_expand::Polynomial;

use nalgebra::{DMatrix, DVector};
use std::ops::{Add, Index, IndexMut, Mul, Sub};

#[derive(Clone, Debug, PartialEq)]
/// Symbolic vector
pub struct ExprVector {
    pub data: Vec<Expr>,
}

impl ExprVector {
    /// Create new symbolic vector
    pub fn new(data: Vec<Expr>) -> Self {
        Self { data }
    }

    /// Create zero vector of given size
    pub fn zeros(size: usize) -> Self {
        Self {
            data: vec![Expr::Const(0.0); size],
        }
    }
    /// crate indexed variable vector: name0, name1, ...
    pub fn indexed_vars_vector(size: usize, var_name: &str) -> Self {
        Self {
            data: (0..size).map(|i| Expr::IndexedVar(i, var_name)).collect(),
        }
    }
    /// Homogeneous image point `(name0, name1, 1)`.
    pub fn homogeneous_point(var_name: &str) -> Self {
        Self {
            data: vec![
                Expr::IndexedVar(0, var_name),
                Expr::IndexedVar(1, var_name),
                Expr::Const(1.0),
            ],
        }
    }
    /// Create from variable names
    pub fn from_variables(vars: &[&str]) -> Self {
        Self {
            data: vars.iter().map(|&v| Expr::Var(v.to_string())).collect(),
        }
    }
    /// Get length
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
    pub fn iter(&self) -> std::slice::Iter<'_, Expr> {
        self.data.iter()
    }
    /// Element access
    pub fn get(&self, index: usize) -> Option<&Expr> {
        self.data.get(index)
    }

    /// Dot product (symbolic)
    pub fn dot(&self, other: &ExprVector) -> Expr {
        assert_eq!(self.len(), other.len(), "Vector dimensions must match");

        self.data
            .iter()
            .zip(&other.data)
            .map(|(a, b)| a.clone() * b.clone())
            .reduce(|acc, term| acc + term)
            .unwrap_or(Expr::Const(0.0))
    }

    /// Cross product of two 3-vectors
    pub fn cross(&self, other: &ExprVector) -> ExprVector {
        assert!(self.len() == 3 && other.len() == 3, "Cross product needs 3-vectors");
        let (a, b) = (&self.data, &other.data);
        ExprVector::new(vec![
            a[1].clone() * b[2].clone() - a[2].clone() * b[1].clone(),
            a[2].clone() * b[0].clone() - a[0].clone() * b[2].clone(),
            a[0].clone() * b[1].clone() - a[1].clone() * b[0].clone(),
        ])
    }

    /// Skew-symmetric cross-product matrix `[v]x`, so that `[v]x * w == v x w`.
    pub fn skew(&self) -> ExprMatrix {
        assert_eq!(self.len(), 3, "Skew matrix needs a 3-vector");
        let zero = Expr::Const(0.0);
        let v = &self.data;
        ExprMatrix::new(vec![
            vec![zero.clone(), -v[2].clone(), v[1].clone()],
            vec![v[2].clone(), zero.clone(), -v[0].clone()],
            vec![-v[1].clone(), v[0].clone(), zero],
        ])
    }

    /// Scalar multiplication
    pub fn scale(&mut self, scalar: &Expr) {
        for expr in &mut self.data {
            *expr = scalar.clone() * expr.clone();
        }
    }

    /// Evaluate vector numerically
    pub fn evaluate(&self, vars: &[&str], values: &[f64]) -> DVector<f64> {
        let evaluated: Vec<f64> = self
            .data
            .iter()
            .map(|expr| expr.eval_expression(vars.to_vec(), values))
            .collect();
        DVector::from_vec(evaluated)
    }

    /// Expand every entry
    pub fn expand_entries(&self) -> Result<Vec<Polynomial>> {
        self.data.iter().map(|e| e.expand()).collect()
    }
}

// Implement indexing
impl Index<usize> for ExprVector {
    type Output = Expr;

    fn index(&self, index: usize) -> &Self::Output {
        &self.data[index]
    }
}

impl IndexMut<usize> for ExprVector {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.data[index]
    }
}

// Vector addition
impl Add for ExprVector {
    type Output = Self;

    fn add(self, other: Self) -> Self::Output {
        assert_eq!(self.len(), other.len(), "Vector dimensions must match");
        ExprVector {
            data: self.data.into_iter().zip(other.data).map(|(a, b)| a + b).collect(),
        }
    }
}

// Vector subtraction
impl Sub for ExprVector {
    type Output = Self;

    fn sub(self, other: Self) -> Self::Output {
        assert_eq!(self.len(), other.len(), "Vector dimensions must match");
        ExprVector {
            data: self.data.into_iter().zip(other.data).map(|(a, b)| a - b).collect(),
        }
    }
}

//////////////////////////////////////////////////////////////////////////////////////
//  MATRIX
//////////////////////////////////////////////////////////////////////////////////////

/// Symbolic matrix, row-major
#[derive(Clone, Debug, PartialEq)]
pub struct ExprMatrix {
    pub data: Vec<Vec<Expr>>,
    nrows: usize,
    ncols: usize,
}

impl ExprMatrix {
    /// Create new matrix from rows; all rows must have the same length
    pub fn new(data: Vec<Vec<Expr>>) -> Self {
        let nrows = data.len();
        let ncols = data.first().map_or(0, |row| row.len());
        assert!(
            data.iter().all(|row| row.len() == ncols),
            "All rows must have the same length"
        );
        Self { data, nrows, ncols }
    }

    /// Zero matrix
    pub fn zeros(nrows: usize, ncols: usize) -> Self {
        Self::new(vec![vec![Expr::Const(0.0); ncols]; nrows])
    }

    /// Identity matrix
    pub fn identity(size: usize) -> Self {
        let mut m = Self::zeros(size, size);
        for i in 0..size {
            m.data[i][i] = Expr::Const(1.0);
        }
        m
    }

    /// Matrix of symbols `name{row}{col}`: X00, X01, ...
    pub fn from_variables(nrows: usize, ncols: usize, var_name: &str) -> Self {
        Self::new(
            (0..nrows)
                .map(|i| {
                    (0..ncols)
                        .map(|j| Expr::IndexedVar2D(i, j, var_name))
                        .collect()
                })
                .collect(),
        )
    }

    /// Symmetric matrix from its upper triangle given row by row
    /// (`[a00, a01, a02, a11, a12, a22]` for 3x3).
    pub fn symmetric(size: usize, upper: Vec<Expr>) -> Self {
        assert_eq!(
            upper.len(),
            size * (size + 1) / 2,
            "Upper triangle has the wrong number of entries"
        );
        let mut m = Self::zeros(size, size);
        let mut it = upper.into_iter();
        for i in 0..size {
            for j in i..size {
                if let Some(e) = it.next() {
                    m.data[i][j] = e.clone();
                    m.data[j][i] = e;
                }
            }
        }
        m
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.nrows, self.ncols)
    }

    pub fn nrows(&self) -> usize {
        self.nrows
    }

    pub fn ncols(&self) -> usize {
        self.ncols
    }

    pub fn is_square(&self) -> bool {
        self.nrows == self.ncols
    }

    pub fn get(&self, i: usize, j: usize) -> Option<&Expr> {
        self.data.get(i).and_then(|row| row.get(j))
    }

    /// Get row as vector
    pub fn row(&self, i: usize) -> ExprVector {
        ExprVector::new(self.data[i].clone())
    }

    /// Get column as vector
    pub fn column(&self, j: usize) -> ExprVector {
        ExprVector::new(self.data.iter().map(|row| row[j].clone()).collect())
    }

    /// Transpose
    pub fn transpose(&self) -> ExprMatrix {
        ExprMatrix::new(
            (0..self.ncols)
                .map(|j| (0..self.nrows).map(|i| self.data[i][j].clone()).collect())
                .collect(),
        )
    }

    /// Matrix-vector multiplication
    pub fn mul_vector(&self, vec: &ExprVector) -> ExprVector {
        assert_eq!(
            self.ncols,
            vec.len(),
            "Matrix columns must match vector length"
        );
        ExprVector::new((0..self.nrows).map(|i| self.row(i).dot(vec)).collect())
    }

    /// Trace (sum of diagonal elements)
    pub fn trace(&self) -> Expr {
        assert!(self.is_square(), "Matrix must be square to compute trace");
        (0..self.nrows)
            .map(|i| self.data[i][i].clone())
            .reduce(|acc, e| acc + e)
            .unwrap_or(Expr::Const(0.0))
    }

    /// Determinant by cofactor expansion along the first row
    pub fn determinant(&self) -> Expr {
        assert!(
            self.is_square(),
            "Matrix must be square to compute determinant"
        );

        match self.nrows {
            0 => Expr::Const(1.0),
            1 => self.data[0][0].clone(),
            2 => {
                let a = &self.data[0][0];
                let b = &self.data[0][1];
                let c = &self.data[1][0];
                let d = &self.data[1][1];
                a.clone() * d.clone() - b.clone() * c.clone()
            }
            n => {
                let mut det: Option<Expr> = None;
                for j in 0..n {
                    if self.data[0][j].is_zero() {
                        continue;
                    }
                    let term = self.data[0][j].clone() * self.minor(0, j).determinant();
                    det = Some(match (det, j % 2 == 0) {
                        (None, true) => term,
                        (None, false) => -term,
                        (Some(acc), true) => acc + term,
                        (Some(acc), false) => acc - term,
                    });
                }
                det.unwrap_or(Expr::Const(0.0))
            }
        }
    }

    /// Get minor matrix (remove row i and column j)
    pub fn minor(&self, row: usize, col: usize) -> ExprMatrix {
        assert!(row < self.nrows && col < self.ncols, "Index out of bounds");

        ExprMatrix::new(
            self.data
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != row)
                .map(|(_, r)| {
                    r.iter()
                        .enumerate()
                        .filter(|(j, _)| *j != col)
                        .map(|(_, e)| e.clone())
                        .collect()
                })
                .collect(),
        )
    }

    /// Scalar multiplication
    pub fn scale(&mut self, scalar: &Expr) {
        for row in &mut self.data {
            for e in row {
                *e = scalar.clone() * e.clone();
            }
        }
    }

    /// Apply function to each element
    pub fn map<F>(&self, f: F) -> ExprMatrix
    where
        F: Fn(&Expr) -> Expr,
    {
        ExprMatrix::new(
            self.data
                .iter()
                .map(|row| row.iter().map(&f).collect())
                .collect(),
        )
    }

    /// Row-major list of entries
    pub fn flatten(&self) -> ExprVector {
        ExprVector::new(self.data.iter().flatten().cloned().collect())
    }

    /// Expand every entry, row-major
    pub fn expand_entries(&self) -> Result<Vec<Polynomial>> {
        self.flatten().expand_entries()
    }

    /// Evaluate matrix numerically
    pub fn evaluate(&self, vars: &[&str], values: &[f64]) -> DMatrix<f64> {
        DMatrix::from_fn(self.nrows, self.ncols, |i, j| {
            self.data[i][j].eval_expression(vars.to_vec(), values)
        })
    }
}

impl Index<(usize, usize)> for ExprMatrix {
    type Output = Expr;

    fn index(&self, (i, j): (usize, usize)) -> &Self::Output {
        &self.data[i][j]
    }
}

impl IndexMut<(usize, usize)> for ExprMatrix {
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut Self::Output {
        &mut self.data[i][j]
    }
}

impl Add for ExprMatrix {
    type Output = Self;

    fn add(self, other: Self) -> Self::Output {
        assert_eq!(self.shape(), other.shape(), "Matrix dimensions must match");
        ExprMatrix::new(
            self.data
                .into_iter()
                .zip(other.data)
                .map(|(r1, r2)| r1.into_iter().zip(r2).map(|(a, b)| a + b).collect())
                .collect(),
        )
    }
}

impl Sub for ExprMatrix {
    type Output = Self;

    fn sub(self, other: Self) -> Self::Output {
        assert_eq!(self.shape(), other.shape(), "Matrix dimensions must match");
        ExprMatrix::new(
            self.data
                .into_iter()
                .zip(other.data)
                .map(|(r1, r2)| r1.into_iter().zip(r2).map(|(a, b)| a - b).collect())
                .collect(),
        )
    }
}

impl Mul for ExprMatrix {
    type Output = Self;

    fn mul(self, other: Self) -> Self::Output {
        assert_eq!(
            self.ncols, other.nrows,
            "Matrix dimensions incompatible for multiplication"
        );
        let data = (0..self.nrows)
            .map(|i| {
                (0..other.ncols)
                    .map(|j| self.row(i).dot(&other.column(j)))
                    .collect()
            })
            .collect();
        ExprMatrix::new(data)
    }
}

impl Mul<ExprMatrix> for Expr {
    type Output = ExprMatrix;

    fn mul(self, matrix: ExprMatrix) -> Self::Output {
        matrix.map(|e| self.clone() * e.clone())
    }
}

impl Mul<Expr> for ExprMatrix {
    type Output = ExprMatrix;

    fn mul(self, scalar: Expr) -> Self::Output {
        self.map(|e| e.clone() * scalar.clone())
    }
}

impl Mul<ExprVector> for ExprMatrix {
    type Output = ExprVector;

    fn mul(self, vector: ExprVector) -> Self::Output {
        self.mul_vector(&vector)
    }
}

impl std::fmt::Display for ExprMatrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in &self.data {
            let cells: Vec<String> = row.iter().map(|e| e.to_string()).collect();
            writeln!(f, "[{}]", cells.join(", "))?;
        }
        Ok(())
    }
}
