//! # Symbolic Engine Module
//!
//! The expression tree every solver driver builds its polynomial system with.
//!
//! ## Purpose
//!
//! The engine only needs what polynomial systems of geometric vision need:
//! - named symbols and numerical constants
//! - `+`, `-`, `*`, division by constants and non-negative integer powers
//! - substitution, renaming and numerical evaluation (the latter is used to
//!   verify generated coefficients against the system they came from)
//!
//! Expansion into a canonical sum of monomials lives in
//! [`crate::symbolic::symbolic_expand`], vectors and matrices of expressions in
//! [`crate::symbolic::symbolic_vectors`].
//!
//! ## Main Structures and Methods
//!
//! ### `Expr` Enum
//! - **Variables**: `Var(String)` - symbols like "x", "cos_a", "t2_01"
//! - **Constants**: `Const(f64)` - numerical constants
//! - **Operations**: `Add`, `Sub`, `Mul`, `Div`, `Pow`
//!
//! ### Key Methods
//! - `Symbols(symbols: &str)` - create several variables from a comma-separated string
//! - `IndexedVar(index, name)` / `IndexedVar2D(row, col, name)` - indexed symbols
//! - `substitute_variable`, `rename_variable`, `set_variable` - rewrites
//! - `eval_expression(vars, values)` - numerical evaluation
//!
//! ## Macros
//! `symbols!(x, y, z)`, `indexed_var!(3, "x")`, `indexed_var_2d!(0, 1, "X")`

#![allow(non_camel_case_types)]

use std::collections::{BTreeSet, HashMap};
use std::fmt;

/// Core symbolic expression enum: an abstract syntax tree over symbols and constants.
///
/// # Examples
/// ```rust, ignore
/// use SolverCoeffs::symbolic::symbolic_engine::Expr;
/// let x = Expr::Var("x".to_string());
/// let expr = Expr::Add(Box::new(x), Box::new(Expr::Const(2.0)));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    /// Symbolic variable with a name (e.g., "x", "cos_a")
    Var(String),
    /// Numerical constant value
    Const(f64),
    /// Addition operation: left + right
    Add(Box<Expr>, Box<Expr>),
    /// Subtraction operation: left - right
    Sub(Box<Expr>, Box<Expr>),
    /// Multiplication operation: left * right
    Mul(Box<Expr>, Box<Expr>),
    /// Division operation: left / right
    Div(Box<Expr>, Box<Expr>),
    /// Power operation: base ^ exponent
    Pow(Box<Expr>, Box<Expr>),
}

/// Display implementation for pretty printing symbolic expressions.
///
/// Every binary node is parenthesized, so the printed form is unambiguous but
/// is *not* the expanded input contract of the code generator; use
/// `expr.expand()?.to_string()` for that.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expr::Var(name) => write!(f, "{}", name),
            Expr::Const(val) => write!(f, "{}", val),
            Expr::Add(lhs, rhs) => write!(f, "({} + {})", lhs, rhs),
            Expr::Sub(lhs, rhs) => write!(f, "({} - {})", lhs, rhs),
            Expr::Mul(lhs, rhs) => write!(f, "({} * {})", lhs, rhs),
            Expr::Div(lhs, rhs) => write!(f, "({} / {})", lhs, rhs),
            Expr::Pow(base, exp) => write!(f, "({} ^ {})", base, exp),
        }
    }
}

impl std::ops::Add for Expr {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Expr::Add(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Sub for Expr {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Expr::Sub(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Mul for Expr {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Expr::Mul(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Div for Expr {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        Expr::Div(self.boxed(), rhs.boxed())
    }
}
impl std::ops::AddAssign for Expr {
    fn add_assign(&mut self, rhs: Self) {
        *self = Expr::Add(Box::new(self.clone()), Box::new(rhs));
    }
}

impl std::ops::SubAssign for Expr {
    fn sub_assign(&mut self, rhs: Self) {
        *self = Expr::Sub(Box::new(self.clone()), Box::new(rhs));
    }
}

impl std::ops::MulAssign for Expr {
    fn mul_assign(&mut self, rhs: Self) {
        *self = Expr::Mul(Box::new(self.clone()), Box::new(rhs));
    }
}

impl std::ops::DivAssign for Expr {
    fn div_assign(&mut self, rhs: Self) {
        *self = Expr::Div(Box::new(self.clone()), Box::new(rhs));
    }
}

impl std::ops::Neg for Expr {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Expr::Mul(Box::new(Expr::Const(-1.0)), Box::new(self))
    }
}

impl Expr {
    /// BASIC FEATURES

    /// Creates multiple symbolic variables from a comma-separated string.
    ///
    /// Whitespace is trimmed and empty names are skipped.
    ///
    /// # Arguments
    /// * `symbols` - Comma-separated string of variable names (e.g., "x, y, z")
    ///
    /// # Returns
    /// Vector of Expr::Var instances for each variable name
    ///
    /// # Examples
    /// ```rust, ignore
    /// let vars = Expr::Symbols("x, y, z");
    /// assert_eq!(vars.len(), 3);
    /// ```
    pub fn Symbols(symbols: &str) -> Vec<Expr> {
        symbols
            .split(',')
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(|s| Expr::Var(s.to_string()))
            .collect()
    }

    /// Shorthand for `Expr::Var(name.to_string())`.
    pub fn var(name: &str) -> Expr {
        Expr::Var(name.to_string())
    }

    /// Substitutes a variable with a constant value throughout the expression.
    ///
    /// # Arguments
    /// * `var` - Name of the variable to substitute
    /// * `value` - Numerical value to substitute for the variable
    pub fn set_variable(&self, var: &str, value: f64) -> Expr {
        self.substitute_variable(var, &Expr::Const(value))
    }

    /// Renames a variable throughout the expression.
    ///
    /// # Arguments
    /// * `old_var` - Current variable name to replace
    /// * `new_var` - New variable name
    pub fn rename_variable(&self, old_var: &str, new_var: &str) -> Expr {
        self.substitute_variable(old_var, &Expr::Var(new_var.to_string()))
    }

    /// rename variables from a map
    pub fn rename_variables(&self, var_map: &HashMap<String, String>) -> Expr {
        self.map_vars(&|name| var_map.get(name).map(|new| Expr::Var(new.clone())))
    }

    /// substitute a variable with an expression
    pub fn substitute_variable(&self, var: &str, expr: &Expr) -> Expr {
        self.map_vars(&|name| (name == var).then(|| expr.clone()))
    }

    /// Rebuilds the tree, replacing every variable for which `f` returns `Some`.
    fn map_vars(&self, f: &dyn Fn(&str) -> Option<Expr>) -> Expr {
        match self {
            Expr::Var(name) => f(name).unwrap_or_else(|| self.clone()),
            Expr::Const(_) => self.clone(),
            Expr::Add(lhs, rhs) => Expr::Add(lhs.map_vars(f).boxed(), rhs.map_vars(f).boxed()),
            Expr::Sub(lhs, rhs) => Expr::Sub(lhs.map_vars(f).boxed(), rhs.map_vars(f).boxed()),
            Expr::Mul(lhs, rhs) => Expr::Mul(lhs.map_vars(f).boxed(), rhs.map_vars(f).boxed()),
            Expr::Div(lhs, rhs) => Expr::Div(lhs.map_vars(f).boxed(), rhs.map_vars(f).boxed()),
            Expr::Pow(base, exp) => Expr::Pow(base.map_vars(f).boxed(), exp.map_vars(f).boxed()),
        }
    }

    /// check if the expression contains a variable
    pub fn contains_variable(&self, var_name: &str) -> bool {
        match self {
            Expr::Var(name) => name == var_name,
            Expr::Const(_) => false,
            Expr::Add(left, right)
            | Expr::Sub(left, right)
            | Expr::Mul(left, right)
            | Expr::Div(left, right)
            | Expr::Pow(left, right) => {
                left.contains_variable(var_name) || right.contains_variable(var_name)
            }
        }
    }

    /// All distinct variable names, sorted.
    pub fn extract_variables(&self) -> Vec<String> {
        let mut names = BTreeSet::new();
        self.collect_variables(&mut names);
        names.into_iter().collect()
    }

    fn collect_variables(&self, out: &mut BTreeSet<String>) {
        match self {
            Expr::Var(name) => {
                out.insert(name.clone());
            }
            Expr::Const(_) => {}
            Expr::Add(l, r) | Expr::Sub(l, r) | Expr::Mul(l, r) | Expr::Div(l, r) | Expr::Pow(l, r) => {
                l.collect_variables(out);
                r.collect_variables(out);
            }
        }
    }

    /// Evaluates the expression numerically.
    ///
    /// Variables missing from `vars` evaluate to NaN, so a forgotten binding
    /// shows up in the result instead of silently becoming zero.
    ///
    /// # Arguments
    /// * `vars` - variable names
    /// * `values` - values, same order as `vars`
    pub fn eval_expression(&self, vars: Vec<&str>, values: &[f64]) -> f64 {
        match self {
            Expr::Var(name) => vars
                .iter()
                .position(|v| *v == name.as_str())
                .and_then(|i| values.get(i).copied())
                .unwrap_or(f64::NAN),
            Expr::Const(val) => *val,
            Expr::Add(lhs, rhs) => {
                lhs.eval_expression(vars.clone(), values) + rhs.eval_expression(vars, values)
            }
            Expr::Sub(lhs, rhs) => {
                lhs.eval_expression(vars.clone(), values) - rhs.eval_expression(vars, values)
            }
            Expr::Mul(lhs, rhs) => {
                lhs.eval_expression(vars.clone(), values) * rhs.eval_expression(vars, values)
            }
            Expr::Div(lhs, rhs) => {
                lhs.eval_expression(vars.clone(), values) / rhs.eval_expression(vars, values)
            }
            Expr::Pow(base, exp) => base
                .eval_expression(vars.clone(), values)
                .powf(exp.eval_expression(vars, values)),
        }
    }

    /// Convenience method to wrap expression in Box for recursive structures.
    pub fn boxed(self) -> Box<Self> {
        Box::new(self)
    }

    /// Creates power expression self^rhs.
    pub fn pow(self, rhs: Expr) -> Expr {
        Expr::Pow(self.boxed(), rhs.boxed())
    }

    /// Creates self^n for an integer exponent.
    pub fn powi(self, n: u32) -> Expr {
        self.pow(Expr::Const(n as f64))
    }

    /// Checks if expression is exactly zero (constant 0.0).
    pub fn is_zero(&self) -> bool {
        matches!(self, Expr::Const(val) if *val == 0.0)
    }

    //__________________________________INDEXED VARIABLES____________________________________

    /// Creates a single indexed variable with format "name + index" (e.g., "x5").
    pub fn IndexedVar(index: usize, var_name: &str) -> Expr {
        Expr::Var(format!("{}{}", var_name, index))
    }

    /// Creates indexed variables x0, x1, ... x{num_vars-1}.
    pub fn IndexedVars(num_vars: usize, var_name: &str) -> Vec<Expr> {
        (0..num_vars).map(|i| Expr::IndexedVar(i, var_name)).collect()
    }

    /// Creates a 2D indexed variable with format "name{row}{col}" (e.g., "X01").
    ///
    /// Row and column are written without separator, which matches the field
    /// naming of the generated solvers (`X00 ... X22`). Indices above 9 are
    /// ambiguous.
    pub fn IndexedVar2D(index_row: usize, index_col: usize, var_name: &str) -> Expr {
        Expr::Var(format!("{}{}{}", var_name, index_row, index_col))
    }
}

//___________________________________MACROS____________________________________

/// Macro to create symbolic variables from a comma-separated list
/// Usage: symbols!(x, y, z) -> creates variables x, y, z
#[macro_export]
macro_rules! symbols {
    ($($var:ident),+ $(,)?) => {
        {
            ($(
                $crate::symbolic::symbolic_engine::Expr::Var(stringify!($var).to_string())
            ),+)
        }
    };
}

/// Macro to create a single indexed variable
/// Usage: indexed_var!(5, "x") -> creates x5
#[macro_export]
macro_rules! indexed_var {
    ($index:expr, $name:expr) => {
        $crate::symbolic::symbolic_engine::Expr::IndexedVar($index, $name)
    };
}

/// Macro to create a 2D indexed variable
/// Usage: indexed_var_2d!(2, 1, "X") -> creates X21
#[macro_export]
macro_rules! indexed_var_2d {
    ($row:expr, $col:expr, $name:expr) => {
        $crate::symbolic::symbolic_engine::Expr::IndexedVar2D($row, $col, $name)
    };
}
