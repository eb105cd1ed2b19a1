//! # Polynomial Expansion Module
//!
//! Turns an [`Expr`] into a fully distributed polynomial and prints it in the
//! textual form the code generator consumes.
//!
//! ## Representation
//!
//! A [`Polynomial`] maps a [`MonomialKey`] (symbol -> exponent) to its numeric
//! coefficient. Both maps are `BTreeMap`s, so iteration order, and with it the
//! printed form, is fully deterministic.
//!
//! ## Printed form
//!
//! - terms are sorted by total degree (highest first), then lexicographically
//!   (higher power of the alphabetically first symbol first)
//! - every additive boundary is ` + ` or ` - `, only the first term may carry a glued `-`
//! - factors inside a term are `*`-joined, in symbol-name order, `name^n` for n > 1
//! - a coefficient of magnitude 1 is omitted unless the term is constant
//! - a coefficient `1/n` is printed as a trailing divisor: `x^2/2`
//! - the zero polynomial prints as `0`
//!
//! ```
//! use SolverCoeffs::symbolic::symbolic_engine::Expr;
//! let (x, y) = (Expr::var("x"), Expr::var("y"));
//! let e = (x.clone() - Expr::Const(1.0)) * (x + y);
//! assert_eq!(e.expand().unwrap().to_string(), "x^2 + x*y - x - y");
//! ```

use crate::error::{CoeffError, Result};
use crate::symbolic::symbolic_engine::Expr;
use itertools::Itertools;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

/// The variable part of a polynomial term: symbol name -> exponent.
///
/// - `x^2` → `MonomialKey({"x": 2})`
/// - `x*y^3` → `MonomialKey({"x": 1, "y": 3})`
/// - `5` (constant) → `MonomialKey({})`
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MonomialKey(pub BTreeMap<String, u32>);

impl MonomialKey {
    /// The constant monomial.
    pub fn one() -> Self {
        MonomialKey(BTreeMap::new())
    }

    /// A single symbol raised to `exp`.
    pub fn single(var: &str, exp: u32) -> Self {
        let mut map = BTreeMap::new();
        if exp > 0 {
            map.insert(var.to_string(), exp);
        }
        MonomialKey(map)
    }

    /// Builds a key from `(name, exponent)` pairs, zero exponents are skipped.
    pub fn from_pairs(pairs: &[(&str, u32)]) -> Self {
        let mut map = BTreeMap::new();
        for (var, exp) in pairs {
            if *exp > 0 {
                *map.entry(var.to_string()).or_insert(0) += exp;
            }
        }
        MonomialKey(map)
    }

    /// Sum of all exponents.
    pub fn degree(&self) -> u32 {
        self.0.values().sum()
    }

    /// Exponent of `var` (0 when absent).
    pub fn exponent(&self, var: &str) -> u32 {
        self.0.get(var).copied().unwrap_or(0)
    }

    pub fn is_one(&self) -> bool {
        self.0.is_empty()
    }

    fn mul(&self, other: &MonomialKey) -> MonomialKey {
        let mut map = self.0.clone();
        for (var, exp) in &other.0 {
            *map.entry(var.clone()).or_insert(0) += exp;
        }
        MonomialKey(map)
    }
}

/// `x^2*y`; the constant monomial prints as an empty string.
impl fmt::Display for MonomialKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = self
            .0
            .iter()
            .map(|(var, exp)| {
                if *exp == 1 {
                    var.clone()
                } else {
                    format!("{}^{}", var, exp)
                }
            })
            .join("*");
        write!(f, "{}", s)
    }
}

/// A fully expanded multivariate polynomial with `f64` coefficients.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Polynomial {
    pub terms: BTreeMap<MonomialKey, f64>,
}

impl Polynomial {
    pub fn zero() -> Self {
        Polynomial {
            terms: BTreeMap::new(),
        }
    }

    pub fn constant(c: f64) -> Self {
        let mut p = Polynomial::zero();
        p.add_term(MonomialKey::one(), c);
        p
    }

    pub fn variable(name: &str) -> Self {
        let mut p = Polynomial::zero();
        p.add_term(MonomialKey::single(name, 1), 1.0);
        p
    }

    /// Accumulates `coeff * monomial`, dropping the entry if it cancels.
    pub fn add_term(&mut self, monomial: MonomialKey, coeff: f64) {
        if coeff == 0.0 {
            return;
        }
        let entry = self.terms.entry(monomial.clone()).or_insert(0.0);
        *entry += coeff;
        if *entry == 0.0 {
            self.terms.remove(&monomial);
        }
    }

    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    /// Number of non-zero terms.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Coefficient of exactly `monomial` (0 when absent).
    pub fn coefficient(&self, monomial: &MonomialKey) -> f64 {
        self.terms.get(monomial).copied().unwrap_or(0.0)
    }

    /// Highest exponent of `var` over all terms.
    pub fn degree_in(&self, var: &str) -> u32 {
        self.terms.keys().map(|m| m.exponent(var)).max().unwrap_or(0)
    }

    /// Highest total degree over all terms.
    pub fn total_degree(&self) -> u32 {
        self.terms.keys().map(|m| m.degree()).max().unwrap_or(0)
    }

    /// Constant value if the polynomial has no symbol at all.
    pub fn as_constant(&self) -> Option<f64> {
        match self.terms.len() {
            0 => Some(0.0),
            1 => self.terms.get(&MonomialKey::one()).copied(),
            _ => None,
        }
    }

    pub fn add(&self, other: &Polynomial) -> Polynomial {
        let mut result = self.clone();
        for (m, c) in &other.terms {
            result.add_term(m.clone(), *c);
        }
        result
    }

    pub fn sub(&self, other: &Polynomial) -> Polynomial {
        let mut result = self.clone();
        for (m, c) in &other.terms {
            result.add_term(m.clone(), -c);
        }
        result
    }

    pub fn mul(&self, other: &Polynomial) -> Polynomial {
        let mut result = Polynomial::zero();
        for (m1, c1) in &self.terms {
            for (m2, c2) in &other.terms {
                result.add_term(m1.mul(m2), c1 * c2);
            }
        }
        result
    }

    pub fn scale(&self, factor: f64) -> Polynomial {
        let mut result = Polynomial::zero();
        for (m, c) in &self.terms {
            result.add_term(m.clone(), c * factor);
        }
        result
    }

    /// Repeated squaring.
    pub fn pow(&self, n: u32) -> Polynomial {
        let mut result = Polynomial::constant(1.0);
        let mut base = self.clone();
        let mut n = n;
        while n > 0 {
            if n & 1 == 1 {
                result = result.mul(&base);
            }
            n >>= 1;
            if n > 0 {
                base = base.mul(&base);
            }
        }
        result
    }

    /// Evaluates the polynomial numerically; unbound symbols give NaN.
    pub fn evaluate(&self, vars: &[&str], values: &[f64]) -> f64 {
        self.terms
            .iter()
            .map(|(m, c)| {
                m.0.iter().fold(*c, |acc, (var, exp)| {
                    let value = vars
                        .iter()
                        .position(|v| *v == var.as_str())
                        .and_then(|i| values.get(i).copied())
                        .unwrap_or(f64::NAN);
                    acc * value.powi(*exp as i32)
                })
            })
            .sum()
    }

    /// Converts back into an expression tree (sum of products).
    pub fn to_expr(&self) -> Expr {
        let mut sum: Option<Expr> = None;
        for (m, c) in &self.terms {
            let mut term = Expr::Const(*c);
            for (var, exp) in &m.0 {
                let factor = if *exp == 1 {
                    Expr::var(var)
                } else {
                    Expr::var(var).powi(*exp)
                };
                term = term * factor;
            }
            sum = Some(match sum {
                None => term,
                Some(acc) => acc + term,
            });
        }
        sum.unwrap_or(Expr::Const(0.0))
    }

    /// Terms in printing order: total degree descending, then monomial key.
    pub fn sorted_terms(&self) -> Vec<(&MonomialKey, f64)> {
        self.terms
            .iter()
            .map(|(m, c)| (m, *c))
            .sorted_by(|(a, _), (b, _)| graded_lex(a, b))
            .collect()
    }
}

/// Graded lexicographic order: higher total degree first, then the higher
/// exponent of the alphabetically first symbol where the two keys differ.
fn graded_lex(a: &MonomialKey, b: &MonomialKey) -> Ordering {
    match b.degree().cmp(&a.degree()) {
        Ordering::Equal => {}
        other => return other,
    }
    for var in a.0.keys().chain(b.0.keys()).sorted().dedup() {
        match b.exponent(var).cmp(&a.exponent(var)) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    Ordering::Equal
}

/// Unsigned body of one term, e.g. `3*x*y^2`, `x^2/2`, `1`.
fn format_term_body(monomial: &MonomialKey, magnitude: f64) -> String {
    let factors = monomial.to_string();
    let reciprocal = 1.0 / magnitude;
    let is_integral = magnitude.fract() == 0.0;
    let is_unit_fraction = !is_integral && reciprocal.fract() == 0.0 && reciprocal.is_finite();
    match (factors.is_empty(), is_integral, is_unit_fraction) {
        (true, true, _) => format!("{}", magnitude),
        (true, false, true) => format!("1/{}", reciprocal),
        (true, false, false) => format!("{}", magnitude),
        (false, true, _) if magnitude == 1.0 => factors,
        (false, false, true) => format!("{}/{}", factors, reciprocal),
        (false, _, _) => format!("{}*{}", magnitude, factors),
    }
}

impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.terms.is_empty() {
            return write!(f, "0");
        }
        let mut out = String::new();
        for (i, (m, c)) in self.sorted_terms().into_iter().enumerate() {
            let body = format_term_body(m, c.abs());
            match (i, c < 0.0) {
                (0, true) => out.push_str(&format!("-{}", body)),
                (0, false) => out.push_str(&body),
                (_, true) => out.push_str(&format!(" - {}", body)),
                (_, false) => out.push_str(&format!(" + {}", body)),
            }
        }
        write!(f, "{}", out)
    }
}

impl Expr {
    /// Fully distributes the expression into a [`Polynomial`].
    ///
    /// # Errors
    /// * [`CoeffError::NotPolynomial`] for non-integer or negative exponents,
    ///   symbolic exponents and division by anything but a constant
    /// * [`CoeffError::DivisionByZero`] for division by a constant zero
    pub fn expand(&self) -> Result<Polynomial> {
        match self {
            Expr::Var(name) => Ok(Polynomial::variable(name)),
            Expr::Const(c) => Ok(Polynomial::constant(*c)),
            Expr::Add(lhs, rhs) => Ok(lhs.expand()?.add(&rhs.expand()?)),
            Expr::Sub(lhs, rhs) => Ok(lhs.expand()?.sub(&rhs.expand()?)),
            Expr::Mul(lhs, rhs) => Ok(lhs.expand()?.mul(&rhs.expand()?)),
            Expr::Div(lhs, rhs) => {
                let denominator = rhs
                    .expand()?
                    .as_constant()
                    .ok_or_else(|| CoeffError::NotPolynomial(format!("division by {}", rhs)))?;
                if denominator == 0.0 {
                    return Err(CoeffError::DivisionByZero);
                }
                Ok(lhs.expand()?.scale(1.0 / denominator))
            }
            Expr::Pow(base, exp) => {
                let n = exp
                    .expand()?
                    .as_constant()
                    .ok_or_else(|| CoeffError::NotPolynomial(format!("symbolic exponent {}", exp)))?;
                if n < 0.0 || n.fract() != 0.0 {
                    return Err(CoeffError::NotPolynomial(format!(
                        "exponent {} is not a non-negative integer",
                        n
                    )));
                }
                Ok(base.expand()?.pow(n as u32))
            }
        }
    }

    /// `expand()` followed by the canonical textual form.
    pub fn expand_to_string(&self) -> Result<String> {
        Ok(self.expand()?.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn v(name: &str) -> Expr {
        Expr::var(name)
    }

    #[test]
    fn test_expand_reproduces_input_contract() {
        let (x, y) = (v("x"), v("y"));
        let e = x.clone().powi(2) * y.clone() - Expr::Const(3.0) * x.clone() * y.clone()
            + x.powi(2)
            - y;
        assert_eq!(e.expand_to_string().unwrap(), "x^2*y + x^2 - 3*x*y - y");
    }

    #[test]
    fn test_expand_binomial_square() {
        let e = (v("a") + v("b")).powi(2);
        assert_eq!(e.expand_to_string().unwrap(), "a^2 + 2*a*b + b^2");
    }

    #[test]
    fn test_cancellation_gives_zero() {
        let e = v("a") * v("b") - v("b") * v("a");
        let p = e.expand().unwrap();
        assert!(p.is_zero());
        assert_eq!(p.to_string(), "0");
    }

    #[test]
    fn test_leading_minus_and_constant() {
        let e = Expr::Const(2.0) - v("x");
        assert_eq!(e.expand_to_string().unwrap(), "-x + 2");
        let e = -(v("x")) - Expr::Const(1.0);
        assert_eq!(e.expand_to_string().unwrap(), "-x - 1");
    }

    #[test]
    fn test_division_by_constant_prints_divisor() {
        let e = v("x").powi(2) / Expr::Const(2.0) - Expr::Const(1.0) / Expr::Const(4.0);
        assert_eq!(e.expand_to_string().unwrap(), "x^2/2 - 1/4");
    }

    #[test]
    fn test_non_polynomial_rejected() {
        assert!(matches!(
            (v("x") / v("y")).expand(),
            Err(CoeffError::NotPolynomial(_))
        ));
        assert!(matches!(
            v("x").pow(v("n")).expand(),
            Err(CoeffError::NotPolynomial(_))
        ));
        assert!(matches!(
            v("x").pow(Expr::Const(0.5)).expand(),
            Err(CoeffError::NotPolynomial(_))
        ));
        assert!(matches!(
            (v("x") / Expr::Const(0.0)).expand(),
            Err(CoeffError::DivisionByZero)
        ));
    }

    #[test]
    fn test_degree_queries() {
        let e = (v("x") + v("y")).powi(3) * v("z");
        let p = e.expand().unwrap();
        assert_eq!(p.degree_in("x"), 3);
        assert_eq!(p.degree_in("z"), 1);
        assert_eq!(p.degree_in("w"), 0);
        assert_eq!(p.total_degree(), 4);
        assert_eq!(p.coefficient(&MonomialKey::from_pairs(&[("x", 1), ("y", 2), ("z", 1)])), 3.0);
    }

    #[test]
    fn test_evaluate_matches_expression() {
        let e = (v("x") - Expr::Const(2.0) * v("y")).powi(3) + v("x") * v("y") / Expr::Const(4.0);
        let p = e.expand().unwrap();
        let vars = ["x", "y"];
        let values = [1.3, -0.7];
        assert_relative_eq!(
            p.evaluate(&vars, &values),
            e.eval_expression(vars.to_vec(), &values),
            epsilon = 1e-12
        );
        assert_relative_eq!(
            p.to_expr().eval_expression(vars.to_vec(), &values),
            e.eval_expression(vars.to_vec(), &values),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_expansion_is_deterministic() {
        let e = (v("c") + v("a") - v("b")) * (v("b") - v("a") + Expr::Const(3.0));
        let first = e.expand_to_string().unwrap();
        for _ in 0..5 {
            assert_eq!(e.expand_to_string().unwrap(), first);
        }
    }

    #[test]
    fn test_monomial_key_display() {
        assert_eq!(MonomialKey::from_pairs(&[("y", 1), ("x", 2)]).to_string(), "x^2*y");
        assert_eq!(MonomialKey::one().to_string(), "");
    }
}
