#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
/// a module turns a String expression into a symbolic expression
///
///# Example
/// ```
/// use SolverCoeffs::symbolic::symbolic_engine::Expr;
/// let input = "x*x*y/(2) - 3*x"; // power-expanded generator output reads back
/// let parsed_expression = Expr::parse_expression(input).unwrap();
/// let value = parsed_expression.eval_expression(vec!["x", "y"], &[2.0, 3.0]);
/// assert_eq!(value, 0.0);
///  ```
/// ________________________________________________________________________________________________________________________________
pub mod parse_expr;
///____________________________________________________________________________________________________________________________
/// # Symbolic engine
/// a module
/// 1) builds symbolic expressions from symbols, constants and arithmetic operators
/// 2) substitutes, renames and evaluates them
///# Example#
/// ```
/// use SolverCoeffs::symbols;
/// use SolverCoeffs::symbolic::symbolic_engine::Expr;
/// let (x, y) = symbols!(x, y);
/// let e = (x.clone() + y.clone()) * x.clone();
/// assert!(e.contains_variable("y"));
/// assert_eq!(e.extract_variables(), vec!["x".to_string(), "y".to_string()]);
/// let at_1_2 = e.eval_expression(vec!["x", "y"], &[1.0, 2.0]);
/// assert_eq!(at_1_2, 3.0);
/// ```
pub mod symbolic_engine;
///____________________________________________________________________________________________________________________________
/// # Expansion
/// distributes an expression into a canonical sum of monomials and prints it in the
/// form the code generator reads
///# Example#
/// ```
/// use SolverCoeffs::symbolic::symbolic_engine::Expr;
/// let e = Expr::parse_expression("(a + b)^2 - 2*a*b").unwrap();
/// assert_eq!(e.expand().unwrap().to_string(), "a^2 + b^2");
/// ```
pub mod symbolic_expand;
///____________________________________________________________________________________________________________________________
/// # Vectors and matrices of expressions
/// dot/cross products, skew-symmetric cross matrices, matrix products, trace and
/// determinant, with numerical evaluation into nalgebra types
///# Example#
/// ```
/// use SolverCoeffs::symbolic::symbolic_vectors::ExprMatrix;
/// let m = ExprMatrix::from_variables(2, 2, "A");
/// let det = m.determinant().expand().unwrap();
/// assert_eq!(det.to_string(), "A00*A11 - A01*A10");
/// ```
pub mod symbolic_vectors;
