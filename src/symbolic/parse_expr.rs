//! a module turns a String expression into a symbolic expression
//!
//! Accepts everything the code generator prints: expanded sums (`x^2*y - 3*x*y`),
//! power-expanded terms (`x*x*y/(2)`), factored forms (`a*( b + c ) + -d`) and
//! renamed identifiers (`p1_norm.x`). Used to check generated text against the
//! system it was extracted from, and by the command line front-end.
//!
//! Grammar, loosest binding first:
//! ```text
//! expr   := term (('+' | '-') term)*
//! term   := unary (('*' | '/') unary)*
//! unary  := '-' unary | power
//! power  := atom ('^' unary)?
//! atom   := number | identifier | '(' expr ')'
//! ```
//! # Example
//! ```
//! use SolverCoeffs::symbolic::symbolic_engine::Expr;
//! let e = Expr::parse_expression("a*( b + c - d )").unwrap();
//! assert_eq!(e.expand().unwrap().to_string(), "a*b + a*c - a*d");
//! ```
use crate::error::{CoeffError, Result};
use crate::symbolic::symbolic_engine::Expr;
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::take_while,
    character::complete::{char, digit0, digit1, multispace0, satisfy},
    combinator::{all_consuming, map, map_res, opt, recognize},
    multi::many0,
    sequence::{delimited, pair, preceded},
};

fn number(input: &str) -> IResult<&str, Expr> {
    map_res(
        recognize(pair(digit1, opt(pair(char('.'), digit0)))),
        |s: &str| s.parse::<f64>().map(Expr::Const),
    )
    .parse(input)
}

// identifiers may contain '.' so that renamed fields (`p1_norm.x`) read back
fn identifier(input: &str) -> IResult<&str, Expr> {
    map(
        recognize(pair(
            satisfy(|c| c.is_ascii_alphabetic() || c == '_'),
            take_while(|c: char| c.is_ascii_alphanumeric() || c == '_' || c == '.'),
        )),
        Expr::var,
    )
    .parse(input)
}

fn atom(input: &str) -> IResult<&str, Expr> {
    delimited(
        multispace0,
        alt((
            number,
            identifier,
            delimited(char('('), expr, preceded(multispace0, char(')'))),
        )),
        multispace0,
    )
    .parse(input)
}

fn power(input: &str) -> IResult<&str, Expr> {
    let (input, base) = atom(input)?;
    let (input, exponent) = opt(preceded(char('^'), unary)).parse(input)?;
    Ok((
        input,
        match exponent {
            Some(exp) => base.pow(exp),
            None => base,
        },
    ))
}

fn unary(input: &str) -> IResult<&str, Expr> {
    alt((
        map(preceded(delimited(multispace0, char('-'), multispace0), unary), |e| -e),
        power,
    ))
    .parse(input)
}

fn term(input: &str) -> IResult<&str, Expr> {
    let (input, first) = unary(input)?;
    let (input, rest) = many0(pair(alt((char('*'), char('/'))), unary)).parse(input)?;
    let folded = rest.into_iter().fold(first, |acc, (op, rhs)| match op {
        '*' => acc * rhs,
        _ => acc / rhs,
    });
    Ok((input, folded))
}

fn expr(input: &str) -> IResult<&str, Expr> {
    let (input, first) = term(input)?;
    let (input, rest) = many0(pair(alt((char('+'), char('-'))), term)).parse(input)?;
    let folded = rest.into_iter().fold(first, |acc, (op, rhs)| match op {
        '+' => acc + rhs,
        _ => acc - rhs,
    });
    Ok((input, folded))
}

impl Expr {
    /// Parses `input` into an expression tree.
    ///
    /// # Errors
    /// [`CoeffError::Parse`] when the text is empty, unbalanced or has trailing garbage.
    pub fn parse_expression(input: &str) -> Result<Expr> {
        all_consuming(expr)
            .parse(input)
            .map(|(_, e)| e)
            .map_err(|err| CoeffError::Parse {
                input: input.to_string(),
                reason: err.to_string(),
            })
    }
}
