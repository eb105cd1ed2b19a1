//! # Common-factor simplifier
//!
//! Greedy factoring of a sum of products, to cut the multiplication count of
//! generated coefficient code:
//!
//! ```text
//! a*b + a*c - a*d            ->  a*( b + c - d )
//! x*y*z + x*y*w + q          ->  x*( y*( z + w ) ) + q
//! ```
//!
//! Every step picks the factor occurring most often across all terms (ties go
//! to the factor seen first), pulls it out of the terms holding it and recurses
//! on both the factored and the remaining group. Numeric literals are factors
//! like any other symbol. The result is algebraically equal to the input but
//! not guaranteed to be minimal.
use crate::codegen::terms::{factors, join_terms, split_terms, strip_sign};
use itertools::Itertools;
use log::trace;

/// Deletes one occurrence of `factor` from `term`, preferring an interior
/// position, then the first factor, then the last.
fn remove_factor(term: &str, factor: &str) -> String {
    let (negative, body) = strip_sign(term);
    let mut fs = factors(body);
    let n = fs.len();
    let interior = (1..n.saturating_sub(1)).find(|&i| fs[i] == factor);
    let position = interior
        .or_else(|| (n > 0 && fs[0] == factor).then_some(0))
        .or_else(|| (n > 0 && fs[n - 1] == factor).then_some(n - 1));
    if let Some(i) = position {
        fs.remove(i);
    }
    let rest = if fs.is_empty() {
        "1".to_string()
    } else {
        fs.join("*")
    };
    if negative {
        format!("-{}", rest)
    } else {
        rest
    }
}

fn factor_terms(terms: &[String]) -> String {
    if terms.len() <= 1 {
        return join_terms(terms);
    }
    let all_factors: Vec<&str> = terms
        .iter()
        .flat_map(|t| factors(strip_sign(t).1))
        .collect();
    let counts = all_factors.iter().counts();
    let mut best: Option<(&str, usize)> = None;
    for f in all_factors.iter().unique() {
        let count = counts[f];
        if best.is_none_or(|(_, c)| count > c) {
            best = Some((*f, count));
        }
    }
    let (best, count) = match best {
        Some((f, c)) if c >= 2 => (f, c),
        _ => return join_terms(terms),
    };
    trace!("factoring out '{}' ({} occurrences)", best, count);

    let (included, excluded): (Vec<&String>, Vec<&String>) = terms
        .iter()
        .partition(|t| factors(strip_sign(t).1).contains(&best));
    let reduced: Vec<String> = included.iter().map(|t| remove_factor(t, best)).collect();
    let mut out = format!("{}*( {} )", best, factor_terms(&reduced));
    if !excluded.is_empty() {
        let rest: Vec<String> = excluded.into_iter().cloned().collect();
        out.push_str(" + ");
        out.push_str(&factor_terms(&rest));
    }
    out
}

/// Factors common symbols out of an expanded sum.
///
/// # Arguments
/// * `expr` - a power-expanded sum such as the output of the term extractor
///
/// # Returns
/// A string of the shape `factor*( inner ) + rest`, or the input terms joined
/// back unchanged when no factor occurs twice. Empty input gives `""`.
pub fn simplify(expr: &str) -> String {
    let terms: Vec<String> = split_terms(expr)
        .into_iter()
        .filter(|t| !t.is_empty() && t != "-")
        .collect();
    factor_terms(&terms)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::term_extractor::extract_with_key;
    use crate::symbolic::symbolic_engine::Expr;
    use approx::assert_relative_eq;

    #[test]
    fn test_simplify_single_common_factor() {
        assert_eq!(simplify("a*b + a*c - a*d"), "a*( b + c - d )");
    }

    #[test]
    fn test_simplify_nested_and_excluded() {
        assert_eq!(simplify("x*y*z + x*y*w + q"), "x*( y*( z + w ) ) + q");
    }

    #[test]
    fn test_simplify_keeps_term_that_is_the_factor() {
        assert_eq!(simplify("a*b + a"), "a*( b + 1 )");
        assert_eq!(simplify("-a + a*b"), "a*( -1 + b )");
    }

    #[test]
    fn test_simplify_numeric_factor() {
        assert_eq!(simplify("2*a - 2*b"), "2*( a - b )");
    }

    #[test]
    fn test_simplify_no_common_factor() {
        assert_eq!(simplify("a + b - c"), "a + b - c");
        assert_eq!(simplify("a*b"), "a*b");
        assert_eq!(simplify(""), "");
    }

    #[test]
    fn test_simplify_tie_goes_to_first_seen() {
        assert_eq!(simplify("a*b + a*c + b*d"), "a*( b + c ) + b*d");
    }

    #[test]
    fn test_simplify_keeps_parenthesized_divisor_whole() {
        let input = "a*c/(b*b) + a*d/(b*b)";
        let simplified = simplify(input);
        assert_eq!(simplified, "a*( c/(b*b) + d/(b*b) )");
        let vars = vec!["a", "b", "c", "d"];
        let values = [2.0, 3.0, 5.0, 7.0];
        let before = Expr::parse_expression(input).unwrap();
        let after = Expr::parse_expression(&simplified).unwrap();
        assert_relative_eq!(
            after.eval_expression(vars.clone(), &values),
            before.eval_expression(vars, &values),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_simplify_divisor_from_extractor() {
        let coefficient = extract_with_key("a*x^2/b^2 + c*x^2/b^2", "x^2");
        let simplified = simplify(&coefficient);
        assert_eq!(simplified.matches('(').count(), simplified.matches(')').count());
        let vars = vec!["a", "b", "c"];
        let values = [2.0, 3.0, 5.0];
        let expected = Expr::parse_expression(&coefficient).unwrap();
        let parsed = Expr::parse_expression(&simplified).unwrap();
        assert_relative_eq!(
            parsed.eval_expression(vars.clone(), &values),
            expected.eval_expression(vars, &values),
            epsilon = 1e-12
        );
        assert_relative_eq!(
            parsed.eval_expression(vec!["a", "b", "c"], &values),
            7.0 / 9.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_remove_factor_positions() {
        assert_eq!(remove_factor("a*x*a", "a"), "x*a");
        assert_eq!(remove_factor("x*a*a*y", "a"), "x*a*y");
        assert_eq!(remove_factor("-a*x", "a"), "-x");
        assert_eq!(remove_factor("x*a", "a"), "x");
        assert_eq!(remove_factor("-a", "a"), "-1");
    }
}
