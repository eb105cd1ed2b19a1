//! Splitting expanded polynomials into signed terms and terms into factors.
//!
//! Every other module of the code generator goes through these helpers, so
//! the sign conventions live in one place: a term is a `String` whose only
//! possible sign is a glued leading `-` (`"-3*x*y"`).
use nom::{
    IResult, Parser,
    bytes::complete::take_while1,
    character::complete::{char, digit1},
    combinator::{all_consuming, map_res},
    sequence::separated_pair,
};

/// Splits `"x^2*y - 3*x*y + x^2 - y"` into `["x^2*y", "-3*x*y", "x^2", "-y"]`.
///
/// A standalone `-` is glued to the following term, a standalone `+` dropped;
/// a term that already starts with `-` after a ` - ` boundary flips back to positive.
pub fn split_terms(poly: &str) -> Vec<String> {
    let mut terms = Vec::new();
    let mut negative = false;
    for token in poly.split_whitespace() {
        match token {
            "+" => negative = false,
            "-" => negative = !negative,
            _ => {
                let term = match (negative, token.strip_prefix('-')) {
                    (false, _) => token.to_string(),
                    (true, Some(positive)) => positive.to_string(),
                    (true, None) => format!("-{}", token),
                };
                terms.push(term);
                negative = false;
            }
        }
    }
    terms
}

/// Joins signed terms back into the normalized sum: `["a", "-b", "c"]` -> `"a - b + c"`.
pub fn join_terms<S: AsRef<str>>(terms: &[S]) -> String {
    let mut out = String::new();
    for (i, term) in terms.iter().enumerate() {
        let term = term.as_ref();
        match (i, term.strip_prefix('-')) {
            (0, _) => out.push_str(term),
            (_, Some(positive)) => {
                out.push_str(" - ");
                out.push_str(positive);
            }
            (_, None) => {
                out.push_str(" + ");
                out.push_str(term);
            }
        }
    }
    out
}

/// `("-3*x", ...)` -> `(true, "3*x")`.
pub fn strip_sign(term: &str) -> (bool, &str) {
    match term.strip_prefix('-') {
        Some(body) => (true, body),
        None => (false, term),
    }
}

/// Multiplicative factors of an unsigned term body, empty pieces skipped.
///
/// Only top-level `*` separate factors: `"a/(b*b)*c"` -> `["a/(b*b)", "c"]`.
pub fn factors(body: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in body.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            '*' if depth == 0 => {
                out.push(&body[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    out.push(&body[start..]);
    out.retain(|f| !f.is_empty());
    out
}

fn power_factor(input: &str) -> IResult<&str, (&str, u32)> {
    all_consuming(separated_pair(
        take_while1(|c: char| c != '^'),
        char('^'),
        map_res(digit1, |d: &str| d.parse::<u32>()),
    ))
    .parse(input)
}

/// `"x^3"` -> `Some(("x", 3))`; `None` for factors without an integer exponent.
pub fn parse_power(factor: &str) -> Option<(&str, u32)> {
    power_factor(factor).ok().map(|(_, parsed)| parsed)
}

/// Symbol name of a factor: `"x^3"` -> `"x"`, `"K3"` -> `"K3"`.
pub fn factor_base(factor: &str) -> &str {
    factor.split('^').next().unwrap_or(factor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_normalizes_signs() {
        assert_eq!(
            split_terms("x^2*y - 3*x*y + x^2 - y"),
            vec!["x^2*y", "-3*x*y", "x^2", "-y"]
        );
        assert_eq!(split_terms("-a + b"), vec!["-a", "b"]);
        assert_eq!(split_terms("a - -b"), vec!["a", "b"]);
        assert!(split_terms("").is_empty());
        assert!(split_terms("   ").is_empty());
    }

    #[test]
    fn test_join_is_inverse_of_split() {
        for poly in ["x^2*y - 3*x*y + x^2 - y", "-a + b", "K3", "-1"] {
            assert_eq!(join_terms(&split_terms(poly)), poly);
        }
        let empty: [&str; 0] = [];
        assert_eq!(join_terms(&empty), "");
    }

    #[test]
    fn test_factor_helpers() {
        assert_eq!(strip_sign("-3*x"), (true, "3*x"));
        assert_eq!(strip_sign("x"), (false, "x"));
        assert_eq!(factors("3*x^2*y"), vec!["3", "x^2", "y"]);
        assert_eq!(factors("a/(b*b)*c"), vec!["a/(b*b)", "c"]);
        assert_eq!(factors("**a"), vec!["a"]);
        assert_eq!(parse_power("x^3"), Some(("x", 3)));
        assert_eq!(parse_power("t2_01^12"), Some(("t2_01", 12)));
        assert_eq!(parse_power("x"), None);
        assert_eq!(parse_power("x^n"), None);
        assert_eq!(parse_power("x^2.5"), None);
        assert_eq!(factor_base("x^3"), "x");
    }
}
