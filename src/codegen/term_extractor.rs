//! # Term extractor
//!
//! Pulls the coefficient of a monomial out of an expanded polynomial string.
//!
//! ## Entry points
//!
//! - [`extract_with_key`]: every term containing `key`, with one occurrence of
//!   `key` deleted (`"x^2*y - 3*x*y + x^2 - y"`, key `"x^2"` -> `"y + 1"`).
//! - [`extract_without_key`]: every term containing none of the tracked symbols
//!   (the constant coefficient with respect to them).
//! - [`coefficient_of`]: chains the two over a list of `(symbol, exponent)`
//!   pairs to get the exact coefficient of a multivariate monomial.
//!
//! ## Matching rules
//!
//! A key occurrence only counts on factor boundaries: preceded by the term
//! start, `-` or `*` and followed by the term end, `*` or `/`. So `x` never
//! matches inside `xa0`, and never matches `x^2`. For a key without an explicit
//! power every term holding `key^n` is dropped up front.
//!
//! No match yields an empty string; [`or_zero`] turns that into a literal `0`.
use crate::codegen::power_expand::expand_powers;
use crate::codegen::terms::{factor_base, factors, join_terms, split_terms, strip_sign};
use log::debug;

/// Byte offset of the first boundary-aligned occurrence of `key` in `term`.
fn find_key(term: &str, key: &str, need_right_boundary: bool) -> Option<usize> {
    term.match_indices(key).map(|(idx, _)| idx).find(|&idx| {
        let left_ok = idx == 0 || matches!(term.as_bytes()[idx - 1], b'-' | b'*');
        let end = idx + key.len();
        let right_ok = !need_right_boundary
            || end == term.len()
            || matches!(term.as_bytes()[end], b'*' | b'/');
        left_ok && right_ok
    })
}

/// Tidies a term after a key was cut out of it.
fn clean_term(term: &str) -> String {
    let mut s = term.replace("-*", "-");
    while s.contains("**") {
        s = s.replace("**", "*");
    }
    s = s.replace("*/", "/");
    let (negative, body) = strip_sign(&s);
    let body = body.trim_matches('*');
    let body = if body.starts_with('/') {
        format!("1{}", body)
    } else {
        body.to_string()
    };
    match (negative, body.is_empty()) {
        (false, true) => "1".to_string(),
        (true, true) => "-1".to_string(),
        (false, false) => body,
        (true, false) => format!("-{}", body),
    }
}

/// Selection step of [`extract_with_key`], without power expansion.
fn collect_with_key(terms: &[String], key: &str) -> Vec<String> {
    let powered_key = (!key.contains('^')).then(|| format!("{}^", key));
    terms
        .iter()
        .filter(|term| match &powered_key {
            Some(pk) => find_key(term, pk, false).is_none(),
            None => true,
        })
        .filter_map(|term| {
            find_key(term, key, true).map(|idx| {
                let cut = format!("{}{}", &term[..idx], &term[idx + key.len()..]);
                clean_term(&cut)
            })
        })
        .collect()
}

/// Selection step of [`extract_without_key`], without power expansion.
fn collect_without(terms: &[String], tracked: &[&str]) -> Vec<String> {
    terms
        .iter()
        .filter(|term| {
            let (_, body) = strip_sign(term);
            !factors(body)
                .into_iter()
                .flat_map(|f| f.split(['/', '(', ')', '*']))
                .any(|f| tracked.contains(&factor_base(f)))
        })
        .cloned()
        .collect()
}

fn expand_and_join(terms: &[String]) -> String {
    let expanded: Vec<String> = terms.iter().map(|t| expand_powers(t)).collect();
    join_terms(&expanded)
}

/// Collects every term of `poly` containing `key` and deletes the key from it.
///
/// # Arguments
/// * `poly` - expanded polynomial (`"x^2*y - 3*x*y + x^2 - y"`)
/// * `key` - monomial key (`"x^2"`, `"x"`, `"x*y"`); multi-factor keys must
///   appear contiguously in the terms, which holds for canonically ordered input
///
/// # Returns
/// The power-expanded coefficient expression, or `""` when nothing matches.
pub fn extract_with_key(poly: &str, key: &str) -> String {
    let selected = collect_with_key(&split_terms(poly), key);
    debug!("key '{}': {} matching terms", key, selected.len());
    expand_and_join(&selected)
}

/// Collects every term of `poly` in which none of the `tracked` symbols occurs.
pub fn extract_without_key(poly: &str, tracked: &[&str]) -> String {
    let selected = collect_without(&split_terms(poly), tracked);
    debug!("without {:?}: {} matching terms", tracked, selected.len());
    expand_and_join(&selected)
}

/// Exact coefficient of the monomial `prod(symbol^exponent)` in `poly`.
///
/// Each pair narrows the term list in order: exponent 0 keeps terms free of the
/// symbol, exponent n keeps terms holding exactly `symbol^n` and strips it.
/// Powers are expanded once, at the end, so later steps still see `y^2`.
///
/// ```
/// use SolverCoeffs::codegen::term_extractor::coefficient_of;
/// let poly = "a*x^2*y + b*x^2 + c*x*y + d";
/// assert_eq!(coefficient_of(poly, &[("x", 2), ("y", 0)]), "b");
/// assert_eq!(coefficient_of(poly, &[("x", 0), ("y", 0)]), "d");
/// assert_eq!(coefficient_of(poly, &[("x", 1), ("y", 2)]), "");
/// ```
pub fn coefficient_of(poly: &str, monomial: &[(&str, u32)]) -> String {
    let mut terms = split_terms(poly);
    for &(var, exp) in monomial {
        terms = match exp {
            0 => collect_without(&terms, &[var]),
            1 => collect_with_key(&terms, var),
            n => collect_with_key(&terms, &format!("{}^{}", var, n)),
        };
        if terms.is_empty() {
            return String::new();
        }
    }
    expand_and_join(&terms)
}

/// An empty coefficient means the monomial does not occur: write it as `0`.
pub fn or_zero(coefficient: &str) -> String {
    if coefficient.trim().is_empty() {
        "0".to_string()
    } else {
        coefficient.to_string()
    }
}
