//! Power expansion: `x^3*y` -> `x*x*x*y`.
//!
//! Generated code multiplies instead of calling a power function, so every
//! `name^n` factor of a term is spelled out as `n` copies of `name`.
use crate::codegen::terms::{parse_power, strip_sign};
use log::warn;

fn expand_product(product: &str) -> String {
    product
        .split('*')
        .map(|factor| match parse_power(factor) {
            Some((_, 0)) => "1".to_string(),
            Some((base, n)) => vec![base; n as usize].join("*"),
            None => {
                if factor.contains('^') {
                    warn!("exponent of '{}' is not an integer literal, left as is", factor);
                }
                factor.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("*")
}

/// Expands every `name^n` factor of a single multiplicative term.
///
/// A leading `-` is preserved. When the term divides (`a^2/b^2`), the divisor
/// is expanded too and wrapped in parentheses: `a*a/(b*b)`. Terms without `^`
/// are returned unchanged, so expanding twice is the same as expanding once.
pub fn expand_powers(term: &str) -> String {
    if !term.contains('^') {
        return term.to_string();
    }
    let (negative, body) = strip_sign(term);
    let expanded = match body.split_once('/') {
        Some((numerator, divisor)) => {
            format!("{}/({})", expand_product(numerator), expand_product(divisor))
        }
        None => expand_product(body),
    };
    if negative {
        format!("-{}", expanded)
    } else {
        expanded
    }
}
