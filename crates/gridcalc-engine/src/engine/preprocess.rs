//! Formula preprocessing.
//!
//! Before a formula can be handed to Rhai, every cell reference is replaced by
//! the referenced cell's value, and integer literals are rewritten as floats
//! so arithmetic follows spreadsheet rules (`7/2` is `3.5`, not `3`):
//!
//! - **Substitution**: `A1 + B2` → `2.0 + (-1.5)`
//! - **Numeric literals**: `7/2` → `7.0/2.0`, `1e3` → `1.0e3`
//! - **Power operator**: `2^3` → `2.0**3.0`

use regex::{Captures, Regex};
use std::sync::OnceLock;

use super::cell_ref::CellRef;
use super::deps::reference_re;
use super::error::EvalResult;

/// Replace every cell reference in `expression` with the value `resolve`
/// returns for it.
///
/// The first failure from decoding or resolving a reference is returned
/// unchanged and no partial expression is produced.
pub fn substitute_references<F>(expression: &str, mut resolve: F) -> EvalResult<String>
where
    F: FnMut(&CellRef) -> EvalResult<f64>,
{
    let mut out = String::with_capacity(expression.len());
    let mut last = 0;

    for m in reference_re().find_iter(expression) {
        let cell_ref = CellRef::parse(m.as_str())?;
        let value = resolve(&cell_ref)?;
        out.push_str(&expression[last..m.start()]);
        out.push_str(&number_literal(value));
        last = m.end();
    }
    out.push_str(&expression[last..]);

    Ok(out)
}

/// Render a value as a Rhai float literal. Negative values are parenthesised
/// so `B1-A1` never turns into `5.0--3.0`.
fn number_literal(n: f64) -> String {
    let mut text = n.to_string();
    if !text.contains('.') {
        text.push_str(".0");
    }
    if n.is_sign_negative() {
        format!("({})", text)
    } else {
        text
    }
}

fn numeric_literal_re() -> &'static Regex {
    static NUMERIC_LITERAL_RE: OnceLock<Regex> = OnceLock::new();
    NUMERIC_LITERAL_RE.get_or_init(|| {
        Regex::new(r"\b(?<int>[0-9]+)(?<frac>\.[0-9]+)?(?<exp>[eE][+-]?[0-9]+)?\b")
            .expect("numeric literal regex must compile")
    })
}

/// Rewrite integer literals as float literals: `7` → `7.0`, `1e5` → `1.0e5`.
///
/// Literals with a fractional part (`1.5`, `1.5e3`) are already floats and
/// are left alone, as are digits inside identifiers (`atan2`).
pub fn normalize_numeric_literals(expression: &str) -> String {
    numeric_literal_re()
        .replace_all(expression, |caps: &Captures| {
            if caps.name("frac").is_some() {
                return caps[0].to_string();
            }
            let exponent = caps.name("exp").map_or("", |m| m.as_str());
            format!("{}.0{}", &caps["int"], exponent)
        })
        .into_owned()
}

/// Rewrite the spreadsheet power operator `^` as Rhai's `**`.
pub fn rewrite_power_operator(expression: &str) -> String {
    expression.replace('^', "**")
}

/// Turn raw formula text into a numeric Rhai expression.
///
/// Strips the leading `=`, trims whitespace, substitutes references,
/// normalises numeric literals and rewrites `^` as `**`.
pub fn preprocess_formula<F>(raw: &str, resolve: F) -> EvalResult<String>
where
    F: FnMut(&CellRef) -> EvalResult<f64>,
{
    let trimmed = raw.trim_start();
    let body = trimmed.strip_prefix('=').unwrap_or(trimmed).trim();
    let substituted = substitute_references(body, resolve)?;
    Ok(rewrite_power_operator(&normalize_numeric_literals(
        &substituted,
    )))
}
