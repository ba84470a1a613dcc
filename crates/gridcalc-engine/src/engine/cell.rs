//! Cell content as seen by the engine.
//!
//! - [`LiteralValue`] - A literal stored in a cell (text or number)
//! - [`CellContent`] - Either a literal or raw formula text

use serde::{Deserialize, Serialize};

use super::error::{EvalError, EvalResult};
use super::format::format_number;

/// A literal stored in a cell.
///
/// Numbers keep the text they were entered as, so `2.50` still shows as
/// `2.50` while formulas see `2.5`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum LiteralValue {
    Text(String),
    Number { value: f64, text: String },
}

/// The content of a non-blank cell.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum CellContent {
    Literal(LiteralValue),
    /// Raw formula text, including the leading `=`.
    Formula(String),
}

/// True if the value, after stripping leading whitespace, starts with `=`.
pub fn is_formula(raw: &str) -> bool {
    raw.trim_start().starts_with('=')
}

impl CellContent {
    pub fn text(text: &str) -> CellContent {
        CellContent::Literal(LiteralValue::Text(text.to_string()))
    }

    /// A number literal shown in its formatted form.
    pub fn number(n: f64) -> CellContent {
        CellContent::Literal(LiteralValue::Number {
            value: n,
            text: format_number(n),
        })
    }

    /// Parse user input and classify it.
    /// - Empty string -> None (blank cell)
    /// - Starts with '=' after leading whitespace -> Formula (raw text kept)
    /// - Valid number -> Number, with the input text kept as entered
    /// - Otherwise -> Text, unchanged (whitespace-only input included)
    pub fn from_input(input: &str) -> Option<CellContent> {
        if input.is_empty() {
            return None;
        }

        if is_formula(input) {
            return Some(CellContent::Formula(input.to_string()));
        }

        if let Ok(n) = input.trim().parse::<f64>()
            && n.is_finite()
        {
            return Some(CellContent::Literal(LiteralValue::Number {
                value: n,
                text: input.to_string(),
            }));
        }

        Some(CellContent::text(input))
    }

    pub fn is_formula(&self) -> bool {
        matches!(self, CellContent::Formula(_))
    }

    /// Get the raw input string for the cell (for editing).
    pub fn to_input_string(&self) -> String {
        match self {
            CellContent::Literal(lit) => lit.display(),
            CellContent::Formula(s) => s.clone(),
        }
    }
}

impl LiteralValue {
    /// Numeric value of the literal when used inside an expression.
    ///
    /// Blank text counts as zero; any other non-numeric text fails.
    pub fn to_number(&self) -> EvalResult<f64> {
        match self {
            LiteralValue::Number { value, .. } => Ok(*value),
            LiteralValue::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Ok(0.0);
                }
                trimmed
                    .parse::<f64>()
                    .ok()
                    .filter(|n| n.is_finite())
                    .ok_or_else(|| EvalError::EvaluationFailed(format!("not a number: {:?}", s)))
            }
        }
    }

    /// Text shown for the literal: exactly what was entered.
    pub fn display(&self) -> String {
        match self {
            LiteralValue::Text(text) | LiteralValue::Number { text, .. } => text.clone(),
        }
    }
}
