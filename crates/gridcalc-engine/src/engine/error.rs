//! Evaluation error kinds.

use thiserror::Error;

use super::cell_ref::CellRef;

/// Errors raised while decoding references or evaluating a formula.
///
/// Every variant is recoverable: the display layer maps all of them to the
/// literal text `"Error"`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Reference out of bounds: {0}")]
    OutOfBounds(CellRef),

    #[error("Circular reference at {0}")]
    CircularReference(CellRef),

    #[error("Evaluation failed: {0}")]
    EvaluationFailed(String),
}

pub type EvalResult<T> = std::result::Result<T, EvalError>;
