//! Error types for Gridcalc core.

use thiserror::Error;

use gridcalc_engine::engine::CellRef;

/// Errors that can occur while editing or configuring a document.
///
/// Formula evaluation failures are not errors here; they surface as the
/// display text `"Error"`.
#[derive(Error, Debug)]
pub enum GridcalcError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Cell {0} is outside the grid ({1} rows x {2} columns)")]
    OutOfBounds(CellRef, usize, usize),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Rhai compile error: {0}")]
    RhaiCompile(String),
}

pub type Result<T> = std::result::Result<T, GridcalcError>;
