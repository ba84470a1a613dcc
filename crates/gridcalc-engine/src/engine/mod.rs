//! Spreadsheet engine API.
//!
//! This module provides the formula evaluation engine for the spreadsheet:
//!
//! - [`CellRef`] - Cell reference parsing (A1 notation ↔ row/col indices)
//! - [`CellContent`], [`LiteralValue`] - What a non-blank cell holds
//! - [`extract_dependencies`] - Parse formula dependencies
//! - [`DependencyGraph`] - "Depends on me" adjacency and recompute order
//! - [`find_cycle`] - Circular dependency detection
//! - [`preprocess_formula`] - Substitute references for Rhai evaluation
//! - [`FormulaEvaluator`] - Rhai engine with built-in functions
//! - [`format_number`] - Format values for display

mod cell;
mod cell_ref;
mod cycle;
mod deps;
mod error;
mod eval;
mod format;
mod graph;
mod preprocess;

pub use cell::{CellContent, LiteralValue, is_formula};
pub use cell_ref::CellRef;
pub use cycle::find_cycle;
pub use deps::extract_dependencies;
pub use error::{EvalError, EvalResult};
pub use eval::{FormulaEvaluator, create_engine};
pub use format::{dynamic_to_number, format_number};
pub use graph::DependencyGraph;
pub use preprocess::{
    normalize_numeric_literals, preprocess_formula, rewrite_power_operator, substitute_references,
};

pub use rhai::{AST, Dynamic};
