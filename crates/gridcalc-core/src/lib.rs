//! gridcalc-core - UI-agnostic document model + evaluation session.

pub mod config;
pub mod document;
pub mod error;

pub use config::SheetConfig;
pub use document::{CellStore, Document, ERROR_DISPLAY, EvaluationSession};
pub use error::{GridcalcError, Result};

pub use gridcalc_engine::builtins::{BUILTINS, Builtin};
pub use gridcalc_engine::engine::{CellContent, CellRef};
