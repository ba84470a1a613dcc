//! Document state and logic (UI-agnostic).

mod eval;
mod functions;
mod ops;
mod state;
mod store;

pub use eval::{ERROR_DISPLAY, EvaluationSession};
pub use state::{Document, Grid};
pub use store::CellStore;
