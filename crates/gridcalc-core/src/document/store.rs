//! The read-only view of a grid that evaluation runs against.

use gridcalc_engine::engine::{CellContent, CellRef};

use crate::config::SheetConfig;

/// Read access to cell contents and grid extent.
///
/// Evaluation only ever reads through this trait; writes happen between
/// evaluation passes.
pub trait CellStore {
    /// Raw content of a cell, or `None` if it is blank.
    fn raw_content(&self, cell_ref: &CellRef) -> Option<CellContent>;

    /// Current extent of the grid.
    fn bounds(&self) -> SheetConfig;

    fn in_bounds(&self, cell_ref: &CellRef) -> bool {
        let bounds = self.bounds();
        cell_ref.row < bounds.rows && cell_ref.col < bounds.cols
    }
}
