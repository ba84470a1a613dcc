//! Sheet configuration.

use serde::{Deserialize, Serialize};

use crate::error::{GridcalcError, Result};

/// Rows in a fresh sheet.
pub const DEFAULT_ROWS: usize = 5;
/// Columns in a fresh sheet.
pub const DEFAULT_COLS: usize = 5;

/// Extent of the grid. References outside it are out of bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetConfig {
    pub rows: usize,
    pub cols: usize,
}

impl Default for SheetConfig {
    fn default() -> Self {
        SheetConfig {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
        }
    }
}

impl SheetConfig {
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        let config = SheetConfig { rows, cols };
        config.validate()?;
        Ok(config)
    }

    /// A sheet needs at least one row and one column.
    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(GridcalcError::Config(format!(
                "grid must have at least one row and one column (got {} x {})",
                self.rows, self.cols
            )));
        }
        Ok(())
    }
}
