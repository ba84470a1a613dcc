use super::Document;
use super::store::CellStore;
use crate::config::SheetConfig;
use crate::error::{GridcalcError, Result};
use gridcalc_engine::engine::{CellContent, CellRef, find_cycle};

impl Document {
    /// Cells to recompute after `changed_cell` changes, starting with the
    /// changed cell and followed by its transitive dependents, each after
    /// everything it depends on.
    fn recompute_order(&self, changed_cell: &CellRef) -> Vec<CellRef> {
        let mut order = self.dependents.topological_order(changed_cell);
        order.reverse();
        order
    }

    fn after_write(&mut self, cell_ref: &CellRef) -> Vec<CellRef> {
        self.rebuild_dependents();
        if let Some(cycle) = find_cycle(&self.dependents) {
            let path: Vec<String> = cycle.iter().map(|c| c.to_string()).collect();
            log::warn!(
                "write to {} leaves a circular reference: {}",
                cell_ref,
                path.join(" -> ")
            );
        }
        self.recompute_order(cell_ref)
    }

    /// Set cell contents from input string.
    ///
    /// Empty input clears the cell. Returns the cells whose display values
    /// may have changed, in recompute order.
    pub fn set_cell_from_input(&mut self, cell_ref: CellRef, input: &str) -> Result<Vec<CellRef>> {
        if !self.in_bounds(&cell_ref) {
            return Err(GridcalcError::OutOfBounds(
                cell_ref,
                self.config.rows,
                self.config.cols,
            ));
        }

        match CellContent::from_input(input) {
            Some(content) => {
                log::debug!("set {} = {:?}", cell_ref, content);
                self.grid.insert(cell_ref.clone(), content);
            }
            None => {
                self.grid.remove(&cell_ref);
            }
        }

        Ok(self.after_write(&cell_ref))
    }

    /// Like [`Document::set_cell_from_input`], addressed by A1 text.
    pub fn set_cell(&mut self, address: &str, input: &str) -> Result<Vec<CellRef>> {
        let cell_ref = CellRef::parse(address)
            .map_err(|_| GridcalcError::InvalidAddress(address.to_string()))?;
        self.set_cell_from_input(cell_ref, input)
    }

    /// Clear the specified cell.
    pub fn clear_cell(&mut self, cell_ref: &CellRef) -> Vec<CellRef> {
        if self.grid.remove(cell_ref).is_none() {
            return Vec::new();
        }
        self.after_write(cell_ref)
    }

    /// Raw input text of a cell, as the user typed it. Blank cells give `""`.
    pub fn cell_input(&self, cell_ref: &CellRef) -> String {
        self.grid
            .get(cell_ref)
            .map(|entry| entry.value().to_input_string())
            .unwrap_or_default()
    }

    /// Change the grid extent.
    ///
    /// Cells beyond the new extent keep their content, but formulas that
    /// reference them fail until the grid grows back.
    pub fn resize(&mut self, rows: usize, cols: usize) -> Result<()> {
        self.config = SheetConfig::new(rows, cols)?;
        Ok(())
    }

    /// Any circular reference in the sheet.
    pub fn find_cycle(&self) -> Option<Vec<CellRef>> {
        find_cycle(&self.dependents)
    }
}
