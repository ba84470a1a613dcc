use std::collections::{HashMap, HashSet};

use super::Document;
use super::store::CellStore;
use gridcalc_engine::engine::{
    CellContent, CellRef, EvalError, EvalResult, FormulaEvaluator, extract_dependencies,
    format_number,
};

/// Display text for any failed evaluation.
pub const ERROR_DISPLAY: &str = "Error";

/// Resolves display values against a read-only snapshot of a grid.
///
/// Each call to [`EvaluationSession::display_value`] starts from scratch:
/// values computed while resolving one cell are reused within that call and
/// dropped afterwards.
pub struct EvaluationSession<'a, S: CellStore + ?Sized> {
    store: &'a S,
    evaluator: &'a FormulaEvaluator,
    /// Cells whose formulas are currently being evaluated (the active stack).
    resolving: HashSet<CellRef>,
    /// Values computed during the current call.
    values: HashMap<CellRef, f64>,
}

impl<'a, S: CellStore + ?Sized> EvaluationSession<'a, S> {
    pub fn new(store: &'a S, evaluator: &'a FormulaEvaluator) -> Self {
        EvaluationSession {
            store,
            evaluator,
            resolving: HashSet::new(),
            values: HashMap::new(),
        }
    }

    /// Get the display value for a cell.
    ///
    /// Blank cells show `""`, literals show as entered, and formulas show
    /// their formatted result or `"Error"`. Never fails.
    pub fn display_value(&mut self, cell_ref: &CellRef) -> String {
        match self.store.raw_content(cell_ref) {
            None => String::new(),
            Some(CellContent::Literal(lit)) => lit.display(),
            Some(CellContent::Formula(_)) => match self.evaluate(cell_ref) {
                Ok(n) => format_number(n),
                Err(e) => {
                    log::warn!("{} evaluates to {}: {}", cell_ref, ERROR_DISPLAY, e);
                    ERROR_DISPLAY.to_string()
                }
            },
        }
    }

    /// Evaluate a cell to a number with a fresh per-call cache.
    pub fn evaluate(&mut self, cell_ref: &CellRef) -> EvalResult<f64> {
        self.resolving.clear();
        self.values.clear();
        self.value_of(cell_ref)
    }

    /// Numeric value of a cell.
    ///
    /// Blank cells are zero. A formula's references are resolved
    /// depth-first on an explicit stack, so every formula is evaluated only
    /// after the formulas it references and chain length is not limited by
    /// the thread's stack. Reaching a cell that is still waiting on its own
    /// references is a circular reference.
    fn value_of(&mut self, target: &CellRef) -> EvalResult<f64> {
        if !matches!(self.store.raw_content(target), Some(CellContent::Formula(_)))
            || !self.store.in_bounds(target)
        {
            return self.resolved_value(target);
        }

        // (cell, references already scheduled)
        let mut pending = vec![(target.clone(), false)];
        while let Some((cell_ref, expanded)) = pending.pop() {
            if self.values.contains_key(&cell_ref) {
                continue;
            }
            let Some(CellContent::Formula(raw)) = self.store.raw_content(&cell_ref) else {
                continue;
            };

            if expanded {
                let result = self.evaluator.evaluate(&raw, |r| {
                    log::trace!("{} resolving {}", cell_ref, r);
                    self.resolved_value(r)
                });
                self.resolving.remove(&cell_ref);
                self.values.insert(cell_ref, result?);
                continue;
            }

            self.resolving.insert(cell_ref.clone());
            let references = extract_dependencies(&raw);
            pending.push((cell_ref, true));
            // Reversed so references are visited in the order they appear.
            for dep in references.into_iter().rev() {
                if !self.store.in_bounds(&dep) || self.values.contains_key(&dep) {
                    continue;
                }
                if self.resolving.contains(&dep) {
                    return Err(EvalError::CircularReference(dep));
                }
                pending.push((dep, false));
            }
        }

        self.resolved_value(target)
    }

    /// Value of a cell whose references have all been evaluated.
    fn resolved_value(&self, cell_ref: &CellRef) -> EvalResult<f64> {
        if !self.store.in_bounds(cell_ref) {
            return Err(EvalError::OutOfBounds(cell_ref.clone()));
        }
        if let Some(value) = self.values.get(cell_ref) {
            return Ok(*value);
        }
        match self.store.raw_content(cell_ref) {
            None => Ok(0.0),
            Some(CellContent::Literal(lit)) => lit.to_number(),
            Some(CellContent::Formula(_)) => Err(EvalError::CircularReference(cell_ref.clone())),
        }
    }
}

impl Document {
    /// Start an evaluation session over this document's current contents.
    pub fn session(&self) -> EvaluationSession<'_, Document> {
        EvaluationSession::new(self, &self.evaluator)
    }

    /// Get the display value for a cell.
    pub fn display_value(&self, cell_ref: &CellRef) -> String {
        self.session().display_value(cell_ref)
    }

    /// Evaluate a cell to a number, keeping the typed failure.
    pub fn evaluate_cell(&self, cell_ref: &CellRef) -> EvalResult<f64> {
        self.session().evaluate(cell_ref)
    }
}
