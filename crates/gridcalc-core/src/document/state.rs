use dashmap::DashMap;
use gridcalc_engine::engine::{CellContent, CellRef, DependencyGraph, FormulaEvaluator};
use std::path::PathBuf;

use super::store::CellStore;
use crate::config::SheetConfig;
use crate::error::Result;

/// Thread-safe sparse grid storage. Blank cells have no entry.
pub type Grid = DashMap<CellRef, CellContent>;

/// UI-agnostic document state for the spreadsheet.
///
/// Cells change only through the write operations, which keep the
/// dependency graph in step with the grid:
///
/// ```compile_fail
/// use gridcalc_core::{CellContent, CellRef, Document};
///
/// let doc = Document::new();
/// doc.grid.insert(CellRef::new(0, 0), CellContent::number(1.0));
/// ```
pub struct Document {
    /// The spreadsheet grid
    pub(crate) grid: Grid,
    /// Grid extent
    pub(crate) config: SheetConfig,
    /// Rhai-backed formula evaluator (built-ins plus custom functions)
    pub(crate) evaluator: FormulaEvaluator,
    /// Paths to custom Rhai functions files
    pub(crate) functions_files: Vec<PathBuf>,
    /// Cached custom functions script content (concatenated from all files)
    pub(crate) custom_functions: Option<String>,
    /// Reverse dependency map, rebuilt on every write so it is never stale
    pub(crate) dependents: DependencyGraph,
}

impl Document {
    /// Create an empty document with the default 5x5 extent.
    ///
    /// This constructor is side-effect free: it does not touch the filesystem.
    pub fn new() -> Self {
        Self::with_config(SheetConfig::default())
    }

    pub fn with_config(config: SheetConfig) -> Self {
        Document {
            grid: Grid::new(),
            config,
            evaluator: FormulaEvaluator::new(),
            functions_files: Vec::new(),
            custom_functions: None,
            dependents: DependencyGraph::default(),
        }
    }

    /// Create a document and load the given custom functions files.
    pub fn with_functions(config: SheetConfig, functions_files: Vec<PathBuf>) -> Result<Self> {
        config.validate()?;
        let mut doc = Self::with_config(config);
        for func_path in &functions_files {
            doc.load_functions(func_path)?;
        }
        Ok(doc)
    }

    /// Rebuild the reverse dependency map from the grid.
    /// Call this after cells are added, removed, or their formulas change.
    pub(crate) fn rebuild_dependents(&mut self) {
        let cells = self.cells();
        self.dependents = DependencyGraph::build(cells.iter().map(|(r, c)| (r.clone(), c)));
    }

    /// Canonical paths of the loaded custom functions files.
    pub fn functions_files(&self) -> &[PathBuf] {
        &self.functions_files
    }

    /// The current dependency graph.
    pub fn dependency_graph(&self) -> &DependencyGraph {
        &self.dependents
    }

    /// Snapshot of every non-blank cell in row-major order.
    pub fn cells(&self) -> Vec<(CellRef, CellContent)> {
        let mut cells: Vec<(CellRef, CellContent)> = self
            .grid
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect();
        cells.sort_by(|a, b| a.0.cmp(&b.0));
        cells
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl CellStore for Document {
    fn raw_content(&self, cell_ref: &CellRef) -> Option<CellContent> {
        self.grid.get(cell_ref).map(|entry| entry.value().clone())
    }

    fn bounds(&self) -> SheetConfig {
        self.config
    }
}
