use super::Document;
use crate::error::{GridcalcError, Result};
use gridcalc_engine::engine::FormulaEvaluator;
use std::path::{Path, PathBuf};

const MAX_FUNCTION_FILE_BYTES: u64 = 1_048_576; // 1 MiB

fn read_functions_file(path: &Path) -> Result<String> {
    let meta = std::fs::metadata(path)?;
    if meta.len() > MAX_FUNCTION_FILE_BYTES {
        return Err(GridcalcError::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!(
                "Refusing to read {}: functions file too large ({} bytes, max {})",
                path.display(),
                meta.len(),
                MAX_FUNCTION_FILE_BYTES
            ),
        )));
    }
    Ok(std::fs::read_to_string(path)?)
}

impl Document {
    /// Load custom Rhai functions from a file (appends to existing functions).
    /// Returns the path loaded, or an error.
    pub fn load_functions(&mut self, path: &Path) -> Result<PathBuf> {
        let path_buf = std::fs::canonicalize(path)?;
        let content = read_functions_file(&path_buf)?;

        if self.functions_files.contains(&path_buf) {
            // Already loaded: keep current compiled state unchanged.
            return Ok(path_buf);
        }

        let new_custom_functions = match &self.custom_functions {
            Some(existing) => format!("{}\n\n{}", existing, content),
            None => content,
        };

        // Compile first so failures don't mutate state.
        let evaluator = FormulaEvaluator::with_functions(&new_custom_functions)
            .map_err(GridcalcError::RhaiCompile)?;

        self.functions_files.push(path_buf.clone());
        self.custom_functions = Some(new_custom_functions);
        self.evaluator = evaluator;
        log::debug!("loaded custom functions from {}", path_buf.display());

        Ok(path_buf)
    }
}
