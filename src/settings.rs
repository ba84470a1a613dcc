use anyhow::{Context, Result};
use directories::ProjectDirs;
use gridcalc_core::SheetConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Contents of a `--config` TOML file.
///
/// ```toml
/// rows = 20
/// cols = 8
/// functions = ["finance.rhai"]
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct Settings {
    #[serde(flatten)]
    pub sheet: SheetConfig,
    pub functions: Vec<PathBuf>,
}

impl Settings {
    pub(crate) fn from_toml(text: &str) -> Result<Self> {
        let settings: Settings = toml::from_str(text)?;
        settings.sheet.validate()?;
        Ok(settings)
    }

    /// Load settings from a file. Relative function paths are resolved
    /// against the file's directory.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let mut settings = Self::from_toml(&text)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        if let Some(base) = path.parent() {
            for func in &mut settings.functions {
                if func.is_relative() {
                    *func = base.join(&*func);
                }
            }
        }
        Ok(settings)
    }
}

pub(crate) fn default_functions_path() -> Option<PathBuf> {
    let proj = ProjectDirs::from("me", "shoryuken", "gridcalc")?;
    let mut path = proj.config_dir().to_path_buf();
    path.push("default.rhai");
    Some(path)
}

pub(crate) fn prepend_default_functions_if_present(
    functions: &mut Vec<PathBuf>,
    no_default_functions: bool,
) {
    if no_default_functions {
        return;
    }
    let Some(path) = default_functions_path() else {
        return;
    };
    if path.is_file() {
        functions.insert(0, path);
    } else {
        log::debug!("no default functions file at {}", path.display());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_functions_path_is_deterministic() {
        // Should never panic and should either be Some(path) or None.
        let _ = default_functions_path();
    }

    #[test]
    fn settings_default_to_five_by_five() {
        let settings = Settings::from_toml("").unwrap();
        assert_eq!(settings.sheet, SheetConfig::default());
        assert!(settings.functions.is_empty());
    }

    #[test]
    fn settings_parse_extent_and_functions() {
        let settings = Settings::from_toml("rows = 20\ncols = 8\nfunctions = [\"a.rhai\"]").unwrap();
        assert_eq!((settings.sheet.rows, settings.sheet.cols), (20, 8));
        assert_eq!(settings.functions, vec![PathBuf::from("a.rhai")]);
    }

    #[test]
    fn settings_reject_empty_grid() {
        assert!(Settings::from_toml("rows = 0").is_err());
    }

    #[test]
    fn no_default_functions_leaves_list_untouched() {
        let mut functions = vec![PathBuf::from("x.rhai")];
        prepend_default_functions_if_present(&mut functions, true);
        assert_eq!(functions, vec![PathBuf::from("x.rhai")]);
    }
}
