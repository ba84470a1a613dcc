//! Dependency extraction from formula strings.
//!
//! Parses formula text to find all cell references (e.g., `A1`, `AB12`) that
//! the formula depends on. This is used to build the dependency graph for
//! change propagation and cycle detection.

use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

use super::cell_ref::CellRef;

/// Matches address-like substrings: upper-case letters followed by digits.
pub(crate) fn reference_re() -> &'static Regex {
    static REFERENCE_RE: OnceLock<Regex> = OnceLock::new();
    REFERENCE_RE
        .get_or_init(|| Regex::new(r"[A-Z]+[0-9]+").expect("cell reference regex must compile"))
}

/// Extract the distinct cell references in a formula, in order of first
/// appearance.
///
/// Address-like text that does not decode (`A0`, absurdly wide columns) is
/// skipped here; evaluation reports it as an invalid address.
pub fn extract_dependencies(formula: &str) -> Vec<CellRef> {
    let mut seen = HashSet::new();
    let mut deps = Vec::new();

    for m in reference_re().find_iter(formula) {
        match CellRef::parse(m.as_str()) {
            Ok(cell_ref) => {
                if seen.insert(cell_ref.clone()) {
                    deps.push(cell_ref);
                }
            }
            Err(_) => log::debug!("skipping undecodable reference {:?}", m.as_str()),
        }
    }

    deps
}
