//! Cell reference parsing and formatting.
//!
//! Provides bidirectional conversion between spreadsheet-style cell references
//! (e.g., "A1", "B2", "AA100") and zero-indexed column/row coordinates.
//!
//! # Examples
//!
//! ```
//! use gridcalc_engine::engine::CellRef;
//!
//! let cell = CellRef::parse("B3").unwrap();
//! assert_eq!(cell.col, 1); // 0-indexed
//! assert_eq!(cell.row, 2);
//! assert_eq!(cell.to_string(), "B3");
//! ```

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

use super::error::{EvalError, EvalResult};

/// A reference to a cell by row and column indices (0-indexed).
///
/// Ordering is row-major, which is the order graph nodes and document cells
/// are visited in.
#[derive(Clone, Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct CellRef {
    pub row: usize,
    pub col: usize,
}

impl CellRef {
    pub fn new(col: usize, row: usize) -> CellRef {
        CellRef { row, col }
    }

    /// Parse a cell reference from spreadsheet notation (e.g., "A1", "B2", "AA10").
    ///
    /// Only upper-case letters are accepted and the whole input must match;
    /// anything else is an [`EvalError::InvalidAddress`].
    pub fn parse(name: &str) -> EvalResult<CellRef> {
        Self::parse_a1(name).ok_or_else(|| EvalError::InvalidAddress(name.to_string()))
    }

    fn parse_a1(name: &str) -> Option<CellRef> {
        let caps = address_re().captures(name)?;
        let letters = &caps["letters"];
        let numbers = &caps["numbers"];

        let mut col_acc = 0usize;
        for c in letters.bytes() {
            let digit = (c - b'A') as usize + 1;
            col_acc = col_acc.checked_mul(26)?.checked_add(digit)?;
        }
        let col = col_acc.checked_sub(1)?;

        let row = numbers.parse::<usize>().ok()?.checked_sub(1)?;

        Some(CellRef::new(col, row))
    }

    /// Convert column index to spreadsheet-style letters (0 -> A, 25 -> Z, 26 -> AA).
    pub fn col_to_letters(col: usize) -> String {
        let mut result = String::new();
        let mut n = col as u128 + 1;
        while n > 0 {
            n -= 1;
            result.insert(0, (b'A' + (n % 26) as u8) as char);
            n /= 26;
        }
        result
    }

    /// Canonical address text for a (row, column) pair.
    pub fn encode(row: usize, col: usize) -> String {
        CellRef::new(col, row).to_string()
    }
}

fn address_re() -> &'static Regex {
    static ADDRESS_RE: OnceLock<Regex> = OnceLock::new();
    ADDRESS_RE.get_or_init(|| {
        Regex::new(r"^(?<letters>[A-Z]+)(?<numbers>[0-9]+)$").expect("address regex must compile")
    })
}

impl std::str::FromStr for CellRef {
    type Err = EvalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CellRef::parse(s)
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", CellRef::col_to_letters(self.col), self.row + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::CellRef;
    use crate::engine::EvalError;

    #[test]
    fn test_parse_single_and_multi_letter_columns() {
        assert_eq!(CellRef::parse("A1").unwrap(), CellRef::new(0, 0));
        assert_eq!(CellRef::parse("Z1").unwrap(), CellRef::new(25, 0));
        assert_eq!(CellRef::parse("AA1").unwrap(), CellRef::new(26, 0));
        assert_eq!(CellRef::parse("AZ1").unwrap(), CellRef::new(51, 0));
        assert_eq!(CellRef::parse("BA10").unwrap(), CellRef::new(52, 9));
    }

    #[test]
    fn test_encode_matches_display() {
        assert_eq!(CellRef::encode(0, 0), "A1");
        assert_eq!(CellRef::encode(0, 25), "Z1");
        assert_eq!(CellRef::encode(99, 26), "AA100");
        assert_eq!(CellRef::encode(4, 701), "ZZ5");
        assert_eq!(CellRef::encode(0, 702), "AAA1");
    }

    #[test]
    fn test_decode_inverts_encode() {
        for row in [0usize, 1, 9, 99, 1_048_575] {
            for col in [0usize, 1, 25, 26, 27, 51, 52, 701, 702, 16_383] {
                let text = CellRef::encode(row, col);
                assert_eq!(CellRef::parse(&text).unwrap(), CellRef::new(col, row), "{text}");
            }
        }
    }

    #[test]
    fn test_parse_rejects_malformed_addresses() {
        for bad in ["A", "1", "", "a1", "Ab1", "A1B", "A 1", "$A$1", "A-1", "A1:B2", " A1"] {
            assert!(
                matches!(CellRef::parse(bad), Err(EvalError::InvalidAddress(ref s)) if s == bad),
                "expected InvalidAddress for {bad:?}"
            );
        }
    }

    #[test]
    fn test_parse_row_zero_is_invalid() {
        assert!(CellRef::parse("A0").is_err());
    }

    #[test]
    fn test_parse_a1_overflow_is_invalid() {
        let huge = format!("{}1", "Z".repeat(40));
        assert!(CellRef::parse(&huge).is_err());
    }

    #[test]
    fn test_col_to_letters_handles_max_usize() {
        let letters = CellRef::col_to_letters(usize::MAX);
        assert!(!letters.is_empty());
        assert!(letters.chars().all(|c| c.is_ascii_uppercase()));
    }

    #[test]
    fn test_ordering_is_row_major() {
        let mut refs = vec![CellRef::new(0, 1), CellRef::new(2, 0), CellRef::new(1, 0)];
        refs.sort();
        assert_eq!(refs, vec![CellRef::new(1, 0), CellRef::new(2, 0), CellRef::new(0, 1)]);
    }
}
