//! Spreadsheet column letters (`A`, `Z`, `AA`, `IL`, ...) and cell addresses.

use std::fmt;

use crate::error::{PhppError, Result};

/// One-based index of a column: `A` is 1, `Z` 26, `AA` 27.
pub fn col_index(letters: &str) -> Result<u32> {
    if letters.is_empty() || letters.len() > 3 {
        return Err(PhppError::InvalidColumn(letters.to_string()));
    }
    letters.chars().try_fold(0u32, |acc, c| {
        if !c.is_ascii_alphabetic() {
            return Err(PhppError::InvalidColumn(letters.to_string()));
        }
        let digit = c.to_ascii_uppercase() as u32 - 'A' as u32 + 1;
        Ok(acc * 26 + digit)
    })
}

/// Letters of the one-based column `index`. Zero has no letters.
pub fn col_letters(mut index: u32) -> String {
    let mut letters = Vec::new();
    while index > 0 {
        let rem = (index - 1) % 26;
        letters.push((b'A' + rem as u8) as char);
        index = (index - 1) / 26;
    }
    letters.iter().rev().collect()
}

/// `letters` moved `offset` columns to the right (left when negative).
pub fn col_offset(letters: &str, offset: i64) -> Result<String> {
    let index = i64::from(col_index(letters)?) + offset;
    if index < 1 {
        return Err(PhppError::ColumnOutOfRange {
            column: letters.to_string(),
            offset,
        });
    }
    Ok(col_letters(index as u32))
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CellRef {
    pub column: String,
    pub row: u32,
}

impl CellRef {
    pub fn new(column: impl Into<String>, row: u32) -> Self {
        Self {
            column: column.into(),
            row,
        }
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.column, self.row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_and_indices() {
        assert_eq!(col_index("A").unwrap(), 1);
        assert_eq!(col_index("Z").unwrap(), 26);
        assert_eq!(col_index("AA").unwrap(), 27);
        assert_eq!(col_index("il").unwrap(), 246);
        assert_eq!(col_letters(26), "Z");
        assert_eq!(col_letters(27), "AA");
        assert_eq!(col_letters(262), "JB");
        assert_eq!(col_letters(0), "");
    }

    #[test]
    fn offsets_cross_letter_boundaries() {
        assert_eq!(col_offset("Z", 1).unwrap(), "AA");
        assert_eq!(col_offset("AB", -2).unwrap(), "Z");
        assert_eq!(col_offset("IL", 16).unwrap(), "JB");
        assert!(col_offset("A", -1).is_err());
    }

    #[test]
    fn rejects_bad_letters() {
        assert!(col_index("").is_err());
        assert!(col_index("A1").is_err());
    }

    #[test]
    fn cell_display() {
        assert_eq!(CellRef::new("IL", 12).to_string(), "IL12");
    }
}
