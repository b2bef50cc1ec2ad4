//! Spreadsheet adapter: the cell-level operations the PHPP writer needs
//! from whatever application hosts the workbook.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::ops::{Deref, DerefMut, RangeInclusive};

use log::{debug, warn};

use crate::column::CellRef;
use crate::error::{PhppError, Result};

#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Number(f64),
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(s) => s.trim().is_empty(),
            Self::Number(_) => false,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse().ok(),
            Self::Empty => None,
        }
    }
}

/// Whole numbers print without a fractional part, so an ID prefix cell
/// holding `3` reads back as `"3"`.
impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Text(s) => f.write_str(s),
            Self::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => write!(f, "{}", *n as i64),
            Self::Number(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<u32> for CellValue {
    fn from(n: u32) -> Self {
        Self::Number(n.into())
    }
}

impl From<i32> for CellValue {
    fn from(n: i32) -> Self {
        Self::Number(n.into())
    }
}

/// Option cells take `"yes"` or `"no"`.
impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        Self::Text(if b { "yes" } else { "no" }.to_string())
    }
}

/// One pending cell write.
#[derive(Debug, Clone, PartialEq)]
pub struct XlItem {
    pub sheet: String,
    pub cell: CellRef,
    pub value: CellValue,
}

impl XlItem {
    pub fn new(sheet: &str, column: &str, row: u32, value: impl Into<CellValue>) -> Self {
        Self {
            sheet: sheet.to_string(),
            cell: CellRef::new(column, row),
            value: value.into(),
        }
    }
}

/// Access to an open workbook.
pub trait Workbook {
    fn read(&self, sheet: &str, cell: &CellRef) -> Result<CellValue>;

    fn write(&mut self, item: &XlItem) -> Result<()>;

    /// Values of `column` over `rows`, in order.
    fn read_column(&self, sheet: &str, column: &str, rows: RangeInclusive<u32>) -> Result<Vec<CellValue>> {
        rows.map(|row| self.read(sheet, &CellRef::new(column, row)))
            .collect()
    }

    /// Suspend (or resume) screen refresh and automatic calculation.
    fn set_silent(&mut self, silent: bool) -> Result<()>;

    fn recalculate(&mut self) -> Result<()>;
}

/// Keeps the workbook silent while alive. Dropping it, on any exit path,
/// resumes refresh and runs one recalculation.
pub struct SilentMode<'w, W: Workbook + ?Sized> {
    workbook: &'w mut W,
}

impl<'w, W: Workbook + ?Sized> SilentMode<'w, W> {
    pub fn new(workbook: &'w mut W) -> Result<Self> {
        workbook.set_silent(true)?;
        Ok(Self { workbook })
    }
}

impl<W: Workbook + ?Sized> Deref for SilentMode<'_, W> {
    type Target = W;

    fn deref(&self) -> &W {
        self.workbook
    }
}

impl<W: Workbook + ?Sized> DerefMut for SilentMode<'_, W> {
    fn deref_mut(&mut self) -> &mut W {
        self.workbook
    }
}

impl<W: Workbook + ?Sized> Drop for SilentMode<'_, W> {
    fn drop(&mut self) {
        if let Err(e) = self.workbook.set_silent(false) {
            warn!("Failed to leave silent mode: {e}");
        }
        if let Err(e) = self.workbook.recalculate() {
            warn!("Workbook recalculation failed: {e}");
        }
    }
}

/// Sparse in-memory workbook.
#[derive(Debug, Clone, Default)]
pub struct InMemoryWorkbook {
    sheets: BTreeSet<String>,
    cells: BTreeMap<(String, String, u32), CellValue>,
    silent: bool,
    silent_transitions: Vec<bool>,
    recalculations: usize,
}

impl InMemoryWorkbook {
    pub fn new<I, S>(sheets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            sheets: sheets.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// Set a cell directly, creating the sheet if needed.
    pub fn set(&mut self, sheet: &str, column: &str, row: u32, value: impl Into<CellValue>) {
        self.sheets.insert(sheet.to_string());
        self.cells
            .insert((sheet.to_string(), column.to_string(), row), value.into());
    }

    pub fn get(&self, sheet: &str, column: &str, row: u32) -> CellValue {
        self.cells
            .get(&(sheet.to_string(), column.to_string(), row))
            .cloned()
            .unwrap_or_default()
    }

    pub fn is_silent(&self) -> bool {
        self.silent
    }

    /// Every `set_silent` call, in order.
    pub fn silent_transitions(&self) -> &[bool] {
        &self.silent_transitions
    }

    pub fn recalculations(&self) -> usize {
        self.recalculations
    }

    fn check_sheet(&self, sheet: &str) -> Result<()> {
        if self.sheets.contains(sheet) {
            Ok(())
        } else {
            Err(PhppError::UnknownSheet(sheet.to_string()))
        }
    }
}

impl Workbook for InMemoryWorkbook {
    fn read(&self, sheet: &str, cell: &CellRef) -> Result<CellValue> {
        self.check_sheet(sheet)?;
        Ok(self.get(sheet, &cell.column, cell.row))
    }

    fn write(&mut self, item: &XlItem) -> Result<()> {
        self.check_sheet(&item.sheet)?;
        debug!("{}!{} = {:?}", item.sheet, item.cell, item.value);
        let key = (item.sheet.clone(), item.cell.column.clone(), item.cell.row);
        if item.value == CellValue::Empty {
            self.cells.remove(&key);
        } else {
            self.cells.insert(key, item.value.clone());
        }
        Ok(())
    }

    fn set_silent(&mut self, silent: bool) -> Result<()> {
        self.silent = silent;
        self.silent_transitions.push(silent);
        Ok(())
    }

    fn recalculate(&mut self) -> Result<()> {
        self.recalculations += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_sheet_is_an_error() {
        let wb = InMemoryWorkbook::new(["Areas"]);
        let err = wb.read("Windows", &CellRef::new("A", 1)).unwrap_err();
        assert_eq!(err.to_string(), "Unknown worksheet 'Windows'");
    }

    #[test]
    fn write_then_read_column() {
        let mut wb = InMemoryWorkbook::new(["Areas"]);
        wb.write(&XlItem::new("Areas", "L", 2, "Wall")).unwrap();
        wb.write(&XlItem::new("Areas", "L", 3, 4.5)).unwrap();
        let column = wb.read_column("Areas", "L", 1..=3).unwrap();
        assert_eq!(
            column,
            [CellValue::Empty, CellValue::from("Wall"), CellValue::Number(4.5)]
        );
    }

    #[test]
    fn silent_mode_resumes_on_error_paths() {
        let mut wb = InMemoryWorkbook::new(["Areas"]);
        let result: Result<()> = (|| {
            let mut silent = SilentMode::new(&mut wb)?;
            assert!(silent.is_silent());
            silent.write(&XlItem::new("Nope", "A", 1, 1.0))?;
            Ok(())
        })();
        assert!(result.is_err());
        assert!(!wb.is_silent());
        assert_eq!(wb.silent_transitions(), [true, false]);
        assert_eq!(wb.recalculations(), 1);
    }

    #[test]
    fn display_of_whole_numbers() {
        assert_eq!(CellValue::Number(3.0).to_string(), "3");
        assert_eq!(CellValue::Number(0.5).to_string(), "0.5");
        assert_eq!(CellValue::from("01ud").to_string(), "01ud");
    }

    #[test]
    fn bools_become_option_strings() {
        assert_eq!(CellValue::from(true), CellValue::from("yes"));
        assert_eq!(CellValue::from(false), CellValue::from("no"));
    }
}
