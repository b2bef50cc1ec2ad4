//! Anchor-based discovery of input blocks, cached per worksheet.

use std::collections::HashMap;

use log::debug;

use crate::error::{PhppError, Result};
use crate::shape::BlockLocator;
use crate::xl::Workbook;

/// Rows of a located block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockRows {
    pub header_row: u32,
    pub first_entry_row: u32,
}

/// Located blocks, per sheet, until the sheet is invalidated.
#[derive(Debug, Clone, Default)]
pub struct ShapeLocator {
    /// sheet -> (header column, anchor) -> rows
    cache: HashMap<String, HashMap<(String, String), BlockRows>>,
}

impl ShapeLocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn locate<W: Workbook + ?Sized>(
        &mut self,
        workbook: &W,
        sheet: &str,
        locator: &BlockLocator,
    ) -> Result<BlockRows> {
        let key = (locator.header_col.clone(), locator.header_anchor.clone());
        if let Some(rows) = self.cache.get(sheet).and_then(|blocks| blocks.get(&key)) {
            return Ok(*rows);
        }

        let header_row = find_header_row(workbook, sheet, locator)?;
        let first_entry_row = find_first_entry_row(workbook, sheet, locator, header_row)?;
        let rows = BlockRows {
            header_row,
            first_entry_row,
        };
        debug!(
            "Located '{}' on {sheet}: header row {header_row}, first entry row {first_entry_row}",
            locator.header_anchor
        );
        self.cache
            .entry(sheet.to_string())
            .or_default()
            .insert(key, rows);
        Ok(rows)
    }

    pub fn is_cached(&self, sheet: &str, locator: &BlockLocator) -> bool {
        let key = (locator.header_col.clone(), locator.header_anchor.clone());
        self.cache
            .get(sheet)
            .is_some_and(|blocks| blocks.contains_key(&key))
    }

    /// Forget every block on `sheet`.
    pub fn invalidate(&mut self, sheet: &str) {
        self.cache.remove(sheet);
    }

    pub fn invalidate_all(&mut self) {
        self.cache.clear();
    }
}

fn find_header_row<W: Workbook + ?Sized>(
    workbook: &W,
    sheet: &str,
    locator: &BlockLocator,
) -> Result<u32> {
    let column = workbook.read_column(sheet, &locator.header_col, 1..=locator.header_search_rows)?;
    column
        .iter()
        .position(|v| v.as_text().map(str::trim) == Some(locator.header_anchor.as_str()))
        .map(|i| i as u32 + 1)
        .ok_or_else(|| PhppError::ShapeNotFound {
            sheet: sheet.to_string(),
            column: locator.header_col.clone(),
            anchor: locator.header_anchor.clone(),
        })
}

fn find_first_entry_row<W: Workbook + ?Sized>(
    workbook: &W,
    sheet: &str,
    locator: &BlockLocator,
    header_row: u32,
) -> Result<u32> {
    let first = header_row + 1;
    let last = header_row + locator.entry_search_rows;
    let column = workbook.read_column(sheet, &locator.entry_col, first..=last)?;
    column
        .iter()
        .position(|v| locator.entry_marker.matches(v))
        .map(|i| first + i as u32)
        .ok_or_else(|| PhppError::EntryRowNotFound {
            sheet: sheet.to_string(),
            column: locator.entry_col.clone(),
            anchor: locator.header_anchor.clone(),
            header_row,
        })
}
