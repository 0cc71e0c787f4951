// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! "Test Results" sheet: one row per record, grouped by suite.
//!
//! Grouping is positional. A row starts a new group whenever its suite name
//! differs from the row directly above it, so `[A, A, B, A]` yields three
//! groups (`A`x2, `B`, `A`) rather than one `A` group of three.

use rust_xlsxwriter::{RowNum, Worksheet, XlsxError};

use crate::record::TestResultRecord;

use super::style::Styles;
use super::{Column, sheet_row};

/// Worksheet name.
pub const DETAIL_SHEET: &str = "Test Results";

/// Column headers and widths, in sheet order.
pub const DETAIL_COLUMNS: [Column; 4] = [
    Column::new("Suite Name", 25.0),
    Column::new("Test Name", 30.0),
    Column::new("Status", 15.0),
    Column::new("Error", 60.0),
];

/// Longest string a worksheet cell accepts, in characters.
pub const MAX_CELL_CHARS: usize = 32_767;

const SUITE_COL: u16 = 0;
const TEST_COL: u16 = 1;
const STATUS_COL: u16 = 2;
const ERROR_COL: u16 = 3;

/// `text` cut to at most [`MAX_CELL_CHARS`] characters.
pub fn cell_text(text: &str) -> &str {
    match text.char_indices().nth(MAX_CELL_CHARS) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

/// Where a row sits relative to the row above it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowPosition {
    /// First row, or suite differs from the previous row.
    GroupStart,
    SameAsPrevious,
}

/// Classify each record against its predecessor.
pub fn row_positions(records: &[TestResultRecord]) -> Vec<RowPosition> {
    let mut previous: Option<&str> = None;
    records
        .iter()
        .map(|record| {
            let current = record.suite_name.as_str();
            let position = if previous == Some(current) {
                RowPosition::SameAsPrevious
            } else {
                RowPosition::GroupStart
            };
            previous = Some(current);
            position
        })
        .collect()
}

/// A run of consecutive records sharing a suite name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuiteGroup {
    pub suite_name: String,
    /// Index of the first record in the group.
    pub first: usize,
    pub len: usize,
}

impl SuiteGroup {
    /// Index of the last record in the group.
    pub fn last(&self) -> usize {
        self.first + self.len - 1
    }

    /// Whether the suite cell spans more than one row.
    pub fn is_merged(&self) -> bool {
        self.len > 1
    }
}

/// Fold row positions into contiguous suite groups.
pub fn suite_groups(records: &[TestResultRecord]) -> Vec<SuiteGroup> {
    let mut groups: Vec<SuiteGroup> = Vec::new();
    for (idx, (record, position)) in records.iter().zip(row_positions(records)).enumerate() {
        match (position, groups.last_mut()) {
            (RowPosition::SameAsPrevious, Some(group)) => group.len += 1,
            _ => groups.push(SuiteGroup {
                suite_name: record.suite_name.clone(),
                first: idx,
                len: 1,
            }),
        }
    }
    groups
}

/// Row and merge plan for the detail sheet.
#[derive(Debug)]
pub struct DetailLayout<'a> {
    records: &'a [TestResultRecord],
    groups: Vec<SuiteGroup>,
}

impl<'a> DetailLayout<'a> {
    pub fn new(records: &'a [TestResultRecord]) -> Self {
        Self {
            records,
            groups: suite_groups(records),
        }
    }

    pub fn groups(&self) -> &[SuiteGroup] {
        &self.groups
    }

    pub fn row_count(&self) -> usize {
        self.records.len()
    }

    /// Write headers, body rows and suite merges into `sheet`.
    pub fn render(&self, sheet: &mut Worksheet, styles: &Styles) -> Result<(), XlsxError> {
        sheet.set_name(DETAIL_SHEET)?;
        for (col, column) in (0u16..).zip(DETAIL_COLUMNS.iter()) {
            sheet.set_column_width(col, column.width)?;
            sheet.write_string_with_format(0, col, column.header, &styles.detail_header)?;
        }
        sheet.set_freeze_panes(1, 0)?;

        for (idx, record) in self.records.iter().enumerate() {
            let row = sheet_row(idx)?;
            let status_format = if record.status.is_failed() {
                &styles.status_failed
            } else {
                &styles.status_passed
            };
            sheet.write_string_with_format(
                row,
                TEST_COL,
                cell_text(&record.test_name),
                &styles.cell,
            )?;
            sheet.write_string_with_format(
                row,
                STATUS_COL,
                record.status.as_str(),
                status_format,
            )?;
            sheet.write_string_with_format(
                row,
                ERROR_COL,
                cell_text(&record.error),
                &styles.error,
            )?;
        }

        for group in &self.groups {
            let first: RowNum = sheet_row(group.first)?;
            let suite_name = cell_text(&group.suite_name);
            if group.is_merged() {
                let last = sheet_row(group.last())?;
                sheet.merge_range(
                    first,
                    SUITE_COL,
                    last,
                    SUITE_COL,
                    suite_name,
                    &styles.suite_group,
                )?;
            } else {
                sheet.write_string_with_format(
                    first,
                    SUITE_COL,
                    suite_name,
                    &styles.suite_group,
                )?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "detail_tests.rs"]
mod tests;
