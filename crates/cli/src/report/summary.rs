// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! "Summary" sheet and the aggregate counts behind it.

use std::fmt;

use rust_xlsxwriter::{Worksheet, XlsxError};

use crate::record::TestResultRecord;

use super::style::Styles;
use super::{Column, sheet_row};

/// Worksheet name.
pub const SUMMARY_SHEET: &str = "Summary";

pub const SUMMARY_COLUMNS: [Column; 2] = [Column::new("Metric", 25.0), Column::new("Value", 15.0)];

/// Pass/fail counts over a result list.
///
/// Records that are neither `PASSED` nor `FAILED` count toward `total` only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SummaryStats {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
}

impl SummaryStats {
    pub fn from_records(records: &[TestResultRecord]) -> Self {
        records.iter().fold(Self::default(), |mut stats, record| {
            stats.total += 1;
            if record.status.is_passed() {
                stats.passed += 1;
            } else if record.status.is_failed() {
                stats.failed += 1;
            }
            stats
        })
    }

    /// `(metric, value)` rows in display order.
    pub fn rows(&self) -> [(&'static str, usize); 3] {
        [
            ("Total Tests", self.total),
            ("Passed Tests", self.passed),
            ("Failed Tests", self.failed),
        ]
    }

    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }

    /// Write the summary sheet.
    pub fn render(&self, sheet: &mut Worksheet, styles: &Styles) -> Result<(), XlsxError> {
        sheet.set_name(SUMMARY_SHEET)?;
        for (col, column) in (0u16..).zip(SUMMARY_COLUMNS.iter()) {
            sheet.set_column_width(col, column.width)?;
            sheet.write_string_with_format(0, col, column.header, &styles.summary_header)?;
        }
        sheet.set_freeze_panes(1, 0)?;

        for (idx, (metric, value)) in self.rows().into_iter().enumerate() {
            let row = sheet_row(idx)?;
            sheet.write_string_with_format(row, 0, metric, &styles.summary_cell)?;
            // Exact below 2^53.
            sheet.write_number_with_format(row, 1, value as f64, &styles.summary_cell)?;
        }
        Ok(())
    }
}

/// One-line digest: `Total Tests: N, Passed Tests: N, Failed Tests: N`.
impl fmt::Display for SummaryStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, (metric, value)) in self.rows().into_iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{metric}: {value}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "summary_tests.rs"]
mod tests;
