// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Tabular report builder.
//!
//! Turns a merged result list into a two-sheet workbook ("Test Results" and
//! "Summary") plus a one-line text digest. A builder serves exactly one
//! report: both sheets are built (in either order), then [`ReportBuilder::emit`]
//! consumes it. "Test Results" is always the first sheet of the workbook.

mod detail;
mod style;
mod summary;
mod text;

use std::path::{Path, PathBuf};
use std::time::Duration;

use rust_xlsxwriter::{RowNum, Workbook, Worksheet, XlsxError};

use crate::error::{Error, Result};
use crate::ingest::Ingestion;
use crate::record::TestResultRecord;
use crate::write::{DEFAULT_WRITE_TIMEOUT, write_file};

pub use detail::{
    DETAIL_COLUMNS, DETAIL_SHEET, DetailLayout, MAX_CELL_CHARS, RowPosition, SuiteGroup,
    cell_text, row_positions, suite_groups,
};
pub use style::{Palette, Styles};
pub use summary::{SUMMARY_COLUMNS, SUMMARY_SHEET, SummaryStats};
pub use text::{TEXT_SUMMARY_FILE, write_text_summary};

/// A sheet column: header text and width in character units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Column {
    pub header: &'static str,
    pub width: f64,
}

impl Column {
    pub const fn new(header: &'static str, width: f64) -> Self {
        Self { header, width }
    }
}

/// Sheet row for the record at `index` (row 0 holds the header).
pub(crate) fn sheet_row(index: usize) -> std::result::Result<RowNum, XlsxError> {
    index
        .checked_add(1)
        .and_then(|row| RowNum::try_from(row).ok())
        .ok_or(XlsxError::RowColumnLimitError)
}

/// Builds and writes one workbook.
pub struct ReportBuilder {
    results: Vec<TestResultRecord>,
    styles: Styles,
    detail: Option<Worksheet>,
    summary: Option<Worksheet>,
    write_timeout: Duration,
}

impl ReportBuilder {
    /// Start from already merged records.
    pub fn from_records(results: Vec<TestResultRecord>) -> Self {
        Self {
            results,
            styles: Styles::default(),
            detail: None,
            summary: None,
            write_timeout: DEFAULT_WRITE_TIMEOUT,
        }
    }

    /// Start from the output of [`crate::ingest::ingest_dir`].
    pub fn from_ingestion(ingestion: Ingestion) -> Self {
        Self::from_records(ingestion.records)
    }

    pub fn with_palette(mut self, palette: &Palette) -> Self {
        self.styles = Styles::new(palette);
        self
    }

    pub fn with_write_timeout(mut self, timeout: Duration) -> Self {
        self.write_timeout = timeout;
        self
    }

    pub fn results(&self) -> &[TestResultRecord] {
        &self.results
    }

    /// Counts over the current result list.
    pub fn stats(&self) -> SummaryStats {
        SummaryStats::from_records(&self.results)
    }

    /// Add the "Test Results" sheet. Building it twice is an error.
    pub fn build_detail_sheet(&mut self) -> Result<()> {
        if self.detail.is_some() {
            return Err(Error::Internal(format!("{DETAIL_SHEET} sheet already built")));
        }
        let layout = DetailLayout::new(&self.results);
        let mut sheet = Worksheet::new();
        layout
            .render(&mut sheet, &self.styles)
            .map_err(|source| Error::Sheet {
                sheet: DETAIL_SHEET,
                source,
            })?;
        tracing::debug!(
            rows = layout.row_count(),
            groups = layout.groups().len(),
            "detail sheet built"
        );
        self.detail = Some(sheet);
        Ok(())
    }

    /// Add the "Summary" sheet. Building it twice is an error.
    pub fn build_summary_sheet(&mut self) -> Result<()> {
        if self.summary.is_some() {
            return Err(Error::Internal(format!("{SUMMARY_SHEET} sheet already built")));
        }
        let stats = self.stats();
        let mut sheet = Worksheet::new();
        stats
            .render(&mut sheet, &self.styles)
            .map_err(|source| Error::Sheet {
                sheet: SUMMARY_SHEET,
                source,
            })?;
        tracing::debug!(%stats, "summary sheet built");
        self.summary = Some(sheet);
        Ok(())
    }

    /// Build whichever sheets are still missing.
    pub fn build_all(&mut self) -> Result<()> {
        if self.detail.is_none() {
            self.build_detail_sheet()?;
        }
        if self.summary.is_none() {
            self.build_summary_sheet()?;
        }
        Ok(())
    }

    /// Serialize the finished workbook to memory.
    pub fn to_buffer(self) -> Result<Vec<u8>> {
        let detail = self.detail.ok_or(Error::ReportIncomplete {
            missing: DETAIL_SHEET,
        })?;
        let summary = self.summary.ok_or(Error::ReportIncomplete {
            missing: SUMMARY_SHEET,
        })?;

        let mut workbook = Workbook::new();
        workbook.push_worksheet(detail);
        workbook.push_worksheet(summary);
        workbook
            .save_to_buffer()
            .map_err(|source| Error::Xlsx {
                path: PathBuf::from("<buffer>"),
                source,
            })
    }

    /// Write the finished workbook to `path`, creating parent directories.
    pub fn emit(self, path: &Path) -> Result<PathBuf> {
        let timeout = self.write_timeout;
        let bytes = self.to_buffer().map_err(|e| match e {
            Error::Xlsx { source, .. } => Error::Xlsx {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| Error::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        write_file(path, bytes, timeout)?;
        tracing::info!(path = %path.display(), "spreadsheet report written");
        Ok(path.to_path_buf())
    }

    /// Write the one-line digest to `<dir>/test-summary.txt`.
    pub fn emit_text_summary(&self, dir: &Path) -> Result<PathBuf> {
        write_text_summary(dir, &self.stats(), self.write_timeout)
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
