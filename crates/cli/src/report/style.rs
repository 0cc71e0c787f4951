// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Workbook colors and cell formats.

use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, FormatPattern};

/// Fixed colors used across the workbook, as `0xRRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Detail sheet header fill (medium blue).
    pub detail_header: u32,
    /// Summary sheet header fill (dark blue).
    pub summary_header: u32,
    pub header_font: u32,
    /// Status fill for anything that did not fail.
    pub pass_fill: u32,
    pub fail_fill: u32,
    pub border: u32,
    pub font_name: &'static str,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            detail_header: 0x4F81BD,
            summary_header: 0x002060,
            header_font: 0xFFFFFF,
            pass_fill: 0x92D050,
            fail_fill: 0xFF0000,
            border: 0x000000,
            font_name: "Calibri",
        }
    }
}

/// Cell formats derived once from a [`Palette`].
#[derive(Debug, Clone)]
pub struct Styles {
    pub detail_header: Format,
    pub summary_header: Format,
    /// Thin-bordered body cell.
    pub cell: Format,
    /// Bold first cell of a suite group.
    pub suite_group: Format,
    pub status_passed: Format,
    pub status_failed: Format,
    /// Wrapped error text.
    pub error: Format,
    /// Centered summary value.
    pub summary_cell: Format,
}

impl Styles {
    pub fn new(palette: &Palette) -> Self {
        let cell = Format::new()
            .set_border(FormatBorder::Thin)
            .set_border_color(Color::RGB(palette.border));
        let status = cell.clone().set_align(FormatAlign::Center);

        Self {
            detail_header: header(palette, palette.detail_header),
            summary_header: header(palette, palette.summary_header),
            suite_group: cell.clone().set_bold().set_align(FormatAlign::VerticalCenter),
            status_passed: fill(status.clone(), palette.pass_fill),
            status_failed: fill(status, palette.fail_fill),
            error: cell.clone().set_text_wrap(),
            summary_cell: cell
                .clone()
                .set_font_name(palette.font_name)
                .set_align(FormatAlign::Center),
            cell,
        }
    }
}

impl Default for Styles {
    fn default() -> Self {
        Self::new(&Palette::default())
    }
}

fn header(palette: &Palette, background: u32) -> Format {
    fill(
        Format::new()
            .set_font_name(palette.font_name)
            .set_bold()
            .set_font_color(Color::RGB(palette.header_font))
            .set_align(FormatAlign::Center)
            .set_border(FormatBorder::Medium)
            .set_border_color(Color::RGB(palette.border)),
        background,
    )
}

fn fill(format: Format, color: u32) -> Format {
    format
        .set_pattern(FormatPattern::Solid)
        .set_background_color(Color::RGB(color))
}

#[cfg(test)]
#[path = "style_tests.rs"]
mod tests;
