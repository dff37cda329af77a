//! # Report Rendering
//!
//! Turns a [`Report`] into terminal text or CSV.
//!
//! Rows carrying a status tone are highlighted when color is on:
//! EXPIRED red, CRITICAL yellow, SAFE green.

use std::io::Write;
use std::path::Path;

use pex_core::report::Report;
use pex_core::ExpiryStatus;

use crate::error::AppResult;

const RESET: &str = "\x1b[0m";

fn tone_color(status: ExpiryStatus) -> &'static str {
    match status {
        ExpiryStatus::Expired => "\x1b[1;31m",
        ExpiryStatus::Critical => "\x1b[1;33m",
        ExpiryStatus::Safe => "\x1b[32m",
    }
}

/// Renders the report as an aligned text table.
pub fn render_table(report: &Report, color: bool) -> String {
    let mut widths: Vec<usize> = report.columns.iter().map(|c| c.chars().count()).collect();
    for row in &report.rows {
        for (i, cell) in row.cells.iter().enumerate() {
            if let Some(width) = widths.get_mut(i) {
                *width = (*width).max(cell.chars().count());
            }
        }
    }

    let line = |cells: &[String]| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, &width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = String::new();
    out.push_str(&report.title);
    out.push('\n');
    out.push_str(&report.subtitle);
    out.push_str("\n\n");

    let header = line(&report.columns);
    let rule = "-".repeat(header.chars().count());
    out.push_str(&header);
    out.push('\n');
    out.push_str(&rule);
    out.push('\n');

    for row in &report.rows {
        let text = line(&row.cells);
        match row.tone {
            Some(status) if color => {
                out.push_str(tone_color(status));
                out.push_str(&text);
                out.push_str(RESET);
            }
            _ => out.push_str(&text),
        }
        out.push('\n');
    }

    out.push_str(&rule);
    out.push('\n');
    out.push_str(&report.footer);
    out.push('\n');
    out
}

/// Writes header + rows as CSV.
pub fn write_csv<W: Write>(report: &Report, writer: W) -> AppResult<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(&report.columns)?;
    for row in &report.rows {
        csv.write_record(&row.cells)?;
    }
    csv.flush()?;
    Ok(())
}

/// Writes the report as a CSV file.
pub fn write_csv_file(report: &Report, path: &Path) -> AppResult<()> {
    let file = std::fs::File::create(path)?;
    write_csv(report, file)
}
