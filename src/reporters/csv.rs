//! CSV reporter
//!
//! One row per check in checklist order. Opens directly in a spreadsheet.

use crate::models::AuditReport;
use anyhow::Result;
use std::io::{self, Write};

pub const HEADER: [&str; 7] = [
    "Category",
    "Priority",
    "Check Name",
    "Description",
    "Status",
    "Notes",
    "Link",
];

fn needs_quotes(field: &str) -> bool {
    field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Write a single CSV row to any writer
fn write_row<W: Write>(w: &mut W, row: &[&str]) -> io::Result<()> {
    for (i, cell) in row.iter().enumerate() {
        if i > 0 {
            write!(w, ",")?;
        }
        if needs_quotes(cell) {
            write!(w, "\"{}\"", cell.replace('"', "\"\""))?;
        } else {
            write!(w, "{}", cell)?;
        }
    }
    writeln!(w)
}

/// Render report as CSV
pub fn render(report: &AuditReport) -> Result<String> {
    let mut buf: Vec<u8> = Vec::new();
    write_row(&mut buf, &HEADER)?;

    for (category, check) in report.checks() {
        write_row(
            &mut buf,
            &[
                category.name.as_str(),
                check.importance.label(),
                check.name.as_str(),
                check.description.as_str(),
                check.status.label(),
                check.notes.as_deref().unwrap_or(""),
                check.link.as_deref().unwrap_or(""),
            ],
        )?;
    }

    Ok(String::from_utf8(buf)?)
}
