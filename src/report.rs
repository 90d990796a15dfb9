//! Render the four result tables as labeled sections.

use std::io::Write;

use crate::error::ReportError;
use crate::frame::Frame;
use crate::pipeline::Report;

/// Write the four tables in their fixed order, each preceded by its label.
pub fn write_report<W: Write>(out: &mut W, report: &Report) -> Result<(), ReportError> {
    write_section(out, "Total Purchases by Category:", &report.total_by_category)?;
    write_section(
        out,
        "Total Purchases by Category (Age 18-25):",
        &report.total_by_category_age_18_25,
    )?;
    write_section(
        out,
        "Percentage by Category (Age 18-25):",
        &report.percentage_by_category_age_18_25,
    )?;
    write_section(
        out,
        "Top 3 Categories by Percentage (Age 18-25):",
        &report.top_categories,
    )?;
    Ok(())
}

fn write_section<W: Write>(out: &mut W, label: &str, table: &Frame) -> Result<(), ReportError> {
    writeln!(out, "{label}")?;
    writeln!(out, "{table}")?;
    Ok(())
}
