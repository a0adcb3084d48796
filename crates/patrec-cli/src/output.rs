//! Report rendering

use crate::error::Result;
use patrec::experiment::MethodReport;
use std::io::Write;

/// Human-readable block for one report: a header line, a summary line and
/// the confusion table.
pub(crate) fn render_text(report: &MethodReport) -> String {
    let confusion = &report.confusion;
    format!(
        "=== {} | {} features | train {} -> eval {} ===\nerrors: {} / {} (accuracy {:.2}%)\n{}",
        report.name,
        report.features,
        report.train_dataset,
        report.dataset,
        confusion.error_count(),
        confusion.total(),
        confusion.accuracy() * 100.0,
        confusion
    )
}

/// Writes every report, as text blocks or as JSON lines.
pub(crate) fn write_reports<W: Write>(out: &mut W, reports: &[MethodReport], json: bool) -> Result<()> {
    for report in reports {
        if json {
            serde_json::to_writer(&mut *out, report)?;
            writeln!(out)?;
        } else {
            writeln!(out, "{}", render_text(report))?;
        }
    }
    out.flush()?;
    Ok(())
}
