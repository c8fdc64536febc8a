//! Console rendering of batch results.

use flagger_core::pipeline::Report;
use flagger_core::FlagSummary;
use storage::report::ReportPaths;

/// Flagged rows as an aligned three-column table.
pub fn flagged_table(report: &Report) -> String {
    let header = [report.field.column(), "flag", "reason"];
    let rows: Vec<[&str; 3]> = report
        .flagged()
        .map(|r| [r.value.as_str(), r.flag.as_str(), r.reason.as_str()])
        .collect();

    let mut widths = header.map(|h| h.chars().count());
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    for row in std::iter::once(&header).chain(rows.iter()) {
        let line = row
            .iter()
            .zip(widths)
            .map(|(cell, w)| format!("{cell:<w$}"))
            .collect::<Vec<_>>()
            .join("  ");
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

pub fn summary_lines(summary: &FlagSummary) -> String {
    let mut out = String::from("Flag Summary:\n");
    for (flag, count) in summary.iter() {
        out.push_str(&format!("{flag}: {count}\n"));
    }
    out
}

pub fn summary_json(report: &Report, paths: &ReportPaths) -> serde_json::Value {
    serde_json::json!({
        "status": "ok",
        "field": report.field,
        "total": report.records.len(),
        "flagged": report.flagged_count(),
        "summary": report.summary,
        "all_path": paths.all,
        "flagged_path": paths.flagged,
    })
}
