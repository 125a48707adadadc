//! Report formatting helpers.

use std::time::Duration;

use serde::Serialize;

use decisionbench_orchestration::interfaces::{RunOutcome, RunReport};
use decisionbench_orchestration::summary::Summary;

/// Format a duration for display.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn format_duration(d: Duration) -> String {
    let secs = d.as_secs_f64();
    if secs < 0.001 {
        format!("{:.2}µs", secs * 1_000_000.0)
    } else if secs < 1.0 {
        format!("{:.2}ms", secs * 1000.0)
    } else if secs < 60.0 {
        format!("{secs:.3}s")
    } else {
        let mins = (secs / 60.0).floor() as u64;
        let remaining = secs - (mins as f64 * 60.0);
        format!("{mins}m{remaining:.1}s")
    }
}

/// Format a count with thousand separators.
#[must_use]
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

/// One-line summary, used by quiet mode.
#[must_use]
pub fn format_summary_line(summary: &Summary) -> String {
    format!(
        "count={} avg={:.2}ms median={}ms min={}ms max={}ms total={}",
        summary.count,
        summary.average_ms,
        summary.median_ms,
        summary.min_ms,
        summary.max_ms,
        format_duration(summary.total),
    )
}

/// Explanation for a run without a summary.
#[must_use]
pub fn empty_run_message(report: &RunReport) -> String {
    format!(
        "No iterations completed successfully ({} of {} launched).",
        format_number(report.launched),
        format_number(report.requested)
    )
}

#[derive(Serialize)]
struct JsonReport<'a> {
    outcome: RunOutcome,
    #[serde(flatten)]
    report: &'a RunReport,
}

/// Serialize a report as pretty JSON, tagged with its outcome.
pub fn report_json(report: &RunReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&JsonReport {
        outcome: report.outcome(),
        report,
    })
}
