//! Run presenters: structured log lines, stdout, and JSON.

use tracing::{info, warn};

use decisionbench_orchestration::interfaces::{RunPresenter, RunReport};

use crate::output::{
    empty_run_message, format_duration, format_number, format_summary_line, report_json,
};

/// Presents the run as informational log events.
pub struct LogPresenter;

impl RunPresenter for LogPresenter {
    fn present(&self, report: &RunReport) {
        if report.interrupted {
            info!("Cancellation requested before completion.");
        }

        let Some(summary) = &report.summary else {
            info!(
                launched = report.launched,
                requested = report.requested,
                "No iterations completed successfully."
            );
            return;
        };

        info!(
            "Finished running {} iterations after {} ms",
            summary.count,
            summary.total.as_millis()
        );
        info!("Average time per iteration: {} ms", summary.average_ms);
        info!("Median time per iteration: {} ms", summary.median_ms);
        info!("Fastest time per iteration: {} ms", summary.min_ms);
        info!("Slowest time per iteration: {} ms", summary.max_ms);

        let outcomes = &report.outcomes;
        if outcomes.failed > 0 || outcomes.cancelled_in_flight > 0 {
            warn!(
                failed = outcomes.failed,
                cancelled_in_flight = outcomes.cancelled_in_flight,
                skipped_before_start = outcomes.skipped_before_start,
                "Some iterations did not complete"
            );
        }
    }
}

/// Human-readable stdout presenter.
pub struct CliPresenter {
    verbose: bool,
    quiet: bool,
}

impl CliPresenter {
    #[must_use]
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self { verbose, quiet }
    }

    /// Render the report as it would be printed.
    #[must_use]
    pub fn render(&self, report: &RunReport) -> String {
        if self.quiet {
            let mut line = report
                .summary
                .as_ref()
                .map_or_else(|| empty_run_message(report), format_summary_line);
            if report.interrupted {
                line.push_str(" interrupted=true");
            }
            line.push('\n');
            return line;
        }

        let mut out = String::new();
        if report.interrupted {
            out.push_str("Run interrupted before completion.\n");
        }

        let Some(summary) = &report.summary else {
            out.push_str(&empty_run_message(report));
            out.push('\n');
            return out;
        };

        out.push_str(&format!(
            "Completed: {} of {} iterations in {}\n",
            format_number(report.completed()),
            format_number(report.requested),
            format_duration(summary.total)
        ));
        out.push_str(&format!("{:-<44}\n", ""));
        out.push_str(&format!("  {:<10} {:>12.2} ms\n", "average", summary.average_ms));
        out.push_str(&format!("  {:<10} {:>12} ms\n", "median", summary.median_ms));
        out.push_str(&format!("  {:<10} {:>12} ms\n", "fastest", summary.min_ms));
        out.push_str(&format!("  {:<10} {:>12} ms\n", "slowest", summary.max_ms));

        if self.verbose {
            let o = &report.outcomes;
            out.push_str(&format!("{:-<44}\n", ""));
            out.push_str(&format!("  {:<22} {:>8}\n", "outcome", report.outcome()));
            out.push_str(&format!("  {:<22} {:>8}\n", "launched", report.launched));
            out.push_str(&format!("  {:<22} {:>8}\n", "failed", o.failed));
            out.push_str(&format!("  {:<22} {:>8}\n", "cancelled in flight", o.cancelled_in_flight));
            out.push_str(&format!("  {:<22} {:>8}\n", "skipped before start", o.skipped_before_start));
            out.push_str(&format!("  {:<22} {:>8}\n", "duplicates", o.duplicates));
            out.push_str(&format!("  {:<22} {:>8}\n", "late", o.late));
        }
        out
    }
}

impl RunPresenter for CliPresenter {
    fn present(&self, report: &RunReport) {
        print!("{}", self.render(report));
    }
}

/// Prints the report as pretty JSON on stdout.
pub struct JsonPresenter;

impl RunPresenter for JsonPresenter {
    fn present(&self, report: &RunReport) {
        match report_json(report) {
            Ok(json) => println!("{json}"),
            Err(e) => eprintln!("Error: failed to serialize report: {e}"),
        }
    }
}
