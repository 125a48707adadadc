//! Error handling and exit codes.

use decisionbench_core::constants::exit_codes;
use decisionbench_core::error::BenchError;
use decisionbench_orchestration::interfaces::RunReport;

/// Exit code for an error that aborted the application.
pub fn handle_error(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<BenchError>() {
        Some(BenchError::Config(_)) => exit_codes::ERROR_CONFIG,
        Some(BenchError::Pool(_)) | None => exit_codes::ERROR_GENERIC,
    }
}

/// Exit code for a finished run.
///
/// A run cut short by cancellation exits with the cancellation code even
/// though its partial summary was reported.
pub fn report_exit_code(report: &RunReport, cancelled: bool) -> i32 {
    if report.interrupted && cancelled {
        exit_codes::ERROR_CANCELED
    } else {
        exit_codes::SUCCESS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use decisionbench_orchestration::interfaces::OutcomeTally;

    fn report(interrupted: bool) -> RunReport {
        RunReport {
            requested: 2,
            launched: 2,
            outcomes: OutcomeTally::default(),
            interrupted,
            total: Duration::ZERO,
            summary: None,
        }
    }

    #[test]
    fn error_codes() {
        assert_eq!(handle_error(&BenchError::Config("bad".into()).into()), 4);
        assert_eq!(handle_error(&BenchError::Pool("no threads".into()).into()), 1);
        assert_eq!(handle_error(&anyhow::anyhow!("other")), 1);
    }

    #[test]
    fn run_codes() {
        assert_eq!(report_exit_code(&report(false), false), 0);
        assert_eq!(report_exit_code(&report(true), true), 130);
        // Empty but uninterrupted runs are not failures.
        assert_eq!(report_exit_code(&report(false), true), 0);
    }
}
