//! Run report and presentation interfaces.

use std::fmt;
use std::time::Duration;

use serde::Serialize;

use crate::executor::UnitOutcome;
use crate::summary::{serialize_millis, Summary};

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunOutcome {
    /// Every unit was launched and reported before aggregation.
    Completed,
    /// Cancellation cut the run short; the summary covers a subset.
    Partial,
    /// No unit completed successfully.
    Empty,
}

impl fmt::Display for RunOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Self::Completed => "completed",
            Self::Partial => "partial",
            Self::Empty => "empty",
        })
    }
}

/// Per-category counts of unit outcomes observed by the driver.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OutcomeTally {
    /// Units whose latency was recorded.
    pub completed: usize,
    /// Units that saw cancellation before starting.
    pub skipped_before_start: usize,
    /// Units abandoned mid-call.
    pub cancelled_in_flight: usize,
    /// Units whose collaborator call failed.
    pub failed: usize,
    /// Completions dropped as duplicates.
    pub duplicates: usize,
    /// Completions that arrived after aggregation began.
    pub late: usize,
}

impl OutcomeTally {
    /// Count one outcome.
    pub fn record(&mut self, outcome: &UnitOutcome) {
        match outcome {
            UnitOutcome::Completed { .. } => self.completed += 1,
            UnitOutcome::SkippedBeforeStart { .. } => self.skipped_before_start += 1,
            UnitOutcome::CancelledInFlight { .. } => self.cancelled_in_flight += 1,
            UnitOutcome::Failed { .. } => self.failed += 1,
            UnitOutcome::Duplicate { .. } => self.duplicates += 1,
            UnitOutcome::Late { .. } => self.late += 1,
        }
    }

    /// Total number of outcomes counted.
    #[must_use]
    pub fn total(&self) -> usize {
        self.completed
            + self.skipped_before_start
            + self.cancelled_in_flight
            + self.failed
            + self.duplicates
            + self.late
    }
}

/// Full account of one benchmark run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    /// Units requested.
    pub requested: usize,
    /// Units actually launched.
    pub launched: usize,
    /// Outcomes received before aggregation.
    pub outcomes: OutcomeTally,
    /// Whether cancellation interrupted the run.
    pub interrupted: bool,
    /// Wall-clock duration from first launch to the end of the wait.
    #[serde(rename = "total_ms", serialize_with = "serialize_millis")]
    pub total: Duration,
    /// Statistics over completed units; absent when none completed.
    pub summary: Option<Summary>,
}

impl RunReport {
    /// Classify the run.
    #[must_use]
    pub fn outcome(&self) -> RunOutcome {
        match (&self.summary, self.interrupted) {
            (None, _) => RunOutcome::Empty,
            (Some(_), true) => RunOutcome::Partial,
            (Some(_), false) => RunOutcome::Completed,
        }
    }

    /// Number of units with a recorded latency.
    #[must_use]
    pub fn completed(&self) -> usize {
        self.summary.as_ref().map_or(0, |s| s.count)
    }
}

/// Trait for presenting a finished run to the user.
pub trait RunPresenter: Send + Sync {
    /// Present the report. Called exactly once per run.
    fn present(&self, report: &RunReport);
}
