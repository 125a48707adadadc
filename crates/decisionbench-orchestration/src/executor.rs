//! Timed execution of a single work unit.

use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;

use tracing::{debug, info, warn};

use decisionbench_core::cancel::CancellationToken;
use decisionbench_core::decision::DecisionClient;
use decisionbench_core::unit::WorkUnit;

use crate::collector::{InsertOutcome, ResultCollector};

/// What happened to one work unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnitOutcome {
    /// Latency recorded in the collector.
    Completed {
        /// Unit index.
        index: usize,
        /// Elapsed milliseconds.
        elapsed_ms: u64,
    },
    /// Cancellation was already requested when the unit got to run.
    SkippedBeforeStart {
        /// Unit index.
        index: usize,
    },
    /// The collaborator observed cancellation mid-call.
    CancelledInFlight {
        /// Unit index.
        index: usize,
    },
    /// The collaborator failed (or panicked).
    Failed {
        /// Unit index.
        index: usize,
        /// Failure description.
        reason: String,
    },
    /// The index already had a recorded latency.
    Duplicate {
        /// Unit index.
        index: usize,
    },
    /// The collector was sealed before the result arrived.
    Late {
        /// Unit index.
        index: usize,
    },
}

/// Run unit `index` against `client`, recording its latency in `collector`.
///
/// Never panics and never returns an error: every failure mode maps to a
/// [`UnitOutcome`] without a recorded latency.
pub fn execute_unit(
    index: usize,
    ring: &str,
    client: &dyn DecisionClient,
    collector: &ResultCollector,
    cancel: &CancellationToken,
) -> UnitOutcome {
    if cancel.is_cancelled() {
        info!("Cancellation requested before iteration {index} started.");
        return UnitOutcome::SkippedBeforeStart { index };
    }

    let start = Instant::now();
    let (user_id, attributes) = WorkUnit::new(index, ring).into_parts();

    let evaluated = panic::catch_unwind(AssertUnwindSafe(|| {
        client
            .create_context(&user_id, attributes)?
            .evaluate_all(cancel)
    }));

    match evaluated {
        Ok(Ok(_decisions)) => {
            let elapsed_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
            info!("Iteration {index} took {elapsed_ms} ms");
            record(index, elapsed_ms, collector)
        }
        Ok(Err(e)) if e.is_cancellation() => {
            info!("Iteration {index} was canceled.");
            UnitOutcome::CancelledInFlight { index }
        }
        Ok(Err(e)) => {
            warn!(iteration = index, error = %e, "Iteration failed");
            UnitOutcome::Failed {
                index,
                reason: e.to_string(),
            }
        }
        Err(payload) => {
            let reason = panic_message(payload.as_ref());
            warn!(iteration = index, %reason, "Iteration panicked");
            UnitOutcome::Failed { index, reason }
        }
    }
}

fn record(index: usize, elapsed_ms: u64, collector: &ResultCollector) -> UnitOutcome {
    match collector.insert(index, elapsed_ms) {
        InsertOutcome::Inserted => UnitOutcome::Completed { index, elapsed_ms },
        InsertOutcome::Duplicate => {
            debug!(iteration = index, "Duplicate completion dropped");
            UnitOutcome::Duplicate { index }
        }
        InsertOutcome::Sealed => {
            debug!(iteration = index, "Completion arrived after aggregation began");
            UnitOutcome::Late { index }
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("collaborator panicked: {s}")
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("collaborator panicked: {s}")
    } else {
        "collaborator panicked".to_string()
    }
}
