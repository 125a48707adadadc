//! Batch driver: concurrent fan-out, completion-vs-cancellation race, aggregation.

use std::sync::Arc;
use std::time::Instant;

use crossbeam_channel::select;
use tracing::{debug, info};

use decisionbench_core::cancel::CancellationToken;
use decisionbench_core::constants::{DEFAULT_ITERATIONS, DEFAULT_RING};
use decisionbench_core::decision::DecisionClient;
use decisionbench_core::error::BenchError;

use crate::collector::ResultCollector;
use crate::executor::{execute_unit, UnitOutcome};
use crate::interfaces::{OutcomeTally, RunReport};
use crate::summary::Summary;

/// Settings for one batch run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchConfig {
    /// Number of work units to launch.
    pub iterations: usize,
    /// Upper bound on concurrently executing units. `None` runs every unit
    /// on its own worker (full fan-out).
    pub concurrency: Option<usize>,
    /// Classification tag attached to every unit.
    pub ring: String,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            concurrency: None,
            ring: DEFAULT_RING.to_string(),
        }
    }
}

impl BatchConfig {
    /// Number of worker threads the run will use.
    #[must_use]
    pub fn worker_count(&self) -> usize {
        let fan_out = self.iterations.max(1);
        self.concurrency.map_or(fan_out, |limit| limit.clamp(1, fan_out))
    }

    /// Validate the settings.
    pub fn validate(&self) -> Result<(), BenchError> {
        if self.concurrency == Some(0) {
            return Err(BenchError::Config("concurrency must be at least 1".into()));
        }
        if self.ring.trim().is_empty() {
            return Err(BenchError::Config("ring must not be empty".into()));
        }
        Ok(())
    }
}

/// Driver phases, in order. A run never re-enters a phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    /// Not started.
    Idle,
    /// Launching units.
    Dispatching,
    /// Waiting for all units or cancellation.
    Racing,
    /// Computing the summary.
    Aggregating,
    /// Finished.
    Done,
}

/// Which side of the wait race won.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RaceWinner {
    AllDone,
    Cancelled,
}

/// Runs a batch of work units against a decision client.
///
/// Single-shot: [`run`](Self::run) consumes the driver.
pub struct BatchDriver {
    config: BatchConfig,
    client: Arc<dyn DecisionClient>,
    cancel: CancellationToken,
    phase: RunPhase,
}

impl BatchDriver {
    /// Create a driver.
    #[must_use]
    pub fn new(
        config: BatchConfig,
        client: Arc<dyn DecisionClient>,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            config,
            client,
            cancel,
            phase: RunPhase::Idle,
        }
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    fn enter(&mut self, phase: RunPhase) {
        debug!(from = ?self.phase, to = ?phase, "Driver phase change");
        self.phase = phase;
    }

    /// Run the batch and report whatever subset completed.
    ///
    /// Cancellation is a normal outcome, reflected in
    /// [`RunReport::interrupted`]. Errors are only returned for invalid
    /// settings or when the worker pool cannot be built.
    pub fn run(mut self) -> Result<RunReport, BenchError> {
        self.config.validate()?;
        let requested = self.config.iterations;
        let workers = self.config.worker_count();

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("decisionbench-unit-{i}"))
            .build()
            .map_err(|e| BenchError::Pool(e.to_string()))?;

        info!(
            client = self.client.name(),
            workers, "Running {requested} iterations, with timing output at the end..."
        );

        let collector = Arc::new(ResultCollector::with_capacity(requested));
        let ring: Arc<str> = Arc::from(self.config.ring.as_str());
        let (tx, rx) = crossbeam_channel::unbounded::<UnitOutcome>();

        self.enter(RunPhase::Dispatching);
        let start = Instant::now();
        let mut launched = 0usize;
        for index in 0..requested {
            if self.cancel.is_cancelled() {
                info!(
                    launched,
                    requested, "Cancellation requested; remaining iterations not launched."
                );
                break;
            }
            let tx = tx.clone();
            let client = Arc::clone(&self.client);
            let collector = Arc::clone(&collector);
            let cancel = self.cancel.clone();
            let ring = Arc::clone(&ring);
            pool.spawn(move || {
                let outcome = execute_unit(index, &ring, client.as_ref(), &collector, &cancel);
                // The driver stops listening once aggregation begins.
                let _ = tx.send(outcome);
            });
            launched += 1;
        }
        drop(tx);

        self.enter(RunPhase::Racing);
        let mut tally = OutcomeTally::default();
        let winner = loop {
            if tally.total() == launched {
                break RaceWinner::AllDone;
            }
            select! {
                recv(rx) -> msg => match msg {
                    Ok(outcome) => tally.record(&outcome),
                    Err(_) => break RaceWinner::AllDone,
                },
                recv(self.cancel.signal()) -> _ => break RaceWinner::Cancelled,
            }
        };
        let total = start.elapsed();

        self.enter(RunPhase::Aggregating);
        let samples = collector.seal();
        for outcome in rx.try_iter() {
            tally.record(&outcome);
        }

        // Units abandoned on cancellation can all report before the signal arm
        // is picked. A collaborator giving up on its own is not an interruption.
        let abandoned = tally.skipped_before_start + tally.cancelled_in_flight;
        let interrupted = winner == RaceWinner::Cancelled
            || launched < requested
            || (abandoned > 0 && self.cancel.is_cancelled());
        debug!(?winner, interrupted, samples = samples.len(), "Race resolved");

        let summary = Summary::from_samples(&samples, total);
        if summary.is_none() {
            debug!("No samples collected; skipping aggregation");
        }

        self.enter(RunPhase::Done);
        Ok(RunReport {
            requested,
            launched,
            outcomes: tally,
            interrupted,
            total,
            summary,
        })
    }
}
