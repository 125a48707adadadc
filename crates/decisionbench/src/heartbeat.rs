//! Periodic liveness heartbeat, independent of the benchmark itself.

use std::time::{Duration, Instant};

use crossbeam_channel::{select, tick};
use tracing::info;

use decisionbench_core::cancel::CancellationToken;

/// Logs a heartbeat at a fixed interval until cancelled.
pub struct Heartbeat {
    interval: Duration,
}

impl Heartbeat {
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    /// Block until `cancel` fires, logging once per interval.
    ///
    /// Returns the number of beats logged.
    pub fn run(&self, cancel: &CancellationToken) -> u64 {
        let started = Instant::now();
        let ticker = tick(self.interval);
        let mut beats = 0u64;
        loop {
            select! {
                recv(ticker) -> _ => {
                    beats += 1;
                    info!(
                        beat = beats,
                        uptime_secs = started.elapsed().as_secs(),
                        "Worker running"
                    );
                }
                recv(cancel.signal()) -> _ => break,
            }
        }
        info!(beats, "Heartbeat stopped");
        beats
    }
}
