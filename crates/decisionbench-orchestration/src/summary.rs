//! Latency aggregation.

use std::time::Duration;

use serde::{Serialize, Serializer};

use crate::collector::Sample;

/// Aggregate statistics over the completed units of a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    /// Number of completed units.
    pub count: usize,
    /// Arithmetic mean latency.
    pub average_ms: f64,
    /// Latency at sorted position `count / 2`.
    pub median_ms: u64,
    /// Fastest unit.
    pub min_ms: u64,
    /// Slowest unit.
    pub max_ms: u64,
    /// Wall-clock duration of the whole run.
    #[serde(rename = "total_ms", serialize_with = "serialize_millis")]
    pub total: Duration,
}

impl Summary {
    /// Aggregate latencies, or `None` when there are none.
    ///
    /// The median is the element at index `count / 2` of the sorted
    /// latencies. For even counts that is the upper-middle element; no
    /// interpolation is done.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_latencies(latencies: &[u64], total: Duration) -> Option<Self> {
        let mut sorted = latencies.to_vec();
        sorted.sort_unstable();

        let count = sorted.len();
        let min_ms = *sorted.first()?;
        let max_ms = *sorted.last()?;
        let median_ms = *sorted.get(count / 2)?;
        let sum: u128 = sorted.iter().map(|&ms| u128::from(ms)).sum();

        Some(Self {
            count,
            average_ms: sum as f64 / count as f64,
            median_ms,
            min_ms,
            max_ms,
            total,
        })
    }

    /// Aggregate a collector snapshot.
    #[must_use]
    pub fn from_samples(samples: &[Sample], total: Duration) -> Option<Self> {
        let latencies: Vec<u64> = samples.iter().map(|s| s.elapsed_ms).collect();
        Self::from_latencies(&latencies, total)
    }
}

#[allow(clippy::cast_possible_truncation)]
pub(crate) fn serialize_millis<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(value.as_millis() as u64)
}
