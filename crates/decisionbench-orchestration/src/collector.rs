//! Concurrency-safe store of per-unit latencies.

use std::collections::HashMap;

use parking_lot::Mutex;

/// One recorded latency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sample {
    /// Work unit index.
    pub index: usize,
    /// Elapsed wall-clock time in milliseconds.
    pub elapsed_ms: u64,
}

/// Result of [`ResultCollector::insert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// The sample was recorded.
    Inserted,
    /// The index already had a sample; the new one was dropped.
    Duplicate,
    /// Aggregation has begun; the sample was dropped.
    Sealed,
}

#[derive(Default)]
struct CollectorState {
    by_index: HashMap<usize, u64>,
    order: Vec<usize>,
    sealed: bool,
}

/// Index-keyed latency store with insert-if-absent semantics.
///
/// Written concurrently by the work units. Once [`seal`](Self::seal) is
/// called, the contents are frozen and later inserts are rejected.
#[derive(Default)]
pub struct ResultCollector {
    state: Mutex<CollectorState>,
}

impl ResultCollector {
    /// Create an empty collector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty collector sized for `capacity` units.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            state: Mutex::new(CollectorState {
                by_index: HashMap::with_capacity(capacity),
                order: Vec::with_capacity(capacity),
                sealed: false,
            }),
        }
    }

    /// Record `elapsed_ms` for `index` unless a sample already exists.
    pub fn insert(&self, index: usize, elapsed_ms: u64) -> InsertOutcome {
        let mut state = self.state.lock();
        if state.sealed {
            return InsertOutcome::Sealed;
        }
        if state.by_index.contains_key(&index) {
            return InsertOutcome::Duplicate;
        }
        state.by_index.insert(index, elapsed_ms);
        state.order.push(index);
        InsertOutcome::Inserted
    }

    /// Number of recorded samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.lock().order.len()
    }

    /// Whether no sample has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Freeze the collector and return its samples in completion order.
    ///
    /// Sealing twice returns the same snapshot.
    pub fn seal(&self) -> Vec<Sample> {
        let mut state = self.state.lock();
        state.sealed = true;
        state
            .order
            .iter()
            .filter_map(|&index| {
                state
                    .by_index
                    .get(&index)
                    .map(|&elapsed_ms| Sample { index, elapsed_ms })
            })
            .collect()
    }
}
