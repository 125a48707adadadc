//! Property-based tests for aggregation and result collection.

use std::collections::HashMap;
use std::time::Duration;

use proptest::prelude::*;

use decisionbench_orchestration::collector::{InsertOutcome, ResultCollector};
use decisionbench_orchestration::summary::Summary;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Median is always the sorted element at index count / 2.
    #[test]
    fn median_is_upper_middle(latencies in prop::collection::vec(0u64..10_000, 1..200)) {
        let summary = Summary::from_latencies(&latencies, Duration::ZERO).unwrap();
        let mut sorted = latencies.clone();
        sorted.sort_unstable();
        prop_assert_eq!(summary.count, latencies.len());
        prop_assert_eq!(summary.median_ms, sorted[latencies.len() / 2]);
        prop_assert_eq!(summary.min_ms, sorted[0]);
        prop_assert_eq!(summary.max_ms, sorted[sorted.len() - 1]);
    }

    /// Average lies between min and max.
    #[test]
    #[allow(clippy::cast_precision_loss)]
    fn average_is_bounded(latencies in prop::collection::vec(0u64..1_000_000, 1..200)) {
        let summary = Summary::from_latencies(&latencies, Duration::ZERO).unwrap();
        prop_assert!(summary.average_ms >= summary.min_ms as f64);
        prop_assert!(summary.average_ms <= summary.max_ms as f64);
    }

    /// Summary is independent of completion order.
    #[test]
    fn order_does_not_matter(mut latencies in prop::collection::vec(0u64..500, 1..50)) {
        let forward = Summary::from_latencies(&latencies, Duration::ZERO).unwrap();
        latencies.reverse();
        let backward = Summary::from_latencies(&latencies, Duration::ZERO).unwrap();
        prop_assert_eq!(forward, backward);
    }

    /// Each index is recorded at most once, keeping the first value.
    #[test]
    fn collector_keeps_first_per_index(reports in prop::collection::vec((0usize..20, 0u64..100), 0..100)) {
        let collector = ResultCollector::new();
        let mut first = HashMap::new();
        for &(index, elapsed) in &reports {
            let outcome = collector.insert(index, elapsed);
            if first.contains_key(&index) {
                prop_assert_eq!(outcome, InsertOutcome::Duplicate);
            } else {
                prop_assert_eq!(outcome, InsertOutcome::Inserted);
                first.insert(index, elapsed);
            }
        }
        prop_assert_eq!(collector.len(), first.len());
        for sample in collector.seal() {
            prop_assert_eq!(Some(&sample.elapsed_ms), first.get(&sample.index));
        }
    }
}

#[test]
fn documented_examples() {
    let five = Summary::from_latencies(&[5, 3, 8, 1, 9], Duration::ZERO).unwrap();
    assert_eq!(
        (five.count, five.min_ms, five.max_ms, five.median_ms),
        (5, 1, 9, 5)
    );
    assert!((five.average_ms - 5.2).abs() < 1e-9);

    let four = Summary::from_latencies(&[10, 20, 30, 40], Duration::ZERO).unwrap();
    assert_eq!(four.median_ms, 30);
}
