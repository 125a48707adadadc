//! # decisionbench-core
//!
//! Building blocks for the decision latency benchmark: cooperative
//! cancellation, error types, the decision collaborator interface, work units,
//! and a simulated collaborator.

pub mod cancel;
pub mod constants;
pub mod decision;
pub mod error;
pub mod simulated;
pub mod unit;

// Re-exports
pub use cancel::CancellationToken;
pub use constants::{exit_codes, DEFAULT_ITERATIONS, DEFAULT_RING};
pub use decision::{
    AttributeValue, Attributes, Decision, DecisionClient, DecisionContext, Decisions,
};
pub use error::{BenchError, DecisionError};
pub use simulated::{SimulatedDecisionClient, SimulationProfile};
pub use unit::WorkUnit;
