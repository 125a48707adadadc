//! # decisionbench-orchestration
//!
//! Concurrent fan-out of work units, thread-safe result collection, the
//! completion-versus-cancellation race, and latency aggregation.

pub mod collector;
pub mod driver;
pub mod executor;
pub mod interfaces;
pub mod summary;

pub use collector::{InsertOutcome, ResultCollector, Sample};
pub use driver::{BatchConfig, BatchDriver, RunPhase};
pub use executor::{execute_unit, UnitOutcome};
pub use interfaces::{OutcomeTally, RunOutcome, RunPresenter, RunReport};
pub use summary::Summary;
