//! Error types for the harness and the decision collaborator.

/// Failure reported by a decision collaborator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecisionError {
    /// The call observed cancellation and gave up mid-flight.
    #[error("decision evaluation cancelled")]
    Cancelled,

    /// The user identity was rejected before evaluation.
    #[error("invalid user identity: {0}")]
    InvalidIdentity(String),

    /// Evaluation ran but failed.
    #[error("decision evaluation failed: {0}")]
    Evaluation(String),

    /// The decision service could not be reached.
    #[error("decision service unavailable: {0}")]
    Unavailable(String),
}

impl DecisionError {
    /// Whether this error stems from cancellation rather than a fault.
    #[must_use]
    pub fn is_cancellation(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

/// Error type for harness setup and orchestration.
#[derive(Debug, thiserror::Error)]
pub enum BenchError {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// The worker pool could not be built.
    #[error("worker pool error: {0}")]
    Pool(String),
}
