//! Constants for benchmark defaults and process exit codes.

/// Default number of work units per run.
pub const DEFAULT_ITERATIONS: usize = 1000;

/// Default classification tag attached to every work unit.
pub const DEFAULT_RING: &str = "us";

/// Prefix of the synthetic user identity (`user0`, `user1`, ...).
pub const USER_ID_PREFIX: &str = "user";

/// Attribute carrying the per-unit synthetic account identifier.
pub const ACCOUNT_ID_ATTRIBUTE: &str = "accountIdGuid";

/// Attribute carrying the classification tag.
pub const RING_ATTRIBUTE: &str = "ring";

/// Default lower bound of simulated decision latency, in milliseconds.
pub const DEFAULT_LATENCY_MIN_MS: u64 = 1;

/// Default upper bound of simulated decision latency, in milliseconds.
pub const DEFAULT_LATENCY_MAX_MS: u64 = 20;

/// Flags evaluated by the simulated collaborator when none are configured.
pub const DEFAULT_FLAGS: [&str; 3] = ["checkout_flow", "search_ranking", "pricing_banner"];

/// Process exit codes.
pub mod exit_codes {
    /// Successful execution.
    pub const SUCCESS: i32 = 0;
    /// Generic error.
    pub const ERROR_GENERIC: i32 = 1;
    /// Invalid configuration.
    pub const ERROR_CONFIG: i32 = 4;
    /// Run interrupted by cancellation (Ctrl+C or deadline).
    pub const ERROR_CANCELED: i32 = 130;
}
