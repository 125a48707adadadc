//! In-process decision collaborator with simulated latency and failures.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use tracing::debug;

use crate::cancel::CancellationToken;
use crate::constants::{DEFAULT_FLAGS, DEFAULT_LATENCY_MAX_MS, DEFAULT_LATENCY_MIN_MS};
use crate::decision::{Attributes, Decision, DecisionClient, DecisionContext, Decisions};
use crate::error::{BenchError, DecisionError};

/// Shape of the simulated decision service.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationProfile {
    /// Lowest latency per evaluation, in milliseconds.
    pub latency_min_ms: u64,
    /// Highest latency per evaluation, in milliseconds.
    pub latency_max_ms: u64,
    /// Probability in [0.0, 1.0] that an evaluation fails.
    pub failure_rate: f64,
    /// Flags evaluated for every user.
    pub flags: Vec<String>,
}

impl Default for SimulationProfile {
    fn default() -> Self {
        Self {
            latency_min_ms: DEFAULT_LATENCY_MIN_MS,
            latency_max_ms: DEFAULT_LATENCY_MAX_MS,
            failure_rate: 0.0,
            flags: DEFAULT_FLAGS.iter().map(ToString::to_string).collect(),
        }
    }
}

impl SimulationProfile {
    /// Validate bounds.
    pub fn validate(&self) -> Result<(), BenchError> {
        if self.latency_min_ms > self.latency_max_ms {
            return Err(BenchError::Config(format!(
                "latency range is empty: min {} ms > max {} ms",
                self.latency_min_ms, self.latency_max_ms
            )));
        }
        if !(0.0..=1.0).contains(&self.failure_rate) {
            return Err(BenchError::Config(format!(
                "failure rate must be within [0, 1], got {}",
                self.failure_rate
            )));
        }
        Ok(())
    }
}

/// Decision client that sleeps for a random latency and fabricates decisions.
///
/// The SDK key is only checked for presence; the simulation never uses it.
pub struct SimulatedDecisionClient {
    profile: Arc<SimulationProfile>,
}

impl SimulatedDecisionClient {
    /// Create a client for the given SDK key.
    pub fn new(sdk_key: &str, profile: SimulationProfile) -> Result<Self, BenchError> {
        if sdk_key.trim().is_empty() {
            return Err(BenchError::Config("SDK key must not be empty".into()));
        }
        profile.validate()?;
        Ok(Self {
            profile: Arc::new(profile),
        })
    }
}

impl DecisionClient for SimulatedDecisionClient {
    fn create_context(
        &self,
        user_id: &str,
        attributes: Attributes,
    ) -> Result<Box<dyn DecisionContext>, DecisionError> {
        if user_id.trim().is_empty() {
            return Err(DecisionError::InvalidIdentity(
                "user id must not be empty".into(),
            ));
        }
        Ok(Box::new(SimulatedContext {
            user_id: user_id.to_string(),
            attributes,
            profile: Arc::clone(&self.profile),
        }))
    }

    fn name(&self) -> &str {
        "simulated"
    }
}

struct SimulatedContext {
    user_id: String,
    attributes: Attributes,
    profile: Arc<SimulationProfile>,
}

impl SimulatedContext {
    fn decide(&self, flag: &str) -> Decision {
        let mut hasher = DefaultHasher::new();
        self.user_id.hash(&mut hasher);
        flag.hash(&mut hasher);
        let enabled = hasher.finish() % 2 == 0;
        Decision {
            flag_key: flag.to_string(),
            variation_key: Some(if enabled { "on" } else { "off" }.to_string()),
            enabled,
        }
    }
}

impl DecisionContext for SimulatedContext {
    fn evaluate_all(&self, cancel: &CancellationToken) -> Result<Decisions, DecisionError> {
        let (latency, fails) = {
            let mut rng = rand::thread_rng();
            let ms = rng.gen_range(self.profile.latency_min_ms..=self.profile.latency_max_ms);
            (
                Duration::from_millis(ms),
                rng.gen_bool(self.profile.failure_rate),
            )
        };

        if cancel.wait_timeout(latency) {
            return Err(DecisionError::Cancelled);
        }
        if fails {
            return Err(DecisionError::Evaluation(format!(
                "simulated failure for {}",
                self.user_id
            )));
        }

        debug!(
            user = %self.user_id,
            attributes = self.attributes.len(),
            latency_ms = latency.as_millis(),
            "Evaluated all flags"
        );

        Ok(self
            .profile
            .flags
            .iter()
            .map(|flag| (flag.clone(), self.decide(flag)))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_profile() -> SimulationProfile {
        SimulationProfile {
            latency_min_ms: 0,
            latency_max_ms: 1,
            ..SimulationProfile::default()
        }
    }

    #[test]
    fn rejects_empty_sdk_key() {
        let result = SimulatedDecisionClient::new("  ", SimulationProfile::default());
        assert!(matches!(result, Err(BenchError::Config(_))));
    }

    #[test]
    fn rejects_inverted_latency_range() {
        let profile = SimulationProfile {
            latency_min_ms: 10,
            latency_max_ms: 5,
            ..SimulationProfile::default()
        };
        assert!(profile.validate().is_err());
    }

    #[test]
    fn rejects_out_of_range_failure_rate() {
        let profile = SimulationProfile {
            failure_rate: 1.5,
            ..SimulationProfile::default()
        };
        assert!(profile.validate().is_err());
    }

    #[test]
    fn rejects_empty_identity() {
        let client = SimulatedDecisionClient::new("key", fast_profile()).unwrap();
        let result = client.create_context("", Attributes::new());
        assert!(matches!(result, Err(DecisionError::InvalidIdentity(_))));
    }

    #[test]
    fn evaluates_every_flag() {
        let client = SimulatedDecisionClient::new("key", fast_profile()).unwrap();
        let ctx = client.create_context("user1", Attributes::new()).unwrap();
        let decisions = ctx.evaluate_all(&CancellationToken::new()).unwrap();
        assert_eq!(decisions.len(), DEFAULT_FLAGS.len());
        for flag in DEFAULT_FLAGS {
            assert!(decisions.contains_key(flag));
        }
    }

    #[test]
    fn decisions_are_stable_per_user() {
        let client = SimulatedDecisionClient::new("key", fast_profile()).unwrap();
        let cancel = CancellationToken::new();
        let a = client
            .create_context("user9", Attributes::new())
            .unwrap()
            .evaluate_all(&cancel)
            .unwrap();
        let b = client
            .create_context("user9", Attributes::new())
            .unwrap()
            .evaluate_all(&cancel)
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn always_failing_profile() {
        let profile = SimulationProfile {
            failure_rate: 1.0,
            ..fast_profile()
        };
        let client = SimulatedDecisionClient::new("key", profile).unwrap();
        let ctx = client.create_context("user1", Attributes::new()).unwrap();
        let result = ctx.evaluate_all(&CancellationToken::new());
        assert!(matches!(result, Err(DecisionError::Evaluation(_))));
    }

    #[test]
    fn observes_cancellation_mid_call() {
        let profile = SimulationProfile {
            latency_min_ms: 5_000,
            latency_max_ms: 5_000,
            ..SimulationProfile::default()
        };
        let client = SimulatedDecisionClient::new("key", profile).unwrap();
        let ctx = client.create_context("user1", Attributes::new()).unwrap();
        let cancel = CancellationToken::new();
        let remote = cancel.clone();
        let handle = std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(10));
            remote.cancel();
        });
        let start = std::time::Instant::now();
        let result = ctx.evaluate_all(&cancel);
        handle.join().unwrap();
        assert_eq!(result, Err(DecisionError::Cancelled));
        assert!(start.elapsed() < Duration::from_secs(5));
    }
}
