//! Application configuration from CLI flags and environment.

use std::time::Duration;

use clap::Parser;

use decisionbench_core::constants::{
    DEFAULT_FLAGS, DEFAULT_ITERATIONS, DEFAULT_LATENCY_MAX_MS, DEFAULT_LATENCY_MIN_MS, DEFAULT_RING,
};
use decisionbench_core::error::BenchError;
use decisionbench_core::simulated::SimulationProfile;
use decisionbench_orchestration::driver::BatchConfig;

/// Where the run report is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ReportFormat {
    /// Human-readable table on stdout.
    Table,
    /// JSON document on stdout.
    Json,
    /// Structured log events on stderr.
    Log,
}

/// decisionbench: concurrent latency benchmark for decision evaluations.
#[derive(Parser, Debug)]
#[command(name = "decisionbench", version, about)]
pub struct AppConfig {
    /// SDK key used to construct the decision client.
    #[arg(long, env = "DECISIONBENCH_SDK_KEY", hide_env_values = true)]
    pub sdk_key: Option<String>,

    /// Number of decision requests to fire.
    #[arg(short = 'n', long, default_value_t = DEFAULT_ITERATIONS, env = "DECISIONBENCH_ITERATIONS")]
    pub iterations: usize,

    /// Maximum number of requests in flight (default: all at once).
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// Classification tag sent as the `ring` attribute.
    #[arg(long, default_value = DEFAULT_RING)]
    pub ring: String,

    /// Lowest simulated decision latency in milliseconds.
    #[arg(long, default_value_t = DEFAULT_LATENCY_MIN_MS)]
    pub latency_min_ms: u64,

    /// Highest simulated decision latency in milliseconds.
    #[arg(long, default_value_t = DEFAULT_LATENCY_MAX_MS)]
    pub latency_max_ms: u64,

    /// Probability in [0, 1] that a simulated evaluation fails.
    #[arg(long, default_value_t = 0.0)]
    pub failure_rate: f64,

    /// Comma-separated flag keys the simulated service evaluates.
    #[arg(long, value_delimiter = ',')]
    pub flags: Vec<String>,

    /// Cancel the run after this long (e.g., "30s", "2m").
    #[arg(long)]
    pub timeout: Option<String>,

    /// After the summary, log a heartbeat at this interval until Ctrl+C (e.g., "1s").
    #[arg(long)]
    pub heartbeat: Option<String>,

    /// Verbose output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Quiet mode (only the one-line summary).
    #[arg(short, long)]
    pub quiet: bool,

    /// Report destination.
    #[arg(long, value_enum, default_value_t = ReportFormat::Table)]
    pub report: ReportFormat,

    /// Print the run report as JSON (same as `--report json`).
    #[arg(long, conflicts_with = "report")]
    pub json: bool,

    /// Generate shell completion.
    #[arg(long, value_enum)]
    pub completion: Option<clap_complete::Shell>,
}

impl AppConfig {
    /// Parse CLI arguments.
    #[must_use]
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// The SDK key, which must be present and non-empty.
    pub fn sdk_key(&self) -> Result<&str, BenchError> {
        match self.sdk_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => Ok(key),
            _ => Err(BenchError::Config(
                "an SDK key is required (--sdk-key or DECISIONBENCH_SDK_KEY)".into(),
            )),
        }
    }

    /// Batch settings for the driver.
    #[must_use]
    pub fn batch_config(&self) -> BatchConfig {
        BatchConfig {
            iterations: self.iterations,
            concurrency: self.concurrency,
            ring: self.ring.clone(),
        }
    }

    /// Shape of the simulated decision service.
    #[must_use]
    pub fn simulation_profile(&self) -> SimulationProfile {
        let flags = if self.flags.is_empty() {
            DEFAULT_FLAGS.iter().map(ToString::to_string).collect()
        } else {
            self.flags.clone()
        };
        SimulationProfile {
            latency_min_ms: self.latency_min_ms,
            latency_max_ms: self.latency_max_ms,
            failure_rate: self.failure_rate,
            flags,
        }
    }

    /// The single destination for the run report.
    #[must_use]
    pub fn report_format(&self) -> ReportFormat {
        if self.json {
            ReportFormat::Json
        } else {
            self.report
        }
    }

    /// Default log filter when `RUST_LOG` is unset.
    ///
    /// Quiet mode hides info events unless the report itself is logged.
    #[must_use]
    pub fn default_log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet && self.report_format() != ReportFormat::Log {
            "warn"
        } else {
            "info"
        }
    }

    /// Parsed `--timeout`, if given.
    pub fn timeout_duration(&self) -> Result<Option<Duration>, BenchError> {
        parse_optional_duration("timeout", self.timeout.as_deref())
    }

    /// Parsed `--heartbeat`, if given.
    pub fn heartbeat_interval(&self) -> Result<Option<Duration>, BenchError> {
        let interval = parse_optional_duration("heartbeat", self.heartbeat.as_deref())?;
        if interval == Some(Duration::ZERO) {
            return Err(BenchError::Config("heartbeat interval must be positive".into()));
        }
        Ok(interval)
    }
}

fn parse_optional_duration(name: &str, value: Option<&str>) -> Result<Option<Duration>, BenchError> {
    value
        .map(|s| {
            parse_duration(s)
                .ok_or_else(|| BenchError::Config(format!("invalid {name} duration: {s:?}")))
        })
        .transpose()
}

/// Parse a duration string like "5m", "1h", "30s", "250ms".
fn parse_duration(s: &str) -> Option<Duration> {
    let s = s.trim();
    if let Some(ms) = s.strip_suffix("ms") {
        let n: u64 = ms.parse().ok()?;
        Some(Duration::from_millis(n))
    } else if let Some(mins) = s.strip_suffix('m') {
        let n: u64 = mins.parse().ok()?;
        Some(Duration::from_secs(n.checked_mul(60)?))
    } else if let Some(hours) = s.strip_suffix('h') {
        let n: u64 = hours.parse().ok()?;
        Some(Duration::from_secs(n.checked_mul(3600)?))
    } else if let Some(secs) = s.strip_suffix('s') {
        let n: u64 = secs.parse().ok()?;
        Some(Duration::from_secs(n))
    } else {
        let n: u64 = s.parse().ok()?;
        Some(Duration::from_secs(n))
    }
}
