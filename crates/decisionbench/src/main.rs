//! decisionbench: concurrent latency benchmark for decision evaluations.

use std::process::ExitCode;

use decisionbench_lib::{app, config, errors};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let config = config::AppConfig::parse();

    // Initialize tracing; RUST_LOG overrides the verbosity flags.
    let default_level = config.default_log_level();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let code = match app::run(&config) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            errors::handle_error(&e)
        }
    };
    ExitCode::from(u8::try_from(code).unwrap_or(1))
}
