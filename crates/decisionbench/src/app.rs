//! Application entry point and dispatch.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use crossbeam_channel::{after, select};
use tracing::{info, warn};

use decisionbench_cli::presenter::{CliPresenter, JsonPresenter, LogPresenter};
use decisionbench_core::cancel::CancellationToken;
use decisionbench_core::constants::exit_codes;
use decisionbench_core::decision::DecisionClient;
use decisionbench_core::simulated::SimulatedDecisionClient;
use decisionbench_orchestration::driver::BatchDriver;
use decisionbench_orchestration::interfaces::RunPresenter;

use crate::config::{AppConfig, ReportFormat};
use crate::errors::report_exit_code;
use crate::heartbeat::Heartbeat;

/// Run the application, returning the process exit code.
pub fn run(config: &AppConfig) -> Result<i32> {
    // Handle shell completion
    if let Some(shell) = config.completion {
        let mut cmd = <AppConfig as clap::CommandFactory>::command();
        decisionbench_cli::completion::generate_completion(&mut cmd, shell, &mut std::io::stdout());
        return Ok(exit_codes::SUCCESS);
    }

    let sdk_key = config.sdk_key()?;
    let timeout = config.timeout_duration()?;
    let heartbeat = config.heartbeat_interval()?;

    let client = SimulatedDecisionClient::new(sdk_key, config.simulation_profile())?;
    info!(
        client = client.name(),
        "Decision client initialized with SDK key '{}'",
        mask_key(sdk_key)
    );

    let cancel = CancellationToken::new();
    install_ctrlc_handler(cancel.clone())?;
    let deadline = timeout.map(|t| arm_deadline(t, cancel.clone()));

    let report = BatchDriver::new(config.batch_config(), Arc::new(client), cancel.clone()).run()?;

    if let Some(deadline) = deadline {
        deadline.cancel();
    }

    presenter_for(config).present(&report);
    let code = report_exit_code(&report, cancel.is_cancelled());

    if let Some(interval) = heartbeat {
        info!("Benchmark finished; idling until Ctrl+C");
        Heartbeat::new(interval).run(&cancel);
    }

    Ok(code)
}

/// Exactly one presenter reports each run.
fn presenter_for(config: &AppConfig) -> Box<dyn RunPresenter> {
    match config.report_format() {
        ReportFormat::Table => Box::new(CliPresenter::new(config.verbose, config.quiet)),
        ReportFormat::Json => Box::new(JsonPresenter),
        ReportFormat::Log => Box::new(LogPresenter),
    }
}

fn install_ctrlc_handler(cancel: CancellationToken) -> Result<()> {
    ctrlc::set_handler(move || {
        info!("Stop requested");
        cancel.cancel();
    })
    .context("failed to install Ctrl+C handler")
}

/// Cancel `cancel` once `timeout` elapses, unless the returned token is cancelled first.
fn arm_deadline(timeout: Duration, cancel: CancellationToken) -> CancellationToken {
    let disarm = CancellationToken::new();
    let guard = disarm.clone();
    std::thread::spawn(move || {
        select! {
            recv(guard.signal()) -> _ => {}
            recv(after(timeout)) -> _ => {
                warn!(timeout_ms = timeout.as_millis(), "Timeout reached; cancelling run");
                cancel.cancel();
            }
        }
    });
    disarm
}

/// Show only the first few characters of a key in logs.
fn mask_key(key: &str) -> String {
    let visible: String = key.chars().take(4).collect();
    if key.chars().count() > 4 {
        format!("{visible}…")
    } else {
        visible
    }
}
