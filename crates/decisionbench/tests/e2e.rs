//! End-to-end CLI integration tests.

use assert_cmd::Command;
use predicates::prelude::*;

fn decisionbench() -> Command {
    let mut cmd = Command::cargo_bin("decisionbench").expect("binary not found");
    cmd.env_remove("DECISIONBENCH_SDK_KEY")
        .env_remove("DECISIONBENCH_ITERATIONS")
        .env_remove("RUST_LOG");
    cmd
}

fn fast_run(iterations: &str) -> Command {
    let mut cmd = decisionbench();
    cmd.args([
        "--sdk-key",
        "test-key",
        "-n",
        iterations,
        "--latency-min-ms",
        "0",
        "--latency-max-ms",
        "2",
    ]);
    cmd
}

#[test]
fn help_flag() {
    decisionbench()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("latency benchmark"));
}

#[test]
fn version_flag() {
    decisionbench()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("decisionbench"));
}

#[test]
fn missing_sdk_key_is_config_error() {
    decisionbench()
        .args(["-n", "1"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("SDK key"));
}

#[test]
fn sdk_key_from_environment() {
    decisionbench()
        .env("DECISIONBENCH_SDK_KEY", "env-key")
        .args(["-n", "3", "--latency-min-ms", "0", "--latency-max-ms", "1", "-q"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("count=3 "));
}

#[test]
fn quiet_prints_summary_line() {
    fast_run("10")
        .arg("-q")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("count=10 "));
}

#[test]
fn default_output_lists_statistics() {
    fast_run("25")
        .assert()
        .success()
        .stdout(predicate::str::contains("Completed: 25 of 25 iterations"))
        .stdout(predicate::str::contains("median"))
        .stderr(predicate::str::contains("Finished running").not());
}

#[test]
fn log_report_goes_to_stderr_only() {
    fast_run("25")
        .args(["--report", "log"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Finished running 25 iterations"))
        .stderr(predicate::str::contains("Median time per iteration"));
}

#[test]
fn per_iteration_latency_is_logged() {
    fast_run("2")
        .assert()
        .success()
        .stderr(predicate::str::contains("Iteration 0 took"))
        .stderr(predicate::str::contains("Iteration 1 took"));
}

#[test]
fn json_report() {
    let output = fast_run("12")
        .args(["--json", "--concurrency", "4"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["requested"], 12);
    assert_eq!(report["launched"], 12);
    assert_eq!(report["interrupted"], false);
    assert_eq!(report["outcome"], "completed");
    assert_eq!(report["summary"]["count"], 12);
}

#[test]
fn all_failures_report_no_iterations() {
    fast_run("5")
        .args(["--failure-rate", "1.0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No iterations completed successfully"));
}

#[test]
fn timeout_interrupts_run() {
    decisionbench()
        .args([
            "--sdk-key",
            "test-key",
            "-n",
            "3",
            "--latency-min-ms",
            "10000",
            "--latency-max-ms",
            "10000",
            "--timeout",
            "100ms",
        ])
        .timeout(std::time::Duration::from_secs(10))
        .assert()
        .code(130)
        .stdout(predicate::str::contains("Run interrupted before completion."))
        .stdout(predicate::str::contains("No iterations completed successfully"));
}

#[test]
fn quiet_timeout_still_flags_interruption() {
    decisionbench()
        .args([
            "--sdk-key",
            "test-key",
            "-n",
            "3",
            "--latency-min-ms",
            "10000",
            "--latency-max-ms",
            "10000",
            "--timeout",
            "100ms",
            "-q",
        ])
        .timeout(std::time::Duration::from_secs(10))
        .assert()
        .code(130)
        .stdout(predicate::str::contains("interrupted=true"));
}

#[test]
fn oversized_timeout_is_config_error() {
    fast_run("1")
        .args(["--timeout", "999999999999999999m"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("invalid timeout duration"));
}

#[test]
fn invalid_latency_range() {
    decisionbench()
        .args([
            "--sdk-key",
            "k",
            "--latency-min-ms",
            "10",
            "--latency-max-ms",
            "1",
        ])
        .assert()
        .code(4);
}

#[test]
fn bash_completion() {
    decisionbench()
        .args(["--completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("decisionbench"));
}
