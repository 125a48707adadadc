//! decisionbench library: application logic for the latency benchmark.

pub mod app;
pub mod config;
pub mod errors;
pub mod heartbeat;
