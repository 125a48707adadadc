//! Workspace-level tests for decisionbench live under `tests/`.
