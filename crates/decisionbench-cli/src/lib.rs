//! # decisionbench-cli
//!
//! Report formatting, presenters, and shell completion.

pub mod completion;
pub mod output;
pub mod presenter;

pub use presenter::{CliPresenter, JsonPresenter, LogPresenter};
