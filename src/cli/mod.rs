//! Command line interface for path0_release.
//!
//! Parses arguments, dispatches to the `publish` and `check` commands and
//! turns their outcome into a process exit code.

mod args;
pub mod commands;
mod output;

pub use args::{Args, AssetArgs, CheckArgs, Command, PublishArgs, RuntimeConfig};
pub use commands::{EXIT_ASSET_FAILURES, EXIT_FATAL, EXIT_SUCCESS, execute_command};
pub use output::OutputManager;
