//! CLI module for routeguard
//!
//! Provides command-line interface for:
//! - serve: Load rules and run the validation gateway
//! - check: Validate one request offline
//! - routes: List what a rules document declares

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{check, describe_routes, resolve_config, run, run_command, serve};
pub use errors::{CliError, CliErrorCode, CliResult};
