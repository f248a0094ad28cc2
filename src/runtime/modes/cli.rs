//! CLI mode
//!
//! Delegates to the client command implementation.

use crate::cli::Cli;
use crate::interfaces::cli::CliError;

pub fn run_cli(cli: Cli) -> Result<(), CliError> {
    crate::interfaces::cli::run_cli(cli)
}
