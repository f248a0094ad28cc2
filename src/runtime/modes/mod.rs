//! Mode routing
//!
//! - Server mode (HTTP server): no subcommand, or `serve`
//! - CLI mode: everything else

pub mod cli;
pub mod server;

pub use cli::run_cli;
pub use server::run_server;

use crate::cli::Commands;

/// Mode detection result
#[derive(Debug, PartialEq)]
pub enum Mode {
    Server,
    Cli,
}

/// Detect which mode to run from the parsed subcommand
pub fn detect_mode(command: Option<&Commands>) -> Mode {
    match command {
        None | Some(Commands::Serve { .. }) => Mode::Server,
        Some(_) => Mode::Cli,
    }
}
