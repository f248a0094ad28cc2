//! CLI interface module
//!
//! Client commands for a running surl server plus local config generation.

pub mod commands;

use std::fmt;
use std::path::PathBuf;

use crate::cli::{Cli, Commands, ConfigCommands};
use crate::client::{ClientConfig, SurlClient, resolve_config_path};
use crate::errors::SurlError;

#[derive(Debug)]
pub enum CliError {
    ConfigError(String),
    RequestError(String),
    CommandError(String),
}

impl CliError {
    /// Format as simple output
    pub fn format_simple(&self) -> String {
        match self {
            CliError::ConfigError(msg) => format!("Config error: {}", msg),
            CliError::RequestError(msg) => format!("Request error: {}", msg),
            CliError::CommandError(msg) => format!("Command error: {}", msg),
        }
    }

    /// Format as colored output
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        match self {
            CliError::ConfigError(msg) => {
                format!("{} {}", "Config error:".yellow().bold(), msg.white())
            }
            CliError::RequestError(msg) => {
                format!("{} {}", "Request error:".red().bold(), msg.white())
            }
            CliError::CommandError(msg) => {
                format!("{} {}", "Command error:".red().bold(), msg.white())
            }
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for CliError {}

impl From<SurlError> for CliError {
    fn from(err: SurlError) -> Self {
        match err {
            SurlError::Config(msg) | SurlError::FileOperation(msg) => CliError::ConfigError(msg),
            SurlError::Client(msg) => CliError::RequestError(msg),
            other => CliError::CommandError(other.to_string()),
        }
    }
}

struct ClientContext {
    path: PathBuf,
    config: ClientConfig,
}

impl ClientContext {
    fn load(explicit: Option<&str>) -> Result<Self, CliError> {
        let path = resolve_config_path(explicit)?;
        let config = ClientConfig::load_or_create(&path)?;
        Ok(Self { path, config })
    }

    fn client(self) -> SurlClient {
        SurlClient::new(self.config)
    }
}

/// Run a CLI command from clap-parsed input
pub fn run_cli(cli: Cli) -> Result<(), CliError> {
    let Some(cmd) = cli.command else {
        return Err(CliError::CommandError("No command given".to_string()));
    };

    if let Commands::Config { action } = cmd {
        let ConfigCommands::Generate { output_path, force } = action;
        return commands::config_generate(output_path, force);
    }

    let ctx = ClientContext::load(cli.client_config.as_deref())?;

    match cmd {
        Commands::Set { host, code } => {
            commands::set_host_and_code(&ctx.path, ctx.config, host, code)
        }
        Commands::SetHost { host } => commands::set_host(&ctx.path, ctx.config, host),
        Commands::GetHost => {
            commands::get_host(&ctx.config);
            Ok(())
        }
        Commands::SetCode { code } => commands::set_code(&ctx.path, ctx.config, code),
        Commands::GetCode => {
            commands::get_code(&ctx.config);
            Ok(())
        }
        Commands::List => commands::list_links(&ctx.client()),
        Commands::Shorten { url } => commands::shorten_link(&ctx.client(), &url),
        Commands::Open { token } => commands::open_link(&ctx.client(), &token),
        Commands::Delete { token } => commands::delete_link(&ctx.client(), &token),
        Commands::Serve { .. } | Commands::Config { .. } => Err(CliError::CommandError(
            "Not a client command".to_string(),
        )),
    }
}
