//! Command-line interface definitions using clap
//!
//! `surl` with no subcommand (or `surl serve`) runs the HTTP server; the other
//! subcommands talk to a running server through the client config file.

use clap::{Parser, Subcommand};

/// surl - a small Redis-backed URL shortener
#[derive(Parser, Debug)]
#[command(name = "surl")]
#[command(version)]
#[command(about = "A small Redis-backed URL shortener and its client", long_about = None)]
pub struct Cli {
    /// Client config file (default: $SURL_CLIENT_CONFIG or ~/.config/surl/config.toml)
    #[arg(long, global = true)]
    pub client_config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP server (default when no subcommand is given)
    Serve {
        /// Server config file
        #[arg(long, short = 'c')]
        config: Option<String>,
    },

    /// Manage server configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },

    /// Set the server host and the access code
    Set {
        /// Server base URL, e.g. https://s.example.com
        host: String,
        /// Access code for privileged calls
        code: String,
    },

    /// Set the server host
    SetHost { host: String },

    /// Print the server host
    GetHost,

    /// Set the access code
    SetCode { code: String },

    /// Print the access code
    GetCode,

    /// List all short links
    #[command(alias = "ls")]
    List,

    /// Shorten a URL
    #[command(alias = "create")]
    Shorten { url: String },

    /// Open a short link in the default browser
    #[command(alias = "o")]
    Open { token: String },

    /// Delete a short link
    #[command(alias = "del")]
    Delete { token: String },
}

/// Configuration management commands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Generate example configuration file
    Generate {
        /// Output path (default: config.toml)
        output_path: Option<String>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_means_server() {
        let cli = Cli::try_parse_from(["surl"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_aliases() {
        let cli = Cli::try_parse_from(["surl", "ls"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::List)));

        let cli = Cli::try_parse_from(["surl", "create", "https://example.com"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Shorten { url }) if url == "https://example.com"));

        let cli = Cli::try_parse_from(["surl", "del", "abc"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Delete { token }) if token == "abc"));

        let cli = Cli::try_parse_from(["surl", "o", "abc"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Open { .. })));
    }

    #[test]
    fn test_kebab_case_commands() {
        let cli = Cli::try_parse_from(["surl", "set-host", "http://localhost:3000"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::SetHost { .. })));

        let cli = Cli::try_parse_from(["surl", "--client-config", "/tmp/c.toml", "get-code"])
            .unwrap();
        assert_eq!(cli.client_config.as_deref(), Some("/tmp/c.toml"));
        assert!(matches!(cli.command, Some(Commands::GetCode)));
    }

    #[test]
    fn test_serve_with_config() {
        let cli = Cli::try_parse_from(["surl", "serve", "--config", "prod.toml"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Serve { config: Some(c) }) if c == "prod.toml"));
    }
}
