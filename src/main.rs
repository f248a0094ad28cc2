use clap::Parser;
use colored::Colorize;
use std::process::ExitCode;

use surl::cli::{Cli, Commands};
use surl::config::{DEFAULT_CONFIG_PATH, StaticConfig};
use surl::runtime::modes::{self, Mode};

fn main() -> ExitCode {
    let cli = Cli::parse();

    // .env 文件可选
    let _ = dotenvy::dotenv();

    match modes::detect_mode(cli.command.as_ref()) {
        Mode::Server => {
            let config_path = match &cli.command {
                Some(Commands::Serve {
                    config: Some(path),
                }) => path.clone(),
                _ => DEFAULT_CONFIG_PATH.to_string(),
            };
            run_server_mode(&config_path)
        }
        Mode::Cli => match modes::run_cli(cli) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("{}", e.format_colored());
                ExitCode::FAILURE
            }
        },
    }
}

fn run_server_mode(config_path: &str) -> ExitCode {
    let config = match StaticConfig::load_from(config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e.format_colored());
            return ExitCode::FAILURE;
        }
    };

    // guard 必须活到进程结束，否则缓冲中的日志会丢
    let _log_guard = match surl::system::init_logging(&config.logging) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("{}", e.format_colored());
            return ExitCode::FAILURE;
        }
    };

    match actix_web::rt::System::new().block_on(modes::run_server(config)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{:#}", e);
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
