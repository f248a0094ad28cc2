//! set / set-host / get-host / set-code / get-code

use colored::Colorize;
use std::path::Path;

use crate::client::ClientConfig;
use crate::interfaces::cli::CliError;

pub fn set_host_and_code(
    path: &Path,
    mut config: ClientConfig,
    host: String,
    code: String,
) -> Result<(), CliError> {
    config.host_url = host;
    config.auth_code = code;
    config.save(path)?;
    println!("{}", "Configuration saved.".green());
    Ok(())
}

pub fn set_host(path: &Path, mut config: ClientConfig, host: String) -> Result<(), CliError> {
    config.host_url = host;
    config.save(path)?;
    println!("{}", "Host URL successfully saved.".green());
    Ok(())
}

pub fn get_host(config: &ClientConfig) {
    println!("Host URL: {}", config.host_url);
}

pub fn set_code(path: &Path, mut config: ClientConfig, code: String) -> Result<(), CliError> {
    config.auth_code = code;
    config.save(path)?;
    println!("{}", "Authentication code successfully saved.".green());
    Ok(())
}

pub fn get_code(config: &ClientConfig) {
    println!("Authentication code: {}", config.auth_code);
}
