//! list / shorten / open / delete against a running server

use colored::Colorize;

use crate::client::{SurlClient, open_in_browser};
use crate::interfaces::cli::CliError;

pub fn list_links(client: &SurlClient) -> Result<(), CliError> {
    let links = client.list()?;

    if links.is_empty() {
        println!("{} No short links found", "ℹ".bold().blue());
        return Ok(());
    }

    let mut entries: Vec<_> = links.iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));
    for (token, target) in entries {
        println!("{} => {}", token.cyan(), target.blue().underline());
    }
    Ok(())
}

pub fn shorten_link(client: &SurlClient, url: &str) -> Result<(), CliError> {
    let token = client.shorten(url)?;
    println!("Shortened URL: {}", token.green());
    Ok(())
}

pub fn open_link(client: &SurlClient, token: &str) -> Result<(), CliError> {
    let url = client.open_url(token)?;
    println!("Opening {}", url.blue().underline());
    open_in_browser(&url)?;
    Ok(())
}

pub fn delete_link(client: &SurlClient, token: &str) -> Result<(), CliError> {
    let deleted = client.delete(token)?;
    println!("Deleted URL: {}", deleted.green());
    Ok(())
}
