//! Client layer for the CLI
//!
//! Talks to a running server over HTTP. The server itself never uses this
//! module.

pub mod config;
pub mod http;

pub use config::{CLIENT_CONFIG_ENV, ClientConfig, resolve_config_path};
pub use http::{SurlClient, open_in_browser};
