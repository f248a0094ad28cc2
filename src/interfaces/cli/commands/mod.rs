//! CLI command implementations

mod client_config;
mod config_gen;
mod links;

pub use client_config::*;
pub use config_gen::*;
pub use links::*;
