//! surl - a small URL shortener backed by Redis
//!
//! Stores `token -> target URL` mappings, answers `GET /r/{token}` with a
//! 307 redirect, and ships a command-line client for a running server.
//!
//! # Architecture
//! - `services`: token generation, authorization and the shortening service
//! - `storage`: mapping store trait with Redis and in-memory backends
//! - `api`: HTTP handlers, route table and middleware
//! - `client` / `interfaces`: HTTP client and CLI commands
//! - `config`: static configuration (file, env, legacy env)
//! - `runtime`: startup and execution modes
//! - `system`: logging

pub mod api;
pub mod cli;
pub mod client;
pub mod config;
pub mod errors;
pub mod interfaces;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod system;
