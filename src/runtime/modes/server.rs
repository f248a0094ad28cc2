//! Server mode
//!
//! Builds the actix-web application and runs it until the process receives
//! SIGINT/SIGTERM (handled by actix's own signal listener).

use actix_web::{
    App, HttpServer,
    middleware::{Compress, DefaultHeaders},
    web,
};
use anyhow::{Context, Result};
use tracing::warn;

use crate::api::middleware::{AccessLog, RequestIdMiddleware};
use crate::api::services::AppStartTime;
use crate::config::StaticConfig;
use crate::runtime::lifetime;

const MAX_WORKERS: usize = 32;
const FORM_LIMIT: usize = 64 * 1024;

/// Run the HTTP server
///
/// **Note**: Logging system must be initialized before calling this function
pub async fn run_server(config: StaticConfig) -> Result<()> {
    let app_start_time = AppStartTime::now();

    let startup = lifetime::startup::prepare_server_startup(&config)
        .await
        .map_err(|e| {
            tracing::error!("Server startup failed: {:#}", e);
            e
        })?;

    let service = startup.service;
    let require_auth = startup.require_auth;

    let cpu_count = config.server.cpu_count.clamp(1, MAX_WORKERS);
    warn!("Using {} CPU cores for the server", cpu_count);

    let bind_address = format!("{}:{}", config.server.host, config.server.port);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(AccessLog)
            .wrap(RequestIdMiddleware) // 包在 AccessLog 外面，访问日志带 request_id
            .wrap(Compress::default())
            .wrap(DefaultHeaders::new().add(("Cache-Control", "no-cache, no-store, must-revalidate")))
            .app_data(web::Data::new(service.clone()))
            .app_data(web::Data::new(app_start_time.clone()))
            .app_data(web::FormConfig::default().limit(FORM_LIMIT))
            .configure(|cfg| crate::api::configure(cfg, require_auth))
    })
    .keep_alive(std::time::Duration::from_secs(30))
    .client_request_timeout(std::time::Duration::from_millis(5000))
    .client_disconnect_timeout(std::time::Duration::from_millis(1000))
    .workers(cpu_count);

    warn!("Starting server at http://{}", bind_address);
    server
        .bind(&bind_address)
        .with_context(|| format!("Failed to bind {}", bind_address))?
        .run()
        .await
        .context("HTTP server terminated with an error")?;

    warn!("Server stopped");
    Ok(())
}
