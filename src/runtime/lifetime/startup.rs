use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::config::StaticConfig;
use crate::services::ShortenService;
use crate::storage::StorageFactory;

pub struct StartupContext {
    pub service: Arc<ShortenService>,
    pub require_auth: bool,
}

/// rustls 需要进程级 CryptoProvider，`rediss://` 连接依赖它
pub fn install_crypto_provider() {
    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        debug!("rustls crypto provider already installed");
    }
}

/// 准备服务器启动的上下文
/// 包括存储后端与短链服务
pub async fn prepare_server_startup(config: &StaticConfig) -> Result<StartupContext> {
    let start_time = std::time::Instant::now();
    debug!("Starting pre-startup processing...");

    install_crypto_provider();

    let store = StorageFactory::create(&config.storage)
        .await
        .context("Failed to create storage backend")?;

    let service = ShortenService::from_config(store, config)
        .context("Failed to initialize shortening service")?;

    if config.auth.require_auth {
        // 未配置口令时的告警由 AuthGuard 输出
        if !config.auth.code.is_empty() {
            info!("Privileged endpoints enabled (/list, /d/{{token}})");
        }
    } else {
        warn!("auth.require_auth = false: /d/{{token}} is open and /list is not routed");
    }

    debug!(
        "Pre-startup processing completed in {} ms",
        start_time.elapsed().as_millis()
    );

    Ok(StartupContext {
        service: Arc::new(service),
        require_auth: config.auth.require_auth,
    })
}
