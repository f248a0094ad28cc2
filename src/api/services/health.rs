use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Responder, web};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{error, info, trace};

use super::types::{ReadinessResponse, text_response};
use crate::errors::SurlError;
use crate::services::ShortenService;

const READY_TIMEOUT: Duration = Duration::from_secs(5);

// 应用启动时间结构体
#[derive(Clone, Debug)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

impl AppStartTime {
    pub fn now() -> Self {
        Self {
            start_datetime: chrono::Utc::now(),
        }
    }
}

/// Health Service
///
/// `/health` 只做存活探测，不触碰后端；`/health/ready` 会 PING 一次后端。
pub struct HealthService;

impl HealthService {
    // 活跃性检查，与 heartbeat 一致返回 "."
    pub async fn liveness_check() -> impl Responder {
        trace!("Received liveness check request");
        text_response(StatusCode::OK, ".")
    }

    pub async fn readiness_check(
        service: web::Data<Arc<ShortenService>>,
        app_start_time: web::Data<AppStartTime>,
    ) -> impl Responder {
        let start_time = Instant::now();
        trace!("Received readiness check request");

        let store = service.store();
        let ping = match tokio::time::timeout(READY_TIMEOUT, store.ping()).await {
            Ok(result) => result,
            Err(_) => Err(SurlError::store_unavailable(format!(
                "ping timed out after {:?}",
                READY_TIMEOUT
            ))),
        };

        let now = chrono::Utc::now();
        let uptime = (now - app_start_time.start_datetime).num_seconds().max(0) as u64;

        let (status, error_msg) = match ping {
            Ok(()) => ("healthy", None),
            Err(e) => {
                error!("Storage readiness check failed: {}", e);
                ("unhealthy", Some(e.message().to_string()))
            }
        };

        let body = ReadinessResponse {
            status: status.to_string(),
            backend: store.backend_name().to_string(),
            timestamp: now.to_rfc3339(),
            uptime,
            response_time_ms: start_time.elapsed().as_millis() as u64,
            error: error_msg,
        };

        info!(
            "Readiness check completed in {:?}, status: {}",
            start_time.elapsed(),
            status
        );

        let code = if body.error.is_none() {
            StatusCode::OK
        } else {
            StatusCode::SERVICE_UNAVAILABLE
        };
        HttpResponse::build(code).json(body)
    }
}

/// Health 路由配置
pub fn health_routes() -> actix_web::Scope {
    web::scope("/health")
        .route("", web::get().to(HealthService::liveness_check))
        .route("", web::head().to(HealthService::liveness_check))
        .route("/ready", web::get().to(HealthService::readiness_check))
}
