//! API 请求/响应类型与错误映射

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use actix_web::http::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, error};

use crate::errors::SurlError;

/// `POST /shorten` 的表单/查询参数
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShortenParams {
    pub url: Option<String>,
}

/// 特权接口的口令参数 `?code=`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CodeQuery {
    pub code: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShortUrlResponse {
    #[serde(rename = "shortUrl")]
    pub short_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse {
    pub data: HashMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub backend: String,
    pub timestamp: String,
    pub uptime: u64,
    pub response_time_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// 错误到 HTTP 状态码的映射
pub fn status_for(err: &SurlError) -> StatusCode {
    match err {
        SurlError::BadInput(_) => StatusCode::BAD_REQUEST,
        SurlError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        SurlError::NotFound(_) => StatusCode::NOT_FOUND,
        SurlError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// 纯文本错误响应，不暴露内部细节
pub fn error_response(err: &SurlError) -> HttpResponse {
    let status = status_for(err);
    if status.is_server_error() {
        error!("Request failed: {}", err);
    } else {
        debug!("Request rejected: {}", err);
    }

    text_response(status, status.canonical_reason().unwrap_or("Error"))
}

#[inline]
pub fn text_response(status: StatusCode, body: &str) -> HttpResponse {
    HttpResponse::build(status)
        .insert_header((CONTENT_TYPE, "text/plain; charset=utf-8"))
        .body(body.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(status_for(&SurlError::bad_input("x")), StatusCode::BAD_REQUEST);
        assert_eq!(status_for(&SurlError::unauthorized("x")), StatusCode::UNAUTHORIZED);
        assert_eq!(status_for(&SurlError::not_found("x")), StatusCode::NOT_FOUND);
        assert_eq!(
            status_for(&SurlError::store_unavailable("x")),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            status_for(&SurlError::store_exhausted("x")),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_short_url_field_name() {
        let body = serde_json::to_string(&ShortUrlResponse {
            short_url: "aB3dQf9x".to_string(),
        })
        .unwrap();
        assert_eq!(body, r#"{"shortUrl":"aB3dQf9x"}"#);
    }
}
