use actix_web::http::StatusCode;
use actix_web::http::header::{HeaderValue, LOCATION};
use actix_web::{HttpResponse, Responder, web};
use std::fmt::Write;
use std::sync::Arc;
use tracing::{trace, warn};

use super::types::{error_response, text_response};
use crate::services::ShortenService;

pub struct RedirectService {}

impl RedirectService {
    /// GET /r/{token}
    pub async fn handle_redirect(
        path: web::Path<String>,
        service: web::Data<Arc<ShortenService>>,
    ) -> impl Responder {
        let token = path.into_inner();

        match service.resolve(&token).await {
            Ok(target) => {
                trace!("Redirecting {} -> {}", token, target);
                Self::finish_redirect(&target)
            }
            Err(e) => error_response(&e),
        }
    }

    #[inline]
    fn finish_redirect(target: &str) -> HttpResponse {
        match location_header(target) {
            Some(location) => HttpResponse::build(StatusCode::TEMPORARY_REDIRECT)
                .insert_header((LOCATION, location))
                .finish(),
            None => text_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error"),
        }
    }
}

/// 目标地址按原样写入 Location；含控制字符（如 CR/LF）时先百分号编码
pub fn location_header(target: &str) -> Option<HeaderValue> {
    if let Ok(value) = HeaderValue::from_str(target) {
        return Some(value);
    }

    warn!("Redirect target contains control characters, escaping them");
    HeaderValue::from_str(&escape_control_bytes(target)).ok()
}

fn escape_control_bytes(target: &str) -> String {
    let mut escaped = String::with_capacity(target.len());
    for c in target.chars() {
        if c.is_ascii_control() && c != '\t' {
            let _ = write!(escaped, "%{:02X}", c as u8);
        } else {
            escaped.push(c);
        }
    }
    escaped
}
