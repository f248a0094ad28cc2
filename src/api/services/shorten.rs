use actix_multipart::Multipart;
use actix_web::http::StatusCode;
use actix_web::{FromRequest, HttpMessage, HttpRequest, HttpResponse, Responder, web};
use futures_util::StreamExt;
use std::sync::Arc;
use tracing::{debug, trace};

use super::types::{ShortUrlResponse, ShortenParams, error_response, text_response};
use crate::errors::{Result, SurlError};
use crate::services::ShortenService;

/// multipart 中 `url` 字段的最大字节数
const MAX_URL_FIELD_SIZE: usize = 64 * 1024;

pub struct ShortenApi;

impl ShortenApi {
    /// POST /shorten
    ///
    /// `url` 先从请求体读取（urlencoded 或 multipart），请求体里没有该字段时
    /// 再读 query string。请求体里的空值不会回退到 query。
    pub async fn shorten(
        req: HttpRequest,
        payload: web::Payload,
        query: web::Query<ShortenParams>,
        service: web::Data<Arc<ShortenService>>,
    ) -> impl Responder {
        let body_url = match Self::body_url(&req, payload).await {
            Ok(url) => url,
            Err(e) => return error_response(&e),
        };
        let target = body_url
            .or_else(|| query.into_inner().url)
            .unwrap_or_default();

        trace!("Shorten request for: {}", target);

        match service.create(&target).await {
            Ok(token) if service.require_auth() => {
                HttpResponse::Ok().json(ShortUrlResponse { short_url: token })
            }
            Ok(token) => text_response(StatusCode::OK, &token),
            Err(e) => error_response(&e),
        }
    }

    async fn body_url(req: &HttpRequest, payload: web::Payload) -> Result<Option<String>> {
        if req.content_type().eq_ignore_ascii_case("multipart/form-data") {
            return Self::multipart_url(Multipart::new(req.headers(), payload)).await;
        }

        // 非表单请求体（或没有请求体）视为未提供
        let mut payload = payload.into_inner();
        match web::Form::<ShortenParams>::from_request(req, &mut payload).await {
            Ok(form) => Ok(form.into_inner().url),
            Err(e) => {
                debug!("No urlencoded body: {}", e);
                Ok(None)
            }
        }
    }

    async fn multipart_url(mut multipart: Multipart) -> Result<Option<String>> {
        let mut url = None;

        while let Some(item) = multipart.next().await {
            let mut field = item
                .map_err(|e| SurlError::bad_input(format!("Invalid multipart data: {}", e)))?;

            if field.name() != Some("url") || url.is_some() {
                // 其余字段需读完才能继续解析下一个
                while let Some(chunk) = field.next().await {
                    chunk.map_err(|e| {
                        SurlError::bad_input(format!("Invalid multipart data: {}", e))
                    })?;
                }
                continue;
            }

            let mut data = Vec::new();
            while let Some(chunk) = field.next().await {
                let bytes = chunk.map_err(|e| {
                    SurlError::bad_input(format!("Invalid multipart data: {}", e))
                })?;
                if data.len() + bytes.len() > MAX_URL_FIELD_SIZE {
                    return Err(SurlError::bad_input("url field too large"));
                }
                data.extend_from_slice(&bytes);
            }

            let value = String::from_utf8(data)
                .map_err(|_| SurlError::bad_input("url field is not valid UTF-8"))?;
            url = Some(value);
        }

        Ok(url)
    }
}
