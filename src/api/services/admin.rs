//! Privileged endpoints: `GET /list` and `DELETE /d/{token}`
//!
//! Authorization is checked by the service layer with the `code` query
//! parameter; with `auth.require_auth = false` only delete is routed and it
//! answers in plain text.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Responder, web};
use std::sync::Arc;
use tracing::info;

use super::types::{CodeQuery, ListResponse, ShortUrlResponse, error_response, text_response};
use crate::services::ShortenService;

pub struct AdminService;

impl AdminService {
    /// GET /list?code=
    pub async fn list_links(
        query: web::Query<CodeQuery>,
        service: web::Data<Arc<ShortenService>>,
    ) -> impl Responder {
        let query = query.into_inner();

        match service.list(query.code.as_deref()).await {
            Ok(data) => {
                info!("Admin API: listed {} mappings", data.len());
                HttpResponse::Ok().json(ListResponse { data })
            }
            Err(e) => error_response(&e),
        }
    }

    /// DELETE /d/{token}?code=
    pub async fn delete_link(
        path: web::Path<String>,
        query: web::Query<CodeQuery>,
        service: web::Data<Arc<ShortenService>>,
    ) -> impl Responder {
        let token = path.into_inner();
        let query = query.into_inner();

        match service.delete(&token, query.code.as_deref()).await {
            Ok(token) if service.require_auth() => {
                HttpResponse::Ok().json(ShortUrlResponse { short_url: token })
            }
            Ok(_) => text_response(StatusCode::OK, "Deleted"),
            Err(e) => error_response(&e),
        }
    }
}
