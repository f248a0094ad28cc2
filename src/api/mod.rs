//! HTTP surface: route table, handlers and middleware

pub mod middleware;
pub mod services;

use actix_web::web;

use services::{AdminService, RedirectService, ShortenApi, health_routes};

/// 注册全部路由
///
/// `/list` 只在 `require_auth` 开启时挂载；未挂载时由 actix 返回 404。
pub fn configure(cfg: &mut web::ServiceConfig, require_auth: bool) {
    cfg.route("/shorten", web::post().to(ShortenApi::shorten))
        .route("/r/{token:.*}", web::get().to(RedirectService::handle_redirect))
        .route("/r/{token:.*}", web::head().to(RedirectService::handle_redirect))
        .route("/d/{token:.*}", web::delete().to(AdminService::delete_link))
        .service(health_routes());

    if require_auth {
        cfg.route("/list", web::get().to(AdminService::list_links));
    }
}
