use actix_web::{web, HttpResponse, Result};
use serde::Serialize;

use crate::models::ApiResponse;
use crate::services::AppContext;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub version: &'static str,
    /// 当前进行中的上游请求数
    pub loading: usize,
}

pub async fn health_check(ctx: web::Data<AppContext>) -> Result<HttpResponse> {
    let status = HealthStatus {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        loading: ctx.fetch.loading_count(),
    };
    Ok(HttpResponse::Ok().json(ApiResponse::success(status)))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check));
}
