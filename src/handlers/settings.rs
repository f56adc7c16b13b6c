use actix_web::{web, HttpResponse, Result};

use crate::models::{ApiResponse, Settings};
use crate::services::AppContext;

pub async fn get_settings(ctx: web::Data<AppContext>) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(ApiResponse::success(ctx.settings())))
}

pub async fn update_settings(
    ctx: web::Data<AppContext>,
    settings: web::Json<Settings>,
) -> Result<HttpResponse> {
    ctx.save_settings(&settings);
    Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(
        settings.into_inner(),
        "设置已保存",
    )))
}

/// 用户主动清空全部缓存数据
pub async fn clear_cache(ctx: web::Data<AppContext>) -> Result<HttpResponse> {
    ctx.cache.clear_all();
    Ok(HttpResponse::Ok().json(ApiResponse::success_with_message((), "缓存已清除")))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/settings", web::get().to(get_settings))
        .route("/settings", web::put().to(update_settings))
        .route("/cache", web::delete().to(clear_cache));
}
