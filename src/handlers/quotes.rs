use actix_web::{web, HttpResponse, Result};

use crate::models::{ApiResponse, Quote, QuotesDocument};
use crate::services::AppContext;

pub async fn get_quotes(ctx: web::Data<AppContext>) -> Result<HttpResponse> {
    match ctx.quotes.get_quotes().await {
        Ok(doc) => Ok(HttpResponse::Ok().json(ApiResponse::success(doc))),
        Err(e) => Ok(HttpResponse::InternalServerError()
            .json(ApiResponse::<QuotesDocument>::error(e.to_string()))),
    }
}

pub async fn get_daily_quote(ctx: web::Data<AppContext>) -> Result<HttpResponse> {
    match ctx.quotes.daily_quote().await {
        Ok(quote) => Ok(HttpResponse::Ok().json(ApiResponse::success(quote))),
        Err(e) => {
            Ok(HttpResponse::InternalServerError().json(ApiResponse::<Quote>::error(e.to_string())))
        }
    }
}

/// 版本检查从不失败，拉取异常时按无更新返回本地版本
pub async fn check_version(ctx: web::Data<AppContext>) -> Result<HttpResponse> {
    let check = ctx.quotes.check_version().await;
    Ok(HttpResponse::Ok().json(ApiResponse::success(check)))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/quotes")
            .route("", web::get().to(get_quotes))
            .route("/daily", web::get().to(get_daily_quote))
            .route("/version", web::get().to(check_version)),
    );
}
