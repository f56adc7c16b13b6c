use actix_web::{web, HttpResponse, Result};
use serde_json::Value;

use crate::models::{AnalysisHistoryEntry, ApiResponse, MarketQuery};
use crate::services::AppContext;

pub async fn analyze_stock(
    ctx: web::Data<AppContext>,
    path: web::Path<String>,
    market: web::Query<MarketQuery>,
) -> Result<HttpResponse> {
    let Some(market) = market.resolve() else {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::<Value>::error("无效的市场类型".to_string())));
    };
    let code = path.into_inner();

    match ctx.analysis.analyze(&code, market).await {
        Ok(record) => Ok(HttpResponse::Ok().json(ApiResponse::success(record))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::<Value>::error(e.to_string()))
        ),
    }
}

pub async fn get_history(ctx: web::Data<AppContext>) -> Result<HttpResponse> {
    let history: Vec<AnalysisHistoryEntry> = ctx.analysis.history();
    Ok(HttpResponse::Ok().json(ApiResponse::success(history)))
}

pub async fn delete_history(
    ctx: web::Data<AppContext>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let key = path.into_inner();
    if ctx.analysis.delete(&key) {
        Ok(HttpResponse::Ok().json(ApiResponse::success_with_message((), "分析记录已删除")))
    } else {
        Ok(HttpResponse::NotFound().json(ApiResponse::<()>::error("未找到分析记录".to_string())))
    }
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/analysis")
            .route("/history", web::get().to(get_history))
            .route("/history/{key}", web::delete().to(delete_history))
            .route("/{code}", web::get().to(analyze_stock)),
    );
}
