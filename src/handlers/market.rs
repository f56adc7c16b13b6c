use actix_web::{web, HttpResponse, Result};

use crate::models::{
    ApiResponse, DashboardView, MarketTimingDocument, PortfolioSummary, SummaryDocument,
};
use crate::services::AppContext;

pub async fn get_dashboard(ctx: web::Data<AppContext>) -> Result<HttpResponse> {
    match ctx.dashboard().await {
        Ok(view) => Ok(HttpResponse::Ok().json(ApiResponse::success(view))),
        Err(e) => Ok(HttpResponse::InternalServerError()
            .json(ApiResponse::<DashboardView>::error(e.to_string()))),
    }
}

pub async fn get_summary(ctx: web::Data<AppContext>) -> Result<HttpResponse> {
    match ctx.market.get_summary().await {
        Ok(summary) => Ok(HttpResponse::Ok().json(ApiResponse::success(summary))),
        Err(e) => Ok(HttpResponse::InternalServerError()
            .json(ApiResponse::<SummaryDocument>::error(e.to_string()))),
    }
}

pub async fn get_market_timing(ctx: web::Data<AppContext>) -> Result<HttpResponse> {
    match ctx.market.get_market_timing().await {
        Ok(doc) => Ok(HttpResponse::Ok().json(ApiResponse::success(doc))),
        Err(e) => Ok(HttpResponse::InternalServerError()
            .json(ApiResponse::<MarketTimingDocument>::error(e.to_string()))),
    }
}

pub async fn get_portfolio(ctx: web::Data<AppContext>) -> Result<HttpResponse> {
    let portfolio: PortfolioSummary = ctx.market.get_portfolio();
    Ok(HttpResponse::Ok().json(ApiResponse::success(portfolio)))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/dashboard", web::get().to(get_dashboard))
        .route("/summary", web::get().to(get_summary))
        .route("/market-timing", web::get().to(get_market_timing))
        .route("/portfolio", web::get().to(get_portfolio));
}
