use actix_web::{web, HttpResponse, Result};
use serde::Deserialize;

use crate::models::{
    ApiResponse, FilterCriteria, MarketQuery, MarketType, QuickFilter, RefreshReport, SearchMatch,
    StockListView,
};
use crate::services::AppContext;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    /// 搜索关键词
    pub q: String,
    pub market: Option<String>,
}

pub async fn list_stocks(
    ctx: web::Data<AppContext>,
    market: web::Query<MarketQuery>,
    criteria: web::Query<FilterCriteria>,
) -> Result<HttpResponse> {
    let Some(market) = market.resolve() else {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::<StockListView>::error("无效的市场类型".to_string())));
    };

    match ctx.stocks.list(market, &criteria).await {
        Ok(view) => Ok(HttpResponse::Ok().json(ApiResponse::success(view))),
        Err(e) => Ok(HttpResponse::InternalServerError()
            .json(ApiResponse::<StockListView>::error(e.to_string()))),
    }
}

pub async fn quick_filter(
    ctx: web::Data<AppContext>,
    path: web::Path<String>,
    market: web::Query<MarketQuery>,
) -> Result<HttpResponse> {
    let Some(preset) = QuickFilter::parse(&path.into_inner()) else {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::<StockListView>::error("无效的快捷筛选".to_string())));
    };
    let Some(market) = market.resolve() else {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::<StockListView>::error("无效的市场类型".to_string())));
    };

    match ctx.stocks.quick_filter(market, preset).await {
        Ok(view) => Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(
            view,
            format!("已筛选：{}", preset.label()),
        ))),
        Err(e) => Ok(HttpResponse::InternalServerError()
            .json(ApiResponse::<StockListView>::error(e.to_string()))),
    }
}

pub async fn search_stocks(
    ctx: web::Data<AppContext>,
    query: web::Query<SearchQuery>,
) -> Result<HttpResponse> {
    let keyword = query.q.trim();
    if keyword.is_empty() {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::<Vec<SearchMatch>>::error("搜索关键词不能为空".to_string())));
    }
    let market = match query.market.as_deref() {
        None | Some("") => MarketType::A,
        Some(m) => match MarketType::parse(m) {
            Some(market) => market,
            None => {
                return Ok(HttpResponse::BadRequest()
                    .json(ApiResponse::<Vec<SearchMatch>>::error("无效的市场类型".to_string())));
            }
        },
    };

    match ctx.stocks.search(market, keyword).await {
        Ok(results) => Ok(HttpResponse::Ok().json(ApiResponse::success(results))),
        Err(e) => Ok(HttpResponse::InternalServerError()
            .json(ApiResponse::<Vec<SearchMatch>>::error(e.to_string()))),
    }
}

pub async fn refresh_stocks(
    ctx: web::Data<AppContext>,
    market: web::Query<MarketQuery>,
) -> Result<HttpResponse> {
    let Some(market) = market.resolve() else {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::<RefreshReport>::error("无效的市场类型".to_string())));
    };

    match ctx.stocks.refresh(market).await {
        Ok(report) => {
            let message = format!("成功导入{}只股票", report.imported);
            Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(report, message)))
        }
        Err(e) => Ok(HttpResponse::InternalServerError()
            .json(ApiResponse::<RefreshReport>::error(e.to_string()))),
    }
}

pub async fn get_search_history(ctx: web::Data<AppContext>) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(ApiResponse::success(ctx.stocks.search_history())))
}

pub async fn clear_search_history(ctx: web::Data<AppContext>) -> Result<HttpResponse> {
    ctx.stocks.clear_search_history();
    Ok(HttpResponse::Ok().json(ApiResponse::success_with_message((), "搜索历史已清空")))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/stocks")
            .route("", web::get().to(list_stocks))
            .route("/quick/{preset}", web::get().to(quick_filter))
            .route("/search", web::get().to(search_stocks))
            .route("/search-history", web::get().to(get_search_history))
            .route("/search-history", web::delete().to(clear_search_history))
            .route("/refresh", web::post().to(refresh_stocks)),
    );
}
