//! HTTP 请求处理器

pub mod analysis;
pub mod health;
pub mod market;
pub mod quotes;
pub mod settings;
pub mod stocks;

use actix_web::web;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(health::config)
            .configure(market::config)
            .configure(stocks::config)
            .configure(quotes::config)
            .configure(analysis::config)
            .configure(settings::config),
    );
}
