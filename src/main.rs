//! 老刘投资决策数据服务
//!
//! 为股票推荐小程序提供数据接口服务
//! 数据来源：静态 JSON 数据集（GitHub Pages 托管），本地缓存加速

mod config;
mod handlers;   // HTTP 请求处理器
mod middleware; // 中间件
mod models;     // 数据模型定义
mod services;   // 业务逻辑服务

use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;

use crate::config::AppConfig;
use crate::middleware::ApiKeyMiddleware;
use crate::services::AppContext;

/// 应用程序入口
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // 初始化日志系统，默认日志级别为 info
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = AppConfig::load();
    log::info!("启动老刘投资决策数据服务");

    // 构建共享上下文：存储、缓存、网络客户端与各数据服务
    let ctx = AppContext::new(&config);

    // 清理过期缓存
    let removed = ctx.cache.clear_expired();
    if removed > 0 {
        log::info!("清理过期缓存 {} 条", removed);
    }

    // 启动时拉取远程配置，失败则继续使用本地配置
    ctx.apply_remote_config().await;

    let api_key = config.api.api_key.clone();
    if api_key.is_empty() {
        log::warn!("未配置 API Key，接口不启用认证");
    }

    let bind_addr = config.bind_addr();
    log::info!("监听地址: {}", bind_addr);

    let data = web::Data::new(ctx);

    // 创建并启动 HTTP 服务器
    let mut server = HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .wrap(Logger::default()) // 添加请求日志中间件
            .wrap(ApiKeyMiddleware::new(api_key.clone()))
            .configure(handlers::config) // 配置路由
    });

    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server.bind(bind_addr)?.run().await
}
