//! 业务逻辑服务模块
//!
//! `AppContext` 在进程启动时构建一次，持有存储、缓存、网络客户端
//! 与各数据服务，通过 `web::Data` 传给所有处理器，不依赖全局可变状态。

pub mod analysis_service;
pub mod cache;
pub mod fetch;
pub mod market_service;
pub mod quote_service;
pub mod sample_data;
pub mod screener;
pub mod search;
pub mod stock_service;
pub mod storage;

use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;

use crate::config::AppConfig;
use crate::models::{DashboardView, Settings};

use analysis_service::AnalysisService;
use cache::{now_millis, CacheStore};
use fetch::FetchClient;
use market_service::MarketService;
use quote_service::QuoteService;
use stock_service::StockService;
use storage::LocalStorage;

const APP_CONFIG_KEY: &str = "app_config";
const LAST_DATA_UPDATE_KEY: &str = "last_data_update";
const SETTINGS_KEY: &str = "settings";

/// 应用共享上下文
pub struct AppContext {
    pub storage: Arc<LocalStorage>,
    pub cache: Arc<CacheStore>,
    pub fetch: Arc<FetchClient>,
    pub stocks: StockService,
    pub quotes: QuoteService,
    pub market: MarketService,
    pub analysis: AnalysisService,
}

impl AppContext {
    pub fn new(config: &AppConfig) -> Self {
        let storage = Arc::new(LocalStorage::new(&config.cache.dir));
        let cache = Arc::new(CacheStore::new(
            Arc::clone(&storage),
            Duration::from_secs(config.cache.default_ttl_secs),
        ));
        let fetch = Arc::new(FetchClient::new(&config.data, Arc::clone(&cache)));

        Self {
            stocks: StockService::new(
                Arc::clone(&fetch),
                Arc::clone(&cache),
                Arc::clone(&storage),
            ),
            quotes: QuoteService::new(
                Arc::clone(&fetch),
                Arc::clone(&cache),
                Arc::clone(&storage),
                Duration::from_secs(config.cache.quotes_ttl_secs),
            ),
            market: MarketService::new(Arc::clone(&fetch)),
            analysis: AnalysisService::new(Arc::clone(&fetch), Arc::clone(&storage)),
            storage,
            cache,
            fetch,
        }
    }

    /// 启动时拉取远程配置并合并到本地
    ///
    /// 远程配置可以覆盖数据源地址；拉取失败只记日志，继续用本地配置
    pub async fn apply_remote_config(&self) {
        let options = self.fetch.options("/miniprogram_config.json").silent();
        match self.fetch.fetch_with_options(options).await {
            Ok(value) => {
                if let Some(base_url) = value.get("baseUrl").and_then(|v| v.as_str()) {
                    if !base_url.is_empty() {
                        log::info!("应用远程配置数据源: {}", base_url);
                        self.fetch.set_base_url(base_url);
                    }
                }
                self.storage.set(APP_CONFIG_KEY, &value);
            }
            Err(e) => log::warn!("获取远程配置失败: {}", e),
        }
    }

    /// 首页聚合数据
    ///
    /// 汇总和择时并发拉取，任何一个失败整体失败；
    /// 每日金句失败不影响整页数据
    pub async fn dashboard(&self) -> Result<DashboardView> {
        let (summary, market) =
            tokio::try_join!(self.market.get_summary(), self.market.market_timing_view())?;

        let daily_quote = match self.quotes.daily_quote().await {
            Ok(quote) => Some(quote),
            Err(e) => {
                log::warn!("加载每日金句失败: {}", e);
                None
            }
        };

        self.storage.set(LAST_DATA_UPDATE_KEY, &now_millis());

        Ok(DashboardView {
            summary,
            market,
            daily_quote,
        })
    }

    pub fn settings(&self) -> Settings {
        self.storage.get(SETTINGS_KEY).unwrap_or_default()
    }

    pub fn save_settings(&self, settings: &Settings) {
        self.storage.set(SETTINGS_KEY, settings);
    }
}
