//! 市场数据服务
//!
//! 提供首页汇总、市场择时与持仓组合数据

use anyhow::Result;
use std::sync::Arc;

use crate::models::{
    MarketTimingDocument, MarketTimingView, PortfolioHolding, PortfolioSummary, SummaryDocument,
};

use super::fetch::FetchClient;

const SUMMARY_PATH: &str = "/summary.json";
const SUMMARY_CACHE_KEY: &str = "summary_data";
const TIMING_PATH: &str = "/market_timing.json";
const TIMING_CACHE_KEY: &str = "market_timing";

pub struct MarketService {
    fetch: Arc<FetchClient>,
}

impl MarketService {
    pub fn new(fetch: Arc<FetchClient>) -> Self {
        Self { fetch }
    }

    /// 获取首页汇总数据（缓存优先）
    pub async fn get_summary(&self) -> Result<SummaryDocument> {
        let value = self
            .fetch
            .fetch_by_path(SUMMARY_PATH, Some(SUMMARY_CACHE_KEY))
            .await?;
        Ok(serde_json::from_value(value)?)
    }

    /// 获取市场择时文档（缓存优先）
    pub async fn get_market_timing(&self) -> Result<MarketTimingDocument> {
        let value = self
            .fetch
            .fetch_by_path(TIMING_PATH, Some(TIMING_CACHE_KEY))
            .await?;
        Ok(serde_json::from_value(value)?)
    }

    /// 面向展示的择时视图
    pub async fn market_timing_view(&self) -> Result<MarketTimingView> {
        Ok(MarketTimingView::from(self.get_market_timing().await?))
    }

    /// 持仓组合汇总
    ///
    /// 持仓列表目前是内置数据，汇总指标在服务端计算
    pub fn get_portfolio(&self) -> PortfolioSummary {
        PortfolioSummary::from_holdings(vec![
            PortfolioHolding::new("000001", "平安银行", 1000.0, 12.50, 13.20),
            PortfolioHolding::new("000002", "万科A", 500.0, 25.80, 24.90),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DataConfig;
    use crate::services::cache::CacheStore;
    use crate::services::storage::LocalStorage;
    use std::path::Path;
    use std::time::Duration;

    fn dev_market_service(dir: &Path) -> MarketService {
        let storage = Arc::new(LocalStorage::new(dir));
        let cache = Arc::new(CacheStore::new(storage, Duration::from_secs(3600)));
        let config = DataConfig {
            dev_mode: true,
            ..DataConfig::default()
        };
        MarketService::new(Arc::new(FetchClient::new(&config, cache)))
    }

    /// 汇总文档可以正常取到并解析
    #[tokio::test]
    async fn test_get_summary() {
        let dir = tempfile::tempdir().unwrap();
        let service = dev_market_service(dir.path());

        let summary = service.get_summary().await.unwrap();
        assert_eq!(summary.recommendations_count.total, 6);
        assert!(!summary.top_picks.a_stocks.is_empty());
    }

    /// 择时视图仓位换算成 0-10 档
    #[tokio::test]
    async fn test_market_timing_view() {
        let dir = tempfile::tempdir().unwrap();
        let service = dev_market_service(dir.path());

        let view = service.market_timing_view().await.unwrap();
        assert_eq!(view.sentiment, "neutral");
        assert_eq!(view.position_level, 6);
    }

    /// 持仓组合汇总指标自洽
    #[test]
    fn test_portfolio() {
        let dir = tempfile::tempdir().unwrap();
        let service = dev_market_service(dir.path());

        let portfolio = service.get_portfolio();
        assert_eq!(portfolio.holdings.len(), 2);
        assert!(
            (portfolio.total_profit - (portfolio.total_value - portfolio.total_cost)).abs() < 1e-6
        );
    }
}
