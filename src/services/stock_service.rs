//! 股票数据服务
//!
//! 负责股票列表的加载与入库归一化、条件筛选、快捷筛选、
//! 搜索（含搜索历史）以及一键导入。

use anyhow::{bail, Result};
use std::sync::Arc;

use crate::models::{
    FilterCriteria, MarketType, QuickFilter, RefreshReport, SearchIndexDocument, SearchIndexEntry,
    SearchMatch, StockListDocument, StockListView,
};

use super::cache::{now_millis, CacheStore};
use super::fetch::FetchClient;
use super::screener;
use super::search;
use super::storage::LocalStorage;

const SEARCH_INDEX_PATH: &str = "/stock_search_index.json";
const SEARCH_INDEX_CACHE_KEY: &str = "stock_search";
const SEARCH_HISTORY_KEY: &str = "stock_search_history";
const STOCKS_LAST_UPDATE_KEY: &str = "stocks_last_update";

/// 搜索历史最多保留的条数
const MAX_SEARCH_HISTORY: usize = 10;

pub struct StockService {
    fetch: Arc<FetchClient>,
    cache: Arc<CacheStore>,
    storage: Arc<LocalStorage>,
}

impl StockService {
    pub fn new(
        fetch: Arc<FetchClient>,
        cache: Arc<CacheStore>,
        storage: Arc<LocalStorage>,
    ) -> Self {
        Self {
            fetch,
            cache,
            storage,
        }
    }

    /// 加载指定市场的股票列表并做入库归一化
    async fn load_market(&self, market: MarketType) -> Result<StockListDocument> {
        let value = self
            .fetch
            .fetch_by_path(market.data_path(), Some(market.cache_key()))
            .await?;
        let mut doc: StockListDocument = serde_json::from_value(value)?;
        if doc.stocks.is_empty() {
            bail!("股票数据为空");
        }
        for stock in &mut doc.stocks {
            stock.normalize(market);
        }
        Ok(doc)
    }

    /// 按条件筛选股票列表
    pub async fn list(&self, market: MarketType, criteria: &FilterCriteria) -> Result<StockListView> {
        let doc = self.load_market(market).await?;
        let filtered = screener::apply(&doc.stocks, criteria);
        Ok(StockListView::page(
            doc.stocks.len(),
            filtered,
            doc.update_time,
        ))
    }

    /// 应用快捷筛选预设
    pub async fn quick_filter(
        &self,
        market: MarketType,
        preset: QuickFilter,
    ) -> Result<StockListView> {
        let doc = self.load_market(market).await?;
        let filtered = screener::apply_quick(&doc.stocks, preset);
        Ok(StockListView::page(
            doc.stocks.len(),
            filtered,
            doc.update_time,
        ))
    }

    /// 搜索股票并记录搜索历史
    ///
    /// 优先用预构建索引；索引不可用时退回在当前市场列表上做包含匹配
    pub async fn search(&self, market: MarketType, query: &str) -> Result<Vec<SearchMatch>> {
        self.add_search_history(query);

        match self.load_search_index().await {
            Ok(entries) => Ok(search::search_index(&entries, query)),
            Err(e) => {
                log::warn!("搜索索引不可用，退回列表匹配: {}", e);
                let doc = self.load_market(market).await?;
                Ok(search::search_records(&doc.stocks, query))
            }
        }
    }

    async fn load_search_index(&self) -> Result<Vec<SearchIndexEntry>> {
        let value = self
            .fetch
            .fetch_by_path(SEARCH_INDEX_PATH, Some(SEARCH_INDEX_CACHE_KEY))
            .await?;
        let doc: SearchIndexDocument = serde_json::from_value(value)?;
        if doc.stocks.is_empty() {
            bail!("搜索索引为空");
        }
        Ok(doc.stocks.into_values().collect())
    }

    /// 一键导入最新股票数据
    ///
    /// 清掉相关缓存后强制从网络拉取当前市场数据并回填缓存，
    /// 随后在后台预加载另一个市场
    pub async fn refresh(&self, market: MarketType) -> Result<RefreshReport> {
        for key in ["stocks_a", "stocks_hk", "summary_data", "market_timing"] {
            self.cache.invalidate(key);
        }

        let options = self.fetch.options(market.data_path()).retry(3).silent();
        let value = self.fetch.fetch_with_options(options).await?;
        let mut doc: StockListDocument = match serde_json::from_value(value.clone()) {
            Ok(doc) => doc,
            Err(_) => bail!("导入的数据格式错误"),
        };
        if doc.stocks.is_empty() {
            bail!("导入的数据格式错误");
        }
        for stock in &mut doc.stocks {
            stock.normalize(market);
        }

        self.cache.set(market.cache_key(), &value);
        self.storage.set(STOCKS_LAST_UPDATE_KEY, &now_millis());
        log::info!("导入 {} 市场股票 {} 只", market.as_str(), doc.stocks.len());

        self.preload_other_market(market.other());

        Ok(RefreshReport {
            market,
            imported: doc.stocks.len(),
            update_time: doc.update_time,
        })
    }

    /// 后台预加载另一个市场的数据，失败只记日志
    fn preload_other_market(&self, market: MarketType) {
        let fetch = Arc::clone(&self.fetch);
        let cache = Arc::clone(&self.cache);
        tokio::spawn(async move {
            let options = fetch.options(market.data_path()).retry(1).silent();
            match fetch.fetch_with_options(options).await {
                Ok(value) => {
                    if !value.is_null() {
                        cache.set(market.cache_key(), &value);
                    }
                    log::info!("预加载 {} 市场数据成功", market.as_str());
                }
                Err(e) => log::info!("预加载 {} 市场数据失败: {}", market.as_str(), e),
            }
        });
    }

    // ==================== 搜索历史 ====================

    pub fn search_history(&self) -> Vec<String> {
        self.storage.get(SEARCH_HISTORY_KEY).unwrap_or_default()
    }

    /// 记录一次搜索：去重后插到最前面，最多保留 10 条
    pub fn add_search_history(&self, query: &str) {
        let query = query.trim();
        if query.is_empty() {
            return;
        }
        let mut history = self.search_history();
        history.retain(|item| item != query);
        history.insert(0, query.to_string());
        history.truncate(MAX_SEARCH_HISTORY);
        self.storage.set(SEARCH_HISTORY_KEY, &history);
    }

    pub fn clear_search_history(&self) {
        self.storage.set(SEARCH_HISTORY_KEY, &Vec::<String>::new());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DataConfig;
    use std::path::Path;
    use std::time::Duration;

    /// 开发模式下的服务实例，数据来自内置样例
    fn dev_service(dir: &Path) -> StockService {
        let storage = Arc::new(LocalStorage::new(dir));
        let cache = Arc::new(CacheStore::new(
            Arc::clone(&storage),
            Duration::from_secs(3600),
        ));
        let config = DataConfig {
            dev_mode: true,
            ..DataConfig::default()
        };
        let fetch = Arc::new(FetchClient::new(&config, Arc::clone(&cache)));
        StockService::new(fetch, cache, storage)
    }

    /// 空条件列表返回全部股票并完成归一化
    #[tokio::test]
    async fn test_list_normalizes_scores() {
        let dir = tempfile::tempdir().unwrap();
        let service = dev_service(dir.path());

        let view = service
            .list(MarketType::A, &FilterCriteria::default())
            .await
            .unwrap();
        assert_eq!(view.total_count, view.filtered_count);
        // total_score 0.75 归一化成 75 分
        let pab = view.stocks.iter().find(|s| s.code == "000001").unwrap();
        assert_eq!(pab.score, 75.0);
        assert_eq!(pab.market_type, MarketType::A);
    }

    /// 快捷筛选在完整列表上生效
    #[tokio::test]
    async fn test_quick_filter() {
        let dir = tempfile::tempdir().unwrap();
        let service = dev_service(dir.path());

        let view = service
            .quick_filter(MarketType::A, QuickFilter::HighRoe)
            .await
            .unwrap();
        assert!(view.stocks.iter().all(|s| s.roe.unwrap_or(0.0) >= 15.0));
        assert!(view.filtered_count < view.total_count);
    }

    /// 搜索走索引并记录历史
    #[tokio::test]
    async fn test_search_records_history() {
        let dir = tempfile::tempdir().unwrap();
        let service = dev_service(dir.path());

        let results = service.search(MarketType::A, "茅台").await.unwrap();
        assert_eq!(results[0].entry.code, "600519");
        assert_eq!(service.search_history(), vec!["茅台".to_string()]);
    }

    /// 搜索历史去重、置顶且有上限
    #[test]
    fn test_search_history_bounds() {
        let dir = tempfile::tempdir().unwrap();
        let service = dev_service(dir.path());

        for i in 0..12 {
            service.add_search_history(&format!("关键词{}", i));
        }
        let history = service.search_history();
        assert_eq!(history.len(), MAX_SEARCH_HISTORY);
        assert_eq!(history[0], "关键词11");

        // 重复搜索会去重并置顶
        service.add_search_history("关键词5");
        let history = service.search_history();
        assert_eq!(history.len(), MAX_SEARCH_HISTORY);
        assert_eq!(history[0], "关键词5");
        assert_eq!(
            history.iter().filter(|q| q.as_str() == "关键词5").count(),
            1
        );
    }

    /// 清空搜索历史
    #[test]
    fn test_clear_search_history() {
        let dir = tempfile::tempdir().unwrap();
        let service = dev_service(dir.path());

        service.add_search_history("平安银行");
        service.clear_search_history();
        assert!(service.search_history().is_empty());
    }

    /// 一键导入返回导入数量
    #[tokio::test]
    async fn test_refresh() {
        let dir = tempfile::tempdir().unwrap();
        let service = dev_service(dir.path());

        let report = service.refresh(MarketType::A).await.unwrap();
        assert_eq!(report.imported, 4);
        assert_eq!(report.market, MarketType::A);
    }
}
