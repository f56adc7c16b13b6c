//! 投资金句服务
//!
//! 金句文档整体带版本号，本地用版本门控决定走缓存还是走网络：
//! 远程版本更高时失效缓存并记住新版本，其余情况（包括拉取失败）都按无更新处理。

use anyhow::{anyhow, bail, Result};
use chrono::{Datelike, Utc};
use chrono_tz::Asia::Shanghai;
use std::cmp::Ordering;
use std::sync::Arc;
use std::time::Duration;

use crate::models::{Quote, QuotesDocument, VersionCheck};

use super::cache::CacheStore;
use super::fetch::FetchClient;
use super::sample_data;
use super::storage::LocalStorage;

const QUOTES_PATH: &str = "/laoliu_quotes.json";
const QUOTES_CACHE_KEY: &str = "quotes_cache";
const QUOTES_VERSION_KEY: &str = "quotes_version";
/// 本地没有记录过版本时的起点
const DEFAULT_LOCAL_VERSION: &str = "0.0.0";
/// 远程文档缺失版本字段时按 1.0.0 处理
const DEFAULT_REMOTE_VERSION: &str = "1.0.0";

/// 按数字分段比较版本号
///
/// 各段按 '.' 拆开后数值比较，缺失的段按 0 补齐，
/// 所以 "1.0" 与 "1.0.0" 相等，"1.2.0" 小于 "1.10.0"
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let parse = |version: &str| -> Vec<u64> {
        version
            .split('.')
            .map(|seg| seg.trim().parse::<u64>().unwrap_or(0))
            .collect()
    };
    let mut left = parse(a);
    let mut right = parse(b);
    let len = left.len().max(right.len());
    left.resize(len, 0);
    right.resize(len, 0);
    left.cmp(&right)
}

pub struct QuoteService {
    fetch: Arc<FetchClient>,
    cache: Arc<CacheStore>,
    storage: Arc<LocalStorage>,
    /// 金句缓存的 TTL（比普通数据长，默认 24 小时）
    quotes_ttl: Duration,
}

impl QuoteService {
    pub fn new(
        fetch: Arc<FetchClient>,
        cache: Arc<CacheStore>,
        storage: Arc<LocalStorage>,
        quotes_ttl: Duration,
    ) -> Self {
        Self {
            fetch,
            cache,
            storage,
            quotes_ttl,
        }
    }

    /// 检查远程金句版本
    ///
    /// 远程版本更高时失效本地缓存并记住新版本；
    /// 任何拉取失败都吞掉，按无更新返回本地版本
    pub async fn check_version(&self) -> VersionCheck {
        let local: String = self
            .storage
            .get(QUOTES_VERSION_KEY)
            .unwrap_or_else(|| DEFAULT_LOCAL_VERSION.to_string());

        // 绕过缓存直接取远程文档，否则读到的版本还是缓存里的旧值
        let options = self.fetch.options(QUOTES_PATH).silent();
        match self.fetch.fetch_with_options(options).await {
            Ok(doc) => {
                let remote = doc
                    .get("version")
                    .and_then(|v| v.as_str())
                    .unwrap_or(DEFAULT_REMOTE_VERSION)
                    .to_string();
                if compare_versions(&remote, &local) == Ordering::Greater {
                    log::info!("金句数据有新版本: {} -> {}", local, remote);
                    self.cache.invalidate(QUOTES_CACHE_KEY);
                    self.storage.set(QUOTES_VERSION_KEY, &remote);
                    VersionCheck {
                        has_update: true,
                        version: remote,
                    }
                } else {
                    VersionCheck {
                        has_update: false,
                        version: local,
                    }
                }
            }
            Err(e) => {
                log::warn!("检查金句版本失败: {}", e);
                VersionCheck {
                    has_update: false,
                    version: local,
                }
            }
        }
    }

    /// 获取完整金句文档
    ///
    /// 无更新时优先读缓存；有更新或缓存失效时走网络并回填缓存；
    /// 网络失败再依次退回缓存和内置样例
    pub async fn get_quotes(&self) -> Result<QuotesDocument> {
        let check = self.check_version().await;

        if !check.has_update {
            if let Some(cached) = self.read_cached() {
                return Ok(cached);
            }
        }

        let options = self.fetch.options(QUOTES_PATH).silent();
        match self.fetch.fetch_with_options(options).await {
            Ok(value) => {
                self.cache
                    .set_with_ttl(QUOTES_CACHE_KEY, &value, self.quotes_ttl);
                Ok(serde_json::from_value(value)?)
            }
            Err(e) => {
                if let Some(cached) = self.read_cached() {
                    return Ok(cached);
                }
                log::warn!("金句数据加载失败，使用内置样例: {}", e);
                let value = sample_data::for_path(QUOTES_PATH)
                    .ok_or_else(|| anyhow!("内置金句数据缺失"))?;
                Ok(serde_json::from_value(value)?)
            }
        }
    }

    fn read_cached(&self) -> Option<QuotesDocument> {
        let value = self.cache.get(QUOTES_CACHE_KEY)?;
        serde_json::from_value(value).ok()
    }

    /// 每日一句
    ///
    /// 按一年中的第几天对金句总数取模，保证当天返回固定的一条
    pub async fn daily_quote(&self) -> Result<Quote> {
        let doc = self.get_quotes().await?;
        let all: Vec<&Quote> = doc
            .categories
            .values()
            .flat_map(|category| category.quotes.iter())
            .collect();
        if all.is_empty() {
            bail!("金句数据为空");
        }
        let day = Utc::now().with_timezone(&Shanghai).ordinal() as usize;
        Ok(all[day % all.len()].clone())
    }
}
