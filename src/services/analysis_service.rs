//! 股票分析服务
//!
//! 基于预计算的分析样本提供个股分析结果，并维护本地分析历史：
//! 每次分析的完整记录单独落盘，历史索引最多保留 50 条。

use anyhow::{bail, Result};
use chrono::Utc;
use chrono_tz::Asia::Shanghai;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

use crate::models::{canonical_score, AnalysisHistoryEntry, MarketType};

use super::cache::now_millis;
use super::fetch::FetchClient;
use super::storage::LocalStorage;

const SAMPLES_PATH: &str = "/analysis_samples.json";
const SAMPLES_CACHE_KEY: &str = "analysis_samples";
const HISTORY_KEY: &str = "analysis_history";

/// 分析历史最多保留的条数
const MAX_HISTORY: usize = 50;

#[derive(Debug, Deserialize)]
struct AnalysisSamplesDocument {
    #[serde(default)]
    analysis_results: Vec<Value>,
}

pub struct AnalysisService {
    fetch: Arc<FetchClient>,
    storage: Arc<LocalStorage>,
}

impl AnalysisService {
    pub fn new(fetch: Arc<FetchClient>, storage: Arc<LocalStorage>) -> Self {
        Self { fetch, storage }
    }

    /// 获取个股分析结果并写入分析历史
    pub async fn analyze(&self, code: &str, market: MarketType) -> Result<Value> {
        let code = market.format_code(code);
        if !market.is_valid_code(&code) {
            bail!("无效的股票代码: {}", code);
        }

        let value = self
            .fetch
            .fetch_by_path(SAMPLES_PATH, Some(SAMPLES_CACHE_KEY))
            .await?;
        let doc: AnalysisSamplesDocument = serde_json::from_value(value)?;

        let record = doc.analysis_results.into_iter().find(|record| {
            record
                .pointer("/basic_info/code")
                .and_then(|v| v.as_str())
                == Some(code.as_str())
        });
        let Some(record) = record else {
            bail!("未找到股票 {} 的分析数据", code);
        };

        self.save_history(&code, &record);
        Ok(record)
    }

    /// 写入分析历史；历史写失败不影响分析结果返回
    fn save_history(&self, code: &str, record: &Value) {
        let key = format!("analysis_{}_{}", code, now_millis());
        self.storage.set(&key, record);

        let total_score = record
            .pointer("/analysis_result/total_score")
            .and_then(|v| v.as_f64());
        let laoliu_score = record
            .pointer("/laoliu_evaluation/laoliu_score")
            .and_then(|v| v.as_f64());

        let entry = AnalysisHistoryEntry {
            code: code.to_string(),
            name: record
                .pointer("/basic_info/name")
                .and_then(|v| v.as_str())
                .unwrap_or(code)
                .to_string(),
            score: canonical_score(total_score, laoliu_score),
            time: Utc::now().with_timezone(&Shanghai).to_rfc3339(),
            key,
        };

        let mut history = self.history();
        history.insert(0, entry);
        history.truncate(MAX_HISTORY);
        self.storage.set(HISTORY_KEY, &history);
    }

    /// 分析历史索引，最近的在最前面
    pub fn history(&self) -> Vec<AnalysisHistoryEntry> {
        self.storage.get(HISTORY_KEY).unwrap_or_default()
    }

    /// 删除一条分析记录，同时清掉单独存储的完整数据
    pub fn delete(&self, key: &str) -> bool {
        // 只接受分析记录的键，避免误删其它存储
        if !key.starts_with("analysis_") {
            return false;
        }
        let mut history = self.history();
        let before = history.len();
        history.retain(|entry| entry.key != key);
        if history.len() == before {
            return false;
        }
        self.storage.remove(key);
        self.storage.set(HISTORY_KEY, &history);
        true
    }
}
