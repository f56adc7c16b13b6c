//! 投资金句数据模型
//!
//! 金句按分类组织，整个文档带一个版本号，版本升级时整体替换本地缓存

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

fn default_version() -> String {
    "1.0.0".to_string()
}

/// 单条投资金句
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quote {
    pub id: String,
    /// 金句内容
    pub content: String,
    /// 出处
    pub author: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// 金句分类
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteCategory {
    /// 分类展示名
    pub name: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub quotes: Vec<Quote>,
}

/// 金句文档
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuotesDocument {
    /// 文档版本号，缺失时按 1.0.0 处理
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub categories: BTreeMap<String, QuoteCategory>,
    #[serde(default)]
    pub update_time: String,
}

/// 版本检查结果
#[derive(Debug, Clone, Serialize)]
pub struct VersionCheck {
    pub has_update: bool,
    pub version: String,
}
