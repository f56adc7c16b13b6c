//! 分析历史模型

use serde::{Deserialize, Serialize};

/// 分析历史索引条目
///
/// `key` 指向单独存储的完整分析记录
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisHistoryEntry {
    pub code: String,
    pub name: String,
    /// 分析时的综合评分（0-100）
    pub score: f64,
    /// 分析时间（ISO 8601）
    pub time: String,
    pub key: String,
}
