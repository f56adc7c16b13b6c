//! 筛选条件模型
//!
//! 同时用作筛选引擎的输入和列表接口的查询参数

use serde::Deserialize;

use super::stock::{MarketType, Recommendation};

/// 股票筛选条件
///
/// 每个字段都是可选的，缺省表示该维度不做限制；所有生效条件按与关系组合
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilterCriteria {
    /// 最低价格
    pub min_price: Option<f64>,
    /// 最高价格
    pub max_price: Option<f64>,
    /// 最低市盈率
    pub min_pe: Option<f64>,
    /// 最高市盈率
    pub max_pe: Option<f64>,
    /// 最低净资产收益率
    pub min_roe: Option<f64>,
    /// 行业（精确匹配）
    pub industry: Option<String>,
    /// 推荐等级（精确匹配）
    pub recommendation: Option<Recommendation>,
    /// 最低综合评分（按 0-100 口径）
    pub min_score: Option<f64>,
    /// 关键词，对代码/名称/行业做不区分大小写的包含匹配
    pub keyword: Option<String>,
}

/// 快捷筛选预设，固定不可配置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuickFilter {
    HighRoe,
    LowPe,
    StrongBuy,
    HighScore,
}

impl QuickFilter {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "high_roe" => Some(QuickFilter::HighRoe),
            "low_pe" => Some(QuickFilter::LowPe),
            "strong_buy" => Some(QuickFilter::StrongBuy),
            "high_score" => Some(QuickFilter::HighScore),
            _ => None,
        }
    }

    /// 展示用名称
    pub fn label(self) -> &'static str {
        match self {
            QuickFilter::HighRoe => "高ROE (≥15%)",
            QuickFilter::LowPe => "低估值 (PE≤20)",
            QuickFilter::StrongBuy => "强推股票",
            QuickFilter::HighScore => "高分股票 (≥80分)",
        }
    }
}

/// 市场查询参数，缺省为 A 股
#[derive(Debug, Deserialize)]
pub struct MarketQuery {
    pub market: Option<String>,
}

impl MarketQuery {
    /// 解析市场参数；返回 None 表示参数值无法识别
    pub fn resolve(&self) -> Option<MarketType> {
        match self.market.as_deref() {
            None | Some("") => Some(MarketType::A),
            Some(m) => MarketType::parse(m),
        }
    }
}
