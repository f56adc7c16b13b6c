//! 市场数据模型
//!
//! 包括首页汇总、市场择时与持仓组合

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use super::quote::Quote;

fn default_portfolio_risk() -> String {
    "medium".to_string()
}

fn default_sentiment() -> String {
    "neutral".to_string()
}

fn default_position() -> f64 {
    0.5
}

/// 推荐数量统计
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RecommendationsCount {
    #[serde(default)]
    pub a_stocks: u32,
    #[serde(default)]
    pub hk_stocks: u32,
    #[serde(default)]
    pub total: u32,
}

/// 两市精选股票
///
/// 条目是精简的股票摘要，字段随数据源版本变化，按原样透传
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TopPicks {
    #[serde(default)]
    pub a_stocks: Vec<Value>,
    #[serde(default)]
    pub hk_stocks: Vec<Value>,
}

/// 首页汇总文档
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryDocument {
    #[serde(default)]
    pub update_time: String,
    #[serde(default)]
    pub market_status: Value,
    #[serde(default)]
    pub recommendations_count: RecommendationsCount,
    #[serde(default)]
    pub top_picks: TopPicks,
    #[serde(default = "default_portfolio_risk")]
    pub portfolio_risk: String,
    #[serde(default)]
    pub investment_suggestions: Vec<String>,
}

/// 市场择时文档
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketTimingDocument {
    /// 市场情绪
    #[serde(default = "default_sentiment")]
    pub market_sentiment: String,
    /// 建议仓位（0-1）
    #[serde(default = "default_position")]
    pub recommended_position: f64,
    #[serde(default)]
    pub signals: Vec<String>,
    #[serde(default)]
    pub analysis_time: String,
    /// 择时指标等扩展字段，按原样透传
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// 面向展示的择时视图，仓位换算成 0-10 档
#[derive(Debug, Clone, Serialize)]
pub struct MarketTimingView {
    pub sentiment: String,
    pub position_level: u8,
    pub signals: Vec<String>,
    pub update_time: String,
}

impl From<MarketTimingDocument> for MarketTimingView {
    fn from(doc: MarketTimingDocument) -> Self {
        Self {
            sentiment: doc.market_sentiment,
            position_level: (doc.recommended_position * 10.0).round() as u8,
            signals: doc.signals,
            update_time: doc.analysis_time,
        }
    }
}

/// 首页聚合视图
#[derive(Debug, Serialize)]
pub struct DashboardView {
    pub summary: SummaryDocument,
    pub market: MarketTimingView,
    pub daily_quote: Option<Quote>,
}

/// 单只持仓
#[derive(Debug, Clone, Serialize)]
pub struct PortfolioHolding {
    pub code: String,
    pub name: String,
    pub shares: f64,
    pub cost: f64,
    pub current: f64,
    pub profit: f64,
    pub profit_rate: f64,
}

impl PortfolioHolding {
    pub fn new(code: &str, name: &str, shares: f64, cost: f64, current: f64) -> Self {
        let profit = shares * (current - cost);
        let profit_rate = if cost > 0.0 {
            (current - cost) / cost * 100.0
        } else {
            0.0
        };
        Self {
            code: code.to_string(),
            name: name.to_string(),
            shares,
            cost,
            current,
            profit,
            profit_rate,
        }
    }
}

/// 持仓组合汇总
#[derive(Debug, Clone, Serialize)]
pub struct PortfolioSummary {
    pub holdings: Vec<PortfolioHolding>,
    pub total_value: f64,
    pub total_cost: f64,
    pub total_profit: f64,
    pub profit_rate: f64,
}

impl PortfolioSummary {
    pub fn from_holdings(holdings: Vec<PortfolioHolding>) -> Self {
        let total_value: f64 = holdings.iter().map(|h| h.shares * h.current).sum();
        let total_cost: f64 = holdings.iter().map(|h| h.shares * h.cost).sum();
        let total_profit = total_value - total_cost;
        let profit_rate = if total_cost > 0.0 {
            total_profit / total_cost * 100.0
        } else {
            0.0
        };
        Self {
            holdings,
            total_value,
            total_cost,
            total_profit,
            profit_rate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 测试择时视图仓位换算
    #[test]
    fn test_timing_view_position_level() {
        let doc: MarketTimingDocument = serde_json::from_str(
            r#"{"market_sentiment":"bullish","recommended_position":0.6,"signals":["技术面偏多"]}"#,
        )
        .unwrap();
        let view = MarketTimingView::from(doc);
        assert_eq!(view.sentiment, "bullish");
        assert_eq!(view.position_level, 6);
    }

    /// 测试择时文档默认值
    #[test]
    fn test_timing_defaults() {
        let doc: MarketTimingDocument = serde_json::from_str("{}").unwrap();
        assert_eq!(doc.market_sentiment, "neutral");
        assert_eq!(doc.recommended_position, 0.5);
        assert!(doc.signals.is_empty());
    }

    /// 测试持仓组合汇总计算
    #[test]
    fn test_portfolio_totals() {
        let summary = PortfolioSummary::from_holdings(vec![
            PortfolioHolding::new("000001", "平安银行", 1000.0, 12.50, 13.20),
            PortfolioHolding::new("000002", "万科A", 500.0, 25.80, 24.90),
        ]);
        assert!((summary.total_value - (13200.0 + 12450.0)).abs() < 1e-6);
        assert!((summary.total_cost - (12500.0 + 12900.0)).abs() < 1e-6);
        assert!((summary.total_profit - 250.0).abs() < 1e-6);
        assert!(summary.holdings[1].profit < 0.0);
    }
}
