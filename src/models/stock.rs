//! 股票数据模型
//!
//! 定义股票相关的数据结构，包括：
//! - 股票推荐记录（A股/港股）
//! - 股票列表文档与列表视图
//! - 搜索索引条目与搜索结果

use regex::Regex;
use serde::{Deserialize, Serialize};

/// 列表接口单页最多返回的股票数量
pub const STOCK_PAGE_SIZE: usize = 100;

/// 市场类型
///
/// 数据文件里用大写（"A"/"HK"），查询参数里用小写（"a"/"hk"）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum MarketType {
    #[default]
    #[serde(rename = "A", alias = "a")]
    A,
    #[serde(rename = "HK", alias = "hk")]
    Hk,
}

impl MarketType {
    /// 解析查询参数中的市场类型
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "a" => Some(MarketType::A),
            "hk" => Some(MarketType::Hk),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MarketType::A => "A",
            MarketType::Hk => "HK",
        }
    }

    /// 对应的远程数据文件路径
    pub fn data_path(self) -> &'static str {
        match self {
            MarketType::A => "/stocks_a.json",
            MarketType::Hk => "/stocks_hk.json",
        }
    }

    /// 对应的缓存键
    pub fn cache_key(self) -> &'static str {
        match self {
            MarketType::A => "stocks_a",
            MarketType::Hk => "stocks_hk",
        }
    }

    pub fn other(self) -> Self {
        match self {
            MarketType::A => MarketType::Hk,
            MarketType::Hk => MarketType::A,
        }
    }

    /// 校验股票代码格式（A股6位数字，港股5位数字）
    pub fn is_valid_code(self, code: &str) -> bool {
        let pattern = match self {
            MarketType::A => r"^\d{6}$",
            MarketType::Hk => r"^\d{5}$",
        };
        Regex::new(pattern).unwrap().is_match(code)
    }

    /// 规整股票代码：去掉非数字字符并补齐前导 0
    pub fn format_code(self, code: &str) -> String {
        let digits: String = code.trim().chars().filter(|c| c.is_ascii_digit()).collect();
        let width = match self {
            MarketType::A => 6,
            MarketType::Hk => 5,
        };
        if digits.len() <= width {
            format!("{:0>width$}", digits, width = width)
        } else {
            digits
        }
    }
}

/// 推荐等级
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    StrongBuy,
    Buy,
    #[default]
    Hold,
    Sell,
    StrongSell,
}

/// 股票推荐记录
///
/// 来自预计算的数据文件，拉取后整体替换、不做字段级更新
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StockRecord {
    /// 股票代码
    pub code: String,
    /// 股票名称
    pub name: String,
    /// 所属市场
    #[serde(default)]
    pub market_type: MarketType,
    /// 当前价格
    #[serde(default)]
    pub current_price: f64,
    /// 涨跌幅（百分比）
    #[serde(default)]
    pub change_percent: f64,
    /// 成交量
    #[serde(default)]
    pub volume: Option<u64>,
    /// 市值
    #[serde(default)]
    pub market_cap: Option<f64>,
    /// 市盈率（部分标的无意义，为空）
    #[serde(default)]
    pub pe_ratio: Option<f64>,
    /// 市净率
    #[serde(default)]
    pub pb_ratio: Option<f64>,
    /// 市销率
    #[serde(default)]
    pub ps_ratio: Option<f64>,
    /// 股息率
    #[serde(default)]
    pub dividend_yield: Option<f64>,
    /// 净资产收益率
    #[serde(default)]
    pub roe: Option<f64>,
    /// 总资产收益率
    #[serde(default)]
    pub roa: Option<f64>,
    /// 负债率
    #[serde(default)]
    pub debt_ratio: Option<f64>,
    /// 所属行业
    #[serde(default)]
    pub industry: String,
    /// 推荐等级
    #[serde(default)]
    pub recommendation: Recommendation,
    /// 原始综合评分（部分数据源为 0-1 小数）
    #[serde(default)]
    pub total_score: Option<f64>,
    /// 原始老刘评分（0-100）
    #[serde(default)]
    pub laoliu_score: Option<f64>,
    /// 归一化后的综合评分（0-100），数据入库时填充
    #[serde(default)]
    pub score: f64,
    /// 目标价
    #[serde(default)]
    pub target_price: Option<f64>,
    /// 止损价
    #[serde(default)]
    pub stop_loss: Option<f64>,
    /// 推荐理由
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub update_time: Option<String>,
}

impl StockRecord {
    /// 数据入库归一化：补全市场类型，统一评分口径
    pub fn normalize(&mut self, market: MarketType) {
        self.market_type = market;
        self.score = canonical_score(self.total_score, self.laoliu_score);
    }
}

/// 把两种历史评分口径统一成 0-100
///
/// 老数据源的 total_score 是 0-1 小数，laoliu_score 是 0-100 整数
pub fn canonical_score(total_score: Option<f64>, laoliu_score: Option<f64>) -> f64 {
    if let Some(score) = laoliu_score {
        return score;
    }
    match total_score {
        Some(s) if s <= 1.0 => s * 100.0,
        Some(s) => s,
        None => 0.0,
    }
}

/// 股票列表数据文档
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockListDocument {
    #[serde(default)]
    pub stocks: Vec<StockRecord>,
    #[serde(default)]
    pub update_time: String,
}

/// 股票列表响应视图
#[derive(Debug, Serialize)]
pub struct StockListView {
    pub stocks: Vec<StockRecord>,
    pub total_count: usize,
    pub filtered_count: usize,
    pub has_more: bool,
    pub update_time: String,
}

impl StockListView {
    /// 按单页上限截断筛选结果
    pub fn page(total: usize, filtered: Vec<StockRecord>, update_time: String) -> Self {
        let filtered_count = filtered.len();
        let mut stocks = filtered;
        stocks.truncate(STOCK_PAGE_SIZE);
        Self {
            has_more: filtered_count > stocks.len(),
            total_count: total,
            filtered_count,
            stocks,
            update_time,
        }
    }
}

/// 数据导入结果
#[derive(Debug, Serialize)]
pub struct RefreshReport {
    pub market: MarketType,
    pub imported: usize,
    pub update_time: String,
}

/// 搜索索引条目（股票记录面向搜索的精简投影）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchIndexEntry {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub market: MarketType,
    #[serde(default)]
    pub industry: String,
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl From<&StockRecord> for SearchIndexEntry {
    fn from(stock: &StockRecord) -> Self {
        Self {
            code: stock.code.clone(),
            name: stock.name.clone(),
            market: stock.market_type,
            industry: stock.industry.clone(),
            keywords: Vec::new(),
        }
    }
}

/// 搜索索引文档，按股票代码组织
#[derive(Debug, Clone, Deserialize)]
pub struct SearchIndexDocument {
    #[serde(default)]
    pub stocks: std::collections::BTreeMap<String, SearchIndexEntry>,
}

/// 带匹配度的搜索结果
#[derive(Debug, Clone, Serialize)]
pub struct SearchMatch {
    #[serde(flatten)]
    pub entry: SearchIndexEntry,
    pub search_score: u32,
}
