//! 股票筛选引擎
//!
//! 对股票列表做多条件组合筛选。所有生效条件按与关系组合，
//! 筛选保持输入顺序（稳定过滤，不排序）。

use crate::models::{FilterCriteria, QuickFilter, Recommendation, StockRecord};

/// 按筛选条件过滤股票列表
pub fn apply(records: &[StockRecord], criteria: &FilterCriteria) -> Vec<StockRecord> {
    records
        .iter()
        .filter(|stock| matches(stock, criteria))
        .cloned()
        .collect()
}

fn matches(stock: &StockRecord, c: &FilterCriteria) -> bool {
    if let Some(min) = c.min_price {
        if stock.current_price < min {
            return false;
        }
    }
    if let Some(max) = c.max_price {
        if stock.current_price > max {
            return false;
        }
    }

    // 缺失 PE 的记录不参与 PE 筛选，但不影响其它条件
    if c.min_pe.is_some() || c.max_pe.is_some() {
        let Some(pe) = stock.pe_ratio else {
            return false;
        };
        if let Some(min) = c.min_pe {
            if pe < min {
                return false;
            }
        }
        if let Some(max) = c.max_pe {
            if pe > max {
                return false;
            }
        }
    }

    if let Some(min) = c.min_roe {
        let Some(roe) = stock.roe else {
            return false;
        };
        if roe < min {
            return false;
        }
    }

    if let Some(industry) = c.industry.as_deref().filter(|s| !s.is_empty()) {
        if stock.industry != industry {
            return false;
        }
    }

    if let Some(recommendation) = c.recommendation {
        if stock.recommendation != recommendation {
            return false;
        }
    }

    if let Some(min) = c.min_score {
        if stock.score < min {
            return false;
        }
    }

    if let Some(keyword) = c.keyword.as_deref().filter(|s| !s.is_empty()) {
        if !matches_keyword(stock, keyword) {
            return false;
        }
    }

    true
}

/// 关键词匹配：对代码/名称/行业做不区分大小写的包含匹配
pub fn matches_keyword(stock: &StockRecord, keyword: &str) -> bool {
    let keyword = keyword.to_lowercase();
    stock.code.to_lowercase().contains(&keyword)
        || stock.name.to_lowercase().contains(&keyword)
        || stock.industry.to_lowercase().contains(&keyword)
}

/// 应用快捷筛选预设
///
/// 预设之间不可组合，每次都在完整列表上生效
pub fn apply_quick(records: &[StockRecord], preset: QuickFilter) -> Vec<StockRecord> {
    records
        .iter()
        .filter(|stock| match preset {
            QuickFilter::HighRoe => stock.roe.map_or(false, |roe| roe >= 15.0),
            QuickFilter::LowPe => stock.pe_ratio.map_or(false, |pe| pe > 0.0 && pe <= 20.0),
            QuickFilter::StrongBuy => matches!(
                stock.recommendation,
                Recommendation::StrongBuy | Recommendation::Buy
            ),
            QuickFilter::HighScore => stock.score >= 80.0,
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stock(code: &str, name: &str) -> StockRecord {
        StockRecord {
            code: code.to_string(),
            name: name.to_string(),
            ..Default::default()
        }
    }

    fn sample_records() -> Vec<StockRecord> {
        vec![
            StockRecord {
                current_price: 12.85,
                pe_ratio: Some(5.2),
                roe: Some(12.5),
                industry: "银行".to_string(),
                recommendation: Recommendation::Buy,
                score: 75.0,
                ..stock("000001", "平安银行")
            },
            StockRecord {
                current_price: 43.12,
                pe_ratio: Some(6.1),
                roe: Some(16.2),
                industry: "银行".to_string(),
                recommendation: Recommendation::StrongBuy,
                score: 82.0,
                ..stock("600036", "招商银行")
            },
            StockRecord {
                current_price: 1685.5,
                pe_ratio: Some(28.5),
                roe: Some(32.8),
                industry: "食品饮料".to_string(),
                recommendation: Recommendation::Buy,
                score: 78.0,
                ..stock("600519", "贵州茅台")
            },
            StockRecord {
                current_price: 24.9,
                pe_ratio: None,
                roe: None,
                industry: "房地产".to_string(),
                recommendation: Recommendation::Hold,
                score: 55.0,
                ..stock("000002", "万科A")
            },
        ]
    }

    /// 空列表任何条件都返回空
    #[test]
    fn test_empty_input() {
        let criteria = FilterCriteria {
            min_price: Some(10.0),
            ..Default::default()
        };
        assert!(apply(&[], &criteria).is_empty());
    }

    /// 空条件等于不过滤，且保持原始顺序
    #[test]
    fn test_empty_criteria_is_identity() {
        let records = sample_records();
        let result = apply(&records, &FilterCriteria::default());
        assert_eq!(result.len(), records.len());
        let codes: Vec<&str> = result.iter().map(|s| s.code.as_str()).collect();
        assert_eq!(codes, vec!["000001", "600036", "600519", "000002"]);
    }

    /// 相互矛盾的区间条件返回空
    #[test]
    fn test_contradictory_range() {
        let criteria = FilterCriteria {
            min_price: Some(100.0),
            max_price: Some(50.0),
            ..Default::default()
        };
        assert!(apply(&sample_records(), &criteria).is_empty());
    }

    /// PE 筛选排除缺失 PE 的记录
    #[test]
    fn test_pe_filter_excludes_missing() {
        let criteria = FilterCriteria {
            max_pe: Some(30.0),
            ..Default::default()
        };
        let result = apply(&sample_records(), &criteria);
        assert!(result.iter().all(|s| s.code != "000002"));
        assert_eq!(result.len(), 3);
    }

    /// 条件按与关系组合
    #[test]
    fn test_combined_criteria() {
        let criteria = FilterCriteria {
            industry: Some("银行".to_string()),
            min_roe: Some(15.0),
            ..Default::default()
        };
        let result = apply(&sample_records(), &criteria);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].code, "600036");
    }

    /// 关键词与其它条件同时生效
    #[test]
    fn test_keyword_with_filters() {
        let criteria = FilterCriteria {
            keyword: Some("银行".to_string()),
            min_score: Some(80.0),
            ..Default::default()
        };
        let result = apply(&sample_records(), &criteria);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "招商银行");
    }

    /// 空字符串条件视为未设置
    #[test]
    fn test_empty_string_is_unset() {
        let criteria = FilterCriteria {
            industry: Some(String::new()),
            keyword: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(apply(&sample_records(), &criteria).len(), 4);
    }

    /// 高ROE预设：roe 为 [10, 15, 20, null] 时只保留 15 和 20
    #[test]
    fn test_quick_high_roe() {
        let records = vec![
            StockRecord {
                roe: Some(10.0),
                ..stock("000010", "甲")
            },
            StockRecord {
                roe: Some(15.0),
                ..stock("000015", "乙")
            },
            StockRecord {
                roe: Some(20.0),
                ..stock("000020", "丙")
            },
            StockRecord {
                roe: None,
                ..stock("000030", "丁")
            },
        ];
        let result = apply_quick(&records, QuickFilter::HighRoe);
        let codes: Vec<&str> = result.iter().map(|s| s.code.as_str()).collect();
        assert_eq!(codes, vec!["000015", "000020"]);
    }

    /// 低估值预设要求 0 < PE <= 20
    #[test]
    fn test_quick_low_pe() {
        let records = vec![
            StockRecord {
                pe_ratio: Some(-3.0),
                ..stock("000010", "甲")
            },
            StockRecord {
                pe_ratio: Some(8.0),
                ..stock("000015", "乙")
            },
            StockRecord {
                pe_ratio: Some(35.0),
                ..stock("000020", "丙")
            },
        ];
        let result = apply_quick(&records, QuickFilter::LowPe);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].code, "000015");
    }

    /// 强推预设包含 strong_buy 和 buy 两档
    #[test]
    fn test_quick_strong_buy() {
        let result = apply_quick(&sample_records(), QuickFilter::StrongBuy);
        let codes: Vec<&str> = result.iter().map(|s| s.code.as_str()).collect();
        assert_eq!(codes, vec!["000001", "600036", "600519"]);
    }

    /// 高分预设按归一化评分 80 分为界
    #[test]
    fn test_quick_high_score() {
        let result = apply_quick(&sample_records(), QuickFilter::HighScore);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].code, "600036");
    }
}
