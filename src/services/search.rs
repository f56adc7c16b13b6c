//! 股票搜索
//!
//! 在预构建的搜索索引上按固定权重打分，返回匹配度最高的前 10 条。
//! 索引不可用时退回到在股票列表上做包含匹配。

use crate::models::{SearchIndexEntry, SearchMatch, StockRecord};

use super::screener;

/// 最多返回的搜索结果数
pub const MAX_RESULTS: usize = 10;

/// 在搜索索引上打分检索
///
/// 打分规则（可叠加）：
/// - 代码精确匹配 +100，包含匹配 +80
/// - 名称精确匹配 +90，包含匹配 +70
/// - 行业包含匹配 +30
/// - 每个关键词包含匹配 +20
///
/// 0 分条目不进入结果；按分数降序稳定排序后截断
pub fn search_index(entries: &[SearchIndexEntry], query: &str) -> Vec<SearchMatch> {
    let query = query.trim();
    if query.is_empty() {
        return Vec::new();
    }
    let query_lower = query.to_lowercase();
    let query_upper = query.to_uppercase();

    let mut results = Vec::new();
    for entry in entries {
        let mut score = 0u32;

        if entry.code == query || entry.code == query_upper {
            score += 100;
        } else if entry.code.to_lowercase().contains(&query_lower) {
            score += 80;
        }

        if entry.name == query {
            score += 90;
        } else if entry.name.to_lowercase().contains(&query_lower) {
            score += 70;
        }

        if !entry.industry.is_empty() && entry.industry.to_lowercase().contains(&query_lower) {
            score += 30;
        }

        for keyword in &entry.keywords {
            if keyword.to_lowercase().contains(&query_lower) {
                score += 20;
            }
        }

        if score > 0 {
            results.push(SearchMatch {
                entry: entry.clone(),
                search_score: score,
            });
        }
    }

    results.sort_by(|a, b| b.search_score.cmp(&a.search_score));
    results.truncate(MAX_RESULTS);
    results
}

/// 索引不可用时的降级检索：在当前列表上做包含匹配
pub fn search_records(records: &[StockRecord], query: &str) -> Vec<SearchMatch> {
    let entries: Vec<SearchIndexEntry> = records
        .iter()
        .filter(|stock| screener::matches_keyword(stock, query.trim()))
        .map(SearchIndexEntry::from)
        .collect();
    search_index(&entries, query)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MarketType;

    fn entry(code: &str, name: &str) -> SearchIndexEntry {
        SearchIndexEntry {
            code: code.to_string(),
            name: name.to_string(),
            market: MarketType::A,
            industry: String::new(),
            keywords: Vec::new(),
        }
    }

    /// 代码精确匹配得 100 分，不相关条目不出现
    #[test]
    fn test_exact_code_match() {
        let entries = vec![entry("000001", "平安银行"), entry("000002", "万科A")];
        let results = search_index(&entries, "000001");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].entry.code, "000001");
        assert_eq!(results[0].search_score, 100);
    }

    /// 名称包含匹配得 70 分
    #[test]
    fn test_name_substring_match() {
        let entries = vec![entry("000001", "平安银行"), entry("000002", "万科A")];
        let results = search_index(&entries, "银行");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].entry.code, "000001");
        assert_eq!(results[0].search_score, 70);
    }

    /// 名称精确匹配得 90 分
    #[test]
    fn test_exact_name_match() {
        let entries = vec![entry("000001", "平安银行")];
        let results = search_index(&entries, "平安银行");
        assert_eq!(results[0].search_score, 90);
    }

    /// 行业与关键词加分可叠加
    #[test]
    fn test_industry_and_keyword_scores() {
        let mut e = entry("000001", "平安银行");
        e.industry = "银行".to_string();
        e.keywords = vec!["银行".to_string(), "平安银行股份".to_string()];
        // 名称包含 70 + 行业 30 + 两个关键词各 20
        let results = search_index(&[e], "银行");
        assert_eq!(results[0].search_score, 140);
    }

    /// 结果按分数降序，同分保持输入顺序
    #[test]
    fn test_ranking_stability() {
        let entries = vec![
            entry("600001", "邯郸钢铁"),
            entry("000001", "平安银行"),
            entry("100001", "国债一期"),
        ];
        // "0001" 对三条代码都是包含匹配，各 80 分，保持输入顺序
        let results = search_index(&entries, "0001");
        let codes: Vec<&str> = results.iter().map(|m| m.entry.code.as_str()).collect();
        assert_eq!(codes, vec!["600001", "000001", "100001"]);
    }

    /// 结果截断到前 10 条
    #[test]
    fn test_truncation() {
        let entries: Vec<SearchIndexEntry> = (0..20)
            .map(|i| entry(&format!("6000{:02}", i), "测试股份"))
            .collect();
        assert_eq!(search_index(&entries, "测试").len(), MAX_RESULTS);
    }

    /// 空查询返回空结果
    #[test]
    fn test_empty_query() {
        let entries = vec![entry("000001", "平安银行")];
        assert!(search_index(&entries, "  ").is_empty());
    }

    /// 降级检索在股票列表上做包含匹配
    #[test]
    fn test_fallback_over_records() {
        let records = vec![
            StockRecord {
                code: "000001".to_string(),
                name: "平安银行".to_string(),
                industry: "银行".to_string(),
                ..Default::default()
            },
            StockRecord {
                code: "600519".to_string(),
                name: "贵州茅台".to_string(),
                industry: "食品饮料".to_string(),
                ..Default::default()
            },
        ];
        let results = search_records(&records, "茅台");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].entry.code, "600519");
    }
}
