//! 内置样例数据
//!
//! 开发模式下代替网络请求返回的本地数据集，按资源路径取数。
//! 线上环境只在数据完全取不到时作为最后的兜底。

use serde_json::{json, Value};

/// 按请求路径返回对应的样例数据
pub fn for_path(path: &str) -> Option<Value> {
    let name = path
        .trim_end_matches(".json")
        .rsplit('/')
        .next()
        .unwrap_or_default();
    match name {
        "summary" => Some(summary()),
        "market_timing" => Some(market_timing()),
        "stocks_a" => Some(stocks_a()),
        "stocks_hk" => Some(stocks_hk()),
        "laoliu_quotes" => Some(laoliu_quotes()),
        "stock_search_index" => Some(stock_search_index()),
        "analysis_samples" => Some(analysis_samples()),
        "miniprogram_config" => Some(miniprogram_config()),
        _ => None,
    }
}

fn summary() -> Value {
    json!({
        "update_time": "2025-08-24 14:58:19",
        "market_status": {
            "sentiment": "neutral",
            "recommended_position": 0.6,
            "main_signals": ["技术面显示震荡趋势", "基本面配置价值显现", "资金面相对宽松"]
        },
        "recommendations_count": { "a_stocks": 4, "hk_stocks": 2, "total": 6 },
        "top_picks": {
            "a_stocks": [
                { "code": "600036", "name": "招商银行", "current_price": 43.12, "change_percent": 1.2, "recommendation": "strong_buy", "total_score": 0.82 },
                { "code": "000001", "name": "平安银行", "current_price": 12.85, "change_percent": -0.8, "recommendation": "buy", "total_score": 0.75 }
            ],
            "hk_stocks": [
                { "code": "01398", "name": "工商银行", "current_price": 4.85, "change_percent": -0.2, "recommendation": "buy", "total_score": 0.78 },
                { "code": "00700", "name": "腾讯控股", "current_price": 412.5, "change_percent": -1.5, "recommendation": "buy", "total_score": 0.75 }
            ]
        },
        "portfolio_risk": "medium",
        "investment_suggestions": ["适度配置银行股", "关注消费龙头", "控制仓位风险"]
    })
}

fn market_timing() -> Value {
    json!({
        "analysis_time": "2025-08-24 14:58:19",
        "market_sentiment": "neutral",
        "recommended_position": 0.6,
        "signals": ["技术面显示震荡趋势", "基本面配置价值显现", "资金面相对宽松"],
        "overall_score": 0.65,
        "position_advice": {
            "current": 0.6,
            "target": 0.6,
            "action": "维持",
            "reason": "综合评分0.65，市场情绪neutral"
        },
        "risk_warning": ["关注美联储政策变化", "注意地缘政治风险", "警惕个股业绩地雷"]
    })
}

fn stocks_a() -> Value {
    json!({
        "update_time": "2025-08-24 14:58:19",
        "stocks": [
            {
                "code": "000001", "name": "平安银行", "market_type": "A",
                "current_price": 12.85, "change_percent": -0.8,
                "volume": 45230000u64, "market_cap": 248500000000.0,
                "pe_ratio": 5.2, "pb_ratio": 1.05, "ps_ratio": 2.1,
                "roe": 12.5, "roa": 0.8, "debt_ratio": 0.82, "dividend_yield": 3.2,
                "industry": "银行", "total_score": 0.75, "recommendation": "buy",
                "target_price": 14.50, "stop_loss": 11.00,
                "reason": "PE估值偏低，ROE12.5%表现优秀，银行行业配置价值显现"
            },
            {
                "code": "600036", "name": "招商银行", "market_type": "A",
                "current_price": 43.12, "change_percent": 1.2,
                "volume": 28560000u64, "market_cap": 1086000000000.0,
                "pe_ratio": 6.1, "pb_ratio": 1.05, "ps_ratio": 3.5,
                "roe": 16.2, "roa": 1.2, "debt_ratio": 0.82, "dividend_yield": 4.1,
                "industry": "银行", "total_score": 0.82, "recommendation": "strong_buy",
                "target_price": 48.00, "stop_loss": 37.00,
                "reason": "PE估值偏低，ROE16.2%表现优秀，分红收益率4.1%较高"
            },
            {
                "code": "600519", "name": "贵州茅台", "market_type": "A",
                "current_price": 1685.50, "change_percent": 0.8,
                "volume": 8520000u64, "market_cap": 2118000000000.0,
                "pe_ratio": 28.5, "pb_ratio": 8.2, "ps_ratio": 15.6,
                "roe": 32.8, "roa": 22.5, "debt_ratio": 0.12, "dividend_yield": 1.5,
                "industry": "食品饮料", "total_score": 0.78, "recommendation": "buy",
                "target_price": 1750.00, "stop_loss": 1450.00,
                "reason": "ROE32.8%表现卓越，负债率12.0%极低，白酒龙头品牌价值突出"
            },
            {
                "code": "000002", "name": "万科A", "market_type": "A",
                "current_price": 24.90, "change_percent": -3.5,
                "volume": 32100000u64, "market_cap": 289000000000.0,
                "pe_ratio": null, "pb_ratio": 0.85, "ps_ratio": 0.6,
                "roe": 8.2, "roa": 1.1, "debt_ratio": 0.78, "dividend_yield": 4.8,
                "industry": "房地产", "total_score": 0.55, "recommendation": "hold",
                "reason": "行业景气度偏弱，估值处于历史低位"
            }
        ]
    })
}

fn stocks_hk() -> Value {
    json!({
        "update_time": "2025-08-24 14:58:19",
        "stocks": [
            {
                "code": "00700", "name": "腾讯控股", "market_type": "HK",
                "current_price": 412.5, "change_percent": -1.5,
                "volume": 15600000u64, "market_cap": 3860000000000.0,
                "pe_ratio": 18.2, "pb_ratio": 3.5, "ps_ratio": 5.8,
                "roe": 21.5, "roa": 9.8, "debt_ratio": 0.42, "dividend_yield": 0.8,
                "industry": "科技", "total_score": 0.75, "recommendation": "buy",
                "target_price": 450.00, "stop_loss": 360.00,
                "reason": "游戏与广告业务回暖，ROE21.5%表现优秀"
            },
            {
                "code": "01398", "name": "工商银行", "market_type": "HK",
                "current_price": 4.85, "change_percent": -0.2,
                "volume": 186000000u64, "market_cap": 1720000000000.0,
                "pe_ratio": 4.1, "pb_ratio": 0.45, "ps_ratio": 1.8,
                "roe": 10.8, "roa": 0.9, "debt_ratio": 0.91, "dividend_yield": 6.5,
                "industry": "银行", "total_score": 0.78, "recommendation": "buy",
                "target_price": 5.60, "stop_loss": 4.30,
                "reason": "分红收益率6.5%很高，估值处于底部区域"
            }
        ]
    })
}

fn laoliu_quotes() -> Value {
    json!({
        "version": "1.0.0",
        "update_time": "2025-08-24",
        "categories": {
            "masters": {
                "name": "投资大师",
                "icon": "🎯",
                "quotes": [
                    { "id": "m001", "content": "败于原价，死于抄底，终于杠杆", "author": "老刘投资笔记", "category": "masters", "tags": ["风险"] },
                    { "id": "m002", "content": "人弃我取，人取我弃", "author": "老刘投资笔记", "category": "masters", "tags": ["逆向"] },
                    { "id": "m003", "content": "买股票就是买公司，买公司就是买未来", "author": "老刘投资笔记", "category": "masters", "tags": ["价值"] }
                ]
            },
            "philosophy": {
                "name": "市场哲学",
                "icon": "💭",
                "quotes": [
                    { "id": "p001", "content": "市场短期是投票机，长期是称重机", "author": "老刘投资笔记", "category": "philosophy", "tags": ["周期"] },
                    { "id": "p002", "content": "不要把所有鸡蛋放在一个篮子里", "author": "老刘投资笔记", "category": "philosophy", "tags": ["分散"] }
                ]
            },
            "strategy": {
                "name": "投资策略",
                "icon": "📈",
                "quotes": [
                    { "id": "s001", "content": "好公司也要有好价格", "author": "老刘投资笔记", "category": "strategy", "tags": ["估值"] },
                    { "id": "s002", "content": "仓位管理比选股更重要", "author": "老刘投资笔记", "category": "strategy", "tags": ["仓位"] }
                ]
            }
        }
    })
}

fn stock_search_index() -> Value {
    json!({
        "stocks": {
            "000001": { "code": "000001", "name": "平安银行", "market": "A", "industry": "银行", "keywords": ["平安", "银行", "深圳"] },
            "000002": { "code": "000002", "name": "万科A", "market": "A", "industry": "房地产", "keywords": ["万科", "地产"] },
            "600036": { "code": "600036", "name": "招商银行", "market": "A", "industry": "银行", "keywords": ["招行", "银行"] },
            "600519": { "code": "600519", "name": "贵州茅台", "market": "A", "industry": "食品饮料", "keywords": ["茅台", "白酒"] },
            "00700":  { "code": "00700", "name": "腾讯控股", "market": "HK", "industry": "科技", "keywords": ["腾讯", "互联网"] },
            "01398":  { "code": "01398", "name": "工商银行", "market": "HK", "industry": "银行", "keywords": ["工行", "银行"] }
        }
    })
}

fn analysis_samples() -> Value {
    json!({
        "update_time": "2025-08-24 14:58:19",
        "analysis_results": [
            {
                "basic_info": { "code": "000651", "name": "格力电器", "industry": "家电", "market_type": "A" },
                "financial_data": { "current_price": 35.8, "pe_ratio": 9.5, "pb_ratio": 1.8, "roe": 22.8, "debt_ratio": 0.48 },
                "analysis_result": { "total_score": 0.85, "recommendation": "strong_buy", "reason": "PE估值极低，ROE22.8%表现卓越，分红收益率4.2%很高" }
            },
            {
                "basic_info": { "code": "600036", "name": "招商银行", "industry": "银行", "market_type": "A" },
                "financial_data": { "current_price": 43.12, "pe_ratio": 6.1, "pb_ratio": 1.05, "roe": 16.2, "debt_ratio": 0.82 },
                "analysis_result": { "total_score": 0.82, "recommendation": "strong_buy", "reason": "ROE16.2%表现优秀，银行行业配置价值显现" }
            },
            {
                "basic_info": { "code": "01398", "name": "工商银行", "industry": "银行", "market_type": "HK" },
                "financial_data": { "current_price": 4.85, "pe_ratio": 4.1, "pb_ratio": 0.45, "roe": 10.8, "debt_ratio": 0.91 },
                "analysis_result": { "total_score": 0.78, "recommendation": "buy", "reason": "分红收益率6.5%很高，估值处于底部区域" }
            }
        ]
    })
}

fn miniprogram_config() -> Value {
    json!({
        "updateTime": "2025-08-24 14:58:19",
        "notice": ""
    })
}
