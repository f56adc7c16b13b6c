//! 用户设置模型

use serde::{Deserialize, Serialize};

fn default_risk_level() -> String {
    "medium".to_string()
}

fn default_data_source() -> String {
    "github".to_string()
}

fn default_true() -> bool {
    true
}

/// 用户偏好设置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// 风险偏好: low, medium, high
    #[serde(default = "default_risk_level")]
    pub risk_level: String,
    /// 数据源
    #[serde(default = "default_data_source")]
    pub data_source: String,
    /// 是否自动刷新
    #[serde(default = "default_true")]
    pub auto_refresh: bool,
    /// 是否开启通知
    #[serde(default = "default_true")]
    pub notifications: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            risk_level: default_risk_level(),
            data_source: default_data_source(),
            auto_refresh: true,
            notifications: true,
        }
    }
}
