//! 配置模块
//!
//! 支持从 JSON 文件加载系统配置；远程下发的配置
//! 在启动后由服务上下文合并（见 services::AppContext::apply_remote_config）

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,
    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,
    /// 工作线程数（0 表示使用 CPU 核心数）
    #[serde(default)]
    pub workers: usize,
}

/// API 配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// API Key（为空则不启用认证）
    #[serde(default)]
    pub api_key: String,
}

/// 数据源配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// 静态数据源地址
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// 请求超时时间（秒）
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// 请求失败重试次数
    #[serde(default = "default_retry_count")]
    pub retry_count: u32,
    /// 开发模式：跳过网络，使用内置样例数据。线上必须保持关闭
    #[serde(default)]
    pub dev_mode: bool,
}

/// 缓存配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// 本地数据目录
    #[serde(default = "default_cache_dir")]
    pub dir: String,
    /// 默认缓存时长（秒）
    #[serde(default = "default_ttl")]
    pub default_ttl_secs: u64,
    /// 金句缓存时长（秒）
    #[serde(default = "default_quotes_ttl")]
    pub quotes_ttl_secs: u64,
}

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub cache: CacheConfig,
}

// 默认值函数
fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8080
}
fn default_base_url() -> String {
    "https://vileo06.github.io/investliu".to_string()
}
fn default_timeout() -> u64 {
    10
}
fn default_retry_count() -> u32 {
    2
}
fn default_cache_dir() -> String {
    "data".to_string()
}
fn default_ttl() -> u64 {
    3600
}
fn default_quotes_ttl() -> u64 {
    86400
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: 0,
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
        }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            retry_count: default_retry_count(),
            dev_mode: false,
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            dir: default_cache_dir(),
            default_ttl_secs: default_ttl(),
            quotes_ttl_secs: default_quotes_ttl(),
        }
    }
}

impl AppConfig {
    /// 从 JSON 文件加载配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: AppConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// 加载配置，优先从文件，失败则使用默认值
    pub fn load() -> Self {
        let config_paths = ["config.json", "config/config.json"];

        for path in config_paths {
            if Path::new(path).exists() {
                match Self::from_file(path) {
                    Ok(config) => {
                        log::info!("从 {} 加载配置成功", path);
                        return config;
                    }
                    Err(e) => {
                        log::warn!("加载配置文件 {} 失败: {}", path, e);
                    }
                }
            }
        }

        log::info!("使用默认配置");
        Self::default()
    }

    /// 获取服务器绑定地址
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 缺省字段取默认值
    #[test]
    fn test_partial_config() {
        let config: AppConfig =
            serde_json::from_str(r#"{"server": {"port": 9000}, "data": {"retry_count": 5}}"#)
                .unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.data.retry_count, 5);
        assert_eq!(config.data.timeout_secs, 10);
        assert!(!config.data.dev_mode);
        assert_eq!(config.cache.quotes_ttl_secs, 86400);
    }

    #[test]
    fn test_bind_addr() {
        let config = AppConfig::default();
        assert_eq!(config.bind_addr(), "0.0.0.0:8080");
    }
}
