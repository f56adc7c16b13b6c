//! 通用数据拉取客户端
//!
//! 封装对静态 JSON 数据源的 HTTP GET：
//! - 5xx 和传输层错误按固定间隔重试，4xx 立即失败
//! - 可选的缓存键：命中直接返回，未命中时网络结果回填缓存
//! - 加载状态用 RAII guard 维护，任何退出路径都会释放
//! - 开发模式下直接返回内置样例数据

use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;
use url::Url;

use crate::config::DataConfig;

use super::cache::CacheStore;
use super::sample_data;

/// 重试间隔固定 1 秒
pub const RETRY_DELAY: Duration = Duration::from_secs(1);
/// 默认请求超时
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
/// 默认重试次数
pub const DEFAULT_RETRY_COUNT: u32 = 2;

/// 拉取失败的错误分类
///
/// 分类只影响最终展示给调用方的信息，不改变重试策略：
/// 重试与否只看是传输层错误/5xx（可重试）还是其它状态码（不可重试）
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("请求超时")]
    Timeout,
    #[error("网络连接失败")]
    Connection,
    #[error("服务端错误: {0}")]
    Server(u16),
    #[error("请求失败: {0}")]
    Status(u16),
    #[error("响应内容不是有效的 JSON")]
    Decode,
    #[error("无效的请求地址: {0}")]
    InvalidUrl(String),
}

impl FetchError {
    fn from_transport(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Timeout
        } else if e.is_decode() {
            FetchError::Decode
        } else {
            FetchError::Connection
        }
    }

    /// 是否允许重试
    pub fn retryable(&self) -> bool {
        matches!(
            self,
            FetchError::Timeout | FetchError::Connection | FetchError::Server(_)
        )
    }

    /// 面向用户的失败提示
    pub fn user_message(&self) -> &'static str {
        match self {
            FetchError::Timeout => "请求超时，请稍后重试",
            FetchError::Connection => "网络连接失败，请检查网络设置",
            _ => "数据加载失败",
        }
    }
}

/// 请求选项
#[derive(Debug, Clone)]
pub struct RequestOptions {
    /// 路径（拼到 base_url 后面）或完整地址
    pub url: String,
    pub timeout: Duration,
    /// 是否计入加载状态
    pub show_loading: bool,
    pub retry_count: u32,
    /// 提供缓存键时走"先读缓存，网络结果回填"的路径
    pub cache_key: Option<String>,
}

impl RequestOptions {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout: DEFAULT_TIMEOUT,
            show_loading: true,
            retry_count: DEFAULT_RETRY_COUNT,
            cache_key: None,
        }
    }

    pub fn silent(mut self) -> Self {
        self.show_loading = false;
        self
    }

    pub fn retry(mut self, count: u32) -> Self {
        self.retry_count = count;
        self
    }

    pub fn cache_key(mut self, key: impl Into<String>) -> Self {
        self.cache_key = Some(key.into());
        self
    }
}

/// 加载状态计数器
///
/// begin() 拿到的 guard 在离开作用域时自动归还计数
#[derive(Default)]
pub struct LoadingGauge {
    active: AtomicUsize,
}

impl LoadingGauge {
    fn begin(gauge: &Arc<LoadingGauge>) -> LoadingGuard {
        let n = gauge.active.fetch_add(1, Ordering::SeqCst) + 1;
        log::debug!("开始加载，进行中请求数: {}", n);
        LoadingGuard {
            gauge: Arc::clone(gauge),
        }
    }

    pub fn active(&self) -> usize {
        self.active.load(Ordering::SeqCst)
    }
}

pub struct LoadingGuard {
    gauge: Arc<LoadingGauge>,
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        let n = self.gauge.active.fetch_sub(1, Ordering::SeqCst) - 1;
        log::debug!("加载结束，进行中请求数: {}", n);
    }
}

pub struct FetchClient {
    client: reqwest::Client,
    base_url: RwLock<String>,
    default_timeout: Duration,
    default_retry: u32,
    /// 开发模式：跳过缓存和网络，直接用内置样例数据
    dev_mode: bool,
    cache: Arc<CacheStore>,
    loading: Arc<LoadingGauge>,
}

impl FetchClient {
    pub fn new(config: &DataConfig, cache: Arc<CacheStore>) -> Self {
        if config.dev_mode {
            log::warn!("开发模式已开启，所有请求将返回内置样例数据");
        }
        Self {
            client: reqwest::Client::new(),
            base_url: RwLock::new(config.base_url.trim_end_matches('/').to_string()),
            default_timeout: Duration::from_secs(config.timeout_secs),
            default_retry: config.retry_count,
            dev_mode: config.dev_mode,
            cache,
            loading: Arc::new(LoadingGauge::default()),
        }
    }

    pub fn base_url(&self) -> String {
        self.base_url.read().unwrap().clone()
    }

    /// 应用远程配置下发的数据源地址
    pub fn set_base_url(&self, url: &str) {
        *self.base_url.write().unwrap() = url.trim_end_matches('/').to_string();
    }

    /// 当前进行中的请求数
    pub fn loading_count(&self) -> usize {
        self.loading.active()
    }

    /// 按客户端默认值构造请求选项
    pub fn options(&self, path: &str) -> RequestOptions {
        let mut options = RequestOptions::new(path);
        options.timeout = self.default_timeout;
        options.retry_count = self.default_retry;
        options
    }

    fn resolve_url(&self, path: &str) -> Result<Url, FetchError> {
        let raw = if path.starts_with("http") {
            path.to_string()
        } else if path.starts_with('/') {
            format!("{}{}", self.base_url(), path)
        } else {
            format!("{}/{}", self.base_url(), path)
        };
        Url::parse(&raw).map_err(|_| FetchError::InvalidUrl(raw))
    }

    /// 按路径拉取 JSON 文档，可选缓存键
    pub async fn fetch_by_path(
        &self,
        path: &str,
        cache_key: Option<&str>,
    ) -> Result<Value, FetchError> {
        let mut options = self.options(path);
        if let Some(key) = cache_key {
            options = options.cache_key(key);
        }
        self.fetch_with_options(options).await
    }

    /// 按完整选项拉取 JSON 文档
    pub async fn fetch_with_options(&self, options: RequestOptions) -> Result<Value, FetchError> {
        // 开发模式：不走缓存和网络
        if self.dev_mode {
            log::debug!("开发模式命中样例数据: {}", options.url);
            return sample_data::for_path(&options.url)
                .ok_or_else(|| FetchError::InvalidUrl(options.url.clone()));
        }

        // 缓存命中直接短路
        if let Some(key) = options.cache_key.as_deref() {
            if let Some(data) = self.cache.get(key) {
                log::debug!("缓存命中: {}", key);
                return Ok(data);
            }
        }

        let url = self.resolve_url(&options.url)?;
        let _guard = options
            .show_loading
            .then(|| LoadingGauge::begin(&self.loading));

        let mut attempt = 0u32;
        let result = loop {
            match self.try_get(url.as_str(), options.timeout).await {
                Ok(value) => break Ok(value),
                Err(e) if e.retryable() && attempt < options.retry_count => {
                    attempt += 1;
                    log::warn!(
                        "请求 {} 失败({})，{}秒后重试 {}/{}",
                        url,
                        e,
                        RETRY_DELAY.as_secs(),
                        attempt,
                        options.retry_count
                    );
                    tokio::time::sleep(RETRY_DELAY).await;
                }
                Err(e) => break Err(e),
            }
        };

        match result {
            Ok(value) => {
                // 非空结果回填缓存
                if let Some(key) = options.cache_key.as_deref() {
                    if !value.is_null() {
                        self.cache.set(key, &value);
                    }
                }
                Ok(value)
            }
            Err(e) => {
                log::error!("请求 {} 最终失败: {}", url, e.user_message());
                Err(e)
            }
        }
    }

    /// 单次 GET 请求
    async fn try_get(&self, url: &str, timeout: Duration) -> Result<Value, FetchError> {
        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(FetchError::from_transport)?;

        let status = response.status();
        if status.is_success() {
            response
                .json::<Value>()
                .await
                .map_err(FetchError::from_transport)
        } else if status.is_server_error() {
            Err(FetchError::Server(status.as_u16()))
        } else {
            Err(FetchError::Status(status.as_u16()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::storage::LocalStorage;
    use serde_json::json;
    use std::path::Path;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    /// 启动一个按序返回固定响应的本地 HTTP 服务，返回地址和命中次数
    async fn spawn_mock_server(responses: Vec<(u16, String)>) -> (String, Arc<AtomicUsize>) {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);

        tokio::spawn(async move {
            for (status, body) in responses {
                let Ok((mut socket, _)) = listener.accept().await else {
                    return;
                };
                counter.fetch_add(1, Ordering::SeqCst);
                let mut buf = [0u8; 2048];
                let _ = socket.read(&mut buf).await;
                let response = format!(
                    "HTTP/1.1 {} MOCK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
            }
        });

        (format!("http://{}", addr), hits)
    }

    fn test_client(base_url: String, dir: &Path) -> FetchClient {
        let storage = Arc::new(LocalStorage::new(dir));
        let cache = Arc::new(CacheStore::new(storage, Duration::from_secs(3600)));
        let config = DataConfig {
            base_url,
            ..DataConfig::default()
        };
        FetchClient::new(&config, cache)
    }

    /// 两次 503 后返回 200，retry_count=2 时最终成功且有两次重试间隔
    #[tokio::test]
    async fn test_retry_on_server_error() {
        let (base, hits) = spawn_mock_server(vec![
            (503, "{}".to_string()),
            (503, "{}".to_string()),
            (200, r#"{"ok":true}"#.to_string()),
        ])
        .await;
        let dir = tempfile::tempdir().unwrap();
        let client = test_client(base, dir.path());

        let started = std::time::Instant::now();
        let value = client
            .fetch_with_options(RequestOptions::new("/data.json").silent())
            .await
            .unwrap();

        assert_eq!(value["ok"], json!(true));
        assert_eq!(hits.load(Ordering::SeqCst), 3);
        assert!(started.elapsed() >= Duration::from_secs(2));
    }

    /// 404 不重试，立即失败
    #[tokio::test]
    async fn test_no_retry_on_client_error() {
        let (base, hits) = spawn_mock_server(vec![(404, "{}".to_string())]).await;
        let dir = tempfile::tempdir().unwrap();
        let client = test_client(base, dir.path());

        let err = client
            .fetch_with_options(RequestOptions::new("/missing.json").silent())
            .await
            .unwrap_err();

        assert!(matches!(err, FetchError::Status(404)));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    /// 带缓存键的请求：首次走网络并回填缓存，TTL 内第二次不再发请求
    #[tokio::test]
    async fn test_cache_short_circuits_network() {
        let body = r#"{"stocks":[{"code":"000001","name":"平安银行"}]}"#.to_string();
        let (base, hits) = spawn_mock_server(vec![(200, body)]).await;
        let dir = tempfile::tempdir().unwrap();
        let client = test_client(base, dir.path());

        let first = client
            .fetch_by_path("/stocks_a.json", Some("stocks_a"))
            .await
            .unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 1);

        let second = client
            .fetch_by_path("/stocks_a.json", Some("stocks_a"))
            .await
            .unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert_eq!(first, second);
    }

    /// 重试耗尽后错误分类为连接失败
    #[tokio::test]
    async fn test_connection_failure_classification() {
        let dir = tempfile::tempdir().unwrap();
        // 不可达地址
        let client = test_client("http://127.0.0.1:1".to_string(), dir.path());

        let err = client
            .fetch_with_options(RequestOptions::new("/summary.json").silent().retry(0))
            .await
            .unwrap_err();

        assert!(matches!(err, FetchError::Connection));
        assert_eq!(err.user_message(), "网络连接失败，请检查网络设置");
    }

    /// 开发模式跳过网络，直接返回样例数据
    #[tokio::test]
    async fn test_dev_mode_bypass() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Arc::new(LocalStorage::new(dir.path()));
        let cache = Arc::new(CacheStore::new(storage, Duration::from_secs(3600)));
        let config = DataConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            dev_mode: true,
            ..DataConfig::default()
        };
        let client = FetchClient::new(&config, cache);

        let value = client.fetch_by_path("/summary.json", None).await.unwrap();
        assert!(value.get("recommendations_count").is_some());
    }

    /// 加载计数在请求结束后归零
    #[tokio::test]
    async fn test_loading_gauge_released() {
        let (base, _hits) = spawn_mock_server(vec![(200, "{}".to_string())]).await;
        let dir = tempfile::tempdir().unwrap();
        let client = test_client(base, dir.path());

        client
            .fetch_with_options(RequestOptions::new("/summary.json"))
            .await
            .unwrap();
        assert_eq!(client.loading_count(), 0);

        // 失败路径同样归零
        let _ = client
            .fetch_with_options(RequestOptions::new("/other.json").retry(0))
            .await;
        assert_eq!(client.loading_count(), 0);
    }
}
