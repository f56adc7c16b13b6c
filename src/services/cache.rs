//! 缓存存储
//!
//! 在本地键值存储之上加一层带过期时间的缓存条目。
//! 对缓存而言数据只是不透明的 JSON 值，不关心业务结构。

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

use super::storage::LocalStorage;

/// 缓存条目
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    pub data: Value,
    /// 写入时间（毫秒时间戳）
    pub stored_at: i64,
    /// 过期时间（毫秒时间戳），条目仅在 now < expires_at 时可读
    pub expires_at: i64,
}

/// 当前毫秒时间戳
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

pub struct CacheStore {
    storage: Arc<LocalStorage>,
    default_ttl: Duration,
}

impl CacheStore {
    pub fn new(storage: Arc<LocalStorage>, default_ttl: Duration) -> Self {
        Self {
            storage,
            default_ttl,
        }
    }

    /// 按默认 TTL 写入缓存，覆盖同键旧条目
    pub fn set(&self, key: &str, data: &Value) {
        self.set_with_ttl(key, data, self.default_ttl);
    }

    /// 按指定 TTL 写入缓存；持久化失败由存储层记日志，缓存尽力而为
    pub fn set_with_ttl(&self, key: &str, data: &Value, ttl: Duration) {
        let now = now_millis();
        let entry = CacheEntry {
            data: data.clone(),
            stored_at: now,
            expires_at: now + ttl.as_millis() as i64,
        };
        self.storage.set(key, &entry);
    }

    /// 读取未过期的缓存；键不存在、内容损坏或已过期都返回 None
    pub fn get(&self, key: &str) -> Option<Value> {
        let entry: CacheEntry = self.storage.get(key)?;
        if now_millis() < entry.expires_at {
            Some(entry.data)
        } else {
            None
        }
    }

    /// 删除单个缓存条目
    pub fn invalidate(&self, key: &str) {
        self.storage.remove(key);
    }

    /// 清理所有已过期条目，返回清理数量
    ///
    /// 非缓存条目（如用户设置）解析不出过期时间，跳过不处理
    pub fn clear_expired(&self) -> usize {
        let mut removed = 0;
        for key in self.storage.keys() {
            let Some(entry) = self.storage.get::<CacheEntry>(&key) else {
                continue;
            };
            if entry.expires_at <= now_millis() {
                self.storage.remove(&key);
                removed += 1;
            }
        }
        removed
    }

    /// 清空全部持久化条目（用户在设置页主动触发）
    pub fn clear_all(&self) {
        self.storage.clear_all();
    }
}
