//! 本地键值存储
//!
//! 把 JSON 值持久化到数据目录，一个键一个文件。
//! 这是一个尽力而为的存储：读写失败记日志后按"无数据"处理，不向外传播。

use anyhow::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

pub struct LocalStorage {
    dir: PathBuf,
}

impl LocalStorage {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref().to_path_buf();
        if let Err(e) = fs::create_dir_all(&dir) {
            log::warn!("创建存储目录 {} 失败: {}", dir.display(), e);
        }
        Self { dir }
    }

    /// 键名转文件名，过滤掉不适合做文件名的字符
    fn path_for(&self, key: &str) -> PathBuf {
        let safe: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{}.json", safe))
    }

    fn try_set<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let text = serde_json::to_string(value)?;
        fs::write(self.path_for(key), text)?;
        Ok(())
    }

    /// 写入一个键，失败只记日志
    pub fn set<T: Serialize>(&self, key: &str, value: &T) {
        if let Err(e) = self.try_set(key, value) {
            log::warn!("写入本地存储 {} 失败: {}", key, e);
        }
    }

    /// 读取一个键；键不存在或内容无法解析都返回 None
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let text = fs::read_to_string(self.path_for(key)).ok()?;
        match serde_json::from_str(&text) {
            Ok(value) => Some(value),
            Err(e) => {
                log::debug!("本地存储 {} 内容无法解析: {}", key, e);
                None
            }
        }
    }

    pub fn remove(&self, key: &str) {
        let path = self.path_for(key);
        if path.exists() {
            if let Err(e) = fs::remove_file(&path) {
                log::warn!("删除本地存储 {} 失败: {}", key, e);
            }
        }
    }

    /// 列出当前所有键
    pub fn keys(&self) -> Vec<String> {
        let Ok(entries) = fs::read_dir(&self.dir) else {
            return Vec::new();
        };
        entries
            .filter_map(|entry| {
                let name = entry.ok()?.file_name().into_string().ok()?;
                name.strip_suffix(".json").map(|s| s.to_string())
            })
            .collect()
    }

    /// 清空全部存储
    pub fn clear_all(&self) {
        for key in self.keys() {
            self.remove(&key);
        }
    }
}
