//! 用户数据 JSON 存储
//!
//! 存储以完整读取/完整写回的方式工作, 文件不存在视为空存储,
//! 首次保存时创建父目录

use std::{
    fs,
    marker::PhantomData,
    path::{Path, PathBuf},
    sync::Mutex,
};

use log::error;
use serde::{de::DeserializeOwned, Serialize};

use crate::error::Error;

/// 损坏文件处理策略
///
/// 原始实现在解析失败时静默退化为空存储, 这会在下一次写入时丢弃旧数据,
/// 这里作为显式可配置项保留
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CorruptPolicy {
    /// 记录日志并返回空存储
    #[default]
    FallbackEmpty,
    /// 返回 CorruptStore 错误
    Strict,
}

impl CorruptPolicy {
    /// 通过环境变量 POWER_PRESETS_STRICT_LOAD 切换
    pub fn from_env() -> Self {
        match std::env::var("POWER_PRESETS_STRICT_LOAD") {
            Ok(v) if v == "1" || v.eq_ignore_ascii_case("true") => CorruptPolicy::Strict,
            _ => CorruptPolicy::FallbackEmpty,
        }
    }
}

/// 存储后端
///
/// load/save 针对完整存储, 无部分写入
pub trait StoreBackend<S> {
    fn load(&self) -> Result<S, Error>;
    fn save(&self, store: &S) -> Result<(), Error>;
}

/// JSON 文件存储
#[derive(Debug)]
pub struct JsonFileStore<S> {
    path: PathBuf,
    corrupt_policy: CorruptPolicy,
    _marker: PhantomData<S>,
}

impl<S> JsonFileStore<S> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            corrupt_policy: CorruptPolicy::default(),
            _marker: PhantomData,
        }
    }

    pub fn with_corrupt_policy(mut self, corrupt_policy: CorruptPolicy) -> Self {
        self.corrupt_policy = corrupt_policy;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl<S> StoreBackend<S> for JsonFileStore<S>
where
    S: Default + Serialize + DeserializeOwned,
{
    fn load(&self) -> Result<S, Error> {
        if !self.path.exists() {
            return Ok(S::default());
        }

        let content = fs::read_to_string(&self.path)?;
        match serde_json::from_str(&content) {
            Ok(store) => Ok(store),
            Err(e) => match self.corrupt_policy {
                CorruptPolicy::FallbackEmpty => {
                    error!("Error reading presets file {}, {e}", self.path.display());
                    Ok(S::default())
                }
                CorruptPolicy::Strict => {
                    Err(Error::CorruptStore(format!("{}, {e}", self.path.display())))
                }
            },
        }
    }

    fn save(&self, store: &S) -> Result<(), Error> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(store)?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}

/// 删除存储文件, 文件不存在时为 no-op
pub fn delete_if_exists(path: &Path) -> Result<(), Error> {
    if path.exists() {
        fs::remove_file(path)?;
    }
    Ok(())
}

/// 内存存储, 测试用
#[derive(Debug, Default)]
pub struct MemoryStore<S> {
    store: Mutex<S>,
    fail_saves: Mutex<bool>,
}

impl<S> MemoryStore<S>
where
    S: Default + Clone,
{
    pub fn new(store: S) -> Self {
        Self {
            store: Mutex::new(store),
            fail_saves: Mutex::new(false),
        }
    }

    /// 模拟持久化失败
    pub fn set_fail_saves(&self, fail: bool) -> Result<(), Error> {
        *self
            .fail_saves
            .lock()
            .map_err(|e| Error::Lock(e.to_string()))? = fail;
        Ok(())
    }
}

impl<S> StoreBackend<S> for MemoryStore<S>
where
    S: Default + Clone,
{
    fn load(&self) -> Result<S, Error> {
        let store = self
            .store
            .lock()
            .map_err(|e| Error::Lock(e.to_string()))?;
        Ok(store.clone())
    }

    fn save(&self, store: &S) -> Result<(), Error> {
        let fail = *self
            .fail_saves
            .lock()
            .map_err(|e| Error::Lock(e.to_string()))?;
        if fail {
            return Err(Error::Io(std::io::Error::other("injected save failure")));
        }

        *self
            .store
            .lock()
            .map_err(|e| Error::Lock(e.to_string()))? = store.clone();
        Ok(())
    }
}
