//! 对象缓存
//!
//! 缓存后端通过 [`declare_object_cache_plugin!`] 在进程启动时注册，
//! 启动流程按配置中的 `cache.type` 选择后端。

pub mod object_cache;
pub mod register;

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};

/// 缓存查询结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheResult<T> {
    Found(T),
    NotFound,
    /// 后端可达性问题，键状态未知
    ExistsButNoValue,
}

impl<T> CacheResult<T> {
    pub fn found(self) -> Option<T> {
        match self {
            CacheResult::Found(v) => Some(v),
            _ => None,
        }
    }
}

#[async_trait]
pub trait ObjectCache: Send + Sync {
    async fn get_raw(&self, key: &str) -> CacheResult<String>;

    /// `ttl` 为 0 时使用后端默认值
    async fn insert_raw(&self, key: String, value: String, ttl: u64);

    async fn remove(&self, key: &str);

    async fn invalidate_all(&self);
}

impl dyn ObjectCache {
    /// 读取并反序列化，反序列化失败视为未命中
    pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> CacheResult<T> {
        match self.get_raw(key).await {
            CacheResult::Found(raw) => match serde_json::from_str(&raw) {
                Ok(value) => CacheResult::Found(value),
                Err(e) => {
                    tracing::debug!("Dropping undecodable cache entry {}: {}", key, e);
                    self.remove(key).await;
                    CacheResult::NotFound
                }
            },
            CacheResult::NotFound => CacheResult::NotFound,
            CacheResult::ExistsButNoValue => CacheResult::ExistsButNoValue,
        }
    }

    pub async fn insert_json<T: Serialize + ?Sized>(&self, key: String, value: &T, ttl: u64) {
        match serde_json::to_string(value) {
            Ok(raw) => self.insert_raw(key, raw, ttl).await,
            Err(e) => tracing::warn!("Failed to serialize cache entry {}: {}", key, e),
        }
    }
}

/// 注册缓存后端。类型需提供 `fn new() -> Result<Self, String>`。
#[macro_export]
macro_rules! declare_object_cache_plugin {
    ($name:expr, $ty:ident) => {
        ::paste::paste! {
            #[::ctor::ctor]
            fn [<__register_object_cache_ $ty:snake>]() {
                $crate::cache::register::register_object_cache_plugin(
                    $name,
                    ::std::sync::Arc::new(|| {
                        Box::pin(async {
                            let cache = $ty::new()
                                .map_err($crate::errors::PortalError::cache_connection)?;
                            Ok(Box::new(cache) as Box<dyn $crate::cache::ObjectCache>)
                        })
                    }),
                );
            }
        }
    };
}
