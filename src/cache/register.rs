use crate::cache::ObjectCache;
use crate::errors::Result;
use once_cell::sync::Lazy;
use std::{
    collections::HashMap,
    future::Future,
    pin::Pin,
    sync::{Arc, RwLock},
};

pub type BoxedObjectCacheFuture =
    Pin<Box<dyn Future<Output = Result<Box<dyn ObjectCache>>> + Send>>;
pub type ObjectCacheConstructor = Arc<dyn Fn() -> BoxedObjectCacheFuture + Send + Sync>;

static CACHE_BACKENDS: Lazy<RwLock<HashMap<&'static str, ObjectCacheConstructor>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

pub fn register_object_cache_plugin(name: &'static str, constructor: ObjectCacheConstructor) {
    // 注册发生在 main 之前，锁中毒时沿用内部数据
    let mut backends = CACHE_BACKENDS.write().unwrap_or_else(|e| e.into_inner());
    backends.insert(name, constructor);
}

pub fn get_object_cache_plugin(name: &str) -> Option<ObjectCacheConstructor> {
    CACHE_BACKENDS
        .read()
        .unwrap_or_else(|e| e.into_inner())
        .get(name)
        .cloned()
}

pub fn registered_cache_backends() -> Vec<&'static str> {
    let mut names: Vec<_> = CACHE_BACKENDS
        .read()
        .unwrap_or_else(|e| e.into_inner())
        .keys()
        .copied()
        .collect();
    names.sort_unstable();
    names
}

/// 调试模式下输出已注册的缓存后端
pub fn debug_object_cache_registry() {
    let names = registered_cache_backends();
    tracing::debug!("Registered cache backends ({}): {}", names.len(), names.join(", "));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_backends_are_registered() {
        let names = registered_cache_backends();
        assert!(names.contains(&"moka"));
        assert!(names.contains(&"redis"));
        assert!(get_object_cache_plugin("memcached").is_none());
    }

    #[test]
    fn test_debug_registry_dump_reads_registry() {
        debug_object_cache_registry();
        assert!(!registered_cache_backends().is_empty());
    }
}
