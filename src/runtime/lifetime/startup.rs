use crate::cache::{ObjectCache, register::get_object_cache_plugin};
use crate::config::AppConfig;
use crate::models::users::entities::UserRole;
use crate::models::users::requests::CreateUserRequest;
use crate::storage::Storage;
use crate::utils::password::hash_password;
use std::sync::Arc;
use tracing::{debug, info, warn};

const DEFAULT_CACHE: &str = "moka";
const ADMIN_USERNAME: &str = "admin";

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
    pub cache: Arc<dyn ObjectCache>,
}

async fn build_cache(name: &str) -> Option<Arc<dyn ObjectCache>> {
    let Some(constructor) = get_object_cache_plugin(name) else {
        warn!("Cache backend '{}' not found in registry", name);
        return None;
    };

    match constructor().await {
        Ok(cache) => {
            warn!("Successfully created {} cache backend", name);
            Some(Arc::from(cache))
        }
        Err(e) => {
            warn!("Failed to create {} cache: {}", name, e);
            None
        }
    }
}

/// 创建缓存实例，配置的后端不可用时回退到内存缓存
async fn create_cache() -> Result<Arc<dyn ObjectCache>, Box<dyn std::error::Error>> {
    let cache_type = AppConfig::get().cache.cache_type.as_str();
    warn!("Attempting to create {} cache backend", cache_type);

    if let Some(cache) = build_cache(cache_type).await {
        return Ok(cache);
    }

    if cache_type != DEFAULT_CACHE {
        warn!("Falling back to {} (in-memory) cache", DEFAULT_CACHE);
        if let Some(cache) = build_cache(DEFAULT_CACHE).await {
            return Ok(cache);
        }
    }

    Err(format!("No cache backend available (tried: {cache_type})").into())
}

fn generate_random_password(length: usize) -> String {
    use rand::Rng;
    const CHARSET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz23456789!@#$%";
    let mut rng = rand::rng();
    (0..length)
        .map(|_| CHARSET[rng.random_range(0..CHARSET.len())] as char)
        .collect()
}

/// 空库时创建默认管理员账号
async fn seed_admin(storage: &Arc<dyn Storage>) {
    match storage.count_users().await {
        Ok(0) => info!("No accounts found, creating default admin account..."),
        Ok(count) => {
            debug!("Database already has {} account(s), skipping admin seed", count);
            return;
        }
        Err(e) => {
            warn!("Failed to count accounts: {}, skipping admin seed", e);
            return;
        }
    }

    let password = match std::env::var("ADMIN_PASSWORD") {
        Ok(pwd) if !pwd.trim().is_empty() => pwd,
        _ => {
            let pwd = generate_random_password(16);
            warn!("==========================================================");
            warn!("  ADMIN_PASSWORD is not set, a password was generated");
            warn!("  Generated admin password: {}", pwd);
            warn!("  Change it after the first login");
            warn!("==========================================================");
            pwd
        }
    };

    let password_hash = match hash_password(&password) {
        Ok(hash) => hash,
        Err(e) => {
            warn!("Failed to hash admin password: {}, skipping admin seed", e);
            return;
        }
    };

    let admin = CreateUserRequest {
        username: ADMIN_USERNAME.to_string(),
        email: "admin@campus.local".to_string(),
        password: password_hash,
        role: UserRole::Admin,
        display_name: Some("Portal Administrator".to_string()),
    };

    match storage.create_user(admin).await {
        Ok(user) => info!(
            "Default admin account created (ID: {}, username: {})",
            user.id, user.username
        ),
        Err(e) => warn!("Failed to create admin account: {}", e),
    }
}

/// 确保上传目录存在
fn ensure_upload_dir() -> std::io::Result<()> {
    let dir = &AppConfig::get().upload.dir;
    std::fs::create_dir_all(dir)?;
    debug!("Upload directory ready at {}", dir);
    Ok(())
}

/// 准备服务器启动的上下文
pub async fn prepare_server_startup() -> StartupContext {
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    if cfg!(debug_assertions) {
        crate::cache::register::debug_object_cache_registry();
        debug!("Debug mode: Cache registry is enabled");
    }

    let storage = crate::storage::create_storage()
        .await
        .expect("Failed to create storage backend");
    warn!("Storage backend initialized and migrations completed");

    seed_admin(&storage).await;

    ensure_upload_dir().expect("Failed to create upload directory");

    let cache = create_cache().await.expect("Failed to create cache");
    warn!("Cache backend initialized");

    StartupContext { storage, cache }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_password_uses_charset() {
        let pwd = generate_random_password(24);
        assert_eq!(pwd.chars().count(), 24);
        assert!(pwd.chars().all(|c| c.is_ascii_graphic()));
        assert!(!pwd.contains('0') && !pwd.contains('O'));
    }
}
