use crate::config::AppConfig;
use crate::errors::{PortalError, Result};
use argon2::password_hash::{SaltString, rand_core::OsRng};
use argon2::{Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version};

/// 使用配置的 Argon2id 参数哈希密码
pub fn hash_password(password: &str) -> Result<String> {
    let argon = &AppConfig::get().argon2;
    hash_with_params(password, argon.memory_cost, argon.time_cost, argon.parallelism)
}

fn hash_with_params(password: &str, memory: u32, time: u32, lanes: u32) -> Result<String> {
    let params = Params::new(memory, time, lanes, None)
        .map_err(|e| PortalError::validation(format!("Invalid Argon2 parameters: {e}")))?;

    let salt = SaltString::generate(&mut OsRng);
    Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| PortalError::validation(format!("Failed to hash password: {e}")))
}

/// 校验密码，参数从哈希串中读取
pub fn verify_password(password: &str, hash: &str) -> bool {
    PasswordHash::new(hash).is_ok_and(|parsed| {
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_with_params("Registrar2024", 1024, 1, 1).unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("Registrar2024", &hash));
        assert!(!verify_password("registrar2024", &hash));
        assert!(!verify_password("Registrar2024", "not-a-hash"));
    }
}
