use crate::config::AppConfig;
use crate::errors::{PortalError, Result};
use actix_web::cookie::{Cookie, SameSite};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

pub const REFRESH_COOKIE: &str = "refresh_token";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub role: String,
    pub kind: TokenKind,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn user_id(&self) -> Result<i64> {
        self.sub
            .parse()
            .map_err(|_| PortalError::authentication("Token subject is not a user id"))
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

pub struct JwtUtils;

impl JwtUtils {
    pub fn generate_access_token(user_id: i64, role: &str) -> Result<String> {
        let config = AppConfig::get();
        Self::sign(
            user_id,
            role,
            TokenKind::Access,
            chrono::Duration::minutes(config.jwt.access_token_expiry),
            &config.jwt.secret,
        )
    }

    pub fn generate_refresh_token(
        user_id: i64,
        role: &str,
        expiry: Option<chrono::Duration>,
    ) -> Result<String> {
        let config = AppConfig::get();
        let expiry =
            expiry.unwrap_or_else(|| chrono::Duration::days(config.jwt.refresh_token_expiry));
        Self::sign(user_id, role, TokenKind::Refresh, expiry, &config.jwt.secret)
    }

    pub fn generate_token_pair(
        user_id: i64,
        role: &str,
        refresh_expiry: Option<chrono::Duration>,
    ) -> Result<TokenPair> {
        Ok(TokenPair {
            access_token: Self::generate_access_token(user_id, role)?,
            refresh_token: Self::generate_refresh_token(user_id, role, refresh_expiry)?,
        })
    }

    pub fn verify_access_token(token: &str) -> Result<Claims> {
        Self::verify(token, TokenKind::Access, &AppConfig::get().jwt.secret)
    }

    pub fn verify_refresh_token(token: &str) -> Result<Claims> {
        Self::verify(token, TokenKind::Refresh, &AppConfig::get().jwt.secret)
    }

    fn sign(
        user_id: i64,
        role: &str,
        kind: TokenKind,
        ttl: chrono::Duration,
        secret: &str,
    ) -> Result<String> {
        let now = chrono::Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            role: role.to_string(),
            kind,
            exp: (now + ttl).timestamp(),
            iat: now.timestamp(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .map_err(|e| PortalError::authentication(format!("Failed to sign token: {e}")))
    }

    fn verify(token: &str, expected: TokenKind, secret: &str) -> Result<Claims> {
        let claims = decode::<Claims>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|e| PortalError::authentication(format!("Invalid token: {e}")))?;

        if claims.kind != expected {
            return Err(PortalError::authentication("Unexpected token type"));
        }
        Ok(claims)
    }

    pub fn create_refresh_token_cookie(refresh_token: &str, max_age_days: i64) -> Cookie<'static> {
        Cookie::build(REFRESH_COOKIE, refresh_token.to_string())
            .path("/api/v1/auth")
            .max_age(actix_web::cookie::time::Duration::days(max_age_days))
            .same_site(SameSite::Strict)
            .http_only(true)
            .secure(AppConfig::get().is_production())
            .finish()
    }

    pub fn create_empty_refresh_token_cookie() -> Cookie<'static> {
        Cookie::build(REFRESH_COOKIE, "")
            .path("/api/v1/auth")
            .max_age(actix_web::cookie::time::Duration::seconds(0))
            .same_site(SameSite::Strict)
            .http_only(true)
            .secure(AppConfig::get().is_production())
            .finish()
    }

    pub fn extract_refresh_token_from_cookie(req: &actix_web::HttpRequest) -> Option<String> {
        req.cookie(REFRESH_COOKIE)
            .map(|cookie| cookie.value().to_string())
            .filter(|v| !v.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn test_sign_and_verify() {
        let token = JwtUtils::sign(
            7,
            "registrar",
            TokenKind::Access,
            chrono::Duration::minutes(5),
            SECRET,
        )
        .unwrap();
        let claims = JwtUtils::verify(&token, TokenKind::Access, SECRET).unwrap();
        assert_eq!(claims.user_id().unwrap(), 7);
        assert_eq!(claims.role, "registrar");
    }

    #[test]
    fn test_refresh_token_is_not_an_access_token() {
        let token = JwtUtils::sign(
            7,
            "admin",
            TokenKind::Refresh,
            chrono::Duration::days(1),
            SECRET,
        )
        .unwrap();
        assert!(JwtUtils::verify(&token, TokenKind::Access, SECRET).is_err());
        assert!(JwtUtils::verify(&token, TokenKind::Refresh, "other-secret").is_err());
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let token = JwtUtils::sign(
            1,
            "editor",
            TokenKind::Access,
            chrono::Duration::minutes(-10),
            SECRET,
        )
        .unwrap();
        assert!(JwtUtils::verify(&token, TokenKind::Access, SECRET).is_err());
    }
}
