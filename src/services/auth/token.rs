use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::middlewares::require_jwt::RequireJWT;
use crate::models::auth::responses::{
    RefreshTokenResponse, TokenVerificationResponse, UserInfoResponse,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::jwt::JwtUtils;

use super::AuthService;

fn session_expired() -> HttpResponse {
    HttpResponse::Unauthorized()
        .cookie(JwtUtils::create_empty_refresh_token_cookie())
        .json(ApiResponse::error_empty(
            ErrorCode::TokenInvalid,
            "Login expired or invalid, please login again",
        ))
}

pub async fn handle_refresh_token(
    service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let config = service.get_config();

    let Some(refresh_token) = JwtUtils::extract_refresh_token_from_cookie(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Unauthorized access, please login",
        )));
    };

    let user_id = match JwtUtils::verify_refresh_token(&refresh_token).and_then(|c| c.user_id()) {
        Ok(id) => id,
        Err(e) => {
            tracing::info!("Refresh token rejected: {}", e);
            return Ok(session_expired());
        }
    };

    // 重新读取账号，角色变更与停用立即生效
    let storage = service.get_storage(request);
    let user = match storage.get_user_by_id(user_id).await {
        Ok(Some(user)) if user.is_active() => user,
        Ok(_) => return Ok(session_expired()),
        Err(e) => {
            tracing::error!("Failed to load user {} for refresh: {}", user_id, e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Token refresh failed",
                )),
            );
        }
    };

    match JwtUtils::generate_access_token(user.id, user.role.as_str()) {
        Ok(access_token) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            RefreshTokenResponse {
                access_token,
                expires_in: config.jwt.access_token_expiry * 60,
            },
            "Token refreshed successfully",
        ))),
        Err(e) => {
            tracing::error!("Failed to issue access token: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Token refresh failed",
                )),
            )
        }
    }
}

/// 路由已经过 RequireJWT，能到达这里即表示 token 有效
pub async fn handle_verify_token(
    _service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = RequireJWT::extract_user(request);
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        TokenVerificationResponse {
            is_valid: user.is_some(),
            user_id: user.as_ref().map(|u| u.id),
            role: user.map(|u| u.role),
        },
        "Token is valid",
    )))
}

pub async fn handle_get_user(
    _service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    match RequireJWT::extract_user(request) {
        Some(user) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            UserInfoResponse::from(user),
            "User information retrieved successfully",
        ))),
        None => Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Unauthorized access, please login",
        ))),
    }
}
