use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::middlewares::require_jwt::{RequireJWT, user_cache_key};
use crate::models::ApiResponse;
use crate::services::cache_from_request;
use crate::utils::jwt::JwtUtils;

use super::AuthService;

/// 清除 refresh cookie 与账号缓存
pub async fn handle_logout(
    _service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Some(user_id) = RequireJWT::extract_user_id(request)
        && let Some(cache) = cache_from_request(request)
    {
        cache.remove(&user_cache_key(user_id)).await;
    }

    Ok(HttpResponse::Ok()
        .cookie(JwtUtils::create_empty_refresh_token_cookie())
        .json(ApiResponse::success_empty("Logged out")))
}
