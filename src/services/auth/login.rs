use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::{
    ApiResponse, ErrorCode,
    auth::{requests::LoginRequest, responses::LoginResponse},
};
use crate::utils::jwt::JwtUtils;
use crate::utils::password::verify_password;

use super::AuthService;

fn invalid_credentials() -> HttpResponse {
    HttpResponse::Unauthorized().json(ApiResponse::error_empty(
        ErrorCode::AuthFailed,
        "Username or password is incorrect",
    ))
}

pub async fn handle_login(
    service: &AuthService,
    mut login_request: LoginRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = login_request.normalize() {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::BadRequest, msg)));
    }

    let storage = service.get_storage(request);
    let config = service.get_config();

    let user = match storage
        .get_user_by_username_or_email(&login_request.login)
        .await
    {
        Ok(Some(user)) => user,
        Ok(None) => return Ok(invalid_credentials()),
        Err(e) => {
            tracing::error!("Login lookup failed: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Login failed, please try again later",
                )),
            );
        }
    };

    if !verify_password(&login_request.password, &user.password_hash) {
        tracing::info!("Failed login attempt for {}", user.username);
        return Ok(invalid_credentials());
    }

    if !user.is_active() {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "Account is suspended",
        )));
    }

    if let Err(e) = storage.update_last_login(user.id).await {
        tracing::warn!("Failed to record last login for {}: {}", user.id, e);
    }

    let refresh_days = if login_request.remember_me {
        config.jwt.refresh_token_remember_me_expiry
    } else {
        config.jwt.refresh_token_expiry
    };

    let token_pair = match user.generate_token_pair(Some(chrono::Duration::days(refresh_days))) {
        Ok(pair) => pair,
        Err(e) => {
            tracing::error!("{}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Login failed, unable to generate token",
                )),
            );
        }
    };

    tracing::info!("User {} logged in ({})", user.username, user.role);

    let cookie = JwtUtils::create_refresh_token_cookie(&token_pair.refresh_token, refresh_days);
    let response = LoginResponse {
        access_token: token_pair.access_token,
        expires_in: config.jwt.access_token_expiry * 60,
        permissions: user.role.into(),
        user,
    };

    Ok(HttpResponse::Ok()
        .cookie(cookie)
        .json(ApiResponse::success(response, "Login successful")))
}
