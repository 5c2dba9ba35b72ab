use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::UserService;
use crate::middlewares::RequireJWT;
use crate::models::users::entities::{UserRole, UserStatus};
use crate::models::{
    ApiResponse, ErrorCode,
    users::{requests::UpdateUserRequest, responses::UserResponse},
};
use crate::services::{bad_request, not_found, storage_error_response};
use crate::utils::password::hash_password;
use crate::utils::validate::{validate_email, validate_password};

pub async fn update_user(
    service: &UserService,
    user_id: i64,
    mut update_data: UpdateUserRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Some(email) = update_data.email.as_mut() {
        *email = email.trim().to_lowercase();
        if let Err(msg) = validate_email(email) {
            return Ok(bad_request(ErrorCode::UserEmailInvalid, msg));
        }
    }

    // 管理员不能降低自己的权限或停用自己
    if RequireJWT::extract_user_id(request) == Some(user_id)
        && (update_data.role.is_some_and(|r| r != UserRole::Admin)
            || update_data.status == Some(UserStatus::Suspended))
    {
        return Ok(bad_request(
            ErrorCode::UserUpdateFailed,
            "You cannot demote or suspend your own account",
        ));
    }

    if let Some(password) = update_data.password.take() {
        if let Err(msg) = validate_password(&password) {
            return Ok(bad_request(ErrorCode::UserPasswordInvalid, msg));
        }
        match hash_password(&password) {
            Ok(hash) => update_data.password = Some(hash),
            Err(e) => {
                tracing::error!("Password hashing failed: {}", e);
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::UserUpdateFailed,
                        "Password hashing failed",
                    )),
                );
            }
        }
    }

    let storage = service.get_storage(request);
    match storage.update_user(user_id, update_data).await {
        Ok(Some(user)) => {
            service.evict_cached_user(user_id, request).await;
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                UserResponse { user },
                "User updated successfully",
            )))
        }
        Ok(None) => Ok(not_found(ErrorCode::UserNotFound, "User not found")),
        Err(e) => Ok(storage_error_response(
            e,
            ErrorCode::UserAlreadyExists,
            "User update failed",
        )),
    }
}
