use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::UserService;
use crate::models::{
    ApiResponse, ErrorCode,
    users::{requests::CreateUserRequest, responses::UserResponse},
};
use crate::services::{bad_request, storage_error_response};
use crate::utils::password::hash_password;
use crate::utils::validate::{validate_email, validate_password, validate_username};

pub async fn create_user(
    service: &UserService,
    mut user_data: CreateUserRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    user_data.username = user_data.username.trim().to_string();
    user_data.email = user_data.email.trim().to_lowercase();

    if let Err(msg) = validate_username(&user_data.username) {
        return Ok(bad_request(ErrorCode::UserNameInvalid, msg));
    }
    if let Err(msg) = validate_email(&user_data.email) {
        return Ok(bad_request(ErrorCode::UserEmailInvalid, msg));
    }
    if let Err(msg) = validate_password(&user_data.password) {
        return Ok(bad_request(ErrorCode::UserPasswordInvalid, msg));
    }

    user_data.password = match hash_password(&user_data.password) {
        Ok(hash) => hash,
        Err(e) => {
            tracing::error!("Password hashing failed: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::UserCreationFailed,
                    "Password hashing failed",
                )),
            );
        }
    };

    let storage = service.get_storage(request);
    match storage.create_user(user_data).await {
        Ok(user) => {
            tracing::info!("Account {} created with role {}", user.username, user.role);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                UserResponse { user },
                "User created successfully",
            )))
        }
        Err(e) => Ok(storage_error_response(
            e,
            ErrorCode::UserAlreadyExists,
            "User creation failed",
        )),
    }
}
