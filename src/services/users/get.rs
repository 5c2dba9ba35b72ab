use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::UserService;
use crate::models::users::responses::UserResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{not_found, storage_error_response};

pub async fn get_user(
    service: &UserService,
    user_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    match service.get_storage(request).get_user_by_id(user_id).await {
        Ok(Some(user)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            UserResponse { user },
            "Account retrieved successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::UserNotFound, "Account not found")),
        Err(e) => Ok(storage_error_response(
            e,
            ErrorCode::InternalServerError,
            "Failed to get account",
        )),
    }
}
