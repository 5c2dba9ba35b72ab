use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::UserService;
use crate::models::{ApiResponse, ErrorCode, users::requests::UserListParams};
use crate::services::storage_error_response;

pub async fn list_users(
    service: &UserService,
    query: UserListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    match service
        .get_storage(request)
        .list_users_with_pagination(query)
        .await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Account list retrieved successfully",
        ))),
        Err(e) => Ok(storage_error_response(
            e,
            ErrorCode::InternalServerError,
            "Failed to list accounts",
        )),
    }
}
