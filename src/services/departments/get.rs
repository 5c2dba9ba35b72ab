use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::DepartmentService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::not_found;

pub async fn get_department(
    service: &DepartmentService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_department_by_id(id).await {
        Ok(Some(department)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            department,
            "Department retrieved successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::DepartmentNotFound, "Department not found")),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to get department: {e}"),
            )),
        ),
    }
}
