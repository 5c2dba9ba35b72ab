use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::DepartmentService;
use crate::models::{ApiResponse, ErrorCode, departments::requests::UpdateDepartmentRequest};
use crate::services::{bad_request, not_found, storage_error_response};

pub async fn update_department(
    service: &DepartmentService,
    id: i64,
    mut update: UpdateDepartmentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = update.normalize() {
        return Ok(bad_request(ErrorCode::BadRequest, msg));
    }

    let storage = service.get_storage(request);
    match storage.update_department(id, update).await {
        Ok(Some(department)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            department,
            "Department updated successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::DepartmentNotFound, "Department not found")),
        Err(e) => Ok(storage_error_response(
            e,
            ErrorCode::DepartmentAlreadyExists,
            "Department update failed",
        )),
    }
}
