use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::DepartmentService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{not_found, storage_error_response};

pub async fn delete_department(
    service: &DepartmentService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 仍有学生或课程挂在该院系下时拒绝删除
    match storage.department_in_use(id).await {
        Ok(true) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::DepartmentInUse,
                "Department still has students or courses",
            )));
        }
        Ok(false) => {}
        Err(e) => {
            return Ok(storage_error_response(
                e,
                ErrorCode::DepartmentInUse,
                "Department deletion failed",
            ));
        }
    }

    match storage.delete_department(id).await {
        Ok(true) => {
            tracing::info!("Department {} deleted", id);
            Ok(HttpResponse::Ok()
                .json(ApiResponse::success_empty("Department deleted successfully")))
        }
        Ok(false) => Ok(not_found(ErrorCode::DepartmentNotFound, "Department not found")),
        Err(e) => Ok(storage_error_response(
            e,
            ErrorCode::DepartmentInUse,
            "Department deletion failed",
        )),
    }
}
