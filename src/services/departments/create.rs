use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::DepartmentService;
use crate::models::{ApiResponse, ErrorCode, departments::requests::CreateDepartmentRequest};
use crate::services::{bad_request, storage_error_response};

pub async fn create_department(
    service: &DepartmentService,
    mut req: CreateDepartmentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = req.normalize() {
        return Ok(bad_request(ErrorCode::BadRequest, msg));
    }

    let storage = service.get_storage(request);
    match storage.create_department(req).await {
        Ok(department) => {
            tracing::info!("Department {} created", department.code);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                department,
                "Department created successfully",
            )))
        }
        Err(e) => Ok(storage_error_response(
            e,
            ErrorCode::DepartmentAlreadyExists,
            "Department creation failed",
        )),
    }
}
