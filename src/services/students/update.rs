use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StudentService;
use crate::models::{ApiResponse, ErrorCode, students::requests::UpdateStudentRequest};
use crate::services::{bad_request, require_department, not_found, storage_error_response};

pub async fn update_student(
    service: &StudentService,
    id: i64,
    mut update: UpdateStudentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = update.normalize() {
        return Ok(bad_request(ErrorCode::StudentDataInvalid, msg));
    }

    let storage = service.get_storage(request);
    if let Some(department_id) = update.department_id
        && let Some(resp) =
            require_department(&storage, department_id, ErrorCode::StudentDataInvalid)
                .await
    {
        return Ok(resp);
    }

    match storage.update_student(id, update).await {
        Ok(Some(student)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            student,
            "Student updated successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::StudentNotFound, "Student not found")),
        Err(e) => Ok(storage_error_response(
            e,
            ErrorCode::StudentAlreadyExists,
            "Student update failed",
        )),
    }
}
