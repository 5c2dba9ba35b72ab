use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StudentService;
use crate::models::{ApiResponse, ErrorCode, students::requests::CreateStudentRequest};
use crate::services::{bad_request, require_department, storage_error_response};

pub async fn create_student(
    service: &StudentService,
    mut req: CreateStudentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = req.normalize() {
        return Ok(bad_request(ErrorCode::StudentDataInvalid, msg));
    }

    let storage = service.get_storage(request);
    if let Some(resp) =
        require_department(&storage, req.department_id, ErrorCode::StudentDataInvalid)
            .await
    {
        return Ok(resp);
    }

    match storage.create_student(req).await {
        Ok(student) => {
            tracing::info!("Student {} created", student.student_number);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                student,
                "Student created successfully",
            )))
        }
        Err(e) => Ok(storage_error_response(
            e,
            ErrorCode::StudentAlreadyExists,
            "Student creation failed",
        )),
    }
}
