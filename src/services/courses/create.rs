use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CourseService;
use crate::models::{ApiResponse, ErrorCode, courses::requests::CreateCourseRequest};
use crate::services::{bad_request, require_department, storage_error_response};

pub async fn create_course(
    service: &CourseService,
    mut req: CreateCourseRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = req.normalize() {
        return Ok(bad_request(ErrorCode::CourseDataInvalid, msg));
    }

    let storage = service.get_storage(request);
    if let Some(resp) =
        require_department(&storage, req.department_id, ErrorCode::CourseDataInvalid)
            .await
    {
        return Ok(resp);
    }

    match storage.create_course(req).await {
        Ok(course) => {
            tracing::info!("Course {} created", course.code);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                course,
                "Course created successfully",
            )))
        }
        Err(e) => Ok(storage_error_response(
            e,
            ErrorCode::CourseAlreadyExists,
            "Course creation failed",
        )),
    }
}
