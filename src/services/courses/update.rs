use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CourseService;
use crate::models::{ApiResponse, ErrorCode, courses::requests::UpdateCourseRequest};
use crate::services::{bad_request, require_department, not_found, storage_error_response};

pub async fn update_course(
    service: &CourseService,
    id: i64,
    mut update: UpdateCourseRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = update.normalize() {
        return Ok(bad_request(ErrorCode::CourseDataInvalid, msg));
    }

    let storage = service.get_storage(request);
    if let Some(department_id) = update.department_id
        && let Some(resp) =
            require_department(&storage, department_id, ErrorCode::CourseDataInvalid)
                .await
    {
        return Ok(resp);
    }

    match storage.update_course(id, update).await {
        Ok(Some(course)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            course,
            "Course updated successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::CourseNotFound, "Course not found")),
        Err(e) => Ok(storage_error_response(
            e,
            ErrorCode::CourseAlreadyExists,
            "Course update failed",
        )),
    }
}
