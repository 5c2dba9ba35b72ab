use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CourseService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::not_found;

pub async fn delete_course(
    service: &CourseService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.delete_course(id).await {
        Ok(true) => {
            tracing::info!("Course {} deleted with its grades", id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Course deleted successfully")))
        }
        Ok(false) => Ok(not_found(ErrorCode::CourseNotFound, "Course not found")),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Course deletion failed: {e}"),
            )),
        ),
    }
}
