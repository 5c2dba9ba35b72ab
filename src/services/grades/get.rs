use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::GradeService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::not_found;

pub async fn get_grade(
    service: &GradeService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_grade_by_id(id).await {
        Ok(Some(grade)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            grade,
            "Grade retrieved successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::GradeNotFound, "Grade not found")),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to get grade: {e}"),
            )),
        ),
    }
}
