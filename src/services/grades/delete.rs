use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::GradeService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::not_found;

pub async fn delete_grade(
    service: &GradeService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.delete_grade(id).await {
        Ok(true) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Grade deleted successfully")))
        }
        Ok(false) => Ok(not_found(ErrorCode::GradeNotFound, "Grade not found")),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Grade deletion failed: {e}"),
            )),
        ),
    }
}
