use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ContentService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::not_found;

pub async fn delete_page(
    service: &ContentService,
    page_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.delete_page(page_id).await {
        Ok(true) => {
            tracing::info!("Page {} deleted with its elements", page_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Page deleted successfully")))
        }
        Ok(false) => Ok(not_found(ErrorCode::PageNotFound, "Page not found")),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Page deletion failed: {e}"),
            )),
        ),
    }
}
