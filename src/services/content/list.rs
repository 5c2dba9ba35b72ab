use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ContentService;
use crate::models::{ApiResponse, ErrorCode, content::requests::PageListParams};

pub async fn list_pages(
    service: &ContentService,
    query: PageListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_pages_with_pagination(query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Page list retrieved successfully",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to list pages: {e}"),
            )),
        ),
    }
}
