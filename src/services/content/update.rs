use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ContentService;
use crate::models::{ApiResponse, ErrorCode, content::requests::UpdatePageRequest};
use crate::services::{bad_request, not_found, storage_error_response};

pub async fn update_page(
    service: &ContentService,
    page_id: i64,
    mut update: UpdatePageRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = update.normalize() {
        return Ok(bad_request(ErrorCode::PageSlugInvalid, msg));
    }

    let storage = service.get_storage(request);
    match storage.update_page(page_id, update).await {
        Ok(Some(page)) => Ok(HttpResponse::Ok()
            .json(ApiResponse::success(page, "Page updated successfully"))),
        Ok(None) => Ok(not_found(ErrorCode::PageNotFound, "Page not found")),
        Err(e) => Ok(storage_error_response(
            e,
            ErrorCode::PageAlreadyExists,
            "Page update failed",
        )),
    }
}
