use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ContentService;
use crate::models::{ApiResponse, ErrorCode, content::requests::CreatePageRequest};
use crate::services::{bad_request, storage_error_response};

pub async fn create_page(
    service: &ContentService,
    mut req: CreatePageRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = req.normalize() {
        return Ok(bad_request(ErrorCode::PageSlugInvalid, msg));
    }

    let storage = service.get_storage(request);
    match storage.create_page(req).await {
        Ok(page) => {
            tracing::info!("Page '{}' created", page.slug);
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(page, "Page created successfully")))
        }
        Err(e) => Ok(storage_error_response(
            e,
            ErrorCode::PageAlreadyExists,
            "Page creation failed",
        )),
    }
}
