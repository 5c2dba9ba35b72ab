use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::MediaService;
use crate::models::{ApiResponse, ErrorCode, media::requests::MediaListParams};

pub async fn list_media(
    service: &MediaService,
    query: MediaListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_media_with_pagination(query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Media list retrieved successfully",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to list media: {e}"),
            )),
        ),
    }
}
