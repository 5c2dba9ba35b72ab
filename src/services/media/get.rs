use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::MediaService;
use crate::models::media::responses::MediaResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::not_found;

pub async fn get_media(
    service: &MediaService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_media_by_id(id).await {
        Ok(Some(media)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            MediaResponse::from(media),
            "Media retrieved successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::MediaNotFound, "Media not found")),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to get media: {e}"),
            )),
        ),
    }
}
