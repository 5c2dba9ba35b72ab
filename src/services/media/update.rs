use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::MediaService;
use crate::models::media::{requests::UpdateMediaRequest, responses::MediaResponse};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::not_found;

/// 仅替代文本可修改
pub async fn update_media(
    service: &MediaService,
    id: i64,
    update: UpdateMediaRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.update_media(id, update).await {
        Ok(Some(media)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            MediaResponse::from(media),
            "Media updated successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::MediaNotFound, "Media not found")),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Media update failed: {e}"),
            )),
        ),
    }
}
