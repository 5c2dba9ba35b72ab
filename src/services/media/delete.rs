use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::fs;

use super::MediaService;
use crate::errors::PortalError;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::not_found;

pub async fn delete_media(
    service: &MediaService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let media = match storage.get_media_by_id(id).await {
        Ok(Some(media)) => media,
        Ok(None) => return Ok(not_found(ErrorCode::MediaNotFound, "Media not found")),
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to get media: {e}"),
                )),
            );
        }
    };

    match storage.media_in_use(id).await {
        Ok(false) => {}
        Ok(true) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::MediaInUse,
                "Media is still referenced by page elements",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to check media references: {e}"),
                )),
            );
        }
    }

    match storage.delete_media(id).await {
        Ok(true) => {
            // 记录已删除，文件删除失败只记日志
            if let Err(e) = fs::remove_file(super::stored_path(&media.stored_name)) {
                let err = PortalError::file_operation(format!(
                    "Failed to remove {}: {e}",
                    media.stored_name
                ));
                tracing::warn!("{}", err);
            }
            tracing::info!("Media {} deleted", id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Media deleted successfully")))
        }
        Ok(false) => Ok(not_found(ErrorCode::MediaNotFound, "Media not found")),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Media deletion failed: {e}"),
            )),
        ),
    }
}
