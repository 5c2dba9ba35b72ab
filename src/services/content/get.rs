use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ContentService;
use crate::models::content::{entities::ContentStatus, responses::PageDetailResponse};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::not_found;

/// 后台查看页面，包含全部状态的元素
pub async fn get_page(
    service: &ContentService,
    page_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let page = match storage.get_page_by_id(page_id).await {
        Ok(Some(page)) => page,
        Ok(None) => return Ok(not_found(ErrorCode::PageNotFound, "Page not found")),
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to get page: {e}"),
                )),
            );
        }
    };

    match storage.list_page_elements(page.id, false).await {
        Ok(elements) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            PageDetailResponse { page, elements },
            "Page retrieved successfully",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to list page elements: {e}"),
            )),
        ),
    }
}

/// 公开访问：仅返回已发布页面及其已发布元素，未发布页面一律视为不存在
pub async fn get_public_page(
    service: &ContentService,
    slug: &str,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let page = match storage.get_page_by_slug(slug).await {
        Ok(Some(page)) if page.status == ContentStatus::Published => page,
        Ok(_) => return Ok(not_found(ErrorCode::PageNotFound, "Page not found")),
        Err(e) => {
            tracing::error!("Failed to load public page '{}': {}", slug, e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to load page",
                )),
            );
        }
    };

    match storage.list_page_elements(page.id, true).await {
        Ok(elements) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            PageDetailResponse { page, elements },
            "Page retrieved successfully",
        ))),
        Err(e) => {
            tracing::error!("Failed to load elements of page '{}': {}", slug, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to load page",
                )),
            )
        }
    }
}
