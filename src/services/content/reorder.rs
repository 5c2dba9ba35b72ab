use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ContentService, require_page};
use crate::errors::PortalError;
use crate::models::content::{requests::ReorderElementsRequest, responses::ElementListResponse};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::bad_request;

/// 按数组顺序重新编号，返回排序后的元素列表
pub async fn reorder_elements(
    service: &ContentService,
    page_id: i64,
    req: ReorderElementsRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = req.check() {
        return Ok(bad_request(ErrorCode::ElementOrderInvalid, msg));
    }

    let storage = service.get_storage(request);
    if let Err(resp) = require_page(&storage, page_id).await {
        return Ok(resp);
    }

    match storage.reorder_elements(page_id, &req.element_ids).await {
        Ok(()) => {}
        Err(PortalError::Validation(msg)) => {
            return Ok(bad_request(ErrorCode::ElementOrderInvalid, msg));
        }
        Err(e) => {
            tracing::error!("Failed to reorder elements of page {}: {}", page_id, e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to reorder elements: {e}"),
                )),
            );
        }
    }

    match storage.list_page_elements(page_id, false).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            ElementListResponse { items },
            "Elements reordered successfully",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to list elements: {e}"),
            )),
        ),
    }
}
