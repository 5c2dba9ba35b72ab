//! 页面元素的增删改查

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use super::{ContentService, require_page};
use crate::models::content::{
    requests::{CreateElementRequest, UpdateElementRequest},
    responses::ElementListResponse,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{bad_request, not_found, storage_error_response};
use crate::storage::Storage;

/// 引用的媒体必须存在
async fn require_media(
    storage: &Arc<dyn Storage>,
    media_id: Option<i64>,
) -> Result<(), HttpResponse> {
    let Some(media_id) = media_id else {
        return Ok(());
    };
    match storage.get_media_by_id(media_id).await {
        Ok(Some(_)) => Ok(()),
        Ok(None) => Err(bad_request(
            ErrorCode::MediaNotFound,
            format!("Media item {media_id} does not exist"),
        )),
        Err(e) => Err(storage_error_response(
            e,
            ErrorCode::ElementDataInvalid,
            "Failed to look up media item",
        )),
    }
}

pub async fn list_elements(
    service: &ContentService,
    page_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    if let Err(resp) = require_page(&storage, page_id).await {
        return Ok(resp);
    }

    match storage.list_page_elements(page_id, false).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            ElementListResponse { items },
            "Element list retrieved successfully",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to list elements: {e}"),
            )),
        ),
    }
}

pub async fn create_element(
    service: &ContentService,
    page_id: i64,
    mut req: CreateElementRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = req.normalize() {
        return Ok(bad_request(ErrorCode::ElementDataInvalid, msg));
    }

    let storage = service.get_storage(request);
    if let Err(resp) = require_page(&storage, page_id).await {
        return Ok(resp);
    }
    if let Err(resp) = require_media(&storage, req.media_id).await {
        return Ok(resp);
    }

    match storage.create_element(page_id, req).await {
        Ok(element) => Ok(HttpResponse::Created().json(ApiResponse::success(
            element,
            "Element created successfully",
        ))),
        Err(e) => Ok(storage_error_response(
            e,
            ErrorCode::ElementKeyAlreadyExists,
            "Element creation failed",
        )),
    }
}

pub async fn update_element(
    service: &ContentService,
    page_id: i64,
    element_id: i64,
    mut update: UpdateElementRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let existing = match storage.get_element(page_id, element_id).await {
        Ok(Some(element)) => element,
        Ok(None) => return Ok(not_found(ErrorCode::ElementNotFound, "Element not found")),
        Err(e) => {
            return Ok(storage_error_response(
                e,
                ErrorCode::ElementKeyAlreadyExists,
                "Element update failed",
            ));
        }
    };

    if let Err(msg) = update.normalize(&existing) {
        return Ok(bad_request(ErrorCode::ElementDataInvalid, msg));
    }
    if let Err(resp) = require_media(&storage, update.media_id).await {
        return Ok(resp);
    }

    match storage.update_element(element_id, update).await {
        Ok(Some(element)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            element,
            "Element updated successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::ElementNotFound, "Element not found")),
        Err(e) => Ok(storage_error_response(
            e,
            ErrorCode::ElementKeyAlreadyExists,
            "Element update failed",
        )),
    }
}

pub async fn delete_element(
    service: &ContentService,
    page_id: i64,
    element_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 元素必须属于路径中的页面
    match storage.get_element(page_id, element_id).await {
        Ok(Some(_)) => {}
        Ok(None) => return Ok(not_found(ErrorCode::ElementNotFound, "Element not found")),
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to get element: {e}"),
                )),
            );
        }
    }

    match storage.delete_element(element_id).await {
        Ok(true) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Element deleted successfully")))
        }
        Ok(false) => Ok(not_found(ErrorCode::ElementNotFound, "Element not found")),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Element deletion failed: {e}"),
            )),
        ),
    }
}
