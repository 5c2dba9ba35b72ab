//! 内容页面与页面元素

pub mod create;
pub mod delete;
pub mod elements;
pub mod get;
pub mod list;
pub mod reorder;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::content::requests::{
    CreateElementRequest, CreatePageRequest, PageListParams, ReorderElementsRequest,
    UpdateElementRequest, UpdatePageRequest,
};
use crate::storage::Storage;

pub struct ContentService {
    storage: Option<Arc<dyn Storage>>,
}

impl ContentService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        match &self.storage {
            Some(storage) => storage.clone(),
            None => super::storage_from_request(request),
        }
    }

    pub async fn list_pages(
        &self,
        query: PageListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_pages(self, query, request).await
    }

    pub async fn create_page(
        &self,
        req: CreatePageRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_page(self, req, request).await
    }

    pub async fn get_page(&self, page_id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        get::get_page(self, page_id, request).await
    }

    pub async fn get_public_page(
        &self,
        slug: &str,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        get::get_public_page(self, slug, request).await
    }

    pub async fn update_page(
        &self,
        page_id: i64,
        update: UpdatePageRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_page(self, page_id, update, request).await
    }

    pub async fn delete_page(
        &self,
        page_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_page(self, page_id, request).await
    }

    pub async fn list_elements(
        &self,
        page_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        elements::list_elements(self, page_id, request).await
    }

    pub async fn create_element(
        &self,
        page_id: i64,
        req: CreateElementRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        elements::create_element(self, page_id, req, request).await
    }

    pub async fn update_element(
        &self,
        page_id: i64,
        element_id: i64,
        update: UpdateElementRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        elements::update_element(self, page_id, element_id, update, request).await
    }

    pub async fn delete_element(
        &self,
        page_id: i64,
        element_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        elements::delete_element(self, page_id, element_id, request).await
    }

    pub async fn reorder_elements(
        &self,
        page_id: i64,
        req: ReorderElementsRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        reorder::reorder_elements(self, page_id, req, request).await
    }
}

/// 页面存在性检查
pub(crate) async fn require_page(
    storage: &Arc<dyn Storage>,
    page_id: i64,
) -> Result<(), HttpResponse> {
    match storage.get_page_by_id(page_id).await {
        Ok(Some(_)) => Ok(()),
        Ok(None) => Err(super::not_found(
            crate::models::ErrorCode::PageNotFound,
            "Page not found",
        )),
        Err(e) => Err(super::storage_error_response(
            e,
            crate::models::ErrorCode::PageAlreadyExists,
            "Failed to get page",
        )),
    }
}
