pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::departments::requests::{
    CreateDepartmentRequest, DepartmentListParams, UpdateDepartmentRequest,
};
use crate::storage::Storage;

pub struct DepartmentService {
    storage: Option<Arc<dyn Storage>>,
}

impl DepartmentService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        match &self.storage {
            Some(storage) => storage.clone(),
            None => super::storage_from_request(request),
        }
    }

    pub async fn list_departments(
        &self,
        query: DepartmentListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_departments(self, query, request).await
    }

    pub async fn create_department(
        &self,
        req: CreateDepartmentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_department(self, req, request).await
    }

    pub async fn get_department(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        get::get_department(self, id, request).await
    }

    pub async fn update_department(
        &self,
        id: i64,
        update: UpdateDepartmentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_department(self, id, update, request).await
    }

    pub async fn delete_department(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_department(self, id, request).await
    }
}
