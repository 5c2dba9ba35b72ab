pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::courses::requests::{
    CreateCourseRequest, CourseListParams, UpdateCourseRequest,
};
use crate::storage::Storage;

pub struct CourseService {
    storage: Option<Arc<dyn Storage>>,
}

impl CourseService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        match &self.storage {
            Some(storage) => storage.clone(),
            None => super::storage_from_request(request),
        }
    }

    pub async fn list_courses(
        &self,
        query: CourseListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_courses(self, query, request).await
    }

    pub async fn create_course(
        &self,
        req: CreateCourseRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_course(self, req, request).await
    }

    pub async fn get_course(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        get::get_course(self, id, request).await
    }

    pub async fn update_course(
        &self,
        id: i64,
        update: UpdateCourseRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_course(self, id, update, request).await
    }

    pub async fn delete_course(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        delete::delete_course(self, id, request).await
    }
}
