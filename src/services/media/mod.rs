pub mod delete;
pub mod download;
pub mod get;
pub mod list;
pub mod update;
pub mod upload;

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::models::media::requests::{MediaListParams, UpdateMediaRequest};
use crate::storage::Storage;

pub struct MediaService {
    storage: Option<Arc<dyn Storage>>,
}

/// 媒体文件在上传目录中的路径
pub(crate) fn stored_path(stored_name: &str) -> PathBuf {
    PathBuf::from(&AppConfig::get().upload.dir).join(stored_name)
}

impl MediaService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        match &self.storage {
            Some(storage) => storage.clone(),
            None => super::storage_from_request(request),
        }
    }

    pub async fn upload_media(
        &self,
        payload: Multipart,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        upload::upload_media(self, payload, request).await
    }

    pub async fn list_media(
        &self,
        query: MediaListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_media(self, query, request).await
    }

    pub async fn get_media(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        get::get_media(self, id, request).await
    }

    pub async fn update_media(
        &self,
        id: i64,
        update: UpdateMediaRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_media(self, id, update, request).await
    }

    pub async fn delete_media(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        delete::delete_media(self, id, request).await
    }

    pub async fn download_media(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        download::download_media(self, id, request).await
    }
}
