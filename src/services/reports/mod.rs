//! 成绩单、课程统计与仪表盘

pub mod dashboard;
pub mod statistics;
pub mod transcript;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::reports::requests::CourseStatisticsParams;
use crate::storage::Storage;

pub struct ReportService {
    storage: Option<Arc<dyn Storage>>,
}

impl ReportService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        match &self.storage {
            Some(storage) => storage.clone(),
            None => super::storage_from_request(request),
        }
    }

    pub async fn student_transcript(
        &self,
        student_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        transcript::student_transcript(self, student_id, request).await
    }

    pub async fn course_statistics(
        &self,
        course_id: i64,
        params: CourseStatisticsParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        statistics::course_statistics(self, course_id, params, request).await
    }

    pub async fn dashboard(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        dashboard::dashboard(self, request).await
    }
}
