pub mod auth;
pub mod content;
pub mod courses;
pub mod departments;
pub mod grades;
pub mod media;
pub mod reports;
pub mod students;
pub mod users;

pub use auth::AuthService;
pub use content::ContentService;
pub use courses::CourseService;
pub use departments::DepartmentService;
pub use grades::GradeService;
pub use media::MediaService;
pub use reports::ReportService;
pub use students::StudentService;
pub use users::UserService;

use actix_web::{HttpRequest, HttpResponse, web};
use std::sync::Arc;

use crate::cache::ObjectCache;
use crate::errors::PortalError;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

/// 从 app_data 中取出存储实例
pub(crate) fn storage_from_request(request: &HttpRequest) -> Arc<dyn Storage> {
    request
        .app_data::<web::Data<Arc<dyn Storage>>>()
        .expect("Storage not found in app data")
        .get_ref()
        .clone()
}

pub(crate) fn cache_from_request(request: &HttpRequest) -> Option<Arc<dyn ObjectCache>> {
    request
        .app_data::<web::Data<Arc<dyn ObjectCache>>>()
        .map(|cache| cache.get_ref().clone())
}

/// 存储层错误转为响应：唯一约束冲突返回 409，外键等约束返回 400，其余记录日志后返回 500
pub(crate) fn storage_error_response(
    err: PortalError,
    conflict_code: ErrorCode,
    context: &str,
) -> HttpResponse {
    match err {
        PortalError::Conflict(msg) => {
            tracing::debug!("{}: {}", context, msg);
            HttpResponse::Conflict().json(ApiResponse::error_empty(
                conflict_code,
                format!("{context}: resource already exists"),
            ))
        }
        PortalError::Validation(msg) => HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::BadRequest, msg)),
        other => {
            tracing::error!("{}: {}", context, other);
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("{context}: {}", other.message()),
            ))
        }
    }
}

pub(crate) fn bad_request(code: ErrorCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error_empty(code, message))
}

pub(crate) fn not_found(code: ErrorCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(code, message))
}

/// 校验院系存在，不存在时返回对应的错误响应
pub(crate) async fn require_department(
    storage: &Arc<dyn Storage>,
    department_id: i64,
    code: ErrorCode,
) -> Option<HttpResponse> {
    match storage.get_department_by_id(department_id).await {
        Ok(Some(_)) => None,
        Ok(None) => Some(bad_request(code, "Department does not exist")),
        Err(e) => Some(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to look up department: {e}"),
            )),
        ),
    }
}
